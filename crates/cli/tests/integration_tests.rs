//! End-to-end integration tests for the gantt CLI
//!
//! These tests execute commands through the CLI command interface against
//! task files written to temp directories.
//!
//! Tests are organized into modules:
//! - `range` - Calendar window derivation
//! - `headers` - Month and week header rows
//! - `bars` - Bar geometry, filtering and sorting
//! - `frames` - Viewport virtualization and culling
//! - `layout_json` - JSON output
//! - `error_cases` - Error handling tests

mod common;

use common::*;
use clap::Parser;
use ganttflow_cli::commands::{
    BarsCommand, Command, FrameCommand, HeadersCommand, LayoutCommand, RangeCommand,
};
use ganttflow_cli::CliError;
use ganttflow_core::{SortBy, Status, ViewMode};

fn frame_cmd(file: &TaskFile, scroll_left: i64, width: i64) -> FrameCommand {
    FrameCommand {
        tasks: file.args(),
        scroll_left,
        width,
        scroll_top: 0,
        height: None,
        json: false,
    }
}

// =============================================================================
// RANGE TESTS
// =============================================================================

mod range {
    use super::*;

    #[test]
    fn test_range_pads_three_months_each_side() {
        let file = TaskFile::new(PROJECT_JSON);
        let cmd = RangeCommand { tasks: file.args() };
        let output = cmd.execute(&ctx(date(2024, 6, 15))).unwrap();
        assert_eq!(output, "Start  2024-03-01\nEnd    2024-10-31\nDays   245");
    }

    #[test]
    fn test_range_of_empty_list_is_current_year() {
        let file = TaskFile::new("[]");
        let cmd = RangeCommand { tasks: file.args() };
        let output = cmd.execute(&ctx(date(2025, 8, 14))).unwrap();
        assert!(output.contains("2025-01-01"));
        assert!(output.contains("2025-12-31"));
        assert!(output.contains("365"));
    }
}

// =============================================================================
// HEADER TESTS
// =============================================================================

mod headers {
    use super::*;

    #[test]
    fn test_month_headers_listed_in_order() {
        let file = TaskFile::new(PROJECT_JSON);
        let mut args = file.args();
        args.view = ViewMode::Month;
        let output = HeadersCommand { tasks: args }
            .execute(&ctx(date(2024, 6, 15)))
            .unwrap();

        let months = [
            "March 2024",
            "April 2024",
            "May 2024",
            "June 2024",
            "July 2024",
            "August 2024",
            "September 2024",
            "October 2024",
        ];
        let mut last = 0;
        for month in months {
            let pos = output.find(month).unwrap_or_else(|| panic!("{} missing", month));
            assert!(pos >= last, "{} out of order", month);
            last = pos;
        }
    }

    #[test]
    fn test_week_view_adds_week_row() {
        let file = TaskFile::new(PROJECT_JSON);
        let mut args = file.args();
        args.view = ViewMode::Week;
        let output = HeadersCommand { tasks: args }
            .execute(&ctx(date(2024, 6, 15)))
            .unwrap();
        assert!(output.contains("2024-W24"));
        assert!(output.contains("W24"));
    }
}

// =============================================================================
// BAR TESTS
// =============================================================================

mod bars {
    use super::*;

    #[test]
    fn test_bar_geometry_in_day_view() {
        let file = TaskFile::new(PROJECT_JSON);
        let output = BarsCommand { tasks: file.args() }
            .execute(&ctx(date(2024, 6, 15)))
            .unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 5);
        // Requirements: 101 days after March 1st, 3 days wide minus the gap
        assert!(lines[2].contains("t1"));
        assert!(lines[2].contains("5050"));
        assert!(lines[2].contains("145"));
        // Milestone keeps one cell
        assert!(lines[4].contains("milestone"));
        assert!(lines[4].contains("50  Beta release"));
    }

    #[test]
    fn test_status_filter_removes_rows() {
        let file = TaskFile::new(PROJECT_JSON);
        let mut args = file.args();
        args.statuses = vec![Status::InProgress];
        let output = BarsCommand { tasks: args }
            .execute(&ctx(date(2024, 6, 15)))
            .unwrap();

        assert!(output.contains("t2"));
        assert!(!output.contains("t1"));
        assert!(!output.contains("m1"));
    }

    #[test]
    fn test_hide_completed_and_assignee() {
        let file = TaskFile::new(PROJECT_JSON);
        let mut args = file.args();
        args.hide_completed = true;
        args.assignee = Some("u1".to_string());
        let output = BarsCommand { tasks: args }
            .execute(&ctx(date(2024, 6, 15)))
            .unwrap();

        assert!(output.contains("m1"));
        assert!(!output.contains("t1"));
        assert!(!output.contains("t2"));
    }

    #[test]
    fn test_sort_by_title_reorders_rows() {
        let file = TaskFile::new(PROJECT_JSON);
        let mut args = file.args();
        args.sort = Some(SortBy::Title);
        let output = BarsCommand { tasks: args }
            .execute(&ctx(date(2024, 6, 15)))
            .unwrap();
        let lines: Vec<&str> = output.lines().collect();

        // Beta release, build backend, Requirements
        assert!(lines[2].contains("m1"));
        assert!(lines[3].contains("t2"));
        assert!(lines[4].contains("t1"));
    }

    /// Tasks starting in May, June and July 2024
    const SUMMER_JSON: &str = r#"[
        {"_id": "t-may", "title": "Before", "startDate": "2024-05-20", "dueDate": "2024-06-03"},
        {"_id": "t-jun", "title": "During", "startDate": "2024-06-10", "dueDate": "2024-06-12"},
        {"_id": "t-jul", "title": "After", "startDate": "2024-07-02", "dueDate": "2024-07-05"}
    ]"#;

    #[derive(clap::Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Command,
    }

    #[test]
    fn test_from_until_drops_tasks_starting_outside_window() {
        let file = TaskFile::new(SUMMER_JSON);
        let path = file.path.to_str().unwrap();
        let cli = TestCli::try_parse_from([
            "gantt",
            "bars",
            path,
            "--from",
            "2024-06-01",
            "--until",
            "2024-06-30",
        ])
        .unwrap();
        let output = cli.command.execute(&ctx(date(2024, 6, 15))).unwrap();

        assert!(output.contains("t-jun"));
        // "t-may" overlaps June but starts before the window
        assert!(!output.contains("t-may"));
        assert!(!output.contains("t-jul"));
    }

    #[test]
    fn test_from_after_until_is_rejected() {
        let file = TaskFile::new(SUMMER_JSON);
        let mut args = file.args();
        args.start_from = Some(date(2024, 7, 1));
        args.start_until = Some(date(2024, 6, 1));
        let result = BarsCommand { tasks: args }.execute(&ctx(date(2024, 6, 15)));
        assert!(matches!(result, Err(CliError::InvalidArgument { .. })));
    }

    #[test]
    fn test_filter_excluding_everything() {
        let file = TaskFile::new(PROJECT_JSON);
        let mut args = file.args();
        args.statuses = vec![Status::OnHold];
        let output = BarsCommand { tasks: args }
            .execute(&ctx(date(2024, 6, 15)))
            .unwrap();
        assert_eq!(output, "No tasks found.");
    }
}

// =============================================================================
// FRAME TESTS
// =============================================================================

mod frames {
    use super::*;

    #[test]
    fn test_frame_mounts_visible_slice_with_overscan() {
        let file = TaskFile::new(PROJECT_JSON);
        let output = frame_cmd(&file, 5050, 500)
            .execute(&ctx(date(2024, 6, 11)))
            .unwrap();

        // Columns 101..111 are visible, overscan of 3 on each side
        assert!(output.contains("Columns   98..114"), "got:\n{}", output);
        assert!(output.contains("Today     5100"));
        assert!(output.contains("Requirements"));
        assert!(output.contains("build backend"));
    }

    #[test]
    fn test_frame_scrolled_past_end_is_clamped() {
        let file = TaskFile::new(PROJECT_JSON);
        let output = frame_cmd(&file, 1_000_000, 500)
            .execute(&ctx(date(2024, 6, 11)))
            .unwrap();

        assert!(output.contains("left 11750"), "got:\n{}", output);
        assert!(output.contains("Columns   232..245"));
        assert!(output.contains("October 2024"));
        assert!(output.contains("Edge      trailing"));
        assert!(output.contains("No tasks found."));
    }

    #[test]
    fn test_frame_at_start_reports_leading_edge() {
        let file = TaskFile::new(PROJECT_JSON);
        let output = frame_cmd(&file, -400, 500)
            .execute(&ctx(date(2024, 6, 11)))
            .unwrap();
        assert!(output.contains("left 0"));
        assert!(output.contains("Columns   0..13"));
        assert!(output.contains("Edge      leading"));
    }

    #[test]
    fn test_frame_rows_are_virtualized() {
        let file = TaskFile::new(PROJECT_JSON);
        let mut cmd = frame_cmd(&file, 5050, 2_000);
        cmd.scroll_top = 100;
        cmd.height = Some(50);
        let mut context = ctx(date(2024, 6, 11));
        context.config.overscan = 0;
        let output = cmd.execute(&context).unwrap();

        assert!(output.contains("Rows      2..3"));
        assert!(output.contains("m1"));
        assert!(!output.contains("t2"));
    }

    #[test]
    fn test_frame_json() {
        let file = TaskFile::new(PROJECT_JSON);
        let mut cmd = frame_cmd(&file, 5050, 500);
        cmd.json = true;
        let output = cmd.execute(&ctx(date(2024, 6, 11))).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["columns"]["start"], 98);
        assert_eq!(value["today_offset"], 5100);
    }
}

// =============================================================================
// LAYOUT JSON TESTS
// =============================================================================

mod layout_json {
    use super::*;

    #[test]
    fn test_layout_json_contains_geometry() {
        let file = TaskFile::new(PROJECT_JSON);
        let cmd = LayoutCommand {
            tasks: file.args(),
            compact: true,
        };
        let output = cmd.execute(&ctx(date(2024, 6, 15))).unwrap();
        assert!(!output.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["range"]["start"], "2024-03-01");
        assert_eq!(value["bars"][0]["pixel_left"], 5050);
        assert_eq!(value["bars"][0]["pixel_width"], 145);
        assert_eq!(value["arrows"].as_array().unwrap().len(), 2);
        assert_eq!(value["grid"]["total_width"], 245 * 50);
    }
}

// =============================================================================
// ERROR CASES
// =============================================================================

mod error_cases {
    use super::*;

    #[test]
    fn test_missing_file() {
        let cmd = RangeCommand {
            tasks: ganttflow_cli::commands::TaskArgs::for_file("/nonexistent/tasks.json"),
        };
        let result = cmd.execute(&ctx(date(2024, 6, 15)));
        assert!(matches!(result, Err(CliError::Io { .. })));
    }

    #[test]
    fn test_task_without_due_date_is_rejected() {
        let file = TaskFile::new(r#"[{"_id": "x", "title": "No end", "startDate": "2024-06-10"}]"#);
        let result = BarsCommand { tasks: file.args() }.execute(&ctx(date(2024, 6, 15)));
        match result {
            Err(e) => assert!(e.to_string().contains("x"), "got: {}", e),
            Ok(out) => panic!("Expected error, got output:\n{}", out),
        }
    }

    #[test]
    fn test_zero_width_frame_is_rejected() {
        let file = TaskFile::new(PROJECT_JSON);
        let result = frame_cmd(&file, 0, 0).execute(&ctx(date(2024, 6, 15)));
        assert!(matches!(result, Err(CliError::InvalidArgument { .. })));
    }
}
