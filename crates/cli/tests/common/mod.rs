//! Test infrastructure for integration tests
//!
//! Provides isolated task files and command builders. Each test writes its
//! own temp file so tests never share state.

use chrono::NaiveDate;
use ganttflow_cli::commands::{Context, TaskArgs};
use ganttflow_core::LayoutConfig;
use std::path::PathBuf;

/// A task file on disk, removed when dropped
pub struct TaskFile {
    pub path: PathBuf,
}

impl TaskFile {
    /// Write `json` to a uniquely named temp file.
    ///
    /// The name combines process ID, thread ID, and nanosecond timestamp to
    /// guarantee isolation.
    pub fn new(json: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "gantt-integration-{}-{:?}-{}.json",
            std::process::id(),
            std::thread::current().id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::write(&path, json).unwrap();
        Self { path }
    }

    /// Task arguments pointing at this file with no filters.
    pub fn args(&self) -> TaskArgs {
        TaskArgs::for_file(&self.path)
    }
}

impl Drop for TaskFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Context with default config and a fixed today.
pub fn ctx(today: NaiveDate) -> Context {
    Context::new(LayoutConfig::default(), today)
}

/// A small project in the shape the API returns it: Spanish labels,
/// populated assignee documents and a mix of dueDate/endDate.
pub const PROJECT_JSON: &str = r#"[
    {
        "_id": "t1",
        "title": "Requirements",
        "startDate": "2024-06-10T00:00:00.000Z",
        "dueDate": "2024-06-12T00:00:00.000Z",
        "priority": "Alta",
        "status": "Completada",
        "assignedTo": [{"_id": "u1", "name": "Ana"}],
        "createdAt": "2024-05-01T09:00:00.000Z"
    },
    {
        "_id": "t2",
        "title": "build backend",
        "startDate": "2024-06-13",
        "endDate": "2024-06-20",
        "priority": "Media",
        "status": "En progreso",
        "assignedTo": ["u2"],
        "dependencies": [{"_id": "t1"}],
        "createdAt": "2024-05-03T09:00:00.000Z"
    },
    {
        "_id": "m1",
        "title": "Beta release",
        "startDate": "2024-06-21",
        "dueDate": "2024-06-21",
        "type": "milestone",
        "status": "Sin iniciar",
        "assignedTo": "u1",
        "dependencies": ["t2"]
    }
]"#;
