//! Data models for the GanttFlow timeline
//!
//! Defines the task view model consumed by the layout engine and the
//! enums shared across the workspace. Tasks are deserialized from the
//! JSON shape returned by the project task endpoint (`_id`, `startDate`,
//! `dueDate`, ...), with dates normalized to calendar days at parse time.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Task priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    /// Returns the canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Parse a priority from either the canonical or the Spanish labels.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" | "baja" => Some(Priority::Low),
            "medium" | "media" => Some(Priority::Medium),
            "high" | "alta" => Some(Priority::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    OnHold,
}

impl Status {
    /// Returns the canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::NotStarted => "not_started",
            Status::InProgress => "in_progress",
            Status::Completed => "completed",
            Status::OnHold => "on_hold",
        }
    }

    /// Parse a status from either the canonical or the Spanish labels.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "not_started" | "todo" | "sin iniciar" => Some(Status::NotStarted),
            "in_progress" | "en progreso" => Some(Status::InProgress),
            "completed" | "done" | "completada" | "terminada" => Some(Status::Completed),
            "on_hold" | "en espera" => Some(Status::OnHold),
            _ => None,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a task spans a duration or marks a single point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    #[default]
    Task,
    Milestone,
}

impl TaskKind {
    /// Returns the canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Task => "task",
            TaskKind::Milestone => "milestone",
        }
    }

    /// Parse a task kind (`Tarea` and `Hito` are accepted as well).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "task" | "tarea" => Some(TaskKind::Task),
            "milestone" | "hito" => Some(TaskKind::Milestone),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Timeline granularity selected from the toolbar.
///
/// Only changes the cell width and how the second header row buckets
/// days; the layout algorithms are the same for every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Day,
    Week,
    Month,
}

impl ViewMode {
    /// Returns the canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Day => "day",
            ViewMode::Week => "week",
            ViewMode::Month => "month",
        }
    }

    /// Parse a view mode (`dia`, `semana` and `mes` are accepted as well).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "day" | "día" | "dia" => Some(ViewMode::Day),
            "week" | "semana" => Some(ViewMode::Week),
            "month" | "mes" => Some(ViewMode::Month),
            _ => None,
        }
    }

    /// Cycle to the next view mode.
    pub fn next(self) -> Self {
        match self {
            ViewMode::Day => ViewMode::Week,
            ViewMode::Week => ViewMode::Month,
            ViewMode::Month => ViewMode::Day,
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewMode::parse(s)
            .ok_or_else(|| format!("invalid view '{}'. Valid values: day, week, month", s))
    }
}

/// A task as seen by the timeline.
///
/// `start_date <= end_date` is expected but not enforced; the layout
/// engine tolerates reversed intervals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTask", rename_all = "camelCase")]
pub struct Task {
    /// Task ID
    #[serde(rename = "_id")]
    pub id: String,
    /// Task title
    pub title: String,
    /// First calendar day of the task
    pub start_date: NaiveDate,
    /// Last calendar day of the task (inclusive)
    pub end_date: NaiveDate,
    /// Priority
    pub priority: Priority,
    /// Current status
    pub status: Status,
    /// IDs of the assigned users
    pub assigned_to: Vec<String>,
    /// Duration task or milestone
    #[serde(rename = "type")]
    pub kind: TaskKind,
    /// IDs of the tasks this task waits on
    pub dependencies: Vec<String>,
    /// Creation timestamp, used only for sorting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a task with default priority, status and kind.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_date,
            end_date,
            priority: Priority::default(),
            status: Status::default(),
            assigned_to: Vec::new(),
            kind: TaskKind::default(),
            dependencies: Vec::new(),
            created_at: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_kind(mut self, kind: TaskKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_assignee(mut self, user_id: impl Into<String>) -> Self {
        self.assigned_to.push(user_id.into());
        self
    }

    /// Add a dependency on another task.
    pub fn depends_on(mut self, task_id: impl Into<String>) -> Self {
        self.dependencies.push(task_id.into());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Whether this task is drawn as a milestone marker.
    pub fn is_milestone(&self) -> bool {
        self.kind == TaskKind::Milestone
    }

    /// Whether this task has been completed.
    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }
}

/// Parse a JSON array of tasks as returned by the task endpoint.
///
/// # Errors
///
/// Returns `CoreError::Json` if the payload is not a task array, or if a
/// task carries an unparseable date, status, priority or type.
pub fn parse_tasks(json: &str) -> CoreResult<Vec<Task>> {
    let tasks: Vec<Task> = serde_json::from_str(json)?;
    tracing::debug!("Parsed {} tasks", tasks.len());
    Ok(tasks)
}

/// Parse a calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// The time of day is dropped; timestamps keep the calendar date of their
/// own offset, so `2024-06-10T23:30:00-06:00` is June 10.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// Parse a date given on the command line, with a message suited to
/// argument errors.
pub fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_calendar_date(s).ok_or_else(|| format!("invalid date '{}'. Expected YYYY-MM-DD", s))
}

/// Parse a timestamp from RFC 3339, or a bare date taken as midnight UTC.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// A user or task reference: a bare id, a populated document, or a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRef {
    Id(String),
    Many(Vec<RawRef>),
    Doc {
        #[serde(rename = "_id", alias = "id")]
        id: String,
    },
}

impl RawRef {
    fn collect_ids(self, out: &mut Vec<String>) {
        match self {
            RawRef::Id(id) | RawRef::Doc { id } => out.push(id),
            RawRef::Many(refs) => {
                for r in refs {
                    r.collect_ids(out);
                }
            }
        }
    }
}

/// Wire shape of a task before validation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTask {
    #[serde(rename = "_id", alias = "id")]
    id: String,
    #[serde(default)]
    title: String,
    start_date: String,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    due_date: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    assigned_to: Option<RawRef>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    dependencies: Option<RawRef>,
    #[serde(default)]
    created_at: Option<String>,
}

impl RawTask {
    fn invalid(&self, reason: String) -> CoreError {
        CoreError::InvalidTask {
            task_id: self.id.clone(),
            reason,
        }
    }

    fn date_field(&self, field: &str, value: &str) -> CoreResult<NaiveDate> {
        parse_calendar_date(value)
            .ok_or_else(|| self.invalid(format!("unparseable {} '{}'", field, value)))
    }
}

impl TryFrom<RawTask> for Task {
    type Error = CoreError;

    fn try_from(raw: RawTask) -> Result<Self, Self::Error> {
        let start_date = raw.date_field("startDate", &raw.start_date)?;

        // The planned due date is what the timeline draws; endDate is the
        // fallback for payloads that only carry the view-model field.
        let end_date = match (&raw.due_date, &raw.end_date) {
            (Some(due), _) => raw.date_field("dueDate", due)?,
            (None, Some(end)) => raw.date_field("endDate", end)?,
            (None, None) => return Err(raw.invalid("missing dueDate/endDate".to_string())),
        };

        let priority = match raw.priority.as_deref() {
            Some(p) => {
                Priority::parse(p).ok_or_else(|| raw.invalid(format!("unknown priority '{}'", p)))?
            }
            None => Priority::default(),
        };

        let status = match raw.status.as_deref() {
            Some(s) => {
                Status::parse(s).ok_or_else(|| raw.invalid(format!("unknown status '{}'", s)))?
            }
            None => Status::default(),
        };

        let kind = match raw.kind.as_deref() {
            Some(k) => {
                TaskKind::parse(k).ok_or_else(|| raw.invalid(format!("unknown type '{}'", k)))?
            }
            None => TaskKind::default(),
        };

        let created_at = match raw.created_at.as_deref() {
            Some(c) => Some(
                parse_timestamp(c)
                    .ok_or_else(|| raw.invalid(format!("unparseable createdAt '{}'", c)))?,
            ),
            None => None,
        };

        let mut assigned_to = Vec::new();
        if let Some(r) = raw.assigned_to {
            r.collect_ids(&mut assigned_to);
        }

        let mut dependencies = Vec::new();
        if let Some(r) = raw.dependencies {
            r.collect_ids(&mut dependencies);
        }

        Ok(Task {
            id: raw.id,
            title: raw.title,
            start_date,
            end_date,
            priority,
            status,
            assigned_to,
            kind,
            dependencies,
            created_at,
        })
    }
}
