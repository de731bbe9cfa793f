//! Task filtering and sorting
//!
//! A builder-pattern [`TaskFilter`] narrows the task list before layout and
//! [`TaskSort`] orders it; since rows follow list order, sorting decides the
//! vertical arrangement of bars.

use chrono::{Duration, NaiveDate};
use std::cmp::Ordering;

use crate::models::{Priority, Status, Task};

/// Due-date windows relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueWindow {
    /// Due before today and not completed
    Overdue,
    /// Due today
    Today,
    /// Due within the next seven days, today included
    ThisWeek,
}

impl DueWindow {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "overdue" => Some(DueWindow::Overdue),
            "today" => Some(DueWindow::Today),
            "week" | "this_week" => Some(DueWindow::ThisWeek),
            _ => None,
        }
    }

    fn matches(self, task: &Task, today: NaiveDate) -> bool {
        match self {
            DueWindow::Overdue => task.end_date < today && !task.is_completed(),
            DueWindow::Today => task.end_date == today,
            DueWindow::ThisWeek => {
                // No upper bound when a week past today is not representable
                let horizon = today.checked_add_signed(Duration::days(7));
                today <= task.end_date && horizon.is_none_or(|h| task.end_date < h)
            }
        }
    }
}

/// Filter criteria for the task list
///
/// Criteria use OR semantics within the same type (several statuses match
/// any of them) and AND semantics across types. An unset criterion matches
/// every task.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Filter by statuses (OR semantics)
    pub statuses: Vec<Status>,
    /// Filter by priorities (OR semantics)
    pub priorities: Vec<Priority>,
    /// Only tasks assigned to this user
    pub assignee: Option<String>,
    pub due: Option<DueWindow>,
    /// Inclusive bounds on the start date
    pub start_from: Option<NaiveDate>,
    pub start_until: Option<NaiveDate>,
    pub hide_completed: bool,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.statuses.push(status);
        self
    }

    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = Status>) -> Self {
        self.statuses.extend(statuses);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priorities.push(priority);
        self
    }

    pub fn with_priorities(mut self, priorities: impl IntoIterator<Item = Priority>) -> Self {
        self.priorities.extend(priorities);
        self
    }

    pub fn assigned_to(mut self, user_id: impl Into<String>) -> Self {
        self.assignee = Some(user_id.into());
        self
    }

    pub fn due_within(mut self, window: DueWindow) -> Self {
        self.due = Some(window);
        self
    }

    /// Keep tasks starting inside `[from, until]`; either bound may be open.
    pub fn starting_between(mut self, from: Option<NaiveDate>, until: Option<NaiveDate>) -> Self {
        self.start_from = from;
        self.start_until = until;
        self
    }

    pub fn hide_completed(mut self) -> Self {
        self.hide_completed = true;
        self
    }

    /// Whether no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
            && self.priorities.is_empty()
            && self.assignee.is_none()
            && self.due.is_none()
            && self.start_from.is_none()
            && self.start_until.is_none()
            && !self.hide_completed
    }

    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        if !self.statuses.is_empty() && !self.statuses.contains(&task.status) {
            return false;
        }
        if !self.priorities.is_empty() && !self.priorities.contains(&task.priority) {
            return false;
        }
        if let Some(user) = &self.assignee
            && !task.assigned_to.iter().any(|a| a == user)
        {
            return false;
        }
        if let Some(window) = self.due
            && !window.matches(task, today)
        {
            return false;
        }
        if self.start_from.is_some_and(|from| task.start_date < from) {
            return false;
        }
        if self.start_until.is_some_and(|until| task.start_date > until) {
            return false;
        }
        !(self.hide_completed && task.is_completed())
    }

    /// Tasks passing the filter, in their original order.
    pub fn apply(&self, tasks: &[Task], today: NaiveDate) -> Vec<Task> {
        tasks
            .iter()
            .filter(|t| self.matches(t, today))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    CreatedAt,
    DueDate,
    Title,
}

impl SortBy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "created_at" | "created" | "createdat" => Some(SortBy::CreatedAt),
            "due_date" | "due" | "duedate" => Some(SortBy::DueDate),
            "title" => Some(SortBy::Title),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Ordering applied to the task list before layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskSort {
    pub by: SortBy,
    pub order: SortOrder,
}

impl TaskSort {
    pub fn new(by: SortBy, order: SortOrder) -> Self {
        Self { by, order }
    }

    fn compare(&self, a: &Task, b: &Task) -> Ordering {
        let directed = |ord: Ordering| match self.order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        };

        match self.by {
            // Missing timestamps go last whichever way we sort
            SortBy::CreatedAt => match (a.created_at, b.created_at) {
                (Some(x), Some(y)) => directed(x.cmp(&y)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            SortBy::DueDate => directed(a.end_date.cmp(&b.end_date)),
            SortBy::Title => directed(a.title.to_lowercase().cmp(&b.title.to_lowercase())),
        }
    }

    /// Stable in-place sort.
    pub fn sort(&self, tasks: &mut [Task]) {
        tasks.sort_by(|a, b| self.compare(a, b));
    }
}
