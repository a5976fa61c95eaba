use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Priority level of a task. Wire format is the numeric code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Priority {
    Low = 0,
    #[default]
    Medium = 1,
    High = 2,
}

impl Priority {
    /// Decodes a numeric wire code into a priority.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Priority::Low),
            1 => Some(Priority::Medium),
            2 => Some(Priority::High),
            _ => None,
        }
    }

    /// Returns the numeric wire code of the priority.
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Lifecycle status shared by tasks and subtasks.
///
/// `InProgress` and `Completed` are part of the domain but no operation
/// produces them yet; everything is created `Pending` and transitions are
/// not exposed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Status {
    #[default]
    Pending = 0,
    InProgress = 1,
    Completed = 2,
}

impl Status {
    /// Returns the numeric wire code of the status.
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// A top-level to-do item owned by a user.
///
/// `title` and `description` are stored trimmed; a description that is empty
/// after trimming is stored as `None`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Task {
    pub id: Uuid,
    pub owner_id: String,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub status: Status,
    pub created_at: DateTime<Utc>,
}

/// A child item linked to exactly one task, owned by the parent's owner.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Subtask {
    pub id: Uuid,
    pub parent_task_id: Uuid,
    pub owner_id: String,
    pub title: String,
    pub status: Status,
    pub created_at: DateTime<Utc>,
}
