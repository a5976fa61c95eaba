use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::model::{Priority, Status, Subtask, Task};
use crate::rules::{self, CreateError};

/// Input for task creation. Absent priority defaults to `Medium`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
}

/// Input for subtask creation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubtask {
    pub parent_task_id: Uuid,
    pub title: String,
}

/// In-memory store for tasks and subtasks.
///
/// An explicit store object constructed once at process start and injected
/// into the service layer; tests get isolation by constructing fresh
/// instances. Records are appended in creation order and never updated or
/// deleted. Reads are linear scans, which is intentional at this scale.
///
/// Every create operation runs its validate-then-append sequence through a
/// single `&mut self` borrow, so no other writer can interleave within one
/// call. Callers running on multiple threads must serialize access with
/// their own guard around the whole board.
#[derive(Debug, Default)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    subtasks: Vec<Subtask>,
}

impl TaskBoard {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `input` and appends a new task owned by `owner_id`.
    ///
    /// Checks run fail-fast in the fixed order: title required, title too
    /// short, title too long, description too long, due date in the past.
    /// On success the stored record is returned; repeated identical calls
    /// create distinct records with distinct ids.
    pub fn create_task(&mut self, owner_id: &str, input: NewTask) -> Result<Task, CreateError> {
        rules::check_title(&input.title)?;
        rules::check_description(input.description.as_deref())?;
        rules::check_due_date(input.due_date, Utc::now().date_naive())?;

        let task = Task {
            id: Uuid::new_v4(),
            owner_id: owner_id.to_owned(),
            title: input.title.trim().to_owned(),
            description: input
                .description
                .as_deref()
                .map(str::trim)
                .filter(|description| !description.is_empty())
                .map(str::to_owned),
            due_date: input.due_date,
            priority: input.priority.unwrap_or_default(),
            status: Status::Pending,
            created_at: Utc::now(),
        };
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Validates `input` and appends a new subtask under an existing task.
    ///
    /// The parent must exist and belong to `owner_id`; a task owned by a
    /// different user is indistinguishable from a missing one. The subtask
    /// copies the parent's owner.
    pub fn create_subtask(
        &mut self,
        owner_id: &str,
        input: NewSubtask,
    ) -> Result<Subtask, CreateError> {
        let parent_owner = self
            .tasks
            .iter()
            .find(|task| task.id == input.parent_task_id && task.owner_id == owner_id)
            .map(|task| task.owner_id.clone())
            .ok_or(CreateError::TaskNotFound)?;

        rules::check_title(&input.title)?;

        let subtask = Subtask {
            id: Uuid::new_v4(),
            parent_task_id: input.parent_task_id,
            owner_id: parent_owner,
            title: input.title.trim().to_owned(),
            status: Status::Pending,
            created_at: Utc::now(),
        };
        self.subtasks.push(subtask.clone());
        Ok(subtask)
    }

    /// Returns all tasks owned by `owner_id`, in insertion order.
    pub fn tasks_for_owner(&self, owner_id: &str) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| task.owner_id == owner_id)
            .cloned()
            .collect()
    }

    /// Returns the task with the given id if it exists and belongs to
    /// `owner_id`. Absence is `None`, never an error.
    pub fn task_by_id(&self, owner_id: &str, task_id: Uuid) -> Option<Task> {
        self.tasks
            .iter()
            .find(|task| task.id == task_id && task.owner_id == owner_id)
            .cloned()
    }

    /// Returns all subtasks of the given task for `owner_id`, in insertion
    /// order. An unknown task id yields an empty list.
    pub fn subtasks_for_task(&self, owner_id: &str, task_id: Uuid) -> Vec<Subtask> {
        self.subtasks
            .iter()
            .filter(|subtask| subtask.parent_task_id == task_id && subtask.owner_id == owner_id)
            .cloned()
            .collect()
    }
}
