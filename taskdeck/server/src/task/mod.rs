use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use taskdeck_core::board::{NewSubtask, NewTask, TaskBoard};
use taskdeck_core::model::{Subtask, Task};
use taskdeck_core::rules::CreateError;

pub mod api;

/// Shared task state handed to handlers.
#[derive(Clone, Default)]
pub struct TaskState {
    pub board: Arc<RwLock<TaskBoard>>,
}

/// Service layer over the in-memory board.
///
/// Each create operation holds the write lock for its whole
/// validate-then-append sequence, so concurrent requests on a
/// multi-threaded runtime never interleave mid-mutation. Reads take the
/// shared lock.
pub struct TaskService<'a> {
    board: &'a RwLock<TaskBoard>,
}

impl TaskService<'_> {
    pub fn new(board: &RwLock<TaskBoard>) -> TaskService<'_> {
        TaskService { board }
    }

    /// Creates a new task for the given owner.
    ///
    /// # Returns
    ///
    /// A `Result` containing the stored `Task` if successful, or the first
    /// failing validation otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn create_task(&self, owner_id: &str, input: NewTask) -> Result<Task, CreateError> {
        let mut board = self.board.write().await;
        board.create_task(owner_id, input)
    }

    /// Creates a new subtask under an existing task of the same owner.
    ///
    /// # Returns
    ///
    /// A `Result` containing the stored `Subtask` if successful, or the
    /// first failing validation otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn create_subtask(
        &self,
        owner_id: &str,
        input: NewSubtask,
    ) -> Result<Subtask, CreateError> {
        let mut board = self.board.write().await;
        board.create_subtask(owner_id, input)
    }

    /// Retrieves all tasks owned by `owner_id`, in insertion order.
    #[tracing::instrument(skip(self))]
    pub async fn tasks_for_owner(&self, owner_id: &str) -> Vec<Task> {
        let board = self.board.read().await;
        board.tasks_for_owner(owner_id)
    }

    /// Retrieves a single task by id, scoped to `owner_id`.
    #[tracing::instrument(skip(self))]
    pub async fn task_by_id(&self, owner_id: &str, task_id: Uuid) -> Option<Task> {
        let board = self.board.read().await;
        board.task_by_id(owner_id, task_id)
    }

    /// Retrieves all subtasks of a task, scoped to `owner_id`.
    #[tracing::instrument(skip(self))]
    pub async fn subtasks_for_task(&self, owner_id: &str, task_id: Uuid) -> Vec<Subtask> {
        let board = self.board.read().await;
        board.subtasks_for_task(owner_id, task_id)
    }
}
