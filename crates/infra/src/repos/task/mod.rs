mod inmemory;
mod postgres;

pub use inmemory::InMemoryTaskRepo;
pub use postgres::PostgresTaskRepo;

use eln_reminders_domain::{Task, TaskStatus, ID};

#[async_trait::async_trait]
pub trait ITaskRepo: Send + Sync {
    async fn insert(&self, task: &Task) -> anyhow::Result<()>;
    async fn find(&self, task_id: &ID) -> anyhow::Result<Option<Task>>;
    /// `Task`s of the user that are due at or before `due_before` and
    /// not in one of the `excluded` statuses. `Task`s without a due date
    /// are never returned.
    async fn find_due_by_user(
        &self,
        user_id: &ID,
        due_before: i64,
        excluded: &[TaskStatus],
    ) -> anyhow::Result<Vec<Task>>;
    /// Distinct owners of the `Task`s `find_due_by_user` would return
    async fn find_users_with_due_tasks(
        &self,
        due_before: i64,
        excluded: &[TaskStatus],
    ) -> anyhow::Result<Vec<ID>>;
    /// Sets `last_reminder_sent` of all the given `Task`s in one update
    async fn set_last_reminder_sent(&self, task_ids: &[ID], ts: i64) -> anyhow::Result<()>;
}
