use eln_reminders_domain::{CalendarEvent, Task, TaskStatus, ID};
use eln_reminders_infra::{ICalendarEventRepo, ISys, ITaskRepo};
use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};

/// Clock that moves `step` millis forward every time it is read
pub struct TickingSys {
    ts: AtomicI64,
    step: i64,
}

impl TickingSys {
    pub fn new(start: i64, step: i64) -> Self {
        Self {
            ts: AtomicI64::new(start),
            step,
        }
    }
}

impl ISys for TickingSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.ts.fetch_add(self.step, Ordering::SeqCst)
    }
}

/// Task store whose reminder timestamp updates always fail
pub struct UnmarkableTaskRepo(pub Arc<dyn ITaskRepo>);

#[async_trait::async_trait]
impl ITaskRepo for UnmarkableTaskRepo {
    async fn insert(&self, task: &Task) -> anyhow::Result<()> {
        self.0.insert(task).await
    }

    async fn find(&self, task_id: &ID) -> anyhow::Result<Option<Task>> {
        self.0.find(task_id).await
    }

    async fn find_due_by_user(
        &self,
        user_id: &ID,
        due_before: i64,
        excluded: &[TaskStatus],
    ) -> anyhow::Result<Vec<Task>> {
        self.0.find_due_by_user(user_id, due_before, excluded).await
    }

    async fn find_users_with_due_tasks(
        &self,
        due_before: i64,
        excluded: &[TaskStatus],
    ) -> anyhow::Result<Vec<ID>> {
        self.0.find_users_with_due_tasks(due_before, excluded).await
    }

    async fn set_last_reminder_sent(&self, _task_ids: &[ID], _ts: i64) -> anyhow::Result<()> {
        Err(anyhow::Error::msg("tasks table is read only"))
    }
}

/// Event store whose reminder markers always fail to be written
pub struct UnmarkableCalendarEventRepo(pub Arc<dyn ICalendarEventRepo>);

#[async_trait::async_trait]
impl ICalendarEventRepo for UnmarkableCalendarEventRepo {
    async fn insert(&self, event: &CalendarEvent) -> anyhow::Result<()> {
        self.0.insert(event).await
    }

    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<CalendarEvent>> {
        self.0.find(event_id).await
    }

    async fn find_upcoming_with_reminders(
        &self,
        start_from: i64,
        start_before: i64,
    ) -> anyhow::Result<Vec<CalendarEvent>> {
        self.0
            .find_upcoming_with_reminders(start_from, start_before)
            .await
    }

    async fn mark_reminded(&self, _event_id: &ID, _ts: i64) -> anyhow::Result<()> {
        Err(anyhow::Error::msg("calendar_events table is read only"))
    }
}
