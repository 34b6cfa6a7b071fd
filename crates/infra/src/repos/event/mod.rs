mod inmemory;
mod postgres;

pub use inmemory::InMemoryCalendarEventRepo;
pub use postgres::PostgresCalendarEventRepo;

use eln_reminders_domain::{CalendarEvent, ID};

#[async_trait::async_trait]
pub trait ICalendarEventRepo: Send + Sync {
    async fn insert(&self, event: &CalendarEvent) -> anyhow::Result<()>;
    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<CalendarEvent>>;
    /// Scheduled `CalendarEvent`s with reminders enabled that start in
    /// the inclusive range `start_from..=start_before`
    async fn find_upcoming_with_reminders(
        &self,
        start_from: i64,
        start_before: i64,
    ) -> anyhow::Result<Vec<CalendarEvent>>;
    /// Sets the one-shot `reminder_sent` flag and `last_reminder_sent`
    async fn mark_reminded(&self, event_id: &ID, ts: i64) -> anyhow::Result<()>;
}
