use super::ICalendarEventRepo;
use crate::repos::shared::inmemory_repo::*;
use eln_reminders_domain::{CalendarEvent, CalendarEventStatus, ID};

pub struct InMemoryCalendarEventRepo {
    calendar_events: std::sync::Mutex<Vec<CalendarEvent>>,
}

impl InMemoryCalendarEventRepo {
    pub fn new() -> Self {
        Self {
            calendar_events: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ICalendarEventRepo for InMemoryCalendarEventRepo {
    async fn insert(&self, event: &CalendarEvent) -> anyhow::Result<()> {
        insert(event, &self.calendar_events);
        Ok(())
    }

    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<CalendarEvent>> {
        Ok(find(event_id, &self.calendar_events))
    }

    async fn find_upcoming_with_reminders(
        &self,
        start_from: i64,
        start_before: i64,
    ) -> anyhow::Result<Vec<CalendarEvent>> {
        Ok(find_by(&self.calendar_events, |event| {
            event.reminder_enabled
                && event.status == CalendarEventStatus::Scheduled
                && event.start_ts >= start_from
                && event.start_ts <= start_before
        }))
    }

    async fn mark_reminded(&self, event_id: &ID, ts: i64) -> anyhow::Result<()> {
        update_many(
            &self.calendar_events,
            |event| event.id == *event_id,
            |event| event.mark_reminded(ts),
        );
        Ok(())
    }
}
