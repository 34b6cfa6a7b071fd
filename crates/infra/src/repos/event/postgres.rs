use super::ICalendarEventRepo;
use eln_reminders_domain::{CalendarEvent, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresCalendarEventRepo {
    pool: PgPool,
}

impl PostgresCalendarEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CalendarEventRaw {
    event_uid: Uuid,
    user_uid: Uuid,
    title: String,
    description: Option<String>,
    location: Option<String>,
    event_type: String,
    status: String,
    start_ts: i64,
    end_ts: Option<i64>,
    reminder_enabled: bool,
    reminder_minutes_before: Option<i32>,
    reminder_sent: bool,
    last_reminder_sent: Option<i64>,
}

impl TryFrom<CalendarEventRaw> for CalendarEvent {
    type Error = anyhow::Error;

    fn try_from(raw: CalendarEventRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.event_uid.into(),
            user_id: raw.user_uid.into(),
            title: raw.title,
            description: raw.description,
            location: raw.location,
            event_type: raw.event_type.parse()?,
            status: raw.status.parse()?,
            start_ts: raw.start_ts,
            end_ts: raw.end_ts,
            reminder_enabled: raw.reminder_enabled,
            reminder_minutes_before: raw.reminder_minutes_before.map(i64::from),
            reminder_sent: raw.reminder_sent,
            last_reminder_sent: raw.last_reminder_sent,
        })
    }
}

#[async_trait::async_trait]
impl ICalendarEventRepo for PostgresCalendarEventRepo {
    async fn insert(&self, e: &CalendarEvent) -> anyhow::Result<()> {
        let reminder_minutes_before = e
            .reminder_minutes_before
            .map(i32::try_from)
            .transpose()?;

        sqlx::query(
            r#"
            INSERT INTO calendar_events(
                event_uid,
                user_uid,
                title,
                description,
                location,
                event_type,
                status,
                start_ts,
                end_ts,
                reminder_enabled,
                reminder_minutes_before,
                reminder_sent,
                last_reminder_sent
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(e.id.inner_ref())
        .bind(e.user_id.inner_ref())
        .bind(&e.title)
        .bind(&e.description)
        .bind(&e.location)
        .bind(e.event_type.as_str())
        .bind(e.status.as_str())
        .bind(e.start_ts)
        .bind(e.end_ts)
        .bind(e.reminder_enabled)
        .bind(reminder_minutes_before)
        .bind(e.reminder_sent)
        .bind(e.last_reminder_sent)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<CalendarEvent>> {
        let event: Option<CalendarEventRaw> = sqlx::query_as(
            r#"
            SELECT * FROM calendar_events AS e
            WHERE e.event_uid = $1
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        event.map(CalendarEvent::try_from).transpose()
    }

    async fn find_upcoming_with_reminders(
        &self,
        start_from: i64,
        start_before: i64,
    ) -> anyhow::Result<Vec<CalendarEvent>> {
        let events: Vec<CalendarEventRaw> = sqlx::query_as(
            r#"
            SELECT * FROM calendar_events AS e
            WHERE e.reminder_enabled = true AND
            e.status = 'scheduled' AND
            e.start_ts >= $1 AND
            e.start_ts <= $2
            ORDER BY e.start_ts ASC
            "#,
        )
        .bind(start_from)
        .bind(start_before)
        .fetch_all(&self.pool)
        .await?;

        events.into_iter().map(CalendarEvent::try_from).collect()
    }

    async fn mark_reminded(&self, event_id: &ID, ts: i64) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE calendar_events
            SET reminder_sent = true,
            last_reminder_sent = $2
            WHERE event_uid = $1
            "#,
        )
        .bind(event_id.inner_ref())
        .bind(ts)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
