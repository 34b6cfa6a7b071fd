use crate::error::ElnError;
use crate::shared::{
    auth::protect_trigger_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use eln_reminders_api_structs::send_calendar_reminders::*;
use eln_reminders_domain::{
    notification::compose_event_reminder, DispatchGate, EmailSettings, Profile, ID,
};
use eln_reminders_infra::{ElnContext, OutgoingEmail};
use std::collections::HashMap;
use tracing::{error, info, warn};

pub async fn send_calendar_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<ElnContext>,
) -> Result<HttpResponse, ElnError> {
    protect_trigger_route(&http_req, &ctx)?;

    execute(SendCalendarRemindersUseCase {}, &ctx)
        .await
        .map(|reminders_sent| HttpResponse::Ok().json(APIResponse::new(reminders_sent)))
        .map_err(ElnError::from)
}

/// Sends one email per upcoming `CalendarEvent` whose reminder time has been
/// reached, to the owner of the event. Failing events are skipped and stay
/// eligible for the next run.
#[derive(Debug)]
pub struct SendCalendarRemindersUseCase {}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for ElnError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

async fn get_owner_lookup(
    owner_ids: Vec<ID>,
    ctx: &ElnContext,
) -> Result<HashMap<ID, Profile>, UseCaseError> {
    let profiles = ctx
        .repos
        .profiles
        .find_many(&owner_ids)
        .await
        .map_err(|e| {
            error!("Unable to fetch event owners: {:?}", e);
            UseCaseError::StorageError
        })?;

    Ok(profiles.into_iter().map(|p| (p.id.clone(), p)).collect())
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendCalendarRemindersUseCase {
    /// Number of reminders that were sent
    type Response = usize;

    type Error = UseCaseError;

    const NAME: &'static str = "SendCalendarReminders";

    async fn execute(&mut self, ctx: &ElnContext) -> Result<Self::Response, Self::Error> {
        let gate = DispatchGate::new(ctx.sys.get_timestamp_millis(), ctx.config.reminder_policy);
        let candidates = ctx
            .repos
            .calendar_events
            .find_upcoming_with_reminders(gate.now(), gate.event_start_before())
            .await
            .map_err(|e| {
                error!("Unable to fetch upcoming events: {:?}", e);
                UseCaseError::StorageError
            })?;
        let events = gate.filter_events(candidates);
        if events.is_empty() {
            return Ok(0);
        }

        let mut owner_ids = events.iter().map(|e| e.user_id.clone()).collect::<Vec<_>>();
        owner_ids.sort_by_key(|id| id.to_string());
        owner_ids.dedup();
        let owners = get_owner_lookup(owner_ids, ctx).await?;

        let mut reminders_sent = 0;
        for event in &events {
            let owner = match owners.get(&event.user_id) {
                Some(owner) => owner,
                None => {
                    warn!(
                        "Skipping reminder for event {}, its owner {} was not found",
                        event.id, event.user_id
                    );
                    continue;
                }
            };
            let settings = match EmailSettings::from_preferences(&owner.preferences) {
                Ok(settings) => settings,
                Err(e) => {
                    warn!(
                        "Skipping reminder for event {}, the email settings of {} can not be used: {}",
                        event.id, owner.id, e
                    );
                    continue;
                }
            };

            let notification = compose_event_reminder(event, owner);
            let email = OutgoingEmail {
                from: settings.from_header(),
                to: owner.email.clone(),
                subject: notification.subject,
                html: notification.html,
            };
            if let Err(e) = ctx.email_transport.send(&settings, &email).await {
                error!("Unable to send reminder for event {}: {:?}", event.id, e);
                continue;
            }
            reminders_sent += 1;

            let sent_at = ctx.sys.get_timestamp_millis();
            if let Err(e) = ctx
                .repos
                .calendar_events
                .mark_reminded(&event.id, sent_at)
                .await
            {
                error!(
                    "Reminder for event {} was sent but the event could not be marked: {:?}",
                    event.id, e
                );
            }
        }
        info!(
            "Sent {} of {} due calendar reminder(s)",
            reminders_sent,
            events.len()
        );

        Ok(reminders_sent)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use eln_reminders_domain::{CalendarEvent, CalendarEventStatus};
    use eln_reminders_infra::{InMemoryEmailTransport, StaticTimeSys};
    use serde_json::json;
    use std::sync::Arc;
    use crate::shared::test_fakes::{TickingSys, UnmarkableCalendarEventRepo};

    const MINUTE: i64 = 1000 * 60;
    const HOUR: i64 = MINUTE * 60;
    // Sat Oct 17 2026 09:00:00 UTC
    const NOW: i64 = 1792227600000;

    struct TestContext {
        ctx: ElnContext,
        transport: Arc<InMemoryEmailTransport>,
        owner: Profile,
    }

    fn configured_profile(email: &str) -> Profile {
        let mut profile = Profile::new(email);
        profile.preferences = json!({
            "email": {
                "enabled": true,
                "provider": "api",
                "from_address": "notebook@lab.org",
                "from_name": "Lab",
                "api_url": "https://mail.lab.org/send",
                "api_key": "key"
            }
        });
        profile
    }

    async fn setup() -> TestContext {
        let mut ctx = ElnContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys(NOW));
        let transport = Arc::new(InMemoryEmailTransport::new());
        ctx.email_transport = transport.clone();

        let owner = configured_profile("ada@lab.org");
        ctx.repos.profiles.insert(&owner).await.unwrap();

        TestContext {
            ctx,
            transport,
            owner,
        }
    }

    async fn insert_event(
        ctx: &ElnContext,
        owner: &Profile,
        title: &str,
        start_ts: i64,
    ) -> CalendarEvent {
        let event = CalendarEvent::new(owner.id.clone(), title, start_ts);
        ctx.repos.calendar_events.insert(&event).await.unwrap();
        event
    }

    #[actix_web::main]
    #[test]
    async fn sends_and_marks_due_event_reminders() {
        let TestContext {
            ctx,
            transport,
            owner,
        } = setup().await;
        let event = insert_event(&ctx, &owner, "Lab meeting", NOW + 10 * MINUTE).await;

        let res = SendCalendarRemindersUseCase {}.execute(&ctx).await;
        assert_eq!(res, Ok(1));

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "ada@lab.org");
        assert_eq!(sent[0].from, "Lab <notebook@lab.org>");
        assert_eq!(sent[0].subject, "Reminder: Lab meeting");

        let event = ctx
            .repos
            .calendar_events
            .find(&event.id)
            .await
            .unwrap()
            .unwrap();
        assert!(event.reminder_sent);
        assert_eq!(event.last_reminder_sent, Some(NOW));
    }

    #[actix_web::main]
    #[test]
    async fn does_not_resend_within_the_cooldown() {
        let TestContext {
            mut ctx,
            transport,
            owner,
        } = setup().await;
        insert_event(&ctx, &owner, "Lab meeting", NOW + 10 * MINUTE).await;
        assert_eq!(SendCalendarRemindersUseCase {}.execute(&ctx).await, Ok(1));

        ctx.sys = Arc::new(StaticTimeSys(NOW + 5 * MINUTE));
        assert_eq!(SendCalendarRemindersUseCase {}.execute(&ctx).await, Ok(0));
        assert_eq!(transport.sent().len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn waits_for_the_reminder_time() {
        let TestContext {
            ctx,
            transport,
            owner,
        } = setup().await;
        insert_event(&ctx, &owner, "In two hours", NOW + 2 * HOUR).await;
        let mut early = CalendarEvent::new(owner.id.clone(), "Long notice", NOW + 2 * HOUR);
        early.reminder_minutes_before = Some(180);
        ctx.repos.calendar_events.insert(&early).await.unwrap();

        assert_eq!(SendCalendarRemindersUseCase {}.execute(&ctx).await, Ok(1));
        assert_eq!(transport.sent()[0].subject, "Reminder: Long notice");
    }

    #[actix_web::main]
    #[test]
    async fn skips_disabled_and_unscheduled_events() {
        let TestContext {
            ctx,
            transport,
            owner,
        } = setup().await;
        let mut disabled = CalendarEvent::new(owner.id.clone(), "Disabled", NOW + 5 * MINUTE);
        disabled.reminder_enabled = false;
        let mut cancelled = CalendarEvent::new(owner.id.clone(), "Cancelled", NOW + 5 * MINUTE);
        cancelled.status = CalendarEventStatus::Cancelled;
        let started = CalendarEvent::new(owner.id.clone(), "Started", NOW - MINUTE);
        for event in &[&disabled, &cancelled, &started] {
            ctx.repos.calendar_events.insert(event).await.unwrap();
        }

        assert_eq!(SendCalendarRemindersUseCase {}.execute(&ctx).await, Ok(0));
        assert!(transport.sent().is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn continues_past_failing_events() {
        let TestContext {
            ctx,
            transport,
            owner,
        } = setup().await;
        let failing_owner = configured_profile("grace@lab.org");
        ctx.repos.profiles.insert(&failing_owner).await.unwrap();
        let mut unconfigured_owner = Profile::new("linus@lab.org");
        unconfigured_owner.preferences = json!({});
        ctx.repos.profiles.insert(&unconfigured_owner).await.unwrap();
        transport.fail_for("grace@lab.org");

        let failing = insert_event(&ctx, &failing_owner, "Failing", NOW + 5 * MINUTE).await;
        insert_event(&ctx, &unconfigured_owner, "Unconfigured", NOW + 5 * MINUTE).await;
        insert_event(&ctx, &owner, "Lab meeting", NOW + 10 * MINUTE).await;
        let orphan = CalendarEvent::new(ID::new(), "Orphan", NOW + 5 * MINUTE);
        ctx.repos.calendar_events.insert(&orphan).await.unwrap();

        assert_eq!(SendCalendarRemindersUseCase {}.execute(&ctx).await, Ok(1));
        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "ada@lab.org");

        let failing = ctx
            .repos
            .calendar_events
            .find(&failing.id)
            .await
            .unwrap()
            .unwrap();
        assert!(!failing.reminder_sent);
        assert_eq!(failing.last_reminder_sent, None);
    }

    #[actix_web::main]
    #[test]
    async fn marks_each_event_with_the_time_of_its_own_send() {
        let TestContext {
            mut ctx,
            transport,
            owner,
        } = setup().await;
        let step = 10 * MINUTE;
        ctx.sys = Arc::new(TickingSys::new(NOW, step));
        let first = insert_event(&ctx, &owner, "Lab meeting", NOW + 10 * MINUTE).await;
        let second = insert_event(&ctx, &owner, "Journal club", NOW + 12 * MINUTE).await;

        assert_eq!(SendCalendarRemindersUseCase {}.execute(&ctx).await, Ok(2));
        assert_eq!(transport.sent().len(), 2);

        let mut markers = Vec::new();
        for event in &[first, second] {
            let event = ctx
                .repos
                .calendar_events
                .find(&event.id)
                .await
                .unwrap()
                .unwrap();
            markers.push(event.last_reminder_sent.unwrap());
        }
        markers.sort_unstable();
        // The scan reads the clock once, every send reads it again
        assert_eq!(markers, vec![NOW + step, NOW + 2 * step]);
    }

    #[actix_web::main]
    #[test]
    async fn counts_sent_reminders_when_marking_fails() {
        let TestContext {
            mut ctx,
            transport,
            owner,
        } = setup().await;
        let event = insert_event(&ctx, &owner, "Lab meeting", NOW + 10 * MINUTE).await;
        ctx.repos.calendar_events =
            Arc::new(UnmarkableCalendarEventRepo(ctx.repos.calendar_events.clone()));

        assert_eq!(SendCalendarRemindersUseCase {}.execute(&ctx).await, Ok(1));
        assert_eq!(transport.sent().len(), 1);

        let event = ctx
            .repos
            .calendar_events
            .find(&event.id)
            .await
            .unwrap()
            .unwrap();
        assert!(!event.reminder_sent);
        assert_eq!(event.last_reminder_sent, None);
    }
}
