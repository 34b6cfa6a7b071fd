use crate::{
    reminder::{
        send_calendar_reminders::SendCalendarRemindersUseCase,
        send_task_reminders::SendTaskRemindersUseCase,
    },
    shared::usecase::execute,
};
use actix_web::rt::time::{interval_at, Instant};
use eln_reminders_domain::{DispatchGate, TaskStatus};
use eln_reminders_infra::ElnContext;
use std::time::Duration;
use tracing::{error, info};

/// Seconds to wait so that the first run happens `secs_before_min` seconds
/// before a minute boundary
pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

fn first_run_at(ctx: &ElnContext) -> Instant {
    let now = ctx.sys.get_timestamp_millis();
    let secs_to_next_run = get_start_delay(now as usize, 0);
    Instant::now() + Duration::from_secs(secs_to_next_run as u64)
}

pub fn start_calendar_reminders_job(ctx: ElnContext, interval_secs: u64) {
    info!(
        "Sending calendar reminders every {} second(s)",
        interval_secs
    );
    actix_web::rt::spawn(async move {
        let mut interval = interval_at(first_run_at(&ctx), Duration::from_secs(interval_secs));
        loop {
            interval.tick().await;
            let _ = execute(SendCalendarRemindersUseCase {}, &ctx).await;
        }
    });
}

pub fn start_task_reminders_job(ctx: ElnContext, interval_secs: u64) {
    info!("Sending task reminders every {} second(s)", interval_secs);
    actix_web::rt::spawn(async move {
        let mut interval = interval_at(first_run_at(&ctx), Duration::from_secs(interval_secs));
        loop {
            interval.tick().await;
            send_task_reminders_to_all_users(&ctx).await;
        }
    });
}

/// Runs the task reminders for every user with due, unfinished tasks.
/// A failing user does not stop the others.
pub async fn send_task_reminders_to_all_users(ctx: &ElnContext) -> usize {
    let gate = DispatchGate::new(ctx.sys.get_timestamp_millis(), ctx.config.reminder_policy);
    let user_ids = match ctx
        .repos
        .tasks
        .find_users_with_due_tasks(gate.task_due_before(), &[TaskStatus::Completed])
        .await
    {
        Ok(user_ids) => user_ids,
        Err(e) => {
            error!("Unable to fetch users with due tasks: {:?}", e);
            return 0;
        }
    };

    let mut users_reminded = 0;
    for user_id in user_ids {
        let usecase = SendTaskRemindersUseCase {
            user_id,
            test_mode: false,
            test_email: None,
        };
        if let Ok(res) = execute(usecase, ctx).await {
            if res.tasks_count > 0 {
                users_reminded += 1;
            }
        }
    }
    users_reminded
}

#[cfg(test)]
mod tests {
    use super::*;
    use eln_reminders_domain::{Profile, Task};
    use eln_reminders_infra::{InMemoryEmailTransport, StaticTimeSys};
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn start_delay_works() {
        assert_eq!(get_start_delay(50 * 1000, 5), 5);
        assert_eq!(get_start_delay(50 * 1000, 10), 60);
        assert_eq!(get_start_delay(50 * 1000, 15), 55);
        assert_eq!(get_start_delay(60 * 1000, 60), 60);
        assert_eq!(get_start_delay(60 * 1000, 10), 50);
        assert_eq!(get_start_delay(59 * 1000, 0), 1);
        assert_eq!(get_start_delay(59 * 1000, 1), 60);
    }

    #[actix_web::main]
    #[test]
    async fn reminds_every_user_with_due_tasks() {
        const DAY: i64 = 1000 * 60 * 60 * 24;
        // Sat Oct 17 2026 09:00:00 UTC
        const NOW: i64 = 1792227600000;

        let mut ctx = ElnContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys(NOW));
        let transport = Arc::new(InMemoryEmailTransport::new());
        ctx.email_transport = transport.clone();

        let preferences = json!({
            "email": {
                "enabled": true,
                "from_address": "notebook@lab.org",
                "smtp_host": "smtp.lab.org",
                "smtp_user": "notebook",
                "smtp_password": "secret"
            }
        });
        let mut ada = Profile::new("ada@lab.org");
        ada.preferences = preferences.clone();
        let mut grace = Profile::new("grace@lab.org");
        grace.preferences = preferences;
        // Has due tasks but no email settings
        let linus = Profile::new("linus@lab.org");
        for profile in &[&ada, &grace, &linus] {
            ctx.repos.profiles.insert(profile).await.unwrap();
            let task = Task::new(profile.id.clone(), "Order reagents", Some(NOW + DAY));
            ctx.repos.tasks.insert(&task).await.unwrap();
        }

        assert_eq!(send_task_reminders_to_all_users(&ctx).await, 2);
        let mut recipients = transport
            .sent()
            .into_iter()
            .map(|email| email.to)
            .collect::<Vec<_>>();
        recipients.sort();
        assert_eq!(recipients, vec!["ada@lab.org", "grace@lab.org"]);

        // Everything is in the cooldown now
        assert_eq!(send_task_reminders_to_all_users(&ctx).await, 0);
        assert_eq!(transport.sent().len(), 2);
    }
}
