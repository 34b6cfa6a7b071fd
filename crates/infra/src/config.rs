use eln_reminders_domain::ReminderPolicy;
use eln_reminders_utils::create_random_secret;
use tracing::{info, warn};

const HOUR_MILLIS: i64 = 1000 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret that callers must provide in the `x-api-key` header
    /// to trigger a reminders run
    pub reminders_trigger_secret: String,
    /// Port for the application to run on
    pub port: usize,
    /// Seconds between two in-process calendar reminder runs.
    /// `None` leaves triggering to an external scheduler.
    pub calendar_reminders_job_interval: Option<u64>,
    /// Seconds between two in-process task reminder runs covering all users
    /// with due tasks. `None` leaves triggering to an external scheduler.
    pub task_reminders_job_interval: Option<u64>,
    /// Lookahead and cooldown windows of the reminder jobs
    pub reminder_policy: ReminderPolicy,
}

impl Config {
    pub fn new() -> Self {
        let reminders_trigger_secret = match std::env::var("REMINDERS_TRIGGER_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                info!("Did not find REMINDERS_TRIGGER_SECRET environment variable. Going to create one.");
                let secret = create_random_secret(32);
                info!(
                    "Secret for triggering reminder runs was generated and set to: {}",
                    secret
                );
                secret
            }
        };

        let mut reminder_policy = ReminderPolicy::default();
        if let Some(hours) = parse_positive(
            "TASK_REMINDER_LOOKAHEAD_HOURS",
            std::env::var("TASK_REMINDER_LOOKAHEAD_HOURS").ok(),
        ) {
            reminder_policy.task_lookahead = hours as i64 * HOUR_MILLIS;
        }
        if let Some(hours) = parse_positive(
            "EVENT_REMINDER_LOOKAHEAD_HOURS",
            std::env::var("EVENT_REMINDER_LOOKAHEAD_HOURS").ok(),
        ) {
            reminder_policy.event_lookahead = hours as i64 * HOUR_MILLIS;
        }

        Self {
            reminders_trigger_secret,
            port: parse_port(std::env::var("PORT").ok()),
            calendar_reminders_job_interval: parse_positive(
                "CALENDAR_REMINDERS_INTERVAL_SECS",
                std::env::var("CALENDAR_REMINDERS_INTERVAL_SECS").ok(),
            ),
            task_reminders_job_interval: parse_positive(
                "TASK_REMINDERS_INTERVAL_SECS",
                std::env::var("TASK_REMINDERS_INTERVAL_SECS").ok(),
            ),
            reminder_policy,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

const DEFAULT_PORT: usize = 5000;

fn parse_port(port: Option<String>) -> usize {
    match port {
        None => DEFAULT_PORT,
        Some(port) => match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, DEFAULT_PORT
                );
                DEFAULT_PORT
            }
        },
    }
}

// Unset, zero and invalid values all mean "not configured"
fn parse_positive(name: &str, value: Option<String>) -> Option<u64> {
    let value = value?;
    match value.parse::<u64>() {
        Ok(0) => None,
        Ok(v) => Some(v),
        Err(_) => {
            warn!("The given {}: {} is not a valid number, ignoring it.", name, value);
            None
        }
    }
}
