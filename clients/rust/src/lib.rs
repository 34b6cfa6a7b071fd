mod base;
mod reminder;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
pub use eln_reminders_api_structs::{
    get_service_health::APIResponse as ServiceHealth,
    send_calendar_reminders::APIResponse as CalendarRemindersSummary,
    send_task_reminders::APIResponse as TaskRemindersSummary,
};
pub use eln_reminders_domain::ID;
use reminder::ReminderClient;
pub use reminder::SendTaskRemindersInput;
use status::StatusClient;
use std::sync::Arc;

/// ELN Reminders Server SDK
///
/// The SDK contains methods for triggering reminder runs on the
/// ELN reminders server.
#[derive(Clone)]
pub struct ElnRemindersSDK {
    pub reminder: ReminderClient,
    pub status: StatusClient,
}

impl ElnRemindersSDK {
    pub fn new<T: Into<String>>(address: String, api_key: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_api_key(api_key.into());
        let base = Arc::new(base);
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base);

        Self { reminder, status }
    }
}
