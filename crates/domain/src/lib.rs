mod email_settings;
mod event;
pub mod notification;
mod reminder;
mod shared;
mod task;
mod user;

pub use email_settings::{
    EmailApiSettings, EmailSettings, EmailSettingsError, EmailTransportSettings, SmtpSettings,
};
pub use event::{
    CalendarEvent, CalendarEventStatus, CalendarEventType, DEFAULT_REMINDER_MINUTES_BEFORE,
};
pub use notification::Notification;
pub use reminder::{DispatchGate, ReminderPolicy};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use shared::enums::ParseEnumError;
pub use task::{Task, TaskPriority, TaskStatus};
pub use user::Profile;
