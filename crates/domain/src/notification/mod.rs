mod calendar;
mod format;
mod tasks;

pub use calendar::compose_event_reminder;
pub use format::{escape_html, format_date, format_time};
pub use tasks::compose_task_reminders;

/// A rendered reminder email. It only lives for the duration of one
/// dispatch and is never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub subject: String,
    pub html: String,
}

const WRAPPER_START: &str = r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; color: #1f2937;">"#;
const WRAPPER_END: &str = r#"<p style="color: #6b7280; font-size: 12px; margin-top: 24px;">This reminder was sent by your lab notebook.</p></div>"#;

fn badge(label: &str, color: &str) -> String {
    format!(
        r#"<span style="background-color: {}; color: #ffffff; padding: 2px 8px; border-radius: 12px; font-size: 12px; margin-right: 4px;">{}</span>"#,
        color,
        escape_html(label)
    )
}
