use super::{badge, escape_html, format_date, format_time, Notification, WRAPPER_END, WRAPPER_START};
use crate::{event::CalendarEventType, CalendarEvent, Profile};

fn event_type_color(event_type: CalendarEventType) -> &'static str {
    match event_type {
        CalendarEventType::Meeting => "#3b82f6",
        CalendarEventType::Experiment => "#10b981",
        CalendarEventType::Deadline => "#ef4444",
        CalendarEventType::Reminder => "#f59e0b",
        CalendarEventType::Other => "#6b7280",
    }
}

fn time_range(event: &CalendarEvent) -> String {
    match event.end_ts {
        Some(end_ts) => format!("{} - {}", format_time(event.start_ts), format_time(end_ts)),
        None => format_time(event.start_ts),
    }
}

/// Renders the reminder email for a single `CalendarEvent`
pub fn compose_event_reminder(event: &CalendarEvent, recipient: &Profile) -> Notification {
    let mut html = String::from(WRAPPER_START);
    html.push_str(r#"<h2 style="color: #111827;">Upcoming event reminder</h2>"#);
    html.push_str(&format!(
        "<p>Hi {},</p><p>This is a reminder for your upcoming event:</p>",
        escape_html(recipient.display_name())
    ));
    html.push_str(
        r#"<div style="border: 1px solid #e5e7eb; border-radius: 8px; padding: 16px; margin: 16px 0;">"#,
    );
    html.push_str(&format!(
        r#"<h3 style="margin: 0 0 8px 0;">{}</h3>"#,
        escape_html(&event.title)
    ));
    html.push_str(&badge(
        event.event_type.label(),
        event_type_color(event.event_type),
    ));
    html.push_str(&format!(
        "<p><strong>Date:</strong> {}</p>",
        format_date(event.start_ts)
    ));
    html.push_str(&format!(
        "<p><strong>Time:</strong> {}</p>",
        time_range(event)
    ));
    if let Some(location) = event.location.as_deref().filter(|l| !l.trim().is_empty()) {
        html.push_str(&format!(
            "<p><strong>Location:</strong> {}</p>",
            escape_html(location)
        ));
    }
    if let Some(description) = event.description.as_deref().filter(|d| !d.trim().is_empty()) {
        html.push_str(&format!(
            r#"<p style="color: #4b5563;">{}</p>"#,
            escape_html(description)
        ));
    }
    html.push_str("</div>");
    html.push_str(WRAPPER_END);

    Notification {
        subject: format!("Reminder: {}", event.title),
        html,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ID;

    // Sat Oct 17 2026 14:00:00 UTC
    const START: i64 = 1792245600000;

    fn sample_event() -> CalendarEvent {
        let mut event = CalendarEvent::new(ID::new(), "Cell culture passage", START);
        event.end_ts = Some(START + 1000 * 60 * 90);
        event.event_type = CalendarEventType::Experiment;
        event.location = Some("Lab 2.14".into());
        event
    }

    fn recipient() -> Profile {
        let mut profile = Profile::new("grace@lab.org");
        profile.full_name = Some("Grace".into());
        profile
    }

    #[test]
    fn it_renders_event_fields() {
        let notification = compose_event_reminder(&sample_event(), &recipient());
        assert_eq!(notification.subject, "Reminder: Cell culture passage");
        assert!(notification.html.contains("Hi Grace,"));
        assert!(notification.html.contains("Cell culture passage"));
        assert!(notification.html.contains("Oct 17, 2026"));
        assert!(notification.html.contains("2:00 PM - 3:30 PM"));
        assert!(notification.html.contains("#10b981"));
        assert!(notification.html.contains("Experiment"));
        assert!(notification.html.contains("<strong>Location:</strong> Lab 2.14"));
    }

    #[test]
    fn it_skips_missing_optional_fields() {
        let mut event = sample_event();
        event.end_ts = None;
        event.location = None;
        event.description = Some("   ".into());
        let notification = compose_event_reminder(&event, &recipient());
        assert!(!notification.html.contains("Location:"));
        assert!(notification.html.contains("<strong>Time:</strong> 2:00 PM</p>"));
        assert!(!notification.html.contains("color: #4b5563"));
    }

    #[test]
    fn it_escapes_untrusted_description() {
        let mut event = sample_event();
        event.description = Some("<img src=x onerror=alert(1)>".into());
        let notification = compose_event_reminder(&event, &recipient());
        assert!(!notification.html.contains("<img"));
        assert!(notification.html.contains("&lt;img src=x onerror=alert(1)&gt;"));
    }

    #[test]
    fn it_is_deterministic() {
        let event = sample_event();
        let first = compose_event_reminder(&event, &recipient());
        let second = compose_event_reminder(&event, &recipient());
        assert_eq!(first, second);
    }
}
