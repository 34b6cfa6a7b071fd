use super::{badge, escape_html, format_date, Notification, WRAPPER_END, WRAPPER_START};
use crate::{
    task::{TaskPriority, TaskStatus},
    Profile, Task,
};

fn priority_color(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::Urgent => "#dc2626",
        TaskPriority::High => "#ea580c",
        TaskPriority::Medium => "#ca8a04",
        TaskPriority::Low => "#16a34a",
    }
}

fn status_color(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "#6b7280",
        TaskStatus::InProgress => "#2563eb",
        TaskStatus::OnHold => "#9333ea",
        TaskStatus::Completed => "#059669",
    }
}

fn task_card(task: &Task) -> String {
    let mut card = String::from(
        r#"<div style="border: 1px solid #e5e7eb; border-radius: 8px; padding: 16px; margin: 12px 0;">"#,
    );
    card.push_str(&format!(
        r#"<h3 style="margin: 0 0 8px 0;">{}</h3>"#,
        escape_html(&task.title)
    ));
    card.push_str(&badge(
        &format!("{} priority", task.priority),
        priority_color(task.priority),
    ));
    card.push_str(&badge(task.status.label(), status_color(task.status)));
    if let Some(due_ts) = task.due_ts {
        card.push_str(&format!(
            "<p><strong>Due:</strong> {}</p>",
            format_date(due_ts)
        ));
    }
    card.push_str(&format!(
        "<p><strong>Category:</strong> {}</p>",
        escape_html(&task.category)
    ));
    if let Some(description) = task.description.as_deref().filter(|d| !d.trim().is_empty()) {
        card.push_str(&format!(
            r#"<p style="color: #4b5563;">{}</p>"#,
            escape_html(description)
        ));
    }
    card.push_str("</div>");
    card
}

/// Renders one email that bundles all the given `Task`s of a recipient
pub fn compose_task_reminders(tasks: &[Task], recipient: &Profile) -> Notification {
    let count = tasks.len();

    let mut html = String::from(WRAPPER_START);
    html.push_str(r#"<h2 style="color: #111827;">Task reminder</h2>"#);
    html.push_str(&format!(
        "<p>Hi {},</p><p>You have {} task(s) due soon:</p>",
        escape_html(recipient.display_name()),
        count
    ));
    for task in tasks {
        html.push_str(&task_card(task));
    }
    html.push_str(WRAPPER_END);

    Notification {
        subject: format!("Reminder: {} task(s) due soon", count),
        html,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ID;

    // Sat Oct 17 2026 09:00:00 UTC
    const NOW: i64 = 1792227600000;
    const DAY: i64 = 1000 * 60 * 60 * 24;

    fn recipient() -> Profile {
        Profile::new("rosalind@lab.org")
    }

    fn task(title: &str, due_ts: i64) -> Task {
        Task::new(ID::new(), title, Some(due_ts))
    }

    #[test]
    fn it_renders_one_card_per_task() {
        let mut urgent = task("Calibrate pipettes", NOW + DAY);
        urgent.priority = TaskPriority::Urgent;
        urgent.status = TaskStatus::InProgress;
        urgent.category = "maintenance".into();
        let tasks = vec![urgent, task("Write lab report", NOW + 2 * DAY)];

        let notification = compose_task_reminders(&tasks, &recipient());
        assert_eq!(notification.subject, "Reminder: 2 task(s) due soon");
        assert_eq!(notification.html.matches("<h3").count(), 2);
        assert!(notification.html.contains("Hi rosalind@lab.org,"));
        assert!(notification.html.contains("You have 2 task(s) due soon"));
        assert!(notification.html.contains("urgent priority"));
        assert!(notification.html.contains("#dc2626"));
        assert!(notification.html.contains("In progress"));
        assert!(notification.html.contains("<strong>Category:</strong> maintenance"));
        assert!(notification.html.contains("Oct 18, 2026"));
        assert!(notification.html.contains("Oct 19, 2026"));
    }

    #[test]
    fn it_counts_a_single_task() {
        let tasks = vec![task("Autoclave glassware", NOW)];
        let notification = compose_task_reminders(&tasks, &recipient());
        assert_eq!(notification.subject, "Reminder: 1 task(s) due soon");
    }

    #[test]
    fn it_escapes_task_fields() {
        let mut t = task("<b>Order</b> & restock", NOW);
        t.description = Some("<script>steal()</script>".into());
        let notification = compose_task_reminders(&[t], &recipient());
        assert!(notification.html.contains("&lt;b&gt;Order&lt;/b&gt; &amp; restock"));
        assert!(!notification.html.contains("<script>"));
    }

    #[test]
    fn it_is_deterministic() {
        let tasks = vec![task("Thaw samples", NOW), task("Label tubes", NOW + DAY)];
        assert_eq!(
            compose_task_reminders(&tasks, &recipient()),
            compose_task_reminders(&tasks, &recipient())
        );
    }
}
