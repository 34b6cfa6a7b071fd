use crate::{
    event::{CalendarEvent, CalendarEventStatus},
    task::Task,
};

const HOUR_MILLIS: i64 = 1000 * 60 * 60;
const DAY_MILLIS: i64 = HOUR_MILLIS * 24;

/// Lookahead and cooldown windows of the two reminder jobs, in millis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReminderPolicy {
    /// Tasks due before `now + task_lookahead` are reminder candidates
    pub task_lookahead: i64,
    /// Minimum time between two reminders about the same `Task`
    pub task_cooldown: i64,
    /// Events starting before `now + event_lookahead` are reminder candidates
    pub event_lookahead: i64,
    /// Minimum time between two reminders about the same `CalendarEvent`
    pub event_cooldown: i64,
}

impl Default for ReminderPolicy {
    fn default() -> Self {
        Self {
            task_lookahead: 3 * DAY_MILLIS,
            task_cooldown: DAY_MILLIS,
            event_lookahead: DAY_MILLIS,
            event_cooldown: HOUR_MILLIS,
        }
    }
}

fn cooldown_elapsed(last_reminder_sent: Option<i64>, now: i64, cooldown: i64) -> bool {
    match last_reminder_sent {
        None => true,
        Some(sent) => sent < now - cooldown,
    }
}

/// Decides which scanned items should actually be notified in this run.
///
/// The store queries already narrow down the candidates, but the gate checks
/// every condition again so that it alone decides eligibility.
#[derive(Debug, Clone, Copy)]
pub struct DispatchGate {
    now: i64,
    policy: ReminderPolicy,
}

impl DispatchGate {
    pub fn new(now: i64, policy: ReminderPolicy) -> Self {
        Self { now, policy }
    }

    pub fn now(&self) -> i64 {
        self.now
    }

    /// Upper bound (inclusive) of the task due timestamps to scan for
    pub fn task_due_before(&self) -> i64 {
        self.now + self.policy.task_lookahead
    }

    /// Upper bound (inclusive) of the event start timestamps to scan for
    pub fn event_start_before(&self) -> i64 {
        self.now + self.policy.event_lookahead
    }

    pub fn admits_task(&self, task: &Task) -> bool {
        if task.is_completed() {
            return false;
        }
        match task.due_ts {
            Some(due) if due <= self.task_due_before() => {
                cooldown_elapsed(task.last_reminder_sent, self.now, self.policy.task_cooldown)
            }
            _ => false,
        }
    }

    pub fn admits_event(&self, event: &CalendarEvent) -> bool {
        event.reminder_enabled
            && event.status == CalendarEventStatus::Scheduled
            && event.start_ts >= self.now
            && event.start_ts <= self.event_start_before()
            && self.now >= event.reminder_ts()
            && cooldown_elapsed(
                event.last_reminder_sent,
                self.now,
                self.policy.event_cooldown,
            )
    }

    pub fn filter_tasks(&self, tasks: Vec<Task>) -> Vec<Task> {
        tasks.into_iter().filter(|t| self.admits_task(t)).collect()
    }

    pub fn filter_events(&self, events: Vec<CalendarEvent>) -> Vec<CalendarEvent> {
        events.into_iter().filter(|e| self.admits_event(e)).collect()
    }
}
