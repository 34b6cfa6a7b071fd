use crate::shared::{
    entity::{Entity, ID},
    enums::ParseEnumError,
};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Used when a `CalendarEvent` has reminders enabled but no explicit offset
pub const DEFAULT_REMINDER_MINUTES_BEFORE: i64 = 15;

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub event_type: CalendarEventType,
    pub status: CalendarEventStatus,
    pub start_ts: i64,
    pub end_ts: Option<i64>,
    pub reminder_enabled: bool,
    pub reminder_minutes_before: Option<i64>,
    /// Set together with `last_reminder_sent`. Kept for readers of the
    /// events table, eligibility only looks at `last_reminder_sent`.
    pub reminder_sent: bool,
    pub last_reminder_sent: Option<i64>,
}

impl CalendarEvent {
    pub fn new(user_id: ID, title: impl Into<String>, start_ts: i64) -> Self {
        Self {
            id: Default::default(),
            user_id,
            title: title.into(),
            description: None,
            location: None,
            event_type: CalendarEventType::Other,
            status: CalendarEventStatus::Scheduled,
            start_ts,
            end_ts: None,
            reminder_enabled: true,
            reminder_minutes_before: None,
            reminder_sent: false,
            last_reminder_sent: None,
        }
    }

    /// Negative offsets are treated as reminding at the start of the event
    pub fn reminder_minutes_before(&self) -> i64 {
        self.reminder_minutes_before
            .unwrap_or(DEFAULT_REMINDER_MINUTES_BEFORE)
            .max(0)
    }

    /// The timestamp from which the owner should be reminded about this event
    pub fn reminder_ts(&self) -> i64 {
        self.start_ts - self.reminder_minutes_before() * 60 * 1000
    }

    pub fn mark_reminded(&mut self, ts: i64) {
        self.reminder_sent = true;
        self.last_reminder_sent = Some(ts);
    }
}

impl Entity for CalendarEvent {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarEventStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl CalendarEventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for CalendarEventStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseEnumError::new("event status", s)),
        }
    }
}

impl Display for CalendarEventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarEventType {
    Meeting,
    Experiment,
    Deadline,
    Reminder,
    Other,
}

impl CalendarEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Meeting => "meeting",
            Self::Experiment => "experiment",
            Self::Deadline => "deadline",
            Self::Reminder => "reminder",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Meeting => "Meeting",
            Self::Experiment => "Experiment",
            Self::Deadline => "Deadline",
            Self::Reminder => "Reminder",
            Self::Other => "Other",
        }
    }
}

impl FromStr for CalendarEventType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "meeting" => Ok(Self::Meeting),
            "experiment" => Ok(Self::Experiment),
            "deadline" => Ok(Self::Deadline),
            "reminder" => Ok(Self::Reminder),
            "other" => Ok(Self::Other),
            _ => Err(ParseEnumError::new("event type", s)),
        }
    }
}

impl Display for CalendarEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
