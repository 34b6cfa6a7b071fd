use crate::shared::{
    entity::{Entity, ID},
    enums::ParseEnumError,
};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// A lab `Task` owned by a single user. Only the fields the reminder
/// jobs read or write are modelled here.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub description: Option<String>,
    /// Due timestamp in millis, tasks without one are never reminded about
    pub due_ts: Option<i64>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub category: String,
    /// Cooldown marker, set to the dispatch time after a reminder
    /// email including this `Task` was handed to the transport
    pub last_reminder_sent: Option<i64>,
}

impl Task {
    pub fn new(user_id: ID, title: impl Into<String>, due_ts: Option<i64>) -> Self {
        Self {
            id: Default::default(),
            user_id,
            title: title.into(),
            description: None,
            due_ts,
            priority: TaskPriority::Medium,
            status: TaskStatus::Todo,
            category: "general".into(),
            last_reminder_sent: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

impl Entity for Task {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    OnHold,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::OnHold => "on_hold",
            Self::Completed => "completed",
        }
    }

    /// Human readable label used in notifications
    pub fn label(&self) -> &'static str {
        match self {
            Self::Todo => "To do",
            Self::InProgress => "In progress",
            Self::OnHold => "On hold",
            Self::Completed => "Completed",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "on_hold" => Ok(Self::OnHold),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseEnumError::new("task status", s)),
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl FromStr for TaskPriority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParseEnumError::new("task priority", s)),
        }
    }
}

impl Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
