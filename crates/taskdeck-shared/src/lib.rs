//! Wire types exchanged with the task
//! backend under `/api/v1`.

pub mod datetime;

use std::fmt;
use std::str::FromStr;

use chrono::{
  DateTime,
  Utc
};
use serde::{
  Deserialize,
  Deserializer,
  Serialize
};

pub use crate::datetime::{
  api_datetime_serde,
  format_api_datetime,
  parse_api_datetime
};

pub type TaskId = u64;
pub type CategoryId = u64;
pub type TagId = u64;
pub type ReminderId = u64;

pub const DEFAULT_CATEGORY_COLOR: &str =
  "#000000";

#[derive(Debug, thiserror::Error)]
pub enum ParseValueError {
  #[error("unknown task status: {0}")]
  Status(String),
  #[error(
    "priority must be 1-5, got {0}"
  )]
  Priority(String)
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
  Default,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
  #[default]
  Pending,
  InProgress,
  Completed
}

impl TaskStatus {
  pub const ALL: [TaskStatus; 3] = [
    TaskStatus::Pending,
    TaskStatus::InProgress,
    TaskStatus::Completed
  ];

  #[must_use]
  pub fn as_str(self) -> &'static str {
    match self {
      | TaskStatus::Pending => "pending",
      | TaskStatus::InProgress => {
        "in_progress"
      }
      | TaskStatus::Completed => {
        "completed"
      }
    }
  }

  #[must_use]
  pub fn label(self) -> &'static str {
    match self {
      | TaskStatus::Pending => "Pending",
      | TaskStatus::InProgress => {
        "In progress"
      }
      | TaskStatus::Completed => {
        "Completed"
      }
    }
  }
}

impl fmt::Display for TaskStatus {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for TaskStatus {
  type Err = ParseValueError;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s
      .trim()
      .to_ascii_lowercase()
      .replace('-', "_")
      .as_str()
    {
      | "pending" => Ok(Self::Pending),
      | "in_progress" => {
        Ok(Self::InProgress)
      }
      | "completed" => {
        Ok(Self::Completed)
      }
      | _ => {
        Err(ParseValueError::Status(
          s.to_string()
        ))
      }
    }
  }
}

/// Task priority ordinal, 1 is highest.
#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
)]
#[serde(transparent)]
pub struct Priority(u8);

impl Priority {
  pub const HIGHEST: Priority =
    Priority(1);
  pub const HIGH: Priority = Priority(2);
  pub const MEDIUM: Priority =
    Priority(3);
  pub const LOW: Priority = Priority(4);
  pub const LOWEST: Priority =
    Priority(5);
  pub const ALL: [Priority; 5] = [
    Priority::HIGHEST,
    Priority::HIGH,
    Priority::MEDIUM,
    Priority::LOW,
    Priority::LOWEST
  ];

  #[must_use]
  pub fn new(value: u8) -> Option<Self> {
    (1..=5)
      .contains(&value)
      .then_some(Self(value))
  }

  #[must_use]
  pub fn value(self) -> u8 {
    self.0
  }

  /// Display label. Values the backend
  /// should never send fall back to
  /// "Medium".
  #[must_use]
  pub fn label(self) -> &'static str {
    match self.0 {
      | 1 => "Highest",
      | 2 => "High",
      | 4 => "Low",
      | 5 => "Lowest",
      | _ => "Medium"
    }
  }
}

impl Default for Priority {
  fn default() -> Self {
    Self::MEDIUM
  }
}

impl fmt::Display for Priority {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl FromStr for Priority {
  type Err = ParseValueError;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    s.trim()
      .parse::<u8>()
      .ok()
      .and_then(Priority::new)
      .ok_or_else(|| {
        ParseValueError::Priority(
          s.to_string()
        )
      })
  }
}

/// Completion percentage, always within
/// `0..=100`. Out-of-range input is
/// clamped, including values decoded
/// from the wire.
#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Default,
)]
#[serde(transparent)]
pub struct Progress(u8);

impl Progress {
  pub const MIN: Progress = Progress(0);
  pub const MAX: Progress = Progress(100);

  #[must_use]
  pub fn new(value: i64) -> Self {
    Self(value.clamp(0, 100) as u8)
  }

  #[must_use]
  pub fn value(self) -> u8 {
    self.0
  }
}

impl<'de> Deserialize<'de> for Progress {
  fn deserialize<D>(
    deserializer: D
  ) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>
  {
    let raw =
      i64::deserialize(deserializer)?;
    Ok(Self::new(raw))
  }
}

impl fmt::Display for Progress {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(f, "{}%", self.0)
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct Task {
  pub id:             TaskId,
  pub title:          String,
  #[serde(default)]
  pub description:    Option<String>,
  #[serde(default)]
  pub priority:       Priority,
  #[serde(
    default,
    with = "api_datetime_serde::option"
  )]
  pub due_date:
    Option<DateTime<Utc>>,
  #[serde(default)]
  pub status:         TaskStatus,
  #[serde(default)]
  pub progress:       Progress,
  #[serde(default)]
  pub parent_task_id: Option<TaskId>,
  #[serde(with = "api_datetime_serde")]
  pub created_at:     DateTime<Utc>,
  #[serde(with = "api_datetime_serde")]
  pub updated_at:     DateTime<Utc>
}

impl Task {
  #[must_use]
  pub fn is_root(&self) -> bool {
    self.parent_task_id.is_none()
  }
}

/// Query for `GET /tasks/`. Unset fields
/// are left out of the query string.
#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
pub struct TaskListQuery {
  pub status:    Option<TaskStatus>,
  pub priority:  Option<Priority>,
  pub root_only: bool
}

impl TaskListQuery {
  #[must_use]
  pub fn roots() -> Self {
    Self {
      root_only: true,
      ..Self::default()
    }
  }

  #[must_use]
  pub fn with_status(
    status: TaskStatus
  ) -> Self {
    Self {
      status: Some(status),
      ..Self::default()
    }
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct TaskCreate {
  pub title:          String,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub description:    Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub priority:       Option<Priority>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    with = "api_datetime_serde::option"
  )]
  pub due_date:
    Option<DateTime<Utc>>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub status:         Option<TaskStatus>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub progress:       Option<Progress>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub parent_task_id: Option<TaskId>
}

impl TaskCreate {
  pub fn new(
    title: impl Into<String>
  ) -> Self {
    Self {
      title:          title.into(),
      description:    None,
      priority:       None,
      due_date:       None,
      status:         None,
      progress:       None,
      parent_task_id: None
    }
  }

  #[must_use]
  pub fn description(
    mut self,
    description: impl Into<String>
  ) -> Self {
    self.description =
      Some(description.into());
    self
  }

  #[must_use]
  pub fn priority(
    mut self,
    priority: Priority
  ) -> Self {
    self.priority = Some(priority);
    self
  }

  #[must_use]
  pub fn due_date(
    mut self,
    due_date: DateTime<Utc>
  ) -> Self {
    self.due_date = Some(due_date);
    self
  }

  #[must_use]
  pub fn status(
    mut self,
    status: TaskStatus
  ) -> Self {
    self.status = Some(status);
    self
  }

  #[must_use]
  pub fn progress(
    mut self,
    progress: Progress
  ) -> Self {
    self.progress = Some(progress);
    self
  }

  #[must_use]
  pub fn parent(
    mut self,
    parent_task_id: TaskId
  ) -> Self {
    self.parent_task_id =
      Some(parent_task_id);
    self
  }
}

/// Partial task update. Only the fields
/// that are set are sent.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Default,
)]
pub struct TaskUpdate {
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub title:          Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub description:    Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub priority:       Option<Priority>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    with = "api_datetime_serde::option"
  )]
  pub due_date:
    Option<DateTime<Utc>>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub status:         Option<TaskStatus>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub progress:       Option<Progress>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub parent_task_id: Option<TaskId>
}

impl TaskUpdate {
  #[must_use]
  pub fn status(
    status: TaskStatus
  ) -> Self {
    Self {
      status: Some(status),
      ..Self::default()
    }
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    *self == Self::default()
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct PriorityUpdate {
  pub priority: Priority
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct PriorityInfo {
  pub priority: Priority,
  pub label:    String
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct DeadlineUpdate {
  #[serde(with = "api_datetime_serde")]
  pub due_date: DateTime<Utc>
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct ProgressUpdate {
  pub progress: Progress
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct ProgressValue {
  pub progress: Progress
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Default,
)]
pub struct ProgressStats {
  pub total_tasks:       u64,
  pub average_progress:  f64,
  pub completed_tasks:   u64,
  pub in_progress_tasks: u64,
  pub pending_tasks:     u64
}

impl ProgressStats {
  /// Average progress rounded to a whole
  /// percent for display.
  #[must_use]
  pub fn average_percent(&self) -> u8 {
    self
      .average_progress
      .round()
      .clamp(0.0, 100.0) as u8
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct Category {
  pub id:    CategoryId,
  pub name:  String,
  #[serde(
    default = "default_category_color"
  )]
  pub color: String
}

fn default_category_color() -> String {
  DEFAULT_CATEGORY_COLOR.to_string()
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct CategoryCreate {
  pub name:  String,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub color: Option<String>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
pub struct CategoryUpdate {
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub name:  Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub color: Option<String>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct Tag {
  pub id:   TagId,
  pub name: String
}

/// Body for both tag create and tag
/// rename; the backend requires `name`
/// in each.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TagCreate {
  pub name: String
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct Reminder {
  pub id:          ReminderId,
  pub task_id:     TaskId,
  #[serde(with = "api_datetime_serde")]
  pub remind_at:   DateTime<Utc>,
  #[serde(default)]
  pub is_notified: bool
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct ReminderCreate {
  pub task_id:   TaskId,
  #[serde(with = "api_datetime_serde")]
  pub remind_at: DateTime<Utc>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
pub struct ReminderUpdate {
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    with = "api_datetime_serde::option"
  )]
  pub remind_at:
    Option<DateTime<Utc>>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub is_notified: Option<bool>
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct MessageResponse {
  pub message: String,
  #[serde(default = "default_true")]
  pub success: bool
}

fn default_true() -> bool {
  true
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn task_decodes_backend_shape() {
    let task: Task =
      serde_json::from_value(json!({
        "id": 7,
        "title": "Buy milk",
        "description": null,
        "priority": 2,
        "due_date": "2026-10-20T18:00:00",
        "status": "in_progress",
        "progress": 40,
        "parent_task_id": null,
        "created_at": "2026-10-17T09:30:00.120000",
        "updated_at": "2026-10-17T09:30:00.120000"
      }))
      .expect("decode task");

    assert_eq!(task.id, 7);
    assert_eq!(
      task.priority,
      Priority::HIGH
    );
    assert_eq!(
      task.status,
      TaskStatus::InProgress
    );
    assert_eq!(task.progress.value(), 40);
    assert!(task.due_date.is_some());
    assert!(task.is_root());
  }

  #[test]
  fn progress_is_clamped_on_decode() {
    let high: Progress =
      serde_json::from_value(json!(250))
        .expect("decode progress");
    let low: Progress =
      serde_json::from_value(json!(-3))
        .expect("decode progress");
    assert_eq!(high, Progress::MAX);
    assert_eq!(low, Progress::MIN);
  }

  #[test]
  fn create_payload_omits_unset_fields() {
    let body = serde_json::to_value(
      TaskCreate::new("Buy milk")
        .priority(Priority::HIGH)
    )
    .expect("encode create");
    assert_eq!(
      body,
      json!({ "title": "Buy milk", "priority": 2 })
    );
  }

  #[test]
  fn update_payload_only_carries_changes() {
    let body = serde_json::to_value(
      TaskUpdate::status(
        TaskStatus::Completed
      )
    )
    .expect("encode update");
    assert_eq!(
      body,
      json!({ "status": "completed" })
    );
    assert!(
      TaskUpdate::default().is_empty()
    );
  }

  #[test]
  fn priority_labels_fall_back_to_medium()
  {
    assert_eq!(
      Priority::HIGHEST.label(),
      "Highest"
    );
    assert_eq!(
      Priority::LOWEST.label(),
      "Lowest"
    );
    let odd: Priority =
      serde_json::from_value(json!(9))
        .expect("decode priority");
    assert_eq!(odd.label(), "Medium");
    assert!(Priority::new(0).is_none());
    assert!(
      "6".parse::<Priority>().is_err()
    );
  }

  #[test]
  fn status_parses_cli_spellings() {
    assert_eq!(
      "in-progress"
        .parse::<TaskStatus>()
        .expect("status"),
      TaskStatus::InProgress
    );
    assert_eq!(
      TaskStatus::InProgress.to_string(),
      "in_progress"
    );
    assert!(
      "done".parse::<TaskStatus>().is_err()
    );
  }

  #[test]
  fn category_color_defaults_when_missing()
  {
    let category: Category =
      serde_json::from_value(json!({
        "id": 1,
        "name": "Work"
      }))
      .expect("decode category");
    assert_eq!(
      category.color,
      DEFAULT_CATEGORY_COLOR
    );
  }
}
