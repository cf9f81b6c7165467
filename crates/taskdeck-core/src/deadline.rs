use chrono::{
  DateTime,
  Duration,
  Utc
};
use taskdeck_shared::{
  Task,
  TaskStatus
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum DueState {
  NoDueDate,
  Overdue,
  DueSoon,
  Later,
  Done
}

/// Due strictly before `now` and still
/// open.
#[must_use]
pub fn is_overdue(
  task: &Task,
  now: DateTime<Utc>
) -> bool {
  task.status != TaskStatus::Completed
    && task
      .due_date
      .is_some_and(|due| due < now)
}

/// Due within `[now, now + days]`
/// inclusive and still open.
#[must_use]
pub fn is_due_within(
  task: &Task,
  now: DateTime<Utc>,
  days: u32
) -> bool {
  let horizon =
    now + Duration::days(i64::from(days));
  task.status != TaskStatus::Completed
    && task.due_date.is_some_and(|due| {
      now <= due && due <= horizon
    })
}

/// Signed time left until the due date.
/// Negative once overdue.
#[must_use]
pub fn time_remaining(
  task: &Task,
  now: DateTime<Utc>
) -> Option<Duration> {
  task.due_date.map(|due| due - now)
}

#[must_use]
pub fn due_state(
  task: &Task,
  now: DateTime<Utc>,
  soon_days: u32
) -> DueState {
  if task.due_date.is_none() {
    DueState::NoDueDate
  } else if task.status
    == TaskStatus::Completed
  {
    DueState::Done
  } else if is_overdue(task, now) {
    DueState::Overdue
  } else if is_due_within(
    task, now, soon_days
  ) {
    DueState::DueSoon
  } else {
    DueState::Later
  }
}

/// Compact remaining-time text such as
/// `2d 4h left` or `3h overdue`.
#[must_use]
pub fn describe_remaining(
  remaining: Duration
) -> String {
  let overdue = remaining < Duration::zero();
  let abs = if overdue {
    -remaining
  } else {
    remaining
  };
  let days = abs.num_days();
  let hours = abs.num_hours() % 24;
  let minutes = abs.num_minutes() % 60;

  let amount = if days > 0 {
    format!("{days}d {hours}h")
  } else if hours > 0 {
    format!("{hours}h")
  } else {
    format!("{minutes}m")
  };

  if overdue {
    format!("{amount} overdue")
  } else {
    format!("{amount} left")
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;
  use taskdeck_shared::{
    Priority,
    Progress
  };

  use super::*;

  fn now() -> DateTime<Utc> {
    Utc
      .with_ymd_and_hms(
        2026, 10, 17, 12, 0, 0
      )
      .single()
      .expect("valid now")
  }

  fn task_due(
    due: Option<DateTime<Utc>>,
    status: TaskStatus
  ) -> Task {
    Task {
      id: 1,
      title: "t".to_string(),
      description: None,
      priority: Priority::MEDIUM,
      due_date: due,
      status,
      progress: Progress::MIN,
      parent_task_id: None,
      created_at: now(),
      updated_at: now()
    }
  }

  #[test]
  fn overdue_is_strictly_before_now() {
    let at_now =
      task_due(Some(now()), TaskStatus::Pending);
    assert!(!is_overdue(&at_now, now()));

    let past = task_due(
      Some(now() - Duration::seconds(1)),
      TaskStatus::Pending
    );
    assert!(is_overdue(&past, now()));

    let done = task_due(
      Some(now() - Duration::days(3)),
      TaskStatus::Completed
    );
    assert!(!is_overdue(&done, now()));
  }

  #[test]
  fn due_within_is_inclusive_at_both_ends()
  {
    let edge = task_due(
      Some(now() + Duration::days(7)),
      TaskStatus::InProgress
    );
    assert!(is_due_within(&edge, now(), 7));

    let beyond = task_due(
      Some(
        now()
          + Duration::days(7)
          + Duration::seconds(1)
      ),
      TaskStatus::InProgress
    );
    assert!(!is_due_within(
      &beyond,
      now(),
      7
    ));

    let none =
      task_due(None, TaskStatus::Pending);
    assert!(!is_due_within(&none, now(), 7));
    assert_eq!(
      due_state(&none, now(), 7),
      DueState::NoDueDate
    );
  }

  #[test]
  fn remaining_time_reads_naturally() {
    assert_eq!(
      describe_remaining(
        Duration::hours(52)
      ),
      "2d 4h left"
    );
    assert_eq!(
      describe_remaining(
        -Duration::hours(3)
      ),
      "3h overdue"
    );
    assert_eq!(
      describe_remaining(
        Duration::minutes(25)
      ),
      "25m left"
    );
  }
}
