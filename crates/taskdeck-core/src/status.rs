//! Status toggling policy for the task
//! list. This is a UI rule, not something
//! the backend enforces.

use taskdeck_shared::TaskStatus;

/// Next status when a row's toggle is
/// pressed: completed -> pending ->
/// in progress -> completed. Progress is
/// never consulted.
#[must_use]
pub fn next_status(
  current: TaskStatus
) -> TaskStatus {
  match current {
    | TaskStatus::Completed => {
      TaskStatus::Pending
    }
    | TaskStatus::Pending => {
      TaskStatus::InProgress
    }
    | TaskStatus::InProgress => {
      TaskStatus::Completed
    }
  }
}

/// Label for the toggle button.
#[must_use]
pub fn toggle_label(
  current: TaskStatus
) -> &'static str {
  match current {
    | TaskStatus::Completed => "Reopen",
    | TaskStatus::Pending => "Start",
    | TaskStatus::InProgress => "Complete"
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cycle_returns_to_start_after_three_steps()
  {
    for start in TaskStatus::ALL {
      let once = next_status(start);
      let twice = next_status(once);
      assert_ne!(once, start);
      assert_ne!(twice, start);
      assert_eq!(next_status(twice), start);
    }
  }

  #[test]
  fn cycle_order_is_fixed() {
    assert_eq!(
      next_status(TaskStatus::Pending),
      TaskStatus::InProgress
    );
    assert_eq!(
      next_status(TaskStatus::InProgress),
      TaskStatus::Completed
    );
    assert_eq!(
      next_status(TaskStatus::Completed),
      TaskStatus::Pending
    );
  }
}
