//! View state of the task dashboard and
//! the reducer that drives it.
//!
//! Front ends dispatch [`ViewAction`]s and
//! render whatever [`ViewState`] comes
//! back; no other code mutates the state.

use std::fmt;
use std::str::FromStr;

use taskdeck_shared::{
  Category,
  ProgressStats,
  Tag,
  Task,
  TaskListQuery,
  TaskStatus
};
use tracing::{
  debug,
  error,
  info
};

use crate::api::{
  ApiError,
  DEFAULT_UPCOMING_DAYS
};
use crate::form::{
  FormEdit,
  FormError,
  TaskForm
};

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
)]
pub enum ViewFilter {
  #[default]
  All,
  Pending,
  InProgress,
  Completed,
  Overdue,
  Upcoming
}

/// Which endpoint feeds the task list for
/// a filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TaskSource {
  List(TaskListQuery),
  Overdue,
  Upcoming { days: u32 }
}

impl ViewFilter {
  pub const ALL: [ViewFilter; 6] = [
    ViewFilter::All,
    ViewFilter::Pending,
    ViewFilter::InProgress,
    ViewFilter::Completed,
    ViewFilter::Overdue,
    ViewFilter::Upcoming
  ];

  #[must_use]
  pub fn key(self) -> &'static str {
    match self {
      | ViewFilter::All => "all",
      | ViewFilter::Pending => "pending",
      | ViewFilter::InProgress => {
        "in_progress"
      }
      | ViewFilter::Completed => {
        "completed"
      }
      | ViewFilter::Overdue => "overdue",
      | ViewFilter::Upcoming => "upcoming"
    }
  }

  #[must_use]
  pub fn label(self) -> &'static str {
    match self {
      | ViewFilter::All => "All tasks",
      | ViewFilter::Pending => "Pending",
      | ViewFilter::InProgress => {
        "In progress"
      }
      | ViewFilter::Completed => {
        "Completed"
      }
      | ViewFilter::Overdue => "Overdue",
      | ViewFilter::Upcoming => "Due soon"
    }
  }

  /// "All" shows root tasks only; subtasks
  /// are reached through their parent.
  #[must_use]
  pub fn task_source(self) -> TaskSource {
    match self {
      | ViewFilter::All => {
        TaskSource::List(
          TaskListQuery::roots()
        )
      }
      | ViewFilter::Pending => {
        TaskSource::List(
          TaskListQuery::with_status(
            TaskStatus::Pending
          )
        )
      }
      | ViewFilter::InProgress => {
        TaskSource::List(
          TaskListQuery::with_status(
            TaskStatus::InProgress
          )
        )
      }
      | ViewFilter::Completed => {
        TaskSource::List(
          TaskListQuery::with_status(
            TaskStatus::Completed
          )
        )
      }
      | ViewFilter::Overdue => {
        TaskSource::Overdue
      }
      | ViewFilter::Upcoming => {
        TaskSource::Upcoming {
          days: DEFAULT_UPCOMING_DAYS
        }
      }
    }
  }
}

impl fmt::Display for ViewFilter {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.key())
  }
}

impl FromStr for ViewFilter {
  type Err = String;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    let key = s
      .trim()
      .to_ascii_lowercase()
      .replace('-', "_");
    ViewFilter::ALL
      .into_iter()
      .find(|filter| filter.key() == key)
      .ok_or_else(|| {
        format!("unknown view: {s}")
      })
  }
}

/// The user-facing operations whose
/// failures get their own message.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Operation {
  Load,
  Create,
  Update,
  Delete,
  ToggleStatus
}

impl Operation {
  #[must_use]
  pub fn failure_message(
    self
  ) -> &'static str {
    match self {
      | Operation::Load => {
        "Failed to load data"
      }
      | Operation::Create => {
        "Failed to create task"
      }
      | Operation::Update => {
        "Failed to update task"
      }
      | Operation::Delete => {
        "Failed to delete task"
      }
      | Operation::ToggleStatus => {
        "Failed to update status"
      }
    }
  }

  fn closes_modal(self) -> bool {
    matches!(
      self,
      Operation::Create
        | Operation::Update
    )
  }
}

/// Tags one load cycle. Only the result of
/// the most recently started load is
/// applied.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
)]
pub struct LoadToken(u64);

impl LoadToken {
  #[must_use]
  pub fn value(self) -> u64 {
    self.0
  }
}

/// Hands out strictly increasing load
/// tokens.
#[derive(Debug, Default)]
pub struct LoadSequencer {
  last: u64
}

impl LoadSequencer {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  pub fn next(&mut self) -> LoadToken {
    self.last += 1;
    LoadToken(self.last)
  }
}

/// Everything one successful load cycle
/// produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
  pub tasks:      Vec<Task>,
  pub categories: Vec<Category>,
  pub tags:       Vec<Tag>,
  pub stats:      ProgressStats
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
  pub filter:            ViewFilter,
  pub tasks:             Vec<Task>,
  pub categories:        Vec<Category>,
  pub tags:              Vec<Tag>,
  pub stats:             Option<ProgressStats>,
  pub loading:           bool,
  pub error:             Option<String>,
  pub modal:             Option<TaskForm>,
  /// Bumped after each successful
  /// mutation; front ends reload when it
  /// changes.
  pub reload_generation: u64,
  pending_load:          Option<LoadToken>
}

impl Default for ViewState {
  fn default() -> Self {
    Self::new(ViewFilter::default())
  }
}

impl ViewState {
  /// Initial state: loading, nothing
  /// fetched yet.
  #[must_use]
  pub fn new(filter: ViewFilter) -> Self {
    Self {
      filter,
      tasks: Vec::new(),
      categories: Vec::new(),
      tags: Vec::new(),
      stats: None,
      loading: true,
      error: None,
      modal: None,
      reload_generation: 0,
      pending_load: None
    }
  }

  #[must_use]
  pub fn pending_load(
    &self
  ) -> Option<LoadToken> {
    self.pending_load
  }
}

#[derive(Debug)]
pub enum ViewAction {
  SelectFilter(ViewFilter),
  LoadStarted(LoadToken),
  LoadFinished {
    token:   LoadToken,
    outcome: Result<Snapshot, ApiError>
  },
  OpenCreate,
  OpenEdit(Task),
  CloseModal,
  EditForm(FormEdit),
  FormRejected(FormError),
  MutationSucceeded(Operation),
  OperationFailed {
    operation: Operation,
    error:     ApiError
  },
  DismissError
}

/// Applies one action. This is the single
/// place failures turn into the message
/// the user sees.
#[must_use]
pub fn reduce(
  mut state: ViewState,
  action: ViewAction
) -> ViewState {
  match action {
    | ViewAction::SelectFilter(filter) => {
      if state.filter != filter {
        info!(from = %state.filter, to = %filter, "switching view");
        state.filter = filter;
      }
    }
    | ViewAction::LoadStarted(token) => {
      debug!(
        token = token.value(),
        filter = %state.filter,
        "load started"
      );
      state.loading = true;
      state.error = None;
      state.pending_load = Some(token);
    }
    | ViewAction::LoadFinished {
      token,
      outcome
    } => {
      if state.pending_load != Some(token) {
        debug!(
          token = token.value(),
          latest = ?state.pending_load.map(LoadToken::value),
          "dropping stale load result"
        );
        return state;
      }
      state.pending_load = None;
      state.loading = false;
      match outcome {
        | Ok(snapshot) => {
          debug!(
            tasks = snapshot.tasks.len(),
            categories =
              snapshot.categories.len(),
            tags = snapshot.tags.len(),
            "load applied"
          );
          state.tasks = snapshot.tasks;
          state.categories =
            snapshot.categories;
          state.tags = snapshot.tags;
          state.stats = Some(snapshot.stats);
        }
        | Err(err) => {
          error!(error = %err, "load failed");
          state.error = Some(
            Operation::Load
              .failure_message()
              .to_string()
          );
        }
      }
    }
    | ViewAction::OpenCreate => {
      state.modal = Some(TaskForm::create());
    }
    | ViewAction::OpenEdit(task) => {
      state.modal =
        Some(TaskForm::edit(&task));
    }
    | ViewAction::CloseModal => {
      state.modal = None;
    }
    | ViewAction::EditForm(edit) => {
      if let Some(form) = state.modal.as_mut()
      {
        form.apply(edit);
      }
    }
    | ViewAction::FormRejected(err) => {
      if let Some(form) = state.modal.as_mut()
      {
        form.error = Some(err.to_string());
      }
    }
    | ViewAction::MutationSucceeded(
      operation
    ) => {
      info!(?operation, "mutation succeeded; reloading");
      if operation.closes_modal() {
        state.modal = None;
      }
      state.reload_generation += 1;
    }
    | ViewAction::OperationFailed {
      operation,
      error
    } => {
      error!(?operation, error = %error, "operation failed");
      state.error = Some(
        operation
          .failure_message()
          .to_string()
      );
    }
    | ViewAction::DismissError => {
      state.error = None;
    }
  }
  state
}
