//! Local state of the create/edit task
//! modal and its conversion into a
//! backend payload.

use taskdeck_shared::{
  Priority,
  Progress,
  Task,
  TaskCreate,
  TaskId,
  TaskStatus,
  TaskUpdate
};

#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
  Create,
  /// Holds the task as it was when the
  /// modal opened, so submit can send only
  /// what changed.
  Edit(Box<Task>)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
  pub mode:        FormMode,
  pub title:       String,
  pub description: String,
  pub priority:    Priority,
  pub status:      TaskStatus,
  pub progress:    Progress,
  pub error:       Option<String>
}

/// A single field change coming from the
/// form controls.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEdit {
  Title(String),
  Description(String),
  Priority(Priority),
  Status(TaskStatus),
  /// Raw slider value; clamped on apply.
  Progress(i64)
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  thiserror::Error,
)]
pub enum FormError {
  #[error("Title is required")]
  EmptyTitle
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormSubmission {
  Create(TaskCreate),
  Update {
    id:     TaskId,
    update: TaskUpdate
  }
}

impl TaskForm {
  #[must_use]
  pub fn create() -> Self {
    Self {
      mode:        FormMode::Create,
      title:       String::new(),
      description: String::new(),
      priority:    Priority::MEDIUM,
      status:      TaskStatus::Pending,
      progress:    Progress::MIN,
      error:       None
    }
  }

  #[must_use]
  pub fn edit(task: &Task) -> Self {
    Self {
      mode:        FormMode::Edit(
        Box::new(task.clone())
      ),
      title:       task.title.clone(),
      description: task
        .description
        .clone()
        .unwrap_or_default(),
      priority:    task.priority,
      status:      task.status,
      progress:    task.progress,
      error:       None
    }
  }

  #[must_use]
  pub fn is_edit(&self) -> bool {
    matches!(self.mode, FormMode::Edit(_))
  }

  #[must_use]
  pub fn editing_id(&self) -> Option<TaskId> {
    match &self.mode {
      | FormMode::Edit(task) => Some(task.id),
      | FormMode::Create => None
    }
  }

  pub fn apply(&mut self, edit: FormEdit) {
    match edit {
      | FormEdit::Title(title) => {
        self.title = title;
      }
      | FormEdit::Description(text) => {
        self.description = text;
      }
      | FormEdit::Priority(priority) => {
        self.priority = priority;
      }
      | FormEdit::Status(status) => {
        self.status = status;
      }
      | FormEdit::Progress(raw) => {
        self.progress = Progress::new(raw);
      }
    }
    self.error = None;
  }

  /// Validates the form and builds the
  /// create or update payload.
  pub fn submit(
    &self
  ) -> Result<FormSubmission, FormError> {
    let title = self.title.trim();
    if title.is_empty() {
      return Err(FormError::EmptyTitle);
    }
    let description =
      self.description.trim();

    match &self.mode {
      | FormMode::Create => {
        let mut create =
          TaskCreate::new(title)
            .priority(self.priority)
            .status(self.status)
            .progress(self.progress);
        if !description.is_empty() {
          create =
            create.description(description);
        }
        Ok(FormSubmission::Create(create))
      }
      | FormMode::Edit(original) => {
        let mut update =
          TaskUpdate::default();
        if title != original.title {
          update.title =
            Some(title.to_string());
        }
        if Some(description)
          != original.description.as_deref()
          && !(description.is_empty()
            && original.description.is_none())
        {
          update.description =
            Some(description.to_string());
        }
        if self.priority != original.priority
        {
          update.priority =
            Some(self.priority);
        }
        if self.status != original.status {
          update.status = Some(self.status);
        }
        if self.progress != original.progress
        {
          update.progress =
            Some(self.progress);
        }
        Ok(FormSubmission::Update {
          id: original.id,
          update
        })
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::{
    TimeZone,
    Utc
  };
  use pretty_assertions::assert_eq;

  use super::*;

  fn existing() -> Task {
    let at = Utc
      .with_ymd_and_hms(
        2026, 10, 1, 8, 0, 0
      )
      .single()
      .expect("valid datetime");
    Task {
      id:             12,
      title:          "Write report"
        .to_string(),
      description:    Some(
        "Q3 numbers".to_string()
      ),
      priority:       Priority::HIGH,
      due_date:       None,
      status:         TaskStatus::InProgress,
      progress:       Progress::new(40),
      parent_task_id: None,
      created_at:     at,
      updated_at:     at
    }
  }

  #[test]
  fn blank_title_is_rejected() {
    let mut form = TaskForm::create();
    form.apply(FormEdit::Title(
      "   ".to_string()
    ));
    assert_eq!(
      form.submit(),
      Err(FormError::EmptyTitle)
    );
  }

  #[test]
  fn create_carries_form_values() {
    let mut form = TaskForm::create();
    form.apply(FormEdit::Title(
      "  Buy milk ".to_string()
    ));
    form.apply(FormEdit::Priority(
      Priority::HIGH
    ));

    let Ok(FormSubmission::Create(create)) =
      form.submit()
    else {
      panic!("expected create submission");
    };
    assert_eq!(create.title, "Buy milk");
    assert_eq!(
      create.priority,
      Some(Priority::HIGH)
    );
    assert_eq!(
      create.status,
      Some(TaskStatus::Pending)
    );
    assert_eq!(
      create.progress,
      Some(Progress::MIN)
    );
    assert_eq!(create.description, None);
  }

  #[test]
  fn slider_values_are_clamped() {
    let mut form = TaskForm::create();
    for raw in [-20, 0, 37, 100, 180] {
      form.apply(FormEdit::Progress(raw));
      assert!(form.progress.value() <= 100);
    }
    form.apply(FormEdit::Progress(37));
    assert_eq!(form.progress, Progress::new(37));
    form.apply(FormEdit::Progress(180));
    assert_eq!(form.progress, Progress::MAX);
    form.apply(FormEdit::Progress(-20));
    assert_eq!(form.progress, Progress::MIN);
  }

  #[test]
  fn edit_sends_only_changed_fields() {
    let task = existing();
    let mut form = TaskForm::edit(&task);
    assert_eq!(form.editing_id(), Some(12));
    form.apply(FormEdit::Progress(75));

    assert_eq!(
      form.submit(),
      Ok(FormSubmission::Update {
        id:     12,
        update: TaskUpdate {
          progress: Some(Progress::new(75)),
          ..TaskUpdate::default()
        }
      })
    );
  }

  #[test]
  fn clearing_description_sends_empty_string()
  {
    let task = existing();
    let mut form = TaskForm::edit(&task);
    form.apply(FormEdit::Description(
      String::new()
    ));

    let Ok(FormSubmission::Update {
      update,
      ..
    }) = form.submit()
    else {
      panic!("expected update submission");
    };
    assert_eq!(
      update.description,
      Some(String::new())
    );
  }

  #[test]
  fn untouched_odd_progress_is_not_resent() {
    let mut task = existing();
    task.progress = Progress::new(37);
    let mut form = TaskForm::edit(&task);
    form.apply(FormEdit::Progress(37));

    assert_eq!(
      form.submit(),
      Ok(FormSubmission::Update {
        id:     12,
        update: TaskUpdate::default()
      })
    );
  }

  #[test]
  fn editing_clears_previous_error() {
    let mut form = TaskForm::create();
    form.error =
      Some("Title is required".to_string());
    form.apply(FormEdit::Title(
      "x".to_string()
    ));
    assert_eq!(form.error, None);
  }
}
