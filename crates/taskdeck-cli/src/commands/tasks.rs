use std::io::Write;

use anyhow::{Context, anyhow};
use taskdeck_core::api::Transport;
use taskdeck_core::form::{FormEdit, FormError, FormSubmission, TaskForm};
use taskdeck_core::sync::{delete_task, submit_form, toggle_status};
use taskdeck_core::view::Operation;
use taskdeck_shared::{Progress, TaskListQuery, TaskUpdate};
use tracing::{info, instrument};

use super::Session;
use crate::cli::{TaskCommand, TaskFields};
use crate::dates::parse_date_arg;

impl<T, W, C> Session<T, W, C>
where
    T: Transport,
    W: Write,
    C: FnMut(&str) -> anyhow::Result<bool>,
{
    #[instrument(skip(self))]
    pub(super) async fn task(&mut self, cmd: TaskCommand) -> anyhow::Result<()> {
        match cmd {
            TaskCommand::List {
                status,
                priority,
                root_only,
            } => {
                let query = TaskListQuery {
                    status,
                    priority,
                    root_only,
                };
                let tasks = self
                    .client
                    .tasks()
                    .list(query)
                    .await
                    .context("failed to list tasks")?;
                self.renderer.task_table(&mut self.out, &tasks, self.now)
            }
            TaskCommand::Show { id } => {
                let task = self
                    .client
                    .tasks()
                    .get(id)
                    .await
                    .with_context(|| format!("failed to fetch task {id}"))?;
                self.renderer.task_info(&mut self.out, &task, self.now)
            }
            TaskCommand::Add {
                title,
                fields,
                parent,
            } => self.add_task(title, fields, parent).await,
            TaskCommand::Edit { id, title, fields } => self.edit_task(id, title, fields).await,
            TaskCommand::Delete { id, yes } => {
                let confirmation = self.confirmation(yes, &format!("Delete task {id}?"))?;
                let deleted = delete_task(&self.client, id, confirmation)
                    .await
                    .context(Operation::Delete.failure_message())?;
                if deleted {
                    self.say(format_args!("Deleted task {id}."))
                } else {
                    self.say("Cancelled.")
                }
            }
            TaskCommand::Toggle { id } => {
                let task = self
                    .client
                    .tasks()
                    .get(id)
                    .await
                    .with_context(|| format!("failed to fetch task {id}"))?;
                let updated = toggle_status(&self.client, &task)
                    .await
                    .context(Operation::ToggleStatus.failure_message())?;
                self.say(format_args!(
                    "Task {id}: {} -> {}",
                    task.status.label(),
                    updated.status.label()
                ))
            }
            TaskCommand::Subtasks { id } => {
                let tasks = self
                    .client
                    .tasks()
                    .subtasks(id)
                    .await
                    .with_context(|| format!("failed to list subtasks of task {id}"))?;
                self.renderer.task_table(&mut self.out, &tasks, self.now)
            }
            TaskCommand::Priority { id, value: None } => {
                let info = self
                    .client
                    .tasks()
                    .priority(id)
                    .await
                    .with_context(|| format!("failed to fetch priority of task {id}"))?;
                self.renderer.priority(&mut self.out, &info)
            }
            TaskCommand::Priority {
                id,
                value: Some(priority),
            } => {
                let task = self
                    .client
                    .tasks()
                    .set_priority(id, priority)
                    .await
                    .context(Operation::Update.failure_message())?;
                self.say(format_args!("Task {id} priority: {}", task.priority.label()))
            }
            TaskCommand::Deadline { id, clear: true, .. } => {
                self.client
                    .tasks()
                    .remove_deadline(id)
                    .await
                    .context(Operation::Update.failure_message())?;
                self.say(format_args!("Removed deadline from task {id}."))
            }
            TaskCommand::Deadline { id, date, .. } => {
                let raw = date.ok_or_else(|| anyhow!("a date or --clear is required"))?;
                let due = parse_date_arg(&raw, self.now)?;
                let task = self
                    .client
                    .tasks()
                    .set_deadline(id, due)
                    .await
                    .context(Operation::Update.failure_message())?;
                self.renderer.task_info(&mut self.out, &task, self.now)
            }
            TaskCommand::Overdue => {
                let tasks = self
                    .client
                    .tasks()
                    .overdue()
                    .await
                    .context("failed to list overdue tasks")?;
                self.renderer.task_table(&mut self.out, &tasks, self.now)
            }
            TaskCommand::Upcoming { days } => {
                let tasks = self
                    .client
                    .tasks()
                    .upcoming(days)
                    .await
                    .context("failed to list upcoming tasks")?;
                self.renderer.task_table(&mut self.out, &tasks, self.now)
            }
        }
    }

    async fn add_task(
        &mut self,
        title: String,
        fields: TaskFields,
        parent: Option<u64>,
    ) -> anyhow::Result<()> {
        let mut form = TaskForm::create();
        form.apply(FormEdit::Title(title));
        if let Some(description) = fields.description {
            form.apply(FormEdit::Description(description));
        }
        if let Some(priority) = fields.priority {
            form.apply(FormEdit::Priority(priority));
        }
        if let Some(status) = fields.status {
            form.apply(FormEdit::Status(status));
        }
        if let Some(progress) = fields.progress {
            form.apply(FormEdit::Progress(progress));
        }

        let FormSubmission::Create(mut create) = form.submit()? else {
            return Err(anyhow!("a new task form produced an update"));
        };
        if let Some(raw) = fields.due {
            create = create.due_date(parse_date_arg(&raw, self.now)?);
        }

        let task = match parent {
            Some(parent_id) => self
                .client
                .tasks()
                .add_subtask(parent_id, &create)
                .await
                .context(Operation::Create.failure_message())?,
            None => submit_form(&self.client, &FormSubmission::Create(create))
                .await
                .context(Operation::Create.failure_message())?,
        };
        info!(id = task.id, "created task");
        self.say(format_args!("Created task {}.", task.id))
    }

    async fn edit_task(
        &mut self,
        id: u64,
        title: Option<String>,
        fields: TaskFields,
    ) -> anyhow::Result<()> {
        let title = match title {
            Some(title) if title.trim().is_empty() => return Err(FormError::EmptyTitle.into()),
            Some(title) => Some(title.trim().to_string()),
            None => None,
        };
        let due_date = fields
            .due
            .map(|raw| parse_date_arg(&raw, self.now))
            .transpose()?;
        let update = TaskUpdate {
            title,
            description: fields.description,
            priority: fields.priority,
            due_date,
            status: fields.status,
            progress: fields.progress.map(Progress::new),
            parent_task_id: None,
        };
        if update.is_empty() {
            return Err(anyhow!("nothing to update; pass at least one field flag"));
        }

        let submission = FormSubmission::Update { id, update };
        let task = submit_form(&self.client, &submission)
            .await
            .context(Operation::Update.failure_message())?;
        self.renderer.task_info(&mut self.out, &task, self.now)
    }
}
