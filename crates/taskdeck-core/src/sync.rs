//! Async glue between the view state and
//! the backend: the 4-way load and the
//! mutations the dashboard triggers.

use futures::try_join;
use taskdeck_shared::{
  Task,
  TaskId,
  TaskUpdate
};
use tracing::{
  debug,
  info
};

use crate::api::{
  ApiClient,
  ApiError,
  Transport
};
use crate::form::FormSubmission;
use crate::status::next_status;
use crate::view::{
  Snapshot,
  TaskSource,
  ViewFilter
};

/// Tasks for the current filter.
pub async fn fetch_tasks<T>(
  client: &ApiClient<T>,
  filter: ViewFilter
) -> Result<Vec<Task>, ApiError>
where
  T: Transport
{
  match filter.task_source() {
    | TaskSource::List(query) => {
      client.tasks().list(query).await
    }
    | TaskSource::Overdue => {
      client.tasks().overdue().await
    }
    | TaskSource::Upcoming { days } => {
      client.tasks().upcoming(days).await
    }
  }
}

/// Fetches tasks, categories, tags and
/// stats concurrently. Any single failure
/// fails the whole load so nothing partial
/// is ever applied.
#[tracing::instrument(skip(client))]
pub async fn load_snapshot<T>(
  client: &ApiClient<T>,
  filter: ViewFilter
) -> Result<Snapshot, ApiError>
where
  T: Transport
{
  let (tasks, categories, tags, stats) = try_join!(
    fetch_tasks(client, filter),
    client.categories().list(),
    client.tags().list(),
    client.progress().stats(None)
  )?;
  debug!(
    tasks = tasks.len(),
    categories = categories.len(),
    tags = tags.len(),
    "snapshot fetched"
  );
  Ok(Snapshot {
    tasks,
    categories,
    tags,
    stats
  })
}

/// Sends a validated form to the backend.
pub async fn submit_form<T>(
  client: &ApiClient<T>,
  submission: &FormSubmission
) -> Result<Task, ApiError>
where
  T: Transport
{
  match submission {
    | FormSubmission::Create(create) => {
      let task =
        client.tasks().create(create).await?;
      info!(id = task.id, title = %task.title, "task created");
      Ok(task)
    }
    | FormSubmission::Update { id, update } => {
      let task = client
        .tasks()
        .update(*id, update)
        .await?;
      info!(id = task.id, "task updated");
      Ok(task)
    }
  }
}

/// Moves a task one step along the status
/// cycle. Only the status is sent.
pub async fn toggle_status<T>(
  client: &ApiClient<T>,
  task: &Task
) -> Result<Task, ApiError>
where
  T: Transport
{
  let next = next_status(task.status);
  info!(
    id = task.id,
    from = %task.status,
    to = %next,
    "toggling status"
  );
  client
    .tasks()
    .update(task.id, &TaskUpdate::status(next))
    .await
}

/// Outcome of asking the user before a
/// destructive action.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Confirmation {
  Confirmed,
  Declined
}

impl Confirmation {
  #[must_use]
  pub fn is_confirmed(self) -> bool {
    self == Confirmation::Confirmed
  }
}

impl From<bool> for Confirmation {
  fn from(confirmed: bool) -> Self {
    if confirmed {
      Confirmation::Confirmed
    } else {
      Confirmation::Declined
    }
  }
}

/// Deletes a task once confirmed. Returns
/// whether a request was made.
pub async fn delete_task<T>(
  client: &ApiClient<T>,
  id: TaskId,
  confirmation: Confirmation
) -> Result<bool, ApiError>
where
  T: Transport
{
  if confirmation == Confirmation::Declined {
    debug!(id, "delete declined");
    return Ok(false);
  }
  client.tasks().delete(id).await?;
  info!(id, "task deleted");
  Ok(true)
}
