use chrono::{
  DateTime,
  Utc
};
use taskdeck_shared::{
  DeadlineUpdate,
  Priority,
  PriorityInfo,
  PriorityUpdate,
  Task,
  TaskCreate,
  TaskId,
  TaskListQuery,
  TaskUpdate
};

use super::client::ApiClient;
use super::error::ApiError;
use super::request::ApiRequest;
use super::transport::Transport;

pub const DEFAULT_UPCOMING_DAYS: u32 = 7;

pub struct TasksApi<'a, T> {
  client: &'a ApiClient<T>
}

impl<'a, T> TasksApi<'a, T>
where
  T: Transport
{
  pub(crate) fn new(
    client: &'a ApiClient<T>
  ) -> Self {
    Self { client }
  }

  /// Tasks in backend order. Unset filter
  /// fields are left out of the query.
  pub async fn list(
    self,
    query: TaskListQuery
  ) -> Result<Vec<Task>, ApiError> {
    let mut request =
      ApiRequest::get("/tasks/");
    if let Some(status) = query.status {
      request =
        request.query("status", status);
    }
    if let Some(priority) = query.priority
    {
      request = request
        .query("priority", priority);
    }
    if query.root_only {
      request =
        request.query("root_only", true);
    }
    self.client.fetch(request).await
  }

  pub async fn get(
    self,
    id: TaskId
  ) -> Result<Task, ApiError> {
    self
      .client
      .fetch(ApiRequest::get(format!(
        "/tasks/{id}"
      )))
      .await
  }

  pub async fn create(
    self,
    create: &TaskCreate
  ) -> Result<Task, ApiError> {
    let request =
      ApiRequest::post("/tasks/")
        .json(create)?;
    self.client.fetch(request).await
  }

  pub async fn update(
    self,
    id: TaskId,
    update: &TaskUpdate
  ) -> Result<Task, ApiError> {
    let request =
      ApiRequest::put(format!(
        "/tasks/{id}"
      ))
      .json(update)?;
    self.client.fetch(request).await
  }

  pub async fn delete(
    self,
    id: TaskId
  ) -> Result<(), ApiError> {
    self
      .client
      .execute(ApiRequest::delete(
        format!("/tasks/{id}")
      ))
      .await
  }

  pub async fn subtasks(
    self,
    parent_id: TaskId
  ) -> Result<Vec<Task>, ApiError> {
    self
      .client
      .fetch(ApiRequest::get(format!(
        "/tasks/{parent_id}/subtasks"
      )))
      .await
  }

  pub async fn add_subtask(
    self,
    parent_id: TaskId,
    create: &TaskCreate
  ) -> Result<Task, ApiError> {
    let request =
      ApiRequest::post(format!(
        "/tasks/{parent_id}/subtasks"
      ))
      .json(create)?;
    self.client.fetch(request).await
  }

  pub async fn set_priority(
    self,
    id: TaskId,
    priority: Priority
  ) -> Result<Task, ApiError> {
    let request =
      ApiRequest::put(format!(
        "/tasks/{id}/priority"
      ))
      .json(&PriorityUpdate { priority })?;
    self.client.fetch(request).await
  }

  pub async fn priority(
    self,
    id: TaskId
  ) -> Result<PriorityInfo, ApiError> {
    self
      .client
      .fetch(ApiRequest::get(format!(
        "/tasks/{id}/priority"
      )))
      .await
  }

  pub async fn set_deadline(
    self,
    id: TaskId,
    due_date: DateTime<Utc>
  ) -> Result<Task, ApiError> {
    let request =
      ApiRequest::put(format!(
        "/tasks/{id}/deadline"
      ))
      .json(&DeadlineUpdate { due_date })?;
    self.client.fetch(request).await
  }

  pub async fn remove_deadline(
    self,
    id: TaskId
  ) -> Result<(), ApiError> {
    self
      .client
      .execute(ApiRequest::delete(
        format!("/tasks/{id}/deadline")
      ))
      .await
  }

  pub async fn overdue(
    self
  ) -> Result<Vec<Task>, ApiError> {
    self
      .client
      .fetch(ApiRequest::get(
        "/tasks/overdue/list"
      ))
      .await
  }

  pub async fn upcoming(
    self,
    days: u32
  ) -> Result<Vec<Task>, ApiError> {
    self
      .client
      .fetch(
        ApiRequest::get(
          "/tasks/upcoming/list"
        )
        .query("days", days)
      )
      .await
  }
}
