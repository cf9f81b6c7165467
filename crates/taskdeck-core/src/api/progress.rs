use taskdeck_shared::{
  Progress,
  ProgressStats,
  ProgressUpdate,
  ProgressValue,
  Task,
  TaskId,
  TaskStatus
};

use super::client::ApiClient;
use super::error::ApiError;
use super::request::ApiRequest;
use super::transport::Transport;

pub const DEFAULT_PROGRESS_INCREMENT: i32 =
  10;

pub struct ProgressApi<'a, T> {
  client: &'a ApiClient<T>
}

impl<'a, T> ProgressApi<'a, T>
where
  T: Transport
{
  pub(crate) fn new(
    client: &'a ApiClient<T>
  ) -> Self {
    Self { client }
  }

  pub async fn set(
    self,
    task_id: TaskId,
    progress: Progress
  ) -> Result<Task, ApiError> {
    let request =
      ApiRequest::put(format!(
        "/progress/tasks/{task_id}"
      ))
      .json(&ProgressUpdate { progress })?;
    self.client.fetch(request).await
  }

  pub async fn get(
    self,
    task_id: TaskId
  ) -> Result<Progress, ApiError> {
    let value: ProgressValue = self
      .client
      .fetch(ApiRequest::get(format!(
        "/progress/tasks/{task_id}"
      )))
      .await?;
    Ok(value.progress)
  }

  /// Bumps progress by `by`, or by
  /// [`DEFAULT_PROGRESS_INCREMENT`] when
  /// unset.
  pub async fn increment(
    self,
    task_id: TaskId,
    by: Option<i32>
  ) -> Result<Task, ApiError> {
    let by = by.unwrap_or(
      DEFAULT_PROGRESS_INCREMENT
    );
    self
      .client
      .fetch(
        ApiRequest::post(format!(
          "/progress/tasks/{task_id}/increment"
        ))
        .query("increment", by)
      )
      .await
  }

  pub async fn in_range(
    self,
    min: Progress,
    max: Progress
  ) -> Result<Vec<Task>, ApiError> {
    self
      .client
      .fetch(
        ApiRequest::get(
          "/progress/tasks/range/list"
        )
        .query("min_progress", min.value())
        .query("max_progress", max.value())
      )
      .await
  }

  pub async fn stats(
    self,
    status: Option<TaskStatus>
  ) -> Result<ProgressStats, ApiError> {
    let mut request =
      ApiRequest::get("/progress/stats");
    if let Some(status) = status {
      request =
        request.query("status", status);
    }
    self.client.fetch(request).await
  }
}
