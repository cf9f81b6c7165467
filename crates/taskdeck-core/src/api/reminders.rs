use taskdeck_shared::{
  Reminder,
  ReminderCreate,
  ReminderId,
  ReminderUpdate,
  TaskId
};

use super::client::ApiClient;
use super::error::ApiError;
use super::request::ApiRequest;
use super::transport::Transport;

pub struct RemindersApi<'a, T> {
  client: &'a ApiClient<T>
}

impl<'a, T> RemindersApi<'a, T>
where
  T: Transport
{
  pub(crate) fn new(
    client: &'a ApiClient<T>
  ) -> Self {
    Self { client }
  }

  pub async fn list(
    self
  ) -> Result<Vec<Reminder>, ApiError> {
    self
      .client
      .fetch(ApiRequest::get(
        "/reminders/"
      ))
      .await
  }

  pub async fn get(
    self,
    id: ReminderId
  ) -> Result<Reminder, ApiError> {
    self
      .client
      .fetch(ApiRequest::get(format!(
        "/reminders/{id}"
      )))
      .await
  }

  pub async fn create(
    self,
    create: &ReminderCreate
  ) -> Result<Reminder, ApiError> {
    let request =
      ApiRequest::post("/reminders/")
        .json(create)?;
    self.client.fetch(request).await
  }

  pub async fn update(
    self,
    id: ReminderId,
    update: &ReminderUpdate
  ) -> Result<Reminder, ApiError> {
    let request =
      ApiRequest::put(format!(
        "/reminders/{id}"
      ))
      .json(update)?;
    self.client.fetch(request).await
  }

  pub async fn delete(
    self,
    id: ReminderId
  ) -> Result<(), ApiError> {
    self
      .client
      .execute(ApiRequest::delete(
        format!("/reminders/{id}")
      ))
      .await
  }

  /// Reminders not yet marked notified.
  pub async fn pending(
    self
  ) -> Result<Vec<Reminder>, ApiError> {
    self
      .client
      .fetch(ApiRequest::get(
        "/reminders/pending"
      ))
      .await
  }

  pub async fn mark_notified(
    self,
    id: ReminderId
  ) -> Result<(), ApiError> {
    self
      .client
      .execute(ApiRequest::post(format!(
        "/reminders/{id}/notify"
      )))
      .await
  }

  pub async fn for_task(
    self,
    task_id: TaskId
  ) -> Result<Vec<Reminder>, ApiError> {
    self
      .client
      .fetch(ApiRequest::get(format!(
        "/reminders/task/{task_id}"
      )))
      .await
  }
}

#[cfg(test)]
mod tests {
  use super::super::client::testing::RecordingTransport;
  use super::super::request::Method;
  use super::*;

  #[tokio::test]
  async fn notify_and_by_task_paths() {
    let client = ApiClient::new(
      RecordingTransport::replying([
        (200, r#"{"message":"ok"}"#),
        (
          200,
          r#"[{"id":1,"task_id":8,"remind_at":"2026-10-18T08:00:00","is_notified":false}]"#
        )
      ])
    );

    client
      .reminders()
      .mark_notified(1)
      .await
      .expect("notify");
    let request =
      client.transport().last();
    assert_eq!(
      request.method,
      Method::Post
    );
    assert_eq!(
      request.path,
      "/reminders/1/notify"
    );

    let reminders = client
      .reminders()
      .for_task(8)
      .await
      .expect("by task");
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].task_id, 8);
    assert_eq!(
      client.transport().last().path,
      "/reminders/task/8"
    );
  }

  #[tokio::test]
  async fn update_only_sends_notified_flag()
  {
    let client = ApiClient::new(
      RecordingTransport::replying([(
        200,
        r#"{"id":1,"task_id":8,"remind_at":"2026-10-18T08:00:00","is_notified":true}"#
      )])
    );

    let reminder = client
      .reminders()
      .update(1, &ReminderUpdate {
        remind_at:   None,
        is_notified: Some(true)
      })
      .await
      .expect("update");
    assert!(reminder.is_notified);
    assert_eq!(
      client
        .transport()
        .last()
        .body
        .as_deref(),
      Some(r#"{"is_notified":true}"#)
    );
  }
}
