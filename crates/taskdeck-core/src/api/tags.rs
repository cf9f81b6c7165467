use taskdeck_shared::{
  Tag,
  TagCreate,
  TagId,
  Task,
  TaskId
};

use super::client::ApiClient;
use super::error::ApiError;
use super::request::ApiRequest;
use super::transport::Transport;

pub struct TagsApi<'a, T> {
  client: &'a ApiClient<T>
}

impl<'a, T> TagsApi<'a, T>
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
  ) -> Result<Vec<Tag>, ApiError> {
    self
      .client
      .fetch(ApiRequest::get("/tags/"))
      .await
  }

  pub async fn get(
    self,
    id: TagId
  ) -> Result<Tag, ApiError> {
    self
      .client
      .fetch(ApiRequest::get(format!(
        "/tags/{id}"
      )))
      .await
  }

  pub async fn create(
    self,
    create: &TagCreate
  ) -> Result<Tag, ApiError> {
    let request =
      ApiRequest::post("/tags/")
        .json(create)?;
    self.client.fetch(request).await
  }

  /// Renames a tag; the backend takes the
  /// same body as create.
  pub async fn update(
    self,
    id: TagId,
    update: &TagCreate
  ) -> Result<Tag, ApiError> {
    let request =
      ApiRequest::put(format!(
        "/tags/{id}"
      ))
      .json(update)?;
    self.client.fetch(request).await
  }

  pub async fn delete(
    self,
    id: TagId
  ) -> Result<(), ApiError> {
    self
      .client
      .execute(ApiRequest::delete(
        format!("/tags/{id}")
      ))
      .await
  }

  pub async fn assign(
    self,
    tag_id: TagId,
    task_id: TaskId
  ) -> Result<(), ApiError> {
    self
      .client
      .execute(ApiRequest::post(format!(
        "/tags/{tag_id}/tasks/{task_id}"
      )))
      .await
  }

  pub async fn unassign(
    self,
    tag_id: TagId,
    task_id: TaskId
  ) -> Result<(), ApiError> {
    self
      .client
      .execute(ApiRequest::delete(
        format!(
          "/tags/{tag_id}/tasks/{task_id}"
        )
      ))
      .await
  }

  pub async fn tasks(
    self,
    tag_id: TagId
  ) -> Result<Vec<Task>, ApiError> {
    self
      .client
      .fetch(ApiRequest::get(format!(
        "/tags/{tag_id}/tasks"
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
  async fn assignment_is_keyed_by_both_ids()
  {
    let client = ApiClient::new(
      RecordingTransport::replying([
        (200, r#"{"message":"assigned"}"#),
        (200, r#"{"message":"unassigned"}"#)
      ])
    );

    client
      .tags()
      .assign(2, 7)
      .await
      .expect("assign");
    let request =
      client.transport().last();
    assert_eq!(
      request.method,
      Method::Post
    );
    assert_eq!(
      request.path,
      "/tags/2/tasks/7"
    );
    assert!(request.body.is_none());

    client
      .tags()
      .unassign(2, 7)
      .await
      .expect("unassign");
    let request =
      client.transport().last();
    assert_eq!(
      request.method,
      Method::Delete
    );
    assert_eq!(
      request.path,
      "/tags/2/tasks/7"
    );
  }

  #[tokio::test]
  async fn create_and_rename_send_name() {
    let client = ApiClient::new(
      RecordingTransport::replying([
        (201, r#"{"id":2,"name":"urgent"}"#),
        (200, r#"{"id":2,"name":"later"}"#)
      ])
    );

    let tag = client
      .tags()
      .create(&TagCreate {
        name: "urgent".to_string()
      })
      .await
      .expect("create");
    assert_eq!(tag.id, 2);
    let request =
      client.transport().last();
    assert_eq!(
      request.method,
      Method::Post
    );
    assert_eq!(request.path, "/tags/");

    let tag = client
      .tags()
      .update(2, &TagCreate {
        name: "later".to_string()
      })
      .await
      .expect("rename");
    assert_eq!(tag.name, "later");
    let request =
      client.transport().last();
    assert_eq!(request.method, Method::Put);
    assert_eq!(request.path, "/tags/2");
    assert_eq!(
      request.body.as_deref(),
      Some(r#"{"name":"later"}"#)
    );
  }

  #[tokio::test]
  async fn delete_and_tasks_hit_tag_paths() {
    let client = ApiClient::new(
      RecordingTransport::replying([
        (200, r#"{"message":"deleted"}"#),
        (200, "[]")
      ])
    );

    client
      .tags()
      .delete(2)
      .await
      .expect("delete");
    let request =
      client.transport().last();
    assert_eq!(
      request.method,
      Method::Delete
    );
    assert_eq!(request.path, "/tags/2");

    let tasks = client
      .tags()
      .tasks(2)
      .await
      .expect("tasks");
    assert!(tasks.is_empty());
    let request =
      client.transport().last();
    assert_eq!(request.method, Method::Get);
    assert_eq!(
      request.path,
      "/tags/2/tasks"
    );
  }
}
