use taskdeck_shared::{
  Category,
  CategoryCreate,
  CategoryId,
  CategoryUpdate,
  Task,
  TaskId
};

use super::client::ApiClient;
use super::error::ApiError;
use super::request::ApiRequest;
use super::transport::Transport;

pub struct CategoriesApi<'a, T> {
  client: &'a ApiClient<T>
}

impl<'a, T> CategoriesApi<'a, T>
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
  ) -> Result<Vec<Category>, ApiError> {
    self
      .client
      .fetch(ApiRequest::get(
        "/categories/"
      ))
      .await
  }

  pub async fn get(
    self,
    id: CategoryId
  ) -> Result<Category, ApiError> {
    self
      .client
      .fetch(ApiRequest::get(format!(
        "/categories/{id}"
      )))
      .await
  }

  pub async fn create(
    self,
    create: &CategoryCreate
  ) -> Result<Category, ApiError> {
    let request =
      ApiRequest::post("/categories/")
        .json(create)?;
    self.client.fetch(request).await
  }

  pub async fn update(
    self,
    id: CategoryId,
    update: &CategoryUpdate
  ) -> Result<Category, ApiError> {
    let request =
      ApiRequest::put(format!(
        "/categories/{id}"
      ))
      .json(update)?;
    self.client.fetch(request).await
  }

  pub async fn delete(
    self,
    id: CategoryId
  ) -> Result<(), ApiError> {
    self
      .client
      .execute(ApiRequest::delete(
        format!("/categories/{id}")
      ))
      .await
  }

  pub async fn assign(
    self,
    category_id: CategoryId,
    task_id: TaskId
  ) -> Result<(), ApiError> {
    self
      .client
      .execute(ApiRequest::post(format!(
        "/categories/{category_id}/tasks/{task_id}"
      )))
      .await
  }

  pub async fn unassign(
    self,
    category_id: CategoryId,
    task_id: TaskId
  ) -> Result<(), ApiError> {
    self
      .client
      .execute(ApiRequest::delete(
        format!(
          "/categories/{category_id}/tasks/{task_id}"
        )
      ))
      .await
  }

  pub async fn tasks(
    self,
    category_id: CategoryId
  ) -> Result<Vec<Task>, ApiError> {
    self
      .client
      .fetch(ApiRequest::get(format!(
        "/categories/{category_id}/tasks"
      )))
      .await
  }
}
