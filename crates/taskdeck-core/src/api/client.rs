use serde::de::DeserializeOwned;
use tracing::{
  debug,
  warn
};

use super::categories::CategoriesApi;
use super::error::ApiError;
use super::progress::ProgressApi;
use super::reminders::RemindersApi;
use super::request::ApiRequest;
use super::tags::TagsApi;
use super::tasks::TasksApi;
use super::transport::Transport;

/// Typed access to the backend. One
/// resource handle per family; every
/// handle method performs exactly one
/// request.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
  transport: T
}

impl<T> ApiClient<T>
where
  T: Transport
{
  pub fn new(transport: T) -> Self {
    Self { transport }
  }

  pub fn transport(&self) -> &T {
    &self.transport
  }

  pub fn tasks(&self) -> TasksApi<'_, T> {
    TasksApi::new(self)
  }

  pub fn categories(
    &self
  ) -> CategoriesApi<'_, T> {
    CategoriesApi::new(self)
  }

  pub fn tags(&self) -> TagsApi<'_, T> {
    TagsApi::new(self)
  }

  pub fn reminders(
    &self
  ) -> RemindersApi<'_, T> {
    RemindersApi::new(self)
  }

  pub fn progress(
    &self
  ) -> ProgressApi<'_, T> {
    ProgressApi::new(self)
  }

  async fn send(
    &self,
    request: ApiRequest
  ) -> Result<String, ApiError> {
    let method = request.method;
    let path = request.path.clone();
    debug!(%method, path = %path, query = ?request.query, "sending backend request");

    let response =
      self.transport.send(request).await?;

    if !response.is_success() {
      let detail = response.detail();
      warn!(
        %method,
        path = %path,
        status = response.status,
        detail = %detail,
        "backend rejected request"
      );
      return Err(ApiError::Status {
        status: response.status,
        detail
      });
    }

    debug!(
      %method,
      path = %path,
      status = response.status,
      bytes = response.body.len(),
      "backend request succeeded"
    );
    Ok(response.body)
  }

  pub(crate) async fn fetch<R>(
    &self,
    request: ApiRequest
  ) -> Result<R, ApiError>
  where
    R: DeserializeOwned
  {
    let body = self.send(request).await?;
    serde_json::from_str(&body)
      .map_err(ApiError::Decode)
  }

  /// For endpoints whose response body
  /// carries nothing the caller needs.
  pub(crate) async fn execute(
    &self,
    request: ApiRequest
  ) -> Result<(), ApiError> {
    self.send(request).await.map(|_| ())
  }
}

#[cfg(test)]
pub(crate) mod testing {
  use std::cell::RefCell;
  use std::collections::VecDeque;

  use super::super::error::ApiError;
  use super::super::request::{
    ApiRequest,
    ApiResponse
  };
  use super::super::transport::Transport;

  /// Records requests and replays canned
  /// responses in order.
  #[derive(Default)]
  pub struct RecordingTransport {
    pub requests:
      RefCell<Vec<ApiRequest>>,
    responses:
      RefCell<VecDeque<ApiResponse>>
  }

  impl RecordingTransport {
    pub fn replying(
      responses: impl IntoIterator<
        Item = (u16, &'static str)
      >
    ) -> Self {
      Self {
        requests:  RefCell::new(Vec::new()),
        responses: RefCell::new(
          responses
            .into_iter()
            .map(|(status, body)| {
              ApiResponse::new(status, body)
            })
            .collect()
        )
      }
    }

    pub fn last(&self) -> ApiRequest {
      self
        .requests
        .borrow()
        .last()
        .cloned()
        .expect("a request was sent")
    }
  }

  impl Transport for RecordingTransport {
    async fn send(
      &self,
      request: ApiRequest
    ) -> Result<ApiResponse, ApiError>
    {
      self
        .requests
        .borrow_mut()
        .push(request);
      self
        .responses
        .borrow_mut()
        .pop_front()
        .ok_or_else(|| {
          ApiError::Transport(
            "no canned response".to_string()
          )
        })
    }
  }
}
