use gloo::net::http::{
  Request,
  RequestBuilder
};
use taskdeck_core::api::{
  ApiError,
  ApiRequest,
  ApiResponse,
  Method,
  Transport
};
use web_sys::AbortSignal;

/// Sends backend requests through the
/// browser's `fetch`, against the page's
/// own origin.
#[derive(Debug, Clone, Default)]
pub struct FetchTransport {
  signal: Option<AbortSignal>
}

impl FetchTransport {
  /// Ties every request to `signal`, so a
  /// superseded load can be cancelled.
  #[must_use]
  pub fn with_signal(
    signal: Option<AbortSignal>
  ) -> Self {
    Self { signal }
  }
}

fn builder(
  method: Method,
  url: &str
) -> RequestBuilder {
  match method {
    | Method::Get => Request::get(url),
    | Method::Post => Request::post(url),
    | Method::Put => Request::put(url),
    | Method::Delete => {
      Request::delete(url)
    }
  }
}

fn is_abort(error: &gloo::net::Error) -> bool {
  matches!(
    error,
    gloo::net::Error::JsError(js)
      if js.name == "AbortError"
  )
}

impl Transport for FetchTransport {
  async fn send(
    &self,
    request: ApiRequest
  ) -> Result<ApiResponse, ApiError> {
    let url = request.url("");
    let builder =
      builder(request.method, &url)
        .header(
          "Accept",
          "application/json"
        )
        .abort_signal(self.signal.as_ref());

    let prepared = match request.body {
      | Some(body) => builder
        .header(
          "Content-Type",
          "application/json"
        )
        .body(body),
      | None => builder.build()
    }
    .map_err(|error| {
      ApiError::Transport(error.to_string())
    })?;

    let response =
      prepared.send().await.map_err(
        |error| {
          if is_abort(&error) {
            ApiError::Aborted
          } else {
            tracing::warn!(url = %url, error = %error, "fetch failed");
            ApiError::Transport(
              error.to_string()
            )
          }
        }
      )?;

    let status = response.status();
    let body =
      response.text().await.map_err(
        |error| {
          if is_abort(&error) {
            ApiError::Aborted
          } else {
            ApiError::Transport(
              error.to_string()
            )
          }
        }
      )?;
    Ok(ApiResponse::new(status, body))
  }
}
