/// Failure of a single backend call.
///
/// The data-access layer never retries or
/// interprets these; callers decide what
/// to show.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
  #[error("request failed: {0}")]
  Transport(String),

  #[error(
    "backend returned HTTP {status}: \
     {detail}"
  )]
  Status { status: u16, detail: String },

  #[error(
    "failed to encode request body: {0}"
  )]
  Encode(#[source] serde_json::Error),

  #[error(
    "failed to decode response body: {0}"
  )]
  Decode(#[source] serde_json::Error),

  #[error("request was aborted")]
  Aborted
}

impl ApiError {
  /// HTTP status of a non-2xx response.
  #[must_use]
  pub fn status(&self) -> Option<u16> {
    match self {
      | ApiError::Status {
        status,
        ..
      } => Some(*status),
      | _ => None
    }
  }
}
