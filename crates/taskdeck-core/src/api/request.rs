use std::fmt;

use percent_encoding::{
  NON_ALPHANUMERIC,
  utf8_percent_encode
};
use serde::{
  Deserialize,
  Serialize
};

use super::error::ApiError;

/// Every path handed to a transport is
/// relative to this prefix.
pub const API_BASE_PATH: &str = "/api/v1";

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum Method {
  Get,
  Post,
  Put,
  Delete
}

impl Method {
  #[must_use]
  pub fn as_str(self) -> &'static str {
    match self {
      | Method::Get => "GET",
      | Method::Post => "POST",
      | Method::Put => "PUT",
      | Method::Delete => "DELETE"
    }
  }
}

impl fmt::Display for Method {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// One HTTP call against the backend,
/// independent of how it is carried.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
  pub method: Method,
  pub path:   String,
  pub query:  Vec<(&'static str, String)>,
  pub body:   Option<String>
}

impl ApiRequest {
  pub fn new(
    method: Method,
    path: impl Into<String>
  ) -> Self {
    Self {
      method,
      path: path.into(),
      query: Vec::new(),
      body: None
    }
  }

  pub fn get(
    path: impl Into<String>
  ) -> Self {
    Self::new(Method::Get, path)
  }

  pub fn post(
    path: impl Into<String>
  ) -> Self {
    Self::new(Method::Post, path)
  }

  pub fn put(
    path: impl Into<String>
  ) -> Self {
    Self::new(Method::Put, path)
  }

  pub fn delete(
    path: impl Into<String>
  ) -> Self {
    Self::new(Method::Delete, path)
  }

  #[must_use]
  pub fn query(
    mut self,
    key: &'static str,
    value: impl ToString
  ) -> Self {
    self
      .query
      .push((key, value.to_string()));
    self
  }

  pub fn json<B>(
    mut self,
    body: &B
  ) -> Result<Self, ApiError>
  where
    B: Serialize + ?Sized
  {
    let encoded =
      serde_json::to_string(body)
        .map_err(ApiError::Encode)?;
    self.body = Some(encoded);
    Ok(self)
  }

  #[must_use]
  pub fn query_string(&self) -> String {
    self
      .query
      .iter()
      .map(|(key, value)| {
        format!(
          "{key}={}",
          utf8_percent_encode(
            value,
            NON_ALPHANUMERIC
          )
        )
      })
      .collect::<Vec<_>>()
      .join("&")
  }

  /// Full URL for this request. `origin`
  /// may be empty for same-origin
  /// relative URLs.
  #[must_use]
  pub fn url(
    &self,
    origin: &str
  ) -> String {
    let origin =
      origin.trim_end_matches('/');
    let query = self.query_string();
    if query.is_empty() {
      format!(
        "{origin}{API_BASE_PATH}{}",
        self.path
      )
    } else {
      format!(
        "{origin}{API_BASE_PATH}{}?{query}",
        self.path
      )
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
  pub status: u16,
  pub body:   String
}

#[derive(Deserialize)]
struct ErrorBody {
  detail: serde_json::Value
}

impl ApiResponse {
  pub fn new(
    status: u16,
    body: impl Into<String>
  ) -> Self {
    Self {
      status,
      body: body.into()
    }
  }

  #[must_use]
  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }

  /// Human-readable failure detail: the
  /// backend's `detail` field when the body
  /// carries one, the raw body otherwise.
  #[must_use]
  pub fn detail(&self) -> String {
    match serde_json::from_str::<ErrorBody>(
      &self.body
    ) {
      | Ok(ErrorBody {
        detail: serde_json::Value::String(text)
      }) => text,
      | Ok(ErrorBody { detail }) => {
        detail.to_string()
      }
      | Err(_) => {
        self.body.trim().to_string()
      }
    }
  }
}
