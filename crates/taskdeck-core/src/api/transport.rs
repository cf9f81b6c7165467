use std::future::Future;
use std::rc::Rc;

use super::error::ApiError;
use super::request::{
  ApiRequest,
  ApiResponse
};

/// Carries one request to the backend and
/// hands back the raw response.
///
/// Implementations report transport
/// failures only. Non-2xx responses come
/// back as `Ok` and are judged by
/// [`ApiClient`](super::ApiClient).
pub trait Transport {
  fn send(
    &self,
    request: ApiRequest
  ) -> impl Future<
    Output = Result<ApiResponse, ApiError>
  >;
}

impl<T> Transport for &T
where
  T: Transport
{
  fn send(
    &self,
    request: ApiRequest
  ) -> impl Future<
    Output = Result<ApiResponse, ApiError>
  > {
    (**self).send(request)
  }
}

impl<T> Transport for Rc<T>
where
  T: Transport
{
  fn send(
    &self,
    request: ApiRequest
  ) -> impl Future<
    Output = Result<ApiResponse, ApiError>
  > {
    (**self).send(request)
  }
}
