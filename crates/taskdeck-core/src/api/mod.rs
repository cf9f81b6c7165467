//! Data-access layer: one method per
//! backend endpoint, carried by a
//! pluggable [`Transport`].

mod categories;
mod client;
mod error;
mod progress;
mod reminders;
mod request;
mod tags;
mod tasks;
mod transport;

pub use categories::CategoriesApi;
pub use client::ApiClient;
pub use error::ApiError;
pub use progress::{
  DEFAULT_PROGRESS_INCREMENT,
  ProgressApi
};
pub use reminders::RemindersApi;
pub use request::{
  API_BASE_PATH,
  ApiRequest,
  ApiResponse,
  Method
};
pub use tags::TagsApi;
pub use tasks::{
  DEFAULT_UPCOMING_DAYS,
  TasksApi
};
pub use transport::Transport;
