//! Client-side core of the task
//! dashboard: the typed backend client,
//! the view reducer and the pieces both
//! front ends share.

pub mod api;
pub mod deadline;
pub mod form;
pub mod status;
pub mod sync;
pub mod view;

pub use api::{
  ApiClient,
  ApiError,
  Transport
};
pub use form::{
  FormEdit,
  FormError,
  FormSubmission,
  TaskForm
};
pub use sync::{
  Confirmation,
  delete_task,
  load_snapshot,
  submit_form,
  toggle_status
};
pub use view::{
  LoadSequencer,
  LoadToken,
  Operation,
  Snapshot,
  ViewAction,
  ViewFilter,
  ViewState,
  reduce
};
