use std::rc::Rc;

use chrono::Utc;
use taskdeck_core::api::ApiClient;
use taskdeck_core::form::{
  FormEdit,
  FormSubmission
};
use taskdeck_core::sync::{
  Confirmation,
  delete_task,
  load_snapshot,
  submit_form,
  toggle_status
};
use taskdeck_core::view::{
  LoadSequencer,
  Operation,
  ViewAction,
  ViewFilter,
  ViewState,
  reduce
};
use taskdeck_shared::{
  Task,
  TaskId
};
use web_sys::AbortController;
use yew::{
  Callback,
  Html,
  Reducible,
  UseReducerDispatcher,
  function_component,
  html,
  use_effect_with,
  use_mut_ref,
  use_reducer
};

use crate::api::FetchTransport;
use crate::components::{
  CategoryChips,
  ErrorBanner,
  Sidebar,
  StatsPanel,
  TagChips,
  TaskList,
  TaskModal
};

/// Yew-side wrapper so the view reducer
/// can back `use_reducer`.
#[derive(Clone, PartialEq, Default)]
struct AppModel(ViewState);

impl Reducible for AppModel {
  type Action = ViewAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    let AppModel(state) =
      Rc::unwrap_or_clone(self);
    Rc::new(AppModel(reduce(state, action)))
  }
}

type Dispatcher = UseReducerDispatcher<AppModel>;

fn client() -> ApiClient<FetchTransport> {
  ApiClient::new(FetchTransport::default())
}

/// Runs a mutation and reports its
/// outcome; success triggers a reload.
fn run_mutation<F>(
  dispatcher: Dispatcher,
  operation: Operation,
  mutation: F
) where
  F: std::future::Future<
      Output = Result<(), taskdeck_core::api::ApiError>
    > + 'static
{
  wasm_bindgen_futures::spawn_local(
    async move {
      match mutation.await {
        | Ok(()) => {
          dispatcher.dispatch(
            ViewAction::MutationSucceeded(
              operation
            )
          );
        }
        | Err(error) => {
          dispatcher.dispatch(
            ViewAction::OperationFailed {
              operation,
              error
            }
          );
        }
      }
    }
  );
}

fn confirm_delete(task_id: TaskId) -> Confirmation {
  web_sys::window()
    .and_then(|window| {
      window
        .confirm_with_message(&format!(
          "Delete task #{task_id}? \
           This cannot be undone."
        ))
        .ok()
    })
    .unwrap_or(false)
    .into()
}

#[function_component(App)]
pub fn app() -> Html {
  let model = use_reducer(AppModel::default);
  let sequencer = use_mut_ref(LoadSequencer::new);
  let state = &model.0;

  {
    let dispatcher = model.dispatcher();
    let sequencer = sequencer.clone();
    use_effect_with(
      (state.filter, state.reload_generation),
      move |(filter, generation)| {
        let filter = *filter;
        let controller =
          AbortController::new().ok();
        let signal = controller
          .as_ref()
          .map(AbortController::signal);
        let token =
          sequencer.borrow_mut().next();
        tracing::info!(
          filter = %filter,
          generation = *generation,
          token = token.value(),
          "loading dashboard"
        );
        dispatcher.dispatch(
          ViewAction::LoadStarted(token)
        );

        wasm_bindgen_futures::spawn_local(
          async move {
            let client = ApiClient::new(
              FetchTransport::with_signal(
                signal
              )
            );
            let outcome =
              load_snapshot(&client, filter)
                .await;
            dispatcher.dispatch(
              ViewAction::LoadFinished {
                token,
                outcome
              }
            );
          }
        );

        move || {
          if let Some(controller) = controller
          {
            controller.abort();
          }
        }
      }
    );
  }

  let on_select_filter = {
    let dispatcher = model.dispatcher();
    Callback::from(move |filter: ViewFilter| {
      dispatcher.dispatch(
        ViewAction::SelectFilter(filter)
      );
    })
  };

  let on_open_create = {
    let dispatcher = model.dispatcher();
    Callback::from(move |_| {
      dispatcher.dispatch(ViewAction::OpenCreate);
    })
  };

  let on_edit = {
    let dispatcher = model.dispatcher();
    Callback::from(move |task: Task| {
      dispatcher
        .dispatch(ViewAction::OpenEdit(task));
    })
  };

  let on_close_modal = {
    let dispatcher = model.dispatcher();
    Callback::from(move |()| {
      dispatcher.dispatch(ViewAction::CloseModal);
    })
  };

  let on_form_edit = {
    let dispatcher = model.dispatcher();
    Callback::from(move |edit: FormEdit| {
      dispatcher
        .dispatch(ViewAction::EditForm(edit));
    })
  };

  let on_submit = {
    let model = model.clone();
    Callback::from(move |()| {
      let Some(form) = model.0.modal.as_ref()
      else {
        return;
      };
      let submission = match form.submit() {
        | Ok(submission) => submission,
        | Err(err) => {
          model.dispatch(
            ViewAction::FormRejected(err)
          );
          return;
        }
      };
      let operation = match submission {
        | FormSubmission::Create(_) => {
          Operation::Create
        }
        | FormSubmission::Update { .. } => {
          Operation::Update
        }
      };
      run_mutation(
        model.dispatcher(),
        operation,
        async move {
          submit_form(&client(), &submission)
            .await
            .map(|_| ())
        }
      );
    })
  };

  let on_toggle = {
    let dispatcher = model.dispatcher();
    Callback::from(move |task: Task| {
      run_mutation(
        dispatcher.clone(),
        Operation::ToggleStatus,
        async move {
          toggle_status(&client(), &task)
            .await
            .map(|_| ())
        }
      );
    })
  };

  let on_delete = {
    let dispatcher = model.dispatcher();
    Callback::from(move |task_id: TaskId| {
      let confirmation =
        confirm_delete(task_id);
      if !confirmation.is_confirmed() {
        tracing::info!(
          task_id,
          "delete cancelled"
        );
        return;
      }
      run_mutation(
        dispatcher.clone(),
        Operation::Delete,
        async move {
          delete_task(
            &client(),
            task_id,
            confirmation
          )
          .await
          .map(|_| ())
        }
      );
    })
  };

  let on_dismiss_error = {
    let dispatcher = model.dispatcher();
    Callback::from(move |()| {
      dispatcher.dispatch(ViewAction::DismissError);
    })
  };

  html! {
      <div class="layout">
          <Sidebar active={state.filter} on_select={on_select_filter} />
          <div class="main">
              <div class="toolbar">
                  <h2>{ state.filter.label() }</h2>
                  <button onclick={on_open_create}>{ "New task" }</button>
              </div>
              <ErrorBanner message={state.error.clone()} on_dismiss={on_dismiss_error} />
              <StatsPanel stats={state.stats.clone()} />
              <div class="panel">
                  <CategoryChips categories={state.categories.clone()} />
                  <TagChips tags={state.tags.clone()} />
              </div>
              <TaskList
                  tasks={state.tasks.clone()}
                  loading={state.loading}
                  now={Utc::now()}
                  on_edit={on_edit}
                  on_toggle={on_toggle}
                  on_delete={on_delete}
              />
          </div>
          {
              if let Some(form) = state.modal.clone() {
                  html! {
                      <TaskModal
                          form={form}
                          on_edit={on_form_edit}
                          on_submit={on_submit}
                          on_close={on_close_modal}
                      />
                  }
              } else {
                  html! {}
              }
          }
      </div>
  }
}
