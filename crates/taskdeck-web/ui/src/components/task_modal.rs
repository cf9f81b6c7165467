use taskdeck_core::form::{
  FormEdit,
  TaskForm
};
use taskdeck_shared::{
  Priority,
  Progress,
  TaskStatus
};
use web_sys::{
  HtmlInputElement,
  HtmlSelectElement,
  HtmlTextAreaElement
};
use yew::{
  Callback,
  Event,
  Html,
  InputEvent,
  MouseEvent,
  Properties,
  SubmitEvent,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskModalProps {
  pub form:      TaskForm,
  pub on_edit:   Callback<FormEdit>,
  pub on_submit: Callback<()>,
  pub on_close:  Callback<()>
}

/// Create/edit dialog. Field changes go
/// straight to the view reducer; nothing
/// is held locally.
#[function_component(TaskModal)]
pub fn task_modal(
  props: &TaskModalProps
) -> Html {
  let form = &props.form;
  let title = if form.is_edit() {
    "Edit task"
  } else {
    "New task"
  };

  let on_title = props.on_edit.reform(
    |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      FormEdit::Title(input.value())
    }
  );
  let on_description = props.on_edit.reform(
    |e: InputEvent| {
      let input: HtmlTextAreaElement =
        e.target_unchecked_into();
      FormEdit::Description(input.value())
    }
  );
  let on_priority = props.on_edit.reform(
    |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      FormEdit::Priority(
        select
          .value()
          .parse()
          .unwrap_or_default()
      )
    }
  );
  let on_status = props.on_edit.reform(
    |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      FormEdit::Status(
        select
          .value()
          .parse()
          .unwrap_or_default()
      )
    }
  );
  let on_progress = props.on_edit.reform(
    |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      FormEdit::Progress(
        input.value().parse().unwrap_or(0)
      )
    }
  );
  let on_submit = {
    let on_submit = props.on_submit.clone();
    Callback::from(move |e: SubmitEvent| {
      e.prevent_default();
      on_submit.emit(());
    })
  };
  let on_close = props.on_close.reform(|_| ());
  let on_backdrop =
    props.on_close.reform(|_: MouseEvent| ());
  let keep_open =
    Callback::from(|e: MouseEvent| {
      e.stop_propagation();
    });

  html! {
      <div class="modal-backdrop" onclick={on_backdrop}>
          <form class="panel modal" onsubmit={on_submit} onclick={keep_open}>
              <div class="header">{ title }</div>
              <label>
                  { "Title" }
                  <input type="text" value={form.title.clone()} oninput={on_title} />
              </label>
              <label>
                  { "Description" }
                  <textarea rows="3" value={form.description.clone()} oninput={on_description} />
              </label>
              <label>
                  { "Priority" }
                  <select onchange={on_priority}>
                      {
                          for Priority::ALL.into_iter().map(|priority| html! {
                              <option
                                  value={priority.to_string()}
                                  selected={priority == form.priority}
                              >
                                  { priority.label() }
                              </option>
                          })
                      }
                  </select>
              </label>
              <label>
                  { "Status" }
                  <select onchange={on_status}>
                      {
                          for TaskStatus::ALL.into_iter().map(|status| html! {
                              <option
                                  value={status.as_str()}
                                  selected={status == form.status}
                              >
                                  { status.label() }
                              </option>
                          })
                      }
                  </select>
              </label>
              <label>
                  { format!("Progress: {}", form.progress) }
                  <input
                      type="range"
                      min={Progress::MIN.value().to_string()}
                      max={Progress::MAX.value().to_string()}
                      value={form.progress.value().to_string()}
                      oninput={on_progress}
                  />
              </label>
              {
                  match &form.error {
                      Some(error) => html! { <div class="form-error">{ error }</div> },
                      None => html! {},
                  }
              }
              <div class="footer">
                  <button type="button" onclick={on_close}>{ "Cancel" }</button>
                  <button type="submit">{ if form.is_edit() { "Save" } else { "Create" } }</button>
              </div>
          </form>
      </div>
  }
}
