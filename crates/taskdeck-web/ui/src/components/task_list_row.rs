use chrono::{
  DateTime,
  Utc
};
use taskdeck_core::deadline::{
  DueState,
  describe_remaining,
  due_state,
  time_remaining
};
use taskdeck_core::status::toggle_label;
use taskdeck_shared::{
  Task,
  TaskId
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  classes,
  function_component,
  html
};

const DUE_SOON_DAYS: u32 = 2;

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub task:      Task,
  pub now:       DateTime<Utc>,
  pub on_edit:   Callback<Task>,
  pub on_toggle: Callback<Task>,
  pub on_delete: Callback<TaskId>
}

#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let task = &props.task;

  let due_badge = match task.due_date {
    | Some(due) => {
      let state =
        due_state(task, props.now, DUE_SOON_DAYS);
      let class = match state {
        | DueState::Overdue => "badge overdue",
        | DueState::DueSoon => "badge soon",
        | _ => "badge"
      };
      let hint = match state {
        | DueState::Overdue
        | DueState::DueSoon
        | DueState::Later => {
          time_remaining(task, props.now)
            .map(describe_remaining)
            .map(|text| format!(" ({text})"))
            .unwrap_or_default()
        }
        | DueState::Done
        | DueState::NoDueDate => String::new()
      };
      html! {
          <span class={class}>
              { format!("due {}{hint}", due.format("%Y-%m-%d %H:%M")) }
          </span>
      }
    }
    | None => html! {}
  };

  let on_toggle = {
    let on_toggle = props.on_toggle.clone();
    let task = task.clone();
    Callback::from(move |e: MouseEvent| {
      e.stop_propagation();
      on_toggle.emit(task.clone());
    })
  };
  let on_edit = {
    let on_edit = props.on_edit.clone();
    let task = task.clone();
    Callback::from(move |_| on_edit.emit(task.clone()))
  };
  let on_delete = {
    let on_delete = props.on_delete.clone();
    let id = task.id;
    Callback::from(move |e: MouseEvent| {
      e.stop_propagation();
      on_delete.emit(id);
    })
  };

  html! {
      <div class={classes!("row", (!task.is_root()).then_some("subtask"))}>
          <div class={classes!("dot", task.status.as_str())}></div>
          <div>
              <div>{ &task.title }</div>
              {
                  match task.description.as_deref().filter(|text| !text.trim().is_empty()) {
                      Some(text) => html! { <div class="task-subtitle">{ text }</div> },
                      None => html! {},
                  }
              }
              <div style="margin-top:4px;">
                  <span class="badge">{ task.status.label() }</span>
                  <span class="badge">{ format!("priority: {}", task.priority.label()) }</span>
                  { due_badge }
              </div>
          </div>
          <div class="progress" title={task.progress.to_string()}>
              <div style={format!("width:{}%;", task.progress.value())}></div>
          </div>
          <div class="actions">
              <button onclick={on_toggle}>{ toggle_label(task.status) }</button>
              <button onclick={on_edit}>{ "Edit" }</button>
              <button onclick={on_delete}>{ "Delete" }</button>
          </div>
      </div>
  }
}
