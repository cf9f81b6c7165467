mod chips;
mod task_list_row;
mod task_modal;

use chrono::{
  DateTime,
  Utc
};
use taskdeck_core::view::ViewFilter;
use taskdeck_shared::{
  ProgressStats,
  Task,
  TaskId
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

pub use chips::{
  CategoryChips,
  TagChips
};
pub use task_list_row::TaskListRow;
pub use task_modal::TaskModal;

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
  pub active:    ViewFilter,
  pub on_select: Callback<ViewFilter>
}

#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
  html! {
      <div class="panel sidebar">
          <div class="header">{ "Views" }</div>
          {
              for ViewFilter::ALL.into_iter().map(|filter| {
                  let on_select = props.on_select.clone();
                  html! {
                      <div
                          class={classes!("item", (props.active == filter).then_some("active"))}
                          onclick={move |_| on_select.emit(filter)}
                      >
                          { filter.label() }
                      </div>
                  }
              })
          }
      </div>
  }
}

#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
  pub message:    Option<String>,
  pub on_dismiss: Callback<()>
}

#[function_component(ErrorBanner)]
pub fn error_banner(
  props: &ErrorBannerProps
) -> Html {
  let Some(message) = props.message.clone()
  else {
    return html! {};
  };
  let on_dismiss = props.on_dismiss.clone();
  html! {
      <div class="error-banner" role="alert">
          <span>{ message }</span>
          <button onclick={move |_| on_dismiss.emit(())}>{ "Dismiss" }</button>
      </div>
  }
}

#[derive(Properties, PartialEq)]
pub struct StatsPanelProps {
  pub stats: Option<ProgressStats>
}

#[function_component(StatsPanel)]
pub fn stats_panel(
  props: &StatsPanelProps
) -> Html {
  let Some(stats) = props.stats.as_ref()
  else {
    return html! {};
  };
  html! {
      <div class="panel stats">
          <span><strong>{ stats.total_tasks }</strong>{ " total" }</span>
          <span><strong>{ stats.pending_tasks }</strong>{ " pending" }</span>
          <span><strong>{ stats.in_progress_tasks }</strong>{ " in progress" }</span>
          <span><strong>{ stats.completed_tasks }</strong>{ " completed" }</span>
          <span><strong>{ format!("{}%", stats.average_percent()) }</strong>{ " average progress" }</span>
      </div>
  }
}

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub tasks:     Vec<Task>,
  pub loading:   bool,
  pub now:       DateTime<Utc>,
  pub on_edit:   Callback<Task>,
  pub on_toggle: Callback<Task>,
  pub on_delete: Callback<TaskId>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  let body = if props.tasks.is_empty() {
    let text = if props.loading {
      "Loading…"
    } else {
      "No tasks in this view."
    };
    html! { <div class="empty">{ text }</div> }
  } else {
    html! {
        {
            for props.tasks.iter().map(|task| html! {
                <TaskListRow
                    key={task.id}
                    task={task.clone()}
                    now={props.now}
                    on_edit={props.on_edit.clone()}
                    on_toggle={props.on_toggle.clone()}
                    on_delete={props.on_delete.clone()}
                />
            })
        }
    }
  };

  html! {
      <div class="panel list">
          <div class="header">
              { "Tasks" }
              { if props.loading { " (refreshing)" } else { "" } }
          </div>
          { body }
      </div>
  }
}
