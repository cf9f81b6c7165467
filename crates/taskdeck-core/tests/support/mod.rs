#![allow(dead_code)]

use std::cell::RefCell;

use chrono::{
  DateTime,
  Duration,
  TimeZone,
  Utc
};
use taskdeck_core::api::{
  ApiError,
  ApiRequest,
  ApiResponse,
  Method,
  Transport
};
use taskdeck_core::deadline::{
  is_due_within,
  is_overdue
};
use taskdeck_shared::{
  Category,
  MessageResponse,
  Priority,
  Progress,
  ProgressStats,
  Tag,
  Task,
  TaskCreate,
  TaskStatus,
  TaskUpdate
};

pub fn fixed_now() -> DateTime<Utc> {
  Utc
    .with_ymd_and_hms(2026, 10, 17, 12, 0, 0)
    .single()
    .expect("valid datetime")
}

#[derive(Default)]
struct Store {
  tasks:      Vec<Task>,
  categories: Vec<Category>,
  tags:       Vec<Tag>,
  next_id:    u64
}

/// In-memory stand-in for the task
/// backend. Routes requests the way the
/// real service does and records every
/// request it sees.
pub struct FakeBackend {
  store:   RefCell<Store>,
  failing: RefCell<Vec<String>>,
  pub log: RefCell<Vec<ApiRequest>>,
  now:     DateTime<Utc>
}

impl Default for FakeBackend {
  fn default() -> Self {
    Self {
      store:   RefCell::new(Store {
        next_id: 1,
        ..Store::default()
      }),
      failing: RefCell::new(Vec::new()),
      log:     RefCell::new(Vec::new()),
      now:     fixed_now()
    }
  }
}

fn json<T: serde::Serialize>(
  status: u16,
  value: &T
) -> ApiResponse {
  ApiResponse::new(
    status,
    serde_json::to_string(value)
      .expect("encode fake response")
  )
}

fn not_found(what: &str) -> ApiResponse {
  ApiResponse::new(
    404,
    format!(r#"{{"detail":"{what} not found"}}"#)
  )
}

impl FakeBackend {
  pub fn now(&self) -> DateTime<Utc> {
    self.now
  }

  /// Every request whose path starts with
  /// `prefix` answers HTTP 500 from now on.
  pub fn fail_path(&self, prefix: &str) {
    self
      .failing
      .borrow_mut()
      .push(prefix.to_string());
  }

  pub fn heal(&self) {
    self.failing.borrow_mut().clear();
  }

  pub fn request_count(&self) -> usize {
    self.log.borrow().len()
  }

  pub fn last_request(&self) -> ApiRequest {
    self
      .log
      .borrow()
      .last()
      .cloned()
      .expect("a request was sent")
  }

  pub fn seed_category(&self, name: &str) {
    let mut store = self.store.borrow_mut();
    let id = store.categories.len() as u64 + 1;
    store.categories.push(Category {
      id,
      name: name.to_string(),
      color: "#000000".to_string()
    });
  }

  pub fn seed_tag(&self, name: &str) {
    let mut store = self.store.borrow_mut();
    let id = store.tags.len() as u64 + 1;
    store.tags.push(Tag {
      id,
      name: name.to_string()
    });
  }

  pub fn seed_task(
    &self,
    title: &str,
    status: TaskStatus,
    due_in_hours: Option<i64>
  ) -> u64 {
    let create = TaskCreate {
      due_date: due_in_hours
        .map(|hours| self.now + Duration::hours(hours)),
      ..TaskCreate::new(title).status(status)
    };
    self.insert(create).id
  }

  pub fn task(&self, id: u64) -> Option<Task> {
    self
      .store
      .borrow()
      .tasks
      .iter()
      .find(|task| task.id == id)
      .cloned()
  }

  fn insert(&self, create: TaskCreate) -> Task {
    let mut store = self.store.borrow_mut();
    let task = Task {
      id:             store.next_id,
      title:          create.title,
      description:    create.description,
      priority:       create
        .priority
        .unwrap_or(Priority::MEDIUM),
      due_date:       create.due_date,
      status:         create
        .status
        .unwrap_or_default(),
      progress:       create
        .progress
        .unwrap_or(Progress::MIN),
      parent_task_id: create.parent_task_id,
      created_at:     self.now,
      updated_at:     self.now
    };
    store.next_id += 1;
    store.tasks.push(task.clone());
    task
  }

  fn update(
    &self,
    id: u64,
    update: TaskUpdate
  ) -> Option<Task> {
    let mut store = self.store.borrow_mut();
    let task = store
      .tasks
      .iter_mut()
      .find(|task| task.id == id)?;
    if let Some(title) = update.title {
      task.title = title;
    }
    if let Some(description) = update.description {
      task.description = (!description.is_empty())
        .then_some(description);
    }
    if let Some(priority) = update.priority {
      task.priority = priority;
    }
    if let Some(due) = update.due_date {
      task.due_date = Some(due);
    }
    if let Some(status) = update.status {
      task.status = status;
    }
    if let Some(progress) = update.progress {
      task.progress = progress;
    }
    task.updated_at = self.now;
    Some(task.clone())
  }

  fn list(&self, request: &ApiRequest) -> Vec<Task> {
    let param = |key: &str| {
      request
        .query
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.clone())
    };
    let status = param("status")
      .map(|raw| raw.parse::<TaskStatus>().expect("status"));
    let root_only =
      param("root_only").is_some_and(|v| v == "true");
    self
      .store
      .borrow()
      .tasks
      .iter()
      .filter(|task| status.is_none_or(|s| task.status == s))
      .filter(|task| !root_only || task.is_root())
      .cloned()
      .collect()
  }

  fn stats(&self) -> ProgressStats {
    let store = self.store.borrow();
    let count = |status: TaskStatus| {
      store
        .tasks
        .iter()
        .filter(|task| task.status == status)
        .count() as u64
    };
    let total = store.tasks.len() as u64;
    let sum: f64 = store
      .tasks
      .iter()
      .map(|task| f64::from(task.progress.value()))
      .sum();
    ProgressStats {
      total_tasks:       total,
      average_progress:  if total == 0 {
        0.0
      } else {
        sum / total as f64
      },
      completed_tasks:   count(TaskStatus::Completed),
      in_progress_tasks: count(TaskStatus::InProgress),
      pending_tasks:     count(TaskStatus::Pending)
    }
  }

  fn route(&self, request: &ApiRequest) -> ApiResponse {
    let segments: Vec<&str> = request
      .path
      .trim_matches('/')
      .split('/')
      .collect();
    let body = request.body.as_deref().unwrap_or("null");

    match (request.method, segments.as_slice()) {
      | (Method::Get, ["tasks"]) => {
        json(200, &self.list(request))
      }
      | (Method::Post, ["tasks"]) => {
        let create: TaskCreate =
          serde_json::from_str(body).expect("task body");
        json(201, &self.insert(create))
      }
      | (Method::Get, ["tasks", "overdue", "list"]) => {
        let tasks: Vec<Task> = self
          .store
          .borrow()
          .tasks
          .iter()
          .filter(|task| is_overdue(task, self.now))
          .cloned()
          .collect();
        json(200, &tasks)
      }
      | (Method::Get, ["tasks", "upcoming", "list"]) => {
        let days = request
          .query
          .iter()
          .find(|(k, _)| *k == "days")
          .and_then(|(_, v)| v.parse().ok())
          .unwrap_or(7);
        let mut tasks: Vec<Task> = self
          .store
          .borrow()
          .tasks
          .iter()
          .filter(|task| is_due_within(task, self.now, days))
          .cloned()
          .collect();
        tasks.sort_by_key(|task| task.due_date);
        json(200, &tasks)
      }
      | (method, ["tasks", id]) => {
        let Ok(id) = id.parse::<u64>() else {
          return not_found("Task");
        };
        match method {
          | Method::Get => self
            .task(id)
            .map_or_else(|| not_found("Task"), |t| json(200, &t)),
          | Method::Put => {
            let update: TaskUpdate =
              serde_json::from_str(body).expect("update body");
            self
              .update(id, update)
              .map_or_else(|| not_found("Task"), |t| json(200, &t))
          }
          | Method::Delete => {
            let mut store = self.store.borrow_mut();
            let before = store.tasks.len();
            store.tasks.retain(|task| task.id != id);
            if store.tasks.len() == before {
              not_found("Task")
            } else {
              json(200, &MessageResponse {
                message: "Task deleted successfully".to_string(),
                success: true
              })
            }
          }
          | Method::Post => ApiResponse::new(405, "{}")
        }
      }
      | (Method::Get, ["categories"]) => {
        json(200, &self.store.borrow().categories)
      }
      | (Method::Get, ["tags"]) => {
        json(200, &self.store.borrow().tags)
      }
      | (Method::Get, ["progress", "stats"]) => {
        json(200, &self.stats())
      }
      | _ => ApiResponse::new(404, r#"{"detail":"Not Found"}"#)
    }
  }
}

impl Transport for FakeBackend {
  async fn send(
    &self,
    request: ApiRequest
  ) -> Result<ApiResponse, ApiError> {
    self.log.borrow_mut().push(request.clone());
    let failing = self
      .failing
      .borrow()
      .iter()
      .any(|prefix| request.path.starts_with(prefix));
    if failing {
      return Ok(ApiResponse::new(
        500,
        r#"{"detail":"Internal Server Error"}"#
      ));
    }
    Ok(self.route(&request))
  }
}
