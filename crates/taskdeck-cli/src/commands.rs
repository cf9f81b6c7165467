mod catalog;
mod dashboard;
mod progress;
mod reminders;
mod tasks;

use std::io::Write;

use chrono::{DateTime, Utc};
use taskdeck_core::api::{ApiClient, Transport};
use taskdeck_core::sync::Confirmation;
use tracing::{debug, instrument};

use crate::cli::Command;
use crate::render::Renderer;

/// One CLI invocation: the backend client, where output goes, and how the
/// user is asked before destructive actions.
pub struct Session<T, W, C> {
    client: ApiClient<T>,
    renderer: Renderer,
    out: W,
    confirm: C,
    now: DateTime<Utc>,
}

impl<T, W, C> Session<T, W, C>
where
    T: Transport,
    W: Write,
    C: FnMut(&str) -> anyhow::Result<bool>,
{
    pub fn new(transport: T, renderer: Renderer, out: W, confirm: C) -> Self {
        Self {
            client: ApiClient::new(transport),
            renderer,
            out,
            confirm,
            now: Utc::now(),
        }
    }

    /// Pins the clock used for relative dates and due-state coloring.
    #[must_use]
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn into_output(self) -> W {
        self.out
    }

    #[instrument(skip(self))]
    pub async fn dispatch(&mut self, command: Command) -> anyhow::Result<()> {
        debug!(?command, "dispatching command");
        match command {
            Command::View { filter } => self.view(filter.unwrap_or_default()).await,
            Command::Task(cmd) => self.task(cmd).await,
            Command::Category(cmd) => self.category(cmd).await,
            Command::Tag(cmd) => self.tag(cmd).await,
            Command::Reminder(cmd) => self.reminder(cmd).await,
            Command::Progress(cmd) => self.progress(cmd).await,
        }
    }

    fn confirmation(&mut self, skip_prompt: bool, question: &str) -> anyhow::Result<Confirmation> {
        if skip_prompt {
            return Ok(Confirmation::Confirmed);
        }
        Ok(Confirmation::from((self.confirm)(question)?))
    }

    fn say(&mut self, line: impl std::fmt::Display) -> anyhow::Result<()> {
        writeln!(self.out, "{line}")?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use chrono::TimeZone;
    use taskdeck_core::api::{ApiError, ApiRequest, ApiResponse};

    use super::*;

    #[derive(Default)]
    pub struct ScriptedTransport {
        pub requests: RefCell<Vec<ApiRequest>>,
        responses: RefCell<VecDeque<ApiResponse>>,
    }

    impl ScriptedTransport {
        pub fn replying<I>(responses: I) -> Self
        where
            I: IntoIterator<Item = (u16, &'static str)>,
        {
            Self {
                requests: RefCell::new(Vec::new()),
                responses: RefCell::new(
                    responses
                        .into_iter()
                        .map(|(status, body)| ApiResponse::new(status, body))
                        .collect(),
                ),
            }
        }

        pub fn paths(&self) -> Vec<String> {
            self.requests
                .borrow()
                .iter()
                .map(|request| format!("{} {}", request.method, request.path))
                .collect()
        }
    }

    impl Transport for ScriptedTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
            self.requests.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| ApiError::Transport("no scripted response".to_string()))
        }
    }

    pub const TASK_JSON: &str = r#"{"id":3,"title":"Buy milk","description":null,"priority":2,"due_date":null,"status":"pending","progress":0,"parent_task_id":null,"created_at":"2026-10-17T09:00:00","updated_at":"2026-10-17T09:00:00"}"#;

    pub fn session(
        transport: &ScriptedTransport,
        answer: bool,
    ) -> Session<&ScriptedTransport, Vec<u8>, impl FnMut(&str) -> anyhow::Result<bool>> {
        let now = Utc
            .with_ymd_and_hms(2026, 10, 17, 12, 0, 0)
            .single()
            .expect("valid now");
        Session::new(transport, Renderer::plain(), Vec::new(), move |_: &str| Ok(answer)).at(now)
    }

    pub fn output<T, C>(session: Session<T, Vec<u8>, C>) -> String
    where
        T: Transport,
        C: FnMut(&str) -> anyhow::Result<bool>,
    {
        String::from_utf8(session.into_output()).expect("utf8 output")
    }
}
