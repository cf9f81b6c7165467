use std::io::Write;

use anyhow::{Context, anyhow};
use taskdeck_core::api::Transport;
use taskdeck_core::view::Operation;
use taskdeck_shared::Progress;
use tracing::instrument;

use super::Session;
use crate::cli::ProgressCommand;

impl<T, W, C> Session<T, W, C>
where
    T: Transport,
    W: Write,
    C: FnMut(&str) -> anyhow::Result<bool>,
{
    #[instrument(skip(self))]
    pub(super) async fn progress(&mut self, cmd: ProgressCommand) -> anyhow::Result<()> {
        match cmd {
            ProgressCommand::Set { task, value } => {
                let updated = self
                    .client
                    .progress()
                    .set(task, Progress::new(value))
                    .await
                    .context(Operation::Update.failure_message())?;
                self.say(format_args!("Task {task} progress: {}", updated.progress))
            }
            ProgressCommand::Get { task } => {
                let progress = self
                    .client
                    .progress()
                    .get(task)
                    .await
                    .with_context(|| format!("failed to fetch progress of task {task}"))?;
                self.say(progress)
            }
            ProgressCommand::Bump { task, by } => {
                let updated = self
                    .client
                    .progress()
                    .increment(task, by)
                    .await
                    .context(Operation::Update.failure_message())?;
                self.say(format_args!("Task {task} progress: {}", updated.progress))
            }
            ProgressCommand::Range { min, max } => {
                let (min, max) = (Progress::new(min), Progress::new(max));
                if min > max {
                    return Err(anyhow!("--min {min} is above --max {max}"));
                }
                let tasks = self
                    .client
                    .progress()
                    .in_range(min, max)
                    .await
                    .context("failed to list tasks by progress")?;
                self.renderer.task_table(&mut self.out, &tasks, self.now)
            }
            ProgressCommand::Stats { status } => {
                let stats = self
                    .client
                    .progress()
                    .stats(status)
                    .await
                    .context("failed to fetch progress stats")?;
                self.renderer.stats(&mut self.out, &stats)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::super::testing::{ScriptedTransport, TASK_JSON, output, session};
    use super::*;

    #[tokio::test]
    async fn bump_defaults_to_ten() {
        let transport = ScriptedTransport::replying([(200, TASK_JSON)]);
        let mut session = session(&transport, true);
        session
            .progress(ProgressCommand::Bump { task: 3, by: None })
            .await
            .expect("bump");
        let request = transport.requests.borrow()[0].clone();
        assert_eq!(request.path, "/progress/tasks/3/increment");
        assert_eq!(request.query, vec![("increment", "10".to_string())]);
    }

    #[tokio::test]
    async fn inverted_range_is_rejected_locally() {
        let transport = ScriptedTransport::default();
        let mut session = session(&transport, true);
        assert!(
            session
                .progress(ProgressCommand::Range { min: 80, max: 20 })
                .await
                .is_err()
        );
        assert!(transport.paths().is_empty());
    }

    #[tokio::test]
    async fn stats_summary_line() {
        let transport = ScriptedTransport::replying([(
            200,
            r#"{"total_tasks":4,"average_progress":37.5,"completed_tasks":1,"in_progress_tasks":2,"pending_tasks":1}"#,
        )]);
        let mut session = session(&transport, true);
        session
            .progress(ProgressCommand::Stats { status: None })
            .await
            .expect("stats");
        assert_eq!(
            output(session),
            "4 tasks: 1 pending, 2 in progress, 1 completed. Average progress 38%\n"
        );
    }
}
