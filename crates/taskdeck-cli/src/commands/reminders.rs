use std::io::Write;

use anyhow::{Context, anyhow};
use taskdeck_core::api::Transport;
use taskdeck_shared::{ReminderCreate, ReminderUpdate};
use tracing::instrument;

use super::Session;
use crate::cli::ReminderCommand;
use crate::dates::parse_date_arg;

impl<T, W, C> Session<T, W, C>
where
    T: Transport,
    W: Write,
    C: FnMut(&str) -> anyhow::Result<bool>,
{
    #[instrument(skip(self))]
    pub(super) async fn reminder(&mut self, cmd: ReminderCommand) -> anyhow::Result<()> {
        match cmd {
            ReminderCommand::List => {
                let list = self
                    .client
                    .reminders()
                    .list()
                    .await
                    .context("failed to list reminders")?;
                self.renderer.reminders(&mut self.out, &list, self.now)
            }
            ReminderCommand::Show { id } => {
                let reminder = self
                    .client
                    .reminders()
                    .get(id)
                    .await
                    .with_context(|| format!("failed to fetch reminder {id}"))?;
                self.renderer.reminders(&mut self.out, &[reminder], self.now)
            }
            ReminderCommand::Add { task, at } => {
                let remind_at = parse_date_arg(&at, self.now)?;
                let reminder = self
                    .client
                    .reminders()
                    .create(&ReminderCreate {
                        task_id: task,
                        remind_at,
                    })
                    .await
                    .context("failed to create reminder")?;
                self.say(format_args!("Created reminder {}.", reminder.id))
            }
            ReminderCommand::Edit { id, at, notified } => {
                let remind_at = at.map(|raw| parse_date_arg(&raw, self.now)).transpose()?;
                let update = ReminderUpdate {
                    remind_at,
                    is_notified: notified,
                };
                if update == ReminderUpdate::default() {
                    return Err(anyhow!("nothing to update; pass --at or --notified"));
                }
                let reminder = self
                    .client
                    .reminders()
                    .update(id, &update)
                    .await
                    .with_context(|| format!("failed to update reminder {id}"))?;
                self.renderer.reminders(&mut self.out, &[reminder], self.now)
            }
            ReminderCommand::Delete { id, yes } => {
                if !self.confirmation(yes, &format!("Delete reminder {id}?"))?.is_confirmed() {
                    return self.say("Cancelled.");
                }
                self.client
                    .reminders()
                    .delete(id)
                    .await
                    .with_context(|| format!("failed to delete reminder {id}"))?;
                self.say(format_args!("Deleted reminder {id}."))
            }
            ReminderCommand::Pending => {
                let list = self
                    .client
                    .reminders()
                    .pending()
                    .await
                    .context("failed to list pending reminders")?;
                self.renderer.reminders(&mut self.out, &list, self.now)
            }
            ReminderCommand::Notify { id } => {
                self.client
                    .reminders()
                    .mark_notified(id)
                    .await
                    .with_context(|| format!("failed to mark reminder {id} notified"))?;
                self.say(format_args!("Reminder {id} marked as notified."))
            }
            ReminderCommand::ForTask { task } => {
                let list = self
                    .client
                    .reminders()
                    .for_task(task)
                    .await
                    .with_context(|| format!("failed to list reminders for task {task}"))?;
                self.renderer.reminders(&mut self.out, &list, self.now)
            }
        }
    }
}
