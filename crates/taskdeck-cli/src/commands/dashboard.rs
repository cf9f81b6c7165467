use std::io::Write;

use anyhow::anyhow;
use taskdeck_core::api::Transport;
use taskdeck_core::sync::load_snapshot;
use taskdeck_core::view::{LoadSequencer, ViewAction, ViewFilter, ViewState, reduce};
use tracing::instrument;

use super::Session;

impl<T, W, C> Session<T, W, C>
where
    T: Transport,
    W: Write,
    C: FnMut(&str) -> anyhow::Result<bool>,
{
    /// Runs one dashboard load cycle and prints the resulting view.
    #[instrument(skip(self))]
    pub(super) async fn view(&mut self, filter: ViewFilter) -> anyhow::Result<()> {
        let token = LoadSequencer::new().next();
        let state = reduce(ViewState::new(filter), ViewAction::LoadStarted(token));
        let outcome = load_snapshot(&self.client, filter).await;
        let state = reduce(state, ViewAction::LoadFinished { token, outcome });

        if let Some(message) = state.error {
            return Err(anyhow!(message));
        }

        writeln!(self.out, "{}", filter.label())?;
        if let Some(stats) = &state.stats {
            self.renderer.stats(&mut self.out, stats)?;
        }
        if !state.categories.is_empty() {
            writeln!(self.out)?;
            self.renderer.categories(&mut self.out, &state.categories)?;
        }
        if !state.tags.is_empty() {
            writeln!(self.out)?;
            self.renderer.tags(&mut self.out, &state.tags)?;
        }
        writeln!(self.out)?;
        self.renderer.task_table(&mut self.out, &state.tasks, self.now)
    }
}
