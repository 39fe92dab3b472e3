//! Screen store: state, reducer and effect runner wired together

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::api::TeamApi;
use crate::config::ScrimConfig;
use crate::runner::EffectRunner;
use crate::screen::{ScreenAction, TeamScreen};

/// Owns the [`TeamScreen`] state
///
/// All mutation goes through [`Store::dispatch`] on the caller's task.
/// Completed effects queue their actions; [`Store::pump`] and
/// [`Store::next`] feed them back in arrival order.
pub struct Store {
    state: TeamScreen,
    runner: EffectRunner,
    rx: UnboundedReceiver<ScreenAction>,
}

impl Store {
    pub fn new(api: Arc<dyn TeamApi>, config: &ScrimConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: TeamScreen::new(),
            runner: EffectRunner::new(api, &config.editor, tx),
            rx,
        }
    }

    pub fn state(&self) -> &TeamScreen {
        &self.state
    }

    /// Show the screen, starting the membership lookup
    pub fn mount(&mut self) {
        self.dispatch(ScreenAction::Mounted);
    }

    /// Apply an action and start the effects it requests
    pub fn dispatch(&mut self, action: impl Into<ScreenAction>) {
        let action = action.into();
        tracing::debug!(?action, "dispatch");

        let step = std::mem::take(&mut self.state).reduce(action);
        self.state = step.state;
        for effect in step.effects {
            self.runner.run(effect);
        }
    }

    /// Dispatch every queued action without waiting; returns how many ran
    pub fn pump(&mut self) -> usize {
        let mut count = 0;
        while let Ok(action) = self.rx.try_recv() {
            self.dispatch(action);
            count += 1;
        }
        count
    }

    /// Wait for the next queued action and dispatch it
    pub async fn next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => false,
        }
    }
}
