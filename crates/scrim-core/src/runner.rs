//! Effect runner
//!
//! Performs the effects returned by the reducers on the tokio runtime and
//! posts each outcome back to the screen as a [`ScreenAction`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::AbortHandle;

use crate::api::{ApiError, TeamApi};
use crate::config::EditorConfig;
use crate::data_uri;
use crate::effect::Effect;
use crate::screen::{EditorAction, NoTeamAction, ScreenAction};

/// Sending half of the screen's action queue
pub type ActionSender = UnboundedSender<ScreenAction>;

pub struct EffectRunner {
    api: Arc<dyn TeamApi>,
    save_status_revert: Duration,
    tx: ActionSender,
    /// Timer that will revert the save status, if one is pending
    pending_reset: Option<AbortHandle>,
}

impl EffectRunner {
    pub fn new(api: Arc<dyn TeamApi>, editor: &EditorConfig, tx: ActionSender) -> Self {
        Self {
            api,
            save_status_revert: editor.save_status_revert(),
            tx,
            pending_reset: None,
        }
    }

    /// Start performing `effect`; must be called from within a tokio runtime
    pub fn run(&mut self, effect: Effect) {
        tracing::debug!(?effect, "running effect");

        match effect {
            Effect::FetchTeam { epoch } => {
                let api = self.api.clone();
                self.spawn(async move {
                    match api.get_user_team().await {
                        Ok(team) => {
                            tracing::info!(epoch, has_team = team.is_some(), "fetched current team");
                            ScreenAction::TeamFetched { epoch, team }
                        }
                        Err(e) => {
                            tracing::error!("Failed to fetch team: {}", e);
                            ScreenAction::FetchFailed { epoch }
                        }
                    }
                });
            }

            Effect::CreateTeam { name } => {
                let api = self.api.clone();
                self.spawn(async move {
                    tracing::info!(%name, "creating team");
                    let success = accepted("create", api.create_team(&name).await);
                    ScreenAction::from(NoTeamAction::CreateResolved { success })
                });
            }

            Effect::JoinTeam {
                secret_key,
                team_name,
            } => {
                let api = self.api.clone();
                self.spawn(async move {
                    tracing::info!(%team_name, "joining team");
                    let success = accepted("join", api.join_team(&secret_key, &team_name).await);
                    ScreenAction::from(NoTeamAction::JoinResolved { success })
                });
            }

            Effect::UpdateTeam { record, generation } => {
                let api = self.api.clone();
                self.spawn(async move {
                    tracing::info!(team = %record.name, generation, "saving team");
                    let success = accepted("update", api.update_team(&record).await);
                    ScreenAction::from(EditorAction::SaveResolved {
                        generation,
                        success,
                    })
                });
            }

            Effect::LeaveTeam => {
                let api = self.api.clone();
                self.spawn(async move {
                    tracing::info!("leaving team");
                    let success = accepted("leave", api.leave_team().await);
                    ScreenAction::from(EditorAction::LeaveResolved { success })
                });
            }

            Effect::ReadBioImage { path } => {
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    match data_uri::read_file(&path).await {
                        Ok(data_uri) => post(&tx, EditorAction::BioImageLoaded { data_uri }.into()),
                        Err(e) => tracing::warn!("Failed to read bio image {:?}: {}", path, e),
                    }
                });
            }

            Effect::CancelSaveReset => {
                if let Some(handle) = self.pending_reset.take() {
                    tracing::debug!("cancelling pending save reset");
                    handle.abort();
                }
            }

            Effect::ScheduleSaveReset { generation } => {
                if let Some(handle) = self.pending_reset.take() {
                    handle.abort();
                }
                let tx = self.tx.clone();
                let deadline = tokio::time::Instant::now() + self.save_status_revert;
                let task = tokio::spawn(async move {
                    tokio::time::sleep_until(deadline).await;
                    post(&tx, EditorAction::SaveTimeout { generation }.into());
                });
                self.pending_reset = Some(task.abort_handle());
            }

            Effect::RefetchRoot => post(&self.tx, ScreenAction::RefetchRoot),
        }
    }

    /// Spawn `work` and post the action it resolves to
    fn spawn<F>(&self, work: F)
    where
        F: std::future::Future<Output = ScreenAction> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let action = work.await;
            post(&tx, action);
        });
    }
}

/// Collapse an API outcome to accepted / not accepted, logging failures
fn accepted(operation: &str, result: Result<bool, ApiError>) -> bool {
    match result {
        Ok(true) => true,
        Ok(false) => {
            tracing::warn!(operation, "team API rejected the request");
            false
        }
        Err(e) => {
            tracing::warn!(operation, "team API call failed: {}", e);
            false
        }
    }
}

fn post(tx: &ActionSender, action: ScreenAction) {
    if tx.send(action).is_err() {
        tracing::debug!("screen closed, dropping action");
    }
}
