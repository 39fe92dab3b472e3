//! Team screen container
//!
//! Holds the tri-state membership result and routes actions to whichever
//! child is mounted:
//!
//! ```text
//! Unknown --TeamFetched(None)--> NoTeam(NoTeamForm)
//! Unknown --TeamFetched(Some)--> Team(TeamEditor)
//! any     --RefetchRoot-------> Unknown (+ FetchTeam with a new epoch)
//! ```

pub mod editor;
pub mod no_team;

pub use editor::{EditorAction, SaveStatus, TeamEditor};
pub use no_team::{NoTeamAction, NoTeamField, NoTeamForm};

use crate::effect::{Effect, Step};
use crate::error::ScreenError;
use crate::team::TeamRecord;

/// Whether the current user has a team
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Membership {
    /// Fetch not completed yet
    #[default]
    Unknown,
    /// The user has no team
    NoTeam(NoTeamForm),
    /// The user has a team
    Team(TeamEditor),
}

/// Actions handled by [`TeamScreen::reduce`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAction {
    /// The screen was shown
    Mounted,
    /// The membership lookup for fetch `epoch` finished
    TeamFetched {
        epoch: u64,
        team: Option<TeamRecord>,
    },
    /// The membership lookup for fetch `epoch` failed
    FetchFailed { epoch: u64 },
    /// Discard everything and fetch again
    RefetchRoot,
    /// Action for the create/join form
    NoTeam(NoTeamAction),
    /// Action for the editor
    Editor(EditorAction),
}

impl From<NoTeamAction> for ScreenAction {
    fn from(action: NoTeamAction) -> Self {
        ScreenAction::NoTeam(action)
    }
}

impl From<EditorAction> for ScreenAction {
    fn from(action: EditorAction) -> Self {
        ScreenAction::Editor(action)
    }
}

/// Root state of the team screen
///
/// Two counters outlive every reset: the fetch epoch, so only the latest
/// lookup may mount a child, and the last save generation handed out, so
/// a response or timer from a discarded editor never matches a save made
/// in the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamScreen {
    pub membership: Membership,
    /// Set when the last membership lookup failed
    pub fetch_error: Option<ScreenError>,
    fetch_epoch: u64,
    save_generation: u64,
}

impl TeamScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn no_team(&self) -> Option<&NoTeamForm> {
        match &self.membership {
            Membership::NoTeam(form) => Some(form),
            _ => None,
        }
    }

    pub fn editor(&self) -> Option<&TeamEditor> {
        match &self.membership {
            Membership::Team(editor) => Some(editor),
            _ => None,
        }
    }

    /// Epoch of the most recent membership lookup
    pub fn fetch_epoch(&self) -> u64 {
        self.fetch_epoch
    }

    pub fn reduce(self, action: ScreenAction) -> Step<Self> {
        match action {
            ScreenAction::Mounted => self.refetch(),

            ScreenAction::TeamFetched { epoch, team } => {
                if epoch != self.fetch_epoch {
                    tracing::debug!(epoch, current = self.fetch_epoch, "superseded team fetch");
                    return Step::new(self);
                }
                let mut save_generation = self.save_generation;
                let membership = match team {
                    Some(team) => {
                        save_generation += 1;
                        Membership::Team(TeamEditor::resume(team, save_generation))
                    }
                    None => Membership::NoTeam(NoTeamForm::new()),
                };
                Step::new(Self {
                    membership,
                    fetch_error: None,
                    save_generation,
                    ..self
                })
            }

            ScreenAction::FetchFailed { epoch } => {
                if epoch != self.fetch_epoch {
                    tracing::debug!(epoch, current = self.fetch_epoch, "superseded team fetch");
                    return Step::new(self);
                }
                tracing::error!("{}", ScreenError::FetchFailed);
                Step::new(Self {
                    fetch_error: Some(ScreenError::FetchFailed),
                    ..self
                })
            }

            ScreenAction::RefetchRoot => {
                tracing::info!("refetching team screen state");
                self.refetch()
            }

            ScreenAction::NoTeam(action) => match self.membership {
                Membership::NoTeam(form) => {
                    let step = form.reduce(action);
                    Self {
                        membership: Membership::Unknown,
                        ..self
                    }
                    .lift(step, Membership::NoTeam)
                }
                membership => {
                    tracing::debug!(?action, "form not mounted, dropping action");
                    Step::new(Self { membership, ..self })
                }
            },

            ScreenAction::Editor(action) => match self.membership {
                Membership::Team(editor) => {
                    let step = editor.reduce(action);
                    let save_generation = self.save_generation.max(step.state.generation());
                    Self {
                        membership: Membership::Unknown,
                        save_generation,
                        ..self
                    }
                    .lift(step, Membership::Team)
                }
                membership => {
                    tracing::debug!(?action, "editor not mounted, dropping action");
                    Step::new(Self { membership, ..self })
                }
            },
        }
    }

    /// Drop all child state and start a lookup that supersedes earlier ones
    fn refetch(self) -> Step<Self> {
        let epoch = self.fetch_epoch + 1;
        Step::with(
            Self {
                membership: Membership::Unknown,
                fetch_error: None,
                fetch_epoch: epoch,
                save_generation: self.save_generation,
            },
            vec![Effect::FetchTeam { epoch }],
        )
    }

    /// Wrap a child step, turning a refetch request into a full reset
    fn lift<C>(self, step: Step<C>, wrap: impl FnOnce(C) -> Membership) -> Step<Self> {
        if step.requests_refetch() {
            let mut effects: Vec<Effect> = step
                .effects
                .into_iter()
                .filter(|e| !matches!(e, Effect::RefetchRoot))
                .collect();
            let reset = self.refetch();
            effects.extend(reset.effects);
            return Step::with(reset.state, effects);
        }

        step.map(|child| Self {
            membership: wrap(child),
            ..self
        })
    }
}
