//! Profile editor shown to users with a team

use std::fmt;
use std::path::PathBuf;

use crate::effect::{Effect, Step};
use crate::error::ScreenError;
use crate::team::{TeamField, TeamRecord, ToggleField};

/// Feedback shown on the save button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Success,
    Failure,
}

impl SaveStatus {
    /// Button label for this status
    pub fn label(&self) -> &'static str {
        match self {
            SaveStatus::Idle => "Update Info",
            SaveStatus::Saving => "Saving...",
            SaveStatus::Success => "Saved",
            SaveStatus::Failure => "Failed",
        }
    }
}

impl fmt::Display for SaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Actions handled by [`TeamEditor::reduce`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    /// A text input's current value changed
    FieldChanged { field: TeamField, value: String },
    /// A checkbox was clicked
    ToggleChanged { field: ToggleField },
    /// The user picked a local file as the bio image
    BioImageRequested { path: PathBuf },
    /// The picked file finished encoding
    BioImageLoaded { data_uri: String },
    /// The save button was pressed
    SaveStarted,
    /// The update call for save `generation` finished
    SaveResolved { generation: u64, success: bool },
    /// The reset timer for save `generation` expired
    SaveTimeout { generation: u64 },
    /// The leave button was pressed
    LeaveRequested,
    /// The leave call finished
    LeaveResolved { success: bool },
}

/// Editor state: a working copy of the team plus save feedback
///
/// Every save bumps `generation`. Responses and timers carry the generation
/// they belong to, and only the latest one may change `save_status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamEditor {
    pub team: TeamRecord,
    pub save_status: SaveStatus,
    generation: u64,
}

impl TeamEditor {
    /// Seed the editor from a fetched record
    pub fn new(team: TeamRecord) -> Self {
        Self {
            team,
            save_status: SaveStatus::Idle,
            generation: 0,
        }
    }

    /// Seed the editor with saves numbered after `generation`
    ///
    /// Responses tagged with `generation` or lower are treated as stale.
    pub fn resume(team: TeamRecord, generation: u64) -> Self {
        Self {
            generation,
            ..Self::new(team)
        }
    }

    /// Generation of the most recent save
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn reduce(self, action: EditorAction) -> Step<Self> {
        match action {
            EditorAction::FieldChanged { field, value } => Step::new(Self {
                team: self.team.with_text(field, value),
                ..self
            }),

            EditorAction::ToggleChanged { field } => Step::new(Self {
                team: self.team.toggled(field),
                ..self
            }),

            EditorAction::BioImageRequested { path } => {
                Step::with(self, vec![Effect::ReadBioImage { path }])
            }

            // The image replaces the bio text; both share the `bio` field
            EditorAction::BioImageLoaded { data_uri } => Step::new(Self {
                team: self.team.with_text(TeamField::Bio, data_uri),
                ..self
            }),

            EditorAction::SaveStarted => {
                let generation = self.generation + 1;
                let effects = vec![
                    Effect::CancelSaveReset,
                    Effect::UpdateTeam {
                        record: self.team.clone(),
                        generation,
                    },
                ];
                Step::with(
                    Self {
                        save_status: SaveStatus::Saving,
                        generation,
                        ..self
                    },
                    effects,
                )
            }

            EditorAction::SaveResolved {
                generation,
                success,
            } => {
                if generation != self.generation {
                    tracing::debug!(generation, current = self.generation, "stale save response");
                    return Step::new(self);
                }
                let save_status = if success {
                    SaveStatus::Success
                } else {
                    tracing::warn!(team = %self.team.name, "{}", ScreenError::SaveFailed);
                    SaveStatus::Failure
                };
                Step::with(
                    Self {
                        save_status,
                        ..self
                    },
                    vec![Effect::ScheduleSaveReset { generation }],
                )
            }

            EditorAction::SaveTimeout { generation } => {
                if generation != self.generation {
                    tracing::debug!(generation, current = self.generation, "stale save timer");
                    return Step::new(self);
                }
                Step::new(Self {
                    save_status: SaveStatus::Idle,
                    ..self
                })
            }

            EditorAction::LeaveRequested => Step::with(self, vec![Effect::LeaveTeam]),

            EditorAction::LeaveResolved { success } => {
                if success {
                    Step::with(self, vec![Effect::RefetchRoot])
                } else {
                    tracing::warn!(team = %self.team.name, "{}", ScreenError::LeaveFailed);
                    Step::new(self)
                }
            }
        }
    }
}
