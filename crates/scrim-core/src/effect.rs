//! Side effects requested by the screen reducers

use std::path::PathBuf;

use crate::team::TeamRecord;

/// Work a reducer asks the runtime to perform
///
/// Reducers stay pure: they return effects, and the
/// [`EffectRunner`](crate::runner::EffectRunner) performs them and feeds the
/// outcome back as actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the API for the current user's team; the result carries `epoch`
    FetchTeam { epoch: u64 },
    /// Create a team with the given name
    CreateTeam { name: String },
    /// Join an existing team
    JoinTeam {
        secret_key: String,
        team_name: String,
    },
    /// Persist the record; the outcome is tagged with `generation`
    UpdateTeam { record: TeamRecord, generation: u64 },
    /// Leave the current team
    LeaveTeam,
    /// Read a local file and load it into the bio as a data URI
    ReadBioImage { path: PathBuf },
    /// Abort any pending save-status reset timer
    CancelSaveReset,
    /// Start the save-status reset timer for `generation`
    ScheduleSaveReset { generation: u64 },
    /// Throw away all screen state and fetch it again
    RefetchRoot,
}

/// New state plus the effects it requested
#[derive(Debug)]
#[must_use]
pub struct Step<S> {
    pub state: S,
    pub effects: Vec<Effect>,
}

impl<S> Step<S> {
    /// A transition with no effects
    pub fn new(state: S) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    pub fn with(state: S, effects: Vec<Effect>) -> Self {
        Self { state, effects }
    }

    /// Wrap the state, keeping the effects
    pub fn map<T>(self, f: impl FnOnce(S) -> T) -> Step<T> {
        Step {
            state: f(self.state),
            effects: self.effects,
        }
    }

    pub fn requests_refetch(&self) -> bool {
        self.effects.iter().any(|e| matches!(e, Effect::RefetchRoot))
    }
}
