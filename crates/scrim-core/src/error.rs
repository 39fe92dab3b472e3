//! Error types for scrim-core

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// Result type alias for scrim operations
pub type Result<T> = std::result::Result<T, ScrimError>;

/// Main error type for scrim operations
#[derive(Error, Debug)]
pub enum ScrimError {
    /// Team API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures the team screen knows how to report
///
/// The messages of `CreateConflict` and `JoinRejected` are shown verbatim as
/// the form banners.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenError {
    /// The requested team name is taken
    #[error("Sorry, this team name is already being used.")]
    CreateConflict,

    /// The secret key and team name do not match a team
    #[error("Sorry, that team name and secret key combination is not valid.")]
    JoinRejected,

    /// The update call did not succeed
    #[error("Saving the team profile failed.")]
    SaveFailed,

    /// The leave call did not succeed
    #[error("Leaving the team failed.")]
    LeaveFailed,

    /// The initial team lookup did not succeed
    #[error("Could not load the current team.")]
    FetchFailed,
}
