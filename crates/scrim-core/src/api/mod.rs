//! Team API collaborator
//!
//! The screen talks to the server only through [`TeamApi`]. A `false` result
//! is a rejection the server reported; an [`ApiError`] is a transport or
//! server failure.

pub mod http;
pub mod memory;

pub use http::HttpTeamApi;
pub use memory::MemoryTeamApi;

use async_trait::async_trait;
use thiserror::Error;

use crate::team::TeamRecord;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {message}")]
    Request { message: String },
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },
    #[error("Server error: HTTP {status}")]
    Status { status: u16 },
    #[error("Decode error: {message}")]
    Decode { message: String },
}

/// Remote operations the team screen depends on
#[async_trait]
pub trait TeamApi: Send + Sync {
    /// The current user's team, or `None` if they have no team
    async fn get_user_team(&self) -> Result<Option<TeamRecord>, ApiError>;

    /// Create a team named `name` with the current user as its first member
    async fn create_team(&self, name: &str) -> Result<bool, ApiError>;

    /// Join the team called `team_name` using its secret key
    async fn join_team(&self, secret_key: &str, team_name: &str) -> Result<bool, ApiError>;

    /// Persist the editable fields of `record`
    async fn update_team(&self, record: &TeamRecord) -> Result<bool, ApiError>;

    /// Remove the current user from their team
    async fn leave_team(&self) -> Result<bool, ApiError>;
}
