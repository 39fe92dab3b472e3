//! Scrim Core - team management screen for competition clients
//!
//! A headless model of the team screen. Front-ends render [`TeamScreen`] and
//! feed user input into a [`Store`]:
//!
//! - **Team**: the `TeamRecord` profile and the identifiers of its editable fields
//! - **Screen**: pure reducers for the container, the create/join form and the editor
//! - **Effect**: side effects the reducers request (API calls, file reads, timers)
//! - **Runner**: performs effects on tokio and queues their outcomes as actions
//! - **Store**: owns the state and drives reducer and runner
//! - **Api**: the `TeamApi` collaborator with HTTP and in-memory implementations
//! - **Config**: API connection and editor timing settings
//!
//! # Architecture
//!
//! ```text
//! input ─▶ Store::dispatch ─▶ reduce ─▶ new state
//!                                  └──▶ effects ─▶ EffectRunner ─▶ action queue
//!                                                                   │
//! Store::pump / Store::next ◀───────────────────────────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod data_uri;
pub mod effect;
pub mod error;
pub mod runner;
pub mod screen;
pub mod store;
pub mod team;

pub use api::{ApiError, HttpTeamApi, MemoryTeamApi, TeamApi};
pub use config::{ApiConfig, ConfigError, EditorConfig, ScrimConfig};
pub use effect::{Effect, Step};
pub use error::{Result, ScreenError, ScrimError};
pub use runner::EffectRunner;
pub use screen::{
    EditorAction, Membership, NoTeamAction, NoTeamField, NoTeamForm, SaveStatus, ScreenAction,
    TeamEditor, TeamScreen,
};
pub use store::Store;
pub use team::{TeamField, TeamRecord, ToggleField, UnknownField};

use std::sync::Arc;

/// Build the team API selected by `config`
///
/// Without a base URL the screen runs against an in-memory demo server.
pub fn connect(config: &ApiConfig, username: &str) -> Result<Arc<dyn TeamApi>> {
    match &config.base_url {
        Some(url) => {
            tracing::info!(%url, "using HTTP team API");
            Ok(Arc::new(HttpTeamApi::new(config)?))
        }
        None => {
            tracing::warn!("No API base URL configured, using in-memory demo server");
            Ok(Arc::new(MemoryTeamApi::new(username)))
        }
    }
}
