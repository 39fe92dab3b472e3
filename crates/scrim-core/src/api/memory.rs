//! In-memory team API
//!
//! Models the server side for a single signed-in user. Backs the tests and
//! the demo mode of the TUI when no API URL is configured.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::{ApiError, TeamApi};
use crate::team::TeamRecord;

#[derive(Debug, Default)]
struct MemoryState {
    /// Teams keyed by name
    teams: BTreeMap<String, TeamRecord>,
    /// Name of the current user's team
    current: Option<String>,
    next_id: i64,
    reject_updates: bool,
    reject_leave: bool,
}

impl MemoryState {
    fn insert_team(&mut self, name: &str, members: Vec<String>) -> TeamRecord {
        self.next_id += 1;
        let team = TeamRecord {
            id: self.next_id,
            name: name.to_string(),
            team_key: secret_key_for(self.next_id, name),
            users: members,
            ..Default::default()
        };
        self.teams.insert(name.to_string(), team.clone());
        team
    }
}

/// Deterministic secret key so demo sessions and tests are reproducible
fn secret_key_for(id: i64, name: &str) -> String {
    let checksum = name
        .bytes()
        .fold(id as u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
    format!("{:08x}", checksum)
}

/// [`TeamApi`] holding all teams in process memory
#[derive(Debug)]
pub struct MemoryTeamApi {
    username: String,
    state: Mutex<MemoryState>,
}

impl MemoryTeamApi {
    /// Create an empty server where `username` has no team
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            state: Mutex::new(MemoryState::default()),
        }
    }

    /// Add a team owned by other users; returns the stored record
    pub fn seed_team(&self, name: &str, members: &[&str]) -> TeamRecord {
        let members = members.iter().map(|m| m.to_string()).collect();
        self.lock().insert_team(name, members)
    }

    /// Create a team with the current user as its only member
    pub fn with_team(self, name: &str) -> Self {
        {
            let mut state = self.lock();
            state.insert_team(name, vec![self.username.clone()]);
            state.current = Some(name.to_string());
        }
        self
    }

    /// Make subsequent updates report rejection
    pub fn set_reject_updates(&self, reject: bool) {
        self.lock().reject_updates = reject;
    }

    /// Make subsequent leave calls report rejection
    pub fn set_reject_leave(&self, reject: bool) {
        self.lock().reject_leave = reject;
    }

    /// Stored copy of a team, as the server sees it
    pub fn team(&self, name: &str) -> Option<TeamRecord> {
        self.lock().teams.get(name).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // Every call leaves the state consistent, so poisoning is ignored
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl TeamApi for MemoryTeamApi {
    async fn get_user_team(&self) -> Result<Option<TeamRecord>, ApiError> {
        let state = self.lock();
        Ok(state
            .current
            .as_ref()
            .and_then(|name| state.teams.get(name))
            .cloned())
    }

    async fn create_team(&self, name: &str) -> Result<bool, ApiError> {
        let mut state = self.lock();
        if name.trim().is_empty() || state.current.is_some() || state.teams.contains_key(name) {
            return Ok(false);
        }
        state.insert_team(name, vec![self.username.clone()]);
        state.current = Some(name.to_string());
        Ok(true)
    }

    async fn join_team(&self, secret_key: &str, team_name: &str) -> Result<bool, ApiError> {
        let mut state = self.lock();
        if state.current.is_some() {
            return Ok(false);
        }
        let key_matches = state
            .teams
            .get(team_name)
            .is_some_and(|team| team.team_key == secret_key);
        if !key_matches {
            return Ok(false);
        }
        if let Some(team) = state.teams.get_mut(team_name) {
            team.users.push(self.username.clone());
        }
        state.current = Some(team_name.to_string());
        Ok(true)
    }

    async fn update_team(&self, record: &TeamRecord) -> Result<bool, ApiError> {
        let mut state = self.lock();
        if state.reject_updates || state.current.as_deref() != Some(record.name.as_str()) {
            return Ok(false);
        }
        let Some(stored) = state.teams.get_mut(&record.name) else {
            return Ok(false);
        };
        // Identity and membership stay server-owned
        stored.auto_accept_ranked = record.auto_accept_ranked;
        stored.auto_accept_unranked = record.auto_accept_unranked;
        stored.bio = record.bio.clone();
        stored.avatar = record.avatar.clone();
        Ok(true)
    }

    async fn leave_team(&self) -> Result<bool, ApiError> {
        let mut state = self.lock();
        if state.reject_leave {
            return Ok(false);
        }
        let Some(name) = state.current.take() else {
            return Ok(false);
        };
        let username = self.username.clone();
        if let Some(team) = state.teams.get_mut(&name) {
            team.users.retain(|u| *u != username);
        }
        Ok(true)
    }
}
