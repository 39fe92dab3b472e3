//! Team record and the field identifiers used to edit it

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The server-held profile of a team
///
/// `id`, `name` and `team_key` are assigned by the server. Local edits only
/// reach the record through [`TeamField`] and [`ToggleField`], neither of
/// which can address those three fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub id: i64,
    pub name: String,
    /// Secret key other users need (with the name) to join
    pub team_key: String,
    #[serde(default)]
    pub auto_accept_ranked: bool,
    #[serde(default)]
    pub auto_accept_unranked: bool,
    /// Bio text, or an uploaded bio image as a data URI
    #[serde(default)]
    pub bio: String,
    /// Avatar URL
    #[serde(default)]
    pub avatar: String,
    /// Member usernames in server order
    #[serde(default)]
    pub users: Vec<String>,
}

impl TeamRecord {
    /// Get the current value of a text field
    pub fn text(&self, field: TeamField) -> &str {
        match field {
            TeamField::Avatar => &self.avatar,
            TeamField::Bio => &self.bio,
        }
    }

    /// Get the current value of a boolean field
    pub fn flag(&self, field: ToggleField) -> bool {
        match field {
            ToggleField::AutoAcceptRanked => self.auto_accept_ranked,
            ToggleField::AutoAcceptUnranked => self.auto_accept_unranked,
        }
    }

    /// Return a copy with `field` set to `value`
    pub fn with_text(mut self, field: TeamField, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            TeamField::Avatar => self.avatar = value,
            TeamField::Bio => self.bio = value,
        }
        self
    }

    /// Return a copy with `field` flipped
    pub fn toggled(mut self, field: ToggleField) -> Self {
        match field {
            ToggleField::AutoAcceptRanked => self.auto_accept_ranked = !self.auto_accept_ranked,
            ToggleField::AutoAcceptUnranked => {
                self.auto_accept_unranked = !self.auto_accept_unranked
            }
        }
        self
    }

    /// Whether the bio currently holds an uploaded image
    pub fn bio_is_image(&self) -> bool {
        self.bio.starts_with("data:")
    }
}

/// Error returned when parsing an unknown field identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field identifier: {0}")]
pub struct UnknownField(pub String);

/// Client-editable text fields of a [`TeamRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeamField {
    Avatar,
    Bio,
}

impl TeamField {
    pub const ALL: [TeamField; 2] = [TeamField::Avatar, TeamField::Bio];

    /// Wire identifier of the field
    pub fn id(&self) -> &'static str {
        match self {
            TeamField::Avatar => "avatar",
            TeamField::Bio => "bio",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            TeamField::Avatar => "Team Avatar URL",
            TeamField::Bio => "Team Bio",
        }
    }

    /// Whether the field accepts multiple lines
    pub fn is_multiline(&self) -> bool {
        matches!(self, TeamField::Bio)
    }
}

impl fmt::Display for TeamField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TeamField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "avatar" => Ok(TeamField::Avatar),
            "bio" => Ok(TeamField::Bio),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// Client-editable boolean fields of a [`TeamRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleField {
    AutoAcceptRanked,
    AutoAcceptUnranked,
}

impl ToggleField {
    pub const ALL: [ToggleField; 2] = [
        ToggleField::AutoAcceptRanked,
        ToggleField::AutoAcceptUnranked,
    ];

    /// Wire identifier of the field
    pub fn id(&self) -> &'static str {
        match self {
            ToggleField::AutoAcceptRanked => "auto_accept_ranked",
            ToggleField::AutoAcceptUnranked => "auto_accept_unranked",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ToggleField::AutoAcceptRanked => "Auto-accept ranked matches.",
            ToggleField::AutoAcceptUnranked => "Auto-accept scrimmages.",
        }
    }
}

impl fmt::Display for ToggleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ToggleField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto_accept_ranked" => Ok(ToggleField::AutoAcceptRanked),
            "auto_accept_unranked" => Ok(ToggleField::AutoAcceptUnranked),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn falcons() -> TeamRecord {
        TeamRecord {
            id: 7,
            name: "Falcons".to_string(),
            team_key: "k3y".to_string(),
            users: vec!["ada".to_string(), "grace".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_with_text_leaves_identity_alone() {
        let team = falcons().with_text(TeamField::Avatar, "http://x/y.png");
        assert_eq!(team.avatar, "http://x/y.png");
        assert_eq!(team.name, "Falcons");
        assert_eq!(team.team_key, "k3y");
        assert_eq!(team.id, 7);
    }

    #[test]
    fn test_double_toggle_is_identity() {
        for field in ToggleField::ALL {
            let team = falcons();
            let original = team.flag(field);
            let twice = team.toggled(field).toggled(field);
            assert_eq!(twice.flag(field), original);
        }
    }

    #[test]
    fn test_field_ids_parse_back() {
        for field in TeamField::ALL {
            assert_eq!(field.id().parse::<TeamField>().unwrap(), field);
        }
        for field in ToggleField::ALL {
            assert_eq!(field.id().parse::<ToggleField>().unwrap(), field);
        }
        assert!("name".parse::<TeamField>().is_err());
        assert!("team_key".parse::<TeamField>().is_err());
    }

    #[test]
    fn test_deserialize_with_missing_optional_fields() {
        let json = r#"{"id": 3, "name": "Owls", "team_key": "abc"}"#;
        let team: TeamRecord = serde_json::from_str(json).unwrap();
        assert_eq!(team.name, "Owls");
        assert!(team.users.is_empty());
        assert!(!team.auto_accept_unranked);
    }

    #[test]
    fn test_bio_is_image() {
        let team = falcons().with_text(TeamField::Bio, "data:image/png;base64,AAAA");
        assert!(team.bio_is_image());
        assert!(!falcons().bio_is_image());
    }
}
