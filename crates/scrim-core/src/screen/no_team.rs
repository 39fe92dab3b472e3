//! Create-or-join form shown to users without a team

use std::fmt;
use std::str::FromStr;

use crate::effect::{Effect, Step};
use crate::error::ScreenError;
use crate::team::UnknownField;

/// Text inputs of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoTeamField {
    /// Name for a new team
    TeamName,
    /// Secret key of the team to join
    SecretKey,
    /// Name of the team to join
    TeamJoinName,
}

impl NoTeamField {
    pub const ALL: [NoTeamField; 3] = [
        NoTeamField::TeamName,
        NoTeamField::SecretKey,
        NoTeamField::TeamJoinName,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            NoTeamField::TeamName => "team_name",
            NoTeamField::SecretKey => "secret_key",
            NoTeamField::TeamJoinName => "team_join_name",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NoTeamField::TeamName => "Team Name",
            NoTeamField::SecretKey => "Team Secret Key",
            NoTeamField::TeamJoinName => "Team Name",
        }
    }
}

impl fmt::Display for NoTeamField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for NoTeamField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.id() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Actions handled by [`NoTeamForm::reduce`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoTeamAction {
    /// An input's current value changed
    FieldChanged { field: NoTeamField, value: String },
    /// The create button was pressed
    CreateSubmitted,
    /// The create call finished
    CreateResolved { success: bool },
    /// The join button was pressed
    JoinSubmitted,
    /// The join call finished
    JoinResolved { success: bool },
}

/// Form state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoTeamForm {
    pub team_name: String,
    pub secret_key: String,
    pub team_join_name: String,
    pub join_error: bool,
    pub create_error: bool,
}

impl NoTeamForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: NoTeamField) -> &str {
        match field {
            NoTeamField::TeamName => &self.team_name,
            NoTeamField::SecretKey => &self.secret_key,
            NoTeamField::TeamJoinName => &self.team_join_name,
        }
    }

    /// Banner under the create card, if the last create attempt failed
    pub fn create_banner(&self) -> Option<ScreenError> {
        self.create_error.then_some(ScreenError::CreateConflict)
    }

    /// Banner under the join card, if the last join attempt failed
    pub fn join_banner(&self) -> Option<ScreenError> {
        self.join_error.then_some(ScreenError::JoinRejected)
    }

    pub fn reduce(self, action: NoTeamAction) -> Step<Self> {
        match action {
            NoTeamAction::FieldChanged { field, value } => {
                let mut form = self;
                match field {
                    NoTeamField::TeamName => form.team_name = value,
                    NoTeamField::SecretKey => form.secret_key = value,
                    NoTeamField::TeamJoinName => form.team_join_name = value,
                }
                Step::new(form)
            }

            NoTeamAction::CreateSubmitted => {
                let effect = Effect::CreateTeam {
                    name: self.team_name.clone(),
                };
                Step::with(self, vec![effect])
            }

            NoTeamAction::CreateResolved { success } => {
                let form = Self {
                    create_error: !success,
                    ..self
                };
                if success {
                    Step::with(form, vec![Effect::RefetchRoot])
                } else {
                    tracing::info!(team_name = %form.team_name, "{}", ScreenError::CreateConflict);
                    Step::new(form)
                }
            }

            NoTeamAction::JoinSubmitted => {
                let effect = Effect::JoinTeam {
                    secret_key: self.secret_key.clone(),
                    team_name: self.team_join_name.clone(),
                };
                Step::with(self, vec![effect])
            }

            NoTeamAction::JoinResolved { success } => {
                let form = Self {
                    join_error: !success,
                    ..self
                };
                if success {
                    Step::with(form, vec![Effect::RefetchRoot])
                } else {
                    tracing::info!(team_name = %form.team_join_name, "{}", ScreenError::JoinRejected);
                    Step::new(form)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(field: NoTeamField, value: &str) -> NoTeamAction {
        NoTeamAction::FieldChanged {
            field,
            value: value.to_string(),
        }
    }

    #[test]
    fn test_initial_state() {
        let form = NoTeamForm::new();
        assert!(form.team_name.is_empty());
        assert!(!form.create_error);
        assert!(!form.join_error);
        assert_eq!(form.create_banner(), None);
    }

    #[test]
    fn test_field_changed_is_verbatim() {
        let form = NoTeamForm::new()
            .reduce(typed(NoTeamField::TeamName, "  Falcons "))
            .state;
        assert_eq!(form.team_name, "  Falcons ");
        assert_eq!(form.value(NoTeamField::TeamName), "  Falcons ");
    }

    #[test]
    fn test_create_submitted_requests_api_call() {
        let form = NoTeamForm::new()
            .reduce(typed(NoTeamField::TeamName, "Falcons"))
            .state;
        let step = form.reduce(NoTeamAction::CreateSubmitted);
        assert_eq!(
            step.effects,
            vec![Effect::CreateTeam {
                name: "Falcons".to_string()
            }]
        );
    }

    #[test]
    fn test_create_rejected_shows_banner_and_keeps_name() {
        let form = NoTeamForm::new()
            .reduce(typed(NoTeamField::TeamName, "Falcons"))
            .state;
        let step = form.reduce(NoTeamAction::CreateResolved { success: false });
        assert!(step.effects.is_empty());
        assert!(step.state.create_error);
        assert_eq!(step.state.team_name, "Falcons");
        assert_eq!(
            step.state.create_banner().unwrap().to_string(),
            "Sorry, this team name is already being used."
        );
    }

    #[test]
    fn test_create_success_refetches() {
        let step = NoTeamForm::new().reduce(NoTeamAction::CreateResolved { success: true });
        assert!(step.requests_refetch());
        assert!(!step.state.create_error);
    }

    #[test]
    fn test_join_failure_leaves_create_error_alone() {
        for create_error in [false, true] {
            let form = NoTeamForm {
                create_error,
                ..Default::default()
            };
            let step = form.reduce(NoTeamAction::JoinResolved { success: false });
            assert!(step.state.join_error);
            assert_eq!(step.state.create_error, create_error);
        }
    }

    #[test]
    fn test_join_submitted_uses_join_fields() {
        let form = NoTeamForm::new()
            .reduce(typed(NoTeamField::TeamName, "ignored"))
            .state
            .reduce(typed(NoTeamField::SecretKey, "s3cret"))
            .state
            .reduce(typed(NoTeamField::TeamJoinName, "Owls"))
            .state;
        let step = form.reduce(NoTeamAction::JoinSubmitted);
        assert_eq!(
            step.effects,
            vec![Effect::JoinTeam {
                secret_key: "s3cret".to_string(),
                team_name: "Owls".to_string(),
            }]
        );
    }

    #[test]
    fn test_error_persists_until_next_resolution() {
        let form = NoTeamForm::new()
            .reduce(NoTeamAction::CreateResolved { success: false })
            .state
            .reduce(typed(NoTeamField::TeamName, "Hawks"))
            .state
            .reduce(NoTeamAction::CreateSubmitted)
            .state;
        assert!(form.create_error);

        let form = form
            .reduce(NoTeamAction::CreateResolved { success: true })
            .state;
        assert!(!form.create_error);
    }

    #[test]
    fn test_field_ids_parse() {
        for field in NoTeamField::ALL {
            assert_eq!(field.id().parse::<NoTeamField>().unwrap(), field);
        }
        assert!("avatar".parse::<NoTeamField>().is_err());
    }
}
