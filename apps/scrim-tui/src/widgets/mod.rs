//! Custom widgets

mod mode_indicator;
mod team_card;

pub use mode_indicator::ModeIndicator;
pub use team_card::TeamCard;
