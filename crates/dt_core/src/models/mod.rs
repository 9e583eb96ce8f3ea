pub mod events;
pub mod player;
pub mod roster;

pub use events::{format_match_time, ActionEvent, MatchLog, Outcome};
pub use player::{Player, Position, RoleGroup};
pub use roster::{Roster, RosterViolation, MIN_SQUAD_SIZE};
