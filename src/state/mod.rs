//! Runtime match state: gods, players, statuses and the full snapshot.

pub mod god;
pub mod match_state;
pub mod player;
pub mod status;

pub use god::{GodState, WeaknessOverride};
pub use match_state::{MatchState, MatchStatus, PendingChoice};
pub use player::PlayerState;
pub use status::{StatusEntry, StatusKind};
