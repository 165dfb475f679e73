//! The game state machine and its participants.

pub mod error;
pub mod player;
pub mod state;

pub use error::GameError;
pub use player::{Player, PlayerId};
pub use state::{Direction, Game, GameId, GameStatus, Nomination, PickupKind};
