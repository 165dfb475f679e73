//! # rachel-engine
//!
//! A pure rules engine for Rachel, a multi-player shedding card game with
//! special-effect cards, stacking pickup penalties, and direction reversal.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: Every operation is a total function from
//!    `(&Game, arguments)` to `Result<Game, GameError>`. Nothing is mutated
//!    in place; a failed call leaves the original value untouched.
//!
//! 2. **Card conservation**: The 52-card universe is never added to or
//!    shrunk. Hands, draw pile, discard pile, and the face-up card always
//!    sum to 52 once play has started.
//!
//! 3. **Closed enums everywhere**: Status, direction, penalty kind, and
//!    nomination are sum types with exhaustive matches, so extending the
//!    rules is a compile-time-checked change.
//!
//! 4. **Deterministic by seed**: All randomness flows through a seeded,
//!    serializable RNG, so games replay identically from a seed or a
//!    persisted snapshot.
//!
//! The engine has no I/O, no logging, and no internal concurrency; a
//! surrounding session layer is expected to serialize calls per game id and
//! surface [`GameError`] tags to clients verbatim.
//!
//! ## Modules
//!
//! - `core`: Deterministic RNG
//! - `cards`: Suits, ranks, and special-effect classification
//! - `deck`: Draw pile and discard recycling
//! - `game`: Players, errors, and the `Game` state machine
//!
//! ## Example
//!
//! ```
//! use rachel_engine::{Game, GameStatus};
//!
//! let game = Game::with_seed(42)
//!     .add_player("alice", "Alice", false)?
//!     .add_player("bob", "Bob", false)?
//!     .start_game()?;
//!
//! assert_eq!(game.status(), GameStatus::Playing);
//! let player = game.current_player().unwrap();
//! assert_eq!(player.hand_size(), 7);
//! # Ok::<(), rachel_engine::GameError>(())
//! ```

pub mod cards;
pub mod core;
pub mod deck;
pub mod game;

// Re-export commonly used types
pub use crate::cards::{Card, Effect, Rank, Suit};
pub use crate::core::{GameRng, GameRngState};
pub use crate::deck::Deck;
pub use crate::game::{
    Direction, Game, GameError, GameId, GameStatus, Nomination, PickupKind, Player, PlayerId,
};
