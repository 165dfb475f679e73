//! Participant records.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::Card;

/// Player identifier, unique within a game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a player id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A participant in a game.
///
/// The hand is index-addressable for the play-by-index API, but its order
/// carries no rule meaning. Hands are empty until the game starts and are
/// mutated only by play and draw operations on this player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub(crate) id: PlayerId,
    pub(crate) display_name: String,
    pub(crate) hand: Vector<Card>,
    pub(crate) is_ai: bool,
    pub(crate) connected: bool,
}

impl Player {
    /// Create a player with an empty hand.
    #[must_use]
    pub fn new(id: impl Into<PlayerId>, display_name: impl Into<String>, is_ai: bool) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            hand: Vector::new(),
            is_ai,
            connected: true,
        }
    }

    /// Player id.
    #[must_use]
    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Current hand.
    #[must_use]
    pub fn hand(&self) -> &Vector<Card> {
        &self.hand
    }

    /// Number of cards held.
    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    /// Whether this seat is driven by an AI.
    #[must_use]
    pub fn is_ai(&self) -> bool {
        self.is_ai
    }

    /// Whether the player's client is currently connected.
    #[must_use]
    pub fn connected(&self) -> bool {
        self.connected
    }
}
