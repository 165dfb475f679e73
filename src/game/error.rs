//! The closed set of rule violations.
//!
//! Every engine operation reports failure as one of these tags and leaves
//! the game value untouched. The session layer surfaces tags to clients
//! verbatim; none of them is used for control flow inside the engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A rejected operation. The game state is unchanged.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameError {
    /// `start_game` needs at least two players.
    #[error("a game needs at least two players to start")]
    NotEnoughPlayers,

    /// The operation requires a game in progress.
    #[error("the game is not in progress")]
    GameNotPlaying,

    /// Players can only join, and the game only start, before the deal.
    #[error("the game has already started")]
    GameAlreadyStarted,

    /// A player with this id is already seated.
    #[error("a player with this id has already joined")]
    AlreadyJoined,

    /// No player with this id is in the game.
    #[error("player not found")]
    PlayerNotFound,

    /// Another player is to act.
    #[error("it is not your turn")]
    NotYourTurn,

    /// `play_card` was called with no indices.
    #[error("no cards selected")]
    NoCardsSelected,

    /// The same hand index was selected twice.
    #[error("duplicate card indices")]
    DuplicateCardIndices,

    /// An index does not point at a card in the hand.
    #[error("card index out of bounds")]
    InvalidCardIndex,

    /// The first selected card does not match the current card.
    #[error("the first card does not match the current card")]
    FirstCardInvalid,

    /// Multi-card plays must all share the first card's rank.
    #[error("stacked cards must all share the same rank")]
    CanOnlyStackSameRank,

    /// A pickup-2 penalty is pending; only 2s may be played.
    #[error("a pickup penalty is pending: play 2s or draw")]
    MustPlayTwos,

    /// A black-jack penalty is pending; only Jacks may be played.
    #[error("a pickup penalty is pending: play Jacks or draw")]
    MustPlayJacks,

    /// Drawing is forbidden while a legal play exists.
    #[error("you have a valid card to play")]
    MustPlayValidCard,

    /// `nominate_suit` is only legal directly after playing an Ace.
    #[error("no ace awaiting a suit nomination")]
    NoAcePlayed,

    /// An Ace was played; its player must nominate before anything else.
    #[error("a suit nomination is pending")]
    MustNominateSuit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(GameError::NotYourTurn.to_string(), "it is not your turn");
        assert_eq!(
            GameError::MustPlayTwos.to_string(),
            "a pickup penalty is pending: play 2s or draw"
        );
    }

    #[test]
    fn test_serde_tags() {
        let json = serde_json::to_string(&GameError::MustPlayValidCard).unwrap();
        assert_eq!(json, "\"MustPlayValidCard\"");
        let back: GameError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, GameError::MustPlayValidCard);
    }
}
