//! Card values and their rule classification.
//!
//! ## Card
//!
//! An immutable (suit, rank) pair. Exactly 52 distinct values exist; the
//! engine never creates a 53rd or destroys one (see the conservation
//! invariant enforced by [`crate::game::Game`]).
//!
//! ## Effects
//!
//! A card's special effect is a function of its rank alone, except Jacks,
//! where color decides between stacking a penalty (black) and countering
//! one (red).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// All four suits, in canonical order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Red suits are Hearts and Diamonds.
    #[must_use]
    pub fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        };
        write!(f, "{symbol}")
    }
}

/// Card rank. Thirteen values, Two through Ace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// All thirteen ranks, in canonical order.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        };
        write!(f, "{symbol}")
    }
}

/// Special effect a card applies when played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Rank 2: next player picks up 2 (stackable).
    PickupTwo,
    /// Rank 7: skip the next player (stackable).
    SkipTurn,
    /// Queen: reverse play direction.
    ReverseDirection,
    /// Jack: black stacks a pickup-5 penalty, red counters one.
    JackEffect,
    /// Ace: nominate the suit the next player must follow.
    ChooseSuit,
}

/// An immutable playing card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Card suit.
    pub suit: Suit,
    /// Card rank.
    pub rank: Rank,
}

impl Card {
    /// Number of cards in the full universe.
    pub const FULL_DECK_SIZE: usize = 52;

    /// Create a card.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Whether this card may be played on top of `current`.
    ///
    /// Legal on a suit match, a rank match, or when this card is an Ace
    /// (Aces are always legal to lead).
    #[must_use]
    pub fn can_play_on(self, current: Card) -> bool {
        self.rank == Rank::Ace || self.suit == current.suit || self.rank == current.rank
    }

    /// The special effect this card carries, if any.
    #[must_use]
    pub fn effect(self) -> Option<Effect> {
        match self.rank {
            Rank::Two => Some(Effect::PickupTwo),
            Rank::Seven => Some(Effect::SkipTurn),
            Rank::Queen => Some(Effect::ReverseDirection),
            Rank::Jack => Some(Effect::JackEffect),
            Rank::Ace => Some(Effect::ChooseSuit),
            _ => None,
        }
    }

    /// Jack of Clubs or Spades.
    #[must_use]
    pub fn is_black_jack(self) -> bool {
        self.rank == Rank::Jack && !self.suit.is_red()
    }

    /// Jack of Hearts or Diamonds.
    #[must_use]
    pub fn is_red_jack(self) -> bool {
        self.rank == Rank::Jack && self.suit.is_red()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_play_on_suit_match() {
        let three_hearts = Card::new(Suit::Hearts, Rank::Three);
        let king_hearts = Card::new(Suit::Hearts, Rank::King);
        assert!(three_hearts.can_play_on(king_hearts));
    }

    #[test]
    fn test_can_play_on_rank_match() {
        let three_hearts = Card::new(Suit::Hearts, Rank::Three);
        let three_spades = Card::new(Suit::Spades, Rank::Three);
        assert!(three_hearts.can_play_on(three_spades));
    }

    #[test]
    fn test_can_play_on_mismatch() {
        let three_hearts = Card::new(Suit::Hearts, Rank::Three);
        let king_spades = Card::new(Suit::Spades, Rank::King);
        assert!(!three_hearts.can_play_on(king_spades));
    }

    #[test]
    fn test_ace_always_playable() {
        let ace = Card::new(Suit::Diamonds, Rank::Ace);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                assert!(ace.can_play_on(Card::new(suit, rank)));
            }
        }
    }

    #[test]
    fn test_effects_by_rank() {
        let c = |rank| Card::new(Suit::Hearts, rank);
        assert_eq!(c(Rank::Two).effect(), Some(Effect::PickupTwo));
        assert_eq!(c(Rank::Seven).effect(), Some(Effect::SkipTurn));
        assert_eq!(c(Rank::Queen).effect(), Some(Effect::ReverseDirection));
        assert_eq!(c(Rank::Jack).effect(), Some(Effect::JackEffect));
        assert_eq!(c(Rank::Ace).effect(), Some(Effect::ChooseSuit));
        assert_eq!(c(Rank::Three).effect(), None);
        assert_eq!(c(Rank::King).effect(), None);
    }

    #[test]
    fn test_jack_colors() {
        assert!(Card::new(Suit::Clubs, Rank::Jack).is_black_jack());
        assert!(Card::new(Suit::Spades, Rank::Jack).is_black_jack());
        assert!(Card::new(Suit::Hearts, Rank::Jack).is_red_jack());
        assert!(Card::new(Suit::Diamonds, Rank::Jack).is_red_jack());

        assert!(!Card::new(Suit::Hearts, Rank::Jack).is_black_jack());
        assert!(!Card::new(Suit::Clubs, Rank::Queen).is_black_jack());
        assert!(!Card::new(Suit::Hearts, Rank::Queen).is_red_jack());
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::new(Suit::Hearts, Rank::Three).to_string(), "3♥");
        assert_eq!(Card::new(Suit::Spades, Rank::Queen).to_string(), "Q♠");
        assert_eq!(Card::new(Suit::Diamonds, Rank::Ten).to_string(), "10♦");
    }

    #[test]
    fn test_universe_size() {
        assert_eq!(Suit::ALL.len() * Rank::ALL.len(), Card::FULL_DECK_SIZE);
    }

    #[test]
    fn test_serde_round_trip() {
        let card = Card::new(Suit::Clubs, Rank::Jack);
        let json = serde_json::to_string(&card).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
