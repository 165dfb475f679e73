//! The draw pile.
//!
//! A [`Deck`] is the ordered, undealt portion of the 52-card universe. It is
//! created once per game as a uniformly shuffled full set, then only ever
//! consumed by dealing and draws, or rebuilt by [`Deck::recycle`] from the
//! discard pile. The deck never decides *what* to recycle; only the game
//! knows which card must stay out (the face-up current card).

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank, Suit};
use crate::core::GameRng;

/// Ordered draw pile. Cards are drawn from the front.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    draw_pile: Vector<Card>,
}

impl Deck {
    /// An empty deck, used before a game starts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The full 52-card universe in a uniformly randomized order.
    #[must_use]
    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut cards: Vec<Card> = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(suit, rank)))
            .collect();
        rng.shuffle(&mut cards);
        Self {
            draw_pile: cards.into_iter().collect(),
        }
    }

    /// Build a deck from explicit cards, front first.
    pub(crate) fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            draw_pile: cards.into_iter().collect(),
        }
    }

    /// Number of undrawn cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.draw_pile.len()
    }

    /// Whether the draw pile is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.draw_pile.is_empty()
    }

    /// Remove up to `n` cards from the front.
    ///
    /// Returns the drawn cards and the remaining deck. If fewer than `n`
    /// cards remain, the caller must recycle the discard pile and draw the
    /// shortfall from the rebuilt deck.
    #[must_use]
    pub fn draw(&self, n: usize) -> (Vec<Card>, Deck) {
        let take = n.min(self.draw_pile.len());
        let (front, rest) = self.draw_pile.clone().split_at(take);
        (
            front.into_iter().collect(),
            Deck { draw_pile: rest },
        )
    }

    /// Rebuild the draw pile by shuffling `discard` beneath the remaining
    /// cards.
    ///
    /// The remaining undrawn cards keep their order on top; the recycled
    /// cards enter in a fresh random order below them. The caller passes the
    /// discard pile *excluding* the face-up current card.
    #[must_use]
    pub fn recycle(&self, discard: &Vector<Card>, rng: &mut GameRng) -> Deck {
        let mut recycled: Vec<Card> = discard.iter().copied().collect();
        rng.shuffle(&mut recycled);

        let mut draw_pile = self.draw_pile.clone();
        draw_pile.extend(recycled);
        Deck { draw_pile }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_shuffled_full_deck() {
        let mut rng = GameRng::new(42);
        let deck = Deck::shuffled(&mut rng);

        assert_eq!(deck.len(), Card::FULL_DECK_SIZE);

        // All 52 cards distinct
        let unique: HashSet<Card> = deck.draw_pile.iter().copied().collect();
        assert_eq!(unique.len(), Card::FULL_DECK_SIZE);
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let deck1 = Deck::shuffled(&mut GameRng::new(7));
        let deck2 = Deck::shuffled(&mut GameRng::new(7));
        let deck3 = Deck::shuffled(&mut GameRng::new(8));

        assert_eq!(deck1, deck2);
        assert_ne!(deck1, deck3);
    }

    #[test]
    fn test_draw() {
        let mut rng = GameRng::new(42);
        let deck = Deck::shuffled(&mut rng);

        let (cards, rest) = deck.draw(7);
        assert_eq!(cards.len(), 7);
        assert_eq!(rest.len(), 45);

        // Drawing leaves the original untouched
        assert_eq!(deck.len(), 52);

        // Drawn cards came off the front
        let front: Vec<Card> = deck.draw_pile.iter().take(7).copied().collect();
        assert_eq!(cards, front);
    }

    #[test]
    fn test_draw_more_than_remaining() {
        let deck = Deck::from_cards([
            Card::new(Suit::Hearts, Rank::Two),
            Card::new(Suit::Spades, Rank::King),
        ]);

        let (cards, rest) = deck.draw(5);
        assert_eq!(cards.len(), 2);
        assert!(rest.is_empty());
    }

    #[test]
    fn test_recycle_preserves_total_and_order_on_top() {
        let deck = Deck::from_cards([
            Card::new(Suit::Hearts, Rank::Two),
            Card::new(Suit::Hearts, Rank::Three),
        ]);
        let discard: Vector<Card> = [
            Card::new(Suit::Clubs, Rank::Nine),
            Card::new(Suit::Diamonds, Rank::Four),
            Card::new(Suit::Spades, Rank::Jack),
        ]
        .into_iter()
        .collect();

        let mut rng = GameRng::new(42);
        let rebuilt = deck.recycle(&discard, &mut rng);

        assert_eq!(rebuilt.len(), deck.len() + discard.len());

        // Remaining draw pile stays on top in order
        let (top, _) = rebuilt.draw(2);
        assert_eq!(
            top,
            vec![
                Card::new(Suit::Hearts, Rank::Two),
                Card::new(Suit::Hearts, Rank::Three),
            ]
        );

        // Recycled cards are all present below
        let all: HashSet<Card> = rebuilt.draw_pile.iter().copied().collect();
        for card in &discard {
            assert!(all.contains(card));
        }
    }
}
