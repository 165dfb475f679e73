//! The game state machine.
//!
//! ## Shape
//!
//! [`Game`] owns the full table state: seats, deck, discard pile, face-up
//! current card, pending penalties, play direction, and finish order. Every
//! mutating operation takes `&self` and returns a fresh `Game` on success,
//! or a [`GameError`] with the original value untouched. The `im` persistent
//! collections make those fresh values O(1) structural-sharing copies.
//!
//! ## Invariants
//!
//! Once a game has started, the 52-card universe is conserved:
//! `Σ|hands| + |draw pile| + |discard pile| + 1 (current card) == 52`.
//! A `debug_assert!` checks this after every successful transition.
//!
//! The engine is synchronous and single-threaded; callers (a per-game
//! session actor) must serialize operations against one game value.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::cards::{Card, Rank, Suit};
use crate::core::GameRng;
use crate::deck::Deck;
use crate::game::error::GameError;
use crate::game::player::{Player, PlayerId};

/// Hand size dealt to each player in games of up to six seats.
const SMALL_GAME_HAND: usize = 7;
/// Hand size dealt in games of seven or more seats.
const LARGE_GAME_HAND: usize = 5;
/// Cards a pickup-two adds to the pending penalty.
const TWO_PENALTY: u32 = 2;
/// Cards a black jack adds to the pending penalty.
const BLACK_JACK_PENALTY: u32 = 5;

/// Game identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(u64);

impl GameId {
    /// The raw id value.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Turn order direction around the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// The opposite direction (Queens reverse play).
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Which kind of pickup penalty is accumulating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    /// Stacked 2s: only 2s may be played on top.
    Twos,
    /// Stacked black Jacks: only Jacks may be played on top
    /// (black to stack, red to counter).
    BlackJacks,
}

/// Suit nomination state driven by Aces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nomination {
    /// No nomination in force.
    #[default]
    None,
    /// An Ace was just played; the acting player must nominate before the
    /// turn advances.
    Pending,
    /// The next play must follow this suit (or be an Ace).
    Suit(Suit),
}

/// Game lifecycle. Transitions only run forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Players may join; no cards dealt.
    Waiting,
    /// Hands dealt, turns in progress.
    Playing,
    /// Only one active player remained; finish order is complete.
    Finished,
}

/// Full table state. See the module docs for the update discipline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub(crate) id: GameId,
    pub(crate) players: Vector<Player>,
    pub(crate) current_player_index: usize,
    pub(crate) direction: Direction,
    pub(crate) current_card: Option<Card>,
    pub(crate) deck: Deck,
    pub(crate) discard_pile: Vector<Card>,
    pub(crate) pending_pickups: u32,
    pub(crate) pending_pickup_type: Option<PickupKind>,
    pub(crate) pending_skips: u32,
    pub(crate) nominated_suit: Nomination,
    pub(crate) winners: Vector<PlayerId>,
    pub(crate) status: GameStatus,
    pub(crate) rng: GameRng,
}

impl Game {
    /// Create a waiting game with a fresh id and an entropy seed.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(GameRng::from_entropy())
    }

    /// Create a waiting game with a deterministic seed.
    ///
    /// Two games built from the same seed and fed the same call sequence
    /// reach structurally identical states.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(GameRng::new(seed))
    }

    fn from_rng(mut rng: GameRng) -> Self {
        let id = GameId(rng.next_u64());
        Self {
            id,
            players: Vector::new(),
            current_player_index: 0,
            direction: Direction::Clockwise,
            current_card: None,
            deck: Deck::new(),
            discard_pile: Vector::new(),
            pending_pickups: 0,
            pending_pickup_type: None,
            pending_skips: 0,
            nominated_suit: Nomination::None,
            winners: Vector::new(),
            status: GameStatus::Waiting,
            rng,
        }
    }

    // === Accessors ===

    /// Game id.
    #[must_use]
    pub fn id(&self) -> GameId {
        self.id
    }

    /// Lifecycle status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Turn order direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The face-up card plays must match. `None` only while waiting.
    #[must_use]
    pub fn current_card(&self) -> Option<Card> {
        self.current_card
    }

    /// Seats in turn order.
    #[must_use]
    pub fn players(&self) -> &Vector<Player> {
        &self.players
    }

    /// Look up a player by id.
    #[must_use]
    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id.as_str() == player_id)
    }

    /// The player whose turn it is. `None` before the game starts.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        match self.status {
            GameStatus::Waiting => None,
            _ => self.players.get(self.current_player_index),
        }
    }

    /// Index of the player whose turn it is.
    #[must_use]
    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    /// Finish order so far (first to shed their hand first).
    #[must_use]
    pub fn winners(&self) -> &Vector<PlayerId> {
        &self.winners
    }

    /// Accumulated draw penalty the next player must satisfy or counter.
    #[must_use]
    pub fn pending_pickups(&self) -> u32 {
        self.pending_pickups
    }

    /// Which card kind is stacking the pending penalty.
    #[must_use]
    pub fn pending_pickup_type(&self) -> Option<PickupKind> {
        self.pending_pickup_type
    }

    /// Skips (from 7s) waiting to be consumed on the next advance.
    #[must_use]
    pub fn pending_skips(&self) -> u32 {
        self.pending_skips
    }

    /// Suit nomination state.
    #[must_use]
    pub fn nomination(&self) -> Nomination {
        self.nominated_suit
    }

    /// Undrawn cards remaining.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.deck.len()
    }

    /// Discard pile, most recent last, excluding the current card.
    #[must_use]
    pub fn discard_pile(&self) -> &Vector<Card> {
        &self.discard_pile
    }

    /// Players still holding cards (not yet in `winners`).
    #[must_use]
    pub fn active_player_count(&self) -> usize {
        self.players
            .iter()
            .filter(|p| !self.winners.contains(&p.id))
            .count()
    }

    // === Lobby operations ===

    /// Seat a new player. Only legal before the game starts.
    pub fn add_player(
        &self,
        id: impl Into<PlayerId>,
        display_name: impl Into<String>,
        is_ai: bool,
    ) -> Result<Game, GameError> {
        if self.status != GameStatus::Waiting {
            return Err(GameError::GameAlreadyStarted);
        }
        let id = id.into();
        if self.players.iter().any(|p| p.id == id) {
            return Err(GameError::AlreadyJoined);
        }

        let mut next = self.clone();
        next.players.push_back(Player::new(id, display_name, is_ai));
        Ok(next)
    }

    /// Record a player's client connecting or disconnecting.
    ///
    /// Connectivity is bookkeeping for the session layer and never affects
    /// rule legality, so this is legal in any status.
    pub fn set_player_connected(
        &self,
        player_id: &str,
        connected: bool,
    ) -> Result<Game, GameError> {
        let idx = self
            .player_index(player_id)
            .ok_or(GameError::PlayerNotFound)?;

        let mut next = self.clone();
        if let Some(player) = next.players.get_mut(idx) {
            player.connected = connected;
        }
        Ok(next)
    }

    /// Shuffle, deal, flip the starting card, and begin play.
    ///
    /// Deals 7 cards each (5 in games of more than six players). The
    /// starting card is flipped without applying any special effect.
    pub fn start_game(&self) -> Result<Game, GameError> {
        if self.status != GameStatus::Waiting {
            return Err(GameError::GameAlreadyStarted);
        }
        if self.players.len() < 2 {
            return Err(GameError::NotEnoughPlayers);
        }

        let mut next = self.clone();
        let mut deck = Deck::shuffled(&mut next.rng);

        let hand_size = if next.players.len() <= 6 {
            SMALL_GAME_HAND
        } else {
            LARGE_GAME_HAND
        };

        for idx in 0..next.players.len() {
            let (cards, rest) = deck.draw(hand_size);
            deck = rest;
            if let Some(player) = next.players.get_mut(idx) {
                player.hand = cards.into_iter().collect();
            }
        }

        // The starting flip never triggers an effect, whatever its rank.
        let (flipped, rest) = deck.draw(1);
        next.deck = rest;
        next.current_card = flipped.first().copied();

        next.status = GameStatus::Playing;
        next.current_player_index = 0;
        next.assert_conservation();
        Ok(next)
    }

    // === Turn operations ===

    /// Play one or more cards from the acting player's hand, by index.
    ///
    /// Multi-card plays must all share the first card's rank; the last card
    /// played becomes the new face-up card, and the effect of every card is
    /// applied in play order. If an Ace is among them the turn does not
    /// advance until [`Game::nominate_suit`].
    pub fn play_card(&self, player_id: &str, indices: &[usize]) -> Result<Game, GameError> {
        if self.status != GameStatus::Playing {
            return Err(GameError::GameNotPlaying);
        }
        let pidx = self
            .player_index(player_id)
            .ok_or(GameError::PlayerNotFound)?;
        if pidx != self.current_player_index {
            return Err(GameError::NotYourTurn);
        }
        // A pending Ace locks the acting player into nominating first; the
        // turn must not move on while the nomination is unresolved.
        if self.nominated_suit == Nomination::Pending {
            return Err(GameError::MustNominateSuit);
        }
        if indices.is_empty() {
            return Err(GameError::NoCardsSelected);
        }
        if has_duplicates(indices) {
            return Err(GameError::DuplicateCardIndices);
        }
        let hand = &self.players[pidx].hand;
        if indices.iter().any(|&i| i >= hand.len()) {
            return Err(GameError::InvalidCardIndex);
        }

        // Snapshot the selection before anything is removed.
        let selected: SmallVec<[Card; 4]> = indices.iter().map(|&i| hand[i]).collect();

        // The pickup gate overrides normal matching: a pending penalty can
        // only be stacked or countered, never escaped.
        match self.pending_pickup_type {
            Some(PickupKind::Twos) => {
                if selected.iter().any(|c| c.rank != Rank::Two) {
                    return Err(GameError::MustPlayTwos);
                }
            }
            Some(PickupKind::BlackJacks) => {
                if selected.iter().any(|c| c.rank != Rank::Jack) {
                    return Err(GameError::MustPlayJacks);
                }
            }
            None => {
                if !self.card_is_playable(selected[0]) {
                    return Err(GameError::FirstCardInvalid);
                }
            }
        }
        if selected[1..].iter().any(|c| c.rank != selected[0].rank) {
            return Err(GameError::CanOnlyStackSameRank);
        }

        let mut next = self.clone();

        // Remove from the hand highest index first so positions stay valid.
        let mut order: SmallVec<[usize; 4]> = indices.into();
        order.sort_unstable_by(|a, b| b.cmp(a));
        if let Some(player) = next.players.get_mut(pidx) {
            for i in order {
                player.hand.remove(i);
            }
        }

        // Previous current card and all but the last played card go to the
        // discard pile, in play order; the last card becomes face-up.
        if let Some(prev) = next.current_card {
            next.discard_pile.push_back(prev);
        }
        let (last, earlier) = selected.split_last().unwrap_or((&selected[0], &[]));
        next.discard_pile.extend(earlier.iter().copied());
        next.current_card = Some(*last);

        // A concrete nomination is satisfied by this (legal) play.
        if matches!(next.nominated_suit, Nomination::Suit(_)) {
            next.nominated_suit = Nomination::None;
        }

        let mut ace_played = false;
        for card in &selected {
            next.apply_effect(*card, &mut ace_played);
        }

        if next.players[pidx].hand.is_empty() {
            next.record_winner(pidx);
        }

        if !ace_played && next.status == GameStatus::Playing {
            next.advance_turn();
        }
        next.assert_conservation();
        Ok(next)
    }

    /// Draw from the deck: one card, or the full pending penalty.
    ///
    /// Forbidden while a legal play exists (the mandatory-play rule). The
    /// discard pile is recycled under the deck if the draw would exhaust it;
    /// the face-up current card is never recycled.
    pub fn draw_card(&self, player_id: &str) -> Result<Game, GameError> {
        if self.status != GameStatus::Playing {
            return Err(GameError::GameNotPlaying);
        }
        let pidx = self
            .player_index(player_id)
            .ok_or(GameError::PlayerNotFound)?;
        if pidx != self.current_player_index {
            return Err(GameError::NotYourTurn);
        }
        if self.nominated_suit == Nomination::Pending {
            return Err(GameError::MustNominateSuit);
        }
        if self
            .players[pidx]
            .hand
            .iter()
            .any(|&c| self.card_is_playable(c))
        {
            return Err(GameError::MustPlayValidCard);
        }

        let count = self.pending_pickups.max(1) as usize;

        let mut next = self.clone();
        if next.deck.len() < count {
            next.deck = next.deck.recycle(&next.discard_pile, &mut next.rng);
            next.discard_pile.clear();
        }
        let (drawn, rest) = next.deck.draw(count);
        next.deck = rest;
        if let Some(player) = next.players.get_mut(pidx) {
            player.hand.extend(drawn);
        }

        next.pending_pickups = 0;
        next.pending_pickup_type = None;
        next.advance_turn();
        next.assert_conservation();
        Ok(next)
    }

    /// Choose the suit the next player must follow, after playing an Ace.
    pub fn nominate_suit(&self, player_id: &str, suit: Suit) -> Result<Game, GameError> {
        if self.status != GameStatus::Playing {
            return Err(GameError::GameNotPlaying);
        }
        if self.nominated_suit != Nomination::Pending {
            return Err(GameError::NoAcePlayed);
        }
        let pidx = self
            .player_index(player_id)
            .ok_or(GameError::PlayerNotFound)?;
        if pidx != self.current_player_index {
            return Err(GameError::NotYourTurn);
        }

        let mut next = self.clone();
        next.nominated_suit = Nomination::Suit(suit);
        next.advance_turn();
        next.assert_conservation();
        Ok(next)
    }

    // === Legality queries ===

    /// Every legal play in a player's hand, with original hand indices.
    pub fn valid_plays(&self, player_id: &str) -> Result<Vec<(Card, usize)>, GameError> {
        let idx = self
            .player_index(player_id)
            .ok_or(GameError::PlayerNotFound)?;
        Ok(self.players[idx]
            .hand
            .iter()
            .enumerate()
            .filter(|(_, &card)| self.card_is_playable(card))
            .map(|(i, &card)| (card, i))
            .collect())
    }

    /// Whether a player has at least one legal play.
    #[must_use]
    pub fn has_valid_play(&self, player_id: &str) -> bool {
        self.player_index(player_id).is_some_and(|idx| {
            self.players[idx]
                .hand
                .iter()
                .any(|&card| self.card_is_playable(card))
        })
    }

    // === Internals ===

    fn player_index(&self, player_id: &str) -> Option<usize> {
        self.players
            .iter()
            .position(|p| p.id.as_str() == player_id)
    }

    /// Whether a single card would be legal to lead with right now.
    ///
    /// An active pickup gate constrains by rank; a concrete nomination
    /// constrains by suit (Aces exempt); otherwise the card must match the
    /// face-up current card.
    fn card_is_playable(&self, card: Card) -> bool {
        match self.pending_pickup_type {
            Some(PickupKind::Twos) => card.rank == Rank::Two,
            Some(PickupKind::BlackJacks) => card.rank == Rank::Jack,
            None => match self.nominated_suit {
                Nomination::Suit(suit) => card.suit == suit || card.rank == Rank::Ace,
                Nomination::None | Nomination::Pending => self
                    .current_card
                    .is_some_and(|current| card.can_play_on(current)),
            },
        }
    }

    fn apply_effect(&mut self, card: Card, ace_played: &mut bool) {
        match card.rank {
            Rank::Two => {
                self.pending_pickups += TWO_PENALTY;
                self.pending_pickup_type = Some(PickupKind::Twos);
            }
            Rank::Jack if card.is_black_jack() => {
                self.pending_pickups += BLACK_JACK_PENALTY;
                self.pending_pickup_type = Some(PickupKind::BlackJacks);
            }
            Rank::Jack => {
                // Red jack: counters a pending black-jack penalty, otherwise
                // a plain card.
                if self.pending_pickup_type == Some(PickupKind::BlackJacks) {
                    self.pending_pickups =
                        self.pending_pickups.saturating_sub(BLACK_JACK_PENALTY);
                    if self.pending_pickups == 0 {
                        self.pending_pickup_type = None;
                    }
                }
            }
            Rank::Queen => {
                self.direction = self.direction.toggled();
            }
            Rank::Seven => {
                self.pending_skips += 1;
            }
            Rank::Ace => {
                self.nominated_suit = Nomination::Pending;
                *ace_played = true;
            }
            _ => {}
        }
    }

    fn record_winner(&mut self, pidx: usize) {
        let id = self.players[pidx].id.clone();
        if !self.winners.contains(&id) {
            self.winners.push_back(id);
        }

        // The instant one active player remains, they finish last and the
        // game is over.
        if self.active_player_count() == 1 {
            let last = self
                .players
                .iter()
                .find(|p| !self.winners.contains(&p.id))
                .map(|p| p.id.clone());
            if let Some(last) = last {
                self.winners.push_back(last);
            }
            self.status = GameStatus::Finished;
        }
    }

    /// One step in the current direction, landing past any finished player.
    fn advance_one(&mut self) {
        let n = self.players.len();
        loop {
            self.current_player_index = match self.direction {
                Direction::Clockwise => (self.current_player_index + 1) % n,
                Direction::CounterClockwise => (self.current_player_index + n - 1) % n,
            };
            let seated = &self.players[self.current_player_index];
            if !self.winners.contains(&seated.id) {
                break;
            }
        }
    }

    fn advance_turn(&mut self) {
        self.advance_one();
        while self.pending_skips > 0 {
            self.pending_skips -= 1;
            self.advance_one();
        }
    }

    fn assert_conservation(&self) {
        if self.status == GameStatus::Waiting {
            return;
        }
        debug_assert_eq!(
            self.players.iter().map(Player::hand_size).sum::<usize>()
                + self.deck.len()
                + self.discard_pile.len()
                + usize::from(self.current_card.is_some()),
            Card::FULL_DECK_SIZE,
        );
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

fn has_duplicates(indices: &[usize]) -> bool {
    indices
        .iter()
        .enumerate()
        .any(|(i, value)| indices[..i].contains(value))
}
