//! Card values: suits, ranks, and special-effect classification.

pub mod card;

pub use card::{Card, Effect, Rank, Suit};
