//! Draw pile and discard recycling.

pub mod pile;

pub use pile::Deck;
