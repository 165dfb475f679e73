//! Core engine building blocks that carry no game rules.

pub mod rng;

pub use rng::{GameRng, GameRngState};
