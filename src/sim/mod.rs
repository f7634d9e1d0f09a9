//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Seeded RNG only (owned by `GameState`)
//! - Stable iteration order (hearts are never removed mid-round)
//! - No rendering or platform dependencies

pub mod flow;
pub mod input;
pub mod state;
pub mod tick;

pub use input::{HeldKeys, MoveInput, TickInput, autopilot_input};
pub use state::{
    Celebration, EndMessage, EndReason, Facing, FloatingHeart, GamePhase, GameState, Heart,
    Overlay, Particle, Player,
};
pub use tick::{age_effects, tick};
