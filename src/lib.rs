//! Heart Quest - A cozy top-down heart collecting game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, hearts, effects, game flow)
//! - `renderer`: Backend-neutral draw commands + Canvas2D backend
//! - `assets`: Async image asset registry
//! - `settings`: Runtime configuration

pub mod assets;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use settings::{MovementMode, QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// World (canvas) dimensions
    pub const WORLD_WIDTH: f32 = 960.0;
    pub const WORLD_HEIGHT: f32 = 640.0;
    pub const TILE: f32 = 24.0;

    /// Round length in seconds
    pub const ROUND_SECONDS: f32 = 75.0;
    /// Hearts spawned per round, and hearts needed to win
    pub const HEARTS_NEEDED: u32 = 12;
    /// Score awarded per heart
    pub const HEART_SCORE: u32 = 10;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 18.0;
    /// Displacement per tick (not per second)
    pub const PLAYER_SPEED: f32 = 2.1;
    /// Interior clamp margins
    pub const PLAYER_MARGIN_X: f32 = 20.0;
    pub const PLAYER_MARGIN_Y: f32 = 30.0;
    /// Diagonal input scale (~1/sqrt(2))
    pub const DIAGONAL_SCALE: f32 = 0.7071;

    /// Heart pickup radius
    pub const PICKUP_RADIUS: f32 = 18.0;
    /// Pulse phase advance per millisecond
    pub const PULSE_RATE: f32 = 0.005;

    /// Burst particles per pickup
    pub const BURST_PARTICLES: usize = 16;
    pub const PARTICLE_DAMPING: f32 = 0.97;
    /// Particle life lost per millisecond
    pub const PARTICLE_DECAY: f32 = 0.0012;
    /// Floating heart alpha lost per millisecond
    pub const FLOAT_DECAY: f32 = 0.0002;
    /// Per-tick chance of an ambient floating heart during play
    pub const FLOAT_SPAWN_CHANCE: f64 = 0.02;

    /// Celebration tuning
    pub const CELEBRATION_MS: f32 = 6000.0;
    pub const CELEBRATION_BURSTS: usize = 6;
    pub const CELEBRATION_HEARTS: usize = 50;
    pub const CELEBRATION_SPAWN_CHANCE: f64 = 0.12;

    /// Reference frame length for delta-scaled movement (60 Hz)
    pub const REFERENCE_FRAME_MS: f32 = 1000.0 / 60.0;
    /// Largest delta the frame driver will hand to the simulation
    pub const MAX_FRAME_MS: f32 = 250.0;
}

/// Color palette (CSS color strings, used by the Canvas2D backend)
pub mod palette {
    pub const GRASS: &str = "#94c89c";
    pub const GRASS_DARK: &str = "#7bbf9e";
    pub const SHADOW: &str = "rgba(74, 43, 43, 0.2)";
    pub const HEART: &str = "#f07a8c";
    pub const HEART_LIGHT: &str = "#ffd4dd";
    pub const PLAYER: &str = "#805a6f";
    pub const SHIRT: &str = "#f2b3c9";
    pub const FACE: &str = "#f8d2d2";
    pub const UI_PANEL: &str = "rgba(255, 255, 255, 0.7)";
    pub const UI_TEXT: &str = "#6c4a3d";
}

/// Clamp a position into the player's walkable interior
#[inline]
pub fn clamp_to_interior(pos: Vec2) -> Vec2 {
    use consts::*;
    Vec2::new(
        pos.x.clamp(PLAYER_MARGIN_X, WORLD_WIDTH - PLAYER_MARGIN_X),
        pos.y.clamp(PLAYER_MARGIN_Y, WORLD_HEIGHT - PLAYER_MARGIN_Y),
    )
}

/// World center
#[inline]
pub fn world_center() -> Vec2 {
    Vec2::new(consts::WORLD_WIDTH / 2.0, consts::WORLD_HEIGHT / 2.0)
}
