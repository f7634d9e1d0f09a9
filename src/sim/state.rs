//! Game state and core simulation types
//!
//! Everything the update and render routines touch lives in one owned
//! `GameState`; there is no module-level mutable state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::settings::{MovementMode, Settings};
use crate::world_center;

/// Top-level game flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Start screen shown, nothing simulates
    Start,
    /// Round in progress
    Play,
    /// Round over (score panel, proposal, celebration)
    End,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    TimeUp,
    AllHearts,
}

/// Facing direction of the player sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

/// The player character
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: f32,
    /// Displacement per tick at full input
    pub speed: f32,
    pub facing: Facing,
    pub moving: bool,
    /// Animation phase driving bob and sway
    pub bob: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: world_center(),
            size: PLAYER_SIZE,
            speed: PLAYER_SPEED,
            facing: Facing::Down,
            moving: false,
            bob: 0.0,
        }
    }
}

impl Player {
    /// Bob offset and sway for the current animation phase
    pub fn bob_and_sway(&self) -> (f32, f32) {
        let amplitude = if self.moving { 3.0 } else { 1.5 };
        let bob = self.bob.sin() * amplitude;
        let sway = if self.moving {
            (self.bob * 0.5).sin() * 2.0
        } else {
            0.0
        };
        (bob, sway)
    }
}

/// A collectible heart. Collected hearts stay in the list so iteration
/// order never changes during a round.
#[derive(Debug, Clone, PartialEq)]
pub struct Heart {
    pub pos: Vec2,
    pub pulse: f32,
    pub collected: bool,
}

/// A burst particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases over time
    pub life: f32,
    pub size: f32,
}

/// An ambient heart rising from below the screen
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingHeart {
    pub pos: Vec2,
    /// Vertical velocity per tick (negative = up)
    pub vy: f32,
    /// Horizontal drift per tick
    pub drift: f32,
    /// Opacity, decreases over time
    pub alpha: f32,
    pub size: f32,
}

/// Timed celebration overlay
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Celebration {
    pub active: bool,
    pub elapsed_ms: f32,
}

/// Text shown on the end panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndMessage {
    /// The page's own proposal text
    #[default]
    Proposal,
    Celebration,
}

impl EndMessage {
    /// Text to show, given the page's own proposal text
    pub fn text<'a>(&self, proposal: &'a str) -> &'a str {
        match self {
            EndMessage::Proposal => proposal,
            EndMessage::Celebration => "Yay! 💖",
        }
    }
}

/// Visibility of screen panels and buttons, mirrored onto the DOM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub start_visible: bool,
    pub end_visible: bool,
    pub minimize_visible: bool,
    pub restore_visible: bool,
    pub message: EndMessage,
}

impl Default for Overlay {
    fn default() -> Self {
        Self {
            start_visible: true,
            end_visible: false,
            minimize_visible: false,
            restore_visible: false,
            message: EndMessage::Proposal,
        }
    }
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    /// Seconds remaining (may go negative on the final tick)
    pub timer: f32,
    pub score: u32,
    pub hearts_collected: u32,
    pub hearts_needed: u32,
    /// Freezes simulation but never rendering
    pub paused: bool,
    pub celebration: Celebration,
    pub overlay: Overlay,
    pub end_reason: Option<EndReason>,
    pub player: Player,
    pub hearts: Vec<Heart>,
    pub particles: Vec<Particle>,
    pub floating_hearts: Vec<FloatingHeart>,
    pub movement: MovementMode,
    pub max_particles: usize,
    pub max_floating_hearts: usize,
}

impl GameState {
    /// Create a new session with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, &Settings::default())
    }

    /// Create a new session; hearts are spawned immediately
    pub fn with_settings(seed: u64, settings: &Settings) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            timer: ROUND_SECONDS,
            score: 0,
            hearts_collected: 0,
            hearts_needed: HEARTS_NEEDED,
            paused: false,
            celebration: Celebration::default(),
            overlay: Overlay::default(),
            end_reason: None,
            player: Player::default(),
            hearts: Vec::new(),
            particles: Vec::new(),
            floating_hearts: Vec::new(),
            movement: settings.movement,
            max_particles: settings.max_particles(),
            max_floating_hearts: settings.max_floating_hearts(),
        };
        state.spawn_hearts();
        state
    }

    /// Session RNG (all gameplay randomness goes through here)
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Seconds shown in the HUD
    pub fn display_time(&self) -> u32 {
        self.timer.ceil().max(0.0) as u32
    }

    /// Scatter a fresh batch of collectible hearts
    pub fn spawn_hearts(&mut self) {
        self.hearts.clear();
        for _ in 0..self.hearts_needed {
            let x = self.rng.random_range(80.0..WORLD_WIDTH - 80.0);
            let y = self.rng.random_range(90.0..WORLD_HEIGHT - 70.0);
            let pulse = self.rng.random_range(0.0..std::f32::consts::TAU);
            self.hearts.push(Heart {
                pos: Vec2::new(x, y),
                pulse,
                collected: false,
            });
        }
    }

    /// Radial burst of particles centred on `at`
    pub fn spawn_burst(&mut self, at: Vec2) {
        for i in 0..BURST_PARTICLES {
            let angle = std::f32::consts::TAU * i as f32 / BURST_PARTICLES as f32;
            let speed: f32 = self.rng.random_range(1.2..2.8);
            let size: f32 = self.rng.random_range(3.0..6.0);
            self.particles.push(Particle {
                pos: at,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: 1.0,
                size,
            });
        }
        enforce_cap(&mut self.particles, self.max_particles);
    }

    /// One floating heart just below the bottom edge
    pub fn spawn_floating_heart(&mut self) {
        let heart = FloatingHeart {
            pos: Vec2::new(self.rng.random_range(0.0..WORLD_WIDTH), WORLD_HEIGHT + 20.0),
            vy: -0.5 - self.rng.random_range(0.0f32..0.8),
            drift: self.rng.random_range(-0.2..0.2),
            alpha: self.rng.random_range(0.6..1.0),
            size: self.rng.random_range(6.0..12.0),
        };
        self.floating_hearts.push(heart);
        enforce_cap(&mut self.floating_hearts, self.max_floating_hearts);
    }

    /// Number of hearts flagged collected
    pub fn collected_count(&self) -> usize {
        self.hearts.iter().filter(|h| h.collected).count()
    }
}

/// Drop the oldest entries beyond `cap`
fn enforce_cap<T>(items: &mut Vec<T>, cap: usize) {
    if items.len() > cap {
        let excess = items.len() - cap;
        items.drain(..excess);
        log::debug!("Effect cap reached, dropped {} oldest", excess);
    }
}
