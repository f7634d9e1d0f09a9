//! Keyboard sampling
//!
//! Turns the set of currently held keys into a movement vector and facing.

use std::collections::HashSet;

use glam::Vec2;

use super::state::{Facing, GameState};
use crate::consts::DIAGONAL_SCALE;

/// Keys currently held down (`KeyboardEvent.key` strings)
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    keys: HashSet<String>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: &str) {
        self.keys.insert(key.to_string());
    }

    pub fn release(&mut self, key: &str) {
        self.keys.remove(key);
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    fn any(&self, names: &[&str]) -> bool {
        names.iter().any(|k| self.is_held(k))
    }

    /// Resolve held keys to a movement sample
    pub fn sample(&self) -> MoveInput {
        let mut dx = 0.0;
        let mut dy = 0.0;
        if self.any(&["ArrowUp", "w"]) {
            dy -= 1.0;
        }
        if self.any(&["ArrowDown", "s"]) {
            dy += 1.0;
        }
        if self.any(&["ArrowLeft", "a"]) {
            dx -= 1.0;
        }
        if self.any(&["ArrowRight", "d"]) {
            dx += 1.0;
        }
        MoveInput::from_axes(dx, dy)
    }
}

/// Movement for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveInput {
    /// Unit-or-zero direction
    pub dir: Vec2,
}

impl MoveInput {
    /// Build from raw axis values in {-1, 0, 1}; diagonals are scaled so
    /// their speed matches axial speed
    pub fn from_axes(mut dx: f32, mut dy: f32) -> Self {
        if dx != 0.0 && dy != 0.0 {
            dx *= DIAGONAL_SCALE;
            dy *= DIAGONAL_SCALE;
        }
        Self {
            dir: Vec2::new(dx, dy),
        }
    }

    pub fn is_moving(&self) -> bool {
        self.dir != Vec2::ZERO
    }

    /// Facing for this input, `None` when standing still. Horizontal only
    /// wins when strictly dominant.
    pub fn facing(&self) -> Option<Facing> {
        if !self.is_moving() {
            return None;
        }
        let Vec2 { x: dx, y: dy } = self.dir;
        Some(if dx.abs() > dy.abs() {
            if dx > 0.0 { Facing::Right } else { Facing::Left }
        } else if dy > 0.0 {
            Facing::Down
        } else {
            Facing::Up
        })
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub movement: MoveInput,
    /// Demo mode - steer toward the nearest heart instead of the keys
    pub autopilot: bool,
}

impl TickInput {
    pub fn from_keys(keys: &HeldKeys, autopilot: bool) -> Self {
        Self {
            movement: keys.sample(),
            autopilot,
        }
    }
}

/// Steer toward the nearest uncollected heart
pub fn autopilot_input(state: &GameState) -> MoveInput {
    let player = state.player.pos;
    let target = state
        .hearts
        .iter()
        .filter(|h| !h.collected)
        .min_by(|a, b| {
            a.pos
                .distance_squared(player)
                .partial_cmp(&b.pos.distance_squared(player))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    match target {
        Some(heart) => MoveInput {
            dir: (heart.pos - player).normalize_or_zero(),
        },
        None => MoveInput::default(),
    }
}
