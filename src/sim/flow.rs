//! Game flow controller
//!
//! Start → Play → End, with `paused` and the celebration overlay layered on
//! top. These are the only entry points the page layer calls.

use glam::Vec2;
use rand::Rng;

use super::state::{Celebration, EndMessage, EndReason, GamePhase, GameState, Overlay, Player};
use crate::consts::*;
use crate::world_center;

impl GameState {
    /// Fresh round: score, timer, player and every entity container
    pub fn reset_game(&mut self) {
        self.timer = ROUND_SECONDS;
        self.score = 0;
        self.hearts_collected = 0;
        self.end_reason = None;
        self.celebration = Celebration::default();
        self.player = Player::default();
        self.particles.clear();
        self.floating_hearts.clear();
        self.spawn_hearts();
    }

    /// Start button: reset and begin playing
    pub fn start_game(&mut self) {
        self.reset_game();
        self.phase = GamePhase::Play;
        self.overlay.start_visible = false;
        self.overlay.end_visible = false;
        log::info!("Round started (seed {})", self.seed);
    }

    /// Finish the round and show the score panel
    pub fn end_game(&mut self, reason: EndReason) {
        self.phase = GamePhase::End;
        self.end_reason = Some(reason);
        self.overlay.end_visible = true;
        self.overlay.minimize_visible = true;
        self.overlay.restore_visible = false;
        log::info!(
            "Round over ({:?}): score {}, hearts {}/{}",
            reason,
            self.score,
            self.hearts_collected,
            self.hearts_needed
        );
    }

    /// "Yes" on the end panel. Returns false when ignored (wrong phase or
    /// already celebrating).
    pub fn celebrate(&mut self) -> bool {
        if self.phase != GamePhase::End || self.celebration.active {
            return false;
        }
        self.celebration = Celebration {
            active: true,
            elapsed_ms: 0.0,
        };
        self.overlay.message = EndMessage::Celebration;

        let center = world_center();
        for _ in 0..CELEBRATION_BURSTS {
            let offset = Vec2::new(
                self.rng().random_range(-60.0..60.0),
                self.rng().random_range(-60.0..60.0),
            );
            self.spawn_burst(center + offset);
        }
        for _ in 0..CELEBRATION_HEARTS {
            self.spawn_floating_heart();
        }

        self.overlay.minimize_visible = false;
        self.overlay.restore_visible = true;
        self.overlay.end_visible = false;
        self.paused = true;
        log::info!("Celebration started");
        true
    }

    /// Hide the end panel and freeze the end screen
    pub fn minimize(&mut self) {
        self.overlay.end_visible = false;
        self.overlay.minimize_visible = false;
        self.overlay.restore_visible = true;
        self.paused = true;
    }

    /// Back to the start screen with a fresh round
    pub fn restore(&mut self) {
        self.overlay = Overlay {
            start_visible: true,
            end_visible: false,
            minimize_visible: false,
            restore_visible: false,
            message: EndMessage::Proposal,
        };
        self.paused = false;
        self.reset_game();
        self.phase = GamePhase::Start;
        log::info!("Restored to start screen");
    }

    /// New top-left corner for the dodging "no" button inside its panel
    pub fn dodge_position(&mut self, panel: Vec2, button: Vec2) -> Vec2 {
        let max = (panel - button - Vec2::splat(20.0)).max(Vec2::ZERO);
        let r = Vec2::new(
            self.rng().random_range(0.0..1.0),
            self.rng().random_range(0.0..1.0),
        );
        Vec2::splat(10.0) + r * max
    }
}
