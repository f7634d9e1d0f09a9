//! Per-frame simulation tick
//!
//! One call per display refresh: the play step, then the end-screen step. A
//! round that ends mid-tick gets its first end-screen update in the same
//! tick. The player animation phase always advances.

use rand::Rng;

use super::input::{TickInput, autopilot_input};
use super::state::{EndReason, GamePhase, GameState};
use crate::clamp_to_interior;
use crate::consts::*;
use crate::settings::MovementMode;

/// Advance the game by one frame of `delta_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, delta_ms: f32) {
    state.player.bob += if state.player.moving { 0.16 } else { 0.08 };

    if state.phase == GamePhase::Play {
        play_step(state, input, delta_ms);
    }
    if state.phase == GamePhase::End {
        end_step(state, delta_ms);
    }
}

/// Round in progress: timer, movement, pickups, effects, end check
fn play_step(state: &mut GameState, input: &TickInput, delta_ms: f32) {
    if state.paused {
        return;
    }

    state.timer -= delta_ms / 1000.0;

    let movement = if input.autopilot {
        autopilot_input(state)
    } else {
        input.movement
    };
    move_player(state, movement.dir, delta_ms);
    state.player.moving = movement.is_moving();
    if let Some(facing) = movement.facing() {
        state.player.facing = facing;
    }

    collect_hearts(state, delta_ms);
    age_effects(state, delta_ms);

    if state.rng().random_bool(FLOAT_SPAWN_CHANCE) {
        state.spawn_floating_heart();
    }

    if state.timer <= 0.0 {
        state.end_game(EndReason::TimeUp);
    } else if state.hearts_collected >= state.hearts_needed {
        state.end_game(EndReason::AllHearts);
    }
}

/// Round over: keep effects alive and run the celebration clock
fn end_step(state: &mut GameState, delta_ms: f32) {
    // Pause freezes the end screen too, except while celebrating so the
    // celebration can still run out
    if state.paused && !state.celebration.active {
        return;
    }

    age_effects(state, delta_ms);

    if state.celebration.active {
        state.celebration.elapsed_ms += delta_ms;
        if state.rng().random_bool(CELEBRATION_SPAWN_CHANCE) {
            state.spawn_floating_heart();
        }
        if state.celebration.elapsed_ms > CELEBRATION_MS {
            state.celebration.active = false;
            log::info!("Celebration finished");
        }
    }
}

fn move_player(state: &mut GameState, dir: glam::Vec2, delta_ms: f32) {
    let step = match state.movement {
        MovementMode::PerFrame => state.player.speed,
        MovementMode::DeltaScaled => state.player.speed * delta_ms / REFERENCE_FRAME_MS,
    };
    state.player.pos = clamp_to_interior(state.player.pos + dir * step);
}

/// Collect every heart in pickup range; pulse the rest
fn collect_hearts(state: &mut GameState, delta_ms: f32) {
    let player = state.player.pos;
    let mut bursts = Vec::new();
    for heart in state.hearts.iter_mut().filter(|h| !h.collected) {
        if heart.pos.distance(player) < PICKUP_RADIUS {
            heart.collected = true;
            bursts.push(heart.pos);
        } else {
            heart.pulse += delta_ms * PULSE_RATE;
        }
    }
    for at in bursts {
        state.hearts_collected += 1;
        state.score += HEART_SCORE;
        state.spawn_burst(at);
    }
}

/// Integrate and decay particles and floating hearts, dropping dead ones
pub fn age_effects(state: &mut GameState, delta_ms: f32) {
    for p in state.particles.iter_mut() {
        p.pos += p.vel;
        p.vel *= PARTICLE_DAMPING;
        p.life -= delta_ms * PARTICLE_DECAY;
    }
    state.particles.retain(|p| p.life > 0.0);

    for h in state.floating_hearts.iter_mut() {
        h.pos.x += h.drift;
        h.pos.y += h.vy;
        h.alpha -= delta_ms * FLOAT_DECAY;
    }
    state.floating_hearts.retain(|h| h.alpha > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::{HeldKeys, MoveInput};
    use crate::sim::state::{Facing, Particle};
    use glam::Vec2;
    use proptest::prelude::*;

    const FRAME: f32 = 16.0;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start_game();
        // Park every heart far away so stray pickups don't happen
        for heart in state.hearts.iter_mut() {
            heart.pos = Vec2::new(-1000.0, -1000.0);
        }
        state
    }

    fn moving(dx: f32, dy: f32) -> TickInput {
        TickInput {
            movement: MoveInput::from_axes(dx, dy),
            autopilot: false,
        }
    }

    #[test]
    fn test_start_phase_is_inert() {
        let mut state = GameState::new(1);
        let before = state.player.pos;
        tick(&mut state, &moving(1.0, 0.0), FRAME);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.timer, ROUND_SECONDS);
        assert_eq!(state.player.pos, before);
        // Animation still runs
        assert!(state.player.bob > 0.0);
    }

    #[test]
    fn test_move_per_frame() {
        let mut state = playing(1);
        let start = state.player.pos;
        tick(&mut state, &moving(1.0, 0.0), FRAME);
        assert_eq!(state.player.pos, start + Vec2::new(PLAYER_SPEED, 0.0));
        assert!(state.player.moving);
        assert_eq!(state.player.facing, Facing::Right);

        // Displacement ignores delta in per-frame mode
        tick(&mut state, &moving(1.0, 0.0), 100.0);
        let expected = start + Vec2::new(2.0 * PLAYER_SPEED, 0.0);
        assert!((state.player.pos - expected).length() < 1e-4);
    }

    #[test]
    fn test_move_delta_scaled() {
        let mut state = playing(1);
        state.movement = MovementMode::DeltaScaled;
        let start = state.player.pos;
        tick(&mut state, &moving(0.0, 1.0), 2.0 * REFERENCE_FRAME_MS);
        assert!((state.player.pos.y - (start.y + 2.0 * PLAYER_SPEED)).abs() < 1e-4);
    }

    #[test]
    fn test_facing_kept_when_idle() {
        let mut state = playing(1);
        tick(&mut state, &moving(-1.0, 0.0), FRAME);
        tick(&mut state, &TickInput::default(), FRAME);
        assert!(!state.player.moving);
        assert_eq!(state.player.facing, Facing::Left);
    }

    #[test]
    fn test_clamped_at_edges() {
        let mut state = playing(1);
        state.player.pos = Vec2::new(PLAYER_MARGIN_X + 1.0, PLAYER_MARGIN_Y + 1.0);
        for _ in 0..10 {
            tick(&mut state, &moving(-1.0, -1.0), FRAME);
        }
        assert_eq!(state.player.pos, Vec2::new(PLAYER_MARGIN_X, PLAYER_MARGIN_Y));
    }

    #[test]
    fn test_collect_heart_on_contact() {
        let mut state = playing(2);
        let target = Vec2::new(300.0, 300.0);
        state.hearts[0].pos = target;
        state.player.pos = target + Vec2::new(10.0, 0.0);

        tick(&mut state, &TickInput::default(), FRAME);

        assert!(state.hearts[0].collected);
        assert_eq!(state.hearts_collected, 1);
        assert_eq!(state.score, HEART_SCORE);
        assert_eq!(state.particles.len(), BURST_PARTICLES);
        assert_eq!(state.phase, GamePhase::Play);

        // Standing on it again does nothing
        tick(&mut state, &TickInput::default(), FRAME);
        assert_eq!(state.hearts_collected, 1);
        assert_eq!(state.score, HEART_SCORE);
    }

    #[test]
    fn test_pickup_radius_is_exclusive() {
        let mut state = playing(2);
        state.hearts[0].pos = Vec2::new(300.0, 300.0);
        state.player.pos = Vec2::new(300.0 + PICKUP_RADIUS, 300.0);
        let pulse = state.hearts[0].pulse;
        tick(&mut state, &TickInput::default(), FRAME);
        assert!(!state.hearts[0].collected);
        assert!((state.hearts[0].pulse - (pulse + FRAME * PULSE_RATE)).abs() < 1e-5);
    }

    #[test]
    fn test_multiple_hearts_same_tick() {
        let mut state = playing(3);
        let spot = Vec2::new(400.0, 300.0);
        state.hearts[0].pos = spot;
        state.hearts[1].pos = spot + Vec2::new(5.0, 5.0);
        state.player.pos = spot;
        tick(&mut state, &TickInput::default(), FRAME);
        assert_eq!(state.hearts_collected, 2);
        assert_eq!(state.score, 2 * HEART_SCORE);
        assert_eq!(state.particles.len(), 2 * BURST_PARTICLES);
    }

    #[test]
    fn test_timer_expiry_ends_round() {
        let mut state = playing(4);
        let mut ticks = 0;
        while state.phase == GamePhase::Play {
            tick(&mut state, &TickInput::default(), FRAME);
            ticks += 1;
            assert!(ticks < 10_000, "round never ended");
        }
        assert_eq!(state.phase, GamePhase::End);
        assert_eq!(state.end_reason, Some(EndReason::TimeUp));
        assert_eq!(state.hearts_collected, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.display_time(), 0);
        // ~75 s of 16 ms frames
        assert!((4680..=4690).contains(&ticks), "ticks {ticks}");
    }

    #[test]
    fn test_all_hearts_ends_immediately() {
        let mut state = GameState::new(5);
        state.start_game();
        let spots: Vec<Vec2> = state.hearts.iter().map(|h| h.pos).collect();
        // Park every heart out of reach, then bring them back one per tick
        for heart in &mut state.hearts {
            heart.pos = Vec2::new(-1000.0, -1000.0);
        }
        for (i, spot) in spots.iter().enumerate() {
            assert_eq!(state.phase, GamePhase::Play, "ended early at heart {i}");
            state.hearts[i].pos = *spot;
            state.player.pos = *spot;
            tick(&mut state, &TickInput::default(), FRAME);
            assert_eq!(state.hearts_collected, i as u32 + 1);
        }
        assert_eq!(state.hearts_collected, HEARTS_NEEDED);
        assert_eq!(state.score, HEARTS_NEEDED * HEART_SCORE);
        assert_eq!(state.phase, GamePhase::End);
        assert_eq!(state.end_reason, Some(EndReason::AllHearts));
        assert!(state.timer > 0.0);
    }

    #[test]
    fn test_ending_tick_runs_end_step() {
        let mut state = playing(12);
        state.spawn_burst(Vec2::new(200.0, 200.0));
        for p in &mut state.particles {
            p.life = 1.0;
        }
        state.timer = 0.001;
        tick(&mut state, &TickInput::default(), FRAME);
        assert_eq!(state.phase, GamePhase::End);
        // Aged once by the play step and once by the end step
        let expected = 1.0 - 2.0 * FRAME * PARTICLE_DECAY;
        for p in &state.particles {
            assert!((p.life - expected).abs() < 1e-5, "life {}", p.life);
        }
    }

    #[test]
    fn test_paused_freezes_play() {
        let mut state = playing(6);
        state.paused = true;
        let pos = state.player.pos;
        tick(&mut state, &moving(1.0, 1.0), FRAME);
        assert_eq!(state.timer, ROUND_SECONDS);
        assert_eq!(state.player.pos, pos);
    }

    #[test]
    fn test_particles_decay_and_die() {
        let mut state = playing(7);
        state.particles.push(Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(2.0, 0.0),
            life: 0.01,
            size: 4.0,
        });
        tick(&mut state, &TickInput::default(), FRAME);
        assert!(state.particles.is_empty());

        state.spawn_burst(Vec2::new(200.0, 200.0));
        tick(&mut state, &TickInput::default(), FRAME);
        let p = &state.particles[0];
        assert!((p.life - (1.0 - FRAME * PARTICLE_DECAY)).abs() < 1e-6);
        assert!(p.vel.length() < 2.8 * PARTICLE_DAMPING);
    }

    #[test]
    fn test_ambient_hearts_spawn_during_play() {
        let mut state = playing(8);
        for _ in 0..1000 {
            tick(&mut state, &TickInput::default(), 1.0);
        }
        // 2% per tick over 1000 ticks
        assert!(!state.floating_hearts.is_empty());
        for h in &state.floating_hearts {
            assert!(h.alpha > 0.0);
        }
    }

    #[test]
    fn test_autopilot_collects() {
        let mut state = GameState::new(9);
        state.start_game();
        let input = TickInput {
            movement: MoveInput::default(),
            autopilot: true,
        };
        let mut ticks = 0;
        while state.hearts_collected == 0 && ticks < 2000 {
            tick(&mut state, &input, FRAME);
            ticks += 1;
        }
        assert!(state.hearts_collected >= 1);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        a.start_game();
        b.start_game();
        let mut keys = HeldKeys::new();
        keys.press("d");
        keys.press("s");
        let input = TickInput::from_keys(&keys, false);
        for _ in 0..500 {
            tick(&mut a, &input, FRAME);
            tick(&mut b, &input, FRAME);
        }
        assert_eq!(a.player, b.player);
        assert_eq!(a.hearts, b.hearts);
        assert_eq!(a.particles, b.particles);
        assert_eq!(a.floating_hearts, b.floating_hearts);
    }

    fn arb_input() -> impl Strategy<Value = (i8, i8, bool)> {
        (-1i8..=1, -1i8..=1, any::<bool>())
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            seed in any::<u64>(),
            steps in prop::collection::vec((arb_input(), 0.0f32..250.0), 1..300),
            delta_scaled in any::<bool>(),
        ) {
            let mut state = GameState::new(seed);
            state.start_game();
            if delta_scaled {
                state.movement = MovementMode::DeltaScaled;
            }
            for ((dx, dy, autopilot), delta) in steps {
                let input = TickInput {
                    movement: MoveInput::from_axes(dx as f32, dy as f32),
                    autopilot,
                };
                tick(&mut state, &input, delta);
                let p = state.player.pos;
                prop_assert!(p.x >= PLAYER_MARGIN_X && p.x <= WORLD_WIDTH - PLAYER_MARGIN_X);
                prop_assert!(p.y >= PLAYER_MARGIN_Y && p.y <= WORLD_HEIGHT - PLAYER_MARGIN_Y);
            }
        }

        #[test]
        fn prop_collected_count_consistent(
            seed in any::<u64>(),
            steps in prop::collection::vec(arb_input(), 1..400),
        ) {
            let mut state = GameState::new(seed);
            state.start_game();
            let mut was_collected = vec![false; state.hearts.len()];
            for (dx, dy, autopilot) in steps {
                let input = TickInput {
                    movement: MoveInput::from_axes(dx as f32, dy as f32),
                    autopilot,
                };
                tick(&mut state, &input, FRAME);
                for (seen, heart) in was_collected.iter_mut().zip(&state.hearts) {
                    // Never goes back to uncollected
                    prop_assert!(!*seen || heart.collected);
                    *seen = heart.collected;
                }
                prop_assert_eq!(state.hearts_collected as usize, state.collected_count());
                prop_assert_eq!(state.score, state.hearts_collected * HEART_SCORE);
                prop_assert!(state.hearts_collected <= state.hearts_needed);
            }
        }

        #[test]
        fn prop_effects_never_brighten(
            seed in any::<u64>(),
            deltas in prop::collection::vec(0.0f32..100.0, 1..200),
        ) {
            let mut state = GameState::new(seed);
            state.start_game();
            state.spawn_burst(Vec2::new(200.0, 200.0));
            for _ in 0..20 {
                state.spawn_floating_heart();
            }
            // Tag each effect through its size so survivors can be matched up
            for (i, p) in state.particles.iter_mut().enumerate() {
                p.size = i as f32;
            }
            for (i, h) in state.floating_hearts.iter_mut().enumerate() {
                h.size = i as f32;
            }
            for delta in deltas {
                let lives: Vec<f32> = state.particles.iter().map(|p| p.life).collect();
                let alphas: Vec<f32> = state.floating_hearts.iter().map(|h| h.alpha).collect();
                age_effects(&mut state, delta);
                for p in &state.particles {
                    prop_assert!(p.life > 0.0);
                    prop_assert!(p.life <= lives[p.size as usize]);
                }
                for h in &state.floating_hearts {
                    prop_assert!(h.alpha > 0.0);
                    prop_assert!(h.alpha <= alphas[h.size as usize]);
                }
            }
        }
    }
}
