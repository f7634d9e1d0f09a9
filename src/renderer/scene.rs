//! Frame composition
//!
//! Turns the current `GameState` into a draw list. Never mutates state, so it
//! can run every frame regardless of phase or pause.

use super::command::{Color, DrawCmd, DrawList};
use super::shapes;
use crate::assets::{AssetId, AssetRegistry};
use crate::consts::WORLD_WIDTH;
use crate::palette;
use crate::sim::{GamePhase, GameState};

/// Size collectible hearts are drawn at
pub const HEART_DRAW_SIZE: f32 = 20.0;

const HUD_FONT: &str = "16px Courier New";

/// Per-frame HUD extras supplied by the frame driver
#[derive(Debug, Clone, Copy, Default)]
pub struct HudExtras {
    pub fps: Option<u32>,
}

/// Compose the full frame
pub fn build_frame(state: &GameState, assets: &AssetRegistry, extras: HudExtras) -> DrawList {
    let mut list = DrawList::with_capacity(
        64 + state.hearts.len() * 32 + state.particles.len() + state.floating_hearts.len() * 64,
    );

    list.push(DrawCmd::Clear);
    list.push(DrawCmd::Background);
    draw_hearts(&mut list, state);
    draw_player(&mut list, state, assets);
    draw_particles(&mut list, state);
    draw_floating_hearts(&mut list, state);
    draw_hud(&mut list, state, extras);

    if state.phase == GamePhase::End {
        draw_particles(&mut list, state);
        draw_floating_hearts(&mut list, state);
        draw_celebration(&mut list, state);
    }
    list
}

fn draw_hearts(list: &mut DrawList, state: &GameState) {
    for heart in state.hearts.iter().filter(|h| !h.collected) {
        let mut pos = heart.pos;
        pos.y += heart.pulse.sin() * 2.0;
        shapes::heart(list, pos, HEART_DRAW_SIZE);
    }
}

fn draw_player(list: &mut DrawList, state: &GameState, assets: &AssetRegistry) {
    shapes::player_shadow(list, &state.player);
    match assets.state(AssetId::PlayerSprite).size() {
        Some(size) => shapes::player_sprite(list, &state.player, size),
        // Pending or failed: the figure stands in
        None => shapes::player_fallback(list, &state.player),
    }
}

fn draw_particles(list: &mut DrawList, state: &GameState) {
    for p in &state.particles {
        list.fill_rect(p.pos.x, p.pos.y, p.size, p.size, Color::Rgba(240, 122, 140, p.life));
    }
}

fn draw_floating_hearts(list: &mut DrawList, state: &GameState) {
    if state.floating_hearts.is_empty() {
        return;
    }
    for h in &state.floating_hearts {
        list.alpha(h.alpha);
        shapes::heart(list, h.pos, h.size);
    }
    list.alpha(1.0);
}

fn draw_celebration(list: &mut DrawList, state: &GameState) {
    if !state.celebration.active || state.floating_hearts.is_empty() {
        return;
    }
    for h in &state.floating_hearts {
        list.alpha((h.alpha + 0.4).min(1.0));
        shapes::heart(list, h.pos, h.size + 2.0);
    }
    list.alpha(1.0);
}

fn draw_hud(list: &mut DrawList, state: &GameState, extras: HudExtras) {
    let panel = Color::Css(palette::UI_PANEL);
    let text = Color::Css(palette::UI_TEXT);

    list.fill_rect(20.0, 20.0, 160.0, 50.0, panel);
    list.text(format!("Score: {}", state.score), 30.0, 44.0, text, HUD_FONT);
    list.text(format!("Time: {}", state.display_time()), 30.0, 62.0, text, HUD_FONT);

    list.fill_rect(WORLD_WIDTH - 170.0, 20.0, 140.0, 50.0, panel);
    list.text(
        format!("Hearts: {}/{}", state.hearts_collected, state.hearts_needed),
        WORLD_WIDTH - 160.0,
        50.0,
        text,
        HUD_FONT,
    );

    if let Some(fps) = extras.fps {
        list.text(format!("FPS: {}", fps), 30.0, 90.0, text, HUD_FONT);
    }
}
