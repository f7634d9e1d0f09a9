//! Pixel-art primitives built from rectangle blits

use glam::Vec2;

use super::command::{Color, DrawCmd, DrawList};
use crate::palette;
use crate::sim::{Facing, Player};

/// 7x6 heart mask, row-major
const HEART_PATTERN: [[u8; 7]; 6] = [
    [0, 1, 1, 0, 1, 1, 0],
    [1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1],
    [0, 1, 1, 1, 1, 1, 0],
    [0, 0, 1, 1, 1, 0, 0],
    [0, 0, 0, 1, 0, 0, 0],
];

/// Highlight cells (column, row) drawn over the upper-left lobe
const HEART_HIGHLIGHT: [(u8, u8); 3] = [(1, 1), (2, 1), (1, 2)];

/// Player sprite scale relative to the source image
pub const PLAYER_SPRITE_SCALE: f32 = 0.09;

/// Block size for a heart of nominal `size`
pub fn heart_block(size: f32) -> f32 {
    (size / 4.0).round().max(2.0)
}

/// Chunky pixel heart centred on `center`
pub fn heart(list: &mut DrawList, center: Vec2, size: f32) {
    let s = heart_block(size);
    let w = HEART_PATTERN[0].len() as f32 * s;
    let h = HEART_PATTERN.len() as f32 * s;
    let x0 = (center.x - w / 2.0).round();
    let y0 = (center.y - h / 2.0).round();

    let fill = Color::Css(palette::HEART);
    for (ry, row) in HEART_PATTERN.iter().enumerate() {
        for (rx, &cell) in row.iter().enumerate() {
            if cell != 0 {
                list.fill_rect(x0 + rx as f32 * s, y0 + ry as f32 * s, s, s, fill);
            }
        }
    }

    let light = Color::Css(palette::HEART_LIGHT);
    for &(hx, hy) in &HEART_HIGHLIGHT {
        list.fill_rect(x0 + hx as f32 * s, y0 + hy as f32 * s, s, s, light);
    }
}

/// Drop shadow under the player's feet
pub fn player_shadow(list: &mut DrawList, player: &Player) {
    let p = player.pos;
    list.fill_rect(p.x - 12.0, p.y + 18.0, 24.0, 6.0, Color::Css(palette::SHADOW));
}

/// Player drawn from the sprite image (`sprite` = loaded pixel size)
pub fn player_sprite(list: &mut DrawList, player: &Player, sprite: (u32, u32)) {
    let (bob, sway) = player.bob_and_sway();
    let w = sprite.0 as f32 * PLAYER_SPRITE_SCALE;
    let h = sprite.1 as f32 * PLAYER_SPRITE_SCALE;
    let p = player.pos;
    list.push(DrawCmd::Sprite {
        x: p.x - w / 2.0 + sway,
        y: p.y - h + 28.0 + bob,
        w,
        h,
        flip_x: player.facing == Facing::Left,
    });

    // Back-of-head shading when walking away from the camera
    if player.facing == Facing::Up {
        list.fill_rect(
            p.x - 10.0,
            p.y + 8.0 + bob,
            20.0,
            3.0,
            Color::Rgba(90, 60, 70, 0.35),
        );
    }
}

/// Rectangle figure used until (or instead of) the sprite
pub fn player_fallback(list: &mut DrawList, player: &Player) {
    let (bob, _) = player.bob_and_sway();
    let p = player.pos;
    // head
    list.fill_rect(p.x - 6.0, p.y - 14.0 + bob, 12.0, 12.0, Color::Css(palette::PLAYER));
    // body
    list.fill_rect(p.x - 7.0, p.y - 2.0 + bob, 14.0, 14.0, Color::Css(palette::SHIRT));
    // eyes
    let face = Color::Css(palette::FACE);
    list.fill_rect(p.x - 3.0, p.y - 10.0 + bob, 2.0, 2.0, face);
    list.fill_rect(p.x + 1.0, p.y - 10.0 + bob, 2.0, 2.0, face);
}
