//! Procedural town-and-garden backdrop
//!
//! Generated once into a draw list; the Canvas2D backend rasterises it into
//! an offscreen canvas and later patches store images onto it as they load.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::command::{Color, DrawList};
use crate::assets::STORE_COUNT;
use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::palette;

/// Chunky background pixel size
const BG_TILE: f32 = 12.0;

const SKY_HEIGHT: f32 = 200.0;
const ROAD_Y: f32 = 260.0;
const ROAD: &str = "#d6b48f";

/// Where a store image goes (size is square)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreSlot {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

pub const STORE_SLOTS: [StoreSlot; STORE_COUNT] = [
    StoreSlot { x: 60.0, y: 120.0, size: 150.0 },
    StoreSlot { x: 280.0, y: 120.0, size: 150.0 },
    StoreSlot { x: 500.0, y: 120.0, size: 150.0 },
    StoreSlot { x: 720.0, y: 120.0, size: 150.0 },
];

const LAMP_XS: [f32; 12] = [
    60.0, 140.0, 220.0, 300.0, 380.0, 460.0, 540.0, 620.0, 700.0, 780.0, 860.0, 940.0,
];
const CONNECTOR_XS: [f32; 4] = [160.0, 380.0, 600.0, 820.0];
const POT_FLOWERS: [&str; 3] = ["#ff6b8a", "#ffd76b", "#ffb3d1"];
const BED_FLOWERS: [&str; 4] = ["#ff4d6d", "#ffd76b", "#7cff9e", "#ff8bd1"];

/// Build the full backdrop. Only grass tufts are random, drawn from `seed`.
pub fn generate(seed: u64) -> DrawList {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut g = DrawList::with_capacity(1024);

    sky(&mut g);
    grass(&mut g, &mut rng);
    roads(&mut g);

    for &x in LAMP_XS.iter().filter(|&&x| x > 0.0 && x < WORLD_WIDTH - 8.0) {
        lamp(&mut g, x, ROAD_Y);
    }

    for slot in &STORE_SLOTS {
        flower_pot(&mut g, slot.x - 18.0, slot.y + 140.0);
        flower_pot(&mut g, slot.x + slot.size + 6.0, slot.y + 140.0);
    }
    let mut px = 100.0;
    while px < WORLD_WIDTH {
        flower_pot(&mut g, px, 250.0);
        px += 160.0;
    }

    garden(&mut g);
    g
}

fn sky(g: &mut DrawList) {
    g.fill_rect(0.0, 0.0, WORLD_WIDTH, SKY_HEIGHT, Color::Css("#bfe9ff"));

    let cloud = Color::Css("#ffffff");
    for i in 0..6 {
        let cx = 80.0 + i as f32 * 140.0;
        let cy = 60.0 + (i % 2) as f32 * 20.0;
        g.fill_rect(cx, cy, BG_TILE * 2.0, BG_TILE, cloud);
        g.fill_rect(cx + BG_TILE, cy - BG_TILE, BG_TILE * 2.0, BG_TILE, cloud);
        g.fill_rect(cx + BG_TILE * 2.0, cy, BG_TILE * 2.0, BG_TILE, cloud);
    }
}

fn grass(g: &mut DrawList, rng: &mut Pcg32) {
    g.fill_rect(
        0.0,
        SKY_HEIGHT,
        WORLD_WIDTH,
        WORLD_HEIGHT - SKY_HEIGHT,
        Color::Css(palette::GRASS),
    );

    let tuft = Color::Css(palette::GRASS_DARK);
    let mut x = 0.0;
    while x < WORLD_WIDTH {
        if rng.random_bool(0.5) {
            let y = 220.0 + rng.random_range(0.0f32..200.0);
            g.fill_rect(x, y, BG_TILE, BG_TILE, tuft);
        }
        x += BG_TILE * 2.0;
    }
}

fn roads(g: &mut DrawList) {
    let road = Color::Css(ROAD);
    g.fill_rect(0.0, ROAD_Y, WORLD_WIDTH, BG_TILE * 3.0, road);

    let dash = Color::Css("#f3e3c3");
    let mut x = 0.0;
    while x < WORLD_WIDTH {
        g.fill_rect(x + BG_TILE, ROAD_Y + 12.0, BG_TILE * 2.0, BG_TILE / 2.0, dash);
        x += BG_TILE * 4.0;
    }

    for &cx in &CONNECTOR_XS {
        g.fill_rect(cx, SKY_HEIGHT, BG_TILE * 3.0, 120.0, road);
    }
}

fn lamp(g: &mut DrawList, x: f32, y: f32) {
    g.fill_rect(x, y - 40.0, 6.0, 40.0, Color::Css("#5c3a21"));
    g.fill_rect(x - 6.0, y - 50.0, 18.0, 12.0, Color::Css("#ffd76b"));
    g.fill_rect(x - 2.0, y - 46.0, 6.0, 6.0, Color::Css("#fff3b0"));
}

fn flower_pot(g: &mut DrawList, x: f32, y: f32) {
    let pot = Color::Css("#8b4f30");
    g.fill_rect(x - 6.0, y - 6.0, 12.0, 8.0, pot);
    g.fill_rect(x - 8.0, y + 2.0, 16.0, 4.0, pot);
    g.fill_rect(x - 4.0, y - 4.0, 8.0, 2.0, Color::Css("#5a3f2a"));
    for (i, &col) in POT_FLOWERS.iter().enumerate() {
        g.fill_rect(x - 4.0 + i as f32 * 4.0, y - 10.0, 4.0, 4.0, Color::Css(col));
    }
}

/// Garden rectangle (x, y, w, h) along the bottom edge
pub fn garden_rect() -> (f32, f32, f32, f32) {
    (20.0, WORLD_HEIGHT - 160.0, WORLD_WIDTH - 40.0, 140.0)
}

fn garden(g: &mut DrawList) {
    let (gx, gy, gw, gh) = garden_rect();
    g.fill_rect(gx, gy, gw, gh, Color::Css("#66bf79"));

    // Stepping-stone path down the middle
    let stone = Color::Css("#d8bfa6");
    let path_x = gx + (gw / 2.0).floor() - BG_TILE;
    g.fill_rect(path_x, gy + 8.0, BG_TILE * 2.0, gh - 16.0, stone);
    let mut sy = gy + 12.0;
    while sy < gy + gh - 20.0 {
        g.fill_rect(path_x + 2.0, sy, BG_TILE * 2.0 - 4.0, BG_TILE - 2.0, stone);
        sy += BG_TILE * 1.8;
    }

    // Planting beds; colors cycle by (col + row) so every bed matches
    const BEDS: usize = 4;
    const BED_GAP: f32 = 18.0;
    const BED_H: f32 = 56.0;
    let bed_w = ((gw - BED_GAP * (BEDS as f32 + 1.0)) / BEDS as f32).floor();
    let plant_cols = (bed_w / (BG_TILE / 1.2)).floor() as usize;
    let plant = (BG_TILE * 0.6).round().max(4.0);
    let center = (plant / 3.0).floor().max(1.0);
    for b in 0..BEDS {
        let bx = gx + BED_GAP + b as f32 * (bed_w + BED_GAP);
        let by = gy + 22.0;
        g.fill_rect(bx, by, bed_w, BED_H, Color::Css("#4f2f1f"));

        for col in 0..plant_cols {
            let px = bx + 6.0 + col as f32 * (plant + 2.0);
            for row in 0..3 {
                let py = by + 6.0 + row as f32 * (plant + 6.0);
                let color = BED_FLOWERS[(col + row) % BED_FLOWERS.len()];
                g.fill_rect(px, py, plant, plant, Color::Css(color));
                g.fill_rect(px + center, py + center, center, center, Color::Css("#8b3a4a"));
            }
        }
    }

    // Fence posts and rails
    let wood = Color::Css("#8b5a3c");
    let mut fx = gx - 8.0;
    while fx <= gx + gw + 8.0 {
        g.fill_rect(fx, gy - 8.0, 8.0, gh + 16.0, wood);
        fx += 24.0;
    }
    g.fill_rect(gx - 8.0, gy - 10.0, gw + 16.0, 8.0, wood);
    g.fill_rect(gx - 8.0, gy + gh + 4.0, gw + 16.0, 8.0, wood);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reproducible() {
        let a: Vec<_> = generate(42).rects().collect();
        let b: Vec<_> = generate(42).rects().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_only_tufts_vary() {
        let dark = Color::Css(palette::GRASS_DARK);
        let strip = |seed| -> Vec<_> { generate(seed).rects().filter(|r| r.4 != dark).collect() };
        assert_eq!(strip(1), strip(2));
    }

    #[test]
    fn test_tufts_in_band() {
        let dark = Color::Css(palette::GRASS_DARK);
        let list = generate(7);
        let tufts: Vec<_> = list.rects().filter(|r| r.4 == dark).collect();
        assert!(!tufts.is_empty());
        assert!(tufts.len() <= (WORLD_WIDTH / 24.0) as usize);
        for (x, y, w, h, _) in tufts {
            assert!(y >= 220.0 && y < 420.0);
            assert_eq!(x % 24.0, 0.0);
            assert_eq!((w, h), (BG_TILE, BG_TILE));
        }
    }

    #[test]
    fn test_bed_colors_cycle_by_position() {
        let list = generate(3);
        let (gx, gy, _, _) = garden_rect();
        let first_plant = list
            .rects()
            .find(|r| r.0 == gx + 18.0 + 6.0 && r.1 == gy + 22.0 + 6.0)
            .map(|r| r.4);
        assert_eq!(first_plant, Some(Color::Css(BED_FLOWERS[0])));

        let beds = list.rects().filter(|r| r.4 == Color::Css("#4f2f1f")).count();
        assert_eq!(beds, 4);
    }

    #[test]
    fn test_twelve_lamps() {
        let heads = generate(0)
            .rects()
            .filter(|r| r.4 == Color::Css("#fff3b0"))
            .count();
        assert_eq!(heads, 12);
    }
}
