//! Backend-neutral draw commands
//!
//! Frame composition emits a flat list of rectangle blits, text and sprite
//! draws; a backend replays them in order.

use std::borrow::Cow;

/// Fill color
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// Any CSS color string
    Css(&'static str),
    /// RGB with alpha 0-1
    Rgba(u8, u8, u8, f32),
}

impl Color {
    pub fn to_css(&self) -> Cow<'static, str> {
        match *self {
            Color::Css(s) => Cow::Borrowed(s),
            Color::Rgba(r, g, b, a) => {
                Cow::Owned(format!("rgba({}, {}, {}, {})", r, g, b, a.clamp(0.0, 1.0)))
            }
        }
    }
}

/// A single draw operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Clear the whole surface
    Clear,
    /// Blit the cached background raster
    Background,
    FillRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    FillText {
        text: String,
        x: f32,
        y: f32,
        color: Color,
        font: &'static str,
    },
    /// Draw the loaded player sprite, optionally mirrored horizontally
    Sprite {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        flip_x: bool,
    },
    /// Global alpha for subsequent commands
    Alpha(f32),
}

/// Ordered list of draw commands
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            cmds: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.cmds.push(DrawCmd::FillRect { x, y, w, h, color });
    }

    pub fn text(&mut self, text: impl Into<String>, x: f32, y: f32, color: Color, font: &'static str) {
        self.cmds.push(DrawCmd::FillText {
            text: text.into(),
            x,
            y,
            color,
            font,
        });
    }

    pub fn alpha(&mut self, alpha: f32) {
        self.cmds.push(DrawCmd::Alpha(alpha.clamp(0.0, 1.0)));
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.cmds
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Filled rects only, handy for inspecting generated art
    pub fn rects(&self) -> impl Iterator<Item = (f32, f32, f32, f32, Color)> + '_ {
        self.cmds.iter().filter_map(|c| match *c {
            DrawCmd::FillRect { x, y, w, h, color } => Some((x, y, w, h, color)),
            _ => None,
        })
    }
}
