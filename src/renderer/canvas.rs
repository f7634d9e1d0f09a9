//! Canvas2D backend
//!
//! Replays draw lists onto the page canvas. The procedural background is
//! rasterised once into an offscreen canvas at startup and blitted every
//! frame; store images are composited onto that cache when they arrive.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement};

use super::background::{self, STORE_SLOTS};
use super::command::{DrawCmd, DrawList};
use crate::assets::{AssetId, AssetRegistry, STORE_COUNT};
use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::error::GameError;

pub struct CanvasRenderState {
    ctx: CanvasRenderingContext2d,
    background: HtmlCanvasElement,
    bg_ctx: CanvasRenderingContext2d,
    sprite: Option<HtmlImageElement>,
    stores: [Option<HtmlImageElement>; STORE_COUNT],
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, GameError> {
    let ctx = canvas
        .get_context("2d")?
        .ok_or(GameError::Context)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| GameError::Context)?;
    ctx.set_image_smoothing_enabled(false);
    Ok(ctx)
}

impl CanvasRenderState {
    /// Set up the page canvas and build the cached background
    pub fn new(
        document: &Document,
        canvas: &HtmlCanvasElement,
        background_seed: u64,
    ) -> Result<Self, GameError> {
        canvas.set_width(WORLD_WIDTH as u32);
        canvas.set_height(WORLD_HEIGHT as u32);
        let ctx = context_2d(canvas)?;

        let bg: HtmlCanvasElement = document
            .create_element("canvas")?
            .dyn_into()
            .map_err(|_| GameError::Js("offscreen canvas".to_string()))?;
        bg.set_width(WORLD_WIDTH as u32);
        bg.set_height(WORLD_HEIGHT as u32);
        let bg_ctx = context_2d(&bg)?;

        let stores: [Option<HtmlImageElement>; STORE_COUNT] = Default::default();
        let list = background::generate(background_seed);
        replay(&bg_ctx, &list, None, None)?;
        log::info!("Background cached ({} draw commands)", list.len());

        Ok(Self {
            ctx,
            background: bg,
            bg_ctx,
            sprite: None,
            stores,
        })
    }

    /// Hand over a decoded image
    pub fn set_image(&mut self, id: AssetId, image: HtmlImageElement) {
        match id {
            AssetId::PlayerSprite => self.sprite = Some(image),
            AssetId::Store(i) => {
                if let Some(slot) = self.stores.get_mut(i) {
                    *slot = Some(image);
                }
            }
        }
    }

    /// Composite newly ready store images onto the cached background
    pub fn patch_stores(&mut self, assets: &mut AssetRegistry) -> Result<(), GameError> {
        for i in assets.take_unpatched_stores() {
            let (Some(image), Some(slot)) = (self.stores[i].as_ref(), STORE_SLOTS.get(i)) else {
                continue;
            };
            self.bg_ctx
                .draw_image_with_html_image_element_and_dw_and_dh(
                    image,
                    slot.x as f64,
                    slot.y as f64,
                    slot.size as f64,
                    slot.size as f64,
                )?;
            log::debug!("Store {} composited onto background", i + 1);
        }
        Ok(())
    }

    /// Draw one frame
    pub fn render(&self, list: &DrawList) -> Result<(), GameError> {
        replay(
            &self.ctx,
            list,
            Some(&self.background),
            self.sprite.as_ref(),
        )
    }
}

fn replay(
    ctx: &CanvasRenderingContext2d,
    list: &DrawList,
    background: Option<&HtmlCanvasElement>,
    sprite: Option<&HtmlImageElement>,
) -> Result<(), GameError> {
    for cmd in list.commands() {
        match cmd {
            DrawCmd::Clear => ctx.clear_rect(0.0, 0.0, WORLD_WIDTH as f64, WORLD_HEIGHT as f64),
            DrawCmd::Background => {
                if let Some(bg) = background {
                    ctx.draw_image_with_html_canvas_element(bg, 0.0, 0.0)?;
                }
            }
            DrawCmd::FillRect { x, y, w, h, color } => {
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_rect(*x as f64, *y as f64, *w as f64, *h as f64);
            }
            DrawCmd::FillText {
                text,
                x,
                y,
                color,
                font,
            } => {
                ctx.set_font(font);
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_text(text, *x as f64, *y as f64)?;
            }
            DrawCmd::Sprite {
                x,
                y,
                w,
                h,
                flip_x,
            } => {
                let Some(image) = sprite else { continue };
                let (x, y, w, h) = (*x as f64, *y as f64, *w as f64, *h as f64);
                ctx.save();
                if *flip_x {
                    ctx.translate(x + w, y)?;
                    ctx.scale(-1.0, 1.0)?;
                    ctx.draw_image_with_html_image_element_and_dw_and_dh(image, 0.0, 0.0, w, h)?;
                } else {
                    ctx.draw_image_with_html_image_element_and_dw_and_dh(image, x, y, w, h)?;
                }
                ctx.restore();
            }
            DrawCmd::Alpha(a) => ctx.set_global_alpha(*a as f64),
        }
    }
    Ok(())
}
