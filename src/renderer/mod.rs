//! Rendering module
//!
//! Everything is rectangle blits: frames are composed into backend-neutral
//! draw lists, and the Canvas2D backend (wasm only) replays them.

pub mod background;
#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod command;
pub mod scene;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderState;
pub use command::{Color, DrawCmd, DrawList};
pub use scene::{HudExtras, build_frame};
