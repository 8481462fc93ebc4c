//! Rendering module
//!
//! `shapes` turns a read-only view of the game into draw primitives; a
//! `Renderer` paints them. Nothing here mutates simulation state.

pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use shapes::{Shape, TextAlign, hud_line, scene};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

/// Paints a frame's draw list
pub trait Renderer {
    fn render(&mut self, shapes: &[Shape]);
}
