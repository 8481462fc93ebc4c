//! Canvas 2D backend

use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::Renderer;
use super::shapes::{GHOST_COLOR, Shape, TextAlign};

const EYE_COLOR: &str = "#1a1a2e";

/// Paints draw lists onto an HTML canvas
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// CSS pixel size
    size: (f64, f64),
}

impl CanvasRenderer {
    /// Returns None if the browser refuses a 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        let size = (canvas.client_width() as f64, canvas.client_height() as f64);
        let mut renderer = Self { canvas, ctx, size };
        renderer.resize(size.0, size.1, 1.0);
        Some(renderer)
    }

    /// Resize the backing store; drawing stays in CSS pixels
    pub fn resize(&mut self, css_width: f64, css_height: f64, dpr: f64) {
        self.size = (css_width, css_height);
        self.canvas.set_width((css_width * dpr) as u32);
        self.canvas.set_height((css_height * dpr) as u32);
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    }

    fn draw_ghost(&self, x: f64, y: f64, size: f64, alpha: f64) {
        let ctx = &self.ctx;
        let r = size / 2.0;
        let cx = x + r;

        ctx.set_global_alpha(alpha);
        ctx.set_fill_style_str(GHOST_COLOR);

        // Dome, straight sides, three scallops along the hem
        ctx.begin_path();
        let _ = ctx.arc(cx, y + r, r, PI, 0.0);
        ctx.line_to(x + size, y + size);
        let step = size / 3.0;
        for i in (0..3).rev() {
            let left = x + step * i as f64;
            ctx.quadratic_curve_to(left + step / 2.0, y + size - step / 2.0, left, y + size);
        }
        ctx.close_path();
        ctx.fill();

        ctx.set_fill_style_str(EYE_COLOR);
        for eye_x in [cx - r * 0.35, cx + r * 0.35] {
            ctx.begin_path();
            let _ = ctx.arc(eye_x, y + r * 0.9, r * 0.15, 0.0, PI * 2.0);
            ctx.fill();
        }
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, shapes: &[Shape]) {
        let ctx = &self.ctx;
        let (w, h) = self.size;

        for shape in shapes {
            match shape {
                Shape::Clear { color } => {
                    ctx.set_global_alpha(1.0);
                    ctx.set_fill_style_str(color);
                    ctx.fill_rect(0.0, 0.0, w, h);
                }
                Shape::Ghost { pos, size, alpha } => {
                    self.draw_ghost(pos.x as f64, pos.y as f64, *size as f64, *alpha as f64);
                }
                Shape::Dot {
                    center,
                    radius,
                    color,
                    alpha,
                } => {
                    ctx.set_global_alpha(*alpha as f64);
                    ctx.set_fill_style_str(color);
                    ctx.begin_path();
                    let _ = ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, PI * 2.0);
                    ctx.fill();
                }
                Shape::Dim { alpha } => {
                    ctx.set_global_alpha(*alpha as f64);
                    ctx.set_fill_style_str("#000000");
                    ctx.fill_rect(0.0, 0.0, w, h);
                }
                Shape::Text {
                    pos,
                    text,
                    px,
                    color,
                    align,
                } => {
                    ctx.set_global_alpha(1.0);
                    ctx.set_fill_style_str(color);
                    ctx.set_font(&format!("bold {}px sans-serif", px));
                    ctx.set_text_align(match align {
                        TextAlign::Left => "left",
                        TextAlign::Center => "center",
                        TextAlign::Right => "right",
                    });
                    let _ = ctx.fill_text(text, pos.x as f64, pos.y as f64);
                }
            }
        }

        ctx.set_global_alpha(1.0);
    }
}
