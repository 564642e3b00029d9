// Renderer struct that owns the 2d context of the point cloud canvas and
// redraws the whole field from scratch every frame.

use crate::field::ParticleField;
use crate::particle::Particle;
use std::f64::consts::PI;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasRenderer {
    pub context: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    // None when the canvas has no 2d context to give (already claimed as webgl, etc.)
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Option<Self>, JsValue> {
        let context = match canvas.get_context("2d")? {
            Some(context) => context.dyn_into::<CanvasRenderingContext2d>()?,
            None => return Ok(None),
        };
        Ok(Some(CanvasRenderer { context }))
    }

    // No trails: every frame starts from a transparent canvas
    pub fn clear(&self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    pub fn draw_particle(&self, particle: &Particle) -> Result<(), JsValue> {
        self.context.begin_path();
        self.context
            .arc(particle.pos[0], particle.pos[1], particle.size, 0.0, PI * 2.0)?;
        #[allow(deprecated)]
        self.context
            .set_fill_style(&JsValue::from_str(&particle.fill_style()));
        self.context.fill();
        Ok(())
    }

    pub fn draw_field(&self, field: &ParticleField) {
        self.clear(field.width(), field.height());
        for particle in field.particles() {
            // A single bad arc must not cost the rest of the frame
            let _ = self.draw_particle(particle);
        }
    }
}
