// Single point of the cloud: position, drift velocity, size, color and opacity

use crate::color::Palette;
use crate::field::FieldConfig;
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub size: f64,
    pub palette: Palette,
    pub opacity: f64,
    // Last wrap-adjusted spawn coordinate. Not read by the update step.
    pub base: [f64; 2],
}

impl Particle {
    pub fn new(pos: [f64; 2], vel: [f64; 2], size: f64, palette: Palette) -> Particle {
        Particle {
            pos,
            vel,
            size,
            palette,
            opacity: Particle::baseline_for(size),
            base: pos,
        }
    }

    // Uniform position inside the canvas, small symmetric drift, random size and color
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        width: f64,
        height: f64,
        config: &FieldConfig,
    ) -> Particle {
        let pos_x = rng.gen::<f64>() * width;
        let pos_y = rng.gen::<f64>() * height;
        let vel_x = (rng.gen::<f64>() - 0.5) * 2.0 * config.drift_speed;
        let vel_y = (rng.gen::<f64>() - 0.5) * 2.0 * config.drift_speed;
        let size = rng.gen::<f64>() * (config.max_size - config.min_size) + config.min_size;
        let palette = Palette::choose(rng);
        Particle::new([pos_x, pos_y], [vel_x, vel_y], size, palette)
    }

    // Smaller points read as farther away, so they are dimmer
    pub fn baseline_for(size: f64) -> f64 {
        (size / 2.0) * 0.6 + 0.3
    }

    pub fn baseline_opacity(&self) -> f64 {
        Particle::baseline_for(self.size)
    }

    pub fn fill_style(&self) -> String {
        self.palette.color().to_rgba(self.opacity)
    }
}
