// The particle field: a fixed-size set of particles drifting over a canvas,
// wrapping at the edges and pushed away from the pointer.
//
// Everything here is plain arithmetic over `Particle`s. The browser side
// (`point_cloud`, `renderer`, `animation`) only feeds it sizes, pointer
// positions and frame ticks.

use crate::animation::FrameContext;
use crate::particle::Particle;
use crate::pointer::PointerState;
use rand::Rng;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub interaction_radius: f64,
    // Each velocity component is drawn from [-drift_speed, drift_speed)
    pub drift_speed: f64,
    pub min_size: f64,
    pub max_size: f64,
    // Displacement per frame at zero distance from the pointer
    pub push_strength: f64,
    // Opacity gained per frame at zero distance from the pointer
    pub highlight_gain: f64,
    // Fraction of the gap to baseline opacity closed per frame
    pub opacity_easing: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            particle_count: 150,
            interaction_radius: PointerState::DEFAULT_RADIUS,
            drift_speed: 0.25,
            min_size: 0.5,
            max_size: 2.0,
            push_strength: 5.0,
            highlight_gain: 0.3,
            opacity_easing: 0.05,
        }
    }
}

/// Result of a particle sitting inside the pointer's interaction radius.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Repulsion {
    /// Linear falloff in `(0, 1]`: 1 at the pointer, 0 at the radius.
    pub force: f64,
    /// Displacement to add to the particle, pointing away from the pointer.
    pub displacement: Vector2<f64>,
}

/// Repulsion felt by a particle at `pos` from a pointer at `pointer`.
/// `None` when the particle is at or beyond `radius`.
pub fn repulsion(
    pointer: Vector2<f64>,
    pos: Vector2<f64>,
    radius: f64,
    strength: f64,
) -> Option<Repulsion> {
    let to_pointer = vecmath::vec2_sub(pointer, pos);
    let distance = vecmath::vec2_len(to_pointer);
    if distance >= radius {
        return None;
    }
    let force = (radius - distance) / radius;
    // atan2 keeps a particle directly under the pointer well defined
    let angle = to_pointer[1].atan2(to_pointer[0]);
    let toward = [angle.cos(), angle.sin()];
    Some(Repulsion {
        force,
        displacement: vecmath::vec2_scale(toward, -force * strength),
    })
}

/// Wraps one coordinate across the edges of `[-size, extent + size]`.
/// Returns the new coordinate when a wrap happened.
pub fn wrap_axis(value: f64, extent: f64, size: f64) -> Option<f64> {
    if value > extent + size {
        Some(-size)
    } else if value < -size {
        Some(extent + size)
    } else {
        None
    }
}

fn wrap(particle: &mut Particle, bounds: Vector2<f64>) {
    for axis in 0..2 {
        if let Some(wrapped) = wrap_axis(particle.pos[axis], bounds[axis], particle.size) {
            particle.pos[axis] = wrapped;
            particle.base[axis] = wrapped;
        }
    }
}

/// Advances one particle by a single frame.
///
/// Drift, then wrap at the edges, then either the pointer pushes the particle
/// and brightens it, or its opacity eases back toward its baseline. A push can
/// carry a particle over an edge, so the wrap is applied again afterwards.
pub fn update_particle(
    particle: &mut Particle,
    bounds: Vector2<f64>,
    pointer: &PointerState,
    config: &FieldConfig,
) {
    particle.pos = vecmath::vec2_add(particle.pos, particle.vel);
    wrap(particle, bounds);

    let push = pointer
        .position()
        .and_then(|p| repulsion(p, particle.pos, pointer.radius, config.push_strength));

    match push {
        Some(push) => {
            particle.pos = vecmath::vec2_add(particle.pos, push.displacement);
            particle.opacity = (particle.opacity + push.force * config.highlight_gain).min(1.0);
            wrap(particle, bounds);
        }
        None => {
            let baseline = particle.baseline_opacity();
            particle.opacity += (baseline - particle.opacity) * config.opacity_easing;
            particle.opacity = particle.opacity.min(1.0);
        }
    }
}

pub struct ParticleField {
    width: f64,
    height: f64,
    config: FieldConfig,
    particles: Vec<Particle>,
    frames: u64,
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(
        width: f64,
        height: f64,
        config: FieldConfig,
        rng: &mut R,
    ) -> ParticleField {
        let mut field = ParticleField {
            width,
            height,
            config,
            particles: Vec::with_capacity(config.particle_count),
            frames: 0,
        };
        field.create_particles(rng);
        field
    }

    /// Throws away every particle and spawns a fresh set inside the current bounds.
    pub fn create_particles<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.particles.clear();
        for _ in 0..self.config.particle_count {
            let p = Particle::random(rng, self.width, self.height, &self.config);
            self.particles.push(p);
        }
    }

    // Particles are regenerated, not rescaled
    pub fn resize<R: Rng + ?Sized>(&mut self, width: f64, height: f64, rng: &mut R) {
        self.width = width;
        self.height = height;
        self.create_particles(rng);
    }

    pub fn tick(&mut self, pointer: &PointerState, frame: &FrameContext) {
        let bounds = [self.width, self.height];
        for particle in &mut self.particles {
            update_particle(particle, bounds, pointer, &self.config);
        }
        self.frames = frame.index + 1;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    // Frames ticked so far; diagnostics only, the update step never reads it
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Palette;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f64 = 1e-9;

    fn still(x: f64, y: f64, size: f64) -> Particle {
        Particle::new([x, y], [0.0, 0.0], size, Palette::Cyan)
    }

    #[test]
    fn new_field_has_configured_count_inside_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let field = ParticleField::new(1024.0, 768.0, FieldConfig::default(), &mut rng);
        assert_eq!(field.particles().len(), 150);
        for p in field.particles() {
            assert!(p.pos[0] >= 0.0 && p.pos[0] <= 1024.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] <= 768.0);
        }
    }

    #[test]
    fn resize_regenerates_inside_new_bounds() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut field = ParticleField::new(1920.0, 1080.0, FieldConfig::default(), &mut rng);
        let before = field.particles().to_vec();
        field.resize(320.0, 240.0, &mut rng);
        assert_eq!(field.particles().len(), 150);
        assert_eq!(field.width(), 320.0);
        assert_eq!(field.height(), 240.0);
        assert_ne!(before, field.particles().to_vec());
        for p in field.particles() {
            assert!(p.pos[0] >= 0.0 && p.pos[0] <= 320.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] <= 240.0);
        }
    }

    #[test]
    fn same_seed_same_field() {
        let config = FieldConfig::default();
        let a = ParticleField::new(500.0, 500.0, config, &mut StdRng::seed_from_u64(9));
        let b = ParticleField::new(500.0, 500.0, config, &mut StdRng::seed_from_u64(9));
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn wrap_axis_edges() {
        assert_eq!(wrap_axis(101.5, 100.0, 1.0), Some(-1.0));
        assert_eq!(wrap_axis(-1.5, 100.0, 1.0), Some(101.0));
        assert_eq!(wrap_axis(101.0, 100.0, 1.0), None);
        assert_eq!(wrap_axis(-1.0, 100.0, 1.0), None);
        assert_eq!(wrap_axis(50.0, 100.0, 1.0), None);
    }

    #[test]
    fn drift_past_right_edge_lands_on_negative_size() {
        let mut p = Particle::new([100.9, 50.0], [0.2, 0.0], 1.0, Palette::Teal);
        let pointer = PointerState::default();
        update_particle(&mut p, [100.0, 100.0], &pointer, &FieldConfig::default());
        assert_eq!(p.pos, [-1.0, 50.0]);
        assert_eq!(p.base[0], -1.0);
        assert_eq!(p.base[1], 50.0);
    }

    #[test]
    fn drift_past_each_edge() {
        let config = FieldConfig::default();
        let pointer = PointerState::default();
        let bounds = [100.0, 80.0];

        let mut left = Particle::new([-1.9, 10.0], [-0.2, 0.0], 2.0, Palette::Cyan);
        update_particle(&mut left, bounds, &pointer, &config);
        assert_eq!(left.pos, [102.0, 10.0]);

        let mut bottom = Particle::new([10.0, 81.9], [0.0, 0.2], 2.0, Palette::Cyan);
        update_particle(&mut bottom, bounds, &pointer, &config);
        assert_eq!(bottom.pos, [10.0, -2.0]);

        let mut top = Particle::new([10.0, -1.9], [0.0, -0.2], 2.0, Palette::Cyan);
        update_particle(&mut top, bounds, &pointer, &config);
        assert_eq!(top.pos, [10.0, 82.0]);
    }

    #[test]
    fn repulsion_has_linear_falloff_away_from_pointer() {
        let push = repulsion([100.0, 100.0], [130.0, 140.0], 150.0, 5.0).unwrap();
        // distance 50, force (150 - 50) / 150
        assert!((push.force - 2.0 / 3.0).abs() < EPS);
        let magnitude = vecmath::vec2_len(push.displacement);
        assert!((magnitude - push.force * 5.0).abs() < EPS);
        assert!((push.displacement[0] - 0.6 * magnitude).abs() < EPS);
        assert!((push.displacement[1] - 0.8 * magnitude).abs() < EPS);
    }

    #[test]
    fn repulsion_stops_at_radius() {
        assert_eq!(repulsion([0.0, 0.0], [150.0, 0.0], 150.0, 5.0), None);
        assert_eq!(repulsion([0.0, 0.0], [200.0, 10.0], 150.0, 5.0), None);
        assert!(repulsion([0.0, 0.0], [149.0, 0.0], 150.0, 5.0).is_some());
    }

    #[test]
    fn repulsion_under_pointer_is_full_strength() {
        let push = repulsion([10.0, 10.0], [10.0, 10.0], 150.0, 5.0).unwrap();
        assert_eq!(push.force, 1.0);
        assert!((vecmath::vec2_len(push.displacement) - 5.0).abs() < EPS);
    }

    #[test]
    fn pointer_pushes_and_brightens() {
        let mut p = still(130.0, 140.0, 1.0);
        let before = p.opacity;
        let pointer = PointerState::at(100.0, 100.0, 150.0);
        update_particle(&mut p, [800.0, 600.0], &pointer, &FieldConfig::default());
        assert!((p.pos[0] - 132.0).abs() < EPS);
        assert!((p.pos[1] - (140.0 + 8.0 / 3.0)).abs() < EPS);
        assert!((p.opacity - (before + 0.2)).abs() < EPS);
    }

    #[test]
    fn brightening_caps_at_one() {
        let mut p = still(10.0, 10.0, 2.0);
        p.opacity = 0.95;
        let pointer = PointerState::at(10.0, 11.0, 150.0);
        update_particle(&mut p, [800.0, 600.0], &pointer, &FieldConfig::default());
        assert_eq!(p.opacity, 1.0);
    }

    #[test]
    fn push_over_edge_is_wrapped() {
        let mut p = still(0.5, 50.0, 1.0);
        let pointer = PointerState::at(3.0, 50.0, 150.0);
        update_particle(&mut p, [100.0, 100.0], &pointer, &FieldConfig::default());
        assert_eq!(p.pos[0], 101.0);
    }

    #[test]
    fn opacity_eases_without_pointer() {
        let mut p = still(50.0, 50.0, 1.0);
        let baseline = p.baseline_opacity();
        p.opacity = 1.0;
        update_particle(&mut p, [100.0, 100.0], &PointerState::default(), &FieldConfig::default());
        assert!((p.opacity - (1.0 + (baseline - 1.0) * 0.05)).abs() < EPS);
    }

    #[test]
    fn opacity_eases_outside_radius() {
        let mut p = still(50.0, 50.0, 1.0);
        let baseline = p.baseline_opacity();
        p.opacity = 0.0;
        let pointer = PointerState::at(400.0, 400.0, 150.0);
        update_particle(&mut p, [800.0, 800.0], &pointer, &FieldConfig::default());
        assert!((p.opacity - baseline * 0.05).abs() < EPS);
    }

    #[test]
    fn tick_updates_every_particle_and_counts_frames() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut field = ParticleField::new(640.0, 480.0, FieldConfig::default(), &mut rng);
        let before = field.particles().to_vec();
        let frame = FrameContext::new(0, 16.0);
        field.tick(&PointerState::default(), &frame);
        assert_eq!(field.frames(), 1);
        for (old, new) in before.iter().zip(field.particles()) {
            let moved = vecmath::vec2_add(old.pos, old.vel);
            assert!(
                (new.pos[0] - moved[0]).abs() < EPS || new.pos[0] == -new.size
                    || new.pos[0] == 640.0 + new.size
            );
            assert!(
                (new.pos[1] - moved[1]).abs() < EPS || new.pos[1] == -new.size
                    || new.pos[1] == 480.0 + new.size
            );
        }
    }

    prop_compose! {
        fn in_bounds()(width in 1.0f64..2000.0, height in 1.0f64..2000.0)
            (fx in 0.0f64..=1.0, fy in 0.0f64..=1.0,
             vx in -0.25f64..0.25, vy in -0.25f64..0.25,
             size in 0.5f64..2.0, opacity in 0.0f64..=1.0,
             width in Just(width), height in Just(height))
            -> (Particle, [f64; 2])
        {
            let mut p = Particle::new(
                [fx * (width + 2.0 * size) - size, fy * (height + 2.0 * size) - size],
                [vx, vy],
                size,
                Palette::Cyan,
            );
            p.opacity = opacity;
            (p, [width, height])
        }
    }

    fn pointer_strategy() -> impl Strategy<Value = PointerState> {
        prop_oneof![
            Just(PointerState::default()),
            (-100.0f64..2100.0, -100.0f64..2100.0).prop_map(|(x, y)| PointerState::at(x, y, 150.0)),
        ]
    }

    proptest! {
        #[test]
        fn update_keeps_particle_in_bounds_and_opacity_in_unit_range(
            (mut p, bounds) in in_bounds(),
            pointers in proptest::collection::vec(pointer_strategy(), 1..40),
        ) {
            let config = FieldConfig::default();
            for pointer in &pointers {
                update_particle(&mut p, bounds, pointer, &config);
                prop_assert!(p.opacity >= 0.0 && p.opacity <= 1.0);
                prop_assert!(p.pos[0] >= -p.size && p.pos[0] <= bounds[0] + p.size);
                prop_assert!(p.pos[1] >= -p.size && p.pos[1] <= bounds[1] + p.size);
            }
        }

        #[test]
        fn idle_opacity_converges_geometrically(
            opacity in 0.0f64..=1.0,
            size in 0.5f64..2.0,
            frames in 0usize..200,
        ) {
            let mut p = still(500.0, 500.0, size);
            p.opacity = opacity;
            let baseline = p.baseline_opacity();
            let config = FieldConfig::default();
            for _ in 0..frames {
                update_particle(&mut p, [1000.0, 1000.0], &PointerState::default(), &config);
            }
            let expected = (opacity - baseline).abs() * 0.95f64.powi(frames as i32);
            prop_assert!(((p.opacity - baseline).abs() - expected).abs() < 1e-9);
        }
    }
}
