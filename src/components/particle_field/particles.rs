//! Ambient particle simulation.
//!
//! Pure state, no drawing: particles drift at a constant velocity, pulse
//! their opacity on a sine and wrap to the opposite edge when they leave the
//! viewport. Randomness comes from a seeded ChaCha stream so a given seed
//! always produces the same field.

use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::config::{FieldConfig, PointerConfig, ResizePolicy};

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
	pub base_alpha: f64,
	pub phase: f64, // For pulsing
}

/// Owns the particle set and the bounds it wraps within.
pub struct ParticleField {
	particles: Vec<Particle>,
	config: FieldConfig,
	width: f64,
	height: f64,
	pointer: Option<(f64, f64)>,
	rng: ChaCha8Rng,
}

impl ParticleField {
	/// Size the field to `width × height` and spawn
	/// `config.particle_count(width)` particles from `seed`.
	pub fn new(config: FieldConfig, width: f64, height: f64, seed: u64) -> Self {
		let mut rng = ChaCha8Rng::seed_from_u64(seed);
		let (width, height) = (extent(width), extent(height));
		let particles = (0..config.particle_count(width))
			.map(|_| spawn(&config, width, height, &mut rng))
			.collect();

		Self {
			particles,
			config,
			width,
			height,
			pointer: None,
			rng,
		}
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	/// Pointer position in surface pixels, or `None` once it leaves.
	pub fn set_pointer(&mut self, pointer: Option<(f64, f64)>) {
		self.pointer = pointer;
	}

	/// Advance every particle by one frame.
	pub fn tick(&mut self) {
		let (width, height) = (self.width, self.height);
		let step = self.config.phase_step;
		let push = self.config.pointer.zip(self.pointer);

		for p in &mut self.particles {
			if let Some((influence, (px, py))) = push {
				repel(p, influence, px, py);
			}
			p.x = wrap(p.x + p.vx, width);
			p.y = wrap(p.y + p.vy, height);
			p.phase = (p.phase + step) % TAU;
		}
	}

	/// Instantaneous opacity of `particle` at its current phase.
	pub fn opacity(&self, particle: &Particle) -> f64 {
		pulse_opacity(
			particle.base_alpha,
			particle.phase,
			self.config.pulse_amplitude,
		)
	}

	/// Adopt new bounds according to the configured [`ResizePolicy`].
	///
	/// A zero-area viewport collapses positions to the degenerate bound but
	/// never changes the particle set; particles are scattered again once a
	/// later resize restores a usable area.
	pub fn resize(&mut self, width: f64, height: f64) {
		let (width, height) = (extent(width), extent(height));
		let degenerate = width <= 0.0 || height <= 0.0;

		if self.config.resize_policy == ResizePolicy::Regenerate && !degenerate {
			self.particles = (0..self.config.particle_count(width))
				.map(|_| spawn(&self.config, width, height, &mut self.rng))
				.collect();
		} else {
			let rng = &mut self.rng;
			for p in &mut self.particles {
				p.x = rebase(p.x, self.width, width, rng);
				p.y = rebase(p.y, self.height, height, rng);
			}

			if self.config.resize_policy == ResizePolicy::Reconcile && !degenerate {
				let target = self.config.particle_count(width);
				if self.particles.len() > target {
					self.particles.truncate(target);
				}
				while self.particles.len() < target {
					self.particles
						.push(spawn(&self.config, width, height, &mut self.rng));
				}
			}
		}

		self.width = width;
		self.height = height;
	}

	/// Pairs closer than `link_distance`, as `(i, j, distance)` with `i < j`.
	pub fn links(&self) -> Vec<(usize, usize, f64)> {
		let max = self.config.link_distance;
		let mut links = Vec::new();

		for (i, a) in self.particles.iter().enumerate() {
			for (j, b) in self.particles.iter().enumerate().skip(i + 1) {
				let (dx, dy) = (a.x - b.x, a.y - b.y);
				let distance = (dx * dx + dy * dy).sqrt();
				if distance < max {
					links.push((i, j, distance));
				}
			}
		}

		links
	}
}

/// `base + sin(phase) * amplitude`, clamped to a valid alpha.
pub fn pulse_opacity(base: f64, phase: f64, amplitude: f64) -> f64 {
	let alpha = base + phase.sin() * amplitude;
	if alpha.is_nan() {
		return 0.0;
	}
	alpha.clamp(0.0, 1.0)
}

/// Wrap one coordinate into `[0, max]`: leaving one edge re-enters the other.
pub fn wrap(value: f64, max: f64) -> f64 {
	if max <= 0.0 {
		0.0
	} else if value < 0.0 {
		max
	} else if value > max {
		0.0
	} else {
		value
	}
}

fn extent(value: f64) -> f64 {
	if value.is_finite() { value.max(0.0) } else { 0.0 }
}

fn spawn<R: Rng + ?Sized>(config: &FieldConfig, width: f64, height: f64, rng: &mut R) -> Particle {
	Particle {
		x: rng.r#gen::<f64>() * width,
		y: rng.r#gen::<f64>() * height,
		vx: signed_speed(config, rng),
		vy: signed_speed(config, rng),
		size: band(config.size_min, config.size_max, rng),
		base_alpha: band(config.opacity_min, config.opacity_max, rng),
		phase: rng.r#gen::<f64>() * TAU,
	}
}

fn band<R: Rng + ?Sized>(min: f64, max: f64, rng: &mut R) -> f64 {
	min + rng.r#gen::<f64>() * (max - min)
}

fn signed_speed<R: Rng + ?Sized>(config: &FieldConfig, rng: &mut R) -> f64 {
	let speed = band(config.speed_min, config.speed_max, rng);
	if rng.gen_bool(0.5) { speed } else { -speed }
}

/// Carry a coordinate from an old extent to a new one.
fn rebase<R: Rng + ?Sized>(value: f64, old: f64, new: f64, rng: &mut R) -> f64 {
	if new <= 0.0 {
		0.0
	} else if old <= 0.0 {
		rng.r#gen::<f64>() * new
	} else {
		wrap(value * (new / old), new)
	}
}

/// Push a particle directly away from the pointer. Velocity is untouched.
fn repel(p: &mut Particle, influence: PointerConfig, px: f64, py: f64) {
	let (dx, dy) = (px - p.x, py - p.y);
	let distance = (dx * dx + dy * dy).sqrt();
	if distance < influence.radius && distance > f64::EPSILON {
		let angle = dy.atan2(dx);
		p.x -= angle.cos() * influence.strength;
		p.y -= angle.sin() * influence.strength;
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	fn in_bounds(field: &ParticleField) -> bool {
		field.particles().iter().all(|p| {
			(0.0..=field.width()).contains(&p.x) && (0.0..=field.height()).contains(&p.y)
		})
	}

	fn still(x: f64, y: f64) -> Particle {
		Particle {
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			size: 2.0,
			base_alpha: 0.3,
			phase: 0.0,
		}
	}

	#[test]
	fn same_seed_same_field() {
		let a = ParticleField::new(FieldConfig::default(), 1200.0, 800.0, 42);
		let b = ParticleField::new(FieldConfig::default(), 1200.0, 800.0, 42);
		assert_eq!(a.particles(), b.particles());

		let c = ParticleField::new(FieldConfig::default(), 1200.0, 800.0, 43);
		assert_ne!(a.particles(), c.particles());
	}

	#[test]
	fn spawned_particles_respect_bands() {
		let config = FieldConfig::default();
		let field = ParticleField::new(config.clone(), 1200.0, 800.0, 1);
		assert!(in_bounds(&field));
		for p in field.particles() {
			for v in [p.vx.abs(), p.vy.abs()] {
				assert!((config.speed_min..=config.speed_max).contains(&v));
			}
			assert!((config.size_min..=config.size_max).contains(&p.size));
			assert!((config.opacity_min..=config.opacity_max).contains(&p.base_alpha));
			assert!((0.0..TAU).contains(&p.phase));
		}
	}

	#[test]
	fn resize_recalculates_count() {
		let mut field = ParticleField::new(FieldConfig::default(), 1200.0, 800.0, 9);
		assert_eq!(field.len(), 24);
		let before: Vec<_> = field.particles().to_vec();

		field.resize(3000.0, 800.0);
		assert_eq!(field.len(), 30);
		assert!(in_bounds(&field));
		// Existing particles survive, stretched to the wider bound.
		for (old, new) in before.iter().zip(field.particles()) {
			assert!((new.x - old.x * 2.5).abs() < 1e-9);
			assert_eq!(new.y, old.y);
			assert_eq!(new.vx, old.vx);
		}

		field.resize(600.0, 800.0);
		assert_eq!(field.len(), 12);
		assert!(in_bounds(&field));
	}

	#[test]
	fn regenerate_policy_respawns() {
		let config = FieldConfig {
			resize_policy: ResizePolicy::Regenerate,
			..FieldConfig::default()
		};
		let mut field = ParticleField::new(config, 1200.0, 800.0, 9);
		let before = field.particles()[0].clone();
		field.resize(3000.0, 800.0);
		assert_eq!(field.len(), 30);
		assert_ne!(field.particles()[0], before);
		assert!(in_bounds(&field));
	}

	#[test]
	fn retain_policy_keeps_count() {
		let config = FieldConfig {
			resize_policy: ResizePolicy::Retain,
			..FieldConfig::default()
		};
		let mut field = ParticleField::new(config, 1200.0, 800.0, 9);
		field.resize(3000.0, 400.0);
		assert_eq!(field.len(), 24);
		assert_eq!(field.width(), 3000.0);
		assert!(in_bounds(&field));
	}

	#[test]
	fn zero_area_viewport_collapses_then_recovers() {
		let mut field = ParticleField::new(FieldConfig::default(), 1200.0, 800.0, 5);
		field.resize(0.0, 0.0);
		assert_eq!(field.len(), 24);
		for _ in 0..10 {
			field.tick();
		}
		assert!(field.particles().iter().all(|p| p.x == 0.0 && p.y == 0.0));

		field.resize(1000.0, 500.0);
		assert_eq!(field.len(), 20);
		assert!(in_bounds(&field));
		let spread = field.particles().iter().filter(|p| p.x > 0.0).count();
		assert!(spread > 0, "particles should scatter after recovery");
	}

	#[test]
	fn wraps_to_opposite_edge_not_bounce() {
		let mut field = ParticleField::new(FieldConfig::default(), 100.0, 100.0, 0);
		field.particles = vec![
			Particle {
				vx: -0.2,
				vy: 0.2,
				..still(0.1, 99.9)
			},
		];
		field.tick();
		let p = &field.particles()[0];
		assert_eq!(p.x, 100.0);
		assert_eq!(p.y, 0.0);
		assert_eq!(p.vx, -0.2, "velocity keeps its sign");
	}

	#[test]
	fn phase_advances_by_step() {
		let mut field = ParticleField::new(FieldConfig::default(), 100.0, 100.0, 0);
		field.particles = vec![still(50.0, 50.0)];
		field.tick();
		field.tick();
		assert!((field.particles()[0].phase - 0.04).abs() < 1e-12);
	}

	#[test]
	fn pointer_pushes_nearby_particles_away() {
		let config = FieldConfig {
			pointer: Some(PointerConfig {
				radius: 100.0,
				strength: 2.0,
			}),
			..FieldConfig::default()
		};
		let mut field = ParticleField::new(config, 400.0, 400.0, 0);
		field.particles = vec![still(200.0, 200.0), still(390.0, 390.0)];
		field.set_pointer(Some((210.0, 200.0)));
		field.tick();
		assert!((field.particles()[0].x - 198.0).abs() < 1e-9);
		assert_eq!(field.particles()[1].x, 390.0);
		assert_eq!(field.particles()[0].vx, 0.0);

		field.set_pointer(None);
		field.tick();
		assert!((field.particles()[0].x - 198.0).abs() < 1e-9);
	}

	#[test]
	fn pointer_ignored_without_config() {
		let mut field = ParticleField::new(FieldConfig::default(), 400.0, 400.0, 0);
		field.particles = vec![still(200.0, 200.0)];
		field.set_pointer(Some((205.0, 200.0)));
		field.tick();
		assert_eq!(field.particles()[0].x, 200.0);
	}

	#[test]
	fn links_only_within_threshold() {
		let mut field = ParticleField::new(FieldConfig::default(), 1000.0, 1000.0, 0);
		field.particles = vec![
			still(0.0, 0.0),
			still(60.0, 79.0),
			still(500.0, 500.0),
			still(560.0, 580.0), // exactly 100 apart: not linked
		];
		let links = field.links();
		assert_eq!(links.len(), 1);
		let (i, j, d) = links[0];
		assert_eq!((i, j), (0, 1));
		assert!(d < 100.0);
	}

	#[test]
	fn opacity_pulses_around_base() {
		assert!((pulse_opacity(0.4, 0.0, 0.2) - 0.4).abs() < 1e-12);
		assert!((pulse_opacity(0.4, TAU / 4.0, 0.2) - 0.6).abs() < 1e-12);
		assert_eq!(pulse_opacity(0.9, TAU / 4.0, 0.5), 1.0);
		assert_eq!(pulse_opacity(0.1, 3.0 * TAU / 4.0, 0.5), 0.0);
	}

	proptest! {
		#[test]
		fn positions_stay_in_bounds(
			seed in any::<u64>(),
			width in 0.0f64..4000.0,
			height in 0.0f64..3000.0,
			ticks in 0usize..400,
		) {
			let mut field = ParticleField::new(FieldConfig::default(), width, height, seed);
			for _ in 0..ticks {
				field.tick();
			}
			prop_assert!(in_bounds(&field));
		}

		#[test]
		fn positions_stay_in_bounds_across_resizes(
			seed in any::<u64>(),
			sizes in prop::collection::vec((0.0f64..3000.0, 0.0f64..2000.0), 1..6),
		) {
			let mut field = ParticleField::new(FieldConfig::default(), 1200.0, 800.0, seed);
			for (w, h) in sizes {
				field.resize(w, h);
				prop_assert!(in_bounds(&field));
				for _ in 0..20 {
					field.tick();
				}
				prop_assert!(in_bounds(&field));
			}
		}

		#[test]
		fn opacity_is_a_valid_alpha(
			base in 0.0f64..=1.0,
			phase in -1.0e6f64..1.0e6,
			amplitude in 0.0f64..=2.0,
		) {
			let alpha = pulse_opacity(base, phase, amplitude);
			prop_assert!((0.0..=1.0).contains(&alpha));
		}
	}
}
