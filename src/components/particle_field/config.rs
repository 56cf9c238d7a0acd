//! Tunable constants for the particle field.
//!
//! Every value has a default matching the portfolio's background; a page may
//! override any subset through a JSON `<script id="field-config">` block.

use serde::Deserialize;

use super::error::{FieldError, Result};

/// Hard ceiling on `max_count`. Mesh mode compares every pair each frame.
pub const MAX_PARTICLES: usize = 200;

/// How particles are drawn each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
	/// Plain filled circles.
	Solid,
	/// Filled circles with a soft radial halo.
	#[default]
	Glow,
	/// Filled circles joined by lines when closer than `link_distance`.
	Mesh,
}

/// What happens to the particle set when the viewport changes size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizePolicy {
	/// Keep existing particles (rescaled), then spawn or drop to match the new count.
	#[default]
	Reconcile,
	/// Throw the set away and spawn a fresh one.
	Regenerate,
	/// Keep existing particles (rescaled) and the original count.
	Retain,
}

/// Optional pointer repulsion.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
	/// Particles closer than this (px) get pushed away.
	pub radius: f64,
	/// Displacement per frame (px) while inside `radius`. Velocity is unchanged.
	pub strength: f64,
}

impl Default for PointerConfig {
	fn default() -> Self {
		Self {
			radius: 100.0,
			strength: 1.5,
		}
	}
}

/// Particle field configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	/// Upper bound on the particle count.
	pub max_count: usize,
	/// Viewport pixels per particle.
	pub spacing_factor: f64,
	/// Per-axis speed band (px/frame); the sign is random.
	pub speed_min: f64,
	/// Upper end of the speed band.
	pub speed_max: f64,
	/// Radius band (px).
	pub size_min: f64,
	/// Upper end of the radius band.
	pub size_max: f64,
	/// Base opacity band.
	pub opacity_min: f64,
	/// Upper end of the opacity band.
	pub opacity_max: f64,
	/// Phase advance per frame (radians).
	pub phase_step: f64,
	/// Peak deviation of the pulse from the base opacity.
	pub pulse_amplitude: f64,
	/// Drawing strategy.
	pub draw_mode: DrawMode,
	/// Halo radius as a multiple of the particle radius.
	pub glow_scale: f64,
	/// Mesh link threshold (px).
	pub link_distance: f64,
	/// Behaviour on viewport resize.
	pub resize_policy: ResizePolicy,
	/// Pointer repulsion, off unless configured.
	pub pointer: Option<PointerConfig>,
	/// Fixed RNG seed. `None` seeds from the browser.
	pub seed: Option<u64>,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			max_count: 30,
			spacing_factor: 50.0,
			speed_min: 0.1,
			speed_max: 0.25,
			size_min: 1.0,
			size_max: 3.0,
			opacity_min: 0.2,
			opacity_max: 0.5,
			phase_step: 0.02,
			pulse_amplitude: 0.2,
			draw_mode: DrawMode::default(),
			glow_scale: 4.0,
			link_distance: 100.0,
			resize_policy: ResizePolicy::default(),
			pointer: None,
			seed: None,
		}
	}
}

impl FieldConfig {
	/// Parse a JSON config and validate it.
	pub fn from_json(json: &str) -> Result<Self> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Number of particles for a viewport of the given width.
	///
	/// `min(max_count, floor(width / spacing_factor))`; negative or NaN widths
	/// count as zero.
	pub fn particle_count(&self, width: f64) -> usize {
		if !(width > 0.0) || !(self.spacing_factor > 0.0) {
			return 0;
		}
		let fit = (width / self.spacing_factor).floor();
		if fit >= self.max_count as f64 {
			self.max_count
		} else {
			fit as usize
		}
	}

	/// Reject values the simulation cannot honour.
	pub fn validate(&self) -> Result<()> {
		fn band(name: &str, min: f64, max: f64) -> Result<()> {
			if !(min.is_finite() && max.is_finite()) || min < 0.0 || min > max {
				return Err(FieldError::InvalidConfig(format!(
					"{name} band [{min}, {max}] must be finite, non-negative and ordered"
				)));
			}
			Ok(())
		}

		if self.max_count > MAX_PARTICLES {
			return Err(FieldError::InvalidConfig(format!(
				"max_count {} exceeds the cap of {MAX_PARTICLES}",
				self.max_count
			)));
		}
		if !(self.spacing_factor > 0.0) || !self.spacing_factor.is_finite() {
			return Err(FieldError::InvalidConfig(format!(
				"spacing_factor must be positive, got {}",
				self.spacing_factor
			)));
		}
		band("speed", self.speed_min, self.speed_max)?;
		band("size", self.size_min, self.size_max)?;
		band("opacity", self.opacity_min, self.opacity_max)?;
		if self.opacity_max > 1.0 {
			return Err(FieldError::InvalidConfig(format!(
				"opacity_max {} is above 1",
				self.opacity_max
			)));
		}
		for (name, value) in [
			("phase_step", self.phase_step),
			("pulse_amplitude", self.pulse_amplitude),
			("glow_scale", self.glow_scale),
			("link_distance", self.link_distance),
		] {
			if !value.is_finite() || value < 0.0 {
				return Err(FieldError::InvalidConfig(format!(
					"{name} must be finite and non-negative, got {value}"
				)));
			}
		}
		if let Some(pointer) = self.pointer {
			if !(pointer.radius > 0.0) || !pointer.strength.is_finite() {
				return Err(FieldError::InvalidConfig(
					"pointer radius must be positive and strength finite".into(),
				));
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn count_follows_width_until_capped() {
		let config = FieldConfig::default();
		assert_eq!(config.particle_count(1200.0), 24);
		assert_eq!(config.particle_count(3000.0), 30);
		assert_eq!(config.particle_count(1500.0), 30);
		assert_eq!(config.particle_count(1499.0), 29);
		assert_eq!(config.particle_count(49.0), 0);
		assert_eq!(config.particle_count(0.0), 0);
		assert_eq!(config.particle_count(-10.0), 0);
		assert_eq!(config.particle_count(f64::NAN), 0);
	}

	#[test]
	fn defaults_are_valid() {
		assert!(FieldConfig::default().validate().is_ok());
	}

	#[test]
	fn partial_json_keeps_defaults() {
		let config =
			FieldConfig::from_json(r#"{ "max_count": 12, "draw_mode": "mesh", "seed": 7 }"#)
				.unwrap();
		assert_eq!(config.max_count, 12);
		assert_eq!(config.draw_mode, DrawMode::Mesh);
		assert_eq!(config.seed, Some(7));
		assert_eq!(config.spacing_factor, 50.0);
		assert_eq!(config.resize_policy, ResizePolicy::Reconcile);
	}

	#[test]
	fn pointer_block_parses() {
		let config = FieldConfig::from_json(r#"{ "pointer": { "radius": 80, "strength": 0.05 } }"#)
			.unwrap();
		assert_eq!(
			config.pointer,
			Some(PointerConfig {
				radius: 80.0,
				strength: 0.05
			})
		);
	}

	#[test]
	fn empty_pointer_block_enables_defaults() {
		let config = FieldConfig::from_json(r#"{ "pointer": {} }"#).unwrap();
		assert_eq!(config.pointer, Some(PointerConfig::default()));
	}

	#[test]
	fn rejects_bad_values() {
		for json in [
			r#"{ "max_count": 500 }"#,
			r#"{ "spacing_factor": 0 }"#,
			r#"{ "speed_min": 0.5, "speed_max": 0.1 }"#,
			r#"{ "opacity_max": 1.5 }"#,
			r#"{ "size_min": -1 }"#,
			r#"{ "pointer": { "radius": 0, "strength": 0.1 } }"#,
		] {
			assert!(
				matches!(FieldConfig::from_json(json), Err(FieldError::InvalidConfig(_))),
				"{json} should be rejected"
			);
		}
	}

	#[test]
	fn malformed_json_is_a_json_error() {
		assert!(matches!(
			FieldConfig::from_json("{ max_count: "),
			Err(FieldError::Json(_))
		));
	}
}
