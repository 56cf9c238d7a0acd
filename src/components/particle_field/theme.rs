//! Light/dark theming for the particle field.
//!
//! The field never owns the theme. It receives a [`ThemeSource`] at
//! construction and asks it for the current [`ThemeMode`] every frame.

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self {
			a: a.clamp(0.0, 1.0),
			..self
		}
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Page-wide display mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
	Light,
	#[default]
	Dark,
}

impl ThemeMode {
	pub fn toggled(self) -> Self {
		match self {
			ThemeMode::Light => ThemeMode::Dark,
			ThemeMode::Dark => ThemeMode::Light,
		}
	}

	/// Value for the `data-theme` attribute on `<html>`.
	pub fn as_str(self) -> &'static str {
		match self {
			ThemeMode::Light => "light",
			ThemeMode::Dark => "dark",
		}
	}
}

/// Read-only access to the current theme.
pub trait ThemeSource {
	fn mode(&self) -> ThemeMode;
}

impl ThemeSource for ThemeMode {
	fn mode(&self) -> ThemeMode {
		*self
	}
}

impl<F> ThemeSource for F
where
	F: Fn() -> ThemeMode,
{
	fn mode(&self) -> ThemeMode {
		self()
	}
}

/// Blue accent shared by both modes.
pub const ACCENT: Color = Color::rgb(59, 130, 246);

/// Particle colors for one theme mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldPalette {
	/// Fill color at full opacity.
	pub particle: Color,
	/// Scales every particle's instantaneous opacity.
	pub alpha_scale: f64,
	/// Mesh line color at full opacity.
	pub link: Color,
	/// Peak opacity of a mesh line.
	pub link_alpha: f64,
}

impl FieldPalette {
	pub fn for_mode(mode: ThemeMode) -> Self {
		match mode {
			ThemeMode::Dark => Self {
				particle: ACCENT.lighten(0.25),
				alpha_scale: 1.0,
				link: ACCENT.lighten(0.4),
				link_alpha: 0.15,
			},
			ThemeMode::Light => Self {
				particle: ACCENT.darken(0.25),
				alpha_scale: 0.7,
				link: ACCENT.darken(0.35),
				link_alpha: 0.1,
			},
		}
	}

	/// Particle fill at the given instantaneous opacity.
	pub fn particle_color(&self, opacity: f64) -> Color {
		self.particle.with_alpha(opacity * self.alpha_scale)
	}

	/// Mesh line for a pair at `distance`, fading to nothing at `max_distance`.
	pub fn link_color(&self, distance: f64, max_distance: f64) -> Color {
		let t = if max_distance > 0.0 {
			1.0 - (distance / max_distance).clamp(0.0, 1.0)
		} else {
			0.0
		};
		self.link.with_alpha(self.link_alpha * t)
	}
}

/// Static gradient painted beneath the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundStyle {
	/// Top-left stop.
	pub color: Color,
	/// Bottom-right stop.
	pub color_secondary: Color,
}

impl BackgroundStyle {
	pub fn for_mode(mode: ThemeMode) -> Self {
		match mode {
			ThemeMode::Dark => Self {
				color: Color::rgb(15, 23, 42),
				color_secondary: Color::rgb(30, 41, 59),
			},
			ThemeMode::Light => Self {
				color: Color::rgb(248, 250, 252),
				color_secondary: Color::rgb(226, 232, 240),
			},
		}
	}

	/// Inline `style` value for the backdrop element.
	pub fn to_css(self) -> String {
		format!(
			"background: linear-gradient(135deg, {}, {});",
			self.color.to_css(),
			self.color_secondary.to_css()
		)
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use super::*;

	#[test]
	fn closures_and_constants_are_sources() {
		let current = Rc::new(Cell::new(ThemeMode::Light));
		let reader = {
			let current = current.clone();
			move || current.get()
		};
		assert_eq!(reader.mode(), ThemeMode::Light);
		current.set(ThemeMode::Dark);
		assert_eq!(reader.mode(), ThemeMode::Dark);
		assert_eq!(ThemeMode::Light.mode(), ThemeMode::Light);
	}

	#[test]
	fn palettes_differ_per_mode() {
		let dark = FieldPalette::for_mode(ThemeMode::Dark);
		let light = FieldPalette::for_mode(ThemeMode::Light);
		assert_ne!(dark.particle, light.particle);
		assert!(light.particle_color(0.5).a < dark.particle_color(0.5).a);
		// Same hue family: blue dominates in both.
		assert!(dark.particle.b > dark.particle.r);
		assert!(light.particle.b > light.particle.r);
	}

	#[test]
	fn particle_alpha_is_clamped() {
		let dark = FieldPalette::for_mode(ThemeMode::Dark);
		assert_eq!(dark.particle_color(3.0).a, 1.0);
		assert_eq!(dark.particle_color(-1.0).a, 0.0);
	}

	#[test]
	fn links_fade_with_distance() {
		let palette = FieldPalette::for_mode(ThemeMode::Dark);
		assert!((palette.link_color(0.0, 100.0).a - palette.link_alpha).abs() < 1e-9);
		assert_eq!(palette.link_color(100.0, 100.0).a, 0.0);
		assert!(palette.link_color(25.0, 100.0).a > palette.link_color(75.0, 100.0).a);
	}

	#[test]
	fn background_css() {
		assert_eq!(
			BackgroundStyle::for_mode(ThemeMode::Dark).to_css(),
			"background: linear-gradient(135deg, #0f172a, #1e293b);"
		);
		assert_eq!(
			Color::rgb(59, 130, 246).with_alpha(0.5).to_css(),
			"rgba(59, 130, 246, 0.5)"
		);
	}

	#[test]
	fn toggling_round_trips() {
		assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
		assert_eq!(ThemeMode::Light.toggled().toggled(), ThemeMode::Light);
		assert_eq!(ThemeMode::Light.as_str(), "light");
	}
}
