//! Frame rendering for the particle field.
//!
//! Drawing goes through the [`Painter`] trait so a frame can be replayed
//! against something other than a browser canvas. Each frame is drawn in
//! passes for correct z-ordering:
//! 1. Clear
//! 2. Mesh links (mesh mode only)
//! 3. Halos (glow mode only), then particle bodies

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::config::DrawMode;
use super::particles::ParticleField;
use super::theme::{Color, FieldPalette, ThemeMode};

/// Line width of mesh links in pixels.
const LINK_WIDTH: f64 = 0.5;

/// Minimal 2d drawing surface.
pub trait Painter {
	/// Erase the whole `width × height` surface.
	fn clear(&self, width: f64, height: f64);
	/// Solid disc.
	fn fill_circle(&self, x: f64, y: f64, radius: f64, color: Color);
	/// Disc filled with a radial gradient from `color` at the centre to
	/// transparent at `radius`.
	fn radial_glow(&self, x: f64, y: f64, radius: f64, color: Color);
	/// Straight stroke.
	fn line(&self, from: (f64, f64), to: (f64, f64), width: f64, color: Color);
}

impl<P: Painter + ?Sized> Painter for &P {
	fn clear(&self, width: f64, height: f64) {
		(**self).clear(width, height);
	}

	fn fill_circle(&self, x: f64, y: f64, radius: f64, color: Color) {
		(**self).fill_circle(x, y, radius, color);
	}

	fn radial_glow(&self, x: f64, y: f64, radius: f64, color: Color) {
		(**self).radial_glow(x, y, radius, color);
	}

	fn line(&self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
		(**self).line(from, to, width, color);
	}
}

/// Draw one frame of `field` in the palette for `mode`.
pub fn render_frame<P: Painter + ?Sized>(field: &ParticleField, painter: &P, mode: ThemeMode) {
	let config = field.config();
	let palette = FieldPalette::for_mode(mode);

	painter.clear(field.width(), field.height());

	if config.draw_mode == DrawMode::Mesh {
		draw_links(field, painter, &palette);
	}

	for p in field.particles() {
		let color = palette.particle_color(field.opacity(p));

		if config.draw_mode == DrawMode::Glow {
			painter.radial_glow(p.x, p.y, p.size * config.glow_scale, color);
		}
		painter.fill_circle(p.x, p.y, p.size, color);
	}
}

fn draw_links<P: Painter + ?Sized>(field: &ParticleField, painter: &P, palette: &FieldPalette) {
	let particles = field.particles();
	let max = field.config().link_distance;

	for (i, j, distance) in field.links() {
		let (a, b) = (&particles[i], &particles[j]);
		painter.line(
			(a.x, a.y),
			(b.x, b.y),
			LINK_WIDTH,
			palette.link_color(distance, max),
		);
	}
}

impl Painter for CanvasRenderingContext2d {
	fn clear(&self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&self, x: f64, y: f64, radius: f64, color: Color) {
		self.set_fill_style_str(&color.to_css());
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.fill();
	}

	fn radial_glow(&self, x: f64, y: f64, radius: f64, color: Color) {
		let Ok(gradient) = self.create_radial_gradient(x, y, 0.0, x, y, radius) else {
			return;
		};
		if gradient.add_color_stop(0.0, &color.to_css()).is_err()
			|| gradient
				.add_color_stop(1.0, &color.with_alpha(0.0).to_css())
				.is_err()
		{
			return;
		}

		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.fill();
	}

	fn line(&self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}
}
