//! Mount/frame/teardown lifecycle for the particle field.
//!
//! [`Animator`] owns the simulation, a [`Painter`] and a [`ThemeSource`], and
//! talks to the host environment only through [`FrameHost`]. Whatever it
//! registers on mount (its viewport listeners, one pending frame) it releases on
//! teardown, exactly once, whether via [`Animator::unmount`] or `Drop`.

use log::debug;

use super::config::FieldConfig;
use super::particles::ParticleField;
use super::render::{Painter, render_frame};
use super::theme::ThemeSource;

/// Scheduling and viewport services provided by the host.
pub trait FrameHost {
	/// Handle for a scheduled frame callback.
	type FrameId: Copy + std::fmt::Debug;

	/// Size the drawing surface to the viewport and return its dimensions.
	fn fit_surface(&self) -> (f64, f64);

	/// Schedule one frame callback. `None` if the host cannot schedule.
	fn request_frame(&self) -> Option<Self::FrameId>;

	/// Cancel a callback returned by [`FrameHost::request_frame`].
	fn cancel_frame(&self, id: Self::FrameId);

	/// Start delivering viewport events (resize, and pointer moves where the
	/// host tracks them). Returns whether listeners were added.
	fn listen(&self) -> bool;

	/// Remove exactly the listeners added by [`FrameHost::listen`].
	fn unlisten(&self);
}

/// A mounted, running particle field.
pub struct Animator<H: FrameHost, P: Painter, T: ThemeSource> {
	host: H,
	painter: P,
	theme: T,
	field: ParticleField,
	pending: Option<H::FrameId>,
	listening: bool,
}

impl<H: FrameHost, P: Painter, T: ThemeSource> Animator<H, P, T> {
	/// Size the surface, spawn particles, listen for resizes and schedule
	/// the first frame.
	pub fn mount(host: H, painter: P, theme: T, config: FieldConfig, seed: u64) -> Self {
		let (width, height) = host.fit_surface();
		let field = ParticleField::new(config, width, height, seed);
		let listening = host.listen();
		let pending = host.request_frame();

		debug!(
			"particle-field: mounted {} particles on {}x{} (seed {})",
			field.len(),
			width,
			height,
			seed
		);

		Self {
			host,
			painter,
			theme,
			field,
			pending,
			listening,
		}
	}

	/// One animation-frame tick: advance, draw, schedule the next tick.
	pub fn frame(&mut self) {
		self.pending = None;
		self.field.tick();
		render_frame(&self.field, &self.painter, self.theme.mode());
		self.pending = self.host.request_frame();
	}

	/// Re-read the viewport after a resize event.
	pub fn resize(&mut self) {
		let (width, height) = self.host.fit_surface();
		self.field.resize(width, height);
		debug!(
			"particle-field: resized to {}x{}, {} particles",
			width,
			height,
			self.field.len()
		);
	}

	pub fn set_pointer(&mut self, pointer: Option<(f64, f64)>) {
		self.field.set_pointer(pointer);
	}

	pub fn field(&self) -> &ParticleField {
		&self.field
	}

	/// Whether a frame callback is outstanding.
	pub fn is_scheduled(&self) -> bool {
		self.pending.is_some()
	}

	/// Stop the animation and release everything registered on mount.
	pub fn unmount(self) {
		drop(self);
	}

	fn teardown(&mut self) {
		if let Some(id) = self.pending.take() {
			self.host.cancel_frame(id);
		}
		if std::mem::take(&mut self.listening) {
			self.host.unlisten();
		}
		debug!("particle-field: torn down");
	}
}

impl<H: FrameHost, P: Painter, T: ThemeSource> Drop for Animator<H, P, T> {
	fn drop(&mut self) {
		self.teardown();
	}
}
