//! Browser implementation of [`FrameHost`].
//!
//! Holds the `requestAnimationFrame`, `resize` and pointer closures for one
//! mounted field. The closures stay alive as long as the host does, so the
//! owning [`Animator`](super::driver::Animator) must cancel and unlisten
//! before the host is dropped, which its teardown guarantees.

use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, Window};

use super::driver::FrameHost;

const POINTER_EVENTS: [&str; 2] = ["mousemove", "mouseout"];

pub struct WebHost {
	window: Window,
	canvas: HtmlCanvasElement,
	on_frame: Closure<dyn FnMut()>,
	on_resize: Closure<dyn FnMut()>,
	on_pointer: Option<Closure<dyn FnMut(MouseEvent)>>,
}

impl WebHost {
	pub fn new(
		window: Window,
		canvas: HtmlCanvasElement,
		on_frame: impl FnMut() + 'static,
		on_resize: impl FnMut() + 'static,
	) -> Self {
		Self {
			window,
			canvas,
			on_frame: Closure::new(on_frame),
			on_resize: Closure::new(on_resize),
			on_pointer: None,
		}
	}

	/// Also report the pointer position in viewport pixels, `None` once it
	/// leaves the page.
	pub fn with_pointer(mut self, mut on_pointer: impl FnMut(Option<(f64, f64)>) + 'static) -> Self {
		self.on_pointer = Some(Closure::new(move |ev: MouseEvent| {
			if ev.type_() == "mouseout" && ev.related_target().is_none() {
				on_pointer(None);
			} else {
				on_pointer(Some((ev.client_x() as f64, ev.client_y() as f64)));
			}
		}));
		self
	}

	fn viewport(&self) -> (f64, f64) {
		let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
		(read(self.window.inner_width()), read(self.window.inner_height()))
	}
}

impl FrameHost for WebHost {
	type FrameId = i32;

	fn fit_surface(&self) -> (f64, f64) {
		let (w, h) = self.viewport();
		self.canvas.set_width(w as u32);
		self.canvas.set_height(h as u32);
		(w, h)
	}

	fn request_frame(&self) -> Option<i32> {
		self.window
			.request_animation_frame(self.on_frame.as_ref().unchecked_ref())
			.ok()
	}

	fn cancel_frame(&self, id: i32) {
		let _ = self.window.cancel_animation_frame(id);
	}

	fn listen(&self) -> bool {
		let mut added = self
			.window
			.add_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref())
			.is_ok();
		if let Some(ref cb) = self.on_pointer {
			for event in POINTER_EVENTS {
				added |= self
					.window
					.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
					.is_ok();
			}
		}
		added
	}

	fn unlisten(&self) {
		let _ = self
			.window
			.remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
		if let Some(ref cb) = self.on_pointer {
			for event in POINTER_EVENTS {
				let _ = self
					.window
					.remove_event_listener_with_callback(event, cb.as_ref().unchecked_ref());
			}
		}
	}
}
