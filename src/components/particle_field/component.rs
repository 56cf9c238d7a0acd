//! Leptos component wrapping the particle field canvas.
//!
//! The component renders a fixed, full-viewport backdrop: a CSS gradient
//! with a canvas on top. Once the canvas is mounted an [`Animator`] is built
//! around it and parked in a local reactive slot; disposing the slot (on
//! unmount or when the effect re-runs) drops the animator, which cancels the
//! pending frame and removes its listeners.

use leptos::prelude::*;
use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::config::FieldConfig;
use super::driver::Animator;
use super::error::{FieldError, Result};
use super::theme::{BackgroundStyle, ThemeMode, ThemeSource};
use super::web::WebHost;

/// Reads the theme signal without subscribing, so a theme change recolours
/// the next frame instead of re-mounting the field.
struct SignalTheme(Signal<ThemeMode>);

impl ThemeSource for SignalTheme {
	fn mode(&self) -> ThemeMode {
		self.0.get_untracked()
	}
}

type WebAnimator = Animator<WebHost, CanvasRenderingContext2d, SignalTheme>;

/// Full-bleed animated particle background.
///
/// `theme` is read every frame. `config` defaults to [`FieldConfig::default`].
/// If the browser cannot provide a 2d context only the gradient is shown.
#[component]
pub fn ParticleFieldCanvas(
	#[prop(into)] theme: Signal<ThemeMode>,
	#[prop(optional)] config: Option<FieldConfig>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let config = config.unwrap_or_default();

	Effect::new(move |_| {
		let canvas = canvas_ref.get().map(HtmlCanvasElement::from);
		if let Err(e) = start(canvas, theme, config.clone()) {
			debug!("particle-field: animation disabled: {}", e);
		}
	});

	let backdrop = move || {
		format!(
			"position: fixed; inset: 0; z-index: -10; {}",
			BackgroundStyle::for_mode(theme.get()).to_css()
		)
	};

	view! {
		<div class="particle-field" style=backdrop>
			<canvas
				node_ref=canvas_ref
				class="particle-field-canvas"
				style="display: block; width: 100%; height: 100%; pointer-events: none;"
			/>
		</div>
	}
}

fn start(
	canvas: Option<HtmlCanvasElement>,
	theme: Signal<ThemeMode>,
	config: FieldConfig,
) -> Result<()> {
	let canvas = canvas.ok_or(FieldError::MissingCanvas)?;
	let window = web_sys::window().ok_or(FieldError::MissingWindow)?;
	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")
		.ok()
		.flatten()
		.ok_or(FieldError::MissingContext)?
		.dyn_into()
		.map_err(|_| FieldError::MissingContext)?;

	let seed = config
		.seed
		.unwrap_or_else(|| (js_sys::Math::random() * (1u64 << 53) as f64) as u64);
	let track_pointer = config.pointer.is_some();

	let slot = StoredValue::new_local(None::<WebAnimator>);
	let mut host = WebHost::new(
		window,
		canvas,
		move || {
			let _ = slot.try_update_value(|a| a.as_mut().map(|a| a.frame()));
		},
		move || {
			let _ = slot.try_update_value(|a| a.as_mut().map(|a| a.resize()));
		},
	);
	if track_pointer {
		host = host.with_pointer(move |pointer| {
			let _ = slot.try_update_value(|a| a.as_mut().map(|a| a.set_pointer(pointer)));
		});
	}

	let animator = Animator::mount(host, ctx, SignalTheme(theme), config, seed);
	info!(
		"particle-field: animating {} particles",
		animator.field().len()
	);
	slot.set_value(Some(animator));

	on_cleanup(move || {
		let _ = slot.try_update_value(Option::take);
	});

	Ok(())
}
