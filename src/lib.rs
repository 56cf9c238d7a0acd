//! particle-field: ambient animated background for a portfolio page.
//!
//! This crate provides a WASM canvas component that fills the viewport with
//! slowly drifting, pulsing particles over a themed gradient.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{
	DrawMode, FieldConfig, FieldError, ParticleFieldCanvas, ResizePolicy, ThemeMode,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Load field overrides from a script element with id="field-config".
/// Expected format: JSON object with any subset of [`FieldConfig`] fields.
/// Missing element means defaults; invalid JSON or values are logged and
/// also fall back to defaults.
fn load_field_config() -> FieldConfig {
	let Some(json_text) = config_script_text() else {
		return FieldConfig::default();
	};

	match FieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"particle-field: loaded config (max {} particles, {:?} mode)",
				config.max_count, config.draw_mode
			);
			config
		}
		Err(e) => {
			warn!("particle-field: ignoring field config: {}", e);
			FieldConfig::default()
		}
	}
}

fn config_script_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("field-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Initial theme from the `prefers-color-scheme` media query; dark otherwise.
fn preferred_theme() -> ThemeMode {
	let prefers_light = web_sys::window()
		.and_then(|w| w.match_media("(prefers-color-scheme: light)").ok().flatten())
		.is_some_and(|q| q.matches());
	if prefers_light {
		ThemeMode::Light
	} else {
		ThemeMode::Dark
	}
}

/// Main application component.
/// Renders the animated background and a light/dark toggle.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config();
	let (theme, set_theme) = signal(preferred_theme());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme=move || theme.get().as_str() />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleFieldCanvas theme=theme config=config />
		<button
			class="theme-toggle"
			on:click=move |_| set_theme.update(|mode| *mode = mode.toggled())
		>
			{move || match theme.get() {
				ThemeMode::Dark => "Light mode",
				ThemeMode::Light => "Dark mode",
			}}
		</button>
	}
}
