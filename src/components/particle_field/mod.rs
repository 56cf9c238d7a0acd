//! Ambient particle-field background.
//!
//! Animates a capped set of drifting, pulsing points over a full-viewport
//! canvas:
//! - Constant-velocity motion with wrap-around at the viewport edges
//! - Sinusoidal opacity pulse per particle
//! - Solid, glow or mesh drawing strategies
//! - Light/dark palettes read from an injected theme source each frame
//! - Symmetric mount/teardown of the frame chain and viewport listeners
//!
//! # Example
//!
//! ```ignore
//! use particle_field::{ParticleFieldCanvas, ThemeMode};
//!
//! let (theme, _set_theme) = signal(ThemeMode::Dark);
//! view! { <ParticleFieldCanvas theme=theme /> }
//! ```

mod component;
pub mod config;
pub mod driver;
mod error;
pub mod particles;
pub mod render;
pub mod theme;
mod web;

pub use component::ParticleFieldCanvas;
pub use config::{DrawMode, FieldConfig, ResizePolicy};
pub use error::{FieldError, Result};
pub use theme::{ThemeMode, ThemeSource};
