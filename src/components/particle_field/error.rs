//! Error types for the particle field.

/// Result alias used across the particle field.
pub type Result<T> = std::result::Result<T, FieldError>;

/// Errors raised while setting up the particle field.
///
/// None of these reach the user: a missing surface turns the animation into a
/// no-op and a bad config falls back to defaults.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
	/// No `window` object (not running in a browser).
	#[error("window is not available")]
	MissingWindow,

	/// The canvas element has not been mounted.
	#[error("canvas element is not mounted")]
	MissingCanvas,

	/// The canvas refused to hand out a 2d context.
	#[error("2d drawing context is not available")]
	MissingContext,

	/// Config values out of range.
	#[error("invalid field config: {0}")]
	InvalidConfig(String),

	/// Config JSON failed to parse.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}
