//! Rendering parameters

use serde::{Deserialize, Serialize};

/// Border and colors used when rendering a module grid.
///
/// Colors are passed through to the output untouched, so any format the consumer understands
/// (`#FFF`, `rgb(0, 0, 0)`, `currentColor`, ...) works.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParams {
	/// Light modules added around each edge of the symbol.
	pub border: i32,

	/// Fill of the background and of light modules.
	pub light_color: String,

	/// Fill of dark modules.
	pub dark_color: String,
}

impl Default for RenderParams {
	fn default() -> Self {
		Self {
			border: 4,
			light_color: "#FFFFFF".to_string(),
			dark_color: "#000000".to_string(),
		}
	}
}

impl RenderParams {
	/// Create parameters with default values
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the border width, in modules
	pub fn with_border(mut self, border: i32) -> Self {
		self.border = border;
		self
	}

	/// Set the light color
	pub fn with_light_color(mut self, color: impl Into<String>) -> Self {
		self.light_color = color.into();
		self
	}

	/// Set the dark color
	pub fn with_dark_color(mut self, color: impl Into<String>) -> Self {
		self.dark_color = color.into();
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let params = RenderParams::new();
		assert_eq!(params.border, 4);
		assert_eq!(params.light_color, "#FFFFFF");
		assert_eq!(params.dark_color, "#000000");
	}

	#[test]
	fn test_builder() {
		let params = RenderParams::new()
			.with_border(0)
			.with_light_color("#fff")
			.with_dark_color("currentColor");
		assert_eq!(params.border, 0);
		assert_eq!(params.light_color, "#fff");
		assert_eq!(params.dark_color, "currentColor");
	}

	#[test]
	fn test_missing_fields_take_defaults() {
		let params: RenderParams = serde_json::from_str(r#"{"dark_color": "navy"}"#).unwrap();
		assert_eq!(params, RenderParams::new().with_dark_color("navy"));
	}
}
