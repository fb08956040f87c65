//! Error types for grid construction and rendering.

use std::fmt;

use thiserror::Error;

/// The renderer argument an [`InvalidArgument`] refers to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Param {
	Grid,
	LightColor,
	DarkColor,
	Border,
}

impl fmt::Display for Param {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Param::Grid => "grid",
			Param::LightColor => "light_color",
			Param::DarkColor => "dark_color",
			Param::Border => "border",
		};
		f.write_str(name)
	}
}

/// A caller supplied an argument the renderer cannot accept.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
#[error("invalid argument `{param}`: {reason}")]
pub struct InvalidArgument {
	pub param: Param,
	pub reason: &'static str,
}

impl InvalidArgument {
	pub(crate) fn new(param: Param, reason: &'static str) -> Self {
		Self { param, reason }
	}
}

/// Errors returned by the renderers in [`crate::helper`].
#[derive(Debug, Error)]
pub enum RenderError {
	/// Validation failed before anything was rendered.
	#[error(transparent)]
	InvalidArgument(#[from] InvalidArgument),

	/// Encoding or writing a raster image failed.
	#[error("failed to write image: {0}")]
	Image(#[from] image::ImageError),

	/// Creating the output directory failed.
	#[error("failed to prepare output location: {0}")]
	Io(#[from] std::io::Error),
}

impl RenderError {
	/// Returns the rejected parameter if this is a validation failure.
	pub fn invalid_param(&self) -> Option<Param> {
		match self {
			RenderError::InvalidArgument(arg) => Some(arg.param),
			_ => None,
		}
	}
}

/// Errors building a [`crate::grid::BitGrid`].
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum GridError {
	/// A grid needs at least one module.
	#[error("module grid must not be empty")]
	Empty,

	/// A row's length differs from the number of rows.
	#[error("row {row} has {len} modules, expected {expected}")]
	NotSquare { row: usize, len: usize, expected: usize },

	/// The side length does not fit the coordinate type.
	#[error("module grid size {0} is too large")]
	TooLarge(usize),
}
