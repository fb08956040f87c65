//! # qisvg
//!
//! A Rust library for rendering QR Code symbols as compact, deterministic SVG documents.
//!
//! `qisvg` takes an already-encoded symbol (any square grid of dark and light modules) and turns
//! it into a single SVG path with one unit square per dark module, on top of a background
//! rectangle. Equal inputs always give byte-identical output, with Unix newlines on every
//! platform. The same grid can also be rendered to a grayscale raster image.
//!
//! ## Features
//!
//! - Render any [`grid::ModuleGrid`] as SVG with a configurable border and colors.
//! - Render the same grid as a PNG or an in-memory image buffer.
//! - Typed error payloads for the host application's permission, validation and write
//!   conflict failures.
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Example
//!
//! ```rust
//! use qisvg::{grid::BitGrid, helper::to_svg_string};
//!
//! let grid = BitGrid::from_rows(&[
//!     vec![true, false],
//!     vec![false, true],
//! ]).unwrap();
//!
//! let svg = to_svg_string(&grid, 0, "#fff", "#000").unwrap();
//! assert!(svg.contains("d=\"M0,0h1v1h-1z M1,1h1v1h-1z\""));
//! ```
//!
//! Render with stored parameters:
//!
//! ```rust
//! use qisvg::{config::RenderParams, grid::BitGrid, helper::render};
//!
//! let grid = BitGrid::from_fn(21, |x, y| (x + y) % 3 == 0).unwrap();
//! let params = RenderParams::new().with_border(2).with_dark_color("navy");
//! let svg = render(&grid, &params).unwrap();
//! assert!(svg.contains("viewBox=\"0 0 25 25\""));
//! ```
//!
//! ## Modules
//!
//! - [`grid`]: The module grid interface and an owned implementation.
//! - [`helper`]: Renderers for SVG and raster output.
//! - [`config`]: Rendering parameters.
//! - [`error`]: Rendering and grid construction errors.
//! - [`signal`]: Host application error payloads.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod grid;
pub mod helper;
pub mod signal;

pub use config::RenderParams;
pub use error::{GridError, InvalidArgument, Param, RenderError};
pub use grid::{BitGrid, ModuleGrid};
pub use helper::{render, to_svg_string};
