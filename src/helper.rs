use crate::config::RenderParams;
use crate::error::{InvalidArgument, Param, RenderError};
use crate::grid::ModuleGrid;

use image::{ImageBuffer, ImageFormat, Luma};
use log::debug;
use std::fs;
use std::path::Path;

/*---- Utilities ----*/

/// The largest raster image, in pixels per side, that [`to_image_buffer`] will allocate.
pub const MAX_RASTER_SIDE: u32 = 8192;

// Rejects grids without modules; a grid reference can't be null, so this is the "no grid" case.
fn check_grid(qr: &impl ModuleGrid) -> Result<(), InvalidArgument> {
	if qr.size() < 1 {
		return Err(InvalidArgument::new(Param::Grid, "grid must contain at least one module"));
	}
	Ok(())
}

// Side length of the rendered canvas, in modules.
fn canvas_side(size: i32, border: i32) -> Result<i32, InvalidArgument> {
	if border < 0 {
		return Err(InvalidArgument::new(Param::Border, "Border must be non-negative"));
	}
	border.checked_mul(2)
		.and_then(|padding| size.checked_add(padding))
		.ok_or(InvalidArgument::new(Param::Border, "Border is too large"))
}

/// Returns a string of SVG code for an image depicting the given module grid, with the given
/// number of border modules. The string always uses Unix newlines (\n), regardless of the platform.
///
/// Every dark module becomes one `M{x},{y}h1v1h-1z` subpath, emitted row by row from the top
/// and left to right within a row, so equal inputs always give byte-identical output.
///
/// # Arguments
///
/// * `qr` - The grid to render. Must contain at least one module.
/// * `border` - The number of light modules to add around each edge. Must be non-negative.
/// * `light_color` - Background color, in any format supported by CSS. Must not be empty.
/// * `dark_color` - Color of dark modules, in any format supported by CSS. Must not be empty.
///
/// # Errors
///
/// Returns [`RenderError::InvalidArgument`] before producing any output if the grid is empty,
/// either color is empty, or the border is negative. Arguments are checked in that order.
///
/// # Example
///
/// ```rust
/// use qisvg::grid::BitGrid;
/// use qisvg::helper::to_svg_string;
///
/// let grid = BitGrid::from_rows(&[vec![true]]).unwrap();
/// let svg = to_svg_string(&grid, 0, "#fff", "#000").unwrap();
///
/// assert!(svg.contains("viewBox=\"0 0 1 1\""));
/// assert!(svg.contains("<path d=\"M0,0h1v1h-1z\""));
/// ```
pub fn to_svg_string(qr: &impl ModuleGrid, border: i32, light_color: &str, dark_color: &str) -> Result<String, RenderError> {
	check_grid(qr)?;
	if light_color.is_empty() {
		return Err(InvalidArgument::new(Param::LightColor, "color must not be empty").into());
	}
	if dark_color.is_empty() {
		return Err(InvalidArgument::new(Param::DarkColor, "color must not be empty").into());
	}
	let dimension = canvas_side(qr.size(), border)?;

	let mut result = String::new();
	result += &format!(
		"<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {0} {0}\" stroke=\"none\">\n", dimension);
	result += &format!(
		"\t<rect width=\"100%\" height=\"100%\" fill=\"{}\" shape-rendering=\"crispEdges\"/>\n", light_color);
	result += "\t<path d=\"";
	let mut modules = 0usize;
	for y in 0 .. qr.size() {
		for x in 0 .. qr.size() {
			if qr.get_module(x, y) {
				if modules > 0 {
					result += " ";
				}
				result += &format!("M{},{}h1v1h-1z", x + border, y + border);
				modules += 1;
			}
		}
	}
	result += &format!("\" fill=\"{}\" shape-rendering=\"crispEdges\"/>\n", dark_color);
	result += "</svg>\n";

	debug!("rendered {0}x{0} SVG with {1} dark modules", dimension, modules);
	Ok(result)
}

/// Renders the grid as SVG using the border and colors from `params`.
///
/// See [`to_svg_string`].
///
/// # Example
///
/// ```rust
/// use qisvg::config::RenderParams;
/// use qisvg::grid::BitGrid;
/// use qisvg::helper::render;
///
/// let grid = BitGrid::new(21).unwrap();
/// let svg = render(&grid, &RenderParams::default()).unwrap();
///
/// assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 29 29\""));
/// ```
pub fn render(qr: &impl ModuleGrid, params: &RenderParams) -> Result<String, RenderError> {
	to_svg_string(qr, params.border, &params.light_color, &params.dark_color)
}

/// Renders the grid as a grayscale image with one pixel per module.
///
/// Dark modules are black and everything else, including the border, is white.
///
/// # Errors
///
/// Returns [`RenderError::InvalidArgument`] if the grid is empty, the border is negative, or the
/// image would be wider than [`MAX_RASTER_SIDE`] pixels.
///
/// # Example
///
/// ```rust
/// use qisvg::grid::BitGrid;
/// use qisvg::helper::to_image_buffer;
///
/// let grid = BitGrid::new(21).unwrap();
/// let img = to_image_buffer(&grid, 4).unwrap();
///
/// assert_eq!(img.dimensions(), (29, 29));
/// ```
pub fn to_image_buffer(qr: &impl ModuleGrid, border: i32) -> Result<ImageBuffer<Luma<u8>, Vec<u8>>, RenderError> {
	check_grid(qr)?;
	let size = canvas_side(qr.size(), border)? as u32;
	if size > MAX_RASTER_SIDE {
		return Err(InvalidArgument::new(Param::Border, "too large for a raster image").into());
	}
	let mut img = ImageBuffer::new(size, size);

	for (x, y, pixel) in img.enumerate_pixels_mut() {
		let qr_x = x as i32 - border;
		let qr_y = y as i32 - border;
		*pixel = if qr.get_module(qr_x, qr_y) {
			Luma([0u8]) // Black
		} else {
			Luma([255u8]) // White
		};
	}

	debug!("rendered {0}x{0} raster image", size);
	Ok(img)
}

/// Renders the grid with [`to_image_buffer`] and saves it to `path`.
///
/// The image is always PNG encoded, whatever the file extension. Missing parent directories are
/// created.
///
/// # Errors
///
/// Returns [`RenderError::InvalidArgument`] for an invalid grid or border, [`RenderError::Io`] if
/// the directory cannot be created and [`RenderError::Image`] if encoding or writing fails.
pub fn save_png(qr: &impl ModuleGrid, border: i32, path: impl AsRef<Path>) -> Result<(), RenderError> {
	let path = path.as_ref();
	let img = to_image_buffer(qr, border)?;

	// Check if the directory exists, create it if it doesn't
	if let Some(directory) = path.parent() {
		if !directory.as_os_str().is_empty() && !directory.exists() {
			fs::create_dir_all(directory)?;
		}
	}

	img.save_with_format(path, ImageFormat::Png)?;
	debug!("saved QR image to {}", path.display());
	Ok(())
}
