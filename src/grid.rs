//! Module grids.
//!
//! A renderer only needs to know a symbol's side length and whether each of its modules is
//! dark. [`ModuleGrid`] is that interface, so symbols from any QR encoder can be rendered.
//! [`BitGrid`] is an owned implementation that stores modules packed bitwise into bytes.

use crate::error::GridError;

/// A square grid of dark and light modules.
///
/// Coordinates start at the top left corner, `x` grows to the right and `y` grows downward.
pub trait ModuleGrid {
	/// The width and height of this grid, measured in modules.
	fn size(&self) -> i32;

	/// Returns the color of the module at the given coordinates, `true` for dark.
	///
	/// Coordinates outside the grid are light.
	fn get_module(&self, x: i32, y: i32) -> bool;

	/// Counts the dark modules.
	fn dark_count(&self) -> usize {
		let size = self.size();
		let mut count = 0;
		for y in 0..size {
			for x in 0..size {
				if self.get_module(x, y) {
					count += 1;
				}
			}
		}
		count
	}
}

impl<G: ModuleGrid + ?Sized> ModuleGrid for &G {
	fn size(&self) -> i32 {
		(**self).size()
	}

	fn get_module(&self, x: i32, y: i32) -> bool {
		(**self).get_module(x, y)
	}
}

/// An owned, immutable-once-built square grid of modules.
///
/// # Example
///
/// ```rust
/// use qisvg::grid::{BitGrid, ModuleGrid};
///
/// let grid = BitGrid::from_rows(&[
///     vec![true, false],
///     vec![false, true],
/// ]).unwrap();
///
/// assert_eq!(grid.size(), 2);
/// assert!(grid.get_module(1, 1));
/// assert!(!grid.get_module(2, 0));
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BitGrid {
	size: i32,

	/// Row-major, one bit per module (0 = light, 1 = dark).
	modules: Vec<u8>,
}

impl BitGrid {
	/// Creates an all-light grid of `size × size` modules.
	pub fn new(size: usize) -> Result<Self, GridError> {
		if size == 0 {
			return Err(GridError::Empty);
		}
		let side = i32::try_from(size).map_err(|_| GridError::TooLarge(size))?;
		let bits = size.checked_mul(size).ok_or(GridError::TooLarge(size))?;
		Ok(Self {
			size: side,
			modules: vec![0u8; bits.div_ceil(8)],
		})
	}

	/// Builds a grid from rows, where `rows[y][x]` is the module at `(x, y)`.
	pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self, GridError> {
		let mut grid = Self::new(rows.len())?;
		for (y, row) in rows.iter().enumerate() {
			if row.len() != rows.len() {
				return Err(GridError::NotSquare {
					row: y,
					len: row.len(),
					expected: rows.len(),
				});
			}
			for (x, &isdark) in row.iter().enumerate() {
				grid.set_bit(x, y, isdark);
			}
		}
		Ok(grid)
	}

	/// Builds a grid by asking `f(x, y)` for the color of every module.
	pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> bool) -> Result<Self, GridError> {
		let mut grid = Self::new(size)?;
		for y in 0..size {
			for x in 0..size {
				grid.set_bit(x, y, f(x, y));
			}
		}
		Ok(grid)
	}

	/// Copies any other grid into an owned one.
	pub fn from_grid(other: &impl ModuleGrid) -> Result<Self, GridError> {
		let size = usize::try_from(other.size()).map_err(|_| GridError::Empty)?;
		Self::from_fn(size, |x, y| other.get_module(x as i32, y as i32))
	}

	/// Sets the module at `(x, y)`. Coordinates outside the grid are ignored.
	pub fn set_module(&mut self, x: i32, y: i32, isdark: bool) {
		if (0..self.size).contains(&x) && (0..self.size).contains(&y) {
			self.set_bit(x as usize, y as usize, isdark);
		}
	}

	fn index(&self, x: usize, y: usize) -> usize {
		y * self.size as usize + x
	}

	fn get_bit(&self, x: usize, y: usize) -> bool {
		let index = self.index(x, y);
		(self.modules[index >> 3] >> (index & 7)) & 1 != 0
	}

	fn set_bit(&mut self, x: usize, y: usize, isdark: bool) {
		let index = self.index(x, y);
		let mask = 1u8 << (index & 7);
		if isdark {
			self.modules[index >> 3] |= mask;
		} else {
			self.modules[index >> 3] &= !mask;
		}
	}
}

impl ModuleGrid for BitGrid {
	fn size(&self) -> i32 {
		self.size
	}

	fn get_module(&self, x: i32, y: i32) -> bool {
		(0..self.size).contains(&x)
			&& (0..self.size).contains(&y)
			&& self.get_bit(x as usize, y as usize)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_new_is_all_light() {
		let grid = BitGrid::new(21).unwrap();
		assert_eq!(grid.size(), 21);
		assert_eq!(grid.dark_count(), 0);
	}

	#[test]
	fn test_empty_grid_rejected() {
		assert_eq!(BitGrid::new(0), Err(GridError::Empty));
		assert_eq!(BitGrid::from_rows(&[]), Err(GridError::Empty));
	}

	#[test]
	fn test_ragged_rows_rejected() {
		let err = BitGrid::from_rows(&[vec![true, false], vec![true]]).unwrap_err();
		assert_eq!(err, GridError::NotSquare { row: 1, len: 1, expected: 2 });
	}

	#[test]
	fn test_rows_are_indexed_y_then_x() {
		let grid = BitGrid::from_rows(&[
			vec![false, true, false],
			vec![false, false, false],
			vec![true, false, false],
		])
		.unwrap();
		assert!(grid.get_module(1, 0));
		assert!(grid.get_module(0, 2));
		assert!(!grid.get_module(0, 1));
		assert_eq!(grid.dark_count(), 2);
	}

	#[test]
	fn test_out_of_bounds_is_light() {
		let grid = BitGrid::from_fn(3, |_, _| true).unwrap();
		assert!(!grid.get_module(-1, 0));
		assert!(!grid.get_module(0, 3));
		assert!(!grid.get_module(3, 3));
		assert_eq!(grid.dark_count(), 9);
	}

	#[test]
	fn test_set_module() {
		let mut grid = BitGrid::new(9).unwrap();
		grid.set_module(8, 8, true);
		grid.set_module(4, 2, true);
		grid.set_module(4, 2, false);
		grid.set_module(9, 0, true);
		assert!(grid.get_module(8, 8));
		assert!(!grid.get_module(4, 2));
		assert_eq!(grid.dark_count(), 1);
	}

	#[test]
	fn test_from_grid_copies_modules() {
		let source = BitGrid::from_fn(5, |x, y| (x + y) % 2 == 0).unwrap();
		let copy = BitGrid::from_grid(&&source).unwrap();
		assert_eq!(copy, source);
	}
}
