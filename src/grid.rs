use crate::error::{MapError, MapResult};
use glam::IVec2;
use std::fmt;

/// Integer terrain code stored in a grid cell
pub type Mark = u32;

/// The background mark, also treated as water by the isolation pass
pub const WATER: Mark = 0;

/// Largest width or height a grid may have, so coordinates fit in an `IVec2`
pub const MAX_DIMENSION: usize = i32::MAX as usize;

/// A rectangular grid of terrain marks
///
/// Cells are addressed as `(x, y)` with `x` in `[0, width)` and `y` in
/// `[0, height)`. Storage is column-major on `x`, so one "row" of the printed
/// map holds the `height` marks sharing an `x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkGrid {
    width: usize,
    height: usize,
    mark_count: Mark,
    cells: Vec<Mark>,
}

impl MarkGrid {
    /// Create a grid with every cell set to [`WATER`]
    ///
    /// # Arguments
    /// * `width` - Number of rows along `x`, at least 1
    /// * `height` - Number of cells per row, at least 1
    /// * `mark_count` - Number of distinct marks, at least 2
    ///
    /// # Returns
    /// * `MapResult<MarkGrid>` - The grid or `InvalidConfiguration`
    pub fn new(width: usize, height: usize, mark_count: Mark) -> MapResult<Self> {
        if width == 0 || height == 0 {
            return Err(MapError::config(format!(
                "grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(MapError::config(format!(
                "grid dimensions must not exceed {}, got {}x{}",
                MAX_DIMENSION, width, height
            )));
        }
        if mark_count < 2 {
            return Err(MapError::config(format!(
                "mark count must be at least 2, got {}",
                mark_count
            )));
        }

        // Vec capacity is limited to isize::MAX bytes
        let max_cells = isize::MAX as usize / std::mem::size_of::<Mark>();
        let cells = width
            .checked_mul(height)
            .filter(|&n| n <= max_cells)
            .ok_or_else(|| {
                MapError::config(format!("a {}x{} grid is too large to allocate", width, height))
            })?;

        Ok(MarkGrid {
            width,
            height,
            mark_count,
            cells: vec![WATER; cells],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn mark_count(&self) -> Mark {
        self.mark_count
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    /// Get the mark at `(x, y)`, or `None` outside the grid
    pub fn get(&self, x: usize, y: usize) -> Option<Mark> {
        if x < self.width && y < self.height {
            Some(self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Set the mark at `(x, y)`
    ///
    /// Out-of-bounds writes are ignored. Marks must lie in `[0, mark_count)`.
    pub fn set(&mut self, x: usize, y: usize, mark: Mark) {
        debug_assert!(mark < self.mark_count, "mark {} out of range", mark);
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.cells[i] = mark;
        }
    }

    pub fn in_bounds(&self, p: IVec2) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    pub fn get_at(&self, p: IVec2) -> Option<Mark> {
        if self.in_bounds(p) {
            self.get(p.x as usize, p.y as usize)
        } else {
            None
        }
    }

    pub fn set_at(&mut self, p: IVec2, mark: Mark) {
        if self.in_bounds(p) {
            self.set(p.x as usize, p.y as usize, mark);
        }
    }

    /// Iterate over the printed rows, one slice of `height` marks per `x`
    pub fn rows(&self) -> impl Iterator<Item = &[Mark]> {
        self.cells.chunks(self.height)
    }

    /// Iterate over all cells with their coordinates
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Mark)> + '_ {
        let height = self.height;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &mark)| (i / height, i % height, mark))
    }

    pub fn count_mark(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&m| m == mark).count()
    }

    /// Number of cells holding anything other than water
    pub fn land_count(&self) -> usize {
        self.cells.len() - self.count_mark(WATER)
    }

    /// Cell-wise difference mask of two grids
    ///
    /// The result has the smaller of the two widths, heights and mark counts.
    /// A cell is 1 where `a` and `b` differ and 0 where they agree.
    pub fn compare(a: &MarkGrid, b: &MarkGrid) -> MarkGrid {
        let width = a.width.min(b.width);
        let height = a.height.min(b.height);
        let mark_count = a.mark_count.min(b.mark_count);

        let mut diff = MarkGrid {
            width,
            height,
            mark_count,
            cells: vec![0; width * height],
        };
        for x in 0..width {
            for y in 0..height {
                if a.get(x, y) != b.get(x, y) {
                    diff.set(x, y, 1);
                }
            }
        }
        diff
    }

    /// Number of cells set in a mask produced by [`MarkGrid::compare`]
    pub fn diff_count(&self) -> usize {
        self.land_count()
    }
}

impl fmt::Display for MarkGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let mut first = true;
            for mark in row {
                if !first {
                    f.write_str(" ")?;
                }
                write!(f, "{}", mark)?;
                first = false;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_water() {
        let grid = MarkGrid::new(4, 3, 3).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.count_mark(WATER), 12);
        assert_eq!(grid.land_count(), 0);
    }

    #[test]
    fn test_new_rejects_bad_configuration() {
        assert!(matches!(
            MarkGrid::new(0, 3, 2),
            Err(MapError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            MarkGrid::new(3, 0, 2),
            Err(MapError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            MarkGrid::new(3, 3, 1),
            Err(MapError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_new_rejects_oversized_grid() {
        let too_wide = MAX_DIMENSION + 1;
        assert!(matches!(
            MarkGrid::new(too_wide, 1, 2),
            Err(MapError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            MarkGrid::new(1 << 32, 1 << 32, 2),
            Err(MapError::InvalidConfiguration(_))
        ));
        // Each axis is in range but the cell count cannot be allocated
        assert!(matches!(
            MarkGrid::new(MAX_DIMENSION, MAX_DIMENSION, 2),
            Err(MapError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_bounds() {
        let mut grid = MarkGrid::new(2, 5, 2).unwrap();
        grid.set(1, 4, 1);
        assert_eq!(grid.get(1, 4), Some(1));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 5), None);
        assert!(grid.in_bounds(IVec2::new(1, 4)));
        assert!(!grid.in_bounds(IVec2::new(-1, 0)));
        assert!(!grid.in_bounds(IVec2::new(0, 5)));
        assert_eq!(grid.get_at(IVec2::new(-1, 2)), None);
    }

    #[test]
    fn test_display_one_line_per_x() {
        let mut grid = MarkGrid::new(2, 3, 3).unwrap();
        grid.set(0, 2, 2);
        grid.set(1, 0, 1);
        assert_eq!(grid.to_string(), "0 0 2\n1 0 0\n");
    }

    #[test]
    fn test_compare_identical_is_all_zero() {
        let mut a = MarkGrid::new(5, 4, 3).unwrap();
        a.set(2, 2, 2);
        let b = a.clone();
        let diff = MarkGrid::compare(&a, &b);
        assert_eq!((diff.width(), diff.height()), (5, 4));
        assert_eq!(diff.diff_count(), 0);
    }

    #[test]
    fn test_compare_single_difference() {
        let a = MarkGrid::new(6, 4, 3).unwrap();
        let mut b = MarkGrid::new(5, 7, 4).unwrap();
        b.set(3, 1, 2);
        // Outside the overlap, so it must not show up
        b.set(2, 6, 1);

        let diff = MarkGrid::compare(&a, &b);
        assert_eq!((diff.width(), diff.height(), diff.mark_count()), (5, 4, 3));
        assert_eq!(diff.diff_count(), 1);
        assert_eq!(diff.get(3, 1), Some(1));
    }
}
