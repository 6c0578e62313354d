use crate::grid::{MarkGrid, WATER};
use glam::IVec2;

const NEIGHBORS: [IVec2; 4] = [IVec2::X, IVec2::NEG_X, IVec2::Y, IVec2::NEG_Y];

/// Cells reachable from the map border through land
#[derive(Debug, Clone)]
pub struct BorderReach {
    width: usize,
    height: usize,
    visited: Vec<bool>,
}

impl BorderReach {
    fn new(width: usize, height: usize) -> Self {
        BorderReach {
            width,
            height,
            visited: vec![false; width * height],
        }
    }

    fn index(&self, p: IVec2) -> usize {
        p.x as usize * self.height + p.y as usize
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.visited[x * self.height + y]
    }

    pub fn len(&self) -> usize {
        self.visited.iter().filter(|&&v| v).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.visited.iter().any(|&v| v)
    }

    /// Flood land from `start`, skipping water and cells already reached
    fn flood(&mut self, grid: &MarkGrid, start: IVec2) {
        let mut stack = vec![start];

        while let Some(p) = stack.pop() {
            // Step 1: Stop at the edge of the map and at water
            match grid.get_at(p) {
                Some(mark) if mark != WATER => {}
                _ => continue,
            }
            let i = self.index(p);
            // Step 2: Each land cell is reached only once
            if self.visited[i] {
                continue;
            }
            self.visited[i] = true;

            // Step 3: Spread to the four neighbours
            for offset in NEIGHBORS.iter().rev() {
                stack.push(p + *offset);
            }
        }
    }
}

/// Find every land cell connected to the border by 4-connected land
///
/// Seeds are taken from the top row (`y = 0`), the bottom row, the left
/// column (`x = 0`) and the right column, in that order. Water seeds reach
/// nothing.
pub fn border_reachable(grid: &MarkGrid) -> BorderReach {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    let mut reach = BorderReach::new(grid.width(), grid.height());

    let top = (0..w).map(|x| IVec2::new(x, 0));
    let bottom = (0..w).map(|x| IVec2::new(x, h - 1));
    let left = (0..h).map(|y| IVec2::new(0, y));
    let right = (0..h).map(|y| IVec2::new(w - 1, y));

    for seed in top.chain(bottom).chain(left).chain(right) {
        reach.flood(grid, seed);
    }

    reach
}

/// Turn land that cannot reach the border into water
///
/// # Returns
/// * `usize` - Number of land cells converted
pub fn remove_isolated_land(grid: &mut MarkGrid) -> usize {
    let reach = border_reachable(grid);

    let mut removed = 0;
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            if reach.contains(x, y) {
                continue;
            }
            if grid.get(x, y) != Some(WATER) {
                removed += 1;
            }
            grid.set(x, y, WATER);
        }
    }

    log::debug!(
        "removed {} isolated land cells, {} remain connected to the border",
        removed,
        reach.len()
    );
    removed
}
