use crate::error::{MapError, MapResult};
use crate::grid::{Mark, MarkGrid};
use crate::options::MaskSetting;
use glam::IVec2;
use rand::Rng;

/// Expansion order from every visited cell: +x, -x, +y, -y
const DIRECTIONS: [IVec2; 4] = [IVec2::X, IVec2::NEG_X, IVec2::Y, IVec2::NEG_Y];

/// Circular growth stops once the squared distance exceeds `range^2 * 0.64`,
/// i.e. 0.8 of the nominal range.
const CIRCLE_FACTOR: f64 = 0.64;

/// Parameters controlling diffusion growth
#[derive(Debug, Clone)]
pub struct DiffusionParameters {
    /// Per-cell probability of planting a growth seed
    pub density: f32,
    /// The maximum growth range is `(width + height) / range_divisor`
    pub range_divisor: usize,
}

impl Default for DiffusionParameters {
    fn default() -> Self {
        DiffusionParameters {
            density: 0.01,
            range_divisor: 6,
        }
    }
}

impl DiffusionParameters {
    /// Upper bound (exclusive) of the per-seed range for a grid
    pub fn prolifeway_range(&self, width: usize, height: usize) -> usize {
        (width + height) / self.range_divisor.max(1)
    }
}

/// How far a single growth may spread from its seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthShape {
    /// Bounded by the step count along the expansion path
    Diamond,
    /// Bounded by the Euclidean distance to the seed
    Circle,
}

impl GrowthShape {
    pub fn from_setting(setting: &MaskSetting) -> Self {
        if setting.is_circular() {
            GrowthShape::Circle
        } else {
            GrowthShape::Diamond
        }
    }

    /// Whether expansion stops at `point` after taking `step` steps
    fn stops(self, point: &GrowthPoint, step: usize, range: usize) -> bool {
        match self {
            GrowthShape::Diamond => step >= range,
            GrowthShape::Circle => {
                let d2 = (point.origin - point.pos).length_squared();
                d2 as f64 > (range * range) as f64 * CIRCLE_FACTOR
            }
        }
    }
}

/// State of one step of a growth: where it started, where it is now, and
/// the mark it spreads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthPoint {
    pub origin: IVec2,
    pub pos: IVec2,
    pub id: Mark,
}

impl GrowthPoint {
    pub fn new(origin: IVec2, id: Mark) -> Self {
        GrowthPoint {
            origin,
            pos: origin,
            id,
        }
    }

    fn moved(self, offset: IVec2) -> Self {
        GrowthPoint {
            pos: self.pos + offset,
            ..self
        }
    }
}

/// Counters reported by a single growth
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrowthStats {
    /// Cells newly set to the growth's mark
    pub cells_marked: usize,
    /// Expansion attempts, including ones cut off by bounds or existing marks
    pub steps: usize,
}

/// Grow a single blob of `seed.id` from `seed`
///
/// Depth-first expansion in the order +x, -x, +y, -y. A branch ends when it
/// leaves the grid, reaches a cell already holding the mark, or hits the
/// shape bound. The explicit stack reproduces the order of a recursive fill
/// without consuming call stack.
pub fn grow(grid: &mut MarkGrid, seed: GrowthPoint, range: usize, shape: GrowthShape) -> GrowthStats {
    let mut stats = GrowthStats::default();
    let mut stack = vec![(seed, 0usize)];

    while let Some((point, step)) = stack.pop() {
        stats.steps += 1;

        // Step 1: Leaving the grid or reaching our own mark ends the branch
        match grid.get_at(point.pos) {
            Some(mark) if mark != point.id => {}
            _ => continue,
        }

        // Step 2: Claim the cell
        grid.set_at(point.pos, point.id);
        stats.cells_marked += 1;

        // Step 3: Check the shape bound with the step count after this cell
        let step = step + 1;
        if shape.stops(&point, step, range) {
            continue;
        }

        // Step 4: Queue the neighbours, reversed so that +x is popped first
        for offset in DIRECTIONS.iter().rev() {
            stack.push((point.moved(*offset), step));
        }
    }

    stats
}

/// Plant and grow seeds of mark `id` across the whole grid
///
/// Each cell (`x` outer, `y` inner) draws `r` in `[0, 1)`; when
/// `r <= density` a growth starts there with a range drawn uniformly from
/// `[1, prolifeway_range - 1]`, or 1 when `prolifeway_range <= 1`.
///
/// # Arguments
/// * `grid` - The grid to grow into
/// * `density` - Per-cell seeding probability in `[0, 1]`
/// * `prolifeway_range` - Exclusive upper bound of the per-seed range
/// * `id` - Mark to spread, in `[1, mark_count)`
/// * `shape` - Diamond or circle bound
/// * `rng` - Random source driving the draws
///
/// # Returns
/// * `MapResult<usize>` - Number of seeds planted
pub fn prolifeway<R: Rng + ?Sized>(
    grid: &mut MarkGrid,
    density: f32,
    prolifeway_range: usize,
    id: Mark,
    shape: GrowthShape,
    rng: &mut R,
) -> MapResult<usize> {
    if id == 0 || id >= grid.mark_count() {
        return Err(MapError::config(format!(
            "growth mark {} is outside [1, {})",
            id,
            grid.mark_count()
        )));
    }
    if !(0.0..=1.0).contains(&density) {
        return Err(MapError::config(format!(
            "density must lie in [0, 1], got {}",
            density
        )));
    }

    let mut seeds = 0;
    let mut marked = 0;
    for i in 0..grid.width() {
        for j in 0..grid.height() {
            let r = rng.r#gen::<f32>();
            if r <= density {
                let range = if prolifeway_range > 1 {
                    rng.gen_range(1..prolifeway_range)
                } else {
                    1
                };
                let seed = GrowthPoint::new(IVec2::new(i as i32, j as i32), id);
                marked += grow(grid, seed, range, shape).cells_marked;
                seeds += 1;
            }
        }
    }

    log::debug!(
        "mark {}: planted {} seeds, marked {} cells ({:?})",
        id,
        seeds,
        marked,
        shape
    );
    Ok(seeds)
}
