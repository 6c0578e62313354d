use crate::error::{MapError, MapResult};
use crate::grid::{Mark, MarkGrid};
use rand::Rng;

/// Scatter marks over the grid independently per cell
///
/// Every cell draws `r` in `[0, 1)`; when `r <= density` it receives a mark
/// picked uniformly from `candidates`, otherwise it is left untouched.
/// Cells are visited row by row (`x` outer, `y` inner).
///
/// # Arguments
/// * `grid` - The grid to fill
/// * `candidates` - Marks to choose from, must be non-empty and in range
/// * `density` - Probability in `[0, 1]` that a cell receives a mark
/// * `rng` - Random source driving the draws
///
/// # Returns
/// * `MapResult<usize>` - Number of cells assigned, or `InvalidConfiguration`
pub fn scatter<R: Rng + ?Sized>(
    grid: &mut MarkGrid,
    candidates: &[Mark],
    density: f32,
    rng: &mut R,
) -> MapResult<usize> {
    if candidates.is_empty() {
        return Err(MapError::config("scatter needs at least one candidate mark"));
    }
    if let Some(bad) = candidates.iter().find(|&&m| m >= grid.mark_count()) {
        return Err(MapError::config(format!(
            "candidate mark {} is outside [0, {})",
            bad,
            grid.mark_count()
        )));
    }
    if !(0.0..=1.0).contains(&density) {
        return Err(MapError::config(format!(
            "density must lie in [0, 1], got {}",
            density
        )));
    }

    let mut assigned = 0;
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            let r = rng.r#gen::<f32>();
            if r <= density {
                let mark = candidates[rng.gen_range(0..candidates.len())];
                grid.set(x, y, mark);
                assigned += 1;
            }
        }
    }

    log::debug!(
        "scattered {} of {} cells at density {}",
        assigned,
        grid.width() * grid.height(),
        density
    );
    Ok(assigned)
}
