use crate::error::{MapError, MapResult};
use crate::grid::{Mark, MarkGrid};
use crate::isolation::remove_isolated_land;
use crate::options::MaskSetting;
use crate::prolifeway::{prolifeway, DiffusionParameters, GrowthShape};
use crate::scatter::scatter;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fmt;

/// Generation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapMode {
    /// Every cell gets an independent uniformly random mark
    #[default]
    Normal,
    /// Blobs grown from random seeds, one pass per non-water mark
    Prolifeway,
}

impl fmt::Display for MapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapMode::Normal => f.write_str("normal"),
            MapMode::Prolifeway => f.write_str("prolifeway"),
        }
    }
}

/// Everything needed to produce a map
///
/// The same request always yields the same grid.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub mode: MapMode,
    pub width: usize,
    pub height: usize,
    pub mark_count: Mark,
    pub seed: u64,
    pub setting: MaskSetting,
    pub diffusion: DiffusionParameters,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        GenerationRequest {
            mode: MapMode::Normal,
            width: 10,
            height: 10,
            mark_count: 2,
            seed: 0,
            setting: MaskSetting::default(),
            diffusion: DiffusionParameters::default(),
        }
    }
}

impl GenerationRequest {
    pub fn new(mode: MapMode, width: usize, height: usize, mark_count: Mark, seed: u64) -> Self {
        GenerationRequest {
            mode,
            width,
            height,
            mark_count,
            seed,
            ..Default::default()
        }
    }

    pub fn with_setting(mut self, setting: MaskSetting) -> Self {
        self.setting = setting;
        self
    }

    pub fn with_diffusion(mut self, diffusion: DiffusionParameters) -> Self {
        self.diffusion = diffusion;
        self
    }

    /// Reject requests that cannot describe a map
    pub fn validate(&self) -> MapResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MapError::config(format!(
                "map size must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.mark_count < 2 {
            return Err(MapError::config(format!(
                "mark count must be at least 2, got {}",
                self.mark_count
            )));
        }
        if self.mode == MapMode::Prolifeway && self.diffusion.range_divisor == 0 {
            return Err(MapError::config("range divisor must be positive"));
        }
        Ok(())
    }
}

/// Generate a map from a request
///
/// Normal mode scatters every mark in `[0, mark_count)` at density 1.
/// Prolifeway mode grows each mark `1..mark_count` in turn, later marks
/// overwriting earlier ones. Isolated land is removed afterwards when the
/// request's setting asks for it.
///
/// # Returns
/// * `MapResult<MarkGrid>` - The finished grid or `InvalidConfiguration`
pub fn generate(request: &GenerationRequest) -> MapResult<MarkGrid> {
    request.validate()?;

    log::info!(
        "generating {}x{} {} map with {} marks (seed {}, mask {})",
        request.width,
        request.height,
        request.mode,
        request.mark_count,
        request.seed,
        request.setting
    );

    // Step 1: An empty map and a random stream owned by this run
    let mut grid = MarkGrid::new(request.width, request.height, request.mark_count)?;
    let mut rng = ChaCha8Rng::seed_from_u64(request.seed);

    // Step 2: Fill the map with the requested strategy
    match request.mode {
        MapMode::Normal => {
            let marks: Vec<Mark> = (0..request.mark_count).collect();
            scatter(&mut grid, &marks, 1.0, &mut rng)?;
        }
        MapMode::Prolifeway => {
            let range = request.diffusion.prolifeway_range(request.width, request.height);
            let shape = GrowthShape::from_setting(&request.setting);
            // One full pass per mark, later marks may overwrite earlier ones
            for id in 1..request.mark_count {
                prolifeway(&mut grid, request.diffusion.density, range, id, shape, &mut rng)?;
            }
        }
    }

    // Step 3: Drop land the border cannot reach
    if request.setting.removes_isolated_land() {
        remove_isolated_land(&mut grid);
    }

    log::info!(
        "map done: {} of {} cells are land",
        grid.land_count(),
        request.width * request.height
    );
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isolation::border_reachable;

    #[test]
    fn test_validate_rejects_bad_requests() {
        for request in [
            GenerationRequest::new(MapMode::Normal, 0, 5, 2, 0),
            GenerationRequest::new(MapMode::Normal, 5, 0, 2, 0),
            GenerationRequest::new(MapMode::Prolifeway, 5, 5, 1, 0),
        ] {
            assert!(matches!(
                generate(&request),
                Err(MapError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_normal_mode_uses_all_marks() {
        let request = GenerationRequest::new(MapMode::Normal, 30, 30, 4, 9);
        let grid = generate(&request).unwrap();
        for mark in 0..4 {
            assert!(grid.count_mark(mark) > 0, "mark {} missing", mark);
        }
    }

    #[test]
    fn test_cells_stay_in_range() {
        for mode in [MapMode::Normal, MapMode::Prolifeway] {
            for seed in 0..3 {
                let request = GenerationRequest::new(mode, 40, 25, 5, seed)
                    .with_setting(MaskSetting::new().prolifeway_circle(seed % 2 == 0));
                let grid = generate(&request).unwrap();
                assert!(grid.iter().all(|(_, _, m)| m < 5));
            }
        }
    }

    #[test]
    fn test_same_seed_same_map() {
        let request = GenerationRequest::new(MapMode::Prolifeway, 50, 40, 3, 13)
            .with_setting(MaskSetting::new().prolifeway_circle(true).remove_isolated_land(true));
        assert_eq!(generate(&request).unwrap(), generate(&request).unwrap());
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generate(&GenerationRequest::new(MapMode::Normal, 20, 20, 3, 1)).unwrap();
        let b = generate(&GenerationRequest::new(MapMode::Normal, 20, 20, 3, 2)).unwrap();
        assert!(MarkGrid::compare(&a, &b).diff_count() > 0);
    }

    #[test]
    fn test_isolation_only_removes_land() {
        let base = GenerationRequest::new(MapMode::Prolifeway, 50, 40, 3, 13)
            .with_setting(MaskSetting::new().prolifeway_circle(true));
        let pruned_request = base
            .clone()
            .with_setting(base.setting.remove_isolated_land(true));

        let raw = generate(&base).unwrap();
        let pruned = generate(&pruned_request).unwrap();

        for (x, y, mark) in pruned.iter() {
            let original = raw.get(x, y).unwrap();
            assert!(mark == original || mark == 0);
        }
        assert_eq!(border_reachable(&pruned).len(), pruned.land_count());
    }
}
