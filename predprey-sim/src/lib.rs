#![deny(clippy::all)]
#![forbid(unsafe_code)]

use predprey_grid::{CellKind, Grid, GridCell, Random, Sampler, World};

/// Rule thresholds and initial-population caps. Passed explicitly into
/// [`initialize`] and [`step`]; there are no ambient globals.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RuleConfig {
    pub prey_breed_time: u32,
    pub predator_breed_time: u32,
    pub predator_starve_time: u32,
    pub max_predators: usize,
    pub max_prey: usize,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            prey_breed_time: 8,
            predator_breed_time: 9,
            predator_starve_time: 12,
            max_predators: 2300,
            max_prey: 3000,
        }
    }
}

/// Randomized starting population. Each cell gets one capped draw: all three
/// kinds while both running counts are under their caps, prey or empty once
/// predators are capped, empty only once prey are capped.
pub fn initialize(width: u32, height: u32, config: &RuleConfig, rand: &mut impl Sampler) -> Grid {
    let mut grid = Grid::new(width, height);
    let mut num_predators = 0;
    let mut num_prey = 0;
    for x in 0..width as i32 {
        for y in 0..height as i32 {
            let kind = if num_predators < config.max_predators && num_prey < config.max_prey {
                match rand.next_index(3) {
                    0 => CellKind::Predator,
                    1 => CellKind::Prey,
                    _ => CellKind::Empty,
                }
            } else if num_prey < config.max_prey {
                match rand.next_index(2) {
                    0 => CellKind::Prey,
                    _ => CellKind::Empty,
                }
            } else {
                CellKind::Empty
            };
            match kind {
                CellKind::Predator => num_predators += 1,
                CellKind::Prey => num_prey += 1,
                CellKind::Empty => {}
            }
            grid.set_kind(x, y, kind);
        }
    }
    grid
}

/// Computes the next generation from `grid`.
///
/// The rule pass runs over a single working buffer: a write made while
/// updating one cell is visible to every cell processed after it, and an
/// organism that moves ahead of the raster is updated again at its new
/// coordinate in the same tick. Raster order is x outer, y inner, and is
/// part of the emergent behavior.
pub fn step(grid: &Grid, config: &RuleConfig, rand: &mut impl Sampler) -> Grid {
    let mut next = grid.clone();
    for x in 0..grid.width() as i32 {
        for y in 0..grid.height() as i32 {
            match next.get(x, y).kind {
                CellKind::Empty => {}
                CellKind::Prey => update_prey(&mut next, x, y, config, rand),
                CellKind::Predator => update_predator(&mut next, x, y, config, rand),
            }
        }
    }
    next
}

fn update_prey(grid: &mut Grid, x: i32, y: i32, config: &RuleConfig, rand: &mut impl Sampler) {
    // Prey moves into a random empty neighbor.
    let (nx, ny) = grid.random_neighbor(x, y, rand);
    if grid.get(nx, ny).kind == CellKind::Empty {
        grid.set_kind(nx, ny, CellKind::Prey);
        grid.set_kind(x, y, CellKind::Empty);
    }

    // Prey breeds onto a random neighbor, occupied or not. The timer keeps
    // running at this coordinate even if the prey just moved away.
    let mut cell = grid.get(x, y);
    cell.breed_timer += 1;
    if cell.breed_timer >= config.prey_breed_time {
        let (bx, by) = grid.random_neighbor(x, y, rand);
        grid.set_kind(bx, by, CellKind::Prey);
        cell.breed_timer = 0;
    }
    grid.set(x, y, cell);
}

// Rule order within a tick is eat, breed, move, starve. Starvation clearing
// (x, y) after a successful move only clears the vacated origin.
fn update_predator(grid: &mut Grid, x: i32, y: i32, config: &RuleConfig, rand: &mut impl Sampler) {
    let mut cell = grid.get(x, y);

    // Predator eats.
    let (nx, ny) = grid.random_neighbor(x, y, rand);
    if grid.get(nx, ny).kind == CellKind::Prey {
        grid.set_kind(nx, ny, CellKind::Empty);
        cell.starve_timer = 0;
    }

    // Predator breeds onto a random neighbor, occupied or not.
    cell.breed_timer += 1;
    if cell.breed_timer >= config.predator_breed_time {
        let (bx, by) = grid.random_neighbor(x, y, rand);
        grid.set_kind(bx, by, CellKind::Predator);
        cell.breed_timer = 0;
    }

    // Predator moves into a random empty neighbor.
    let (mx, my) = grid.random_neighbor(x, y, rand);
    if grid.get(mx, my).kind == CellKind::Empty {
        grid.set_kind(mx, my, CellKind::Predator);
        cell.kind = CellKind::Empty;
    }

    // Predator starves.
    cell.starve_timer += 1;
    if cell.starve_timer >= config.predator_starve_time {
        cell.kind = CellKind::Empty;
    }

    grid.set(x, y, cell);
}

/// Driver-facing wrapper: owns the grid, the rule constants, and the
/// randomness source, and advances one tick per `update`.
#[derive(Debug)]
pub struct PredPreyWorld {
    grid: Grid,
    config: RuleConfig,
    rand: Random,
}

impl PredPreyWorld {
    pub fn new(width: u32, height: u32, config: RuleConfig, mut rand: Random) -> Self {
        let grid = initialize(width, height, &config, &mut rand);
        Self { grid, config, rand }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}

impl World for PredPreyWorld {
    fn width(&self) -> u32 {
        self.grid.width()
    }

    fn height(&self) -> u32 {
        self.grid.height()
    }

    fn num_cells(&self) -> usize {
        self.grid.num_cells()
    }

    fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &impl GridCell> + Clone {
        self.grid.cells_iter()
    }

    fn update(&mut self) {
        self.grid = step(&self.grid, &self.config, &mut self.rand);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_kind(grid: &Grid, kind: CellKind) -> usize {
        grid.cells_iter().filter(|cell| cell.kind == kind).count()
    }

    #[test]
    fn default_config_carries_the_fixed_rule_constants() {
        let config = RuleConfig::default();
        assert_eq!(config.prey_breed_time, 8);
        assert_eq!(config.predator_breed_time, 9);
        assert_eq!(config.predator_starve_time, 12);
        assert_eq!(config.max_predators, 2300);
        assert_eq!(config.max_prey, 3000);
    }

    #[test]
    fn initialize_respects_population_caps() {
        let config = RuleConfig::default();
        for seed in 0..5 {
            let mut rand = Random::from_seed(seed);
            let grid = initialize(100, 100, &config, &mut rand);
            let predators = count_kind(&grid, CellKind::Predator);
            let prey = count_kind(&grid, CellKind::Prey);
            assert!(predators <= config.max_predators);
            assert!(prey <= config.max_prey);
            // 10000 uniform three-way draws overshoot both caps by a wide
            // statistical margin, so both should be nearly saturated.
            assert!(predators > 2200, "only {predators} predators placed");
            assert!(prey > 2900, "only {prey} prey placed");
            assert!(count_kind(&grid, CellKind::Empty) > 0);
        }
    }

    #[test]
    fn small_grids_seed_under_the_cap_logic_too() {
        let config = RuleConfig {
            max_predators: 3,
            max_prey: 4,
            ..RuleConfig::default()
        };
        let mut rand = Random::from_seed(11);
        let grid = initialize(10, 10, &config, &mut rand);
        assert!(count_kind(&grid, CellKind::Predator) <= 3);
        assert!(count_kind(&grid, CellKind::Prey) <= 4);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let config = RuleConfig::default();
        let mut rand_a = Random::from_seed(5);
        let mut rand_b = Random::from_seed(5);
        let mut grid_a = initialize(16, 16, &config, &mut rand_a);
        let mut grid_b = initialize(16, 16, &config, &mut rand_b);
        for _ in 0..10 {
            grid_a = step(&grid_a, &config, &mut rand_a);
            grid_b = step(&grid_b, &config, &mut rand_b);
        }
        assert_eq!(grid_a, grid_b);
    }
}
