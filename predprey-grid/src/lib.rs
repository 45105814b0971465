#![deny(clippy::all)]
#![forbid(unsafe_code)]

use rand::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

pub trait World {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn num_cells(&self) -> usize;
    fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &impl GridCell> + Clone;
    fn update(&mut self);
}

pub trait GridCell {
    fn color_rgba(&self) -> [u8; 4];
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CellKind {
    #[default]
    Empty,
    Prey,
    Predator,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Cell {
    pub kind: CellKind,
    pub breed_timer: u32,
    pub starve_timer: u32,
}

impl Cell {
    pub fn of_kind(kind: CellKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }
}

impl GridCell for Cell {
    fn color_rgba(&self) -> [u8; 4] {
        match self.kind {
            CellKind::Empty => [0xff, 0xff, 0xff, 0xff],
            CellKind::Prey => [0x00, 0xff, 0x00, 0xff],
            CellKind::Predator => [0xff, 0x00, 0x00, 0xff],
        }
    }
}

/// Toroidal grid of cells. Every `i32` coordinate is valid; indexing wraps
/// in both axes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    cells: Vec<Cell>,
    width: u32,
    height: u32,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0);
        Self {
            cells: vec![Cell::default(); width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Row-major iteration, matching the framebuffer layout.
    pub fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &Cell> + Clone {
        self.cells.iter()
    }

    pub fn get(&self, x: i32, y: i32) -> Cell {
        self.cells[self.cell_index(x, y)]
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        let index = self.cell_index(x, y);
        self.cells[index] = cell;
    }

    /// Writes only the kind, leaving the timers stored at that coordinate
    /// untouched. Movement, breeding, and eating all write through here:
    /// timers stay with the coordinate, so an organism that moves adopts
    /// whatever timer values its destination held.
    pub fn set_kind(&mut self, x: i32, y: i32, kind: CellKind) {
        let index = self.cell_index(x, y);
        self.cells[index].kind = kind;
    }

    /// One of the four diagonal neighbors of `(x, y)`: dx and dy are drawn
    /// independently and uniformly from {-1, +1}, so both axes always step.
    /// The diagonal-only topology is deliberate and load-bearing for the
    /// population dynamics.
    pub fn random_neighbor(&self, x: i32, y: i32, rand: &mut impl Sampler) -> (i32, i32) {
        let nx = Self::modulo(x + rand.next_offset(), self.width);
        let ny = Self::modulo(y + rand.next_offset(), self.height);
        (nx, ny)
    }

    fn cell_index(&self, x: i32, y: i32) -> usize {
        let col = Self::modulo(x, self.width);
        let row = Self::modulo(y, self.height);
        row as usize * self.width as usize + col as usize
    }

    fn modulo(val: i32, max: u32) -> i32 {
        val.rem_euclid(max as i32)
    }
}

/// Source of the uniform draws the simulation consumes. Production code uses
/// [`Random`]; tests can script the draws.
pub trait Sampler {
    /// Uniform draw from {-1, +1}.
    fn next_offset(&mut self) -> i32;

    /// Uniform draw from `0..len`.
    fn next_index(&mut self, len: usize) -> usize;
}

#[derive(Debug)]
pub struct Random {
    rng: SmallRng,
}

impl Random {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reproducible sampler for tests. Run-to-run determinism is otherwise
    /// not promised.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for Random {
    fn next_offset(&mut self) -> i32 {
        if self.rng.random_bool(0.5) { 1 } else { -1 }
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_wrap_in_both_axes() {
        let mut grid = Grid::new(5, 3);
        grid.set(-1, -1, Cell::of_kind(CellKind::Prey));
        assert_eq!(grid.get(4, 2).kind, CellKind::Prey);
        assert_eq!(grid.get(-1, -1), grid.get(4, 2));
        assert_eq!(grid.get(5, 3), grid.get(0, 0));
        assert_eq!(grid.get(-6, 0), grid.get(4, 0));
    }

    #[test]
    fn set_kind_keeps_timers_in_place() {
        let mut grid = Grid::new(4, 4);
        grid.set(
            1,
            2,
            Cell {
                kind: CellKind::Predator,
                breed_timer: 5,
                starve_timer: 7,
            },
        );
        grid.set_kind(1, 2, CellKind::Prey);
        let cell = grid.get(1, 2);
        assert_eq!(cell.kind, CellKind::Prey);
        assert_eq!(cell.breed_timer, 5);
        assert_eq!(cell.starve_timer, 7);
    }

    #[test]
    fn random_neighbor_is_a_wrapped_diagonal() {
        let grid = Grid::new(7, 5);
        let mut rand = Random::from_seed(42);
        for _ in 0..200 {
            let (nx, ny) = grid.random_neighbor(0, 0, &mut rand);
            assert!((0..7).contains(&nx) && (0..5).contains(&ny));
            assert!(nx == 1 || nx == 6, "x offset must be +-1, got {nx}");
            assert!(ny == 1 || ny == 4, "y offset must be +-1, got {ny}");
        }
    }

    #[test]
    fn random_neighbor_reaches_all_four_diagonals() {
        let grid = Grid::new(9, 9);
        let mut rand = Random::from_seed(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            seen.insert(grid.random_neighbor(4, 4, &mut rand));
        }
        let diagonals: std::collections::HashSet<_> =
            [(3, 3), (3, 5), (5, 3), (5, 5)].into_iter().collect();
        assert_eq!(seen, diagonals);
    }

    #[test]
    fn new_grid_is_all_empty() {
        let grid = Grid::new(6, 6);
        assert_eq!(grid.num_cells(), 36);
        assert!(grid.cells_iter().all(|cell| *cell == Cell::default()));
    }

    #[test]
    #[should_panic]
    fn zero_width_is_rejected() {
        Grid::new(0, 3);
    }
}
