use log::{debug, warn};
use rand::Rng;

use crate::algorithms::bfs::breadth_first;
use crate::algorithms::SearchLimits;
use crate::error::GridError;
use crate::grid::{Grid, Position};

/// How many times an unsolvable maze is thrown away and rolled again.
pub const MAX_ATTEMPTS: usize = 10;

#[derive(Debug, Clone)]
pub struct Generated {
    pub grid: Grid,
    /// Mazes rolled in total, including the returned one.
    pub attempts: usize,
    pub solvable: bool,
}

/// Roll a random maze from the top-left to the bottom-right corner.
///
/// Unsolvable mazes are regenerated up to [`MAX_ATTEMPTS`] times. If every
/// attempt fails, the last maze is still returned with `solvable == false`.
pub fn generate<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    density: f64,
    rng: &mut R,
) -> Result<Generated, GridError> {
    let start = Position::new(0, 0);
    let end = Position::new(rows.saturating_sub(1), cols.saturating_sub(1));

    let mut grid = Grid::random(rows, cols, density, start, end, rng)?;
    let mut attempts = 1;
    while !is_solvable(&grid) {
        if attempts > MAX_ATTEMPTS {
            warn!(
                "no solvable {}x{} maze at density {} after {} attempts",
                rows, cols, density, attempts
            );
            return Ok(Generated {
                grid,
                attempts,
                solvable: false,
            });
        }
        debug!("maze attempt {} has no path, regenerating", attempts);
        grid = Grid::random(rows, cols, density, start, end, rng)?;
        attempts += 1;
    }

    Ok(Generated {
        grid,
        attempts,
        solvable: true,
    })
}

/// Whether the end can be reached from the start.
pub fn is_solvable(grid: &Grid) -> bool {
    breadth_first(grid, SearchLimits::unbounded()).is_found()
}
