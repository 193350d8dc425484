use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{Endpoint, GridError, ParsePositionError};

/// A cell address. Serialized as `[row, col]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Shift by a signed offset. `None` if either coordinate would go negative.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Position> {
        Some(Position {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }

    pub fn manhattan(self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<[usize; 2]> for Position {
    fn from([row, col]: [usize; 2]) -> Self {
        Position { row, col }
    }
}

impl From<Position> for [usize; 2] {
    fn from(pos: Position) -> Self {
        [pos.row, pos.col]
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePositionError(s.to_string());
        let (row, col) = s.split_once(',').ok_or_else(err)?;
        let row = row.trim().parse().map_err(|_| err())?;
        let col = col.trim().parse().map_err(|_| err())?;
        Ok(Position { row, col })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Open,
    Wall,
    Start,
    End,
}

/// Walls of the 5x6 demonstration maze.
pub const DEFAULT_WALLS: [Position; 6] = [
    Position::new(0, 1),
    Position::new(2, 1),
    Position::new(2, 3),
    Position::new(3, 1),
    Position::new(3, 4),
    Position::new(4, 4),
];

/// Obstacle source for [`build_grid`].
#[derive(Debug, Clone, PartialEq)]
pub enum Obstacles {
    /// An explicit wall list.
    Walls(Vec<Position>),
    /// Every cell independently becomes a wall with this probability.
    Density(f64),
}

/// A rectangular maze with exactly one start and one end cell.
///
/// When start and end coincide the shared cell is stored as [`Cell::End`];
/// [`is_start`](Grid::is_start) and [`is_end`](Grid::is_end) still report
/// both roles.
///
/// The grid is never mutated by a search, so any number of searches may
/// borrow the same grid at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Cell>>,
    start: Position,
    end: Position,
}

impl Default for Grid {
    /// The 5x6 demonstration maze: start `(0, 0)`, end `(4, 5)`.
    fn default() -> Self {
        let mut cells = vec![vec![Cell::Open; 6]; 5];
        for wall in DEFAULT_WALLS {
            cells[wall.row][wall.col] = Cell::Wall;
        }
        Grid::finish(5, 6, cells, Position::new(0, 0), Position::new(4, 5))
    }
}

impl Grid {
    /// Build a grid from an explicit wall list.
    ///
    /// Walls declared on the start or end cell are overridden: both
    /// endpoints are always open.
    pub fn with_walls<I>(
        rows: usize,
        cols: usize,
        walls: I,
        start: Position,
        end: Position,
    ) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = Position>,
    {
        Self::check_layout(rows, cols, start, end)?;

        let mut cells = vec![vec![Cell::Open; cols]; rows];
        for pos in walls {
            if pos.row >= rows || pos.col >= cols {
                return Err(GridError::WallOutOfBounds { pos, rows, cols });
            }
            cells[pos.row][pos.col] = Cell::Wall;
        }

        Ok(Self::finish(rows, cols, cells, start, end))
    }

    /// Build a grid where each cell becomes a wall with probability `density`.
    pub fn random<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        density: f64,
        start: Position,
        end: Position,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        if !(0.0..=1.0).contains(&density) {
            return Err(GridError::Density(density));
        }
        Self::check_layout(rows, cols, start, end)?;

        let mut cells = vec![vec![Cell::Open; cols]; rows];
        for row in cells.iter_mut() {
            for cell in row.iter_mut() {
                if rng.gen_bool(density) {
                    *cell = Cell::Wall;
                }
            }
        }

        Ok(Self::finish(rows, cols, cells, start, end))
    }

    /// Build a grid from a boolean matrix where `true` marks a wall.
    pub fn from_wall_matrix(
        matrix: &[Vec<bool>],
        start: Position,
        end: Position,
    ) -> Result<Self, GridError> {
        let rows = matrix.len();
        let cols = matrix.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty { rows, cols });
        }
        if let Some((row, cells)) = matrix.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(GridError::Ragged {
                row,
                expected: cols,
                found: cells.len(),
            });
        }

        let walls = matrix.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, wall)| **wall)
                .map(move |(col, _)| Position::new(row, col))
        });
        Self::with_walls(rows, cols, walls, start, end)
    }

    pub fn builder(rows: usize, cols: usize) -> GridBuilder {
        GridBuilder::new(rows, cols)
    }

    fn check_layout(
        rows: usize,
        cols: usize,
        start: Position,
        end: Position,
    ) -> Result<(), GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty { rows, cols });
        }
        for (which, pos) in [(Endpoint::Start, start), (Endpoint::End, end)] {
            if pos.row >= rows || pos.col >= cols {
                return Err(GridError::OutOfBounds {
                    which,
                    pos,
                    rows,
                    cols,
                });
            }
        }
        Ok(())
    }

    fn finish(
        rows: usize,
        cols: usize,
        mut cells: Vec<Vec<Cell>>,
        start: Position,
        end: Position,
    ) -> Self {
        cells[start.row][start.col] = Cell::Start;
        // End wins a shared cell.
        cells[end.row][end.col] = Cell::End;
        Grid {
            rows,
            cols,
            cells,
            start,
            end,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.cells.get(pos.row)?.get(pos.col).copied()
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// In bounds and not a wall.
    pub fn is_open(&self, pos: Position) -> bool {
        matches!(self.cell(pos), Some(cell) if cell != Cell::Wall)
    }

    /// Signed variant of [`is_open`](Self::is_open) used by straight-line scans.
    pub(crate) fn is_open_at(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && self.is_open(Position::new(row as usize, col as usize))
    }

    pub fn is_start(&self, pos: Position) -> bool {
        pos == self.start
    }

    pub fn is_end(&self, pos: Position) -> bool {
        pos == self.end
    }

    /// Open neighbors in the fixed order up, left, right, down.
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        let mut neighbors = Vec::with_capacity(4);
        for (d_row, d_col) in [(-1, 0), (0, -1), (0, 1), (1, 0)] {
            if let Some(next) = pos.offset(d_row, d_col) {
                if self.is_open(next) {
                    neighbors.push(next);
                }
            }
        }
        neighbors
    }

    pub fn wall_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == Cell::Wall)
            .count()
    }

    /// The grid as a boolean matrix, `true` for walls.
    pub fn wall_matrix(&self) -> Vec<Vec<bool>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|&cell| cell == Cell::Wall).collect())
            .collect()
    }

    /// Draw the maze in a box, marking `path` cells with `*`.
    ///
    /// Legend: `S` start, `F` end, `X` wall, blank open.
    pub fn render(&self, path: &[Position]) -> String {
        let on_path: FxHashSet<Position> = path.iter().copied().collect();
        let mut out = String::with_capacity((self.cols + 3) * (self.rows + 2));

        out.push_str(&"_".repeat(self.cols + 2));
        out.push('\n');
        for (row, cells) in self.cells.iter().enumerate() {
            out.push('|');
            for (col, cell) in cells.iter().enumerate() {
                out.push(match cell {
                    Cell::Start => 'S',
                    Cell::End => 'F',
                    Cell::Wall => 'X',
                    Cell::Open if on_path.contains(&Position::new(row, col)) => '*',
                    Cell::Open => ' ',
                });
            }
            out.push_str("|\n");
        }
        out.push_str(&"-".repeat(self.cols + 2));
        out.push('\n');
        out
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&[]))
    }
}

/// Incremental grid construction where the endpoints may be supplied late.
#[derive(Debug, Clone, Default)]
pub struct GridBuilder {
    rows: usize,
    cols: usize,
    walls: Vec<Position>,
    start: Option<Position>,
    end: Option<Position>,
}

impl GridBuilder {
    pub fn new(rows: usize, cols: usize) -> Self {
        GridBuilder {
            rows,
            cols,
            ..Default::default()
        }
    }

    pub fn wall(mut self, pos: Position) -> Self {
        self.walls.push(pos);
        self
    }

    pub fn walls<I: IntoIterator<Item = Position>>(mut self, walls: I) -> Self {
        self.walls.extend(walls);
        self
    }

    pub fn start(mut self, pos: Position) -> Self {
        self.start = Some(pos);
        self
    }

    pub fn end(mut self, pos: Position) -> Self {
        self.end = Some(pos);
        self
    }

    pub fn build(self) -> Result<Grid, GridError> {
        let start = self
            .start
            .ok_or(GridError::MissingEndpoint(Endpoint::Start))?;
        let end = self.end.ok_or(GridError::MissingEndpoint(Endpoint::End))?;
        Grid::with_walls(self.rows, self.cols, self.walls, start, end)
    }
}

/// Construct a grid from either a wall list or a random obstacle density.
///
/// `rng` is only consulted for [`Obstacles::Density`].
pub fn build_grid<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    obstacles: Obstacles,
    start: Position,
    end: Position,
    rng: &mut R,
) -> Result<Grid, GridError> {
    match obstacles {
        Obstacles::Walls(walls) => Grid::with_walls(rows, cols, walls, start, end),
        Obstacles::Density(density) => Grid::random(rows, cols, density, start, end, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn p(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn neighbors_follow_up_left_right_down() {
        let grid = Grid::with_walls(3, 3, [], p(0, 0), p(2, 2)).unwrap();
        assert_eq!(
            grid.neighbors(p(1, 1)),
            vec![p(0, 1), p(1, 0), p(1, 2), p(2, 1)]
        );
        assert_eq!(grid.neighbors(p(0, 0)), vec![p(0, 1), p(1, 0)]);
        assert_eq!(grid.neighbors(p(2, 2)), vec![p(1, 2), p(2, 1)]);
    }

    #[test]
    fn neighbors_skip_walls() {
        let grid = Grid::default();
        // (0, 1) is a wall next to the start.
        assert_eq!(grid.neighbors(p(0, 0)), vec![p(1, 0)]);
        assert_eq!(grid.neighbors(p(3, 3)), vec![p(3, 2), p(4, 3)]);
    }

    #[test]
    fn walls_on_endpoints_are_overridden() {
        let grid = Grid::with_walls(2, 2, [p(0, 0), p(1, 1), p(0, 1)], p(0, 0), p(1, 1)).unwrap();
        assert_eq!(grid.cell(p(0, 0)), Some(Cell::Start));
        assert_eq!(grid.cell(p(1, 1)), Some(Cell::End));
        assert_eq!(grid.cell(p(0, 1)), Some(Cell::Wall));
        assert_eq!(grid.wall_count(), 1);
    }

    #[test]
    fn shared_endpoint_cell_keeps_both_roles() {
        let grid = Grid::with_walls(3, 3, [p(1, 1)], p(1, 0), p(1, 0)).unwrap();
        assert_eq!(grid.cell(p(1, 0)), Some(Cell::End));
        assert!(grid.is_start(p(1, 0)));
        assert!(grid.is_end(p(1, 0)));
        assert!(grid.is_open(p(1, 0)));
        assert_eq!(grid.start(), grid.end());
    }

    #[test]
    fn endpoints_must_be_in_bounds() {
        let err = Grid::with_walls(3, 3, [], p(0, 0), p(3, 0)).unwrap_err();
        assert_eq!(
            err,
            GridError::OutOfBounds {
                which: Endpoint::End,
                pos: p(3, 0),
                rows: 3,
                cols: 3
            }
        );
        assert!(matches!(
            Grid::with_walls(3, 3, [], p(0, 7), p(1, 1)),
            Err(GridError::OutOfBounds {
                which: Endpoint::Start,
                ..
            })
        ));
    }

    #[test]
    fn builder_requires_both_endpoints() {
        let err = Grid::builder(2, 2).end(p(1, 1)).build().unwrap_err();
        assert_eq!(err, GridError::MissingEndpoint(Endpoint::Start));
        let err = Grid::builder(2, 2).start(p(0, 0)).build().unwrap_err();
        assert_eq!(err, GridError::MissingEndpoint(Endpoint::End));

        let grid = Grid::builder(2, 2)
            .wall(p(0, 1))
            .start(p(0, 0))
            .end(p(1, 1))
            .build()
            .unwrap();
        assert!(!grid.is_open(p(0, 1)));
    }

    #[test]
    fn wall_matrix_round_trips_and_rejects_ragged_rows() {
        let matrix = vec![vec![false, true], vec![false, false]];
        let grid = Grid::from_wall_matrix(&matrix, p(0, 0), p(1, 1)).unwrap();
        assert_eq!(grid.wall_matrix(), matrix);

        let ragged = vec![vec![false, true], vec![false]];
        assert_eq!(
            Grid::from_wall_matrix(&ragged, p(0, 0), p(0, 1)).unwrap_err(),
            GridError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            }
        );
        assert!(matches!(
            Grid::from_wall_matrix(&[], p(0, 0), p(0, 0)),
            Err(GridError::Empty { .. })
        ));
    }

    #[test]
    fn random_density_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        let open = Grid::random(6, 6, 0.0, p(0, 0), p(5, 5), &mut rng).unwrap();
        assert_eq!(open.wall_count(), 0);

        let full = Grid::random(6, 6, 1.0, p(0, 0), p(5, 5), &mut rng).unwrap();
        assert_eq!(full.wall_count(), 34);
        assert!(full.is_open(p(0, 0)) && full.is_open(p(5, 5)));

        assert!(matches!(
            Grid::random(2, 2, 1.5, p(0, 0), p(1, 1), &mut rng),
            Err(GridError::Density(_))
        ));
        assert!(matches!(
            Grid::random(2, 2, f64::NAN, p(0, 0), p(1, 1), &mut rng),
            Err(GridError::Density(_))
        ));
    }

    #[test]
    fn random_grids_are_reproducible_per_seed() {
        let a = Grid::random(10, 10, 0.3, p(0, 0), p(9, 9), &mut StdRng::seed_from_u64(42)).unwrap();
        let b = Grid::random(10, 10, 0.3, p(0, 0), p(9, 9), &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn build_grid_dispatches_on_obstacles() {
        let mut rng = StdRng::seed_from_u64(1);
        let walls = build_grid(5, 6, Obstacles::Walls(DEFAULT_WALLS.to_vec()), p(0, 0), p(4, 5), &mut rng).unwrap();
        assert_eq!(walls, Grid::default());

        let dense = build_grid(3, 3, Obstacles::Density(1.0), p(0, 0), p(2, 2), &mut rng).unwrap();
        assert_eq!(dense.wall_count(), 7);
    }

    #[test]
    fn position_parses_and_serializes_as_pair() {
        assert_eq!("3,4".parse::<Position>().unwrap(), p(3, 4));
        assert_eq!(" 1 , 2 ".parse::<Position>().unwrap(), p(1, 2));
        assert!("3".parse::<Position>().is_err());
        assert!("a,b".parse::<Position>().is_err());

        assert_eq!(serde_json::to_string(&p(2, 5)).unwrap(), "[2,5]");
        assert_eq!(serde_json::from_str::<Position>("[4,1]").unwrap(), p(4, 1));
    }

    #[test]
    fn render_marks_path_cells() {
        let grid = Grid::default();
        let path = [p(0, 0), p(1, 0), p(1, 1), p(1, 2)];
        let expected = "\
________
|SX    |
|***   |
| X X  |
| X  X |
|    XF|
--------
";
        assert_eq!(grid.render(&path), expected);
    }
}
