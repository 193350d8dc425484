use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::algorithms::{Heuristic, SearchLimits};
use crate::error::GridError;
use crate::grid::{build_grid, Grid, Obstacles, Position, DEFAULT_WALLS};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Grid maze shortest-path search", long_about = None)]
pub struct Config {
    /// Grid height. Without --walls or --density the demonstration maze is used.
    #[arg(long, default_value_t = 30)]
    pub rows: usize,

    #[arg(long, default_value_t = 30)]
    pub cols: usize,

    /// Fill the grid at random with this wall probability.
    #[arg(long, conflicts_with = "walls")]
    pub density: Option<f64>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Wall cells as `row,col`, repeatable.
    #[arg(long, num_args = 1..)]
    pub walls: Vec<Position>,

    /// Defaults to the top-left corner.
    #[arg(long)]
    pub start: Option<Position>,

    /// Defaults to the bottom-right corner.
    #[arg(long)]
    pub end: Option<Position>,

    /// Algorithm name, or `all` to compare every algorithm.
    #[arg(long, default_value = "astar")]
    pub algorithm: String,

    #[arg(long, value_enum, default_value_t = Heuristic::Manhattan)]
    pub heuristic: Heuristic,

    #[arg(long)]
    pub max_expansions: Option<usize>,

    /// Answer a JSON solve request read from this file.
    #[arg(long)]
    pub request: Option<PathBuf>,

    /// Only print the outcome line.
    #[arg(long, default_value_t = false)]
    pub quiet: bool,

    #[arg(long, default_value_t = LevelFilter::Warn)]
    pub log_level: LevelFilter,
}

impl Config {
    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_expansions: self.max_expansions,
        }
    }

    fn uses_default_maze(&self) -> bool {
        self.walls.is_empty() && self.density.is_none()
    }

    /// The grid described by the command line.
    pub fn grid(&self) -> Result<Grid, GridError> {
        if self.uses_default_maze() {
            let default = Grid::default();
            return match (self.start, self.end) {
                (None, None) => Ok(default),
                (start, end) => Grid::with_walls(
                    default.rows(),
                    default.cols(),
                    DEFAULT_WALLS,
                    start.unwrap_or(default.start()),
                    end.unwrap_or(default.end()),
                ),
            };
        }

        let start = self.start.unwrap_or(Position::new(0, 0));
        let end = self.end.unwrap_or(Position::new(
            self.rows.saturating_sub(1),
            self.cols.saturating_sub(1),
        ));
        let obstacles = match self.density {
            Some(density) => Obstacles::Density(density),
            None => Obstacles::Walls(self.walls.clone()),
        };
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        build_grid(self.rows, self.cols, obstacles, start, end, &mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("maze_search").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_to_the_demonstration_maze() {
        let config = parse(&[]);
        assert_eq!(config.algorithm, "astar");
        assert_eq!(config.heuristic, Heuristic::Manhattan);
        assert_eq!(config.log_level, LevelFilter::Warn);
        assert_eq!(config.limits(), SearchLimits::unbounded());
        assert_eq!(config.grid().unwrap(), Grid::default());
    }

    #[test]
    fn explicit_walls_and_endpoints() {
        let config = parse(&[
            "--rows", "4", "--cols", "5", "--walls", "1,1", "2,2", "--start", "0,4", "--end", "3,0",
        ]);
        let grid = config.grid().unwrap();
        assert_eq!((grid.rows(), grid.cols()), (4, 5));
        assert_eq!(grid.wall_count(), 2);
        assert_eq!(grid.start(), Position::new(0, 4));
        assert_eq!(grid.end(), Position::new(3, 0));
    }

    #[test]
    fn seeded_density_is_reproducible() {
        let args = ["--rows", "10", "--cols", "10", "--density", "0.3", "--seed", "5"];
        assert_eq!(parse(&args).grid().unwrap(), parse(&args).grid().unwrap());
    }

    #[test]
    fn search_options() {
        let config = parse(&["--algorithm", "all", "--heuristic", "euclidean", "--max-expansions", "50"]);
        assert_eq!(config.algorithm, "all");
        assert_eq!(config.heuristic, Heuristic::Euclidean);
        assert_eq!(config.limits(), SearchLimits::expansions(50));
    }

    #[test]
    fn rejects_malformed_positions() {
        let args = ["maze_search", "--start", "3;4"];
        assert!(Config::try_parse_from(args).is_err());
    }

    #[test]
    fn out_of_bounds_wall_is_an_error() {
        let config = parse(&["--rows", "3", "--cols", "3", "--walls", "5,5"]);
        assert!(matches!(config.grid(), Err(GridError::WallOutOfBounds { .. })));
    }
}
