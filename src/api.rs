//! JSON documents exchanged with clients, and the handlers that answer them.
//!
//! Wire conventions: positions are `[row, col]` pairs, grids are row-major
//! boolean matrices with `true` for walls, `visited` and `path` leave out the
//! start cell (and `visited` also the last popped cell). A search that finds
//! no path reports no visited cells.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::algorithms::{run, Algorithm, Heuristic, Outcome};
use crate::error::GridError;
use crate::grid::{Grid, Position};
use crate::maze;

pub const NO_PATH_MESSAGE: &str = "No path found between start and end points";

fn default_algorithm() -> String {
    Algorithm::AStar.to_string()
}

fn default_start() -> Position {
    Position::new(0, 0)
}

fn default_end() -> Position {
    Position::new(29, 29)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveRequest {
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    pub grid: Vec<Vec<bool>>,
    #[serde(default = "default_start")]
    pub start: Position,
    #[serde(default = "default_end")]
    pub end: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveStats {
    pub nodes_visited: usize,
    pub path_length: usize,
    /// Milliseconds, rounded to two decimals.
    pub time_taken: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visited: Option<Vec<Position>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Position>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<SolveStats>,
}

impl SolveResponse {
    fn failure(error: impl ToString) -> Self {
        SolveResponse {
            success: false,
            visited: None,
            path: None,
            error: Some(error.to_string()),
            stats: None,
        }
    }
}

/// Answer a solve request. Always uses the Manhattan heuristic.
///
/// Configuration problems and unknown algorithm names come back as
/// `success: false` with an `error` and no `stats`.
pub fn solve(request: &SolveRequest) -> SolveResponse {
    let algorithm = match request.algorithm.parse::<Algorithm>() {
        Ok(algorithm) => algorithm,
        Err(e) => return SolveResponse::failure(e),
    };
    let grid = match Grid::from_wall_matrix(&request.grid, request.start, request.end) {
        Ok(grid) => grid,
        Err(e) => return SolveResponse::failure(e),
    };

    let started = Instant::now();
    let result = run(algorithm, &grid, Heuristic::Manhattan);
    let millis = started.elapsed().as_secs_f64() * 1000.0;

    let time_taken = (millis * 100.0).round() / 100.0;

    match &result.outcome {
        Outcome::Found(path) => {
            let visited = result.visited().to_vec();
            SolveResponse {
                success: true,
                stats: Some(SolveStats {
                    nodes_visited: visited.len(),
                    path_length: path.len(),
                    time_taken,
                }),
                visited: Some(visited),
                path: Some(path.steps().to_vec()),
                error: None,
            }
        }
        // A failed search reports no visited cells at all.
        Outcome::NoPath | Outcome::BudgetExhausted => SolveResponse {
            stats: Some(SolveStats {
                nodes_visited: 0,
                path_length: 0,
                time_taken,
            }),
            ..SolveResponse::failure(NO_PATH_MESSAGE)
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    pub grid: Vec<Vec<bool>>,
    #[serde(default = "default_start")]
    pub start: Position,
    #[serde(default = "default_end")]
    pub end: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub valid: bool,
    pub message: String,
}

/// Check that a maze is well formed and has a solution.
pub fn validate(request: &ValidateRequest) -> ValidateResponse {
    match Grid::from_wall_matrix(&request.grid, request.start, request.end) {
        Ok(grid) if maze::is_solvable(&grid) => ValidateResponse {
            valid: true,
            message: "Valid maze with solution".to_string(),
        },
        Ok(_) => ValidateResponse {
            valid: false,
            message: "No path exists between start and end points".to_string(),
        },
        Err(e) => ValidateResponse {
            valid: false,
            message: format!("Error validating maze: {}", e),
        },
    }
}

/// Largest side length `generate` accepts.
pub const MAX_GENERATED_SIDE: usize = 1_000;

fn default_size() -> usize {
    30
}

fn default_density() -> f64 {
    0.3
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default = "default_size")]
    pub rows: usize,
    #[serde(default = "default_size")]
    pub cols: usize,
    #[serde(default = "default_density")]
    pub density: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GenerateRequest {
    fn default() -> Self {
        GenerateRequest {
            rows: default_size(),
            cols: default_size(),
            density: default_density(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub grid: Vec<Vec<bool>>,
    pub start: Position,
    pub end: Position,
}

/// Produce a random maze. Seeded requests are reproducible.
///
/// Either side above [`MAX_GENERATED_SIDE`] is rejected before anything is
/// allocated.
pub fn generate(request: &GenerateRequest) -> Result<GenerateResponse, GridError> {
    if request.rows > MAX_GENERATED_SIDE || request.cols > MAX_GENERATED_SIDE {
        return Err(GridError::TooLarge {
            rows: request.rows,
            cols: request.cols,
            max: MAX_GENERATED_SIDE,
        });
    }
    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let generated = maze::generate(request.rows, request.cols, request.density, &mut rng)?;
    let grid = generated.grid;
    Ok(GenerateResponse {
        grid: grid.wall_matrix(),
        start: grid.start(),
        end: grid.end(),
    })
}
