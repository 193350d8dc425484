use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::grid::Position;

/// Distance estimate towards a target cell.
///
/// All three are admissible on a 4-connected grid with unit step cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heuristic {
    #[default]
    Manhattan,
    Euclidean,
    Zero,
}

impl Heuristic {
    pub fn estimate(self, from: Position, target: Position) -> f64 {
        let d_row = from.row.abs_diff(target.row) as f64;
        let d_col = from.col.abs_diff(target.col) as f64;
        match self {
            Heuristic::Manhattan => d_row + d_col,
            Heuristic::Euclidean => (d_row * d_row + d_col * d_col).sqrt(),
            Heuristic::Zero => 0.0,
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Heuristic::Manhattan => "manhattan",
            Heuristic::Euclidean => "euclidean",
            Heuristic::Zero => "zero",
        };
        f.write_str(name)
    }
}
