use log::info;

use crate::algorithms::{Algorithm, Heuristic, SearchLimits};
use crate::grid::Grid;
use crate::statistics::{optimal_path_length, timed_run, SearchStats};

/// One row of a comparison.
#[derive(Debug, Clone)]
pub struct ComparisonEntry {
    pub stats: SearchStats,
    pub efficiency: Option<f64>,
}

impl ComparisonEntry {
    pub fn success(&self) -> bool {
        self.stats.path_length.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Comparison {
    pub optimal: Option<usize>,
    pub entries: Vec<ComparisonEntry>,
}

/// Run every algorithm on `grid`, in [`Algorithm::ALL`] order.
pub fn run_all(grid: &Grid, heuristic: Heuristic, limits: SearchLimits) -> Comparison {
    let optimal = optimal_path_length(grid);
    info!(
        "comparing {} algorithms on a {}x{} grid",
        Algorithm::ALL.len(),
        grid.rows(),
        grid.cols()
    );

    let entries = Algorithm::ALL
        .into_iter()
        .map(|algorithm| {
            let (result, stats) = timed_run(algorithm, grid, heuristic, limits);
            info!("{}: {}, {} nodes visited", algorithm, result.outcome, stats.nodes_visited);
            let efficiency = stats.efficiency(optimal);
            ComparisonEntry { stats, efficiency }
        })
        .collect();

    Comparison { optimal, entries }
}

impl Comparison {
    pub fn successful(&self) -> impl Iterator<Item = &ComparisonEntry> {
        self.entries.iter().filter(|entry| entry.success())
    }

    pub fn shortest(&self) -> Option<&ComparisonEntry> {
        self.successful().min_by_key(|entry| entry.stats.path_length)
    }

    pub fn fewest_visited(&self) -> Option<&ComparisonEntry> {
        self.successful().min_by_key(|entry| entry.stats.nodes_visited)
    }

    pub fn fastest(&self) -> Option<&ComparisonEntry> {
        self.successful().min_by_key(|entry| entry.stats.elapsed)
    }

    /// Print the results as a table followed by a short analysis.
    pub fn print(&self) {
        println!("\n=== ALGORITHM COMPARISON RESULTS ===");
        println!();
        match self.optimal {
            Some(length) => println!("Optimal path length: {}", length),
            None => println!("Optimal path length: no path"),
        }
        println!();

        println!(
            "{:<15} {:<8} {:<8} {:<12} {:<15} {:<12}",
            "Algorithm", "Success", "Steps", "Efficiency", "Nodes Visited", "Time"
        );
        println!("{}", "-".repeat(75));

        for entry in &self.entries {
            let success_str = if entry.success() { "✓" } else { "✗" };
            let steps_str = entry
                .stats
                .path_length
                .map_or_else(|| "-".to_string(), |length| length.to_string());
            let efficiency_str = entry
                .efficiency
                .map_or_else(|| "-".to_string(), |e| format!("{:.3}", e));
            let time_str = format!("{:.2?}", entry.stats.elapsed);

            println!(
                "{:<15} {:<8} {:<8} {:<12} {:<15} {:<12}",
                entry.stats.algorithm,
                success_str,
                steps_str,
                efficiency_str,
                entry.stats.nodes_visited,
                time_str
            );
        }
        println!();

        let (Some(shortest), Some(fewest), Some(fastest)) =
            (self.shortest(), self.fewest_visited(), self.fastest())
        else {
            println!("No algorithm found a path.");
            return;
        };

        println!("=== PERFORMANCE ANALYSIS ===");
        println!(
            "Shortest path: {} ({} steps)",
            shortest.stats.algorithm,
            shortest.stats.path_length.unwrap_or_default()
        );
        println!(
            "Fewest nodes visited: {} ({} nodes)",
            fewest.stats.algorithm, fewest.stats.nodes_visited
        );
        println!("Fastest: {} ({:.2?})", fastest.stats.algorithm, fastest.stats.elapsed);

        let suboptimal: Vec<_> = self
            .successful()
            .filter(|entry| entry.efficiency.is_some_and(|e| e > 1.0))
            .map(|entry| entry.stats.algorithm.to_string())
            .collect();
        if !suboptimal.is_empty() {
            println!("Longer than optimal: {}", suboptimal.join(", "));
        }
    }
}
