use std::fs;
use std::process;

use clap::Parser;
use log::{LevelFilter, Log, Metadata, Record};

use maze_search::algorithms::Algorithm;
use maze_search::api::{self, SolveRequest};
use maze_search::compare;
use maze_search::config::Config;
use maze_search::statistics::{optimal_path_length, timed_run};

/// Writes log records to stderr so they never mix with the reports.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn main() {
    let config = Config::parse();
    init_logging(config.log_level);

    if let Some(path) = &config.request {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Failed to read request {}: {}", path.display(), e);
                process::exit(1);
            }
        };
        let request: SolveRequest = match serde_json::from_str(&text) {
            Ok(request) => request,
            Err(e) => {
                eprintln!("Malformed solve request: {}", e);
                process::exit(1);
            }
        };
        match serde_json::to_string_pretty(&api::solve(&request)) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to encode response: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    let grid = match config.grid() {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Invalid grid: {}", e);
            process::exit(1);
        }
    };

    if config.algorithm == "all" {
        if !config.quiet {
            println!("{}", grid);
        }
        compare::run_all(&grid, config.heuristic, config.limits()).print();
        return;
    }

    let algorithm: Algorithm = match config.algorithm.parse() {
        Ok(algorithm) => algorithm,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let (result, stats) = timed_run(algorithm, &grid, config.heuristic, config.limits());
    if config.quiet {
        println!("{}: {}", algorithm, result.outcome);
        return;
    }

    println!("Grid size: {}x{}, Walls: {}", grid.rows(), grid.cols(), grid.wall_count());
    println!("Start: {}, End: {}", grid.start(), grid.end());
    if algorithm.uses_heuristic() {
        println!("Algorithm: {} ({} heuristic)", algorithm, config.heuristic);
    } else {
        println!("Algorithm: {}", algorithm);
    }
    println!();

    let path = result.path().map(|path| path.cells()).unwrap_or_default();
    println!("{}", grid.render(path));

    println!("=== FINAL RESULTS ===");
    println!("Outcome: {}", result.outcome);
    print!("{}", stats);
    let optimal = optimal_path_length(&grid);
    if let Some(length) = optimal {
        println!("Optimal Path Length: {}", length);
    }
    if let Some(efficiency) = stats.efficiency(optimal) {
        println!("Route Efficiency: {:.3}", efficiency);
    }
}
