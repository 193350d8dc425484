use maze_search::algorithms::{run, run_with_limits, Algorithm, Heuristic, Outcome, SearchLimits};
use maze_search::grid::{Grid, Position};
use maze_search::maze;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn p(row: usize, col: usize) -> Position {
    Position::new(row, col)
}

fn sealed_start() -> Grid {
    Grid::with_walls(5, 5, [p(0, 2), p(1, 0), p(1, 1), p(1, 2)], p(0, 0), p(4, 4)).unwrap()
}

#[test]
fn demonstration_maze_lengths() {
    let grid = Grid::default();
    for algorithm in Algorithm::ALL {
        let result = run(algorithm, &grid, Heuristic::Manhattan);
        let path = result.path().unwrap();
        assert!(path.is_contiguous(), "{algorithm}");
        assert_eq!(path.cells().first(), Some(&grid.start()), "{algorithm}");
        assert_eq!(path.cells().last(), Some(&grid.end()), "{algorithm}");
        match algorithm {
            Algorithm::Dfs => assert_eq!(path.len(), 15),
            _ => assert_eq!(path.len(), 9, "{algorithm}"),
        }
    }
}

#[test]
fn sealed_start_traces() {
    let grid = sealed_start();
    let expected: &[(Algorithm, &[Position])] = &[
        (Algorithm::Dfs, &[p(0, 0), p(0, 1)]),
        (Algorithm::Bfs, &[p(0, 0), p(0, 1)]),
        (Algorithm::Dijkstra, &[p(0, 0), p(0, 1)]),
        (Algorithm::Greedy, &[p(0, 0), p(0, 1)]),
        (Algorithm::AStar, &[p(0, 0), p(0, 1)]),
        (Algorithm::Bidirectional, &[p(0, 0), p(4, 4), p(0, 1), p(3, 4)]),
        (Algorithm::Jps, &[p(0, 0)]),
    ];
    for &(algorithm, trace) in expected {
        let result = run(algorithm, &grid, Heuristic::Manhattan);
        assert_eq!(result.outcome, Outcome::NoPath, "{algorithm}");
        assert_eq!(result.trace.positions(), trace, "{algorithm}");
    }
}

#[test]
fn start_equal_to_end_everywhere() {
    let grid = Grid::with_walls(3, 3, [p(1, 1)], p(1, 0), p(1, 0)).unwrap();
    for algorithm in Algorithm::ALL {
        let result = run(algorithm, &grid, Heuristic::Manhattan);
        let path = result.path().unwrap();
        assert!(path.steps().is_empty(), "{algorithm}");
        assert_eq!(path.cells(), &[p(1, 0)], "{algorithm}");
        assert_eq!(result.trace.positions(), &[p(1, 0)], "{algorithm}");
    }
}

#[test]
fn budget_is_not_a_missing_path() {
    let grid = Grid::default();
    for algorithm in Algorithm::ALL {
        let starved = run_with_limits(algorithm, &grid, Heuristic::Manhattan, SearchLimits::expansions(2));
        assert_eq!(starved.outcome, Outcome::BudgetExhausted, "{algorithm}");
        assert!(starved.trace.expansions() <= 2, "{algorithm}");

        let generous = run_with_limits(algorithm, &grid, Heuristic::Manhattan, SearchLimits::expansions(1000));
        assert!(generous.is_found(), "{algorithm}");
    }

    // Enough budget to learn there is nothing to find.
    let result = run_with_limits(Algorithm::Bfs, &sealed_start(), Heuristic::Zero, SearchLimits::expansions(2));
    assert_eq!(result.outcome, Outcome::NoPath);
}

#[test]
fn repeated_runs_are_identical() {
    let grid = maze::generate(20, 20, 0.25, &mut StdRng::seed_from_u64(11)).unwrap().grid;
    for algorithm in Algorithm::ALL {
        let first = run(algorithm, &grid, Heuristic::Euclidean);
        let second = run(algorithm, &grid, Heuristic::Euclidean);
        assert_eq!(first.outcome, second.outcome, "{algorithm}");
        assert_eq!(first.trace, second.trace, "{algorithm}");
    }
}

#[test]
fn dijkstra_is_a_star_without_a_heuristic() {
    let grid = maze::generate(15, 25, 0.3, &mut StdRng::seed_from_u64(4)).unwrap().grid;
    let dijkstra = run(Algorithm::Dijkstra, &grid, Heuristic::Manhattan);
    let zero = run(Algorithm::AStar, &grid, Heuristic::Zero);
    assert_eq!(dijkstra.outcome, zero.outcome);
    assert_eq!(dijkstra.trace, zero.trace);
    assert_eq!(dijkstra.weights, zero.weights);
}
