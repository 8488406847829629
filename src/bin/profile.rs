use std::time::Instant;

use mazesearch::{Maze, Solver, generators::generate_maze, solve_maze};

/// Generate and solve large mazes without rendering, logging how long each phase takes.
/// Usage: `profile [iterations] [size]`
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or(1);
    let size = args.next().and_then(|s| s.parse::<usize>().ok()).unwrap_or(255);

    let mut maze = Maze::new(size, size)?;
    let goal = (size - 1, size - 1);
    for seed in 0..num_iters {
        let started = Instant::now();
        generate_maze(&mut maze, Some(seed));
        tracing::info!(
            "[profile] seed {}: generated {}x{} in {:?}",
            seed,
            size,
            size,
            started.elapsed()
        );

        for solver in Solver::ALL {
            maze.clear_search();
            let started = Instant::now();
            let path = solve_maze(&mut maze, solver, (0, 0), goal)?;
            tracing::info!(
                "[profile] seed {}: {} found a {}-cell path in {:?}",
                seed,
                solver,
                path.map_or(0, |p| p.len()),
                started.elapsed()
            );
        }
    }
    Ok(())
}
