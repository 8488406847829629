mod renderer;

use std::io::{Stdout, Write};

use crossterm::{
    ExecutableCommand, cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use rand::Rng;

pub use renderer::Renderer;

use crate::{
    config::{Cli, SurfaceConfig},
    generators::{get_rng, recursive_backtrack},
    maze::{Coord, Maze},
    solvers::{PathFinder, SearchState, Solver},
};

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub solver: Solver,
    pub start: Coord,
    pub goal: Coord,
    pub path: Option<Vec<Coord>>,
    pub explored: usize,
}

/// Generates a maze and runs one search over it, either animated in the terminal or headless.
pub struct App {
    cli: Cli,
}

impl App {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    pub fn is_headless(&self) -> bool {
        self.cli.headless
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        crossterm::queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Surface of the current terminal, in units of [`Renderer::CELL_WIDTH`] characters.
    /// Every cell takes two units (interior plus one wall) and the outer wall takes one.
    fn terminal_surface() -> std::io::Result<SurfaceConfig> {
        let (term_width, term_height) = terminal::size()?;
        Ok(SurfaceConfig {
            width: (term_width / Renderer::CELL_WIDTH) as usize,
            height: term_height.saturating_sub(Renderer::NUM_LOG_ROWS) as usize,
            cell_size: 2,
            padding: 1,
        })
    }

    /// Start and goal from the command line, or random ones when requested.
    fn endpoints(&self, rows: usize, columns: usize, rng: &mut impl Rng) -> (Coord, Coord) {
        if self.cli.random_endpoints {
            let mut pick = || (rng.random_range(0..rows), rng.random_range(0..columns));
            let start = pick();
            let goal = pick();
            (start, goal)
        } else {
            let goal = self
                .cli
                .goal
                .unwrap_or((rows.saturating_sub(1), columns.saturating_sub(1)));
            (self.cli.start, goal)
        }
    }

    /// Build, generate and solve. The observer, if any, sees every step as it happens.
    fn compute(
        &self,
        surface: &SurfaceConfig,
        attach: impl FnOnce(Maze, (Coord, Coord)) -> Maze,
    ) -> anyhow::Result<(Maze, RunSummary)> {
        let (rows, columns) = self.cli.grid_dims(surface)?;
        let maze = Maze::new(rows, columns)?;
        let mut rng = get_rng(self.cli.seed);
        let (start, goal) = self.endpoints(rows, columns, &mut rng);
        // Endpoints are checked before carving so bad input fails fast
        maze.check_bounds("start", start)?;
        maze.check_bounds("goal", goal)?;
        let mut maze = attach(maze, (start, goal));

        tracing::info!(
            "[app] generating a {}x{} maze (seed {:?})",
            rows,
            columns,
            self.cli.seed
        );
        recursive_backtrack(&mut maze, &mut rng);

        let solver = Solver::from(self.cli.solver);
        let mut finder = PathFinder::new(&mut maze, solver, start, goal)?;
        while !finder.step().is_finished() {}
        let explored = finder.explored_count();
        let path = match finder.state() {
            SearchState::Solved(path) => Some(path.clone()),
            _ => None,
        };

        let summary = RunSummary {
            solver,
            start,
            goal,
            path,
            explored,
        };
        Ok((maze, summary))
    }

    fn summary_message(summary: &RunSummary) -> String {
        match &summary.path {
            Some(path) => format!(
                "{}: path of {} cells from {:?} to {:?}, {} cells explored.",
                summary.solver,
                path.len(),
                summary.start,
                summary.goal,
                summary.explored
            ),
            None => format!(
                "{}: no path from {:?} to {:?} after exploring {} cells.",
                summary.solver, summary.start, summary.goal, summary.explored
            ),
        }
    }

    /// Animate generation and search in the terminal, then wait for Esc.
    pub fn run(&self, stdout: &mut Stdout) -> anyhow::Result<RunSummary> {
        let surface = App::terminal_surface()?;
        let pacing = self.cli.pacing();
        let (maze, summary) = self.compute(&surface, |maze, endpoints| {
            maze.with_observer(Renderer::new(pacing, Some(endpoints)))
        })?;

        queue!(
            stdout,
            cursor::MoveTo(0, Renderer::log_row(maze.rows()) + 1),
            terminal::Clear(ClearType::FromCursorDown)
        )?;
        let color = if summary.path.is_some() {
            Color::Green
        } else {
            Color::Red
        };
        stdout.execute(style::PrintStyledContent(
            format!("{} ", App::summary_message(&summary))
                .with(color)
                .attribute(Attribute::Bold),
        ))?;
        stdout.execute(style::PrintStyledContent(
            "Press Esc to exit...\r\n"
                .with(Color::Blue)
                .attribute(Attribute::Bold),
        ))?;
        App::wait_for_esc()?;
        Ok(summary)
    }

    /// Generate and solve without a terminal UI, printing the maze and the result to `out`.
    pub fn run_headless(&self, out: &mut impl Write) -> anyhow::Result<RunSummary> {
        let (maze, summary) = self.compute(&self.cli.headless_surface(), |maze, _| maze)?;
        write!(out, "{}", maze)?;
        writeln!(out, "{}", App::summary_message(&summary))?;
        if let Some(path) = &summary.path {
            let steps = path
                .iter()
                .map(|(row, column)| format!("({}, {})", row, column))
                .collect::<Vec<_>>();
            writeln!(out, "{}", steps.join(" -> "))?;
        }
        Ok(summary)
    }

    /// Wait for the user to press the Esc key
    /// This function blocks until Esc is pressed
    fn wait_for_esc() -> std::io::Result<()> {
        loop {
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if code == KeyCode::Esc && kind == event::KeyEventKind::Press {
                    break;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn app(args: &[&str]) -> App {
        let mut argv = vec!["mazesearch", "--headless"];
        argv.extend_from_slice(args);
        App::new(Cli::parse_from(argv))
    }

    #[test]
    fn test_headless_run_prints_maze_and_path() {
        let app = app(&["--rows", "4", "--columns", "5", "--seed", "7"]);
        let mut out = Vec::new();
        let summary = app.run_headless(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let path = summary.path.expect("a perfect maze always has a path");
        assert_eq!(path.first(), Some(&(0, 0)));
        assert_eq!(path.last(), Some(&(3, 4)));
        // 9 maze lines, the summary and the path
        assert_eq!(text.lines().count(), 11);
        assert!(text.contains("Breadth-First Search (BFS): path of"));
    }

    #[test]
    fn test_headless_uses_surface_dims() {
        let app = app(&[
            "--surface-width",
            "340",
            "--surface-height",
            "240",
            "--seed",
            "1",
        ]);
        let summary = app.run_headless(&mut Vec::new()).unwrap();
        // (240 - 40) / 50 = 4 rows, (340 - 40) / 50 = 6 columns
        assert_eq!(summary.goal, (3, 5));
    }

    #[test]
    fn test_same_seed_same_summary() {
        let first = app(&["--seed", "11", "--random-endpoints", "--solver", "astar"])
            .run_headless(&mut Vec::new())
            .unwrap();
        let second = app(&["--seed", "11", "--random-endpoints", "--solver", "astar"])
            .run_headless(&mut Vec::new())
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_out_of_bounds_goal_fails_fast() {
        let err = app(&["--rows", "3", "--columns", "3", "--goal", "3,0"])
            .run_headless(&mut Vec::new())
            .unwrap_err();
        assert!(err.to_string().contains("goal cell (3, 0) is outside the 3x3 maze"));
    }

    #[test]
    fn test_degenerate_surface_is_a_config_error() {
        let err = app(&["--cell-size", "0"])
            .run_headless(&mut Vec::new())
            .unwrap_err();
        assert!(err.to_string().contains("cell size"));
    }
}
