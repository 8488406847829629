use std::{path::PathBuf, time::Duration};

use clap::{Parser, ValueEnum};

use crate::{error::MazeError, maze::Coord, solvers::Solver};

/// A drawing surface that the maze has to fit on, in arbitrary units (pixels, terminal cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceConfig {
    pub width: usize,
    pub height: usize,
    /// Units taken by one maze cell along each axis
    pub cell_size: usize,
    /// Units left empty on every side
    pub padding: usize,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            cell_size: 50,
            padding: 20,
        }
    }
}

impl SurfaceConfig {
    /// Number of `(rows, columns)` that fit on the surface.
    pub fn grid_dims(&self) -> Result<(usize, usize), MazeError> {
        if self.cell_size == 0 {
            return Err(MazeError::ZeroCellSize);
        }
        let usable = |extent: usize| extent.saturating_sub(2 * self.padding) / self.cell_size;
        let (rows, columns) = (usable(self.height), usable(self.width));
        if rows == 0 || columns == 0 {
            return Err(MazeError::SurfaceTooSmall {
                width: self.width,
                height: self.height,
                cell_size: self.cell_size,
                padding: self.padding,
            });
        }
        Ok((rows, columns))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SolverArg {
    Dfs,
    Bfs,
    Astar,
}

impl From<SolverArg> for Solver {
    fn from(arg: SolverArg) -> Self {
        match arg {
            SolverArg::Dfs => Solver::Dfs,
            SolverArg::Bfs => Solver::Bfs,
            SolverArg::Astar => Solver::AStar,
        }
    }
}

/// Generate a random perfect maze and watch a search algorithm solve it
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Search algorithm
    #[arg(long, value_enum, default_value_t = SolverArg::Bfs)]
    pub solver: SolverArg,

    /// Random seed for a reproducible maze
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maze rows. Derived from the surface when omitted
    #[arg(long)]
    pub rows: Option<usize>,

    /// Maze columns. Derived from the surface when omitted
    #[arg(long)]
    pub columns: Option<usize>,

    /// Surface width used in headless mode
    #[arg(long, default_value_t = 1000)]
    pub surface_width: usize,

    /// Surface height used in headless mode
    #[arg(long, default_value_t = 1000)]
    pub surface_height: usize,

    /// Cell size used in headless mode
    #[arg(long, default_value_t = 50)]
    pub cell_size: usize,

    /// Padding used in headless mode
    #[arg(long, default_value_t = 20)]
    pub padding: usize,

    /// Start cell as `row,column`
    #[arg(long, value_parser = parse_coord, default_value = "0,0")]
    pub start: Coord,

    /// Goal cell as `row,column`. Defaults to the bottom-right corner
    #[arg(long, value_parser = parse_coord)]
    pub goal: Option<Coord>,

    /// Pick start and goal at random
    #[arg(long, conflicts_with = "goal")]
    pub random_endpoints: bool,

    /// Delay after each drawn step, in milliseconds
    #[arg(long, default_value_t = 10)]
    pub delay_ms: u64,

    /// Wait for a key press before each step
    #[arg(long)]
    pub step: bool,

    /// Print the result instead of animating it in the terminal
    #[arg(long)]
    pub headless: bool,

    /// Log file for interactive mode
    #[arg(long, default_value = "mazesearch.log")]
    pub log_file: PathBuf,
}

impl Cli {
    pub fn headless_surface(&self) -> SurfaceConfig {
        SurfaceConfig {
            width: self.surface_width,
            height: self.surface_height,
            cell_size: self.cell_size,
            padding: self.padding,
        }
    }

    /// Resolve maze dimensions: explicit values win over the surface-derived ones.
    pub fn grid_dims(&self, surface: &SurfaceConfig) -> Result<(usize, usize), MazeError> {
        match (self.rows, self.columns) {
            (Some(rows), Some(columns)) => Ok((rows, columns)),
            (rows, columns) => {
                let (surface_rows, surface_columns) = surface.grid_dims()?;
                Ok((rows.unwrap_or(surface_rows), columns.unwrap_or(surface_columns)))
            }
        }
    }

    pub fn pacing(&self) -> Pacing {
        Pacing {
            delay: Duration::from_millis(self.delay_ms),
            step_gate: self.step,
        }
    }
}

/// How the renderer paces drawn steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pacing {
    pub delay: Duration,
    /// Block on a key press after every drawn step
    pub step_gate: bool,
}

fn parse_coord(s: &str) -> Result<Coord, String> {
    let (row, column) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `row,column`, got `{}`", s))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid coordinate `{}`: {}", part, e))
    };
    Ok((parse(row)?, parse(column)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_surface_dims() {
        // (1000 - 40) / 50 = 19
        assert_eq!(SurfaceConfig::default().grid_dims(), Ok((19, 19)));
    }

    #[test]
    fn test_surface_dims_use_floor() {
        let surface = SurfaceConfig {
            width: 1600,
            height: 700,
            cell_size: 50,
            padding: 20,
        };
        assert_eq!(surface.grid_dims(), Ok((13, 31)));
    }

    #[test]
    fn test_degenerate_surfaces() {
        let zero = SurfaceConfig {
            cell_size: 0,
            ..SurfaceConfig::default()
        };
        assert_eq!(zero.grid_dims(), Err(MazeError::ZeroCellSize));

        let tiny = SurfaceConfig {
            width: 60,
            height: 1000,
            cell_size: 50,
            padding: 20,
        };
        assert!(matches!(
            tiny.grid_dims(),
            Err(MazeError::SurfaceTooSmall { width: 60, .. })
        ));

        let all_padding = SurfaceConfig {
            width: 30,
            height: 30,
            cell_size: 1,
            padding: 20,
        };
        assert!(all_padding.grid_dims().is_err());
    }

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("3,4"), Ok((3, 4)));
        assert_eq!(parse_coord(" 0 , 12"), Ok((0, 12)));
        assert!(parse_coord("3").is_err());
        assert!(parse_coord("a,1").is_err());
    }

    #[test]
    fn test_cli_dims_override_surface() {
        let cli = Cli::parse_from(["mazesearch", "--rows", "4", "--headless"]);
        let surface = cli.headless_surface();
        assert_eq!(cli.grid_dims(&surface), Ok((4, 19)));
        assert_eq!(Solver::from(cli.solver), Solver::Bfs);
        assert_eq!(cli.start, (0, 0));
        assert_eq!(cli.goal, None);
    }

    #[test]
    fn test_cli_parses_endpoints_and_solver() {
        let cli = Cli::parse_from([
            "mazesearch",
            "--solver",
            "astar",
            "--goal",
            "2,5",
            "--step",
            "--delay-ms",
            "0",
        ]);
        assert_eq!(Solver::from(cli.solver), Solver::AStar);
        assert_eq!(cli.goal, Some((2, 5)));
        assert_eq!(
            cli.pacing(),
            Pacing {
                delay: Duration::ZERO,
                step_gate: true
            }
        );
    }
}
