pub mod app;
pub mod config;
pub mod error;
pub mod generators;
pub mod maze;
pub mod solvers;

pub use error::{FrontierError, MazeError};
pub use maze::{Coord, Maze, MazeEvent, MazeObserver};
pub use solvers::{PathFinder, SearchState, Solver, solve_maze};
