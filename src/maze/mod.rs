pub mod cell;
pub mod grid;

use std::{fmt, sync::mpsc::Sender};

pub use cell::{Cell, Direction, SearchStatus, Walls};
use grid::Grid;

use crate::{config::SurfaceConfig, error::MazeError};

/// Cell position as `(row, column)`.
pub type Coord = (usize, usize);

/// A change to the maze, published to the attached observer as it happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeEvent {
    /// The whole maze (re)starts from the fresh state: every wall up, nothing visited.
    Initial { rows: usize, columns: usize },
    /// Wall flags of a cell changed.
    Walls { coord: Coord, old: Walls, new: Walls },
    /// The generator reached a cell.
    Visit { coord: Coord },
    /// Search status of a cell changed.
    Status {
        coord: Coord,
        old: SearchStatus,
        new: SearchStatus,
    },
    /// A* scores of a cell changed.
    Scores {
        coord: Coord,
        g: Option<usize>,
        h: Option<usize>,
    },
}

/// Receives every [`MazeEvent`] synchronously, inside the mutation that caused it.
pub trait MazeObserver {
    fn notify(&mut self, event: MazeEvent);
}

impl MazeObserver for Sender<MazeEvent> {
    fn notify(&mut self, event: MazeEvent) {
        // A dropped receiver only means nobody is watching anymore
        let _ = self.send(event);
    }
}

/// Rectangular maze of [`Cell`]s. Topology is fixed; only cell contents change.
pub struct Maze {
    grid: Grid<Cell>,
    observer: Option<Box<dyn MazeObserver>>,
}

impl Maze {
    /// Creates a maze with every wall standing.
    pub fn new(rows: usize, columns: usize) -> Result<Self, MazeError> {
        if rows == 0 || columns == 0 {
            return Err(MazeError::EmptyGrid { rows, columns });
        }
        Ok(Maze {
            grid: Grid::new(rows, columns, Cell::FRESH),
            observer: None,
        })
    }

    /// Creates a maze sized to fit the given drawing surface.
    pub fn from_surface(surface: &SurfaceConfig) -> Result<Self, MazeError> {
        let (rows, columns) = surface.grid_dims()?;
        Maze::new(rows, columns)
    }

    /// Attaches an observer and immediately sends it the initial layout.
    pub fn with_observer(mut self, observer: impl MazeObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self.publish(MazeEvent::Initial {
            rows: self.rows(),
            columns: self.columns(),
        });
        self
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn columns(&self) -> usize {
        self.grid.columns()
    }

    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        self.grid.is_in_bounds(coord)
    }

    /// Checks that `coord` is inside the maze, naming it `role` in the error.
    pub fn check_bounds(&self, role: &'static str, coord: Coord) -> Result<(), MazeError> {
        if self.is_in_bounds(coord) {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds {
                role,
                coord,
                rows: self.rows(),
                columns: self.columns(),
            })
        }
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        self.grid.coords()
    }

    /// The grid-adjacent cell on side `dir`, if it exists.
    pub fn neighbor(&self, (row, column): Coord, dir: Direction) -> Option<Coord> {
        let (dr, dc) = dir.offset();
        let next = (row.checked_add_signed(dr)?, column.checked_add_signed(dc)?);
        self.is_in_bounds(next).then_some(next)
    }

    /// Grid-adjacent cells in top, right, bottom, left order, walls ignored.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = (Direction, Coord)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.neighbor(coord, dir).map(|next| (dir, next)))
    }

    /// Neighbors reachable through a cleared wall, in top, right, bottom, left order.
    pub fn open_neighbors(&self, coord: Coord) -> impl Iterator<Item = (Direction, Coord)> + '_ {
        let walls = self[coord].walls;
        self.neighbors(coord).filter(move |&(dir, _)| !walls.has(dir))
    }

    /// Number of cleared wall pairs, i.e. edges of the maze graph.
    pub fn passage_count(&self) -> usize {
        self.coords()
            .map(|coord| {
                let walls = self[coord].walls;
                let right = self.neighbor(coord, Direction::Right).is_some() && !walls.right;
                let bottom = self.neighbor(coord, Direction::Bottom).is_some() && !walls.bottom;
                right as usize + bottom as usize
            })
            .sum()
    }

    /// Clears the wall pair between two grid-adjacent cells.
    ///
    /// # Panics
    /// If either cell is out of bounds or the cells are not adjacent.
    pub fn remove_walls_between(&mut self, from: Coord, to: Coord) {
        let Some(dir) = Direction::between(from, to) else {
            panic!("cells {:?} and {:?} are not adjacent", from, to);
        };
        self.update_walls(from, |walls| walls.set(dir, false));
        self.update_walls(to, |walls| walls.set(dir.opposite(), false));
    }

    pub fn mark_visited(&mut self, coord: Coord) {
        let cell = &mut self.grid[coord];
        if !cell.visited {
            cell.visited = true;
            self.publish(MazeEvent::Visit { coord });
        }
    }

    pub fn set_status(&mut self, coord: Coord, status: SearchStatus) {
        let cell = &mut self.grid[coord];
        let old = cell.status;
        if old != status {
            cell.status = status;
            self.publish(MazeEvent::Status {
                coord,
                old,
                new: status,
            });
        }
    }

    pub fn set_scores(&mut self, coord: Coord, g: Option<usize>, h: Option<usize>) {
        let cell = &mut self.grid[coord];
        if cell.g_score != g || cell.h_score != h {
            cell.g_score = g;
            cell.h_score = h;
            self.publish(MazeEvent::Scores { coord, g, h });
        }
    }

    /// Restores every cell to the fresh state: all walls up, unvisited, no search data.
    pub fn fill_walls(&mut self) {
        let mut changed = false;
        self.grid.iter_mut().for_each(|cell| {
            changed |= *cell != Cell::FRESH;
            *cell = Cell::FRESH;
        });
        if changed {
            self.publish(MazeEvent::Initial {
                rows: self.rows(),
                columns: self.columns(),
            });
        }
    }

    /// Drops all search status and scores, keeping the walls.
    pub fn clear_search(&mut self) {
        for coord in self.coords() {
            self.set_status(coord, SearchStatus::Unexplored);
            self.set_scores(coord, None, None);
        }
    }

    fn update_walls(&mut self, coord: Coord, f: impl FnOnce(&mut Walls)) {
        let cell = &mut self.grid[coord];
        let old = cell.walls;
        f(&mut cell.walls);
        let new = cell.walls;
        if old != new {
            self.publish(MazeEvent::Walls { coord, old, new });
        }
    }

    fn publish(&mut self, event: MazeEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer.notify(event);
        }
    }
}

impl std::ops::Index<Coord> for Maze {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.grid[index]
    }
}

impl fmt::Debug for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Maze")
            .field("rows", &self.rows())
            .field("columns", &self.columns())
            .field("passages", &self.passage_count())
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

/// ASCII picture of the maze. Cell interiors show the search status.
impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for column in 0..self.columns() {
            let top = if self[(0, column)].walls.top { "--" } else { "  " };
            write!(f, "+{}", top)?;
        }
        writeln!(f, "+")?;

        for row in 0..self.rows() {
            let left = if self[(row, 0)].walls.left { "|" } else { " " };
            write!(f, "{}", left)?;
            for column in 0..self.columns() {
                let cell = &self[(row, column)];
                let interior = match cell.status {
                    SearchStatus::Unexplored => "  ",
                    SearchStatus::Frontier => " +",
                    SearchStatus::Explored => " .",
                    SearchStatus::Path => " *",
                };
                let right = if cell.walls.right { "|" } else { " " };
                write!(f, "{}{}", interior, right)?;
            }
            writeln!(f)?;

            for column in 0..self.columns() {
                let bottom = if self[(row, column)].walls.bottom {
                    "--"
                } else {
                    "  "
                };
                write!(f, "+{}", bottom)?;
            }
            writeln!(f, "+")?;
        }
        Ok(())
    }
}
