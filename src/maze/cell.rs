use std::fmt;

/// One of the four sides of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    /// Fixed neighbor order used when walking open passages.
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
        }
    }

    /// Row and column offsets of the neighbor on this side.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Top => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Bottom => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    /// Direction from `from` to the grid-adjacent `to`, if they are adjacent.
    pub fn between(from: (usize, usize), to: (usize, usize)) -> Option<Direction> {
        Direction::ALL.into_iter().find(|dir| {
            let (dr, dc) = dir.offset();
            from.0.checked_add_signed(dr) == Some(to.0) && from.1.checked_add_signed(dc) == Some(to.1)
        })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Top => "top",
            Direction::Right => "right",
            Direction::Bottom => "bottom",
            Direction::Left => "left",
        };
        write!(f, "{}", name)
    }
}

/// Wall flags of a single cell. `true` means the wall is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Walls {
    pub const ALL: Walls = Walls {
        top: true,
        right: true,
        bottom: true,
        left: true,
    };

    pub fn has(&self, dir: Direction) -> bool {
        match dir {
            Direction::Top => self.top,
            Direction::Right => self.right,
            Direction::Bottom => self.bottom,
            Direction::Left => self.left,
        }
    }

    pub fn set(&mut self, dir: Direction, present: bool) {
        match dir {
            Direction::Top => self.top = present,
            Direction::Right => self.right = present,
            Direction::Bottom => self.bottom = present,
            Direction::Left => self.left = present,
        }
    }
}

impl Default for Walls {
    fn default() -> Self {
        Walls::ALL
    }
}

/// Where a cell stands in the current search. Rendering picks colors from this.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// Not yet discovered by the search.
    #[default]
    Unexplored,
    /// Waiting in the frontier.
    Frontier,
    /// Removed from the frontier and expanded.
    Explored,
    /// Part of the reconstructed solution.
    Path,
}

/// A maze cell: wall flags plus generation and search metadata.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub walls: Walls,
    /// Set by the generator once the carve-out reaches this cell.
    pub visited: bool,
    pub status: SearchStatus,
    /// Edges from the start, recorded by A*.
    pub g_score: Option<usize>,
    /// Manhattan distance to the goal, recorded by A*.
    pub h_score: Option<usize>,
}

impl Cell {
    /// A cell with every wall standing and no metadata.
    pub const FRESH: Cell = Cell {
        walls: Walls::ALL,
        visited: false,
        status: SearchStatus::Unexplored,
        g_score: None,
        h_score: None,
    };

    pub fn f_score(&self) -> Option<usize> {
        Some(self.g_score? + self.h_score?)
    }
}
