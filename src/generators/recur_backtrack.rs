use crate::{
    generators::Shuffler,
    maze::{Coord, Direction, Maze},
};

/// Scan order for unvisited neighbors before they get shuffled.
const SCAN_ORDER: [Direction; 4] = [
    Direction::Top,
    Direction::Bottom,
    Direction::Left,
    Direction::Right,
];

/// One level of the carve-out: a cell and the neighbors still to try from it.
struct Frame {
    cell: Coord,
    candidates: Vec<Coord>,
    next: usize,
}

impl Frame {
    fn new<S: Shuffler + ?Sized>(maze: &Maze, cell: Coord, shuffler: &mut S) -> Self {
        let mut candidates = SCAN_ORDER
            .iter()
            .filter_map(|&dir| maze.neighbor(cell, dir))
            .filter(|&c| !maze[c].visited)
            .collect::<Vec<_>>();
        shuffler.shuffle_coords(&mut candidates);
        Frame {
            cell,
            candidates,
            next: 0,
        }
    }
}

/// Randomized depth-first carve-out from `(0, 0)`.
///
/// Every cell is visited exactly once and each newly visited cell is joined to the cell it was
/// reached from, so the result is a spanning tree: `rows * columns - 1` passages, one path
/// between any two cells. The frame stack replaces recursion, so depth is bounded by memory
/// instead of the call stack.
pub fn recursive_backtrack<S: Shuffler + ?Sized>(maze: &mut Maze, shuffler: &mut S) {
    // Start over from a fully walled maze
    maze.fill_walls();

    let start = (0, 0);
    maze.mark_visited(start);
    let mut stack = vec![Frame::new(maze, start, shuffler)];
    let mut carved = 0usize;

    while let Some(frame) = stack.last_mut() {
        let Some(&candidate) = frame.candidates.get(frame.next) else {
            // Every candidate tried, backtrack
            stack.pop();
            continue;
        };
        frame.next += 1;

        // A sibling branch may have reached this cell in the meantime
        if maze[candidate].visited {
            continue;
        }

        let from = frame.cell;
        maze.remove_walls_between(from, candidate);
        maze.mark_visited(candidate);
        carved += 1;
        tracing::trace!("[generate] carved {:?} -> {:?}", from, candidate);

        stack.push(Frame::new(maze, candidate, shuffler));
    }

    tracing::info!(
        "[generate] carved {} passages in a {}x{} maze",
        carved,
        maze.rows(),
        maze.columns()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::get_rng,
        maze::{Cell, MazeEvent, Walls},
    };

    /// Keeps the scan order, making the carve-out fully predictable.
    struct InOrder;

    impl Shuffler for InOrder {
        fn shuffle_coords(&mut self, _coords: &mut [Coord]) {}
    }

    fn walls(top: bool, right: bool, bottom: bool, left: bool) -> Walls {
        Walls {
            top,
            right,
            bottom,
            left,
        }
    }

    #[test]
    fn test_in_order_3x3_carve_sequence() {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut maze = Maze::new(3, 3).unwrap().with_observer(tx);
        recursive_backtrack(&mut maze, &mut InOrder);

        let visits = rx
            .try_iter()
            .filter_map(|event| match event {
                MazeEvent::Visit { coord } => Some(coord),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(
            visits,
            vec![
                (0, 0),
                (1, 0),
                (2, 0),
                (2, 1),
                (1, 1),
                (0, 1),
                (0, 2),
                (1, 2),
                (2, 2)
            ]
        );

        assert_eq!(maze.passage_count(), 8);
        assert_eq!(maze[(0, 0)].walls, walls(true, true, false, true));
        assert_eq!(maze[(1, 0)].walls, walls(false, true, false, true));
        assert_eq!(maze[(2, 0)].walls, walls(false, false, true, true));
        assert_eq!(maze[(2, 1)].walls, walls(false, true, true, false));
        assert_eq!(maze[(1, 1)].walls, walls(false, true, false, true));
        assert_eq!(maze[(0, 1)].walls, walls(true, false, false, true));
        assert_eq!(maze[(0, 2)].walls, walls(true, true, false, false));
        assert_eq!(maze[(1, 2)].walls, walls(false, true, false, true));
        assert_eq!(maze[(2, 2)].walls, walls(false, true, true, true));
    }

    #[test]
    fn test_every_cell_visited_once() {
        let mut maze = Maze::new(7, 11).unwrap();
        recursive_backtrack(&mut maze, &mut get_rng(Some(3)));
        assert!(maze.coords().all(|coord| maze[coord].visited));
        assert_eq!(maze.passage_count(), 7 * 11 - 1);
    }

    #[test]
    fn test_single_cell_maze() {
        let mut maze = Maze::new(1, 1).unwrap();
        recursive_backtrack(&mut maze, &mut get_rng(Some(0)));
        assert!(maze[(0, 0)].visited);
        assert_eq!(maze[(0, 0)].walls, Walls::ALL);
    }

    #[test]
    fn test_single_row_is_a_corridor() {
        let mut maze = Maze::new(1, 5).unwrap();
        recursive_backtrack(&mut maze, &mut get_rng(Some(9)));
        assert_eq!(maze.passage_count(), 4);
        assert!((0..4).all(|column| !maze[(0, column)].walls.right));
    }

    #[test]
    fn test_same_seed_same_maze() {
        let mut first = Maze::new(9, 9).unwrap();
        let mut second = Maze::new(9, 9).unwrap();
        recursive_backtrack(&mut first, &mut get_rng(Some(42)));
        recursive_backtrack(&mut second, &mut get_rng(Some(42)));
        assert!(first.coords().all(|coord| first[coord] == second[coord]));
    }

    #[test]
    fn test_regenerating_starts_from_scratch() {
        let mut maze = Maze::new(4, 4).unwrap();
        recursive_backtrack(&mut maze, &mut get_rng(Some(1)));
        recursive_backtrack(&mut maze, &mut get_rng(Some(2)));
        assert_eq!(maze.passage_count(), 15);
        assert!(maze.coords().all(|coord| maze[coord] != Cell::FRESH));
    }
}
