use std::collections::{HashSet, VecDeque};

use mazesearch::{
    Coord, Maze, PathFinder, SearchState, Solver,
    generators::{Shuffler, get_rng, recursive_backtrack},
    maze::SearchStatus,
    solve_maze,
};

const SIZES: [(usize, usize); 6] = [(1, 1), (1, 7), (6, 1), (3, 3), (8, 5), (12, 12)];

fn generated(rows: usize, columns: usize, seed: u64) -> Maze {
    let mut maze = Maze::new(rows, columns).unwrap();
    recursive_backtrack(&mut maze, &mut get_rng(Some(seed)));
    maze
}

/// Cells reachable from `from` through open walls, found without the library's solvers.
fn reachable(maze: &Maze, from: Coord) -> HashSet<Coord> {
    let mut seen = HashSet::from([from]);
    let mut queue = VecDeque::from([from]);
    while let Some(cell) = queue.pop_front() {
        for (_, next) in maze.open_neighbors(cell) {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

#[test]
fn generated_mazes_are_spanning_trees() {
    for (rows, columns) in SIZES {
        for seed in 0..10 {
            let maze = generated(rows, columns, seed);
            assert_eq!(maze.passage_count(), rows * columns - 1);
            assert_eq!(reachable(&maze, (0, 0)).len(), rows * columns);
        }
    }
}

#[test]
fn wall_flags_agree_on_both_sides() {
    let maze = generated(9, 7, 5);
    for coord in maze.coords() {
        for (dir, next) in maze.neighbors(coord) {
            assert_eq!(
                maze[coord].walls.has(dir),
                maze[next].walls.has(dir.opposite()),
                "{:?} {:?}",
                coord,
                dir
            );
        }
    }
}

#[test]
fn outer_boundary_stays_closed() {
    let maze = generated(6, 8, 13);
    for column in 0..8 {
        assert!(maze[(0, column)].walls.top);
        assert!(maze[(5, column)].walls.bottom);
    }
    for row in 0..6 {
        assert!(maze[(row, 0)].walls.left);
        assert!(maze[(row, 7)].walls.right);
    }
}

#[test]
fn all_solvers_agree_on_every_pair() {
    for seed in 0..4 {
        let mut maze = generated(5, 6, seed);
        let cells = maze.coords().collect::<Vec<_>>();
        for &start in &cells {
            for &goal in &cells {
                let mut lengths = Vec::new();
                for solver in Solver::ALL {
                    maze.clear_search();
                    let path = solve_maze(&mut maze, solver, start, goal)
                        .unwrap()
                        .expect("perfect mazes connect every pair of cells");
                    assert_eq!(path.first(), Some(&start));
                    assert_eq!(path.last(), Some(&goal));
                    // Consecutive cells are joined by an open passage
                    for pair in path.windows(2) {
                        assert!(
                            maze.open_neighbors(pair[0]).any(|(_, next)| next == pair[1]),
                            "{:?} -> {:?} is walled off",
                            pair[0],
                            pair[1]
                        );
                    }
                    lengths.push(path.len());
                }
                let (dfs, bfs, astar) = (lengths[0], lengths[1], lengths[2]);
                assert_eq!(astar, bfs);
                assert!(dfs >= bfs);
                // A tree has only one simple path
                assert_eq!(dfs, bfs);
            }
        }
    }
}

#[test]
fn astar_explores_no_more_than_bfs_on_average() {
    let mut astar_total = 0;
    let mut bfs_total = 0;
    for seed in 0..20 {
        let mut maze = generated(15, 15, seed);
        for (solver, total) in [(Solver::AStar, &mut astar_total), (Solver::Bfs, &mut bfs_total)] {
            maze.clear_search();
            let mut finder = PathFinder::new(&mut maze, solver, (0, 0), (14, 14)).unwrap();
            while !finder.step().is_finished() {}
            assert!(matches!(finder.state(), SearchState::Solved(_)));
            *total += finder.explored_count();
        }
    }
    assert!(astar_total <= bfs_total);
}

#[test]
fn path_cells_are_marked_in_the_maze() {
    let mut maze = generated(7, 7, 21);
    let path = solve_maze(&mut maze, Solver::AStar, (6, 0), (0, 6))
        .unwrap()
        .unwrap();
    let marked = maze
        .coords()
        .filter(|&coord| maze[coord].status == SearchStatus::Path)
        .collect::<HashSet<_>>();
    assert_eq!(marked, path.into_iter().collect::<HashSet<_>>());
}

#[test]
fn observer_does_not_change_the_outcome() {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut watched = Maze::new(6, 6).unwrap().with_observer(tx);
    let mut plain = Maze::new(6, 6).unwrap();
    recursive_backtrack(&mut watched, &mut get_rng(Some(8)));
    recursive_backtrack(&mut plain, &mut get_rng(Some(8)));

    let watched_path = solve_maze(&mut watched, Solver::Dfs, (0, 0), (5, 5)).unwrap();
    let plain_path = solve_maze(&mut plain, Solver::Dfs, (0, 0), (5, 5)).unwrap();
    assert_eq!(watched_path, plain_path);
    assert!(rx.try_iter().count() > 0);
}

/// Reverses the scan order, giving a second fixed layout.
struct Reversed;

impl Shuffler for Reversed {
    fn shuffle_coords(&mut self, coords: &mut [Coord]) {
        coords.reverse();
    }
}

#[test]
fn reversed_order_carves_a_serpentine() {
    // Scan order is top, bottom, left, right; reversed it prefers right, then left, bottom, top
    let mut maze = Maze::new(2, 3).unwrap();
    recursive_backtrack(&mut maze, &mut Reversed);
    let path = solve_maze(&mut maze, Solver::Bfs, (0, 0), (1, 0))
        .unwrap()
        .unwrap();
    assert_eq!(path, vec![(0, 0), (0, 1), (0, 2), (1, 2), (1, 1), (1, 0)]);
}

/// Keeps the scan order unchanged.
struct InOrder;

impl Shuffler for InOrder {
    fn shuffle_coords(&mut self, _coords: &mut [Coord]) {}
}

#[test]
fn in_order_3x3_bfs_walks_every_cell() {
    let mut maze = Maze::new(3, 3).unwrap();
    recursive_backtrack(&mut maze, &mut InOrder);
    let path = solve_maze(&mut maze, Solver::Bfs, (0, 0), (2, 2))
        .unwrap()
        .unwrap();
    assert_eq!(
        path,
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
    assert_eq!(
        maze.to_string(),
        "+--+--+--+\n\
         | *| *  *|\n\
         +  +  +  +\n\
         | *| *| *|\n\
         +  +  +  +\n\
         | *  *| *|\n\
         +--+--+--+\n"
    );
}
