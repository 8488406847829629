pub mod frontier;
pub mod node;

use std::collections::HashSet;

use crate::{
    error::MazeError,
    maze::{Coord, Maze, SearchStatus},
};
use frontier::{Frontier, PriorityFrontier, QueueFrontier, StackFrontier};
use node::{NodeArena, SearchNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    Dfs,
    Bfs,
    AStar,
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
            Solver::AStar => write!(f, "A* Search"),
        }
    }
}

impl Solver {
    pub const ALL: [Solver; 3] = [Solver::Dfs, Solver::Bfs, Solver::AStar];

    /// The frontier ordering that turns generic graph search into this algorithm.
    pub fn frontier(self) -> Box<dyn Frontier> {
        match self {
            Solver::Dfs => Box::new(StackFrontier::default()),
            Solver::Bfs => Box::new(QueueFrontier::default()),
            Solver::AStar => Box::new(PriorityFrontier::default()),
        }
    }

    /// Whether nodes carry a heuristic estimate (and the maze shows g/h scores).
    pub fn is_informed(self) -> bool {
        matches!(self, Solver::AStar)
    }
}

/// Manhattan distance, admissible and consistent on a 4-connected grid with unit steps.
pub fn manhattan(a: Coord, b: Coord) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    /// Nothing queued yet
    Ready,
    /// Frontier seeded, expanding nodes
    Running,
    /// Goal reached; the path runs from start to goal inclusive
    Solved(Vec<Coord>),
    /// Frontier ran dry before the goal was reached
    NoSolution,
}

impl SearchState {
    pub fn is_finished(&self) -> bool {
        matches!(self, SearchState::Solved(_) | SearchState::NoSolution)
    }
}

/// One search run from `start` to `goal` over a maze.
///
/// A `PathFinder` is single-use: [`PathFinder::solve`] consumes it, and stepping a finished
/// search does nothing. To search the same maze again, call [`Maze::clear_search`] and build a
/// new one.
pub struct PathFinder<'m> {
    maze: &'m mut Maze,
    solver: Solver,
    start: Coord,
    goal: Coord,
    frontier: Box<dyn Frontier>,
    nodes: NodeArena,
    explored: HashSet<Coord>,
    state: SearchState,
}

impl<'m> PathFinder<'m> {
    pub fn new(
        maze: &'m mut Maze,
        solver: Solver,
        start: Coord,
        goal: Coord,
    ) -> Result<Self, MazeError> {
        maze.check_bounds("start", start)?;
        maze.check_bounds("goal", goal)?;
        Ok(PathFinder {
            maze,
            solver,
            start,
            goal,
            frontier: solver.frontier(),
            nodes: NodeArena::default(),
            explored: HashSet::new(),
            state: SearchState::Ready,
        })
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn solver(&self) -> Solver {
        self.solver
    }

    /// Number of cells expanded so far.
    pub fn explored_count(&self) -> usize {
        self.explored.len()
    }

    /// Advance the search by one iteration and return where it stands.
    pub fn step(&mut self) -> &SearchState {
        match self.state {
            SearchState::Ready => self.seed_frontier(),
            SearchState::Running => self.expand_next(),
            SearchState::Solved(_) | SearchState::NoSolution => {}
        }
        &self.state
    }

    /// Run the search to completion. `None` means the goal is unreachable from the start.
    pub fn solve(mut self) -> Option<Vec<Coord>> {
        tracing::debug!(
            "[solve] {} from {:?} to {:?}",
            self.solver,
            self.start,
            self.goal
        );
        while !self.step().is_finished() {}
        match self.state {
            SearchState::Solved(path) => Some(path),
            _ => None,
        }
    }

    fn heuristic(&self, coord: Coord) -> usize {
        if self.solver.is_informed() {
            manhattan(coord, self.goal)
        } else {
            0
        }
    }

    /// Record a discovered cell in the maze: it now waits in the frontier.
    fn mark_pending(&mut self, node: &SearchNode) {
        self.maze.set_status(node.state, SearchStatus::Frontier);
        if self.solver.is_informed() {
            self.maze.set_scores(node.state, Some(node.g), Some(node.h));
        }
    }

    fn seed_frontier(&mut self) {
        let root = SearchNode::root(self.start, self.heuristic(self.start));
        let id = self.nodes.push(root);
        self.frontier.add(id, root.state, root.f());
        self.mark_pending(&root);
        self.state = SearchState::Running;
    }

    fn expand_next(&mut self) {
        if self.frontier.is_empty() {
            tracing::warn!(
                "[solve] {} exhausted the frontier after exploring {} cells without reaching {:?}",
                self.solver,
                self.explored.len(),
                self.goal
            );
            self.state = SearchState::NoSolution;
            return;
        }
        let id = match self.frontier.remove() {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("[solve] {}", e);
                self.state = SearchState::NoSolution;
                return;
            }
        };
        let node = self.nodes[id];

        if node.state == self.goal {
            let path = self.nodes.path_to(id);
            for &coord in &path {
                self.maze.set_status(coord, SearchStatus::Path);
            }
            tracing::info!(
                "[solve] {} reached {:?}: path of {} cells, {} cells explored",
                self.solver,
                self.goal,
                path.len(),
                self.explored.len()
            );
            self.state = SearchState::Solved(path);
            return;
        }

        let successors = self.maze.open_neighbors(node.state).collect::<Vec<_>>();
        for (dir, next) in successors {
            if self.explored.contains(&next) || self.frontier.contains_state(next) {
                continue;
            }
            let child = SearchNode {
                state: next,
                parent: Some(id),
                action: Some(dir),
                g: node.g + 1,
                h: self.heuristic(next),
            };
            let child_id = self.nodes.push(child);
            self.frontier.add(child_id, next, child.f());
            self.mark_pending(&child);
            tracing::trace!("[solve] queued {:?} via {} (f = {})", next, dir, child.f());
        }

        self.explored.insert(node.state);
        self.maze.set_status(node.state, SearchStatus::Explored);
    }
}

/// Solve `maze` from `start` to `goal` with the given algorithm.
/// Returns `Ok(None)` when the goal cannot be reached.
pub fn solve_maze(
    maze: &mut Maze,
    solver: Solver,
    start: Coord,
    goal: Coord,
) -> Result<Option<Vec<Coord>>, MazeError> {
    Ok(PathFinder::new(maze, solver, start, goal)?.solve())
}
