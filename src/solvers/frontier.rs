use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap, VecDeque},
};

use crate::{error::FrontierError, maze::Coord, solvers::node::NodeId};

/// Pending search nodes, ordered by a policy, with O(1) lookup of the cells they wrap.
pub trait Frontier {
    /// Queue `node`, which wraps the cell `state`. `priority` only matters to ordered frontiers.
    fn add(&mut self, node: NodeId, state: Coord, priority: usize);

    /// Take the next node according to the policy.
    fn remove(&mut self) -> Result<NodeId, FrontierError>;

    /// Whether some pending node wraps `state`.
    fn contains_state(&self, state: Coord) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Number of pending nodes per cell. Kept in lockstep with the pending collection.
#[derive(Debug, Default)]
struct PendingStates(HashMap<Coord, usize>);

impl PendingStates {
    fn insert(&mut self, state: Coord) {
        *self.0.entry(state).or_default() += 1;
    }

    fn remove(&mut self, state: Coord) {
        if let Some(count) = self.0.get_mut(&state) {
            *count -= 1;
            if *count == 0 {
                self.0.remove(&state);
            }
        }
    }

    fn contains(&self, state: Coord) -> bool {
        self.0.contains_key(&state)
    }
}

/// Last in, first out. Drives depth-first search.
#[derive(Debug, Default)]
pub struct StackFrontier {
    nodes: Vec<(NodeId, Coord)>,
    states: PendingStates,
}

impl Frontier for StackFrontier {
    fn add(&mut self, node: NodeId, state: Coord, _priority: usize) {
        self.nodes.push((node, state));
        self.states.insert(state);
    }

    fn remove(&mut self) -> Result<NodeId, FrontierError> {
        let (node, state) = self.nodes.pop().ok_or(FrontierError::Empty)?;
        self.states.remove(state);
        Ok(node)
    }

    fn contains_state(&self, state: Coord) -> bool {
        self.states.contains(state)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// First in, first out. Drives breadth-first search.
#[derive(Debug, Default)]
pub struct QueueFrontier {
    nodes: VecDeque<(NodeId, Coord)>,
    states: PendingStates,
}

impl Frontier for QueueFrontier {
    fn add(&mut self, node: NodeId, state: Coord, _priority: usize) {
        self.nodes.push_back((node, state));
        self.states.insert(state);
    }

    fn remove(&mut self) -> Result<NodeId, FrontierError> {
        let (node, state) = self.nodes.pop_front().ok_or(FrontierError::Empty)?;
        self.states.remove(state);
        Ok(node)
    }

    fn contains_state(&self, state: Coord) -> bool {
        self.states.contains(state)
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// Lowest priority first; equal priorities leave in insertion order. Drives A*.
#[derive(Debug, Default)]
pub struct PriorityFrontier {
    // (priority, insertion sequence) makes the min-heap order total and FIFO among ties
    heap: BinaryHeap<Reverse<(usize, u64, NodeId, Coord)>>,
    states: PendingStates,
    sequence: u64,
}

impl Frontier for PriorityFrontier {
    fn add(&mut self, node: NodeId, state: Coord, priority: usize) {
        self.heap.push(Reverse((priority, self.sequence, node, state)));
        self.sequence += 1;
        self.states.insert(state);
    }

    fn remove(&mut self) -> Result<NodeId, FrontierError> {
        let Reverse((_, _, node, state)) = self.heap.pop().ok_or(FrontierError::Empty)?;
        self.states.remove(state);
        Ok(node)
    }

    fn contains_state(&self, state: Coord) -> bool {
        self.states.contains(state)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
