use crate::maze::{Coord, Direction};

/// Index of a [`SearchNode`] inside a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A cell reached during search, plus how it was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchNode {
    /// The cell this node wraps
    pub state: Coord,
    /// The node this one was expanded from, `None` for the root
    pub parent: Option<NodeId>,
    /// Side of the parent cell the search stepped through
    pub action: Option<Direction>,
    /// Edges from the start
    pub g: usize,
    /// Heuristic estimate to the goal
    pub h: usize,
}

impl SearchNode {
    pub fn root(state: Coord, h: usize) -> Self {
        SearchNode {
            state,
            parent: None,
            action: None,
            g: 0,
            h,
        }
    }

    pub fn f(&self) -> usize {
        self.g + self.h
    }
}

/// Owns every node of one search run. Parents are referenced by index.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn push(&mut self, node: SearchNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Cells from the root down to `id`, both inclusive.
    pub fn path_to(&self, id: NodeId) -> Vec<Coord> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(id) = current {
            let node = &self[id];
            path.push(node.state);
            current = node.parent;
        }
        path.reverse();
        path
    }
}

impl std::ops::Index<NodeId> for NodeArena {
    type Output = SearchNode;

    fn index(&self, index: NodeId) -> &Self::Output {
        &self.nodes[index.0]
    }
}
