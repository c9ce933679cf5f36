//! Arena-backed game tree.
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`]. A parent
//! owns its children through the arena; the `parent` field of a child is only
//! a back-reference used when propagating rewards upwards.
//!
//! When a real move is played the tree is re-rooted: the chosen subtree is
//! copied into a fresh arena and everything else is dropped.

use std::fmt;

use crate::board::{Color, Point};

/// Index into the [`Tree`] node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// A node in the search tree.
#[derive(Clone, Debug)]
pub struct TreeNode {
    /// Parent node (`None` for the root)
    pub parent: Option<NodeId>,
    /// Color of the stone this node represents having just been played
    pub mover: Color,
    /// Plies from the start of the game
    pub depth: usize,
    /// Move that produced this node (`None` only for the empty-board root)
    pub mv: Option<Point>,
    /// Accumulated reward, from `mover`'s perspective
    pub value: f64,
    /// Number of visits
    pub visits: u32,
    /// Child nodes, one per candidate move at expansion time
    pub children: Vec<NodeId>,
}

impl TreeNode {
    pub fn new(parent: Option<NodeId>, mover: Color, depth: usize, mv: Option<Point>) -> Self {
        Self {
            parent,
            mover,
            depth,
            mv,
            value: 0.0,
            visits: 0,
            children: Vec::new(),
        }
    }

    /// Root of a new game. White is recorded as the mover so that the first
    /// real move is Black's.
    pub fn game_start() -> Self {
        Self::new(None, Color::White, 0, None)
    }

    /// Mean reward, or `None` if never visited.
    #[inline]
    pub fn mean_value(&self) -> Option<f64> {
        (self.visits > 0).then(|| self.value / self.visits as f64)
    }
}

#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Vec<TreeNode>,
    root: NodeId,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new(TreeNode::game_start())
    }
}

impl Tree {
    /// Create a tree holding a single root node.
    pub fn new(mut root: TreeNode) -> Self {
        root.parent = None;
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut TreeNode {
        &mut self.nodes[id.index()]
    }

    /// Allocate a node without linking it to a parent.
    pub fn alloc(&mut self, node: TreeNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a child of `parent` playing `mv`.
    pub fn add_child(&mut self, parent: NodeId, mv: Point) -> NodeId {
        let (mover, depth) = {
            let p = self.get(parent);
            (p.mover.opponent(), p.depth + 1)
        };
        let id = self.alloc(TreeNode::new(Some(parent), mover, depth, Some(mv)));
        self.get_mut(parent).children.push(id);
        id
    }

    /// Child of `parent` whose move is `mv`, if it has been expanded.
    pub fn find_child(&self, parent: NodeId, mv: Point) -> Option<NodeId> {
        self.get(parent)
            .children
            .iter()
            .copied()
            .find(|&c| self.get(c).mv == Some(mv))
    }

    #[inline]
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        &self.get(id).children
    }

    /// Number of nodes in the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Make `new_root` the root, keeping only its subtree.
    ///
    /// The subtree is copied breadth-first into a new arena with remapped
    /// ids, so the new root is always `NodeId(0)`. Statistics are preserved.
    /// Returns the new root id.
    pub fn reroot(&mut self, new_root: NodeId) -> NodeId {
        let mut old = std::mem::take(&mut self.nodes);
        let mut nodes: Vec<TreeNode> = Vec::new();
        // (old id, new parent id)
        let mut queue = std::collections::VecDeque::from([(new_root, None)]);

        while let Some((old_id, parent)) = queue.pop_front() {
            let new_id = NodeId(nodes.len() as u32);
            let mut node = std::mem::replace(
                &mut old[old_id.index()],
                TreeNode::game_start(),
            );
            node.parent = parent;
            for child in node.children.drain(..) {
                queue.push_back((child, Some(new_id)));
            }
            if let Some(p) = parent {
                nodes[p.index()].children.push(new_id);
            }
            nodes.push(node);
        }

        self.nodes = nodes;
        self.root = NodeId(0);
        self.root
    }

    /// Size of the subtree under `id`, including `id` itself.
    pub fn subtree_size(&self, id: NodeId) -> usize {
        let mut count = 0;
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            count += 1;
            stack.extend_from_slice(&self.get(n).children);
        }
        count
    }
}
