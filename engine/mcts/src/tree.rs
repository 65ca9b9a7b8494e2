//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices. Parents always precede their
//! children in the arena.

use engine_core::game_utils::{backup_reward, opponent};
use engine_core::{GameState, Player};

use crate::node::{MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug, Clone)]
pub struct MctsTree<S: GameState> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<S>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<S: GameState> MctsTree<S> {
    /// Create a new tree rooted at `root_state`.
    pub fn new(root_state: S) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(root_state)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<S> {
        &self.nodes[id.index()]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<S> {
        &mut self.nodes[id.index()]
    }

    /// Allocate a new node and return its ID.
    pub fn allocate(&mut self, node: MctsNode<S>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[MctsNode<S>] {
        &self.nodes
    }

    /// Append a child of `parent_id` holding `state`, reached by `mv`.
    ///
    /// Legality of `mv` is not checked here; expansion only offers legal moves.
    pub fn add_child(&mut self, parent_id: NodeId, state: S, mv: S::Move) -> NodeId {
        let child_id = self.allocate(MctsNode::new_child(parent_id, state));
        self.get_mut(parent_id).children.push((mv, child_id));
        child_id
    }

    /// Backpropagate a rollout result from `leaf_id` up to the root.
    ///
    /// `turn` is the side to move at the leaf. Each node on the path gets one
    /// visit and `-(turn * winner)`, then the turn flips for the parent, so
    /// rewards alternate sign level by level.
    pub fn backpropagate(&mut self, leaf_id: NodeId, winner: Player, turn: Player) {
        let mut current_id = leaf_id;
        let mut turn = turn;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.record_outcome(backup_reward(winner, turn));

            turn = opponent(turn);
            current_id = node.parent;
        }
    }

    /// Depth of `node_id` below the root (root = 0).
    pub fn depth(&self, node_id: NodeId) -> u32 {
        let mut depth = 0;
        let mut current = self.get(node_id).parent;
        while current.is_some() {
            depth += 1;
            current = self.get(current).parent;
        }
        depth
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visits,
            root_reward: root.reward,
            max_depth: self.compute_max_depth(),
        }
    }

    /// Parents are allocated before children, so one forward pass suffices.
    fn compute_max_depth(&self) -> u32 {
        let mut depths = vec![0u32; self.nodes.len()];
        let mut max_depth = 0;
        for (index, node) in self.nodes.iter().enumerate() {
            if node.parent.is_some() {
                depths[index] = depths[node.parent.index()] + 1;
                max_depth = max_depth.max(depths[index]);
            }
        }
        max_depth
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_reward: f64,
    pub max_depth: u32,
}
