//! MCTS tree node representation.
//!
//! Each node owns a snapshot of the position reached by playing its move from
//! the parent, together with the statistics used by UCB1 selection.

use engine_core::GameState;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode<S: GameState> {
    /// Parent node index (NONE for root). Non-owning: the arena owns every node.
    pub parent: NodeId,

    /// Position at this node
    pub state: S,

    /// Visit count. Starts at 1, not 0, so `reward / visits` and the UCB1
    /// exploration term are defined before the first backpropagation.
    pub visits: u32,

    /// Sum of rewards backpropagated through this node, from the point of
    /// view of the player who moved into it.
    pub reward: f64,

    /// Children in creation order: (move that produced the child, child id).
    pub children: Vec<(S::Move, NodeId)>,
}

impl<S: GameState> MctsNode<S> {
    /// Create a new root node.
    pub fn new_root(state: S) -> Self {
        Self::new_child(NodeId::NONE, state)
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, state: S) -> Self {
        Self {
            parent,
            state,
            visits: 1,
            reward: 0.0,
            children: Vec::new(),
        }
    }

    /// Add `reward` and count one visit.
    #[inline]
    pub fn record_outcome(&mut self, reward: f64) {
        self.reward += reward;
        self.visits += 1;
    }

    /// Mean reward `reward / visits`.
    #[inline]
    pub fn mean_reward(&self) -> f64 {
        self.reward / f64::from(self.visits)
    }

    /// True iff every legal move from this position has a child.
    ///
    /// Recomputed from the position on every call.
    pub fn is_fully_expanded(&self) -> bool {
        self.children.len() == self.state.legal_moves().len()
    }

    /// First legal move (in enumeration order) without a child yet.
    pub fn untried_move(&self) -> Option<S::Move> {
        self.state
            .legal_moves()
            .into_iter()
            .find(|mv| !self.children.iter().any(|(tried, _)| tried == mv))
    }

    /// Child reached by `mv`, if it was expanded.
    pub fn child_for(&self, mv: S::Move) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(tried, _)| *tried == mv)
            .map(|(_, id)| *id)
    }

    /// Check if this node has any children.
    #[inline]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }
}
