//! UCB1 move selection.
//!
//! One scorer serves both the descent through the tree (exploration enabled)
//! and the final decision at the root (factor 0, pure exploitation).

use engine_core::GameState;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

use crate::node::NodeId;
use crate::tree::MctsTree;

/// UCB1 score of a child.
///
/// `reward / visits + factor * sqrt(ln(2 * parent_visits) / visits)`
#[inline]
pub fn ucb1(reward: f64, visits: u32, parent_visits: u32, factor: f64) -> f64 {
    let visits = f64::from(visits);
    let exploit = reward / visits;
    let explore = ((2.0 * f64::from(parent_visits)).ln() / visits).sqrt();
    exploit + factor * explore
}

/// Pick the item with the highest score, breaking exact ties uniformly at
/// random. Returns `None` for an empty iterator.
///
/// Scores are compared with `==`, not within a tolerance.
#[allow(clippy::float_cmp)]
pub fn pick_best<T, I>(scored: I, rng: &mut ChaCha20Rng) -> Option<T>
where
    T: Copy,
    I: IntoIterator<Item = (T, f64)>,
{
    let mut best_score = f64::NEG_INFINITY;
    let mut best: Vec<T> = Vec::new();

    for (item, score) in scored {
        if score > best_score {
            best.clear();
            best.push(item);
            best_score = score;
        } else if score == best_score {
            best.push(item);
        }
    }

    best.choose(rng).copied()
}

/// Best child of `node_id` by UCB1 with exploration factor `factor`.
///
/// `None` if the node has no children.
pub fn best_child<S: GameState>(
    tree: &MctsTree<S>,
    node_id: NodeId,
    factor: f64,
    rng: &mut ChaCha20Rng,
) -> Option<NodeId> {
    let node = tree.get(node_id);
    let scored = node.children.iter().map(|&(_, child_id)| {
        let child = tree.get(child_id);
        (
            child_id,
            ucb1(child.reward, child.visits, node.visits, factor),
        )
    });
    pick_best(scored, rng)
}
