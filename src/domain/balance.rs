//! AVL balance operations: height bookkeeping and the four rotation cases.
//!
//! All functions are pure structural transforms over an owned subtree root
//! and hand back the (possibly new) root of that subtree.

use tracing::trace;

use crate::domain::node::{Link, Node};

/// Cached height of a subtree, -1 when empty.
pub fn height(link: &Link) -> i32 {
    link.as_ref().map_or(-1, |node| node.height)
}

/// `height(left) - height(right)`. An empty subtree yields -1, which is only
/// meaningful for diagnostics.
pub fn imbalance(link: &Link) -> i32 {
    link.as_deref().map_or(-1, balance_factor)
}

pub(crate) fn balance_factor(node: &Node) -> i32 {
    height(&node.left) - height(&node.right)
}

/// Recompute a node's height from its children's cached heights.
pub(crate) fn update_height(node: &mut Node) {
    node.height = 1 + height(&node.left).max(height(&node.right));
}

/// Promote the right child above `node`.
pub(crate) fn rotate_left(mut node: Box<Node>) -> Box<Node> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    update_height(&mut node);
    pivot.left = Some(node);
    update_height(&mut pivot);
    pivot
}

/// Promote the left child above `node`.
pub(crate) fn rotate_right(mut node: Box<Node>) -> Box<Node> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    update_height(&mut node);
    pivot.right = Some(node);
    update_height(&mut pivot);
    pivot
}

/// Restore the AVL condition at `node`.
///
/// Children must already be balanced with correct heights, and `node`'s own
/// height must be current. At most one single or double rotation is applied.
pub(crate) fn rebalance(mut node: Box<Node>) -> Box<Node> {
    let factor = balance_factor(&node);
    if factor > 1 {
        if imbalance(&node.left) < 0 {
            trace!(id = node.id(), "left-right rotation");
            node.left = node.left.take().map(rotate_left);
        } else {
            trace!(id = node.id(), "right rotation");
        }
        return rotate_right(node);
    }
    if factor < -1 {
        if imbalance(&node.right) > 0 {
            trace!(id = node.id(), "right-left rotation");
            node.right = node.right.take().map(rotate_right);
        } else {
            trace!(id = node.id(), "left rotation");
        }
        return rotate_left(node);
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Robot, RobotType};

    fn node(id: i32, left: Link, right: Link) -> Box<Node> {
        let mut n = Box::new(Node::new(Robot::new(id, RobotType::Bird)));
        n.left = left;
        n.right = right;
        update_height(&mut n);
        n
    }

    fn keys(link: &Link, out: &mut Vec<(i32, i32)>) {
        if let Some(n) = link {
            keys(&n.left, out);
            out.push((n.id(), n.height));
            keys(&n.right, out);
        }
    }

    #[test]
    fn given_empty_link_then_height_and_imbalance_are_minus_one() {
        assert_eq!(height(&None), -1);
        assert_eq!(imbalance(&None), -1);
    }

    #[test]
    fn given_left_left_chain_when_rebalancing_then_rotates_right() {
        // 30 <- 20 <- 10
        let chain = node(30, Some(node(20, Some(node(10, None, None)), None)), None);
        assert_eq!(balance_factor(&chain), 2);

        let root = rebalance(chain);
        assert_eq!(root.id(), 20);
        assert_eq!(root.height, 1);
        assert_eq!(root.left().map(Node::id), Some(10));
        assert_eq!(root.right().map(Node::id), Some(30));
    }

    #[test]
    fn given_right_right_chain_when_rebalancing_then_rotates_left() {
        let chain = node(10, None, Some(node(20, None, Some(node(30, None, None)))));
        let root = rebalance(chain);
        assert_eq!(root.id(), 20);
        assert_eq!(root.height, 1);
    }

    #[test]
    fn given_left_right_zigzag_when_rebalancing_then_double_rotates() {
        let zigzag = node(30, Some(node(10, None, Some(node(20, None, None)))), None);
        let root = rebalance(zigzag);
        let mut out = Vec::new();
        keys(&Some(root), &mut out);
        assert_eq!(out, vec![(10, 0), (20, 1), (30, 0)]);
    }

    #[test]
    fn given_right_left_zigzag_when_rebalancing_then_double_rotates() {
        let zigzag = node(10, None, Some(node(30, Some(node(20, None, None)), None)));
        let root = rebalance(zigzag);
        assert_eq!(root.id(), 20);
        assert_eq!(root.left().map(Node::id), Some(10));
        assert_eq!(root.right().map(Node::id), Some(30));
    }

    #[test]
    fn given_balanced_node_when_rebalancing_then_unchanged() {
        let balanced = node(20, Some(node(10, None, None)), None);
        let root = rebalance(balanced);
        assert_eq!(root.id(), 20);
        assert_eq!(root.height, 1);
    }

    #[test]
    fn given_rotation_then_grandchild_is_reparented() {
        // 40 with left 20 (children 10, 30) and right leaf 50; rotate right
        let tree = node(
            40,
            Some(node(20, Some(node(10, None, None)), Some(node(30, None, None)))),
            Some(node(50, None, None)),
        );
        let root = rotate_right(tree);
        assert_eq!(root.id(), 20);
        let right = root.right().unwrap();
        assert_eq!(right.id(), 40);
        assert_eq!(right.left().map(Node::id), Some(30));
        assert_eq!(right.height, 1);
        assert_eq!(root.height, 2);
    }
}
