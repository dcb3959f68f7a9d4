//! The swarm: an AVL tree of robots keyed by id.

use std::cmp::Ordering;
use std::fmt::Write as _;

use tracing::{debug, info, instrument};

use crate::domain::balance::{self, rebalance, update_height};
use crate::domain::node::{find_max, find_min, Link, Node};
use crate::domain::{DomainError, KeyRange, Robot, RobotId, RobotState};

/// Result of an insertion. Rejections leave the swarm unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Duplicate,
    OutOfRange,
}

impl InsertOutcome {
    pub fn is_inserted(&self) -> bool {
        matches!(self, InsertOutcome::Inserted)
    }
}

/// Self-balancing registry of robots.
///
/// Every mutating operation leaves the tree ordered by id, with correct
/// cached heights and subtree heights differing by at most one at every node.
#[derive(Debug, Clone, Default)]
pub struct Swarm {
    root: Link,
    range: KeyRange,
    len: usize,
}

impl Swarm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_range(range: KeyRange) -> Self {
        Self {
            root: None,
            range,
            len: 0,
        }
    }

    pub fn range(&self) -> KeyRange {
        self.range
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the whole tree, -1 when empty.
    pub fn height(&self) -> i32 {
        balance::height(&self.root)
    }

    pub fn root(&self) -> Option<&Robot> {
        self.root.as_deref().map(Node::robot)
    }

    pub fn root_node(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    pub fn min(&self) -> Option<&Robot> {
        find_min(&self.root).map(Node::robot)
    }

    pub fn max(&self) -> Option<&Robot> {
        find_max(&self.root).map(Node::robot)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert(&mut self, robot: Robot) -> InsertOutcome {
        if !self.range.contains(robot.id()) {
            debug!(id = robot.id(), range = %self.range, "rejecting out of range id");
            return InsertOutcome::OutOfRange;
        }
        let (root, outcome) = insert_node(self.root.take(), robot);
        self.root = Some(root);
        match outcome {
            InsertOutcome::Inserted => self.len += 1,
            _ => debug!(id = robot.id(), "rejecting duplicate id"),
        }
        outcome
    }

    /// Remove the robot with `id`, returning it. Absent ids are a no-op.
    #[instrument(level = "trace", skip(self))]
    pub fn remove(&mut self, id: RobotId) -> Option<Robot> {
        let mut removed = None;
        self.root = remove_node(self.root.take(), id, &mut removed);
        if removed.is_some() {
            self.len -= 1;
        } else {
            debug!(id, "nothing to remove");
        }
        removed
    }

    #[instrument(level = "trace", skip(self))]
    pub fn lookup(&self, id: RobotId) -> Option<&Robot> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match id.cmp(&node.id()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.robot),
            };
        }
        None
    }

    pub fn contains(&self, id: RobotId) -> bool {
        self.lookup(id).is_some()
    }

    fn lookup_mut(&mut self, id: RobotId) -> Option<&mut Robot> {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            current = match id.cmp(&node.id()) {
                Ordering::Less => node.left.as_deref_mut(),
                Ordering::Greater => node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.robot),
            };
        }
        None
    }

    /// Overwrite the state of robot `id`. Returns false if it is absent.
    #[instrument(level = "trace", skip(self))]
    pub fn set_state(&mut self, id: RobotId, state: RobotState) -> bool {
        match self.lookup_mut(id) {
            Some(robot) => {
                robot.set_state(state);
                true
            }
            None => false,
        }
    }

    /// Remove every dead robot, returning how many were removed.
    ///
    /// Ids are collected in a full pass first, then removed one by one, so no
    /// traversal is alive while the tree is restructured.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_dead(&mut self) -> usize {
        let dead: Vec<RobotId> = self
            .iter()
            .filter(|robot| robot.is_dead())
            .map(Robot::id)
            .collect();
        let mut removed = 0;
        for id in dead {
            if self.remove(id).is_some() {
                removed += 1;
            }
        }
        info!(removed, remaining = self.len, "removed dead robots");
        removed
    }

    /// Drop every node and reset to empty.
    #[instrument(level = "debug", skip(self))]
    pub fn clear(&mut self) {
        clear_node(self.root.take());
        self.len = 0;
    }

    /// In-order (ascending id) traversal. Call again to restart.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.root)
    }

    /// One `<id>:<STATE>:<TYPE>` line per robot, ascending.
    pub fn list(&self) -> Vec<String> {
        self.iter().map(Robot::to_string).collect()
    }

    /// Parenthesized in-order `id:height` rendering, for diagnostics only.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        dump_node(&self.root, &mut out);
        out
    }

    /// Walk the whole tree and report the first broken invariant.
    #[instrument(level = "debug", skip(self))]
    pub fn verify(&self) -> Result<(), DomainError> {
        let counted = verify_node(&self.root, None, None, &self.range)?.1;
        if counted != self.len {
            return Err(DomainError::SizeMismatch {
                cached: self.len,
                counted,
            });
        }
        Ok(())
    }
}

fn insert_node(link: Link, robot: Robot) -> (Box<Node>, InsertOutcome) {
    let Some(mut node) = link else {
        return (Box::new(Node::new(robot)), InsertOutcome::Inserted);
    };
    let outcome = match robot.id().cmp(&node.id()) {
        Ordering::Less => {
            let (left, outcome) = insert_node(node.left.take(), robot);
            node.left = Some(left);
            outcome
        }
        Ordering::Greater => {
            let (right, outcome) = insert_node(node.right.take(), robot);
            node.right = Some(right);
            outcome
        }
        Ordering::Equal => return (node, InsertOutcome::Duplicate),
    };
    update_height(&mut node);
    (rebalance(node), outcome)
}

fn remove_node(link: Link, id: RobotId, removed: &mut Option<Robot>) -> Link {
    let mut node = link?;
    match id.cmp(&node.id()) {
        Ordering::Less => node.left = remove_node(node.left.take(), id, removed),
        Ordering::Greater => node.right = remove_node(node.right.take(), id, removed),
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, None) => {
                *removed = Some(node.robot);
                return None;
            }
            (Some(child), None) | (None, Some(child)) => {
                *removed = Some(node.robot);
                return Some(child);
            }
            (Some(left), Some(right)) => {
                node.left = Some(left);
                node.right = Some(right);
                // in-order successor takes this slot, then leaves the right subtree
                if let Some(successor) = find_min(&node.right).map(|n| n.robot) {
                    *removed = Some(std::mem::replace(&mut node.robot, successor));
                    let mut discarded = None;
                    node.right = remove_node(node.right.take(), successor.id(), &mut discarded);
                }
            }
        },
    }
    update_height(&mut node);
    Some(rebalance(node))
}

fn clear_node(link: Link) {
    if let Some(mut node) = link {
        clear_node(node.left.take());
        clear_node(node.right.take());
    }
}

fn dump_node(link: &Link, out: &mut String) {
    if let Some(node) = link {
        out.push('(');
        dump_node(&node.left, out);
        let _ = write!(out, "{}:{}", node.id(), node.height);
        dump_node(&node.right, out);
        out.push(')');
    }
}

/// Returns (height, count) of a verified subtree.
fn verify_node(
    link: &Link,
    low: Option<RobotId>,
    high: Option<RobotId>,
    range: &KeyRange,
) -> Result<(i32, usize), DomainError> {
    let Some(node) = link else {
        return Ok((-1, 0));
    };
    let id = node.id();
    if low.is_some_and(|l| id <= l) || high.is_some_and(|h| id >= h) {
        return Err(DomainError::OrderViolation { id, low, high });
    }
    if !range.contains(id) {
        return Err(DomainError::OutOfRange(id));
    }
    let (left, left_count) = verify_node(&node.left, low, Some(id), range)?;
    let (right, right_count) = verify_node(&node.right, Some(id), high, range)?;
    let computed = 1 + left.max(right);
    if computed != node.height {
        return Err(DomainError::HeightMismatch {
            id,
            cached: node.height,
            computed,
        });
    }
    if (left - right).abs() > 1 {
        return Err(DomainError::Unbalanced { id, left, right });
    }
    Ok((computed, left_count + right_count + 1))
}

/// In-order iterator over the robots of a swarm.
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    fn new(root: &'a Link) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_edge(root.as_deref());
        iter
    }

    fn push_left_edge(&mut self, mut current: Option<&'a Node>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Robot;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_edge(node.right.as_deref());
        Some(&node.robot)
    }
}

impl<'a> IntoIterator for &'a Swarm {
    type Item = &'a Robot;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
