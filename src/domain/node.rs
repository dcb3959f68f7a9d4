//! Tree nodes and the owning links between them

use crate::domain::{Robot, RobotId};

/// Owning link to a subtree. Each node is owned solely by its parent slot.
pub type Link = Option<Box<Node>>;

/// Tree node: a robot plus the cached height of the subtree rooted here.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) robot: Robot,
    /// Leaf is 0, an absent child counts as -1
    pub(crate) height: i32,
    pub(crate) left: Link,
    pub(crate) right: Link,
}

impl Node {
    pub(crate) fn new(robot: Robot) -> Self {
        Self {
            robot,
            height: 0,
            left: None,
            right: None,
        }
    }

    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    pub fn id(&self) -> RobotId {
        self.robot.id()
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn left(&self) -> Option<&Node> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node> {
        self.right.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Leftmost node of a subtree, `None` for an empty subtree.
pub fn find_min(link: &Link) -> Option<&Node> {
    let mut current = link.as_deref()?;
    while let Some(left) = current.left.as_deref() {
        current = left;
    }
    Some(current)
}

/// Rightmost node of a subtree, `None` for an empty subtree.
pub fn find_max(link: &Link) -> Option<&Node> {
    let mut current = link.as_deref()?;
    while let Some(right) = current.right.as_deref() {
        current = right;
    }
    Some(current)
}
