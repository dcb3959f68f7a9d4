/*
termtree only knows ordered children, so the left/right position of each
child is carried in its label instead.
 */
use termtree::Tree;
use tracing::instrument;

use crate::domain::{Node, Swarm};

pub trait TreeRender {
    fn to_tree_string(&self) -> Tree<String>;
}

fn label(node: &Node) -> String {
    format!("{}:{}", node.id(), node.height())
}

fn build_tree(node: &Node, tag: &str) -> Tree<String> {
    let children = [("L ", node.left()), ("R ", node.right())];
    let leaves: Vec<_> = children
        .iter()
        .filter_map(|(tag, child)| child.map(|c| build_tree(c, tag)))
        .collect();
    Tree::new(format!("{}{}", tag, label(node))).with_leaves(leaves)
}

impl TreeRender for Node {
    fn to_tree_string(&self) -> Tree<String> {
        build_tree(self, "")
    }
}

impl TreeRender for Swarm {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        match self.root_node() {
            Some(root) => root.to_tree_string(),
            None => Tree::new("(empty swarm)".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{KeyRange, Robot, RobotType};

    #[test]
    fn given_empty_swarm_when_rendering_then_shows_placeholder() {
        let swarm = Swarm::new();
        assert_eq!(swarm.to_tree_string().to_string().trim_end(), "(empty swarm)");
    }

    #[test]
    fn given_three_robots_when_rendering_then_children_are_tagged() {
        let mut swarm = Swarm::with_range(KeyRange::new(0, 100).unwrap());
        for id in [20, 10, 30] {
            swarm.insert(Robot::new(id, RobotType::Bird));
        }
        let rendered = swarm.to_tree_string().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "20:1");
        assert!(lines[1].ends_with("L 10:0"));
        assert!(lines[2].ends_with("R 30:0"));
    }

    #[test]
    fn given_only_right_child_when_rendering_then_left_is_omitted() {
        let mut swarm = Swarm::with_range(KeyRange::new(0, 100).unwrap());
        swarm.insert(Robot::new(1, RobotType::Bird));
        swarm.insert(Robot::new(2, RobotType::Bird));
        let rendered = swarm.to_tree_string().to_string();
        assert_eq!(rendered.lines().count(), 2);
        assert!(rendered.contains("R 2:0"));
    }
}
