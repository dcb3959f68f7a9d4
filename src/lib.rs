//! # swarm
//!
//! A registry of robots kept in a self-balancing (AVL) binary search tree.
//!
//! Robots are keyed by a unique id that must fall into a configured
//! [`domain::KeyRange`]. Insertions outside the range and duplicate ids are
//! rejected without touching the tree; every insertion and removal rebalances
//! bottom-up along the search path.
//!
//! ```
//! use swarm::domain::{InsertOutcome, KeyRange, Robot, RobotState, RobotType, Swarm};
//!
//! let mut swarm = Swarm::with_range(KeyRange::new(0, 100).unwrap());
//! for id in [50, 30, 70] {
//!     swarm.insert(Robot::new(id, RobotType::Drone));
//! }
//! assert_eq!(swarm.insert(Robot::new(150, RobotType::Bird)), InsertOutcome::OutOfRange);
//!
//! swarm.set_state(30, RobotState::Dead);
//! assert_eq!(swarm.remove_dead(), 1);
//! assert_eq!(swarm.dump(), "(50:1(70:0))");
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;
