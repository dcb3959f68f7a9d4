//! Domain layer: robots and the AVL engine that stores them
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod balance;
pub mod entities;
pub mod error;
pub mod node;
pub mod swarm;

pub use entities::*;
pub use error::DomainError;
pub use node::{find_max, find_min, Link, Node};
pub use swarm::{InsertOutcome, Iter, Swarm};
