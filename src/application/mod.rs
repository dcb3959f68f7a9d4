//! Application layer: drives a swarm from line-oriented scripts
//!
//! This layer orchestrates domain logic; file access stays at its edge.

pub mod error;
pub mod error_ext;
pub mod script;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use script::{load_script, parse_script, Command, ScriptRunner};
