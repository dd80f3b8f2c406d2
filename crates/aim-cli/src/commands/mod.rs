//! CLI command implementations.

pub mod common;
pub mod maxcut;
pub mod random_qubo;
pub mod result;
pub mod status;
pub mod wait;
pub mod workspaces;
