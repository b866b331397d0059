//! Shared plumbing for the shop workspace: logging setup, startup
//! environment checks and small wire types used by more than one crate.

pub mod types;
pub mod utils;
pub mod env;
