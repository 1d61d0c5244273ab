//! Pieces shared by the counter and album services: wire types and logging setup.

pub mod types;
pub mod utils;
