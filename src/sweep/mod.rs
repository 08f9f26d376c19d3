pub mod config;
pub mod grid;
pub mod types;

pub use grid::{sweep, sweep_many};
