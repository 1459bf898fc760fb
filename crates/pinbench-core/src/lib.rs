pub mod config;
pub mod grid;
pub mod output;
pub mod placement;
pub mod sweep;
