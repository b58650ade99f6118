//! Subcommand handlers

pub mod artifacts;
pub mod audio;
pub mod dataset;
pub mod live;
pub mod models;
pub mod segment;
pub mod survey;
pub mod windows;
