//! CLI command implementations.

pub mod export;
pub mod generate;
pub mod input;
pub mod show;
pub mod view;
