//! Command-line interface module.

mod args;
pub mod build;
pub mod list;
mod pages;
pub mod render;
pub mod serve;

pub use args::{BuildArgs, Cli, Commands};
