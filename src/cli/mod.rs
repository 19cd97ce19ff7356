//! Command-line interface module.

mod args;
pub mod publish;
pub mod wrap;

pub use args::{Cli, Commands, PublishArgs, WrapArgs};
