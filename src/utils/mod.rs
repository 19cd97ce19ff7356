//! Utility modules shared by the wrap and publish commands.

pub mod exec;
pub mod format;
pub mod fs;
