//! I/O helpers for scaffolding commands.

pub mod answers;
pub mod config;
pub mod finalize;
pub mod installer;
pub mod materialize;
pub mod process;
pub mod render;
pub mod templates;
