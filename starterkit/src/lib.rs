//! Project scaffolder for Polymer Starter Kit Plus.
//!
//! A short interview produces an answers record; the answers resolve into an
//! immutable [`core::types::Context`]; a fixed rule table then copies, renders and
//! rewrites files from the bundled template tree into a destination directory.
//!
//! - **[`core`]**: Pure, deterministic logic (name normalization, context
//!   resolution, the rule table and content transforms). No I/O.
//! - **[`io`]**: Side-effecting operations (answer collection, rendering, file
//!   copies, cleanup, installer processes).
//!
//! Orchestration modules ([`generate`], [`plan`]) tie the two together for the
//! CLI.

pub mod core;
pub mod exit_codes;
pub mod generate;
pub mod io;
pub mod logging;
pub mod plan;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
