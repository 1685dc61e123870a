//! Stable exit codes for starterkit CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Invalid answers/config, or materialization failed partway through.
pub const INVALID: i32 = 1;
/// The project was generated but the dependency installer failed.
pub const INSTALL_FAILED: i32 = 2;
