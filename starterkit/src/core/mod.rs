//! Deterministic, pure logic shared by the scaffolder.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! values and return deterministic outputs suitable for tests.

pub mod resolver;
pub mod rules;
pub mod slug;
pub mod transform;
pub mod types;
