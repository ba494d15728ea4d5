//! Deterministic, pure logic shared across the crate.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data structures and, apart from stable-id generation in the builder,
//! return deterministic outputs suitable for tests.

pub mod builder;
pub mod index;
pub mod invariants;
pub mod path;
pub mod resolve;
pub mod selection;
