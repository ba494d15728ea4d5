//! Rubric document and survey construction toolkit.
//!
//! This crate models learning-outcome rubrics (a criterion/indicator tree with
//! per-level descriptors) and the selection workflow that turns a rubric into
//! a survey. The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure logic (path parsing, resolution, selection editing,
//!   structure edits, validation). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (document and survey stores,
//!   configuration, rendering). Isolated to keep the core deterministic.
//!
//! [`document`] and [`survey`] hold the serde wire types shared by both
//! layers.

pub mod core;
pub mod document;
pub mod io;
pub mod logging;
pub mod survey;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
