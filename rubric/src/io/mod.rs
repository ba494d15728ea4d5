//! I/O helpers for rubric commands.

pub mod config;
pub mod document_store;
pub mod render;
pub mod survey_store;
