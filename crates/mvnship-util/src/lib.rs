//! Shared utilities for mvnship.
//!
//! This crate provides cross-cutting concerns used by all other mvnship crates:
//! the unified error type, filesystem helpers (including glob-based file
//! walking), process spawning, and terminal progress indicators.

pub mod errors;
pub mod fs;
pub mod process;
pub mod progress;
