//! Core data model for mvnship.
//!
//! This crate defines what a publish run is made of: goals and target
//! addressing, the project's package manifest, the layered `Mvnship.toml`
//! configuration, artifact naming, option resolution, and release planning.
//!
//! This crate is intentionally free of subprocess and archive I/O.

pub mod config;
pub mod goal;
pub mod manifest;
pub mod naming;
pub mod options;
pub mod properties;
pub mod release;
