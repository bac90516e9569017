//! # Engine Module
//!
//! Executes a Packmol run described by a [`config::RunConfig`].
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Working directory, file names, tolerance and seed,
//!   each with a documented default
//! - **Process Runner** ([`runner`]) - Blocking subprocess invocation and log capture
//! - **Progress Monitoring** ([`progress`]) - Phase events for user feedback
//! - **Error Handling** ([`error`]) - Engine-specific error types and error propagation

pub mod config;
pub mod error;
pub mod progress;
pub mod runner;
