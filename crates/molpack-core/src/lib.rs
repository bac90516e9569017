//! # molpack Core Library
//!
//! Builds input decks for the Packmol molecular packing program and drives Packmol
//! as an external process.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout so that each concern can be tested alone.
//!
//! - **[`core`]: The Foundation.** Immutable data models (`Structure`, `StructureCounts`,
//!   `PackingBox`) and the serializer for Packmol's line-oriented input grammar.
//!
//! - **[`engine`]: The Execution Layer.** Run configuration with documented defaults,
//!   the blocking process runner that feeds the input deck to Packmol and captures its
//!   output, and progress reporting hooks.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `engine` together into a single
//!   "write the deck, run Packmol" procedure for end users of the library.

pub mod core;
pub mod engine;
pub mod workflows;
