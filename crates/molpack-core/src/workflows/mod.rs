//! # Workflows Module
//!
//! High-level entry points that tie the input builder and the process runner together.
//!
//! - **Packing Workflow** ([`pack`]) - Write the Packmol input deck, then run Packmol on it.

pub mod pack;
