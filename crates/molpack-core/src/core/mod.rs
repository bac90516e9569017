//! # Core Module
//!
//! Stateless building blocks shared by the engine and the workflows.
//!
//! - **Molecular Inputs** ([`models`]) - Structure descriptors, per-structure counts and
//!   the packing region
//! - **File I/O** ([`io`]) - Serialization of the Packmol input grammar

pub mod io;
pub mod models;
