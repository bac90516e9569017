//! Provides input/output functionality for the Packmol input format.
//!
//! Packmol reads a plain-text, line-oriented deck on its standard input. This module
//! validates every interpolated field and renders the deck in one pass so that a
//! failed validation never leaves a half-written file on disk.

pub mod packmol;
