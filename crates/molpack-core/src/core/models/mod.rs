//! Data models describing what Packmol should pack and where.

pub mod packing_box;
pub mod structure;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ModelError {
    #[error("Count for structure '{name}' must be a positive integer")]
    ZeroCount { name: String },

    #[error("A packing box needs exactly 6 bounds (xmin ymin zmin xmax ymax zmax), got {0}")]
    BoxLength(usize),
}
