use super::ModelError;
use serde::Deserialize;
use std::fmt;

/// An axis-aligned box given as `xmin ymin zmin xmax ymax zmax`, in Angstroms.
///
/// The six bounds are kept exactly as supplied and emitted verbatim on Packmol's
/// `inside box` line. No ordering check is made between the minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct PackingBox {
    bounds: [f64; 6],
}

impl PackingBox {
    pub fn new(bounds: [f64; 6]) -> Self {
        Self { bounds }
    }

    /// Builds a box from a slice of exactly six values.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::BoxLength`] when the slice does not hold six values.
    pub fn from_slice(values: &[f64]) -> Result<Self, ModelError> {
        let bounds: [f64; 6] = values
            .try_into()
            .map_err(|_| ModelError::BoxLength(values.len()))?;
        Ok(Self { bounds })
    }

    pub fn bounds(&self) -> &[f64; 6] {
        &self.bounds
    }

    pub fn min_corner(&self) -> [f64; 3] {
        [self.bounds[0], self.bounds[1], self.bounds[2]]
    }

    pub fn max_corner(&self) -> [f64; 3] {
        [self.bounds[3], self.bounds[4], self.bounds[5]]
    }

    /// Returns `true` if any maximum bound is not strictly greater than its minimum.
    pub fn is_degenerate(&self) -> bool {
        self.min_corner()
            .iter()
            .zip(self.max_corner().iter())
            .any(|(lo, hi)| hi <= lo)
    }
}

impl TryFrom<Vec<f64>> for PackingBox {
    type Error = ModelError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_slice(&values)
    }
}

impl fmt::Display for PackingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for value in &self.bounds {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{}", value)?;
            first = false;
        }
        Ok(())
    }
}
