use super::ModelError;
use std::collections::BTreeMap;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

/// A named reference to a molecular coordinate file.
///
/// Descriptors are supplied by the caller and stay read-only for the whole run.
/// The `name` is the key used to look up how many copies Packmol should place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    name: String,
    file: PathBuf,
}

impl Structure {
    /// Creates a new structure descriptor.
    ///
    /// # Arguments
    ///
    /// * `name` - The identifier used in the count mapping (e.g., "EMC").
    /// * `file` - Path to the coordinate file Packmol reads for this structure.
    pub fn new(name: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

/// Maps structure names to the number of copies Packmol should place.
///
/// Counts are stored as positive integers; zero is rejected on insertion and the
/// textual form is produced only when the input deck is rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructureCounts {
    counts: BTreeMap<String, NonZeroU32>,
}

impl StructureCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the count for `name`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::ZeroCount`] if `count` is zero.
    pub fn insert(&mut self, name: impl Into<String>, count: u32) -> Result<(), ModelError> {
        let name = name.into();
        match NonZeroU32::new(count) {
            Some(count) => {
                self.counts.insert(name, count);
                Ok(())
            }
            None => Err(ModelError::ZeroCount { name }),
        }
    }

    pub fn get(&self, name: &str) -> Option<NonZeroU32> {
        self.counts.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.counts.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, NonZeroU32)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

impl<S: Into<String>> TryFrom<Vec<(S, u32)>> for StructureCounts {
    type Error = ModelError;

    fn try_from(pairs: Vec<(S, u32)>) -> Result<Self, Self::Error> {
        let mut counts = Self::new();
        for (name, count) in pairs {
            counts.insert(name, count)?;
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structure_exposes_name_and_file() {
        let structure = Structure::new("EMC", "inputs/EMC.xyz");
        assert_eq!(structure.name(), "EMC");
        assert_eq!(structure.file(), Path::new("inputs/EMC.xyz"));
    }

    #[test]
    fn insert_accepts_positive_counts() {
        let mut counts = StructureCounts::new();
        counts.insert("EMC", 2).unwrap();
        assert_eq!(counts.get("EMC").map(NonZeroU32::get), Some(2));
        assert!(counts.contains("EMC"));
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn insert_rejects_zero_count() {
        let mut counts = StructureCounts::new();
        let err = counts.insert("Li", 0).unwrap_err();
        assert_eq!(
            err,
            ModelError::ZeroCount {
                name: "Li".to_string()
            }
        );
        assert!(counts.is_empty());
    }

    #[test]
    fn insert_replaces_existing_count() {
        let mut counts = StructureCounts::new();
        counts.insert("EC", 10).unwrap();
        counts.insert("EC", 30).unwrap();
        assert_eq!(counts.get("EC").map(NonZeroU32::get), Some(30));
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn try_from_pairs_stops_at_first_zero() {
        let result = StructureCounts::try_from(vec![("EC", 5), ("PF6", 0)]);
        assert!(matches!(result, Err(ModelError::ZeroCount { name }) if name == "PF6"));
    }

    #[test]
    fn get_returns_none_for_unknown_name() {
        let counts = StructureCounts::try_from(vec![("EC", 5)]).unwrap();
        assert!(counts.get("DMC").is_none());
    }
}
