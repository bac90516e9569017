use crate::core::models::packing_box::PackingBox;
use crate::core::models::structure::{Structure, StructureCounts};
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

/// Minimum distance between packed structures, in Angstroms.
///
/// Written as `tolerance 2.0`; integral tolerances always keep one decimal place.
pub const DEFAULT_TOLERANCE: f64 = 2.0;
/// Seed handed to Packmol's random placement.
pub const DEFAULT_SEED: i64 = 123;

const GENERATOR_COMMENT: &str = "# Packmol input generated by molpack.";

#[derive(Debug, Error)]
pub enum InputError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("No count given for structure '{name}'")]
    MissingCount { name: String },
    #[error("Invalid {field} '{value}': {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
    #[error("At least one structure is required to build a Packmol input")]
    NoStructures,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Unknown Packmol file type '{0}'. Expected one of: xyz, pdb, tinker, moldy")]
pub struct ParseFileTypeError(String);

/// Coordinate file formats understood by Packmol's `filetype` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum FileType {
    #[default]
    Xyz,
    Pdb,
    Tinker,
    Moldy,
}

impl FileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Xyz => "xyz",
            FileType::Pdb => "pdb",
            FileType::Tinker => "tinker",
            FileType::Moldy => "moldy",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for FileType {
    type Error = ParseFileTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for FileType {
    type Err = ParseFileTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xyz" => Ok(FileType::Xyz),
            "pdb" => Ok(FileType::Pdb),
            "tinker" => Ok(FileType::Tinker),
            "moldy" => Ok(FileType::Moldy),
            _ => Err(ParseFileTypeError(s.to_string())),
        }
    }
}

/// A Packmol input deck ready to be rendered.
///
/// The deck borrows the caller's molecular inputs; rendering validates every field
/// first and only then produces text, so a missing count or an unsafe token never
/// results in a partially written file.
#[derive(Debug, Clone)]
pub struct PackmolInput<'a> {
    structures: &'a [Structure],
    counts: &'a StructureCounts,
    packing_box: &'a PackingBox,
    output_path: &'a Path,
    tolerance: f64,
    seed: i64,
    filetype: FileType,
}

impl<'a> PackmolInput<'a> {
    /// Creates a deck with the default tolerance, seed and file type.
    ///
    /// # Arguments
    ///
    /// * `structures` - Structure descriptors, emitted in this order.
    /// * `counts` - Copies per structure name; every descriptor must have an entry.
    /// * `packing_box` - Region every structure is packed inside.
    /// * `output_path` - Where Packmol writes the packed coordinates.
    pub fn new(
        structures: &'a [Structure],
        counts: &'a StructureCounts,
        packing_box: &'a PackingBox,
        output_path: &'a Path,
    ) -> Self {
        Self {
            structures,
            counts,
            packing_box,
            output_path,
            tolerance: DEFAULT_TOLERANCE,
            seed: DEFAULT_SEED,
            filetype: FileType::default(),
        }
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    pub fn filetype(mut self, filetype: FileType) -> Self {
        self.filetype = filetype;
        self
    }

    /// Validates every field and renders the complete deck.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::MissingCount`] if a structure name has no count,
    /// [`InputError::InvalidField`] for a field that would corrupt the grammar, and
    /// [`InputError::NoStructures`] for an empty structure list.
    pub fn render(&self) -> Result<String, InputError> {
        if self.structures.is_empty() {
            return Err(InputError::NoStructures);
        }
        validate_number("tolerance", self.tolerance)?;
        for value in self.packing_box.bounds() {
            validate_number("box bound", *value)?;
        }
        if self.packing_box.is_degenerate() {
            warn!(
                "Packing box '{}' has a maximum bound not above its minimum.",
                self.packing_box
            );
        }
        let output = path_token("output path", self.output_path)?;

        let mut entries = Vec::with_capacity(self.structures.len());
        for structure in self.structures {
            let name = validate_token("structure name", structure.name())?;
            let count = self
                .counts
                .get(name)
                .ok_or_else(|| InputError::MissingCount {
                    name: name.to_string(),
                })?;
            let file = path_token("structure file", structure.file())?;
            entries.push((name, count.get(), file));
        }
        for (name, _) in self.counts.iter() {
            if !self.structures.iter().any(|s| s.name() == name) {
                debug!("Count given for '{}' but no such structure; ignoring.", name);
            }
        }

        let summary = entries
            .iter()
            .map(|(name, count, _)| format!("{} {}", count, name))
            .collect::<Vec<_>>()
            .join(" + ");

        let mut deck = String::new();
        deck.push_str(&format!("# {}\n", summary));
        deck.push_str(GENERATOR_COMMENT);
        deck.push('\n');
        deck.push_str(&format!("seed {}\n", self.seed));
        deck.push_str(&format!("tolerance {}\n\n", format_tolerance(self.tolerance)));
        deck.push_str(&format!("filetype {}\n\n", self.filetype));

        for (_, count, file) in &entries {
            deck.push_str(&format!("structure {}\n", file));
            deck.push_str(&format!("  number {}\n", count));
            deck.push_str(&format!("  inside box {}\n", self.packing_box));
            deck.push_str("end structure\n\n");
        }
        deck.push_str(&format!("output {}\n\n", output));

        Ok(deck)
    }

    pub fn write_to(&self, writer: &mut impl Write) -> Result<(), InputError> {
        let deck = self.render()?;
        writer.write_all(deck.as_bytes())?;
        Ok(())
    }

    /// Renders the deck and writes it to `path`, overwriting any existing file.
    ///
    /// The file is created only after rendering succeeds.
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), InputError> {
        let deck = self.render()?;
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(deck.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

fn validate_number(field: &'static str, value: f64) -> Result<(), InputError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InputError::InvalidField {
            field,
            value: value.to_string(),
            reason: "must be a finite number",
        })
    }
}

fn format_tolerance(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

// Packmol splits lines on whitespace and treats '#' as the start of a comment.
fn validate_token<'s>(field: &'static str, value: &'s str) -> Result<&'s str, InputError> {
    let reason = if value.is_empty() {
        Some("must not be empty")
    } else if value.chars().any(char::is_whitespace) {
        Some("must not contain whitespace")
    } else if value.chars().any(char::is_control) {
        Some("must not contain control characters")
    } else if value.contains('#') {
        Some("must not contain '#'")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(InputError::InvalidField {
            field,
            value: value.to_string(),
            reason,
        }),
        None => Ok(value),
    }
}

fn path_token<'p>(field: &'static str, path: &'p Path) -> Result<&'p str, InputError> {
    let text = path.to_str().ok_or_else(|| InputError::InvalidField {
        field,
        value: path.display().to_string(),
        reason: "must be valid UTF-8",
    })?;
    validate_token(field, text)
}
