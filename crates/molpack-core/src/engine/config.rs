pub use crate::core::io::packmol::{DEFAULT_SEED, DEFAULT_TOLERANCE, FileType};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_INPUT_FILE: &str = "packmol.inp";
pub const DEFAULT_OUTPUT_FILE: &str = "output.xyz";
pub const DEFAULT_LOG_FILE: &str = "packmol.stdout";
/// Executable name, resolved through the process search path.
pub const DEFAULT_EXECUTABLE: &str = "packmol";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Settings for a single Packmol invocation.
///
/// A `RunConfig` is built once by the caller and passed by reference to the input
/// builder and the process runner; it is never mutated afterwards. File names are
/// relative to `workdir`, and the accessor methods return the joined paths.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub workdir: PathBuf,
    pub tolerance: f64,
    pub seed: i64,
    pub filetype: FileType,
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub log_file: PathBuf,
    pub executable: PathBuf,
}

impl RunConfig {
    /// Creates a configuration rooted at `workdir` with every other field at its default.
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            tolerance: DEFAULT_TOLERANCE,
            seed: DEFAULT_SEED,
            filetype: FileType::default(),
            input_file: PathBuf::from(DEFAULT_INPUT_FILE),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            executable: PathBuf::from(DEFAULT_EXECUTABLE),
        }
    }

    pub fn input_path(&self) -> PathBuf {
        self.workdir.join(&self.input_file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.workdir.join(&self.output_file)
    }

    pub fn log_path(&self) -> PathBuf {
        self.workdir.join(&self.log_file)
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

#[derive(Default)]
pub struct RunConfigBuilder {
    workdir: Option<PathBuf>,
    tolerance: Option<f64>,
    seed: Option<i64>,
    filetype: Option<FileType>,
    input_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
    log_file: Option<PathBuf>,
    executable: Option<PathBuf>,
}

impl RunConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn workdir(mut self, path: PathBuf) -> Self {
        self.workdir = Some(path);
        self
    }
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }
    pub fn seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn filetype(mut self, filetype: FileType) -> Self {
        self.filetype = Some(filetype);
        self
    }
    pub fn input_file(mut self, path: PathBuf) -> Self {
        self.input_file = Some(path);
        self
    }
    pub fn output_file(mut self, path: PathBuf) -> Self {
        self.output_file = Some(path);
        self
    }
    pub fn log_file(mut self, path: PathBuf) -> Self {
        self.log_file = Some(path);
        self
    }
    pub fn executable(mut self, path: PathBuf) -> Self {
        self.executable = Some(path);
        self
    }

    /// Builds the configuration. Only the working directory is mandatory.
    pub fn build(self) -> Result<RunConfig, ConfigError> {
        let workdir = self
            .workdir
            .ok_or(ConfigError::MissingParameter("workdir"))?;
        let defaults = RunConfig::new(workdir);
        Ok(RunConfig {
            tolerance: self.tolerance.unwrap_or(defaults.tolerance),
            seed: self.seed.unwrap_or(defaults.seed),
            filetype: self.filetype.unwrap_or(defaults.filetype),
            input_file: self.input_file.unwrap_or(defaults.input_file),
            output_file: self.output_file.unwrap_or(defaults.output_file),
            log_file: self.log_file.unwrap_or(defaults.log_file),
            executable: self.executable.unwrap_or(defaults.executable),
            workdir: defaults.workdir,
        })
    }
}
