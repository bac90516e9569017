use crate::error::{CliError, Result};
use molpack::core::models::packing_box::PackingBox;
use molpack::engine::config::FileType;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FilePackingConfig {
    pub tolerance: Option<f64>,
    pub seed: Option<i64>,
    pub filetype: Option<FileType>,
    #[serde(rename = "box")]
    pub packing_box: Option<PackingBox>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileNamesConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub log: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileExecutableConfig {
    pub path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileStructure {
    pub name: String,
    pub file: PathBuf,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub workdir: Option<PathBuf>,
    pub packing: Option<FilePackingConfig>,
    pub files: Option<FileNamesConfig>,
    pub executable: Option<FileExecutableConfig>,
    #[serde(default)]
    pub structures: Vec<FileStructure>,
    #[serde(default)]
    pub counts: BTreeMap<String, u32>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
