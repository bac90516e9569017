use molpack::engine::config::{self as core_config, FileType};
use std::path::PathBuf;

pub struct DefaultsConfig {
    pub workdir: PathBuf,
    pub tolerance: f64,
    pub seed: i64,
    pub filetype: FileType,
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub log_file: PathBuf,
    pub executable: PathBuf,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            workdir: PathBuf::from("."),
            tolerance: core_config::DEFAULT_TOLERANCE,
            seed: core_config::DEFAULT_SEED,
            filetype: FileType::default(),
            input_file: PathBuf::from(core_config::DEFAULT_INPUT_FILE),
            output_file: PathBuf::from(core_config::DEFAULT_OUTPUT_FILE),
            log_file: PathBuf::from(core_config::DEFAULT_LOG_FILE),
            executable: PathBuf::from(core_config::DEFAULT_EXECUTABLE),
        }
    }
}
