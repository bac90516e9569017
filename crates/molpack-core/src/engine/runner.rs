use super::config::RunConfig;
use super::error::EngineError;
use std::fs::{self, File};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::{debug, info, instrument};

/// Captured streams of a successful Packmol run.
///
/// The text fields are lossy decodings; the log file holds the raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    pub stdout: String,
    pub stderr: String,
    pub log_path: PathBuf,
}

/// Runs Packmol with a previously written input deck on its standard input.
///
/// The executable is launched directly from its path with no shell in between, so
/// file names are never reinterpreted. The call blocks until the child exits; there is
/// no timeout and no retry.
pub struct PackmolRunner<'a> {
    config: &'a RunConfig,
}

impl<'a> PackmolRunner<'a> {
    pub fn new(config: &'a RunConfig) -> Self {
        Self { config }
    }

    /// Launches Packmol and waits for it to finish.
    ///
    /// On a zero exit status the captured standard output is written verbatim to the
    /// configured log file, replacing any previous content. On failure nothing is written.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Io`] if the input deck cannot be opened or the log cannot be written.
    /// - [`EngineError::Spawn`] if the executable cannot be started.
    /// - [`EngineError::ProcessFailed`] if Packmol exits unsuccessfully; carries the exit
    ///   code and the captured standard error.
    #[instrument(skip_all, name = "packmol_process")]
    pub fn run(&self) -> Result<RunOutput, EngineError> {
        let input_path = self.config.input_path();
        let program = self.config.executable();

        let stdin = File::open(&input_path)?;
        debug!(
            "Launching {:?} with standard input from {:?}",
            program, input_path
        );

        let output = Command::new(program)
            .stdin(Stdio::from(stdin))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| EngineError::Spawn {
                program: program.to_path_buf(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(EngineError::ProcessFailed {
                code: output.status.code(),
                stderr,
            });
        }

        let log_path = self.config.log_path();
        fs::write(&log_path, &output.stdout)?;
        info!(
            "Packmol finished; {} bytes of output written to {:?}",
            output.stdout.len(),
            log_path
        );
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        Ok(RunOutput {
            stdout,
            stderr,
            log_path,
        })
    }
}
