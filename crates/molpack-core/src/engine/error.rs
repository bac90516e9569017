use crate::core::io::packmol::InputError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to launch '{program}': {source}", program = .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Packmol failed with {} and stderr: {stderr}", describe_exit(.code))]
    ProcessFailed { code: Option<i32>, stderr: String },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("error code {}", code),
        None => "termination by signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_failure_message_carries_code_and_stderr() {
        let err = EngineError::ProcessFailed {
            code: Some(173),
            stderr: "ERROR: Could not open file.".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("173"));
        assert!(msg.contains("ERROR: Could not open file."));
    }

    #[test]
    fn process_failure_without_code_mentions_signal() {
        let err = EngineError::ProcessFailed {
            code: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("signal"));
    }

    #[test]
    fn input_errors_are_transparent() {
        let err: EngineError = InputError::MissingCount {
            name: "EMC".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "No count given for structure 'EMC'");
    }
}
