use crate::cli::PackArgs;
use crate::config::builder::build_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use molpack::engine::progress::ProgressReporter;
use molpack::workflows::pack;
use tracing::{info, warn};

pub fn run(args: PackArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app = build_config(&args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Packing {} structure(s) with {}...",
        app.request.structures.len(),
        app.run_config.executable().display()
    );
    info!("Invoking the packing workflow...");

    let result = pack::run(&app.request, &app.run_config, &reporter)?;

    println!("✓ Input written to: {}", result.input_path.display());
    println!("✓ Packmol log written to: {}", result.log_path.display());
    if result.output_exists {
        println!("✓ Packed system written to: {}", result.output_path.display());
    } else {
        warn!("Packmol reported success but {:?} is missing.", result.output_path);
        println!(
            "Warning: Packmol finished but no output was found at {}",
            result.output_path.display()
        );
    }

    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::error::CliError;
    use molpack::engine::error::EngineError;
    use serial_test::serial;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    fn fake_packmol(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-packmol");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn args_with(dir: &Path, packmol: PathBuf) -> PackArgs {
        PackArgs {
            config: None,
            workdir: Some(dir.to_path_buf()),
            structures: vec!["EMC=EMC.xyz".to_string()],
            counts: vec!["EMC=2".to_string()],
            packing_box: Some(vec![0.0, 0.0, 0.0, 10.0, 10.0, 10.0]),
            tolerance: None,
            seed: None,
            filetype: None,
            packmol: Some(packmol),
            set_values: vec![],
        }
    }

    #[test]
    #[serial(process)]
    fn pack_writes_deck_and_log() {
        let dir = tempdir().unwrap();
        let script = fake_packmol(dir.path(), "grep '^seed' -");

        run(args_with(dir.path(), script)).unwrap();

        assert!(dir.path().join("packmol.inp").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("packmol.stdout")).unwrap(),
            "seed 123\n"
        );
    }

    #[test]
    #[serial(process)]
    fn pack_surfaces_packmol_failure() {
        let dir = tempdir().unwrap();
        let script = fake_packmol(dir.path(), "echo 'ERROR: bad box' >&2\nexit 171");

        let err = run(args_with(dir.path(), script)).unwrap_err();

        match err {
            CliError::Core(EngineError::ProcessFailed { code, stderr }) => {
                assert_eq!(code, Some(171));
                assert!(stderr.contains("ERROR: bad box"));
            }
            other => panic!("expected process failure, got {:?}", other),
        }
        assert!(!dir.path().join("packmol.stdout").exists());
    }
}
