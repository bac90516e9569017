use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileStructure};
use super::models::AppConfig;
use crate::cli::PackArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use molpack::core::models::packing_box::PackingBox;
use molpack::core::models::structure::{Structure, StructureCounts};
use molpack::engine::config::RunConfigBuilder;
use molpack::workflows::pack::PackRequest;
use std::path::PathBuf;
use tracing::debug;

pub fn build_config(args: &PackArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let packing_file = file_config.packing.take().unwrap_or_default();
    let names_file = file_config.files.take().unwrap_or_default();
    let exe_file = file_config.executable.take().unwrap_or_default();

    let workdir = args
        .workdir
        .clone()
        .or(file_config.workdir.take())
        .unwrap_or(defaults.workdir);
    let tolerance = args
        .tolerance
        .or(packing_file.tolerance)
        .unwrap_or(defaults.tolerance);
    let seed = args.seed.or(packing_file.seed).unwrap_or(defaults.seed);
    let filetype = args
        .filetype
        .or(packing_file.filetype)
        .unwrap_or(defaults.filetype);
    let executable = args
        .packmol
        .clone()
        .or(exe_file.path)
        .unwrap_or(defaults.executable);

    let structures = merge_structures(&file_config.structures, &args.structures)?;
    let counts = merge_counts(&file_config, &args.counts)?;
    let packing_box = match &args.packing_box {
        Some(values) => PackingBox::from_slice(values)?,
        None => packing_file.packing_box.ok_or_else(|| {
            CliError::Config(
                "A packing box is required. Use --box or set `packing.box` in the config file."
                    .to_string(),
            )
        })?,
    };

    let run_config = RunConfigBuilder::new()
        .workdir(workdir)
        .tolerance(tolerance)
        .seed(seed)
        .filetype(filetype)
        .input_file(names_file.input.unwrap_or(defaults.input_file))
        .output_file(names_file.output.unwrap_or(defaults.output_file))
        .log_file(names_file.log.unwrap_or(defaults.log_file))
        .executable(executable)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;
    debug!("Resolved run configuration: {:?}", &run_config);

    Ok(AppConfig {
        request: PackRequest::new(structures, counts, packing_box),
        run_config,
    })
}

fn merge_structures(file_val: &[FileStructure], cli_val: &[String]) -> Result<Vec<Structure>> {
    let mut structures: Vec<Structure> = file_val
        .iter()
        .map(|s| Structure::new(s.name.clone(), s.file.clone()))
        .collect();
    for arg in cli_val {
        let (name, file) =
            parser::parse_structure(arg).map_err(|e| CliError::Argument(e.to_string()))?;
        structures.push(Structure::new(name, PathBuf::from(file)));
    }
    if structures.is_empty() {
        return Err(CliError::Config(
            "No structures given. Use --structure NAME=FILE or add [[structures]] to the config file."
                .to_string(),
        ));
    }
    Ok(structures)
}

fn merge_counts(file_config: &FileConfig, cli_val: &[String]) -> Result<StructureCounts> {
    let mut counts = StructureCounts::new();
    for (name, count) in &file_config.counts {
        counts.insert(name.clone(), *count)?;
    }
    for arg in cli_val {
        let (name, count) =
            parser::parse_count(arg).map_err(|e| CliError::Argument(e.to_string()))?;
        counts.insert(name, count)?;
    }
    Ok(counts)
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let parts: Vec<_> = kv_pair.splitn(2, '=').collect();
        if parts.len() != 2 {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        }
        let key = parts[0];
        let value_str = parts[1];

        match key {
            "workdir" => {
                config.workdir = Some(PathBuf::from(value_str));
            }
            "packing.tolerance" => {
                config
                    .packing
                    .get_or_insert_with(Default::default)
                    .tolerance = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid float value for {}: {}", key, value_str))
                })?);
            }
            "packing.seed" => {
                config.packing.get_or_insert_with(Default::default).seed =
                    Some(value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid integer value for {}: {}",
                            key, value_str
                        ))
                    })?);
            }
            "packing.filetype" => {
                config.packing.get_or_insert_with(Default::default).filetype = Some(
                    value_str
                        .parse()
                        .map_err(|e| CliError::Config(format!("Invalid value for {}: {}", key, e)))?,
                );
            }
            "files.input" => {
                config.files.get_or_insert_with(Default::default).input =
                    Some(PathBuf::from(value_str));
            }
            "files.output" => {
                config.files.get_or_insert_with(Default::default).output =
                    Some(PathBuf::from(value_str));
            }
            "files.log" => {
                config.files.get_or_insert_with(Default::default).log =
                    Some(PathBuf::from(value_str));
            }
            "executable.path" => {
                config.executable.get_or_insert_with(Default::default).path =
                    Some(PathBuf::from(value_str));
            }
            _ => {
                if let Some(name) = key.strip_prefix("counts.").filter(|n| !n.is_empty()) {
                    let count = value_str.parse().map_err(|_| {
                        CliError::Config(format!(
                            "Invalid integer value for {}: {}",
                            key, value_str
                        ))
                    })?;
                    config.counts.insert(name.to_string(), count);
                } else {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use molpack::core::models::ModelError;
    use molpack::engine::config::FileType;
    use std::fs;
    use std::num::NonZeroU32;
    use tempfile::tempdir;

    fn base_pack_args() -> PackArgs {
        PackArgs {
            config: None,
            workdir: None,
            structures: vec![],
            counts: vec![],
            packing_box: None,
            tolerance: None,
            seed: None,
            filetype: None,
            packmol: None,
            set_values: vec![],
        }
    }

    fn emc_args() -> PackArgs {
        let mut args = base_pack_args();
        args.structures = vec!["EMC=EMC.xyz".to_string()];
        args.counts = vec!["EMC=2".to_string()];
        args.packing_box = Some(vec![0.0, 0.0, 0.0, 10.0, 10.0, 10.0]);
        args
    }

    fn count_of(counts: &StructureCounts, name: &str) -> Option<u32> {
        counts.get(name).map(NonZeroU32::get)
    }

    #[test]
    fn build_config_from_cli_only_uses_defaults_for_rest() {
        let app = build_config(&emc_args()).expect("build ok");
        let defaults = DefaultsConfig::default();

        assert_eq!(app.request.structures, vec![Structure::new("EMC", "EMC.xyz")]);
        assert_eq!(count_of(&app.request.counts, "EMC"), Some(2));
        assert_eq!(app.request.packing_box.to_string(), "0 0 0 10 10 10");

        let cfg = app.run_config;
        assert_eq!(cfg.workdir, defaults.workdir);
        assert_eq!(cfg.tolerance, defaults.tolerance);
        assert_eq!(cfg.seed, defaults.seed);
        assert_eq!(cfg.filetype, FileType::Xyz);
        assert_eq!(cfg.input_file, defaults.input_file);
        assert_eq!(cfg.output_file, defaults.output_file);
        assert_eq!(cfg.log_file, defaults.log_file);
        assert_eq!(cfg.executable, defaults.executable);
    }

    #[test]
    fn build_config_reads_file_and_merges() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("mix.toml");
        let toml = r#"
            workdir = "electrolyte"

            [packing]
            tolerance = 2.2
            seed = 99
            filetype = "pdb"
            box = [0.0, 0.0, 0.0, 35.0, 35.0, 35.0]

            [files]
            output = "mix.pdb"

            [[structures]]
            name = "EC"
            file = "ec.pdb"

            [[structures]]
            name = "PF6"
            file = "pf6.pdb"

            [counts]
            EC = 150
            PF6 = 8
            "#;
        fs::write(&cfg_path, toml).unwrap();

        let mut args = base_pack_args();
        args.config = Some(cfg_path);

        let app = build_config(&args).expect("build ok");

        let names: Vec<&str> = app.request.structures.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["EC", "PF6"]);
        assert_eq!(count_of(&app.request.counts, "PF6"), Some(8));
        assert_eq!(app.request.packing_box.max_corner(), [35.0, 35.0, 35.0]);

        let cfg = app.run_config;
        assert_eq!(cfg.workdir, PathBuf::from("electrolyte"));
        assert_eq!(cfg.tolerance, 2.2);
        assert_eq!(cfg.seed, 99);
        assert_eq!(cfg.filetype, FileType::Pdb);
        assert_eq!(cfg.output_path(), PathBuf::from("electrolyte/mix.pdb"));
        assert_eq!(cfg.input_path(), PathBuf::from("electrolyte/packmol.inp"));
    }

    #[test]
    fn cli_overrides_file_values() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("mix.toml");
        let toml = r#"
            [packing]
            tolerance = 2.2
            seed = 99
            box = [0.0, 0.0, 0.0, 35.0, 35.0, 35.0]

            [[structures]]
            name = "EC"
            file = "ec.xyz"

            [counts]
            EC = 150
            "#;
        fs::write(&cfg_path, toml).unwrap();

        let mut args = base_pack_args();
        args.config = Some(cfg_path);
        args.tolerance = Some(3.0);
        args.seed = Some(5);
        args.structures = vec!["Li=li.xyz".to_string()];
        args.counts = vec!["EC=60".to_string(), "Li=3".to_string()];
        args.packing_box = Some(vec![0.0, 0.0, 0.0, 20.0, 20.0, 20.0]);
        args.packmol = Some(PathBuf::from("/usr/local/bin/packmol"));

        let app = build_config(&args).expect("build ok");

        let names: Vec<&str> = app.request.structures.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["EC", "Li"]);
        assert_eq!(count_of(&app.request.counts, "EC"), Some(60));
        assert_eq!(count_of(&app.request.counts, "Li"), Some(3));
        assert_eq!(app.request.packing_box.max_corner(), [20.0, 20.0, 20.0]);
        assert_eq!(app.run_config.tolerance, 3.0);
        assert_eq!(app.run_config.seed, 5);
        assert_eq!(
            app.run_config.executable,
            PathBuf::from("/usr/local/bin/packmol")
        );
    }

    #[test]
    fn set_values_override_file_but_not_flags() {
        let mut args = emc_args();
        args.seed = Some(11);
        args.set_values = vec![
            "packing.tolerance=2.75".to_string(),
            "packing.seed=500".to_string(),
            "packing.filetype=tinker".to_string(),
            "files.input=emc.inp".to_string(),
            "files.log=emc.log".to_string(),
            "workdir=runs/emc".to_string(),
            "executable.path=/opt/packmol".to_string(),
            "counts.EMC=9".to_string(),
        ];

        let app = build_config(&args).expect("build ok");
        let cfg = app.run_config;

        assert!((cfg.tolerance - 2.75).abs() < 1e-12);
        assert_eq!(cfg.seed, 11);
        assert_eq!(cfg.filetype, FileType::Tinker);
        assert_eq!(cfg.input_path(), PathBuf::from("runs/emc/emc.inp"));
        assert_eq!(cfg.log_path(), PathBuf::from("runs/emc/emc.log"));
        assert_eq!(cfg.executable, PathBuf::from("/opt/packmol"));
        // --count on the command line wins over counts.EMC from --set.
        assert_eq!(count_of(&app.request.counts, "EMC"), Some(2));
    }

    #[test]
    fn unsupported_or_malformed_set_values_are_rejected() {
        for bad in ["packing.tolerance", "packing.box=1", "packing.seed=abc", "counts.=3"] {
            let mut args = emc_args();
            args.set_values = vec![bad.to_string()];
            assert!(
                matches!(build_config(&args), Err(CliError::Config(_))),
                "expected config error for {}",
                bad
            );
        }
    }

    #[test]
    fn missing_box_is_a_config_error() {
        let mut args = emc_args();
        args.packing_box = None;
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn box_with_wrong_length_is_a_model_error() {
        let mut args = emc_args();
        args.packing_box = Some(vec![0.0, 0.0, 10.0, 10.0]);
        assert!(matches!(
            build_config(&args),
            Err(CliError::Model(ModelError::BoxLength(4)))
        ));
    }

    #[test]
    fn missing_structures_is_a_config_error() {
        let mut args = emc_args();
        args.structures.clear();
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn zero_count_is_a_model_error() {
        let mut args = emc_args();
        args.counts = vec!["EMC=0".to_string()];
        assert!(matches!(
            build_config(&args),
            Err(CliError::Model(ModelError::ZeroCount { .. }))
        ));
    }

    #[test]
    fn malformed_structure_argument_is_rejected() {
        let mut args = emc_args();
        args.structures = vec!["EMC.xyz".to_string()];
        assert!(matches!(build_config(&args), Err(CliError::Argument(_))));
    }

    #[test]
    fn structure_without_count_is_accepted_here_and_caught_when_writing() {
        let mut args = emc_args();
        args.structures.push("DMC=DMC.xyz".to_string());
        let app = build_config(&args).expect("build ok");
        assert!(!app.request.counts.contains("DMC"));
    }
}
