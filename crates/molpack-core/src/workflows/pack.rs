use crate::core::io::packmol::PackmolInput;
use crate::core::models::packing_box::PackingBox;
use crate::core::models::structure::{Structure, StructureCounts};
use crate::engine::config::RunConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::runner::PackmolRunner;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// The molecular side of a packing job: what to pack, how many, and where.
#[derive(Debug, Clone, PartialEq)]
pub struct PackRequest {
    pub structures: Vec<Structure>,
    pub counts: StructureCounts,
    pub packing_box: PackingBox,
}

impl PackRequest {
    pub fn new(structures: Vec<Structure>, counts: StructureCounts, packing_box: PackingBox) -> Self {
        Self {
            structures,
            counts,
            packing_box,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PackResult {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub log_path: PathBuf,
    /// Whether Packmol left a file at the configured output path.
    pub output_exists: bool,
}

/// Writes the Packmol input deck for `request` to the configured input path.
///
/// Returns the path that was written.
pub fn write_input(request: &PackRequest, config: &RunConfig) -> Result<PathBuf, EngineError> {
    let input_path = config.input_path();
    let output_path = config.output_path();

    PackmolInput::new(
        &request.structures,
        &request.counts,
        &request.packing_box,
        &output_path,
    )
    .tolerance(config.tolerance)
    .seed(config.seed)
    .filetype(config.filetype)
    .write_to_path(&input_path)?;

    info!(
        "Wrote Packmol input for {} structure(s) to {:?}",
        request.structures.len(),
        input_path
    );
    Ok(input_path)
}

/// Writes the input deck and runs Packmol on it.
///
/// The deck is always written before the process is launched. A failed run leaves the
/// deck in place and writes no log.
#[instrument(skip_all, name = "packing_workflow")]
pub fn run(
    request: &PackRequest,
    config: &RunConfig,
    reporter: &ProgressReporter,
) -> Result<PackResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Writing Packmol input",
    });
    let input_path = write_input(request, config)?;
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Running Packmol",
    });
    let output = PackmolRunner::new(config).run()?;
    reporter.report(Progress::PhaseFinish);

    let output_path = config.output_path();
    let output_exists = output_path.exists();
    if !output_exists {
        warn!(
            "Packmol exited successfully but no output was found at {:?}",
            output_path
        );
        reporter.report(Progress::Message(format!(
            "Packmol produced no file at {}",
            output_path.display()
        )));
    }

    Ok(PackResult {
        input_path,
        output_path,
        log_path: output.log_path,
        output_exists,
    })
}
