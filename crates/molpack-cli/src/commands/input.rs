use crate::cli::PackArgs;
use crate::config::builder::build_config;
use crate::error::Result;
use molpack::workflows::pack;
use tracing::info;

pub fn run(args: PackArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app = build_config(&args)?;

    let input_path = pack::write_input(&app.request, &app.run_config)?;

    println!(
        "✓ Packmol input for {} structure(s) written to: {}",
        app.request.structures.len(),
        input_path.display()
    );
    Ok(())
}
