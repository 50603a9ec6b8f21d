//! oiseau-release - CLI entry point.

use anyhow::{Context, Result};
use tracing::info;

use oiseau_release::cli::Cli;
use oiseau_release::logging;
use oiseau_release::release::run_release;

fn main() -> Result<()> {
    let cli = Cli::parse_args(std::env::args_os());
    logging::init(cli.verbose);

    let dry_run = cli.dry_run;
    let config = cli.into_config().context("Input error")?;

    let report = run_release(&config).context("Failed to update version information")?;

    if dry_run {
        println!();
        println!("Dry run complete. No changes made.");
        return Ok(());
    }

    info!(
        "Version update process completed successfully ({} secondary file(s) updated).",
        report.updated_files().count()
    );

    Ok(())
}
