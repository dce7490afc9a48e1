use clap::Parser;
use papercopy::commands::{run, RunOptions};
use papercopy::config::Cli;
use papercopy::ui::{format_error_summary, format_summary};
use papercopy::{logging, Config};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    // Fatal: bad usage, unreadable config, corrupt history
    let config_path = cli.config_file()?;
    let config = Config::load(config_path)?;
    info!(version = papercopy::VERSION, config = %config_path.display(), "papercopy");

    let options = RunOptions {
        dry_run: cli.dry_run,
    };
    let report = run(&config, &options)?;

    println!("{}", format_summary(&report, options.dry_run));
    if !report.error_records.is_empty() {
        println!("{}", format_error_summary(&report.error_records));
    }

    Ok(())
}
