//! MET CLI - Command line tool for comparing daily station precipitation.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "met-cli",
    version,
    about = "Daily weather station precipitation comparison toolkit"
)]
struct Cli {
    /// Directory holding one K<STATION>.csv file per station
    #[arg(short = 'd', long, global = true, default_value = met_cmd::DATA_DIR)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: met_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Using data directory {}", cli.data_dir.display());
    met_cmd::run(cli.command, &cli.data_dir)
}
