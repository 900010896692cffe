//! Command implementations for MET CLI.
//!
//! Provides subcommands for listing stations, describing a joined station
//! pair, and printing the applet's view description as JSON.

use clap::Subcommand;
use met_data::Selection;
use met_station::station::{DEFAULT_STATION1, DEFAULT_STATION2};
use met_station::{DailyDirectory, StationId};
use std::path::{Path, PathBuf};

pub mod stations;
pub mod summary;

pub use met_station::station::DATA_DIR;

#[derive(Subcommand)]
pub enum Command {
    /// List stations that have a data file in the data directory
    Stations,

    /// Print descriptive statistics for a joined station pair
    Describe {
        /// First station code
        #[arg(long, default_value = DEFAULT_STATION1)]
        station1: StationId,

        /// Second station code
        #[arg(long, default_value = DEFAULT_STATION2)]
        station2: StationId,

        /// Rows to summarize: "all", or positions like "0,3,7-9"
        #[arg(short = 'r', long, default_value = "all")]
        rows: Selection,
    },

    /// Print the view description (plots, statistics, layout) as JSON
    View {
        /// First station code
        #[arg(long, default_value = DEFAULT_STATION1)]
        station1: StationId,

        /// Second station code
        #[arg(long, default_value = DEFAULT_STATION2)]
        station2: StationId,

        /// Rows selected: "all", or positions like "0,3,7-9"
        #[arg(short = 'r', long, default_value = "all")]
        rows: Selection,

        /// JSON-lines file of events applied after the initial state
        #[arg(short = 'e', long)]
        events: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

pub fn run(command: Command, data_dir: &Path) -> anyhow::Result<()> {
    let daily = DailyDirectory::new(data_dir);
    match command {
        Command::Stations => {
            for station in stations::list_stations(&daily)? {
                println!("{}", station);
            }
            Ok(())
        }
        Command::Describe {
            station1,
            station2,
            rows,
        } => {
            let text = summary::describe_pair(daily, station1, station2, rows)?;
            println!("{}", text);
            Ok(())
        }
        Command::View {
            station1,
            station2,
            rows,
            events,
            pretty,
        } => {
            let view = summary::view_pair(daily, station1, station2, rows, events.as_deref())?;
            println!("{}", view.to_json(pretty)?);
            Ok(())
        }
    }
}
