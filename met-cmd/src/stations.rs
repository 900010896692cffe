//! Station discovery for the `stations` subcommand.

use anyhow::Context;
use log::{info, warn};
use met_station::{DailyDirectory, StationId};

/// Stations with a data file in `daily`, or the fixed selector options when
/// the directory holds none.
pub fn list_stations(daily: &DailyDirectory) -> anyhow::Result<Vec<StationId>> {
    let stations = daily.discover().with_context(|| {
        format!(
            "Station data not available in {}; download the daily files first",
            daily.root().display()
        )
    })?;
    if stations.is_empty() {
        warn!("No K<STATION>.csv files found, listing the default options");
        return Ok(StationId::options());
    }
    info!(
        "Found {} stations in {}",
        stations.len(),
        daily.root().display()
    );
    Ok(stations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "met_cmd_stations_{}_{}",
            name,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_list_discovered_stations() {
        let dir = temp_dir("discovered");
        std::fs::write(dir.join("KSFO.csv"), "Date,Precip\n").unwrap();
        std::fs::write(dir.join("KBHM.csv"), "Date,Precip\n").unwrap();
        let stations = list_stations(&DailyDirectory::new(&dir)).unwrap();
        assert_eq!(
            stations,
            vec![StationId::new("BHM").unwrap(), StationId::new("SFO").unwrap()]
        );
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_empty_directory_lists_options() {
        let dir = temp_dir("empty");
        let stations = list_stations(&DailyDirectory::new(&dir)).unwrap();
        assert_eq!(stations, StationId::options());
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = temp_dir("missing").join("nope");
        let err = list_stations(&DailyDirectory::new(&dir)).unwrap_err();
        assert!(err.to_string().contains("Station data not available"));
    }
}
