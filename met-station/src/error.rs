use met_utils::error::DateError;
use std::fmt;
use std::path::PathBuf;

/// Errors that can occur when identifying or loading a station series.
#[derive(Debug)]
pub enum StationError {
    /// The code is empty, too long or not alphanumeric.
    InvalidStation(String),
    /// No `K<STATION>.csv` exists for the requested station.
    MissingSource { station: String, path: PathBuf },
    Io { path: PathBuf, source: std::io::Error },
    Csv { station: String, source: csv::Error },
    /// The file has no header row to take a date column from.
    MissingDateColumn { station: String },
    Date {
        station: String,
        line: u64,
        source: DateError,
    },
}

impl StationError {
    pub fn is_missing_source(&self) -> bool {
        matches!(self, StationError::MissingSource { .. })
    }
}

impl fmt::Display for StationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationError::InvalidStation(code) => write!(f, "invalid station code '{}'", code),
            StationError::MissingSource { station, path } => write!(
                f,
                "no data for station {} ({} not found)",
                station,
                path.display()
            ),
            StationError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            StationError::Csv { station, source } => {
                write!(f, "malformed CSV for station {}: {}", station, source)
            }
            StationError::MissingDateColumn { station } => {
                write!(f, "station {} file has no columns", station)
            }
            StationError::Date {
                station,
                line,
                source,
            } => write!(f, "station {} line {}: {}", station, line, source),
        }
    }
}

impl std::error::Error for StationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StationError::Io { source, .. } => Some(source),
            StationError::Csv { source, .. } => Some(source),
            StationError::Date { source, .. } => Some(source),
            _ => None,
        }
    }
}
