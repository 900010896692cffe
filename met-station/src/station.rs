use crate::error::StationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Directory (relative to the working directory) holding one CSV per station.
pub const DATA_DIR: &str = "daily";

/// Station codes offered by the two station selectors.
pub const STATION_OPTIONS: [&str; 6] = ["SEA", "PDX", "SFO", "LAX", "BHM", "ATL"];

/// Initial value of the first station selector.
pub const DEFAULT_STATION1: &str = "SEA";

/// Initial value of the second station selector.
pub const DEFAULT_STATION2: &str = "PDX";

/// Name of the measurement column used for the scatter, line and histogram plots.
pub const PRECIP_FIELD: &str = "Precip";

/// Longest station code accepted.
const MAX_STATION_LEN: usize = 8;

/// A weather station code such as `SEA`.
///
/// Codes are stored uppercased; membership in [`STATION_OPTIONS`] is not
/// required, only that a backing file exists when the station is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationId(String);

impl StationId {
    pub fn new(code: &str) -> Result<StationId, StationError> {
        let code = code.trim().to_uppercase();
        let valid = !code.is_empty()
            && code.len() <= MAX_STATION_LEN
            && code.chars().all(|c| c.is_ascii_alphanumeric());
        if valid {
            Ok(StationId(code))
        } else {
            Err(StationError::InvalidStation(code))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File holding this station's daily series, e.g. `KSEA.csv`.
    pub fn file_name(&self) -> String {
        format!("K{}.csv", self.0)
    }

    /// Column name for a field of this station once loaded, e.g. `SEA_Precip`.
    pub fn column(&self, field: &str) -> String {
        format!("{}_{}", self.0, field)
    }

    pub fn precip_column(&self) -> String {
        self.column(PRECIP_FIELD)
    }

    /// Station code encoded in a data file name, if the name is exactly
    /// `K<ID>.csv` with an uppercase id, so that [`file_name`](Self::file_name)
    /// maps the id back to the same file.
    pub fn from_file_name(file_name: &str) -> Option<StationId> {
        let stem = file_name.strip_suffix(".csv")?;
        let code = stem.strip_prefix('K')?;
        StationId::new(code).ok().filter(|id| id.as_str() == code)
    }

    /// The fixed selector options as station ids.
    pub fn options() -> Vec<StationId> {
        STATION_OPTIONS
            .iter()
            .map(|code| StationId(code.to_string()))
            .collect()
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for StationId {
    type Err = StationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StationId::new(s)
    }
}

impl TryFrom<String> for StationId {
    type Error = StationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StationId::new(&value)
    }
}

impl From<StationId> for String {
    fn from(value: StationId) -> Self {
        value.0
    }
}

impl AsRef<str> for StationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
