//! Station series loading.
//!
//! # CSV Format
//!
//! One file per station, with headers. The `Date` column (or the first
//! column when none is named `Date`) keys each row; every other column is a
//! numeric measurement:
//!
//! ```text
//! Date,Precip,Tmax
//! 2020-01-01,0.1,48
//! 2020-01-02,0.5,51
//! ```

use crate::error::StationError;
use crate::station::{StationId, DATA_DIR};
use crate::table::TimeTable;
use csv::{ReaderBuilder, Trim};
use met_utils::dates::parse_date;
use std::cell::Cell;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};

/// Cell contents read as a missing measurement.
const MISSING_TOKENS: [&str; 7] = ["", "na", "n/a", "nan", "null", "-", "---"];

/// Anything that can produce a station series by id.
pub trait StationSource {
    fn load(&self, station: &StationId) -> Result<TimeTable, StationError>;
}

impl<T: StationSource + ?Sized> StationSource for &T {
    fn load(&self, station: &StationId) -> Result<TimeTable, StationError> {
        (**self).load(station)
    }
}

impl<T: StationSource + ?Sized> StationSource for Box<T> {
    fn load(&self, station: &StationId) -> Result<TimeTable, StationError> {
        (**self).load(station)
    }
}

fn parse_value(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if MISSING_TOKENS
        .iter()
        .any(|token| cell.eq_ignore_ascii_case(token))
    {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Parse one station's CSV into a table with `<STATION>_`-prefixed columns.
///
/// Non-numeric measurement cells become missing values; an unparseable date
/// fails the whole load.
pub fn parse_station_csv<R: Read>(
    station: &StationId,
    reader: R,
) -> Result<TimeTable, StationError> {
    let csv_error = |source| StationError::Csv {
        station: station.to_string(),
        source,
    };
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_error)?.clone();
    if headers.is_empty() {
        return Err(StationError::MissingDateColumn {
            station: station.to_string(),
        });
    }
    let date_index = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("date"))
        .unwrap_or(0);
    let value_indices: Vec<usize> = (0..headers.len()).filter(|i| *i != date_index).collect();
    let columns: Vec<String> = value_indices
        .iter()
        .map(|i| station.column(&headers[*i]))
        .collect();

    let mut records = Vec::new();
    let mut missing = 0usize;
    for result in rdr.records() {
        let record = result.map_err(csv_error)?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let date = parse_date(record.get(date_index).unwrap_or("")).map_err(|source| {
            StationError::Date {
                station: station.to_string(),
                line,
                source,
            }
        })?;
        let values: Vec<Option<f64>> = value_indices
            .iter()
            .map(|i| parse_value(record.get(*i).unwrap_or("")))
            .collect();
        missing += values.iter().filter(|v| v.is_none()).count();
        records.push((date, values));
    }

    let table = TimeTable::from_records(columns, records);
    log::debug!(
        "[MET Debug] loader: Parsed {} rows for {}, {} missing cells",
        table.len(),
        station,
        missing
    );
    Ok(table)
}

/// The on-disk daily data directory, one `K<STATION>.csv` per station.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyDirectory {
    root: PathBuf,
}

impl Default for DailyDirectory {
    fn default() -> Self {
        Self::new(DATA_DIR)
    }
}

impl DailyDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, station: &StationId) -> PathBuf {
        self.root.join(station.file_name())
    }

    /// Stations with a data file in this directory, sorted by code.
    pub fn discover(&self) -> Result<Vec<StationId>, StationError> {
        let io_error = |source| StationError::Io {
            path: self.root.clone(),
            source,
        };
        let mut stations = Vec::new();
        for entry in std::fs::read_dir(&self.root).map_err(io_error)? {
            let entry = entry.map_err(io_error)?;
            if let Some(station) = entry
                .file_name()
                .to_str()
                .and_then(StationId::from_file_name)
            {
                stations.push(station);
            }
        }
        stations.sort();
        stations.dedup();
        if stations.is_empty() {
            log::warn!(
                "[MET Debug] loader: No station files found in {}",
                self.root.display()
            );
        }
        Ok(stations)
    }
}

impl StationSource for DailyDirectory {
    fn load(&self, station: &StationId) -> Result<TimeTable, StationError> {
        let path = self.path_for(station);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StationError::MissingSource {
                    station: station.to_string(),
                    path,
                });
            }
            Err(source) => return Err(StationError::Io { path, source }),
        };
        let table = parse_station_csv(station, BufReader::new(file))?;
        log::info!(
            "[MET Debug] loader: Loaded {} rows for {} from {}",
            table.len(),
            station,
            path.display()
        );
        Ok(table)
    }
}

/// Station CSVs held in memory, for tests and callers that already have the
/// file contents.
///
/// Counts how many loads it has served.
#[derive(Debug, Default)]
pub struct EmbeddedStations {
    files: HashMap<StationId, String>,
    loads: Cell<usize>,
}

impl EmbeddedStations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, station: StationId, csv_data: impl Into<String>) -> Self {
        self.insert(station, csv_data);
        self
    }

    pub fn insert(&mut self, station: StationId, csv_data: impl Into<String>) {
        self.files.insert(station, csv_data.into());
    }

    /// Number of successful and failed loads served so far.
    pub fn loads(&self) -> usize {
        self.loads.get()
    }
}

impl StationSource for EmbeddedStations {
    fn load(&self, station: &StationId) -> Result<TimeTable, StationError> {
        self.loads.set(self.loads.get() + 1);
        let csv_data = self
            .files
            .get(station)
            .ok_or_else(|| StationError::MissingSource {
                station: station.to_string(),
                path: PathBuf::from(station.file_name()),
            })?;
        parse_station_csv(station, csv_data.as_bytes())
    }
}
