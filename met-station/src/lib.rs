//! Station identifiers, date-indexed tables and the daily CSV loader.
//!
//! A station series is read from `K<STATION>.csv` under the daily data
//! directory; every value column is renamed `<STATION>_<column>` so two
//! stations can share one table after a join.

pub mod error;
pub mod loader;
pub mod station;
pub mod table;

pub use error::StationError;
pub use loader::{parse_station_csv, DailyDirectory, EmbeddedStations, StationSource};
pub use station::StationId;
pub use table::{Row, TimeTable};
