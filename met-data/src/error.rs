use met_station::StationError;
use std::fmt;

/// Errors raised while deriving statistics and histograms from a joined series.
#[derive(Debug)]
pub enum ViewError {
    Station(StationError),
    /// A selected row position lies past the end of the table.
    SelectionOutOfRange { index: usize, len: usize },
    /// The table has no column with this name.
    MissingColumn(String),
    InvalidSelection(String),
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewError::Station(e) => write!(f, "{}", e),
            ViewError::SelectionOutOfRange { index, len } => write!(
                f,
                "selected row {} is out of range for a table of {} rows",
                index, len
            ),
            ViewError::MissingColumn(name) => write!(f, "no column named '{}'", name),
            ViewError::InvalidSelection(s) => write!(f, "invalid selection '{}'", s),
        }
    }
}

impl std::error::Error for ViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewError::Station(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StationError> for ViewError {
    fn from(value: StationError) -> Self {
        ViewError::Station(value)
    }
}
