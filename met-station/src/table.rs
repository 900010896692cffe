use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// One dated row of a [`TimeTable`]; `None` marks a missing measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub date: NaiveDate,
    pub values: Vec<Option<f64>>,
}

impl Row {
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }
}

/// A date-indexed table of named numeric columns.
///
/// Rows are kept in ascending date order with at most one row per date, and
/// every row holds exactly one value slot per column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeTable {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl TimeTable {
    /// An empty table with the given columns.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from dated value vectors in any order.
    ///
    /// Short vectors are padded with `None`, long ones truncated; when a date
    /// repeats, the last record wins.
    pub fn from_records<I>(columns: Vec<String>, records: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, Vec<Option<f64>>)>,
    {
        let width = columns.len();
        let mut by_date: BTreeMap<NaiveDate, Vec<Option<f64>>> = BTreeMap::new();
        for (date, mut values) in records {
            values.resize(width, None);
            by_date.insert(date, values);
        }
        let rows = by_date
            .into_iter()
            .map(|(date, values)| Row { date, values })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.rows.iter().map(|row| row.date)
    }

    /// All slots of one column in row order.
    pub fn column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row.values[index]).collect())
    }

    /// The present values of one column in row order.
    pub fn column_values(&self, name: &str) -> Option<Vec<f64>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().filter_map(|row| row.values[index]).collect())
    }

    pub fn row_for_date(&self, date: NaiveDate) -> Option<&Row> {
        self.rows
            .binary_search_by(|row| row.date.cmp(&date))
            .ok()
            .map(|i| &self.rows[i])
    }

    /// Keep only rows with a value in every column.
    pub fn drop_missing(self) -> Self {
        let Self { columns, rows } = self;
        let rows = rows.into_iter().filter(Row::is_complete).collect();
        Self { columns, rows }
    }

    /// Rows at the given positions, in the order given.
    ///
    /// Positions must be in range; callers validate before taking a subset.
    pub fn take_rows<I>(&self, positions: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let rows = positions
            .into_iter()
            .map(|i| self.rows[i].clone())
            .collect();
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }
}
