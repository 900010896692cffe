//! Descriptive statistics per column, rendered as a text table.

use met_station::TimeTable;
use serde::Serialize;
use std::fmt;

/// Row labels of the rendered table, top to bottom.
const STAT_LABELS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Count, mean, sample standard deviation and quartiles of one column.
///
/// With no values every statistic but `count` is `NaN`; `std` is also `NaN`
/// for a single value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnSummary {
    pub fn compute(name: &str, values: &[f64]) -> Self {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let count = sorted.len();

        if count == 0 {
            return Self {
                name: name.to_string(),
                count,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                q25: f64::NAN,
                median: f64::NAN,
                q75: f64::NAN,
                max: f64::NAN,
            };
        }

        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std = if count > 1 {
            let variance =
                sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            variance.sqrt()
        } else {
            f64::NAN
        };

        Self {
            name: name.to_string(),
            count,
            mean,
            std,
            min: sorted[0],
            q25: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q75: quantile(&sorted, 0.75),
            max: sorted[count - 1],
        }
    }

    fn stats(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.median,
            self.q75,
            self.max,
        ]
    }
}

/// Linear interpolation between closest ranks; `sorted` must be non-empty.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let position = p * (sorted.len() - 1) as f64;
    let lo = position.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let fraction = position - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * fraction
}

/// Summaries for every column of a table, in column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Describe {
    pub columns: Vec<ColumnSummary>,
}

impl Describe {
    pub fn of(table: &TimeTable) -> Self {
        let columns = table
            .columns()
            .iter()
            .map(|name| {
                let values = table.column_values(name).unwrap_or_default();
                ColumnSummary::compute(name, &values)
            })
            .collect();
        Self { columns }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Text table with one row per statistic and one column per series.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Describe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = STAT_LABELS.iter().map(|l| l.len()).max().unwrap_or(0);
        let cells: Vec<Vec<String>> = self
            .columns
            .iter()
            .map(|c| c.stats().iter().map(|v| format!("{:.6}", v)).collect())
            .collect();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .zip(&cells)
            .map(|(c, values)| {
                values
                    .iter()
                    .map(String::len)
                    .chain(std::iter::once(c.name.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:label_width$}", "")?;
        for (c, width) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>width$}", c.name, width = *width)?;
        }
        for (row, label) in STAT_LABELS.iter().enumerate() {
            write!(f, "\n{:<label_width$}", label)?;
            for (values, width) in cells.iter().zip(&widths) {
                write!(f, "  {:>width$}", values[row], width = *width)?;
            }
        }
        Ok(())
    }
}
