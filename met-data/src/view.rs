//! The selection-derived view: statistics text plus one histogram per station.

use crate::describe::Describe;
use crate::error::ViewError;
use crate::histogram::{Histogram, BAR_WIDTH_FACTOR, HISTOGRAM_BINS};
use crate::selection::Selection;
use met_station::{StationId, TimeTable};
use serde::Serialize;

/// Bars of one station's precipitation histogram with fixed axis bounds.
///
/// Bar geometry comes from the histogram of the selected rows; `start`,
/// `end` and `top` come from the histogram of the full series so the axes
/// stay put while the selection changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramView {
    pub station: StationId,
    pub column: String,
    pub counts: Vec<usize>,
    pub edges: Vec<f64>,
    pub centers: Vec<f64>,
    pub bar_width: f64,
    pub start: f64,
    pub end: f64,
    pub top: usize,
}

impl HistogramView {
    pub fn compute(
        station: &StationId,
        full: &TimeTable,
        selected: &TimeTable,
    ) -> Result<Self, ViewError> {
        let column = station.precip_column();
        let full_values = full
            .column_values(&column)
            .ok_or_else(|| ViewError::MissingColumn(column.clone()))?;
        let selected_values = selected
            .column_values(&column)
            .ok_or_else(|| ViewError::MissingColumn(column.clone()))?;

        let global = Histogram::compute(&full_values, HISTOGRAM_BINS);
        let histogram = Histogram::compute(&selected_values, HISTOGRAM_BINS);

        Ok(Self {
            station: station.clone(),
            column,
            centers: histogram.centers(),
            bar_width: BAR_WIDTH_FACTOR * histogram.bin_width(),
            start: global.start(),
            end: global.end(),
            top: global.max_count(),
            counts: histogram.counts,
            edges: histogram.edges,
        })
    }

    /// Bar heights, the selected bin counts.
    pub fn heights(&self) -> Vec<f64> {
        self.counts.iter().map(|c| *c as f64).collect()
    }
}

/// Everything recomputed when the stations or the selection change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedView {
    pub selected_rows: usize,
    pub stats: Describe,
    pub stats_text: String,
    pub hist1: HistogramView,
    pub hist2: HistogramView,
}

/// Statistics and both histograms for `selection` within `table`.
///
/// An explicit empty selection yields `NaN` statistics and all-zero
/// histograms; the axis bounds still come from the whole table.
pub fn compute_view(
    table: &TimeTable,
    selection: &Selection,
    station1: &StationId,
    station2: &StationId,
) -> Result<DerivedView, ViewError> {
    let selected = selection.apply(table)?;
    let stats = Describe::of(&selected);
    let hist1 = HistogramView::compute(station1, table, &selected)?;
    let hist2 = HistogramView::compute(station2, table, &selected)?;
    log::debug!(
        "[MET Debug] view: {} of {} rows selected for ({}, {})",
        selected.len(),
        table.len(),
        station1,
        station2
    );
    Ok(DerivedView {
        selected_rows: selected.len(),
        stats_text: stats.render(),
        stats,
        hist1,
        hist2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::JoinedSeriesCache;
    use chrono::NaiveDate;
    use met_station::EmbeddedStations;

    fn station(code: &str) -> StationId {
        StationId::new(code).unwrap()
    }

    fn joined() -> TimeTable {
        TimeTable::from_records(
            vec!["SEA_Precip".to_string(), "PDX_Precip".to_string()],
            (1..=10).map(|d| {
                (
                    NaiveDate::from_ymd_opt(2020, 1, d).unwrap(),
                    vec![Some(d as f64 / 10.0), Some((11 - d) as f64)],
                )
            }),
        )
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_all_equals_full_index_selection() {
        let table = joined();
        let all = compute_view(&table, &Selection::All, &station("SEA"), &station("PDX")).unwrap();
        let explicit = compute_view(
            &table,
            &Selection::rows(0..table.len()),
            &station("SEA"),
            &station("PDX"),
        )
        .unwrap();
        assert_eq!(all, explicit);
        assert_eq!(all.selected_rows, 10);
    }

    #[test]
    fn test_bar_geometry() {
        let table = joined();
        let view = compute_view(
            &table,
            &Selection::rows([0, 1, 2]),
            &station("SEA"),
            &station("PDX"),
        )
        .unwrap();
        for hist in [&view.hist1, &view.hist2] {
            assert_eq!(hist.counts.len(), HISTOGRAM_BINS);
            assert!(close(hist.bar_width, 0.7 * (hist.edges[1] - hist.edges[0])));
            for (i, center) in hist.centers.iter().enumerate() {
                assert!(close(*center, (hist.edges[i] + hist.edges[i + 1]) / 2.0));
            }
            assert_eq!(hist.counts.iter().sum::<usize>(), 3);
        }
    }

    #[test]
    fn test_axis_bounds_ignore_selection() {
        let table = joined();
        let full = Histogram::compute(&table.column_values("SEA_Precip").unwrap(), HISTOGRAM_BINS);
        for selection in [
            Selection::All,
            Selection::rows([4]),
            Selection::rows([0, 9]),
            Selection::rows(Vec::new()),
        ] {
            let view = compute_view(&table, &selection, &station("SEA"), &station("PDX")).unwrap();
            assert!(close(view.hist1.start, full.start()));
            assert!(close(view.hist1.end, full.end()));
            assert_eq!(view.hist1.top, full.max_count());
            assert!(close(view.hist1.start, 0.1));
            assert!(close(view.hist1.end, 1.0));
        }
    }

    #[test]
    fn test_empty_selection_is_degenerate_not_an_error() {
        let table = joined();
        let view = compute_view(
            &table,
            &Selection::rows(Vec::new()),
            &station("SEA"),
            &station("PDX"),
        )
        .unwrap();
        assert_eq!(view.selected_rows, 0);
        let sea = view.stats.column("SEA_Precip").unwrap();
        assert_eq!(sea.count, 0);
        assert!(sea.mean.is_nan());
        assert!(view.hist1.counts.iter().all(|c| *c == 0));
        assert_eq!(view.hist1.top, 1);
        assert!(view.stats_text.contains("NaN"));
    }

    #[test]
    fn test_disjoint_join_view() {
        let source = EmbeddedStations::new()
            .with(station("SEA"), "Date,Precip\n2020-01-01,0.1\n")
            .with(station("LAX"), "Date,Precip\n2021-01-01,0.0\n");
        let mut cache = JoinedSeriesCache::new();
        let table = cache.get(&source, &station("SEA"), &station("LAX")).unwrap();
        assert!(table.is_empty());
        let view = compute_view(&table, &Selection::All, &station("SEA"), &station("LAX")).unwrap();
        assert_eq!(view.selected_rows, 0);
        assert_eq!(view.hist2.counts, vec![0; HISTOGRAM_BINS]);
        assert!(close(view.hist2.start, 0.0));
        assert!(close(view.hist2.end, 1.0));
        assert_eq!(view.hist2.top, 0);
        assert!(view.stats.columns.iter().all(|c| c.count == 0));
    }

    #[test]
    fn test_self_join_uses_one_column_twice() {
        let table = TimeTable::from_records(
            vec!["SEA_Precip".to_string()],
            vec![(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(), vec![Some(0.4)])],
        );
        let view = compute_view(&table, &Selection::All, &station("SEA"), &station("SEA")).unwrap();
        assert_eq!(view.hist1, view.hist2);
        assert_eq!(view.stats.columns.len(), 1);
    }

    #[test]
    fn test_missing_precip_column() {
        let table = joined();
        let err = compute_view(&table, &Selection::All, &station("SEA"), &station("ATL")).unwrap_err();
        assert!(matches!(err, ViewError::MissingColumn(ref c) if c == "ATL_Precip"));
    }

    #[test]
    fn test_selection_out_of_range() {
        let table = joined();
        let err = compute_view(&table, &Selection::rows([10]), &station("SEA"), &station("PDX"))
            .unwrap_err();
        assert!(matches!(err, ViewError::SelectionOutOfRange { index: 10, len: 10 }));
    }
}
