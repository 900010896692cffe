//! Date alignment of two station series.

use chrono::NaiveDate;
use met_station::TimeTable;
use std::collections::BTreeMap;

/// Outer join of two tables on date.
///
/// The result has every date present in either input, ascending, with the
/// left columns followed by the right columns. Slots for a side that has no
/// row on a date are `None`.
pub fn outer_join(left: &TimeTable, right: &TimeTable) -> TimeTable {
    let left_width = left.columns().len();
    let width = left_width + right.columns().len();

    let mut columns = left.columns().to_vec();
    columns.extend(right.columns().iter().cloned());

    let mut merged: BTreeMap<NaiveDate, Vec<Option<f64>>> = BTreeMap::new();
    for row in left.rows() {
        let mut values = row.values.clone();
        values.resize(width, None);
        merged.insert(row.date, values);
    }
    for row in right.rows() {
        let values = merged
            .entry(row.date)
            .or_insert_with(|| vec![None; width]);
        values[left_width..].copy_from_slice(&row.values);
    }
    TimeTable::from_records(columns, merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, day).unwrap()
    }

    fn table(column: &str, rows: &[(u32, f64)]) -> TimeTable {
        TimeTable::from_records(
            vec![column.to_string()],
            rows.iter().map(|(d, v)| (date(*d), vec![Some(*v)])),
        )
    }

    #[test]
    fn test_outer_join_keeps_all_dates() {
        let sea = table("SEA_Precip", &[(1, 0.1), (2, 0.5)]);
        let pdx = table("PDX_Precip", &[(1, 0.2), (3, 0.3)]);
        let joined = outer_join(&sea, &pdx);
        assert_eq!(joined.columns(), &["SEA_Precip", "PDX_Precip"]);
        assert_eq!(
            joined.dates().collect::<Vec<_>>(),
            vec![date(1), date(2), date(3)]
        );
        assert_eq!(joined.rows()[0].values, vec![Some(0.1), Some(0.2)]);
        assert_eq!(joined.rows()[1].values, vec![Some(0.5), None]);
        assert_eq!(joined.rows()[2].values, vec![None, Some(0.3)]);
    }

    #[test]
    fn test_outer_join_then_drop_missing() {
        let sea = table("SEA_Precip", &[(1, 0.1), (2, 0.5)]);
        let pdx = table("PDX_Precip", &[(1, 0.2), (3, 0.3)]);
        let joined = outer_join(&sea, &pdx).drop_missing();
        assert_eq!(joined.len(), 1);
        assert_eq!(joined.rows()[0].date, date(1));
        assert_eq!(joined.rows()[0].values, vec![Some(0.1), Some(0.2)]);
    }

    #[test]
    fn test_outer_join_disjoint_ranges() {
        let sea = table("SEA_Precip", &[(1, 0.1), (2, 0.5)]);
        let pdx = table("PDX_Precip", &[(10, 0.2), (11, 0.3)]);
        let joined = outer_join(&sea, &pdx);
        assert_eq!(joined.len(), 4);
        assert!(joined.drop_missing().is_empty());
    }

    #[test]
    fn test_outer_join_with_empty_side() {
        let sea = table("SEA_Precip", &[(1, 0.1)]);
        let empty = TimeTable::new(vec!["PDX_Precip".to_string()]);
        let joined = outer_join(&empty, &sea);
        assert_eq!(joined.columns(), &["PDX_Precip", "SEA_Precip"]);
        assert_eq!(joined.rows()[0].values, vec![None, Some(0.1)]);
    }
}
