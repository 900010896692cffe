//! Memoized joined series, keyed by the ordered station pair.
//!
//! The cache is owned by whoever drives the views (see `met-view`'s
//! `AppState`) and lives as long as its owner. Entries are shared as
//! `Rc<TimeTable>`; callers treat them as read-only.

use crate::join::outer_join;
use met_station::{StationError, StationId, StationSource, TimeTable};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

/// Ordered `(station1, station2)` key; `(A, B)` and `(B, A)` are distinct.
pub type PairKey = (StationId, StationId);

/// How many joined pairs the cache may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Keep every pair ever joined.
    #[default]
    Unbounded,
    /// Keep at most this many pairs, evicting the oldest inserted first.
    /// `Bounded(0)` stores nothing.
    Bounded(usize),
}

#[derive(Debug, Default)]
pub struct JoinedSeriesCache {
    policy: CachePolicy,
    entries: HashMap<PairKey, Rc<TimeTable>>,
    insertion_order: VecDeque<PairKey>,
}

impl JoinedSeriesCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: CachePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, station1: &StationId, station2: &StationId) -> bool {
        self.entries
            .contains_key(&(station1.clone(), station2.clone()))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.insertion_order.clear();
    }

    /// The joined series for `(station1, station2)`, loading and joining on a miss.
    ///
    /// On a miss both stations are loaded from `source` (once when they are
    /// equal), outer-joined on date, and stripped of rows with any missing
    /// value. A load failure is returned and nothing is stored.
    pub fn get<S: StationSource + ?Sized>(
        &mut self,
        source: &S,
        station1: &StationId,
        station2: &StationId,
    ) -> Result<Rc<TimeTable>, StationError> {
        let key = (station1.clone(), station2.clone());
        if let Some(joined) = self.entries.get(&key) {
            log::debug!(
                "[MET Debug] cache: hit for ({}, {})",
                station1,
                station2
            );
            return Ok(Rc::clone(joined));
        }

        let joined = Rc::new(build_joined(source, station1, station2)?);
        log::info!(
            "[MET Debug] cache: joined ({}, {}) into {} rows",
            station1,
            station2,
            joined.len()
        );
        self.insert(key, Rc::clone(&joined));
        Ok(joined)
    }

    fn insert(&mut self, key: PairKey, joined: Rc<TimeTable>) {
        if let CachePolicy::Bounded(limit) = self.policy {
            if limit == 0 {
                return;
            }
            while self.entries.len() >= limit {
                let Some(oldest) = self.insertion_order.pop_front() else {
                    break;
                };
                self.entries.remove(&oldest);
                log::debug!(
                    "[MET Debug] cache: evicted ({}, {})",
                    oldest.0,
                    oldest.1
                );
            }
        }
        self.insertion_order.push_back(key.clone());
        self.entries.insert(key, joined);
    }
}

fn build_joined<S: StationSource + ?Sized>(
    source: &S,
    station1: &StationId,
    station2: &StationId,
) -> Result<TimeTable, StationError> {
    // A station joined with itself keeps its single set of columns.
    let joined = if station1 == station2 {
        source.load(station1)?
    } else {
        let left = source.load(station1)?;
        let right = source.load(station2)?;
        outer_join(&left, &right)
    };
    Ok(joined.drop_missing())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use met_station::EmbeddedStations;

    const SEA_CSV: &str = "\
Date,Precip
2020-01-01,0.1
2020-01-02,0.5
";

    const PDX_CSV: &str = "\
Date,Precip
2020-01-01,0.2
2020-01-03,0.3
";

    const LAX_CSV: &str = "\
Date,Precip
2021-06-01,0.0
2021-06-02,0.0
";

    fn station(code: &str) -> StationId {
        StationId::new(code).unwrap()
    }

    fn source() -> EmbeddedStations {
        EmbeddedStations::new()
            .with(station("SEA"), SEA_CSV)
            .with(station("PDX"), PDX_CSV)
            .with(station("LAX"), LAX_CSV)
    }

    #[test]
    fn test_join_drops_unmatched_dates() {
        let source = source();
        let mut cache = JoinedSeriesCache::new();
        let joined = cache.get(&source, &station("SEA"), &station("PDX")).unwrap();
        assert_eq!(joined.len(), 1);
        let row = &joined.rows()[0];
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(joined.column("SEA_Precip"), Some(vec![Some(0.1)]));
        assert_eq!(joined.column("PDX_Precip"), Some(vec![Some(0.2)]));
    }

    #[test]
    fn test_repeated_get_returns_cached_table() {
        let source = source();
        let mut cache = JoinedSeriesCache::new();
        let first = cache.get(&source, &station("SEA"), &station("PDX")).unwrap();
        let second = cache.get(&source, &station("SEA"), &station("PDX")).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(source.loads(), 2, "each station should load once");
    }

    #[test]
    fn test_pair_order_is_a_separate_entry() {
        let source = source();
        let mut cache = JoinedSeriesCache::new();
        let forward = cache.get(&source, &station("SEA"), &station("PDX")).unwrap();
        let backward = cache.get(&source, &station("PDX"), &station("SEA")).unwrap();
        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&station("SEA"), &station("PDX")));
        assert!(cache.contains(&station("PDX"), &station("SEA")));
        assert!(!Rc::ptr_eq(&forward, &backward));
        assert_eq!(
            forward.dates().collect::<Vec<_>>(),
            backward.dates().collect::<Vec<_>>()
        );
        assert_eq!(forward.columns(), &["SEA_Precip", "PDX_Precip"]);
        assert_eq!(backward.columns(), &["PDX_Precip", "SEA_Precip"]);
    }

    #[test]
    fn test_self_join_is_the_single_series() {
        let source = source();
        let mut cache = JoinedSeriesCache::new();
        let joined = cache.get(&source, &station("SEA"), &station("SEA")).unwrap();
        let single = source.load(&station("SEA")).unwrap();
        assert_eq!(*joined, single);
        assert_eq!(joined.columns(), &["SEA_Precip"]);
        assert_eq!(source.loads(), 2, "self-join plus the direct load");
    }

    #[test]
    fn test_self_join_still_drops_missing_rows() {
        let source = EmbeddedStations::new().with(
            station("SEA"),
            "Date,Precip\n2020-01-01,0.1\n2020-01-02,\n",
        );
        let mut cache = JoinedSeriesCache::new();
        let joined = cache.get(&source, &station("SEA"), &station("SEA")).unwrap();
        assert_eq!(joined.len(), 1);
    }

    #[test]
    fn test_disjoint_ranges_join_to_empty() {
        let source = source();
        let mut cache = JoinedSeriesCache::new();
        let joined = cache.get(&source, &station("SEA"), &station("LAX")).unwrap();
        assert!(joined.is_empty());
        assert_eq!(joined.columns(), &["SEA_Precip", "LAX_Precip"]);
    }

    #[test]
    fn test_missing_source_is_not_cached() {
        let source = source();
        let mut cache = JoinedSeriesCache::new();
        let err = cache
            .get(&source, &station("SEA"), &station("ATL"))
            .unwrap_err();
        assert!(err.is_missing_source());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_bounded_policy_evicts_oldest() {
        let source = source();
        let mut cache = JoinedSeriesCache::with_policy(CachePolicy::Bounded(2));
        cache.get(&source, &station("SEA"), &station("PDX")).unwrap();
        cache.get(&source, &station("PDX"), &station("SEA")).unwrap();
        cache.get(&source, &station("SEA"), &station("LAX")).unwrap();
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&station("SEA"), &station("PDX")));
        assert!(cache.contains(&station("PDX"), &station("SEA")));
        assert!(cache.contains(&station("SEA"), &station("LAX")));
    }

    #[test]
    fn test_bounded_zero_stores_nothing() {
        let source = source();
        let mut cache = JoinedSeriesCache::with_policy(CachePolicy::Bounded(0));
        let joined = cache.get(&source, &station("SEA"), &station("PDX")).unwrap();
        assert_eq!(joined.len(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_unbounded_keeps_every_pair() {
        let source = source();
        let mut cache = JoinedSeriesCache::new();
        for (a, b) in [("SEA", "PDX"), ("PDX", "SEA"), ("SEA", "LAX"), ("LAX", "LAX")] {
            cache.get(&source, &station(a), &station(b)).unwrap();
        }
        assert_eq!(cache.policy(), CachePolicy::Unbounded);
        assert_eq!(cache.len(), 4);
        cache.clear();
        assert!(cache.is_empty());
    }
}
