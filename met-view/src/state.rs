//! Application state driven by explicit events.
//!
//! `AppState` owns the station source, the joined-series cache and the two
//! selector values. Each [`Event`] goes through [`AppState::update`], which
//! returns a freshly built [`AppView`]; nothing is patched in place.

use crate::models::{
    AppView, ColumnData, HistogramSpec, Layout, LineSpec, ScatterSpec, SelectSpec, StatsSpec,
    STATS_WIDTH,
};
use anyhow::Context;
use met_data::{compute_view, JoinedSeriesCache, Selection};
use met_station::station::{DEFAULT_STATION1, DEFAULT_STATION2};
use met_station::{StationId, StationSource};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two station selectors changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Station1,
    Station2,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Station1 => f.write_str("station1"),
            Slot::Station2 => f.write_str("station2"),
        }
    }
}

/// Input from the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    StationChanged { slot: Slot, value: StationId },
    SelectionChanged { selection: Selection },
}

pub struct AppState<S: StationSource> {
    source: S,
    cache: JoinedSeriesCache,
    station1: StationId,
    station2: StationId,
    selection: Selection,
}

impl<S: StationSource> AppState<S> {
    /// State showing the default pair with nothing selected.
    pub fn new(source: S) -> anyhow::Result<Self> {
        Ok(Self::with_stations(
            source,
            StationId::new(DEFAULT_STATION1)?,
            StationId::new(DEFAULT_STATION2)?,
        ))
    }

    pub fn with_stations(source: S, station1: StationId, station2: StationId) -> Self {
        Self {
            source,
            cache: JoinedSeriesCache::new(),
            station1,
            station2,
            selection: Selection::All,
        }
    }

    /// Replace the cache, e.g. with a bounded one.
    pub fn with_cache(mut self, cache: JoinedSeriesCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn station1(&self) -> &StationId {
        &self.station1
    }

    pub fn station2(&self) -> &StationId {
        &self.station2
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn cache(&self) -> &JoinedSeriesCache {
        &self.cache
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Apply one event and return the view for the new state.
    ///
    /// A station change resets the selection. If the new view cannot be
    /// built the event is not applied.
    pub fn update(&mut self, event: Event) -> anyhow::Result<AppView> {
        let (station1, station2, selection) = match event {
            Event::StationChanged { slot, value } => {
                log::info!("[MET Debug] state: {} changed to {}", slot, value);
                match slot {
                    Slot::Station1 => (value, self.station2.clone(), Selection::All),
                    Slot::Station2 => (self.station1.clone(), value, Selection::All),
                }
            }
            Event::SelectionChanged { selection } => {
                (self.station1.clone(), self.station2.clone(), selection)
            }
        };
        let view = self.build(&station1, &station2, &selection)?;
        self.station1 = station1;
        self.station2 = station2;
        self.selection = selection;
        Ok(view)
    }

    /// The view for the current state.
    pub fn render(&mut self) -> anyhow::Result<AppView> {
        let (station1, station2, selection) = (
            self.station1.clone(),
            self.station2.clone(),
            self.selection.clone(),
        );
        self.build(&station1, &station2, &selection)
    }

    fn build(
        &mut self,
        station1: &StationId,
        station2: &StationId,
        selection: &Selection,
    ) -> anyhow::Result<AppView> {
        let table = self
            .cache
            .get(&self.source, station1, station2)
            .with_context(|| format!("Failed to join {} and {}", station1, station2))?;
        let derived = compute_view(&table, selection, station1, station2)
            .with_context(|| format!("Failed to summarize {} vs {}", station1, station2))?;

        Ok(AppView {
            station1_select: SelectSpec::new("station1", station1),
            station2_select: SelectSpec::new("station2", station2),
            scatter: ScatterSpec::for_pair(station1, station2),
            stats: StatsSpec {
                text: derived.stats_text,
                width: STATS_WIDTH,
            },
            hist1: HistogramSpec::from_view(&derived.hist1),
            hist2: HistogramSpec::from_view(&derived.hist2),
            line1: LineSpec::for_station("line1", station1, None),
            line2: LineSpec::for_station("line2", station2, Some("line1")),
            source: ColumnData::from_table(&table),
            selection: selection.clone(),
            layout: Layout::default(),
        })
    }
}
