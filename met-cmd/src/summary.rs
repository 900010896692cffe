//! The `describe` and `view` subcommands.

use anyhow::Context;
use log::info;
use met_data::{compute_view, JoinedSeriesCache, Selection};
use met_station::{StationId, StationSource};
use met_view::{AppState, AppView, Event};
use std::path::Path;

/// Statistics text for `rows` of the joined `(station1, station2)` series.
pub fn describe_pair<S: StationSource>(
    source: S,
    station1: StationId,
    station2: StationId,
    rows: Selection,
) -> anyhow::Result<String> {
    let mut cache = JoinedSeriesCache::new();
    let table = cache
        .get(&source, &station1, &station2)
        .with_context(|| format!("Failed to join {} and {}", station1, station2))?;
    let derived = compute_view(&table, &rows, &station1, &station2)?;
    info!(
        "Described {} of {} rows for {} vs {}",
        derived.selected_rows,
        table.len(),
        station1,
        station2
    );
    Ok(derived.stats_text)
}

/// View for the given pair and selection, then for each event in `events`.
pub fn view_pair<S: StationSource>(
    source: S,
    station1: StationId,
    station2: StationId,
    rows: Selection,
    events: Option<&Path>,
) -> anyhow::Result<AppView> {
    let mut state = AppState::with_stations(source, station1, station2);
    let mut view = state.update(Event::SelectionChanged { selection: rows })?;
    if let Some(path) = events {
        let events = read_events(path)?;
        info!("Replaying {} events from {}", events.len(), path.display());
        for event in events {
            view = state.update(event)?;
        }
    }
    Ok(view)
}

/// Parse a JSON-lines event file; blank lines are skipped.
pub fn read_events(path: &Path) -> anyhow::Result<Vec<Event>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read events from {}", path.display()))?;
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("{} line {}: invalid event", path.display(), i + 1))
        })
        .collect()
}
