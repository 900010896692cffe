//! Serializable view description and event-driven state for the MET applet.
//!
//! The applet shows two station selectors, a scatter plot of one station's
//! precipitation against the other's, the statistics of the brushed rows,
//! a histogram per station and a precipitation-over-time plot per station.
//!
//! This crate never draws anything: [`state::AppState::update`] turns an
//! [`state::Event`] into a [`models::AppView`] that a renderer consumes.
//!
//! ```rust
//! use met_station::{EmbeddedStations, StationId};
//! use met_view::state::{AppState, Event, Slot};
//!
//! let source = EmbeddedStations::new()
//!     .with(StationId::new("SEA").unwrap(), "Date,Precip\n2020-01-01,0.1\n")
//!     .with(StationId::new("PDX").unwrap(), "Date,Precip\n2020-01-01,0.2\n")
//!     .with(StationId::new("SFO").unwrap(), "Date,Precip\n2020-01-01,0.0\n");
//! let mut state = AppState::new(source).unwrap();
//! let view = state
//!     .update(Event::StationChanged {
//!         slot: Slot::Station2,
//!         value: StationId::new("SFO").unwrap(),
//!     })
//!     .unwrap();
//! assert_eq!(view.scatter.title, "SEA vs SFO");
//! ```

pub mod models;
pub mod state;

pub use models::AppView;
pub use state::{AppState, Event, Slot};
