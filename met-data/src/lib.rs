//! Joining, caching and selection-driven statistics for station precipitation.
//!
//! This crate turns two loaded station series into the data behind the
//! linked views:
//! - [`join`] aligns two series on date
//! - [`cache`] memoizes joined pairs for the lifetime of its owner
//! - [`selection`] resolves brushed row positions
//! - [`describe`] and [`histogram`] summarize a (possibly selected) table
//! - [`view`] combines them into the statistics text and both histograms

pub mod cache;
pub mod describe;
pub mod error;
pub mod histogram;
pub mod join;
pub mod selection;
pub mod view;

pub use cache::{CachePolicy, JoinedSeriesCache};
pub use describe::{ColumnSummary, Describe};
pub use error::ViewError;
pub use histogram::{Histogram, BAR_WIDTH_FACTOR, HISTOGRAM_BINS};
pub use selection::Selection;
pub use view::{compute_view, DerivedView, HistogramView};
