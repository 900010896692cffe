//! Serializable plot and layout descriptions.
//!
//! Every struct derives `Serialize` so a renderer (a web page, a desktop
//! plot widget, a notebook) can draw the applet from JSON without knowing
//! anything about how the data was joined or summarized.

use met_data::{HistogramView, Selection};
use met_station::{StationId, TimeTable};
use met_utils::dates::format_date;
use serde::Serialize;

/// Tools offered on the scatter and line plots.
pub const SELECT_TOOLS: &str = "pan,wheel_zoom,box_select,reset";
pub const TITLE_FONT_SIZE: &str = "10pt";
/// Circle glyph size for scatter and line plots.
pub const CIRCLE_SIZE: f64 = 2.0;
/// Opacity of points outside the current selection.
pub const NONSELECTION_ALPHA: f64 = 0.02;

pub const SCATTER_WIDTH: u32 = 400;
pub const SCATTER_HEIGHT: u32 = 400;
pub const LINE_WIDTH: u32 = 1000;
pub const LINE_HEIGHT: u32 = 200;
pub const HIST_WIDTH: u32 = 500;
pub const HIST_HEIGHT: u32 = 200;
pub const STATS_WIDTH: u32 = 500;

/// Name of the date column in [`ColumnData`].
pub const DATE_COLUMN: &str = "Date";

/// A station selector.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SelectSpec {
    /// `station1` or `station2`.
    pub name: String,
    pub value: StationId,
    pub options: Vec<StationId>,
}

impl SelectSpec {
    pub fn new(name: &str, value: &StationId) -> Self {
        Self {
            name: name.to_string(),
            value: value.clone(),
            options: StationId::options(),
        }
    }
}

/// Circle glyph styling shared by the scatter and line plots.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CircleGlyph {
    pub size: f64,
    pub nonselection_alpha: f64,
}

impl Default for CircleGlyph {
    fn default() -> Self {
        Self {
            size: CIRCLE_SIZE,
            nonselection_alpha: NONSELECTION_ALPHA,
        }
    }
}

/// Station 1 precipitation against station 2 precipitation; brushing here
/// drives the selection.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScatterSpec {
    pub title: String,
    pub x: String,
    pub y: String,
    pub width: u32,
    pub height: u32,
    pub tools: String,
    pub title_font_size: String,
    pub glyph: CircleGlyph,
}

impl ScatterSpec {
    pub fn for_pair(station1: &StationId, station2: &StationId) -> Self {
        Self {
            title: format!("{} vs {}", station1, station2),
            x: station1.precip_column(),
            y: station2.precip_column(),
            width: SCATTER_WIDTH,
            height: SCATTER_HEIGHT,
            tools: SELECT_TOOLS.to_string(),
            title_font_size: TITLE_FONT_SIZE.to_string(),
            glyph: CircleGlyph::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    Linear,
    Datetime,
}

/// Precipitation of one station over time.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LineSpec {
    pub id: String,
    pub title: String,
    pub x: String,
    pub y: String,
    pub x_axis_type: AxisType,
    /// Id of the plot whose x range this one shares.
    pub x_range_link: Option<String>,
    pub width: u32,
    pub height: u32,
    pub tools: String,
    pub title_font_size: String,
    pub glyph: CircleGlyph,
}

impl LineSpec {
    pub fn for_station(id: &str, station: &StationId, x_range_link: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            title: station.to_string(),
            x: DATE_COLUMN.to_string(),
            y: station.precip_column(),
            x_axis_type: AxisType::Datetime,
            x_range_link: x_range_link.map(str::to_string),
            width: LINE_WIDTH,
            height: LINE_HEIGHT,
            tools: SELECT_TOOLS.to_string(),
            title_font_size: TITLE_FONT_SIZE.to_string(),
            glyph: CircleGlyph::default(),
        }
    }
}

/// One histogram bar as a rectangle centered at (`x`, `y`).
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Bar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HistogramSpec {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub tools: String,
    pub title_font_size: String,
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
    pub bars: Vec<Bar>,
}

impl HistogramSpec {
    pub fn from_view(view: &HistogramView) -> Self {
        let bars = view
            .centers
            .iter()
            .zip(view.heights())
            .map(|(center, height)| Bar {
                x: *center,
                y: height / 2.0,
                width: view.bar_width,
                height,
            })
            .collect();
        Self {
            title: format!("{} hist", view.station),
            width: HIST_WIDTH,
            height: HIST_HEIGHT,
            tools: String::new(),
            title_font_size: TITLE_FONT_SIZE.to_string(),
            x_range: [view.start, view.end],
            y_range: [0.0, view.top as f64],
            bars,
        }
    }
}

/// Preformatted statistics text.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatsSpec {
    pub text: String,
    pub width: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NamedColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// The joined series laid out column-wise for the scatter and line plots.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ColumnData {
    pub dates: Vec<String>,
    pub columns: Vec<NamedColumn>,
}

impl ColumnData {
    pub fn from_table(table: &TimeTable) -> Self {
        let dates = table.dates().map(|d| format_date(&d)).collect();
        let columns = table
            .columns()
            .iter()
            .map(|name| NamedColumn {
                name: name.clone(),
                values: table.column(name).unwrap_or_default(),
            })
            .collect();
        Self { dates, columns }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    Inputs,
    Scatter,
    Stats,
    Hist1,
    Hist2,
    Line1,
    Line2,
}

/// Panels arranged in rows, top to bottom.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Layout {
    pub rows: Vec<Vec<Panel>>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            rows: vec![
                vec![Panel::Inputs, Panel::Scatter, Panel::Stats],
                vec![Panel::Hist1, Panel::Hist2],
                vec![Panel::Line1],
                vec![Panel::Line2],
            ],
        }
    }
}

/// The whole applet for one (stations, selection) state.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AppView {
    pub station1_select: SelectSpec,
    pub station2_select: SelectSpec,
    pub scatter: ScatterSpec,
    pub stats: StatsSpec,
    pub hist1: HistogramSpec,
    pub hist2: HistogramSpec,
    pub line1: LineSpec,
    pub line2: LineSpec,
    pub source: ColumnData,
    pub selection: Selection,
    pub layout: Layout,
}

impl AppView {
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
