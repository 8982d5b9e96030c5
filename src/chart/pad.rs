//! Pads: stacked display regions sharing a time axis.
//!
//! A pad owns its geometry (vertical canvas fractions), its cosmetic
//! configuration, the renderers it can draw with, and the render order of
//! the series attached to it.

use egui::Color32;

use crate::data::record::RecordKind;
use crate::data::series::SeriesHandle;

/// Which series renderer a pad uses for a record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RendererKind {
    Bar,
    TimeSeries,
    Fill,
    Tick,
}

impl RendererKind {
    /// The renderers every pad registers so it can host any record kind.
    pub const DEFAULT_SET: [RendererKind; 4] = [
        RendererKind::Bar,
        RendererKind::TimeSeries,
        RendererKind::Fill,
        RendererKind::Tick,
    ];

    pub fn for_kind(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Bar => RendererKind::Bar,
            RecordKind::Fill => RendererKind::Fill,
            RecordKind::TimeSeries => RendererKind::TimeSeries,
            RecordKind::Tick => RendererKind::Tick,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisType {
    Numeric,
    DateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashStyle {
    Solid,
    Dash,
    Dot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub enabled: bool,
    pub label_enabled: bool,
    pub title_enabled: bool,
    pub label_format: String,
    pub label_color: Color32,
    pub axis_type: AxisType,
    /// Thickness of the axis strip in points (height for horizontal axes).
    pub size: f32,
    pub grid_color: Color32,
    pub grid_dash: DashStyle,
    pub range: (f64, f64),
    pub zoomed: bool,
}

impl Default for Axis {
    fn default() -> Self {
        Self {
            enabled: true,
            label_enabled: true,
            title_enabled: false,
            label_format: String::new(),
            label_color: Color32::BLACK,
            axis_type: AxisType::Numeric,
            size: 20.0,
            grid_color: Color32::GRAY,
            grid_dash: DashStyle::Solid,
            range: (0.0, 1.0),
            zoomed: false,
        }
    }
}

impl Axis {
    pub fn set_range(&mut self, min: f64, max: f64) {
        self.range = (min, max);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 0.0,
            bottom: 0.0,
            left: 10.0,
            right: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendSettings {
    pub enabled: bool,
    pub position: LegendPosition,
    pub back_color: Color32,
}

impl Default for LegendSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            position: LegendPosition::TopLeft,
            back_color: Color32::WHITE,
        }
    }
}

/// A legend row bound to the series it describes.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub series: SeriesHandle,
    pub label: String,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pad {
    /// Top edge as a fraction of the canvas height (0 = top).
    pub canvas_y1: f64,
    /// Bottom edge as a fraction of the canvas height.
    pub canvas_y2: f64,

    pub title_enabled: bool,
    pub back_color: Color32,
    pub fore_color: Color32,
    pub border_enabled: bool,
    pub border_color: Color32,
    pub border_width: f32,
    pub margins: Margins,

    pub axis_top: Axis,
    pub axis_bottom: Axis,
    pub axis_left: Axis,
    pub axis_right: Axis,

    pub legend: LegendSettings,
    pub x_range: (f64, f64),

    pub(crate) renderers: Vec<RendererKind>,
    pub(crate) series: Vec<SeriesHandle>,
    pub(crate) legend_entries: Vec<LegendEntry>,
}

impl Pad {
    pub(crate) fn new(canvas_y1: f64, canvas_y2: f64) -> Self {
        Self {
            canvas_y1,
            canvas_y2,
            title_enabled: false,
            back_color: Color32::from_rgb(240, 240, 240),
            fore_color: Color32::WHITE,
            border_enabled: false,
            border_color: Color32::BLACK,
            border_width: 1.0,
            margins: Margins::default(),
            axis_top: Axis::default(),
            axis_bottom: Axis::default(),
            axis_left: Axis::default(),
            axis_right: Axis::default(),
            legend: LegendSettings::default(),
            x_range: (0.0, 1.0),
            renderers: Vec::new(),
            series: Vec::new(),
            legend_entries: Vec::new(),
        }
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_y2 - self.canvas_y1
    }

    pub fn register_renderer(&mut self, renderer: RendererKind) {
        if !self.renderers.contains(&renderer) {
            self.renderers.push(renderer);
        }
    }

    pub fn renderers(&self) -> &[RendererKind] {
        &self.renderers
    }

    /// Whether a renderer for `kind` is registered on this pad.
    pub fn can_render(&self, kind: RecordKind) -> bool {
        self.renderers.contains(&RendererKind::for_kind(kind))
    }

    /// Series handles in render order.
    pub fn series(&self) -> &[SeriesHandle] {
        &self.series
    }

    pub fn legend_entries(&self) -> &[LegendEntry] {
        &self.legend_entries
    }

    pub fn set_range_x(&mut self, min: f64, max: f64) {
        self.x_range = (min, max);
    }

    /// Insert a series at `index` in the render order, clamped to the end.
    pub(crate) fn insert(&mut self, index: usize, handle: SeriesHandle) -> usize {
        let index = index.min(self.series.len());
        self.series.insert(index, handle);
        index
    }

    /// Detach a series and its legend entry; the series data stays in the chart.
    pub(crate) fn remove(&mut self, handle: SeriesHandle) -> Option<LegendEntry> {
        self.series.retain(|h| *h != handle);
        let pos = self.legend_entries.iter().position(|e| e.series == handle)?;
        Some(self.legend_entries.remove(pos))
    }

    pub fn add_legend_entry(&mut self, series: SeriesHandle, label: String, color: Color32) {
        self.legend_entries.push(LegendEntry {
            series,
            label,
            color,
        });
    }

    pub(crate) fn set_legend_color(&mut self, series: SeriesHandle, color: Color32) {
        for entry in self.legend_entries.iter_mut().filter(|e| e.series == series) {
            entry.color = color;
        }
    }

    pub(crate) fn clear_contents(&mut self) {
        self.series.clear();
        self.legend_entries.clear();
    }
}
