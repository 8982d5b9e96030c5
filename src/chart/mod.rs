//! Retained chart model: the drawing surface the engine writes to.
//!
//! The engine never draws pixels. It edits pads, series and the visible range
//! here, then raises a redraw request that the egui front-end
//! ([`crate::app`]) consumes on its next frame.

pub mod allocator;
pub mod format;
pub mod pad;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use egui::Color32;

use crate::data::series::{Series, SeriesHandle};
use pad::{AxisType, DashStyle, LegendPosition, Pad, RendererKind};

pub use allocator::PanelAllocator;

pub struct Chart {
    pads: Vec<Pad>,
    series: HashMap<SeriesHandle, Series>,
    next_handle: u64,
    visible_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    redraw_requested: bool,
    /// Pads share left/right margins and zoom when enabled.
    pub group_left_margin: bool,
    pub group_right_margin: bool,
    pub group_zoom: bool,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new()
    }
}

impl Chart {
    pub fn new() -> Self {
        let mut chart = Self {
            pads: Vec::new(),
            series: HashMap::new(),
            next_handle: 1,
            visible_range: None,
            redraw_requested: false,
            group_left_margin: false,
            group_right_margin: false,
            group_zoom: false,
        };
        chart.reset();
        chart
    }

    /// Drop every pad and series and rebuild a single full-height pad with
    /// the default look.
    pub fn reset(&mut self) {
        self.pads.clear();
        self.series.clear();
        self.visible_range = None;

        let mut pad = Pad::new(0.0, 1.0);
        for renderer in RendererKind::DEFAULT_SET {
            pad.register_renderer(renderer);
        }
        pad.margins.right = 10.0;
        pad.margins.bottom = 0.0;
        pad.title_enabled = false;
        pad.border_enabled = false;
        pad.back_color = Color32::from_rgb(240, 240, 240);
        pad.axis_left.size = 50.0;
        pad.axis_bottom.grid_dash = DashStyle::Dot;
        pad.axis_left.grid_dash = DashStyle::Dot;
        pad.axis_bottom.axis_type = AxisType::DateTime;
        pad.axis_bottom.label_format = "%H:%M".to_string();
        pad.axis_bottom.title_enabled = false;
        pad.legend.enabled = true;
        pad.legend.position = LegendPosition::TopLeft;
        pad.legend.back_color = Color32::WHITE;
        self.pads.push(pad);

        self.group_left_margin = true;
        self.group_right_margin = true;
        self.group_zoom = true;
        self.redraw_requested = true;
    }

    /// Remove every series from every pad while keeping pad count and layout.
    pub fn clear_series(&mut self) {
        for pad in self.pads.iter_mut() {
            pad.clear_contents();
        }
        self.series.clear();
        self.visible_range = None;
        self.redraw_requested = true;
    }

    pub fn pad_count(&self) -> usize {
        self.pads.len()
    }

    pub fn pads(&self) -> &[Pad] {
        &self.pads
    }

    pub fn pad(&self, index: usize) -> Option<&Pad> {
        self.pads.get(index)
    }

    pub fn pad_mut(&mut self, index: usize) -> Option<&mut Pad> {
        self.pads.get_mut(index)
    }

    pub(crate) fn pads_mut(&mut self) -> &mut Vec<Pad> {
        &mut self.pads
    }

    pub fn series(&self, handle: SeriesHandle) -> Option<&Series> {
        self.series.get(&handle)
    }

    pub fn series_mut(&mut self, handle: SeriesHandle) -> Option<&mut Series> {
        self.series.get_mut(&handle)
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Index of the pad currently showing `handle`.
    pub fn pad_of(&self, handle: SeriesHandle) -> Option<usize> {
        self.pads.iter().position(|p| p.series.contains(&handle))
    }

    /// Store `series` and insert it into pad `pad` at render position `index`.
    ///
    /// The pad must exist; callers go through [`PanelAllocator::ensure`] first.
    pub fn insert_series(&mut self, pad: usize, index: usize, series: Series) -> SeriesHandle {
        let handle = SeriesHandle(self.next_handle);
        self.next_handle += 1;
        self.series.insert(handle, series);
        self.attach_series(pad, index, handle);
        handle
    }

    /// Put an already stored series into pad `pad` at `index`.
    pub fn attach_series(&mut self, pad: usize, index: usize, handle: SeriesHandle) {
        match self.pads.get_mut(pad) {
            Some(p) => {
                p.insert(index, handle);
            }
            None => log::warn!("attach of series {} to missing pad {pad}", handle.0),
        }
    }

    /// Take a series (and its legend entry) off pad `pad`. The data is kept.
    pub fn remove_series(&mut self, pad: usize, handle: SeriesHandle) -> Option<pad::LegendEntry> {
        self.pads.get_mut(pad).and_then(|p| p.remove(handle))
    }

    pub fn add_legend_entry<S: Into<String>>(&mut self, pad: usize, series: SeriesHandle, label: S, color: Color32) {
        if let Some(p) = self.pads.get_mut(pad) {
            p.add_legend_entry(series, label.into(), color);
        }
    }

    /// Recolor a series and every legend entry describing it.
    pub fn set_series_color(&mut self, handle: SeriesHandle, color: Color32) {
        if let Some(s) = self.series.get_mut(&handle) {
            s.set_color(color);
        }
        for pad in self.pads.iter_mut() {
            pad.set_legend_color(handle, color);
        }
    }

    /// Set the time span shown by every pad.
    pub fn set_visible_range(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) {
        self.visible_range = Some((start, end));
        let (min, max) = (format::to_plot_x(start), format::to_plot_x(end));
        for pad in self.pads.iter_mut() {
            pad.set_range_x(min, max);
        }
    }

    pub fn visible_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.visible_range
    }

    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    pub fn redraw_requested(&self) -> bool {
        self.redraw_requested
    }

    /// Consume the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }
}
