//! Panel allocator: grows the pad stack on demand.
//!
//! New pads are appended at the bottom. Every existing pad gives up the same
//! share of its height so the new pad gets `fraction` of the canvas, and the
//! new pad copies its look from the first pad. Only the bottom pad shows the
//! time axis labels.

use super::pad::{AxisType, Pad, RendererKind};
use super::Chart;

/// Share of the canvas height handed to each newly appended pad.
pub const DEFAULT_NEW_PAD_FRACTION: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelAllocator {
    fraction: f64,
}

impl Default for PanelAllocator {
    fn default() -> Self {
        Self {
            fraction: DEFAULT_NEW_PAD_FRACTION,
        }
    }
}

impl PanelAllocator {
    /// `fraction` is clamped into `(0, 1)`.
    pub fn new(fraction: f64) -> Self {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.01, 0.9)
        } else {
            DEFAULT_NEW_PAD_FRACTION
        };
        Self { fraction }
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Make sure pad `pad` exists, then apply `label_format` to its value axes
    /// and pin its bottom margin to zero. Never removes pads.
    pub fn ensure(&self, chart: &mut Chart, pad: usize, label_format: &str) {
        while chart.pad_count() <= pad {
            self.append_pad(chart);
        }
        if let Some(p) = chart.pad_mut(pad) {
            p.margins.bottom = 0.0;
            p.axis_bottom.axis_type = AxisType::DateTime;
            p.axis_left.label_format = label_format.to_string();
            p.axis_right.label_format = label_format.to_string();
        }
    }

    /// Append one pad below the existing ones and return its index.
    pub fn append_pad(&self, chart: &mut Chart) -> usize {
        let keep = 1.0 - self.fraction;
        let pads = chart.pads_mut();

        let mut y = 0.0;
        for pad in pads.iter_mut() {
            let height = pad.canvas_height() * keep;
            pad.canvas_y1 = y;
            pad.canvas_y2 = y + height;
            y = pad.canvas_y2;
        }

        let mut new_pad = match (pads.first(), pads.last()) {
            (Some(first), Some(last)) => clone_look(first, last, y),
            _ => Pad::new(0.0, 1.0),
        };
        for renderer in RendererKind::DEFAULT_SET {
            new_pad.register_renderer(renderer);
        }

        if let Some(last) = pads.last_mut() {
            last.axis_bottom.label_enabled = false;
            last.axis_bottom.size = 0.0;
            last.margins.bottom = 0.0;
        }
        pads.push(new_pad);

        let index = pads.len() - 1;
        log::debug!(
            "appended pad {index} at canvas y {y:.4}, {} pads total",
            pads.len()
        );
        chart.request_redraw();
        index
    }
}

/// Build a pad spanning `[y1, 1]` with the cosmetics of `first` and the
/// bottom-axis role taken over from `last`.
fn clone_look(first: &Pad, last: &Pad, y1: f64) -> Pad {
    let mut pad = Pad::new(y1, 1.0);

    pad.title_enabled = last.title_enabled;
    pad.back_color = first.back_color;
    pad.fore_color = first.fore_color;
    pad.border_color = first.border_color;
    pad.border_enabled = first.border_enabled;
    pad.border_width = first.border_width;

    pad.margins.top = 0.0;
    pad.margins.bottom = 10.0;
    pad.margins.left = first.margins.left;
    pad.margins.right = first.margins.right;

    pad.legend = first.legend;

    pad.axis_left.label_enabled = first.axis_left.label_enabled;
    pad.axis_left.title_enabled = first.axis_left.title_enabled;
    pad.axis_left.grid_color = first.axis_left.grid_color;
    pad.axis_left.grid_dash = first.axis_left.grid_dash;
    pad.axis_left.size = 50.0;
    pad.axis_right.label_enabled = last.axis_right.label_enabled;
    pad.axis_right.label_color = first.axis_right.label_color;

    pad.axis_bottom.enabled = true;
    pad.axis_bottom.label_enabled = true;
    pad.axis_bottom.title_enabled = last.axis_bottom.title_enabled;
    pad.axis_bottom.label_color = first.axis_bottom.label_color;
    pad.axis_bottom.grid_color = first.axis_bottom.grid_color;
    pad.axis_bottom.grid_dash = first.axis_bottom.grid_dash;
    pad.axis_bottom.axis_type = AxisType::DateTime;
    pad.axis_bottom.label_format = first.axis_bottom.label_format.clone();
    pad.axis_bottom.size = 20.0;

    pad.x_range = first.x_range;
    pad.axis_bottom.range = first.axis_bottom.range;
    pad.axis_top.range = first.axis_top.range;
    pad.axis_bottom.zoomed = first.axis_bottom.zoomed;
    pad.axis_top.zoomed = first.axis_top.zoomed;

    pad
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_is_clamped() {
        assert_eq!(PanelAllocator::new(5.0).fraction(), 0.9);
        assert_eq!(PanelAllocator::new(f64::NAN).fraction(), DEFAULT_NEW_PAD_FRACTION);
    }

    #[test]
    fn only_bottom_pad_shows_time_labels() {
        let mut chart = Chart::new();
        let alloc = PanelAllocator::default();
        alloc.ensure(&mut chart, 2, "F2");
        let labels: Vec<bool> = chart.pads().iter().map(|p| p.axis_bottom.label_enabled).collect();
        assert_eq!(labels, vec![false, false, true]);
    }
}
