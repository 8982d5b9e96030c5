//! Drawing one pad with `egui_plot`.

use eframe::egui;
use egui::{Color32, Stroke};
use egui_plot::{BoxElem, BoxPlot, BoxSpread, Corner, Legend, Line, MarkerShape, Plot, PlotUi, Points};

use crate::chart::format::{format_time, format_value, to_plot_x};
use crate::chart::pad::{LegendPosition, Pad};
use crate::chart::Chart;
use crate::data::record::{Fill, Side};
use crate::data::series::{Series, SeriesData, SeriesHandle};

const UP_COLOR: Color32 = Color32::from_rgb(38, 166, 91);
const DOWN_COLOR: Color32 = Color32::from_rgb(214, 69, 65);

/// Per-frame drawing parameters shared by every pad.
pub(crate) struct PadPlotStyle {
    /// Candle body width in plot X units (seconds).
    pub bar_width: f64,
    /// Snap the X bounds to the pad's range this frame.
    pub follow: bool,
    /// Axis/cursor link group of the stacked pads.
    pub link_id: egui::Id,
}

pub(crate) fn show_pad(ui: &mut egui::Ui, chart: &Chart, index: usize, height: f32, style: &PadPlotStyle) {
    let Some(pad) = chart.pad(index) else {
        return;
    };
    let time_format = pad.axis_bottom.label_format.clone();
    let value_format = pad.axis_left.label_format.clone();

    let mut plot = Plot::new(("groupchart_pad", index))
        .height(height)
        .link_axis(style.link_id, [true, false])
        .link_cursor(style.link_id, [true, false])
        .show_axes([pad.axis_bottom.label_enabled, pad.axis_left.enabled])
        .x_axis_formatter(move |mark, _range| format_time(mark.value, &time_format))
        .y_axis_formatter(move |mark, _range| format_value(mark.value, &value_format));
    if pad.legend.enabled {
        plot = plot.legend(Legend::default().position(corner(pad.legend.position)));
    }

    plot.show(ui, |plot_ui| {
        if style.follow && chart.visible_range().is_some() {
            let (x_min, x_max) = pad.x_range;
            plot_ui.set_plot_bounds_x(x_min..=x_max);
        }
        for handle in pad.series() {
            if let Some(series) = chart.series(*handle) {
                draw_series(plot_ui, pad, series, *handle, style.bar_width);
            }
        }
    });
}

fn draw_series(
    plot_ui: &mut PlotUi,
    pad: &Pad,
    series: &Series,
    handle: SeriesHandle,
    bar_width: f64,
) {
    // Only series with a legend row get a name; egui_plot hides unnamed items.
    let name = pad
        .legend_entries()
        .iter()
        .find(|e| e.series == handle)
        .map(|e| e.label.clone())
        .unwrap_or_default();
    let look = &series.look;

    match &series.data {
        SeriesData::Bars(bars) => {
            let boxes: Vec<BoxElem> = bars
                .iter()
                .map(|b| {
                    let color = if b.close >= b.open { UP_COLOR } else { DOWN_COLOR };
                    let (lo, hi) = (b.open.min(b.close), b.open.max(b.close));
                    BoxElem::new(
                        to_plot_x(b.datetime),
                        BoxSpread::new(b.low, lo, (lo + hi) / 2.0, hi, b.high),
                    )
                    .box_width(bar_width)
                    .whisker_width(0.0)
                    .fill(color)
                    .stroke(Stroke::new(1.0, color))
                })
                .collect();
            plot_ui.box_plot(BoxPlot::new(name, boxes).color(look.color));
        }
        SeriesData::Fills(fills) => {
            let (buys, sells): (Vec<_>, Vec<_>) = fills.iter().partition(|f| f.side == Side::Buy);
            let to_pts = |v: Vec<&Fill>| -> Vec<[f64; 2]> {
                v.into_iter().map(|f| [to_plot_x(f.datetime), f.price]).collect()
            };
            if !buys.is_empty() {
                plot_ui.points(
                    Points::new(name.clone(), to_pts(buys))
                        .shape(MarkerShape::Up)
                        .filled(true)
                        .radius(5.0)
                        .color(UP_COLOR),
                );
            }
            if !sells.is_empty() {
                plot_ui.points(
                    Points::new(name, to_pts(sells))
                        .shape(MarkerShape::Down)
                        .filled(true)
                        .radius(5.0)
                        .color(DOWN_COLOR),
                );
            }
        }
        SeriesData::Points(items) => {
            let pts: Vec<[f64; 2]> = items
                .iter()
                .map(|p| [to_plot_x(p.datetime), p.value])
                .collect();
            plot_ui.line(
                Line::new(name, pts)
                    .color(look.color)
                    .width(look.width)
                    .style(look.style),
            );
        }
        SeriesData::Ticks(ticks) => {
            let pts: Vec<[f64; 2]> = ticks
                .iter()
                .map(|t| [to_plot_x(t.datetime), t.price])
                .collect();
            plot_ui.points(
                Points::new(name, pts)
                    .shape(look.marker)
                    .radius(look.point_size)
                    .color(look.color),
            );
        }
    }
}

fn corner(position: LegendPosition) -> Corner {
    match position {
        LegendPosition::TopLeft => Corner::LeftTop,
        LegendPosition::TopRight => Corner::RightTop,
        LegendPosition::BottomLeft => Corner::LeftBottom,
        LegendPosition::BottomRight => Corner::RightBottom,
    }
}
