//! Drawable series: per-(group, kind) accumulators rendered by a pad.

use egui::Color32;
use egui_plot::{LineStyle, MarkerShape};

use crate::chart::format::to_plot_x;
use crate::data::record::{Bar, DataObject, Fill, RecordKind, Tick, TimeSeriesItem};

/// Opaque handle of a series stored in the [`Chart`](crate::chart::Chart).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesHandle(pub(crate) u64);

impl SeriesHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// The visual presentation of a series.
#[derive(Debug, Clone)]
pub struct SeriesLook {
    pub color: Color32,
    pub width: f32,
    pub style: LineStyle,
    pub marker: MarkerShape,
    pub point_size: f32,
}

impl Default for SeriesLook {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            width: 1.5,
            style: LineStyle::Solid,
            marker: MarkerShape::Circle,
            point_size: 2.0,
        }
    }
}

/// Accumulated data of one series; one variant per [`RecordKind`].
#[derive(Debug, Clone)]
pub enum SeriesData {
    Bars(Vec<Bar>),
    Fills(Vec<Fill>),
    Points(Vec<TimeSeriesItem>),
    Ticks(Vec<Tick>),
}

impl SeriesData {
    pub fn new(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Bar => SeriesData::Bars(Vec::new()),
            RecordKind::Fill => SeriesData::Fills(Vec::new()),
            RecordKind::TimeSeries => SeriesData::Points(Vec::new()),
            RecordKind::Tick => SeriesData::Ticks(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SeriesData::Bars(v) => v.len(),
            SeriesData::Fills(v) => v.len(),
            SeriesData::Points(v) => v.len(),
            SeriesData::Ticks(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A renderer-bound accumulator for one record kind's data of one group.
#[derive(Debug, Clone)]
pub struct Series {
    pub name: String,
    pub kind: RecordKind,
    pub look: SeriesLook,
    pub data: SeriesData,
}

impl Series {
    pub fn new<S: Into<String>>(name: S, kind: RecordKind, look: SeriesLook) -> Self {
        Self {
            name: name.into(),
            kind,
            look,
            data: SeriesData::new(kind),
        }
    }

    /// Push a payload into the series. Returns `false` if the payload does not
    /// belong to this series' kind.
    pub fn append(&mut self, obj: &DataObject) -> bool {
        match (&mut self.data, obj) {
            (SeriesData::Bars(v), DataObject::Bar(b)) => v.push(*b),
            (SeriesData::Fills(v), DataObject::Fill(f)) => v.push(f.clone()),
            (SeriesData::Points(v), DataObject::TimeSeriesItem(i)) => v.push(*i),
            (SeriesData::Ticks(v), DataObject::Tick(t)) => v.push(*t),
            _ => return false,
        }
        true
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn set_color(&mut self, color: Color32) {
        self.look.color = color;
    }

    /// Timestamp span of the accumulated data.
    pub fn time_bounds(&self) -> Option<(f64, f64)> {
        let ts: Vec<f64> = match &self.data {
            SeriesData::Bars(v) => v.iter().map(|b| to_plot_x(b.datetime)).collect(),
            SeriesData::Fills(v) => v.iter().map(|f| to_plot_x(f.datetime)).collect(),
            SeriesData::Points(v) => v.iter().map(|i| to_plot_x(i.datetime)).collect(),
            SeriesData::Ticks(v) => v.iter().map(|t| to_plot_x(t.datetime)).collect(),
        };
        let min = ts.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = ts.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        (min <= max).then_some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn append_rejects_foreign_payload() {
        let mut s = Series::new("ES", RecordKind::Bar, SeriesLook::default());
        let item = TimeSeriesItem {
            datetime: Utc.timestamp_opt(100, 0).unwrap(),
            value: 1.0,
        };
        assert!(!s.append(&DataObject::TimeSeriesItem(item)));
        assert!(s.is_empty());
    }

    #[test]
    fn time_bounds_cover_all_points() {
        let mut s = Series::new("sma", RecordKind::TimeSeries, SeriesLook::default());
        for t in [300, 100, 200] {
            s.append(&DataObject::TimeSeriesItem(TimeSeriesItem {
                datetime: Utc.timestamp_opt(t, 0).unwrap(),
                value: 0.0,
            }));
        }
        assert_eq!(s.time_bounds(), Some((100.0, 300.0)));
    }
}
