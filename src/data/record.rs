//! Record payloads carried by group events.

use chrono::{DateTime, Utc};

/// The record kinds the engine can bind to a drawable series.
///
/// Every kind has a matching renderer registered on each pad (see
/// [`RendererKind`](crate::chart::pad::RendererKind)); adding a kind means
/// extending both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    Bar,
    Fill,
    TimeSeries,
    Tick,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Bar,
        RecordKind::Fill,
        RecordKind::TimeSeries,
        RecordKind::Tick,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::Bar => "Bar",
            RecordKind::Fill => "Fill",
            RecordKind::TimeSeries => "TimeSeries",
            RecordKind::Tick => "Tick",
        }
    }
}

/// OHLC bar opened at `datetime`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub datetime: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

/// An execution marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub datetime: DateTime<Utc>,
    pub side: Side,
    pub price: f64,
    pub qty: f64,
    pub text: Option<String>,
}

/// A timestamped scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSeriesItem {
    pub datetime: DateTime<Utc>,
    pub value: f64,
}

/// A trade print.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub datetime: DateTime<Utc>,
    pub price: f64,
    pub size: f64,
}

/// Payload of a [`GroupEvent`](crate::data::group::GroupEvent).
#[derive(Debug, Clone, PartialEq)]
pub enum DataObject {
    Bar(Bar),
    Fill(Fill),
    TimeSeriesItem(TimeSeriesItem),
    Tick(Tick),
    /// A payload type this crate does not understand. It is never bound but its
    /// timestamp still moves the visible window.
    Other { type_id: u16, datetime: DateTime<Utc> },
}

impl DataObject {
    pub fn kind(&self) -> Option<RecordKind> {
        match self {
            DataObject::Bar(_) => Some(RecordKind::Bar),
            DataObject::Fill(_) => Some(RecordKind::Fill),
            DataObject::TimeSeriesItem(_) => Some(RecordKind::TimeSeries),
            DataObject::Tick(_) => Some(RecordKind::Tick),
            DataObject::Other { .. } => None,
        }
    }

    pub fn datetime(&self) -> DateTime<Utc> {
        match self {
            DataObject::Bar(b) => b.datetime,
            DataObject::Fill(f) => f.datetime,
            DataObject::TimeSeriesItem(i) => i.datetime,
            DataObject::Tick(t) => t.datetime,
            DataObject::Other { datetime, .. } => *datetime,
        }
    }
}

impl From<Bar> for DataObject {
    fn from(b: Bar) -> Self {
        DataObject::Bar(b)
    }
}

impl From<Fill> for DataObject {
    fn from(f: Fill) -> Self {
        DataObject::Fill(f)
    }
}

impl From<TimeSeriesItem> for DataObject {
    fn from(i: TimeSeriesItem) -> Self {
        DataObject::TimeSeriesItem(i)
    }
}

impl From<Tick> for DataObject {
    fn from(t: Tick) -> Self {
        DataObject::Tick(t)
    }
}
