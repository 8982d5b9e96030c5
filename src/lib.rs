//! GroupChart crate root: re-exports and module wiring.
//!
//! GroupChart turns a stream of tagged financial records (bars, fills,
//! time-series points, ticks) into a stacked multi-pad chart built on
//! egui/eframe. Records belong to *groups*; a group's `Pad` field picks the
//! pad it is drawn on, its optional `SelectorKey` field puts it behind a
//! selector so only one key's groups are shown at a time.
//!
//! - `sink`: records and the channel producers feed them through
//! - `data`: groups, payloads and drawable series
//! - `chart`: the retained pad/series model and the pad allocator
//! - `engine`: binding, ordering, replay and windowing ([`GroupChart`])
//! - `controllers`: external control of the selector and the visible range
//! - `config`: settings (JSON / YAML) and run-time configuration
//! - `app`: the egui front-end and the native runner

pub mod app;
pub mod chart;
pub mod config;
pub mod controllers;
pub mod data;
pub mod engine;
pub mod error;
pub mod sink;

pub use app::{run_groupchart, GroupChartApp, GroupChartPanel};
pub use chart::Chart;
pub use config::{ChartSettings, GroupChartConfig};
pub use controllers::{SelectorController, SelectorInfo, ViewController, ViewInfo};
pub use data::group::{fields, FieldValue, Group, GroupEvent, GroupId, GroupUpdate};
pub use data::record::{Bar, DataObject, Fill, RecordKind, Side, Tick, TimeSeriesItem};
pub use engine::{DispatchSummary, GroupChart};
pub use error::{ChartError, ConfigError};
pub use sink::{channel, ChartRecord, GroupSink, RecordQueue};
