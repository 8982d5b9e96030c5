//! egui front-end for the group chart.
//!
//! | Sub-module      | Responsibility |
//! | --------------- | -------------- |
//! | `chart_panel`   | [`GroupChartPanel`]: per-frame dispatch, controllers, selector bar |
//! | `pad_plot`      | Drawing one pad (candles, fill markers, lines, ticks) with `egui_plot` |
//! | `chart_app`     | Standalone [`GroupChartApp`] (eframe) wrapper |
//! | `run`           | Top-level [`run_groupchart()`] entry point |

mod chart_app;
mod chart_panel;
mod pad_plot;
mod run;

pub use chart_app::GroupChartApp;
pub use chart_panel::GroupChartPanel;
pub use run::run_groupchart;
