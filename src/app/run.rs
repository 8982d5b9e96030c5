//! Top-level entry point for running the group chart as a native window.

use eframe::egui;

use crate::config::GroupChartConfig;
use crate::sink::RecordQueue;

use super::GroupChartApp;

/// Launch the group chart in a native window.
///
/// The chart engine is built on the UI thread inside the eframe creation
/// callback; producers keep feeding the matching
/// [`GroupSink`](crate::sink::GroupSink) from their own threads.
///
/// The call blocks until the window is closed.
pub fn run_groupchart(queue: RecordQueue, mut cfg: GroupChartConfig) -> eframe::Result<()> {
    let title = cfg.settings.title.clone();
    let mut opts = cfg
        .native_options
        .take()
        .unwrap_or_else(eframe::NativeOptions::default);

    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts
            .viewport
            .clone()
            .with_inner_size(egui::vec2(1400.0, 900.0));
    }

    log::info!("starting {title}");
    eframe::run_native(
        &title,
        opts,
        Box::new(move |cc| {
            // Install Phosphor icon font before creating the app.
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(GroupChartApp::new(queue, &cfg)))
        }),
    )
}
