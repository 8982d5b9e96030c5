//! Standalone application wrapper.

use eframe::egui;

use crate::config::GroupChartConfig;
use crate::sink::RecordQueue;

use super::GroupChartPanel;

/// Standalone group chart that implements [`eframe::App`].
pub struct GroupChartApp {
    pub panel: GroupChartPanel,
}

impl GroupChartApp {
    pub fn new(queue: RecordQueue, cfg: &GroupChartConfig) -> Self {
        Self {
            panel: GroupChartPanel::new(queue, cfg),
        }
    }
}

impl eframe::App for GroupChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.panel.update(ui);
        });

        // Records arrive from other threads; keep polling the queue (~60 fps).
        ctx.request_repaint_after(std::time::Duration::from_millis(16));
    }
}
