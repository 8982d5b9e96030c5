//! The central widget: owns the engine and the record queue.

use eframe::egui;
use egui_phosphor::regular::{CROSSHAIR, FUNNEL};

use crate::config::GroupChartConfig;
use crate::controllers::{SelectorController, ViewController};
use crate::engine::GroupChart;
use crate::sink::RecordQueue;

use super::pad_plot::{self, PadPlotStyle};

/// Label shown for the empty selector key.
const NO_KEY_LABEL: &str = "(none)";

/// Widget that drains the record queue every frame and draws the pads.
///
/// Can be run standalone through [`GroupChartApp`](super::GroupChartApp) or
/// embedded in a host egui application by calling [`update`](Self::update)
/// from any `Ui`. Either way it must stay on the UI thread.
pub struct GroupChartPanel {
    engine: GroupChart,
    queue: RecordQueue,
    selector_ctrl: Option<SelectorController>,
    view_ctrl: Option<ViewController>,
    /// Set when new data moved the window; the next frame snaps the plots to it.
    follow_pending: bool,
}

impl GroupChartPanel {
    pub fn new(queue: RecordQueue, cfg: &GroupChartConfig) -> Self {
        Self {
            engine: GroupChart::new(cfg),
            queue,
            selector_ctrl: cfg.selector_controller.clone(),
            view_ctrl: cfg.view_controller.clone(),
            follow_pending: false,
        }
    }

    pub fn engine(&self) -> &GroupChart {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GroupChart {
        &mut self.engine
    }

    /// Per-frame update: apply controller requests, ingest records, draw.
    pub fn update(&mut self, ui: &mut egui::Ui) {
        self.update_data();
        self.render_toolbar(ui);
        self.render_pads(ui);
        self.publish_controllers();
    }

    /// The data-only pass: controller requests first, then one queue drain.
    pub fn update_data(&mut self) {
        if let Some(key) = self.selector_ctrl.as_ref().and_then(|c| c.take_request()) {
            self.select(&key);
        }
        if self.view_ctrl.as_ref().is_some_and(|c| c.take_reanchor()) {
            self.engine.reanchor_window();
        }

        match self.engine.dispatch(&self.queue) {
            Ok(Some(summary)) => {
                log::trace!("{summary:?}");
            }
            Ok(None) => {}
            Err(e) => log::error!("record batch referenced an unregistered group: {e}"),
        }
        if self.engine.chart_mut().take_redraw_request() {
            self.follow_pending = true;
        }
    }

    fn select(&mut self, key: &str) {
        if let Err(e) = self.engine.select(key) {
            log::error!("selector switch to {key:?} failed: {e}");
        }
        self.follow_pending = true;
    }

    fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        let mut picked: Option<String> = None;
        let mut reanchor = false;

        ui.horizontal(|ui| {
            let choices = self.engine.selector_choices();
            if !choices.is_empty() {
                ui.label(FUNNEL);
                let active = self.engine.active_selector().unwrap_or_default();
                egui::ComboBox::from_id_salt("groupchart_selector")
                    .selected_text(display_key(active))
                    .show_ui(ui, |ui| {
                        for choice in choices {
                            if ui
                                .selectable_label(choice == active, display_key(choice))
                                .clicked()
                                && choice != active
                            {
                                picked = Some(choice.clone());
                            }
                        }
                    });
                ui.separator();
            }

            if ui
                .button(format!("{CROSSHAIR} Follow"))
                .on_hover_text("Snap the view back to the latest data")
                .clicked()
            {
                reanchor = true;
            }

            ui.separator();
            ui.label(format!(
                "{} groups, {} pads",
                self.engine.group_count(),
                self.engine.chart().pad_count()
            ));
        });

        if let Some(key) = picked {
            self.select(&key);
        }
        if reanchor {
            self.engine.reanchor_window();
            self.follow_pending = true;
        }
    }

    fn render_pads(&mut self, ui: &mut egui::Ui) {
        let follow = std::mem::take(&mut self.follow_pending);
        let chart = self.engine.chart();
        let style = PadPlotStyle {
            bar_width: self.engine.window().bar_interval().num_milliseconds() as f64 / 1_000.0 * 0.7,
            follow,
            link_id: ui.id().with("groupchart_pads"),
        };

        let total = ui.available_height();
        for (index, pad) in chart.pads().iter().enumerate() {
            let height = (pad.canvas_height() as f32 * total).max(24.0);
            pad_plot::show_pad(ui, chart, index, height, &style);
        }
    }

    fn publish_controllers(&self) {
        if let Some(ctrl) = &self.selector_ctrl {
            ctrl.publish(self.engine.selector_choices(), self.engine.active_selector());
        }
        if let Some(ctrl) = &self.view_ctrl {
            let chart = self.engine.chart();
            ctrl.publish(chart.visible_range(), chart.pad_count());
        }
    }
}

fn display_key(key: &str) -> &str {
    if key.is_empty() {
        NO_KEY_LABEL
    } else {
        key
    }
}
