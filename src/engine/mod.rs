//! The binding-and-layout engine.
//!
//! [`GroupChart`] ties the pieces together:
//!
//! | Sub-module    | Responsibility |
//! | ------------- | -------------- |
//! | [`binding`]   | (group, kind) → drawable series, pad moves and recoloring |
//! | [`ordering`]  | panel order / drawn order and insertion index resolution |
//! | [`replay`]    | per-selector event history and selector choices |
//! | [`window`]    | visible time span |
//! | `dispatch`    | the per-tick queue consumer |
//!
//! # Threading
//!
//! All state lives on one owner thread (the UI thread). `GroupChart` is
//! `!Send`, so it cannot be moved to another thread.
//! Producers on other threads talk to it only through a
//! [`GroupSink`](crate::sink::GroupSink); their records are applied in FIFO
//! order when the owner calls [`GroupChart::dispatch`].

pub mod binding;
mod dispatch;
pub mod ordering;
pub mod replay;
pub mod window;

use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;

use chrono::TimeDelta;
use egui::Color32;

use crate::chart::{Chart, PanelAllocator};
use crate::config::GroupChartConfig;
use crate::data::group::{fields, Group, GroupEvent, GroupId, GroupUpdate};
use crate::data::record::RecordKind;
use crate::data::series::SeriesHandle;
use crate::error::{ChartError, Result};

use binding::{BindContext, GroupBinding, GroupItem, GroupTable};
use ordering::PanelOrder;
use replay::{ReplayBuffer, SelectorState};
use window::WindowTracker;

pub use dispatch::DispatchSummary;

pub struct GroupChart {
    chart: Chart,
    allocator: PanelAllocator,
    table: GroupTable,
    order: PanelOrder,
    replay: ReplayBuffer,
    selector: SelectorState,
    window: WindowTracker,
    default_color: Color32,
    default_format: String,
    _owner_thread: PhantomData<Rc<()>>,
}

impl Default for GroupChart {
    fn default() -> Self {
        Self::new(&GroupChartConfig::default())
    }
}

impl GroupChart {
    pub fn new(cfg: &GroupChartConfig) -> Self {
        let settings = &cfg.settings;
        Self {
            chart: Chart::new(),
            allocator: PanelAllocator::new(settings.new_pad_fraction),
            table: GroupTable::new(),
            order: PanelOrder::new(),
            replay: ReplayBuffer::new(),
            selector: SelectorState::default(),
            window: WindowTracker::new(
                TimeDelta::seconds(settings.bar_interval_secs),
                settings.trailing_bars,
            ),
            default_color: settings.default_color(),
            default_format: settings.default_label_format.clone(),
            _owner_thread: PhantomData,
        }
    }

    // ── Registration ─────────────────────────────────────────────────────

    /// Start tracking `group`. Returns `false` (and tracks nothing) when the
    /// group has no usable `Pad` field.
    pub fn on_new_group(&mut self, group: Group) -> bool {
        let Some(pad) = group.pad() else {
            log::warn!("rejecting group {} ({}): no Pad field", group.id, group.name);
            return false;
        };
        let group = if group.field(fields::FORMAT).is_none() {
            Arc::new(group.with_format(self.default_format.clone()))
        } else {
            Arc::new(group)
        };

        let pad = match self.order.pad_of(group.id) {
            Some(current) => current,
            None => {
                self.order.assign(group.id, pad);
                pad
            }
        };
        self.table.register(group.clone(), pad);

        if group.has_selector_key() {
            let key = group.selector_key();
            if self.selector.register(key) {
                self.replay.ensure_key(key);
                log::debug!("new selector choice {key:?}");
            }
        }
        true
    }

    // ── Per-event processing ─────────────────────────────────────────────

    /// Bind (if needed) and append one event; unknown kinds are skipped.
    pub fn on_group_event(&mut self, event: &GroupEvent) -> Result<Option<SeriesHandle>> {
        if !self.table.contains(event.group_id()) {
            return Err(ChartError::UnregisteredGroup(event.group_id()));
        }
        let Some(kind) = event.kind() else {
            return Ok(None);
        };
        let (_, handle) = self.bind(&event.group, kind)?;
        self.table
            .append(event.group_id(), kind, &event.obj, &mut self.chart);
        Ok(Some(handle))
    }

    /// Look up or create the drawable of (`group`, `kind`).
    pub fn bind(&mut self, group: &Group, kind: RecordKind) -> Result<(bool, SeriesHandle)> {
        let mut ctx = BindContext {
            chart: &mut self.chart,
            order: &mut self.order,
            allocator: &self.allocator,
            selector_key: self.selector.active_key(),
            default_color: self.default_color,
        };
        self.table.bind(group, kind, &mut ctx)
    }

    /// Apply a `Pad` / `Color` field update.
    pub fn apply_update(&mut self, update: &GroupUpdate) -> Result<()> {
        let mut ctx = BindContext {
            chart: &mut self.chart,
            order: &mut self.order,
            allocator: &self.allocator,
            selector_key: self.selector.active_key(),
            default_color: self.default_color,
        };
        self.table.apply_update(update, &mut ctx)
    }

    /// Process one staged event and let it drive the window.
    pub(crate) fn process_event(&mut self, event: &GroupEvent, last_in_batch: bool) -> Result<()> {
        self.on_group_event(event)?;
        if let Some((start, end)) = self.window.on_event(event.datetime(), last_in_batch) {
            self.chart.set_visible_range(start, end);
            self.chart.request_redraw();
        }
        Ok(())
    }

    // ── Selector ─────────────────────────────────────────────────────────

    /// Make `key` the active selector and rebuild the view from its history.
    ///
    /// Bindings are dropped (groups are kept), every pad is emptied, the
    /// window forgets its anchor, then the recorded events of `key` are
    /// processed again in arrival order.
    pub fn select(&mut self, key: &str) -> Result<()> {
        self.selector.set_active(key);
        self.replay.ensure_key(key);
        self.table.clear_bindings();
        self.order.clear_drawn();
        self.chart.clear_series();
        self.window.reset();

        let events = self.replay.events(key).to_vec();
        log::debug!("replaying {} events for selector {key:?}", events.len());
        let n = events.len();
        for (i, event) in events.iter().enumerate() {
            self.process_event(event, i + 1 == n)?;
        }
        self.chart.request_redraw();
        Ok(())
    }

    pub fn active_selector(&self) -> Option<&str> {
        self.selector.active()
    }

    pub fn selector_choices(&self) -> &[String] {
        self.selector.choices()
    }

    // ── Resets ───────────────────────────────────────────────────────────

    /// Forget everything: groups, bindings, history, selector choices and
    /// pads. The chart is back to a single empty pad.
    pub fn clear(&mut self) {
        self.table.clear();
        self.order.clear();
        self.replay.clear();
        self.selector.clear();
        self.window.reset();
        self.chart.reset();
        log::debug!("chart cleared");
    }

    /// Let the next processed event become the window anchor.
    pub fn reanchor_window(&mut self) {
        self.window.reset();
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    pub fn chart_mut(&mut self) -> &mut Chart {
        &mut self.chart
    }

    pub fn allocator(&self) -> &PanelAllocator {
        &self.allocator
    }

    /// Grow the pad stack so pad `pad` exists, then apply `label_format` to it.
    pub fn ensure_pad(&mut self, pad: usize, label_format: &str) {
        self.allocator.ensure(&mut self.chart, pad, label_format);
    }

    pub fn group(&self, id: GroupId) -> Option<&GroupItem> {
        self.table.get(id)
    }

    pub fn group_count(&self) -> usize {
        self.table.len()
    }

    pub fn binding(&self, id: GroupId, kind: RecordKind) -> Option<&GroupBinding> {
        self.table.get(id).and_then(|item| item.binding(kind))
    }

    pub fn panel_order(&self, pad: usize) -> Option<&[GroupId]> {
        self.order.panel_order(pad)
    }

    /// Render order of drawables; a group repeats once per bound kind.
    pub fn drawn_order(&self, key: &str, pad: usize) -> Option<&[GroupId]> {
        self.order.drawn_order(key, pad)
    }

    /// Groups drawn in (`key`, `pad`), one entry per group.
    pub fn drawn_groups(&self, key: &str, pad: usize) -> Vec<GroupId> {
        self.order.drawn_groups(key, pad)
    }

    pub fn replay_buffer(&self) -> &ReplayBuffer {
        &self.replay
    }

    pub fn window(&self) -> &WindowTracker {
        &self.window
    }
}
