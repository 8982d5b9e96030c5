//! Group binding table: which drawable series backs which (group, kind) pair.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use egui::Color32;

use crate::chart::{Chart, PanelAllocator};
use crate::data::group::{fields, Group, GroupId, GroupUpdate};
use crate::data::record::{DataObject, RecordKind};
use crate::data::series::{Series, SeriesHandle, SeriesLook};
use crate::engine::ordering::PanelOrder;
use crate::error::{ChartError, Result};

/// The drawable bound to one (group, kind) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupBinding {
    pub series: SeriesHandle,
    /// Render position the series was inserted at.
    pub index: usize,
}

/// Per-group state: current pad, label format, color and bindings by kind.
#[derive(Debug, Clone)]
pub struct GroupItem {
    pub group: Arc<Group>,
    pub pad: usize,
    pub format: String,
    pub color: Option<Color32>,
    pub(crate) bindings: BTreeMap<RecordKind, GroupBinding>,
}

impl GroupItem {
    fn new(group: Arc<Group>, pad: usize) -> Self {
        Self {
            format: group.label_format().to_string(),
            color: group.color(),
            group,
            pad,
            bindings: BTreeMap::new(),
        }
    }

    pub fn binding(&self, kind: RecordKind) -> Option<&GroupBinding> {
        self.bindings.get(&kind)
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&RecordKind, &GroupBinding)> {
        self.bindings.iter()
    }
}

/// Everything a bind touches besides the table itself.
pub struct BindContext<'a> {
    pub chart: &'a mut Chart,
    pub order: &'a mut PanelOrder,
    pub allocator: &'a PanelAllocator,
    /// Active selector key (or `""`), naming the drawn order to insert into.
    pub selector_key: &'a str,
    pub default_color: Color32,
}

#[derive(Debug, Default, Clone)]
pub struct GroupTable {
    items: HashMap<GroupId, GroupItem>,
}

impl GroupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `group` on pad `pad`. Re-registering an id refreshes its fields
    /// and keeps its bindings.
    pub fn register(&mut self, group: Arc<Group>, pad: usize) {
        match self.items.get_mut(&group.id) {
            Some(item) => {
                item.format = group.label_format().to_string();
                item.color = group.color().or(item.color);
                item.group = group;
            }
            None => {
                self.items.insert(group.id, GroupItem::new(group, pad));
            }
        }
    }

    pub fn get(&self, id: GroupId) -> Option<&GroupItem> {
        self.items.get(&id)
    }

    pub fn contains(&self, id: GroupId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Return the drawable of (`group`, `kind`), creating it on first use.
    ///
    /// A new drawable is placed on the group's pad (grown if needed) at the
    /// position the ordering resolver picks, and gets a legend entry.
    pub fn bind(&mut self, group: &Group, kind: RecordKind, ctx: &mut BindContext<'_>) -> Result<(bool, SeriesHandle)> {
        let item = self
            .items
            .get_mut(&group.id)
            .ok_or(ChartError::UnregisteredGroup(group.id))?;
        if let Some(binding) = item.bindings.get(&kind) {
            return Ok((false, binding.series));
        }

        let pad = item.pad;
        ctx.allocator.ensure(ctx.chart, pad, &item.format);
        let index = ctx.order.index_for(group.id, pad, ctx.selector_key);

        let color = item.color.unwrap_or(ctx.default_color);
        let series = Series::new(group.name.clone(), kind, look_for(kind, group, color));
        let handle = ctx.chart.insert_series(pad, index, series);
        ctx.chart.add_legend_entry(pad, handle, group.name.clone(), color);

        item.bindings.insert(kind, GroupBinding { series: handle, index });
        log::debug!(
            "bound group {} ({}) {} to pad {pad} at {index}",
            group.id,
            group.name,
            kind.name()
        );
        Ok((true, handle))
    }

    /// Push `obj` into the drawable bound to (`group`, `kind`).
    pub fn append(&self, group: GroupId, kind: RecordKind, obj: &DataObject, chart: &mut Chart) -> bool {
        let Some(binding) = self.items.get(&group).and_then(|i| i.bindings.get(&kind)) else {
            return false;
        };
        chart
            .series_mut(binding.series)
            .is_some_and(|series| series.append(obj))
    }

    /// Apply a `Pad` or `Color` update. Other field names are ignored.
    pub fn apply_update(&mut self, update: &GroupUpdate, ctx: &mut BindContext<'_>) -> Result<()> {
        let item = self
            .items
            .get_mut(&update.group_id)
            .ok_or(ChartError::UnregisteredGroup(update.group_id))?;

        match update.field_name.as_str() {
            fields::PAD => {
                let Some(new_pad) = update.value.as_pad() else {
                    log::warn!(
                        "ignoring Pad update for group {} with value {:?}",
                        update.group_id,
                        update.value
                    );
                    return Ok(());
                };
                let old_pad = item.pad;
                let format = update.label_format.clone().unwrap_or_else(|| item.format.clone());

                // Same pad: keep the group's rank and drawables, refresh the format only.
                if new_pad == old_pad {
                    if !item.bindings.is_empty() && format != item.format {
                        ctx.allocator.ensure(ctx.chart, new_pad, &format);
                        ctx.chart.request_redraw();
                    }
                    item.format = format;
                    return Ok(());
                }

                ctx.order.reassign(update.group_id, new_pad);
                if !item.bindings.is_empty() {
                    ctx.allocator.ensure(ctx.chart, new_pad, &format);
                }
                for binding in item.bindings.values_mut() {
                    let legend = ctx.chart.remove_series(old_pad, binding.series);
                    let index = ctx.order.index_for(update.group_id, new_pad, ctx.selector_key);
                    ctx.chart.attach_series(new_pad, index, binding.series);
                    if let Some(entry) = legend {
                        ctx.chart
                            .add_legend_entry(new_pad, entry.series, entry.label, entry.color);
                    }
                    binding.index = index;
                }
                item.pad = new_pad;
                item.format = format;
                log::debug!("moved group {} from pad {old_pad} to pad {new_pad}", update.group_id);
                ctx.chart.request_redraw();
            }
            fields::COLOR => {
                let Some(color) = update.value.as_color() else {
                    log::warn!(
                        "ignoring Color update for group {} with value {:?}",
                        update.group_id,
                        update.value
                    );
                    return Ok(());
                };
                item.color = Some(color);
                if let Some(binding) = item.bindings.get(&RecordKind::TimeSeries) {
                    ctx.chart.set_series_color(binding.series, color);
                }
                ctx.chart.request_redraw();
            }
            other => log::trace!("ignoring update of field {other} for group {}", update.group_id),
        }
        Ok(())
    }

    /// Drop every binding but keep the groups.
    pub fn clear_bindings(&mut self) {
        for item in self.items.values_mut() {
            item.bindings.clear();
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Line-like kinds take their look from the group's fields.
fn look_for(kind: RecordKind, group: &Group, color: Color32) -> SeriesLook {
    let mut look = SeriesLook {
        color,
        ..SeriesLook::default()
    };
    match kind {
        RecordKind::TimeSeries | RecordKind::Tick => {
            if let Some(width) = group.width() {
                look.width = width.max(0.1);
            }
        }
        RecordKind::Bar | RecordKind::Fill => {}
    }
    look
}
