//! Producer side: records and the channel that carries them to the chart.
//!
//! - Register a [`Group`] first. Groups without a `Pad` field are refused.
//! - Then send events for it, singly or in chunks, from any thread.
//! - The UI thread drains the [`RecordQueue`] once per frame.

use std::sync::mpsc::{Receiver, SendError, Sender};
use std::sync::Arc;

use crate::data::group::{Group, GroupEvent, GroupUpdate};
use crate::data::record::{Bar, DataObject, Fill, Tick, TimeSeriesItem};

/// Messages sent over the channel to drive the chart.
#[derive(Debug, Clone)]
pub enum ChartRecord {
    /// Register a group. Must precede every event naming it.
    NewGroup(Group),
    /// One data point of a registered group.
    Event(GroupEvent),
    /// Change a group's `Pad` or `Color` field.
    Update(GroupUpdate),
    /// The upstream stream restarted; everything received so far is void.
    StreamCleared,
}

/// Create a connected sink/queue pair.
pub fn channel() -> (GroupSink, RecordQueue) {
    let (tx, rx) = std::sync::mpsc::channel();
    (GroupSink { tx }, RecordQueue { rx })
}

/// Cloneable sender used by producers.
#[derive(Clone)]
pub struct GroupSink {
    tx: Sender<ChartRecord>,
}

impl GroupSink {
    /// Queue a group for registration and return the shared handle events
    /// should carry. Returns `Ok(None)` without sending anything when the group
    /// has no usable `Pad` field.
    pub fn register_group(&self, group: Group) -> Result<Option<Arc<Group>>, SendError<ChartRecord>> {
        if group.pad().is_none() {
            log::warn!("not registering group {} ({}): no Pad field", group.id, group.name);
            return Ok(None);
        }
        let handle = Arc::new(group.clone());
        self.tx.send(ChartRecord::NewGroup(group))?;
        Ok(Some(handle))
    }

    pub fn send_event(&self, group: &Arc<Group>, obj: DataObject) -> Result<(), SendError<ChartRecord>> {
        self.tx
            .send(ChartRecord::Event(GroupEvent::new(group.clone(), obj)))
    }

    /// Send a chunk of payloads for one group.
    pub fn send_events<I>(&self, group: &Arc<Group>, objs: I) -> Result<(), SendError<ChartRecord>>
    where
        I: IntoIterator<Item = DataObject>,
    {
        for obj in objs {
            self.send_event(group, obj)?;
        }
        Ok(())
    }

    #[inline]
    pub fn send_bar(&self, group: &Arc<Group>, bar: Bar) -> Result<(), SendError<ChartRecord>> {
        self.send_event(group, DataObject::Bar(bar))
    }

    #[inline]
    pub fn send_fill(&self, group: &Arc<Group>, fill: Fill) -> Result<(), SendError<ChartRecord>> {
        self.send_event(group, DataObject::Fill(fill))
    }

    #[inline]
    pub fn send_point(&self, group: &Arc<Group>, item: TimeSeriesItem) -> Result<(), SendError<ChartRecord>> {
        self.send_event(group, DataObject::TimeSeriesItem(item))
    }

    #[inline]
    pub fn send_tick(&self, group: &Arc<Group>, tick: Tick) -> Result<(), SendError<ChartRecord>> {
        self.send_event(group, DataObject::Tick(tick))
    }

    pub fn send_update(&self, update: GroupUpdate) -> Result<(), SendError<ChartRecord>> {
        self.tx.send(ChartRecord::Update(update))
    }

    /// Tell the chart the upstream stream restarted.
    pub fn clear_stream(&self) -> Result<(), SendError<ChartRecord>> {
        self.tx.send(ChartRecord::StreamCleared)
    }

    /// Send a raw record.
    pub fn send(&self, record: ChartRecord) -> Result<(), SendError<ChartRecord>> {
        self.tx.send(record)
    }
}

/// Single-consumer end of the channel, owned by the UI thread.
pub struct RecordQueue {
    rx: Receiver<ChartRecord>,
}

impl RecordQueue {
    /// Take every record queued so far, in arrival order. `None` if empty.
    pub fn drain_all(&self) -> Option<Vec<ChartRecord>> {
        let mut out = Vec::new();
        while let Ok(record) = self.rx.try_recv() {
            out.push(record);
        }
        (!out.is_empty()).then_some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_queue_drains_to_none() {
        let (_sink, queue) = channel();
        assert!(queue.drain_all().is_none());
    }

    #[test]
    fn group_without_pad_is_not_sent() {
        let (sink, queue) = channel();
        assert!(sink.register_group(Group::new(1, "x")).unwrap().is_none());
        assert!(queue.drain_all().is_none());
    }

    #[test]
    fn records_keep_arrival_order() {
        let (sink, queue) = channel();
        sink.register_group(Group::new(1, "a").with_pad(0)).unwrap();
        sink.clear_stream().unwrap();
        let drained = queue.drain_all().unwrap();
        assert!(matches!(drained[0], ChartRecord::NewGroup(_)));
        assert!(matches!(drained[1], ChartRecord::StreamCleared));
        assert!(queue.drain_all().is_none());
    }
}
