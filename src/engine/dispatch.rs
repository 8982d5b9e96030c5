//! The per-tick queue consumer.

use crate::data::group::GroupEvent;
use crate::error::{ChartError, Result};
use crate::sink::{ChartRecord, RecordQueue};

use super::GroupChart;

/// What one [`GroupChart::dispatch`] call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Records taken off the queue.
    pub drained: usize,
    /// Groups accepted by registration records.
    pub registered: usize,
    /// Events processed for the active selector.
    pub processed: usize,
    /// Field updates applied.
    pub updates: usize,
    /// Whether a stream-clear record was seen.
    pub cleared: bool,
}

impl GroupChart {
    /// Drain `queue` and apply everything in it.
    ///
    /// Returns `Ok(None)` when the queue was empty. Every event is recorded in
    /// the history of its selector key; events of the active key are staged
    /// and processed after the scan, in arrival order, with only the final one
    /// moving the window. A stream-clear record discards what was staged so
    /// far and resets the engine. Field updates are applied as they are met.
    ///
    /// An event or update naming an unregistered group is skipped and not
    /// recorded. The rest of the batch is still applied, then the first such
    /// violation is returned as [`ChartError::UnregisteredGroup`].
    pub fn dispatch(&mut self, queue: &RecordQueue) -> Result<Option<DispatchSummary>> {
        let Some(records) = queue.drain_all() else {
            return Ok(None);
        };
        log::trace!("drained {} records", records.len());
        self.dispatch_records(records).map(Some)
    }

    /// Apply an already drained batch; see [`dispatch`](Self::dispatch).
    pub fn dispatch_records(&mut self, records: Vec<ChartRecord>) -> Result<DispatchSummary> {
        let mut summary = DispatchSummary {
            drained: records.len(),
            ..DispatchSummary::default()
        };
        let mut staged: Vec<GroupEvent> = Vec::new();
        let mut violation: Option<ChartError> = None;

        for record in records {
            match record {
                ChartRecord::NewGroup(group) => {
                    if self.on_new_group(group) {
                        summary.registered += 1;
                    }
                }
                ChartRecord::Event(event) => {
                    if !self.table.contains(event.group_id()) {
                        log::error!("skipping event of unregistered group {}", event.group_id());
                        violation.get_or_insert(ChartError::UnregisteredGroup(event.group_id()));
                        continue;
                    }
                    if self.selector.matches(event.selector_key()) {
                        staged.push(event.clone());
                    }
                    self.replay.record(event);
                }
                ChartRecord::Update(update) => match self.apply_update(&update) {
                    Ok(()) => summary.updates += 1,
                    Err(e) => {
                        log::error!("skipping update: {e}");
                        violation.get_or_insert(e);
                    }
                },
                ChartRecord::StreamCleared => {
                    staged.clear();
                    self.clear();
                    summary.cleared = true;
                }
            }
        }

        let n = staged.len();
        for (i, event) in staged.iter().enumerate() {
            if let Err(e) = self.process_event(event, i + 1 == n) {
                violation.get_or_insert(e);
            }
        }
        summary.processed = n;
        if n > 0 || summary.updates > 0 {
            self.chart.request_redraw();
        }
        match violation {
            Some(e) => Err(e),
            None => Ok(summary),
        }
    }
}
