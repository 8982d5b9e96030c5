//! Controllers for interacting with the chart from external code.
//!
//! The controllers expose lightweight state and a subscription mechanism so
//! non-UI code can observe the selector and the visible range, and push simple
//! requests (switching the selector, re-anchoring the window). The UI thread
//! picks requests up once per frame and publishes fresh state afterwards.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

/// Lock `m`, taking the guard out of a poisoned mutex.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ─────────────────────────────────────────────────────────────────────────────
// Selector
// ─────────────────────────────────────────────────────────────────────────────

/// Snapshot of the selector as last published by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorInfo {
    /// Choices in discovery order.
    pub choices: Vec<String>,
    /// Active choice, `None` until the first keyed group shows up.
    pub active: Option<String>,
}

/// Controller to read and switch the active selector.
#[derive(Clone, Default)]
pub struct SelectorController {
    pub(crate) inner: Arc<Mutex<SelectorCtrlInner>>,
}

#[derive(Default)]
pub(crate) struct SelectorCtrlInner {
    pub(crate) choices: Vec<String>,
    pub(crate) active: Option<String>,
    pub(crate) request_select: Option<String>,
    pub(crate) listeners: Vec<Sender<SelectorInfo>>,
}

impl SelectorController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn choices(&self) -> Vec<String> {
        lock(&self.inner).choices.clone()
    }

    pub fn active(&self) -> Option<String> {
        lock(&self.inner).active.clone()
    }

    /// Ask the UI to switch to `key` on its next frame. The view is rebuilt
    /// from the key's recorded history.
    pub fn request_select<S: Into<String>>(&self, key: S) {
        lock(&self.inner).request_select = Some(key.into());
    }

    /// Subscribe to selector updates. The receiver gets a [`SelectorInfo`]
    /// whenever the choices or the active key change.
    pub fn subscribe(&self) -> Receiver<SelectorInfo> {
        let (tx, rx) = std::sync::mpsc::channel();
        lock(&self.inner).listeners.push(tx);
        rx
    }

    pub(crate) fn take_request(&self) -> Option<String> {
        lock(&self.inner).request_select.take()
    }

    /// Store the UI's view of the selector, notifying listeners on change.
    pub(crate) fn publish(&self, choices: &[String], active: Option<&str>) {
        let mut inner = lock(&self.inner);
        let active = active.map(str::to_string);
        if inner.choices == choices && inner.active == active {
            return;
        }
        inner.choices = choices.to_vec();
        inner.active = active;
        let info = SelectorInfo {
            choices: inner.choices.clone(),
            active: inner.active.clone(),
        };
        inner.listeners.retain(|s| s.send(info.clone()).is_ok());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// View
// ─────────────────────────────────────────────────────────────────────────────

/// Snapshot of the visible time range and pad layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewInfo {
    pub visible_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub pad_count: usize,
}

/// Controller to observe the visible range and request a re-anchor.
#[derive(Clone, Default)]
pub struct ViewController {
    pub(crate) inner: Arc<Mutex<ViewCtrlInner>>,
}

#[derive(Default)]
pub(crate) struct ViewCtrlInner {
    pub(crate) visible_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub(crate) pad_count: usize,
    pub(crate) request_reanchor: bool,
    pub(crate) listeners: Vec<Sender<ViewInfo>>,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        lock(&self.inner).visible_range
    }

    pub fn pad_count(&self) -> usize {
        lock(&self.inner).pad_count
    }

    /// Ask the UI to let the next processed event become the window anchor,
    /// which snaps the view back to a trailing window behind it.
    pub fn request_reanchor(&self) {
        lock(&self.inner).request_reanchor = true;
    }

    /// Subscribe to view updates.
    pub fn subscribe(&self) -> Receiver<ViewInfo> {
        let (tx, rx) = std::sync::mpsc::channel();
        lock(&self.inner).listeners.push(tx);
        rx
    }

    pub(crate) fn take_reanchor(&self) -> bool {
        std::mem::take(&mut lock(&self.inner).request_reanchor)
    }

    pub(crate) fn publish(&self, visible_range: Option<(DateTime<Utc>, DateTime<Utc>)>, pad_count: usize) {
        let mut inner = lock(&self.inner);
        if inner.visible_range == visible_range && inner.pad_count == pad_count {
            return;
        }
        inner.visible_range = visible_range;
        inner.pad_count = pad_count;
        let info = ViewInfo {
            visible_range,
            pad_count,
        };
        inner.listeners.retain(|s| s.send(info.clone()).is_ok());
    }
}
