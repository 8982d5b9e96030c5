//! Groups: externally identified series with a schema-free field bag.
//!
//! The engine only ever looks at a handful of well-known fields
//! (see [`fields`]); everything else in the bag is carried along untouched.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use egui::Color32;

use crate::data::record::{DataObject, RecordKind};

/// Stable numeric identity of a group, assigned by the producer.
pub type GroupId = u64;

/// Names of the fields the engine inspects.
pub mod fields {
    /// Target pad index (integer). Required.
    pub const PAD: &str = "Pad";
    /// Filter value partitioning groups into replayable subsets (string).
    pub const SELECTOR_KEY: &str = "SelectorKey";
    /// Display color of time-series drawables and legend entries.
    pub const COLOR: &str = "Color";
    /// Line width of time-series drawables (integer or float).
    pub const WIDTH: &str = "Width";
    /// Y-axis label format of the pad hosting the group.
    pub const FORMAT: &str = "Format";
}

/// Label format used when a group carries no `Format` field.
pub const DEFAULT_LABEL_FORMAT: &str = "F2";

/// A typed value in a group's field bag.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Str(String),
    Color(Color32),
    DateTime(DateTime<Utc>),
}

impl FieldValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(v) => Some(*v as f64),
            FieldValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color32> {
        match self {
            FieldValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Interpret the value as a pad index.
    pub fn as_pad(&self) -> Option<usize> {
        self.as_int().and_then(|v| usize::try_from(v).ok())
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Str(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Str(v)
    }
}

impl From<Color32> for FieldValue {
    fn from(v: Color32) -> Self {
        FieldValue::Color(v)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self {
        FieldValue::DateTime(v)
    }
}

/// A logical series identity: the unit of pad assignment and legend entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub fields: HashMap<String, FieldValue>,
}

impl Group {
    pub fn new<S: Into<String>>(id: GroupId, name: S) -> Self {
        Self {
            id,
            name: name.into(),
            fields: HashMap::new(),
        }
    }

    /// Builder-style field setter.
    pub fn with_field<K: Into<String>, V: Into<FieldValue>>(mut self, name: K, value: V) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn with_pad(self, pad: usize) -> Self {
        self.with_field(fields::PAD, pad as i64)
    }

    pub fn with_selector_key<S: Into<String>>(self, key: S) -> Self {
        self.with_field(fields::SELECTOR_KEY, key.into())
    }

    pub fn with_color(self, color: Color32) -> Self {
        self.with_field(fields::COLOR, color)
    }

    pub fn with_format<S: Into<String>>(self, format: S) -> Self {
        self.with_field(fields::FORMAT, format.into())
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn has_pad(&self) -> bool {
        self.fields.contains_key(fields::PAD)
    }

    /// Target pad, if the `Pad` field holds a non-negative integer.
    pub fn pad(&self) -> Option<usize> {
        self.field(fields::PAD).and_then(FieldValue::as_pad)
    }

    /// Selector key of the group; groups without one belong to `""`.
    pub fn selector_key(&self) -> &str {
        self.field(fields::SELECTOR_KEY)
            .and_then(FieldValue::as_str)
            .unwrap_or("")
    }

    /// Whether the group explicitly carries a `SelectorKey` field.
    pub fn has_selector_key(&self) -> bool {
        self.field(fields::SELECTOR_KEY)
            .and_then(FieldValue::as_str)
            .is_some()
    }

    pub fn color(&self) -> Option<Color32> {
        self.field(fields::COLOR).and_then(FieldValue::as_color)
    }

    pub fn width(&self) -> Option<f32> {
        self.field(fields::WIDTH)
            .and_then(FieldValue::as_f64)
            .map(|w| w as f32)
    }

    pub fn label_format(&self) -> &str {
        self.field(fields::FORMAT)
            .and_then(FieldValue::as_str)
            .unwrap_or(DEFAULT_LABEL_FORMAT)
    }
}

/// One streamed data point belonging to a group.
#[derive(Debug, Clone)]
pub struct GroupEvent {
    pub group: Arc<Group>,
    pub obj: DataObject,
}

impl GroupEvent {
    pub fn new(group: Arc<Group>, obj: DataObject) -> Self {
        Self { group, obj }
    }

    pub fn group_id(&self) -> GroupId {
        self.group.id
    }

    /// `None` for payloads this crate does not understand.
    pub fn kind(&self) -> Option<RecordKind> {
        self.obj.kind()
    }

    pub fn datetime(&self) -> DateTime<Utc> {
        self.obj.datetime()
    }

    pub fn selector_key(&self) -> &str {
        self.group.selector_key()
    }
}

/// A later mutation of a group's `Pad` or `Color` field.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupUpdate {
    pub group_id: GroupId,
    pub field_name: String,
    pub value: FieldValue,
    /// Label format to apply on the destination pad of a `Pad` update.
    pub label_format: Option<String>,
}

impl GroupUpdate {
    pub fn new<S: Into<String>, V: Into<FieldValue>>(group_id: GroupId, field_name: S, value: V) -> Self {
        Self {
            group_id,
            field_name: field_name.into(),
            value: value.into(),
            label_format: None,
        }
    }

    pub fn pad(group_id: GroupId, pad: usize) -> Self {
        Self::new(group_id, fields::PAD, pad as i64)
    }

    pub fn color(group_id: GroupId, color: Color32) -> Self {
        Self::new(group_id, fields::COLOR, color)
    }

    pub fn with_label_format<S: Into<String>>(mut self, format: S) -> Self {
        self.label_format = Some(format.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_selector_key_resolves_to_empty() {
        let g = Group::new(1, "ES").with_pad(0);
        assert_eq!(g.selector_key(), "");
        assert!(!g.has_selector_key());
        assert_eq!(g.label_format(), DEFAULT_LABEL_FORMAT);
    }

    #[test]
    fn negative_pad_is_not_a_pad() {
        let g = Group::new(1, "ES").with_field(fields::PAD, -1i64);
        assert!(g.has_pad());
        assert_eq!(g.pad(), None);
    }

    #[test]
    fn width_accepts_int_and_float() {
        let g = Group::new(1, "a").with_field(fields::WIDTH, 2i64);
        assert_eq!(g.width(), Some(2.0));
        let g = Group::new(1, "a").with_field(fields::WIDTH, 1.5f64);
        assert_eq!(g.width(), Some(1.5));
    }
}
