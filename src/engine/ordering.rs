//! Render order of groups inside a pad.
//!
//! Two tables are kept:
//!
//! * the *panel order*: per pad, every group assigned to it in registration
//!   order. Append-only except when a group moves to another pad.
//! * the *drawn order*: per (selector key, pad), one entry per drawable the
//!   pad currently shows. A group bound to several record kinds appears once
//!   per kind, in adjacent slots, so the entry index is the render index.
//!   [`PanelOrder::drawn_groups`] collapses it to one entry per group, which
//!   is always a subsequence of the panel order.
//!
//! [`PanelOrder::index_for`] resolves where a new drawable goes so that a
//! group registered earlier is never drawn after a group registered later,
//! whatever order their events arrive in.

use std::collections::HashMap;

use crate::data::group::GroupId;

#[derive(Debug, Default, Clone)]
pub struct PanelOrder {
    ordered: HashMap<usize, Vec<GroupId>>,
    drawn: HashMap<String, HashMap<usize, Vec<GroupId>>>,
}

impl PanelOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `group` to the panel order of `pad`.
    pub fn assign(&mut self, group: GroupId, pad: usize) {
        let list = self.ordered.entry(pad).or_default();
        if !list.contains(&group) {
            list.push(group);
        }
    }

    /// Pad the group is currently assigned to.
    pub fn pad_of(&self, group: GroupId) -> Option<usize> {
        self.ordered
            .iter()
            .find_map(|(pad, list)| list.contains(&group).then_some(*pad))
    }

    pub fn panel_order(&self, pad: usize) -> Option<&[GroupId]> {
        self.ordered.get(&pad).map(Vec::as_slice)
    }

    /// Per-drawable render order of (`key`, `pad`); a group repeats once per
    /// bound kind.
    pub fn drawn_order(&self, key: &str, pad: usize) -> Option<&[GroupId]> {
        self.drawn
            .get(key)
            .and_then(|pads| pads.get(&pad))
            .map(Vec::as_slice)
    }

    /// Groups drawn in (`key`, `pad`), one entry per group in render order.
    pub fn drawn_groups(&self, key: &str, pad: usize) -> Vec<GroupId> {
        let mut groups: Vec<GroupId> = Vec::new();
        for g in self.drawn_order(key, pad).unwrap_or(&[]) {
            if groups.last() != Some(g) {
                groups.push(*g);
            }
        }
        groups
    }

    /// Reserve a slot for a new drawable of `group` in the drawn order of
    /// (`key`, `pad`) and return its index.
    ///
    /// The drawable goes right before the first entry whose group was assigned
    /// to the pad after `group`; otherwise it is appended.
    pub fn index_for(&mut self, group: GroupId, pad: usize, key: &str) -> usize {
        let ordered = self.ordered.get(&pad).map(Vec::as_slice).unwrap_or(&[]);
        let drawn = self
            .drawn
            .entry(key.to_string())
            .or_default()
            .entry(pad)
            .or_default();

        let rank = |g: GroupId| ordered.iter().position(|o| *o == g);
        if let Some(own) = rank(group) {
            let later = drawn
                .iter()
                .position(|other| *other != group && rank(*other).is_some_and(|r| own < r));
            if let Some(i) = later {
                drawn.insert(i, group);
                return i;
            }
        }
        drawn.push(group);
        drawn.len() - 1
    }

    /// Move `group` from its current pad to the end of `to`'s panel order and
    /// drop it from every drawn order of the old pad. Returns the old pad.
    /// A group already on `to` keeps its place.
    pub fn reassign(&mut self, group: GroupId, to: usize) -> Option<usize> {
        let from = self.pad_of(group);
        if from == Some(to) {
            return from;
        }
        if let Some(from) = from {
            if let Some(list) = self.ordered.get_mut(&from) {
                list.retain(|g| *g != group);
            }
            for pads in self.drawn.values_mut() {
                if let Some(list) = pads.get_mut(&from) {
                    list.retain(|g| *g != group);
                }
            }
        }
        self.assign(group, to);
        from
    }

    /// Forget every drawn order; the panel order is kept.
    pub fn clear_drawn(&mut self) {
        self.drawn.clear();
    }

    pub fn clear(&mut self) {
        self.ordered.clear();
        self.drawn.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_with(groups: &[GroupId]) -> PanelOrder {
        let mut order = PanelOrder::new();
        for g in groups {
            order.assign(*g, 0);
        }
        order
    }

    #[test]
    fn first_drawable_gets_index_zero() {
        let mut order = order_with(&[1, 2]);
        assert_eq!(order.index_for(2, 0, ""), 0);
        assert_eq!(order.drawn_order("", 0), Some(&[2][..]));
    }

    #[test]
    fn earlier_group_is_inserted_before_later_one() {
        let mut order = order_with(&[1, 2, 3]);
        assert_eq!(order.index_for(3, 0, ""), 0);
        assert_eq!(order.index_for(2, 0, ""), 0);
        assert_eq!(order.index_for(1, 0, ""), 0);
        assert_eq!(order.drawn_order("", 0), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn second_kind_of_same_group_goes_after_its_first() {
        let mut order = order_with(&[1, 2]);
        order.index_for(2, 0, "");
        order.index_for(1, 0, "");
        assert_eq!(order.index_for(1, 0, ""), 1);
        assert_eq!(order.drawn_order("", 0), Some(&[1, 1, 2][..]));
    }

    #[test]
    fn drawn_groups_follow_panel_order() {
        let mut order = order_with(&[1, 2, 3]);
        order.index_for(3, 0, "");
        order.index_for(1, 0, "");
        order.index_for(3, 0, "");
        order.index_for(1, 0, "");
        assert_eq!(order.drawn_order("", 0), Some(&[1, 1, 3, 3][..]));

        let groups = order.drawn_groups("", 0);
        assert_eq!(groups, vec![1, 3]);
        let panel = order.panel_order(0).unwrap();
        let mut rest = panel.iter();
        assert!(groups.iter().all(|g| rest.any(|p| p == g)));
        assert!(order.drawn_groups("other", 0).is_empty());
    }

    #[test]
    fn reassign_to_same_pad_keeps_rank() {
        let mut order = order_with(&[1, 2]);
        order.index_for(1, 0, "");
        order.index_for(2, 0, "");
        assert_eq!(order.reassign(1, 0), Some(0));
        assert_eq!(order.panel_order(0), Some(&[1, 2][..]));
        assert_eq!(order.drawn_order("", 0), Some(&[1, 2][..]));
    }

    #[test]
    fn keys_have_independent_drawn_orders() {
        let mut order = order_with(&[1, 2]);
        order.index_for(2, 0, "a");
        assert_eq!(order.index_for(1, 0, "b"), 0);
        assert_eq!(order.drawn_order("a", 0), Some(&[2][..]));
    }

    #[test]
    fn reassign_moves_panel_membership() {
        let mut order = order_with(&[1, 2]);
        order.index_for(1, 0, "");
        order.assign(7, 1);
        assert_eq!(order.reassign(1, 1), Some(0));
        assert_eq!(order.panel_order(0), Some(&[2][..]));
        assert_eq!(order.panel_order(1), Some(&[7, 1][..]));
        assert_eq!(order.drawn_order("", 0), Some(&[][..]));
        assert_eq!(order.pad_of(1), Some(1));
    }
}
