//! Cascading show/hide over the group forest.
//!
//! The server supplies the GroupId → children map; this module only plans
//! which groups a toggle reaches. Opening cascades into every descendant.
//! Closing cascades only into children the user explicitly opened at some
//! point; an untouched branch keeps whatever visibility it has.

use std::collections::HashMap;

use crate::disclosure::Disclosure;
use crate::keys::GroupId;

/// The group forest plus the per-group record of the user's last explicit
/// open/close intent.
pub struct GroupHierarchy {
    children: HashMap<GroupId, Vec<GroupId>>,
    touched: HashMap<GroupId, Disclosure>,
}

impl GroupHierarchy {
    /// Build from the externally supplied children map. The map is
    /// read-only from here on and must be acyclic.
    pub fn new(children: HashMap<GroupId, Vec<GroupId>>) -> Self {
        Self {
            children,
            touched: HashMap::new(),
        }
    }

    pub fn children(&self, gid: &GroupId) -> &[GroupId] {
        self.children.get(gid).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn touched(&self, gid: &GroupId) -> Option<Disclosure> {
        self.touched.get(gid).copied()
    }

    /// Record an explicit user intent for a group.
    pub fn record_touch(&mut self, gid: GroupId, intent: Disclosure) {
        self.touched.insert(gid, intent);
    }

    /// Every group an open of `gid` must show: `gid` and all of its
    /// descendants, whatever the touched record says.
    pub fn open_plan(&self, gid: &GroupId) -> Vec<GroupId> {
        let mut plan = Vec::new();
        self.collect_open(gid, &mut plan);
        plan
    }

    fn collect_open(&self, gid: &GroupId, plan: &mut Vec<GroupId>) {
        plan.push(gid.clone());
        for child in self.children(gid) {
            self.collect_open(child, plan);
        }
    }

    /// Every group a close of `gid` must hide: `gid` itself always, then
    /// recursively any child whose touched record says the user opened it.
    pub fn close_plan(&self, gid: &GroupId) -> Vec<GroupId> {
        let mut plan = Vec::new();
        self.collect_close(gid, &mut plan);
        plan
    }

    fn collect_close(&self, gid: &GroupId, plan: &mut Vec<GroupId>) {
        plan.push(gid.clone());
        for child in self.children(gid) {
            if self.touched(child) == Some(Disclosure::Open) {
                self.collect_close(child, plan);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gid(raw: &str) -> GroupId {
        GroupId::new(raw)
    }

    fn hierarchy() -> GroupHierarchy {
        // g1 ── g2 ── g4
        //    └─ g3
        GroupHierarchy::new(HashMap::from([
            (gid("g1"), vec![gid("g2"), gid("g3")]),
            (gid("g2"), vec![gid("g4")]),
        ]))
    }

    #[test]
    fn test_open_cascades_fully() {
        let groups = hierarchy();
        let plan = groups.open_plan(&gid("g1"));
        assert_eq!(plan, vec![gid("g1"), gid("g2"), gid("g4"), gid("g3")]);
    }

    #[test]
    fn test_open_ignores_touched_record() {
        let mut groups = hierarchy();
        groups.record_touch(gid("g2"), Disclosure::Closed);
        groups.record_touch(gid("g3"), Disclosure::Closed);
        let plan = groups.open_plan(&gid("g1"));
        assert_eq!(plan, vec![gid("g1"), gid("g2"), gid("g4"), gid("g3")]);
    }

    #[test]
    fn test_close_skips_untouched_children() {
        let mut groups = hierarchy();
        groups.record_touch(gid("g2"), Disclosure::Open);
        // g3 was never touched: closing g1 must leave it alone.
        let plan = groups.close_plan(&gid("g1"));
        assert_eq!(plan, vec![gid("g1"), gid("g2")]);
    }

    #[test]
    fn test_close_skips_explicitly_closed_children() {
        let mut groups = hierarchy();
        groups.record_touch(gid("g2"), Disclosure::Closed);
        let plan = groups.close_plan(&gid("g1"));
        assert_eq!(plan, vec![gid("g1")]);
    }

    #[test]
    fn test_close_recurses_through_touched_branch() {
        let mut groups = hierarchy();
        groups.record_touch(gid("g2"), Disclosure::Open);
        groups.record_touch(gid("g4"), Disclosure::Open);
        let plan = groups.close_plan(&gid("g1"));
        assert_eq!(plan, vec![gid("g1"), gid("g2"), gid("g4")]);
    }

    #[test]
    fn test_close_always_includes_the_group_itself() {
        let groups = hierarchy();
        assert_eq!(groups.close_plan(&gid("g3")), vec![gid("g3")]);
    }

    #[test]
    fn test_unknown_group_has_no_children() {
        let groups = hierarchy();
        assert_eq!(groups.open_plan(&gid("nope")), vec![gid("nope")]);
    }
}
