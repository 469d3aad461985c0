use crate::groups::{Assignment, GroupId, GroupMap, RowGroupIds};
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use tracing::debug;

/// Parent links between group ids. An id without an entry is its own root.
#[derive(Debug, Default)]
pub struct UnionFind {
    parent: FxHashMap<GroupId, GroupId>,
}

impl UnionFind {
    pub fn new() -> Self {
        Self::default()
    }

    /// Root of `id`, compressing the followed path onto it.
    pub fn find(&mut self, id: GroupId) -> GroupId {
        let mut root = id;
        while let Some(&next) = self.parent.get(&root) {
            root = next;
        }

        let mut current = id;
        while current != root {
            let next = self.parent[&current];
            self.parent.insert(current, root);
            current = next;
        }
        root
    }

    /// Redirect `absorbed` to `survivor`. Both must be roots.
    fn link(&mut self, absorbed: GroupId, survivor: GroupId) {
        self.parent.insert(absorbed, survivor);
    }
}

/// The final disjoint groups: every remaining key is a root.
#[derive(Debug, Clone)]
pub struct Consolidated {
    row_groups: Vec<RowGroupIds>,
    groups: GroupMap,
    merges: usize,
}

impl Consolidated {
    /// Merge groups that share a row, transitively.
    pub fn merge(assignment: Assignment) -> Self {
        let (row_groups, mut groups) = assignment.into_parts();
        let before = groups.len();
        let mut union_find = UnionFind::new();
        let mut merges = 0;

        for ids in row_groups.iter().filter(|ids| ids.len() > 1) {
            for pair in ids.windows(2) {
                let survivor = union_find.find(pair[0]);
                let absorbed = union_find.find(pair[1]);
                if survivor == absorbed {
                    continue;
                }
                let Some(mut members) = groups.remove(&absorbed) else {
                    continue;
                };
                groups.entry(survivor).or_default().append(&mut members);
                union_find.link(absorbed, survivor);
                merges += 1;
            }
        }

        debug!(before, after = groups.len(), merges, "consolidated groups");
        Consolidated {
            row_groups,
            groups,
            merges,
        }
    }

    pub fn groups(&self) -> &GroupMap {
        &self.groups
    }

    pub fn is_matched(&self, row: usize) -> bool {
        self.row_groups.get(row).is_some_and(|ids| !ids.is_empty())
    }

    pub fn row_count(&self) -> usize {
        self.row_groups.len()
    }

    pub fn merges(&self) -> usize {
        self.merges
    }

    /// Member sets of the merged groups, in no particular order.
    pub fn member_sets(&self) -> impl Iterator<Item = &BTreeSet<usize>> + '_ {
        self.groups.values()
    }
}
