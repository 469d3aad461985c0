use crate::conditions::Conditions;
use crate::corpus::Corpus;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// Key of the group formed by one (token, position) condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub usize);

impl GroupId {
    /// `condition_index * (max_columns + 1) + position`.
    ///
    /// Injective over `(condition_index, position)` while `position <= max_columns`.
    pub fn derive(condition_index: usize, position: usize, max_columns: usize) -> Self {
        GroupId(condition_index * (max_columns + 1) + position)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub type RowGroupIds = SmallVec<[GroupId; 4]>;
pub type GroupMap = FxHashMap<GroupId, BTreeSet<usize>>;

/// Group ids per row, and rows per group id, before any merging.
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    row_groups: Vec<RowGroupIds>,
    groups: GroupMap,
}

impl Assignment {
    pub fn assign(corpus: &Corpus, conditions: &Conditions) -> Self {
        let max_columns = corpus.max_columns();
        let mut row_groups = Vec::with_capacity(corpus.len());
        let mut groups = GroupMap::default();

        for (row_index, row) in corpus.rows().iter().enumerate() {
            let mut ids = RowGroupIds::new();
            for (position, &token) in row.tokens().iter().enumerate() {
                if let Some(index) = conditions.matching(token, position) {
                    let id = GroupId::derive(index, position, max_columns);
                    ids.push(id);
                    groups.entry(id).or_default().insert(row_index);
                }
            }
            row_groups.push(ids);
        }

        debug!(
            groups = groups.len(),
            matched_rows = row_groups.iter().filter(|ids| !ids.is_empty()).count(),
            "assigned group ids"
        );
        Assignment { row_groups, groups }
    }

    /// Group ids of a row in column order; empty if no condition matched it.
    pub fn row_groups(&self, row: usize) -> &[GroupId] {
        &self.row_groups[row]
    }

    pub fn is_matched(&self, row: usize) -> bool {
        !self.row_groups[row].is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = (usize, &[GroupId])> + '_ {
        self.row_groups
            .iter()
            .enumerate()
            .map(|(row, ids)| (row, ids.as_slice()))
    }

    pub fn groups(&self) -> &GroupMap {
        &self.groups
    }

    pub fn into_parts(self) -> (Vec<RowGroupIds>, GroupMap) {
        (self.row_groups, self.groups)
    }
}
