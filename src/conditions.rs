use crate::corpus::Corpus;
use crate::duplicates::DuplicateTokens;
use crate::interner::TokenId;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::debug;

/// Qualifying columns of one token, plus its dense index among condition tokens.
#[derive(Debug, Clone)]
pub struct Condition {
    pub index: usize,
    /// Sorted, no repeats.
    pub positions: SmallVec<[usize; 2]>,
}

impl Condition {
    pub fn contains(&self, position: usize) -> bool {
        self.positions.binary_search(&position).is_ok()
    }
}

/// token -> columns at which it recurred in a second row.
///
/// Tokens are indexed in the order their first condition formed, so the
/// numbering is stable for a given corpus.
#[derive(Debug, Clone, Default)]
pub struct Conditions {
    by_token: FxHashMap<TokenId, Condition>,
    order: Vec<TokenId>,
}

impl Conditions {
    pub fn derive(corpus: &Corpus, duplicates: &DuplicateTokens) -> Self {
        let mut seen: FxHashSet<(TokenId, usize)> = FxHashSet::default();
        let mut conditions = Conditions::default();

        for row in corpus.rows() {
            for (position, &token) in row.tokens().iter().enumerate() {
                if !duplicates.contains(token) {
                    continue;
                }
                if !seen.insert((token, position)) {
                    conditions.insert(token, position);
                }
            }
        }

        debug!(
            condition_tokens = conditions.order.len(),
            conditions = conditions.len(),
            "derived conditions"
        );
        conditions
    }

    fn insert(&mut self, token: TokenId, position: usize) {
        let next = self.order.len();
        let condition = self.by_token.entry(token).or_insert_with(|| Condition {
            index: next,
            positions: SmallVec::new(),
        });
        if condition.index == next {
            self.order.push(token);
        }
        if let Err(at) = condition.positions.binary_search(&position) {
            condition.positions.insert(at, position);
        }
    }

    pub fn get(&self, token: TokenId) -> Option<&Condition> {
        self.by_token.get(&token)
    }

    /// Dense index of `token` if `position` qualifies for it.
    pub fn matching(&self, token: TokenId, position: usize) -> Option<usize> {
        self.by_token
            .get(&token)
            .filter(|c| c.contains(position))
            .map(|c| c.index)
    }

    /// Number of distinct (token, position) conditions.
    pub fn len(&self) -> usize {
        self.by_token.values().map(|c| c.positions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Condition tokens in index order.
    pub fn tokens(&self) -> &[TokenId] {
        &self.order
    }
}
