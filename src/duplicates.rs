use crate::corpus::Corpus;
use crate::interner::{EMPTY_TOKEN, TokenId};
use fixedbitset::FixedBitSet;
use tracing::debug;

/// Non-empty tokens seen at least twice anywhere in the corpus, any column.
#[derive(Debug, Clone)]
pub struct DuplicateTokens {
    tokens: FixedBitSet,
    count: usize,
}

impl DuplicateTokens {
    pub fn detect(corpus: &Corpus) -> Self {
        let vocab_len = corpus.interner().len();
        let mut frequency = vec![0u32; vocab_len];
        let mut tokens = FixedBitSet::with_capacity(vocab_len);
        let mut count = 0;

        for row in corpus.rows() {
            for &token in row.tokens() {
                if token == EMPTY_TOKEN {
                    continue;
                }
                let seen = &mut frequency[token as usize];
                *seen = seen.saturating_add(1);
                if *seen == 2 {
                    tokens.insert(token as usize);
                    count += 1;
                }
            }
        }

        debug!(duplicate_tokens = count, "detected duplicate tokens");
        DuplicateTokens { tokens, count }
    }

    pub fn contains(&self, token: TokenId) -> bool {
        self.tokens.contains(token as usize)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = TokenId> + '_ {
        self.tokens.ones().map(|t| t as TokenId)
    }
}
