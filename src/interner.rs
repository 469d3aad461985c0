use rustc_hash::FxHashMap;

pub type TokenId = u32;

/// Id reserved for the empty token. It never takes part in duplicate or condition detection.
pub const EMPTY_TOKEN: TokenId = 0;

/// Maps each distinct token string to a dense id, in first-seen order.
#[derive(Debug, Clone)]
pub struct Interner {
    vocabulary: Vec<String>,
    index: FxHashMap<String, TokenId>,
}

impl Interner {
    pub fn new() -> Self {
        let mut index = FxHashMap::default();
        index.insert(String::new(), EMPTY_TOKEN);
        Interner {
            vocabulary: vec![String::new()],
            index,
        }
    }

    pub fn intern(&mut self, token: &str) -> TokenId {
        if let Some(&id) = self.index.get(token) {
            return id;
        }
        let id = self.vocabulary.len() as TokenId;
        self.vocabulary.push(token.to_string());
        self.index.insert(token.to_string(), id);
        id
    }

    pub fn get(&self, token: &str) -> Option<TokenId> {
        self.index.get(token).copied()
    }

    pub fn resolve(&self, id: TokenId) -> &str {
        &self.vocabulary[id as usize]
    }

    /// Number of ids handed out, the empty token included.
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.len() == 1
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}
