use crate::interner::{EMPTY_TOKEN, Interner, TokenId};
use crate::splitter::Splitter;
use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::debug;

/// One accepted line as interned tokens. Identity is its index in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Row {
    tokens: Box<[TokenId]>,
    /// Columns written as a bare empty field rather than an empty quoted pair.
    bare: Box<[u32]>,
}

impl Row {
    pub fn tokens(&self) -> &[TokenId] {
        &self.tokens
    }

    pub fn is_bare(&self, position: usize) -> bool {
        self.bare.binary_search(&(position as u32)).is_ok()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Counters for what ingestion kept and what it filtered as noise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    pub lines_read: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub duplicates: usize,
}

/// All accepted rows plus the widest field count seen. Read-only once built.
#[derive(Debug, Clone)]
pub struct Corpus {
    rows: Vec<Row>,
    max_columns: usize,
    interner: Interner,
}

impl Corpus {
    /// Ingest a complete sequence of lines.
    pub fn from_lines<I, S>(lines: I, splitter: &Splitter) -> (Corpus, IngestStats)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = CorpusBuilder::new(splitter);
        for line in lines {
            builder.push_line(line.as_ref());
        }
        builder.finish()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> &Row {
        &self.rows[index]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn max_columns(&self) -> usize {
        self.max_columns
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Token strings of a row, in column order.
    pub fn tokens(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows[index]
            .tokens()
            .iter()
            .map(move |&id| self.interner.resolve(id))
    }

    /// Render a row back into the exact line it was read from.
    pub fn render_row(&self, index: usize, splitter: &Splitter) -> String {
        let row = &self.rows[index];
        splitter.render(row.tokens().iter().enumerate().map(|(position, &id)| {
            (id != EMPTY_TOKEN || !row.is_bare(position)).then(|| self.interner.resolve(id))
        }))
    }
}

/// Accepts lines one at a time so a fallible reader can feed it.
pub struct CorpusBuilder<'a> {
    splitter: &'a Splitter,
    rows: Vec<Row>,
    max_columns: usize,
    interner: Interner,
    seen: FxHashSet<String>,
    stats: IngestStats,
}

impl<'a> CorpusBuilder<'a> {
    pub fn new(splitter: &'a Splitter) -> Self {
        Self {
            splitter,
            rows: Vec::new(),
            max_columns: 0,
            interner: Interner::new(),
            seen: FxHashSet::default(),
            stats: IngestStats::default(),
        }
    }

    /// Returns whether the line became a new row.
    pub fn push_line(&mut self, line: &str) -> bool {
        self.stats.lines_read += 1;

        let Some(fields) = self.splitter.fields(line) else {
            self.stats.rejected += 1;
            return false;
        };

        if self.splitter.config().dedup && !self.seen.insert(line.to_string()) {
            self.stats.duplicates += 1;
            return false;
        }

        let row = Row {
            tokens: fields.iter().map(|f| self.interner.intern(f)).collect(),
            bare: line
                .split(self.splitter.config().delimiter)
                .enumerate()
                .filter(|(_, field)| field.is_empty())
                .map(|(position, _)| position as u32)
                .collect(),
        };

        self.max_columns = self.max_columns.max(row.len());
        self.rows.push(row);
        self.stats.accepted += 1;
        true
    }

    pub fn finish(self) -> (Corpus, IngestStats) {
        debug!(
            lines = self.stats.lines_read,
            accepted = self.stats.accepted,
            rejected = self.stats.rejected,
            duplicates = self.stats.duplicates,
            max_columns = self.max_columns,
            "ingested corpus"
        );
        let corpus = Corpus {
            rows: self.rows,
            max_columns: self.max_columns,
            interner: self.interner,
        };
        (corpus, self.stats)
    }
}
