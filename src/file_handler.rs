use crate::GroupingError;
use crate::corpus::{Corpus, CorpusBuilder, IngestStats};
use crate::splitter::Splitter;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read every line of `path` into a corpus. Any read failure, including
/// invalid UTF-8, aborts ingestion.
pub fn load_corpus(path: &Path, splitter: &Splitter) -> Result<(Corpus, IngestStats), GroupingError> {
    let file = File::open(path).map_err(|e| GroupingError::input(path, e))?;
    let reader = BufReader::new(file);
    let mut builder = CorpusBuilder::new(splitter);

    for line in reader.lines() {
        let line = line.map_err(|e| GroupingError::input(path, e))?;
        builder.push_line(&line);
    }

    Ok(builder.finish())
}

/// Write a fully rendered report in one call.
pub fn write_report(path: &Path, contents: &[u8]) -> Result<(), GroupingError> {
    fs::write(path, contents).map_err(|e| GroupingError::output(path, e))
}
