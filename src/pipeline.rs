use crate::GroupingError;
use crate::conditions::Conditions;
use crate::config::{Config, ReportFormat};
use crate::corpus::{Corpus, IngestStats};
use crate::diagnostics::RunProbe;
use crate::duplicates::DuplicateTokens;
use crate::file_handler;
use crate::groups::Assignment;
use crate::report::Report;
use crate::splitter::Splitter;
use crate::union_find::Consolidated;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Sizes of each intermediate structure, for logging and the run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageCounts {
    pub duplicate_tokens: usize,
    pub condition_tokens: usize,
    pub conditions: usize,
    pub groups_before_merge: usize,
    pub groups_after_merge: usize,
    pub merges: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub ingest: IngestStats,
    pub stages: StageCounts,
    pub total_groups: usize,
    pub multi_row_groups: usize,
    pub output: PathBuf,
}

/// Partition a corpus into reported groups.
pub fn cluster(corpus: &Corpus) -> Report {
    cluster_with_counts(corpus).0
}

pub fn cluster_with_counts(corpus: &Corpus) -> (Report, StageCounts) {
    let duplicates = DuplicateTokens::detect(corpus);
    let conditions = Conditions::derive(corpus, &duplicates);
    let assignment = Assignment::assign(corpus, &conditions);
    let groups_before_merge = assignment.groups().len();
    let consolidated = Consolidated::merge(assignment);
    let report = Report::build(&consolidated);

    let counts = StageCounts {
        duplicate_tokens: duplicates.len(),
        condition_tokens: conditions.tokens().len(),
        conditions: conditions.len(),
        groups_before_merge,
        groups_after_merge: consolidated.groups().len(),
        merges: consolidated.merges(),
    };
    (report, counts)
}

/// Read the input, group it and write the report. Nothing is written if
/// the input cannot be read.
pub fn run(config: &Config) -> Result<RunSummary, GroupingError> {
    config.validate()?;
    let probe = RunProbe::start();
    let splitter = Splitter::new(config.parse);

    info!(input = %config.input.display(), policy = ?config.parse.policy, "reading input");
    let (corpus, ingest) = file_handler::load_corpus(&config.input, &splitter)?;
    info!(
        rows = corpus.len(),
        rejected = ingest.rejected,
        duplicates = ingest.duplicates,
        max_columns = corpus.max_columns(),
        "corpus loaded"
    );

    let (report, stages) = cluster_with_counts(&corpus);
    info!(
        conditions = stages.conditions,
        groups_before_merge = stages.groups_before_merge,
        groups_after_merge = stages.groups_after_merge,
        total_groups = report.total(),
        "grouping complete"
    );

    let diagnostics = config.diagnostics.then(|| probe.finish());
    let mut rendered = Vec::new();
    match config.format {
        ReportFormat::Text => report
            .write_text(&mut rendered, &corpus, &splitter, diagnostics.as_ref())
            .map_err(|e| GroupingError::output(&config.output, e))?,
        ReportFormat::Json => report.write_json(&mut rendered, &corpus, diagnostics.as_ref())?,
    }
    file_handler::write_report(&config.output, &rendered)?;
    info!(output = %config.output.display(), "report written");

    Ok(RunSummary {
        ingest,
        stages,
        total_groups: report.total(),
        multi_row_groups: report.multi_row(),
        output: config.output.clone(),
    })
}
