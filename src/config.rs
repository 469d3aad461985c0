use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_OUTPUT: &str = "result.txt";
pub const DEFAULT_DELIMITER: char = ';';
pub const DEFAULT_QUOTE: char = '"';

/// Which payloads a quoted field may carry. One policy applies to a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FieldPolicy {
    /// Digits only.
    #[default]
    Strict,
    /// Digits with at most one `.`.
    Tolerant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Settings for parsing a single line into fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
    pub delimiter: char,
    pub quote: char,
    pub policy: FieldPolicy,
    pub dedup: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            quote: DEFAULT_QUOTE,
            policy: FieldPolicy::Strict,
            dedup: true,
        }
    }
}

/// Configuration for one grouping run
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub parse: ParseConfig,
    pub format: ReportFormat,
    pub diagnostics: bool,
}

impl Config {
    /// Defaults for production use: strict digits, dedup on, text report to `result.txt`
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            parse: ParseConfig::default(),
            format: ReportFormat::Text,
            diagnostics: true,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_policy(mut self, policy: FieldPolicy) -> Self {
        self.parse.policy = policy;
        self
    }

    pub fn with_dedup(mut self, dedup: bool) -> Self {
        self.parse.dedup = dedup;
        self
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: bool) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_delimiters(mut self, delimiter: char, quote: char) -> Self {
        self.parse.delimiter = delimiter;
        self.parse.quote = quote;
        self
    }

    /// Reject settings under which a field could never be told apart from its wrapper.
    pub fn validate(&self) -> Result<(), crate::GroupingError> {
        let ParseConfig { delimiter, quote, .. } = self.parse;
        if delimiter == quote {
            return Err(crate::GroupingError::Config(format!(
                "delimiter and quote must differ (both are {:?})",
                delimiter
            )));
        }
        if delimiter.is_ascii_digit() || quote.is_ascii_digit() || delimiter == '.' || quote == '.' {
            return Err(crate::GroupingError::Config(
                "delimiter and quote must not be digits or '.'".to_string(),
            ));
        }
        Ok(())
    }
}
