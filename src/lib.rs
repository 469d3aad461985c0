pub mod conditions;
pub mod config;
pub mod corpus;
pub mod diagnostics;
pub mod duplicates;
pub mod error;
pub mod file_handler;
pub mod groups;
pub mod interner;
pub mod pipeline;
pub mod report;
pub mod splitter;
pub mod union_find;

pub use config::{Config, FieldPolicy, ParseConfig, ReportFormat};
pub use corpus::{Corpus, IngestStats};
pub use error::*;
pub use pipeline::{RunSummary, cluster, run};
pub use report::Report;
pub use splitter::Splitter;

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG` (default `info`).
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(service_name: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!(service = service_name, "tracing initialized");
    }
}
