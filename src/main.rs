use clap::Parser;
use linegroups::config::{DEFAULT_DELIMITER, DEFAULT_OUTPUT, DEFAULT_QUOTE};
use linegroups::{Config, FieldPolicy, GroupingError, ReportFormat};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "linegroups")]
#[command(about = "Split rows of quoted numeric fields into groups sharing a value in the same column", long_about = None)]
struct Cli {
    /// Input file, one row per line
    input: PathBuf,

    /// Where to write the report
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Accepted field payloads
    #[arg(long, value_enum, default_value_t = FieldPolicy::Strict)]
    policy: FieldPolicy,

    /// Keep repeated rows instead of dropping them
    #[arg(long)]
    keep_duplicates: bool,

    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Leave elapsed time and memory out of the report
    #[arg(long)]
    no_diagnostics: bool,

    #[arg(long, default_value_t = DEFAULT_DELIMITER)]
    delimiter: char,

    #[arg(long, default_value_t = DEFAULT_QUOTE)]
    quote: char,
}

impl Cli {
    fn into_config(self) -> Config {
        Config::new(self.input)
            .with_output(self.output)
            .with_policy(self.policy)
            .with_dedup(!self.keep_duplicates)
            .with_format(self.format)
            .with_diagnostics(!self.no_diagnostics)
            .with_delimiters(self.delimiter, self.quote)
    }
}

fn main() -> Result<(), GroupingError> {
    linegroups::init_tracing("linegroups");
    let config = Cli::parse().into_config();

    match linegroups::run(&config) {
        Ok(summary) => {
            info!(
                rows = summary.ingest.accepted,
                total_groups = summary.total_groups,
                multi_row_groups = summary.multi_row_groups,
                "done"
            );
            println!(
                "[linegroups] {} groups ({} with 2 elements and more) written to {}",
                summary.total_groups,
                summary.multi_row_groups,
                summary.output.display()
            );
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            Err(e)
        }
    }
}
