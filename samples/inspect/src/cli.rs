use std::path::PathBuf;

use clap::ValueHint;
use facets::HandednessPolicy;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum LogFormat {
    Compact,
    Full,
    Pretty,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Compact => f.write_str("compact"),
            LogFormat::Full => f.write_str("full"),
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

/// `w` of generated tangents
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum Handedness {
    /// Always `+1`
    Positive,
    /// The measured handedness of each vertex's basis
    Measured,
}

impl std::fmt::Display for Handedness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Handedness::Positive => f.write_str("positive"),
            Handedness::Measured => f.write_str("measured"),
        }
    }
}

impl From<Handedness> for HandednessPolicy {
    fn from(value: Handedness) -> Self {
        match value {
            Handedness::Positive => HandednessPolicy::AlwaysPositive,
            Handedness::Measured => HandednessPolicy::FromBasis,
        }
    }
}

#[derive(Debug, clap::Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Logging output filters; comma-separated
    #[arg(
        short,
        long,
        default_value = "warn,facets=info,interleave=info,inspect=info",
        env = "INSPECT_LOG_FILTER"
    )]
    pub log_filter: String,
    /// Logging output format
    #[arg(long, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
    /// Handedness of generated tangents
    #[arg(long, default_value_t = Handedness::Positive)]
    pub handedness: Handedness,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Inspect the only mesh of a glTF document
    Gltf {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },
    /// Inspect an engine mesh container
    Engine {
        /// JSON metadata document
        #[arg(value_hint = ValueHint::FilePath)]
        metadata: PathBuf,
        /// Binary buffer the metadata refers to
        #[arg(value_hint = ValueHint::FilePath)]
        buffer: PathBuf,
        /// Write the metadata, with recomputed bounds, to this path
        #[arg(long, value_hint = ValueHint::FilePath)]
        write_bounds: Option<PathBuf>,
    },
}

/// Install the stderr subscriber shared by every subcommand, filtered by `--log-filter`.
pub(crate) fn initialize_tracing(log_filter: &str, log_format: LogFormat) {
    let tsub = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::OffsetTime::new(
            time::UtcOffset::current_local_offset().unwrap_or_else(|e| {
                tracing::warn!("couldn't get local time offset: {:?}", e);
                time::UtcOffset::UTC
            }),
            time::macros::format_description!("[hour]:[minute]:[second]"),
        ))
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_env_filter(log_filter);

    match log_format {
        LogFormat::Compact => tsub.compact().init(),
        LogFormat::Full => tsub.init(),
        LogFormat::Pretty => tsub.pretty().init(),
        LogFormat::Json => tsub.json().init(),
    }
}
