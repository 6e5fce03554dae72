use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hbquery")]
#[command(about = "Build and load HandBrakeCLI queries", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level for diagnostics on stderr (overrides config)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<tracing::Level>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the HandBrakeCLI query for a settings file
    Encode {
        /// Settings snapshot (TOML)
        settings: PathBuf,

        /// Build the short preview query instead of the full encode
        #[arg(long)]
        preview: bool,

        /// Print the query, chapter file and warnings as JSON
        #[arg(long)]
        json: bool,

        /// Derive the destination name from source, title and chapters (overrides config)
        #[arg(long)]
        auto_name: bool,
    },

    /// Load a query string back into a settings snapshot (TOML on stdout)
    Preset {
        /// Query as produced by `encode`
        query: String,

        /// Settings to apply the query onto (defaults otherwise)
        #[arg(long, value_name = "SETTINGS")]
        base: Option<PathBuf>,

        /// Scanned titles, e.g. "2 (01:30:00)"; the longest is used when the query has no -t
        #[arg(long = "title", value_name = "LABEL")]
        titles: Vec<String>,
    },

    /// Pick the longest of the given titles
    LongestTitle {
        /// Title labels, e.g. "1 (00:10:00)" "2 (01:30:00)"
        #[arg(required = true)]
        titles: Vec<String>,
    },

    /// Print default chapter names for a chapter range as CSV
    Chapters { start: u32, finish: u32 },

    /// Show config status and location, or create default config if missing
    InitConfig,
}

pub fn parse() -> Cli {
    Cli::parse()
}
