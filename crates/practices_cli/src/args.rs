use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use log::LevelFilter;
use practices_engine::DEFAULT_COLUMNS;
use url::Url;

/// Dataset file shared by both tools.
pub const DEFAULT_OUTPUT: &str = "good_practices.csv";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warning => LevelFilter::Warn,
            // `log` has nothing above error.
            LogLevel::Error | LogLevel::Critical => LevelFilter::Error,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    /// Minimum severity written to the log
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Also write the log to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Flags left unset fall back to the config file, then to built-in defaults.
#[derive(Debug, Clone, Parser)]
#[command(name = "scrape_practices")]
#[command(about = "Collect good-practice listings into a CSV dataset")]
pub struct ScrapeArgs {
    /// CSV destination [default: good_practices.csv]
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Number of listing pages to consider [default: 80]
    #[arg(long, value_name = "N")]
    pub max_pages: Option<u32>,

    /// 0-indexed page to leave out; may be repeated
    #[arg(long = "skip-page", value_name = "N")]
    pub skip_pages: Vec<u32>,

    /// Attempts per page [default: 3]
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub retries: Option<u32>,

    /// Seconds to wait between attempts [default: 5]
    #[arg(long, value_name = "SECS")]
    pub delay: Option<u64>,

    /// Listing directory to crawl
    #[arg(long, value_name = "URL")]
    pub base_url: Option<Url>,

    /// RON file with scrape settings
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "analyze_practices")]
#[command(about = "Chart category distributions of a scraped dataset")]
pub struct AnalyzeArgs {
    /// Dataset written by scrape_practices
    #[arg(long, value_name = "PATH", default_value = DEFAULT_OUTPUT)]
    pub input: PathBuf,

    /// Directory receiving one PNG per column
    #[arg(long, value_name = "DIR", default_value = "plots")]
    pub output_dir: PathBuf,

    /// Columns to chart [default: the categorical columns]
    #[arg(long, value_name = "COL", num_args = 1..)]
    pub columns: Vec<String>,

    /// TrueType font for chart labels
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    #[command(flatten)]
    pub log: LogArgs,
}

impl AnalyzeArgs {
    /// Requested columns, or the default set when none were given.
    pub fn selected_columns(&self) -> Vec<String> {
        if self.columns.is_empty() {
            DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect()
        } else {
            self.columns.clone()
        }
    }
}
