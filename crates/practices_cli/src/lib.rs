//! Command-line front ends: `scrape_practices` and `analyze_practices`.
//!
//! The binaries only parse arguments, install the logger and map the
//! outcome of [`run_scrape`] / [`run_analyze`] to a process exit code.
mod analyze;
mod args;
mod config;
mod logging;
mod scrape;
mod status;

pub use analyze::run_analyze;
pub use args::{AnalyzeArgs, LogArgs, LogLevel, ScrapeArgs, DEFAULT_OUTPUT};
pub use config::{load_file_config, resolve_scrape, FileConfig, ScrapePlan};
pub use logging::init_logging;
pub use scrape::run_scrape;
pub use status::{AnalyzeStatus, ScrapeStatus};
