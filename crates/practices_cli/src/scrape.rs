use practices_engine::{scrape, write_dataset, LogSink};
use practices_logging::{practices_error, practices_info};

use crate::args::ScrapeArgs;
use crate::config::{load_file_config, resolve_scrape, FileConfig};
use crate::status::ScrapeStatus;

/// Loads configuration, crawls the listing and writes the CSV dataset.
pub async fn run_scrape(args: &ScrapeArgs) -> ScrapeStatus {
    let file = match &args.config {
        Some(path) => match load_file_config(path) {
            Ok(file) => file,
            Err(err) => {
                practices_error!("Configuration error: {:#}", err);
                return ScrapeStatus::ConfigError;
            }
        },
        None => FileConfig::default(),
    };
    let plan = match resolve_scrape(args, file) {
        Ok(plan) => plan,
        Err(err) => {
            practices_error!("Configuration error: {:#}", err);
            return ScrapeStatus::ConfigError;
        }
    };

    practices_info!(
        "Scraping {} (up to {} pages, {} skipped)",
        plan.settings.base_url,
        plan.settings.crawl.max_pages,
        plan.settings.crawl.skip_pages.len()
    );
    let outcome = match scrape(&plan.settings, &LogSink).await {
        Ok(outcome) => outcome,
        Err(err) => {
            practices_error!("Could not set up the HTTP client: {}", err);
            return ScrapeStatus::ConfigError;
        }
    };

    if outcome.records.is_empty() {
        practices_error!("Scraping completed but produced no records.");
        return ScrapeStatus::NoRecords;
    }

    match write_dataset(&outcome.records, &plan.output) {
        Ok(_) => ScrapeStatus::Saved,
        Err(err) => {
            practices_error!("Failed to persist dataset: {}", err);
            ScrapeStatus::PersistFailed
        }
    }
}
