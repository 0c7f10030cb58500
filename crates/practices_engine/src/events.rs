use practices_core::StopReason;
use practices_logging::{practices_debug, practices_error, practices_info, practices_warn};

use crate::ScrapeEvent;

/// Observer for crawl progress. The engine never logs fetch and pagination
/// steps directly; it reports them here.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ScrapeEvent);
}

/// Forwards every event to the global logger.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: ScrapeEvent) {
        match event {
            ScrapeEvent::FetchAttempt {
                url,
                attempt,
                max_attempts,
            } => {
                practices_info!("Fetching URL {} (attempt {}/{})", url, attempt, max_attempts);
            }
            ScrapeEvent::FetchSucceeded { url, byte_len } => {
                practices_debug!("Successfully retrieved {} ({} bytes)", url, byte_len);
            }
            ScrapeEvent::FetchFailed { url, attempt, error } => {
                practices_warn!("Attempt {} on {} failed: {}", attempt, url, error);
            }
            ScrapeEvent::RetryScheduled { delay, .. } => {
                practices_info!("Retrying in {} seconds...", delay.as_secs_f32());
            }
            ScrapeEvent::FetchGaveUp { url, attempts } => {
                practices_error!(
                    "Failed to retrieve data from {} after {} attempts.",
                    url,
                    attempts
                );
            }
            ScrapeEvent::DecodedWithErrors { url, encoding } => {
                practices_warn!(
                    "Body of {} contained invalid {} sequences; they were replaced",
                    url,
                    encoding
                );
            }
            ScrapeEvent::CardsExtracted { page, count } => {
                practices_debug!("Found {} practice cards on page {}.", count, page);
            }
            ScrapeEvent::PageSkipped { page } => {
                practices_info!("Skipping page {} as requested.", page);
            }
            ScrapeEvent::PageScraped { page, total, .. } => {
                practices_info!("Page {} scraped. Total records: {}", page, total);
            }
            ScrapeEvent::CrawlStopped { page, reason } => match reason {
                StopReason::EmptyPage => {
                    practices_warn!("No data returned for page {}. Stopping pagination.", page);
                }
                StopReason::MaxPagesReached => {
                    practices_info!("Reached the page cap at page {}. Stopping pagination.", page);
                }
            },
        }
    }
}
