use std::collections::VecDeque;

use practices_core::{
    page_url, update, CrawlConfig, CrawlState, Effect, ListingRecord, Msg, StopReason,
};
use url::Url;

use crate::extract::DEFAULT_BASE_DOMAIN;
use crate::{
    fetch_page, EventSink, Extractor, FetchError, FetchSettings, Fetcher, PracticeCardExtractor,
    ReqwestFetcher, RetryPolicy, ScrapeEvent,
};

/// Listing directory crawled when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://circulareconomy.europa.eu/platform/en/good-practices";

/// Everything a scrape run needs, passed in explicitly.
#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    pub base_url: Url,
    pub base_domain: String,
    pub crawl: CrawlConfig,
    pub retry: RetryPolicy,
    pub fetch: FetchSettings,
}

impl ScrapeSettings {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            base_domain: DEFAULT_BASE_DOMAIN.to_string(),
            crawl: CrawlConfig::default(),
            retry: RetryPolicy::default(),
            fetch: FetchSettings::default(),
        }
    }

    /// Settings for the public platform listing.
    pub fn platform() -> Result<Self, url::ParseError> {
        Ok(Self::new(Url::parse(DEFAULT_BASE_URL)?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlOutcome {
    pub records: Vec<ListingRecord>,
    pub reason: StopReason,
    pub pages_fetched: u32,
}

/// Runs the pagination state machine to completion, one page at a time.
pub async fn crawl(
    fetcher: &dyn Fetcher,
    extractor: &dyn Extractor,
    base_url: &Url,
    config: CrawlConfig,
    retry: RetryPolicy,
    sink: &dyn EventSink,
) -> CrawlOutcome {
    let (mut state, effects) = update(CrawlState::new(config), Msg::Start);
    let mut pending = VecDeque::from(effects);

    while let Some(effect) = pending.pop_front() {
        match effect {
            Effect::PageSkipped { page } => sink.emit(ScrapeEvent::PageSkipped { page }),
            Effect::FetchPage { page } => {
                let url = page_url(base_url, page);
                let records = match fetch_page(fetcher, &url, retry, sink).await {
                    Some(html) => {
                        let records = extractor.extract(&html);
                        sink.emit(ScrapeEvent::CardsExtracted {
                            page,
                            count: records.len(),
                        });
                        records
                    }
                    None => Vec::new(),
                };
                let (next, more) = update(state, Msg::PageExtracted { page, records });
                state = next;
                pending.extend(more);
            }
            Effect::PageAccepted { page, added, total } => {
                sink.emit(ScrapeEvent::PageScraped { page, added, total });
            }
            Effect::Finished { page, reason } => {
                sink.emit(ScrapeEvent::CrawlStopped { page, reason });
            }
        }
    }

    let pages_fetched = state.pages_fetched();
    CrawlOutcome {
        // The effect queue only drains after `Finished`.
        reason: state.stop_reason().unwrap_or(StopReason::EmptyPage),
        records: state.into_records(),
        pages_fetched,
    }
}

/// Crawls with the HTTP fetcher and card extractor built from `settings`.
///
/// Fails only when the HTTP client cannot be constructed; page-level
/// failures end the crawl normally.
pub async fn scrape(
    settings: &ScrapeSettings,
    sink: &dyn EventSink,
) -> Result<CrawlOutcome, FetchError> {
    let fetcher = ReqwestFetcher::new(settings.fetch.clone())?;
    let extractor = PracticeCardExtractor::new(settings.base_domain.clone());
    Ok(crawl(
        &fetcher,
        &extractor,
        &settings.base_url,
        settings.crawl.clone(),
        settings.retry,
        sink,
    )
    .await)
}
