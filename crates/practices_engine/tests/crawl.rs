use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use practices_core::{CrawlConfig, StopReason};
use practices_engine::{
    crawl, scrape, EventSink, FailureKind, FetchError, FetchMetadata, FetchOutput, Fetcher,
    LogSink, PracticeCardExtractor, RetryPolicy, ScrapeEvent, ScrapeSettings,
};
use pretty_assertions::assert_eq;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct TestSink {
    events: Mutex<Vec<ScrapeEvent>>,
}

impl TestSink {
    fn take(&self) -> Vec<ScrapeEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl EventSink for TestSink {
    fn emit(&self, event: ScrapeEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Serves canned markup per page index; unknown pages fail with a 500.
#[derive(Default)]
struct ScriptedFetcher {
    pages: HashMap<u32, String>,
    requested: Arc<Mutex<Vec<u32>>>,
}

impl ScriptedFetcher {
    fn with_pages(pages: impl IntoIterator<Item = (u32, String)>) -> Self {
        Self {
            pages: pages.into_iter().collect(),
            requested: Arc::default(),
        }
    }

    fn requested(&self) -> Vec<u32> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchOutput, FetchError> {
        let page: u32 = url
            .query_pairs()
            .find(|(k, _)| k == "page")
            .and_then(|(_, v)| v.parse().ok())
            .expect("page parameter");
        self.requested.lock().unwrap().push(page);
        match self.pages.get(&page) {
            Some(html) => Ok(FetchOutput {
                bytes: html.as_bytes().to_vec(),
                metadata: FetchMetadata {
                    url: url.to_string(),
                    final_url: url.to_string(),
                    status: 200,
                    content_type: Some("text/html; charset=utf-8".into()),
                    byte_len: html.len() as u64,
                },
            }),
            None => Err(FetchError {
                kind: FailureKind::HttpStatus(500),
                message: "scripted failure".into(),
            }),
        }
    }
}

fn cards(titles: &[&str]) -> String {
    titles
        .iter()
        .map(|t| {
            format!(
                r#"<div class="node--type-cecon-good-practice"><h2><a href="/gp/{t}">{t}</a></h2></div>"#
            )
        })
        .collect()
}

fn base() -> Url {
    Url::parse("https://example.org/good-practices").unwrap()
}

fn config(max_pages: u32, skip: &[u32]) -> CrawlConfig {
    CrawlConfig {
        max_pages,
        skip_pages: skip.iter().copied().collect::<BTreeSet<_>>(),
    }
}

fn retry(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        delay: Duration::ZERO,
    }
}

fn titles(records: &[practices_core::ListingRecord]) -> Vec<&str> {
    records.iter().map(|r| r.title.as_str()).collect()
}

#[tokio::test]
async fn empty_page_ends_crawl_keeping_earlier_records_in_order() {
    let fetcher = ScriptedFetcher::with_pages([
        (0, cards(&["a", "b"])),
        (1, cards(&["c"])),
        (2, "<html><body>No results</body></html>".to_string()),
        (3, cards(&["never"])),
    ]);
    let sink = TestSink::default();

    let outcome = crawl(
        &fetcher,
        &PracticeCardExtractor::default(),
        &base(),
        config(80, &[]),
        retry(1),
        &sink,
    )
    .await;

    assert_eq!(outcome.reason, StopReason::EmptyPage);
    assert_eq!(titles(&outcome.records), vec!["a", "b", "c"]);
    assert_eq!(fetcher.requested(), vec![0, 1, 2]);
    assert_eq!(outcome.pages_fetched, 3);
    assert!(matches!(
        sink.take().last(),
        Some(ScrapeEvent::CrawlStopped {
            page: 2,
            reason: StopReason::EmptyPage
        })
    ));
}

#[tokio::test]
async fn failed_fetch_counts_as_empty_page() {
    let fetcher = ScriptedFetcher::with_pages([(0, cards(&["a"]))]);
    let sink = TestSink::default();

    let outcome = crawl(
        &fetcher,
        &PracticeCardExtractor::default(),
        &base(),
        config(80, &[]),
        retry(2),
        &sink,
    )
    .await;

    assert_eq!(outcome.reason, StopReason::EmptyPage);
    assert_eq!(titles(&outcome.records), vec!["a"]);
    // Page 1 is attempted twice before giving up.
    assert_eq!(fetcher.requested(), vec![0, 1, 1]);
}

#[tokio::test]
async fn page_cap_stops_after_exactly_max_pages() {
    let fetcher = ScriptedFetcher::with_pages((0..10).map(|p| (p, cards(&["x"]))));
    let sink = TestSink::default();

    let outcome = crawl(
        &fetcher,
        &PracticeCardExtractor::default(),
        &base(),
        config(5, &[]),
        retry(1),
        &sink,
    )
    .await;

    assert_eq!(outcome.reason, StopReason::MaxPagesReached);
    assert_eq!(fetcher.requested(), vec![0, 1, 2, 3, 4]);
    assert_eq!(outcome.records.len(), 5);
}

#[tokio::test]
async fn skip_set_pages_are_never_fetched() {
    let fetcher = ScriptedFetcher::with_pages((0..5).map(|p| (p, cards(&[&p.to_string()]))));
    let sink = TestSink::default();

    let outcome = crawl(
        &fetcher,
        &PracticeCardExtractor::default(),
        &base(),
        config(80, &[2]),
        retry(1),
        &sink,
    )
    .await;

    assert_eq!(fetcher.requested(), vec![0, 1, 3, 4, 5]);
    assert_eq!(titles(&outcome.records), vec!["0", "1", "3", "4"]);
    let skipped: Vec<_> = sink
        .take()
        .into_iter()
        .filter_map(|e| match e {
            ScrapeEvent::PageSkipped { page } => Some(page),
            _ => None,
        })
        .collect();
    assert_eq!(skipped, vec![2]);
}

#[tokio::test]
async fn scrape_over_http_resolves_links_against_base_domain() {
    let server = MockServer::start().await;
    for (page, body) in [(0, cards(&["first", "second"])), (1, cards(&["third"]))] {
        Mock::given(method("GET"))
            .and(path("/platform/en/good-practices"))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
            .expect(1)
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/platform/en/good-practices"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<p>none</p>", "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    let base_url = Url::parse(&format!("{}/platform/en/good-practices", server.uri())).unwrap();
    let mut settings = ScrapeSettings::new(base_url);
    settings.base_domain = server.uri();
    settings.retry = retry(1);
    let sink = TestSink::default();

    let outcome = scrape(&settings, &sink).await.unwrap();

    assert_eq!(outcome.reason, StopReason::EmptyPage);
    assert_eq!(titles(&outcome.records), vec!["first", "second", "third"]);
    assert_eq!(outcome.records[0].link, format!("{}/gp/first", server.uri()));
}

#[tokio::test]
async fn log_sink_reports_a_full_crawl() {
    practices_logging::initialize_for_tests();
    let fetcher = ScriptedFetcher::with_pages([(0, cards(&["a"])), (2, String::new())]);

    let outcome = crawl(
        &fetcher,
        &PracticeCardExtractor::default(),
        &base(),
        config(80, &[1]),
        retry(1),
        &LogSink,
    )
    .await;

    assert_eq!(outcome.reason, StopReason::EmptyPage);
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(fetcher.requested(), vec![0, 2]);
}
