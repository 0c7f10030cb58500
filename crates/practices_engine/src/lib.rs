//! Practices engine: fetching, extraction, persistence and charting.
mod chart;
mod crawl;
mod dataset;
mod decode;
mod events;
mod extract;
mod fetch;
mod persist;
mod retry;
mod types;

pub use chart::{
    chart_path, generate_plots, ChartError, ChartOptions, ChartRenderer, PlotSummary,
    PlottersBarChart, DEFAULT_COLUMNS,
};
pub use crawl::{crawl, scrape, CrawlOutcome, ScrapeSettings, DEFAULT_BASE_URL};
pub use dataset::{load_dataset, write_dataset, Dataset, DatasetError};
pub use decode::{decode_html, DecodedHtml};
pub use events::{EventSink, LogSink};
pub use extract::{Extractor, PracticeCardExtractor, DEFAULT_BASE_DOMAIN};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use retry::{fetch_page, RetryPolicy};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput, ScrapeEvent};
