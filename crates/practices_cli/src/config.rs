use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use practices_engine::{ScrapeSettings, DEFAULT_BASE_URL};
use ron::extensions::Extensions;
use serde::Deserialize;
use url::Url;

use crate::args::{ScrapeArgs, DEFAULT_OUTPUT};

/// Optional scrape settings read from a RON file.
///
/// Every field may be omitted. `Option` fields can be written without
/// `Some(..)`:
///
/// ```ron
/// (
///     max_pages: 10,
///     skip_pages: [2, 5],
///     extra_headers: {"Accept-Language": "en"},
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub base_domain: Option<String>,
    pub max_pages: Option<u32>,
    pub skip_pages: Vec<u32>,
    pub retries: Option<u32>,
    pub retry_delay_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    pub extra_headers: BTreeMap<String, String>,
    pub output: Option<PathBuf>,
}

pub fn load_file_config(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    ron::Options::default()
        .with_default_extension(Extensions::IMPLICIT_SOME)
        .from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

/// Engine settings and output path for one scrape run.
#[derive(Debug, Clone)]
pub struct ScrapePlan {
    pub settings: ScrapeSettings,
    pub output: PathBuf,
}

/// Combines flags, file values and defaults, in that order of precedence.
///
/// Skip pages are the union of both sources. Without an explicit base
/// domain, relative links resolve against the origin of the base URL.
pub fn resolve_scrape(args: &ScrapeArgs, file: FileConfig) -> Result<ScrapePlan> {
    let base_url = match (&args.base_url, &file.base_url) {
        (Some(url), _) => url.clone(),
        (None, Some(raw)) => {
            Url::parse(raw).with_context(|| format!("invalid base_url {raw:?} in config"))?
        }
        (None, None) => Url::parse(DEFAULT_BASE_URL).context("invalid built-in base URL")?,
    };

    let mut settings = ScrapeSettings::new(base_url);
    settings.base_domain = match file.base_domain {
        Some(domain) => domain,
        None => settings.base_url.origin().ascii_serialization(),
    };

    if let Some(max_pages) = args.max_pages.or(file.max_pages) {
        settings.crawl.max_pages = max_pages;
    }
    settings.crawl.skip_pages.extend(file.skip_pages);
    settings.crawl.skip_pages.extend(args.skip_pages.iter().copied());

    if let Some(retries) = args.retries.or(file.retries) {
        if retries == 0 {
            bail!("retries must be at least 1");
        }
        settings.retry.max_attempts = retries;
    }
    if let Some(secs) = args.delay.or(file.retry_delay_secs) {
        settings.retry.delay = Duration::from_secs(secs);
    }

    if let Some(secs) = file.request_timeout_secs {
        settings.fetch.request_timeout = Duration::from_secs(secs);
    }
    if let Some(user_agent) = file.user_agent {
        settings.fetch.user_agent = user_agent;
    }
    settings.fetch.extra_headers = file.extra_headers.into_iter().collect();

    let output = args
        .output
        .clone()
        .or(file.output)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    Ok(ScrapePlan { settings, output })
}
