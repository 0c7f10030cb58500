use std::collections::BTreeSet;

use crate::ListingRecord;

/// Page cap used when none is configured.
pub const DEFAULT_MAX_PAGES: u32 = 80;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Pages with an index at or above this value are never requested.
    pub max_pages: u32,
    /// 0-indexed pages to pass over without fetching. Skipped pages still
    /// count toward `max_pages`.
    pub skip_pages: BTreeSet<u32>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            skip_pages: BTreeSet::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A page produced no records (empty listing or failed fetch).
    EmptyPage,
    MaxPagesReached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlPhase {
    Running(u32),
    Stopped(StopReason),
}

/// Pagination state plus the append-only record accumulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlState {
    config: CrawlConfig,
    phase: CrawlPhase,
    awaiting: Option<u32>,
    records: Vec<ListingRecord>,
    pages_fetched: u32,
}

impl CrawlState {
    pub fn new(config: CrawlConfig) -> Self {
        Self {
            config,
            phase: CrawlPhase::Running(0),
            awaiting: None,
            records: Vec::new(),
            pages_fetched: 0,
        }
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Page whose extraction result is expected next, if a fetch is pending.
    pub fn awaiting(&self) -> Option<u32> {
        self.awaiting
    }

    pub fn records(&self) -> &[ListingRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ListingRecord> {
        self.records
    }

    /// Number of pages for which a fetch was requested.
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        match self.phase {
            CrawlPhase::Stopped(reason) => Some(reason),
            CrawlPhase::Running(_) => None,
        }
    }

    pub(crate) fn set_phase(&mut self, phase: CrawlPhase) {
        self.phase = phase;
    }

    pub(crate) fn begin_fetch(&mut self, page: u32) {
        self.awaiting = Some(page);
        self.pages_fetched += 1;
    }

    pub(crate) fn end_fetch(&mut self) {
        self.awaiting = None;
    }

    pub(crate) fn append(&mut self, records: Vec<ListingRecord>) {
        self.records.extend(records);
    }
}
