/// How a `scrape_practices` run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeStatus {
    Saved,
    NoRecords,
    PersistFailed,
    ConfigError,
}

impl ScrapeStatus {
    pub fn code(self) -> u8 {
        match self {
            ScrapeStatus::Saved => 0,
            ScrapeStatus::NoRecords => 1,
            ScrapeStatus::PersistFailed => 2,
            ScrapeStatus::ConfigError => 3,
        }
    }
}

/// How an `analyze_practices` run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzeStatus {
    Charted,
    DatasetUnavailable,
    ChartFailed,
}

impl AnalyzeStatus {
    pub fn code(self) -> u8 {
        match self {
            AnalyzeStatus::Charted => 0,
            AnalyzeStatus::DatasetUnavailable => 1,
            AnalyzeStatus::ChartFailed => 2,
        }
    }
}
