//! Practices core: listing data model and the pure pagination state machine.
mod effect;
mod msg;
mod page;
mod record;
mod state;
mod update;

pub use effect::Effect;
pub use msg::Msg;
pub use page::page_url;
pub use record::{or_sentinel, ListingRecord, COLUMN_TITLES, SENTINEL};
pub use state::{CrawlConfig, CrawlPhase, CrawlState, StopReason, DEFAULT_MAX_PAGES};
pub use update::update;
