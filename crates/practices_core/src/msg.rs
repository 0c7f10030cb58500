use crate::ListingRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Begin the crawl from the current page.
    Start,
    /// Extraction finished for a requested page. An empty `records` covers
    /// both a page without cards and a page whose fetch failed.
    PageExtracted {
        page: u32,
        records: Vec<ListingRecord>,
    },
}
