use crate::StopReason;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Page was in the skip set and will not be requested.
    PageSkipped { page: u32 },
    /// Fetch and extract this page, then report back with `Msg::PageExtracted`.
    FetchPage { page: u32 },
    /// Records of a page were appended to the accumulator.
    PageAccepted { page: u32, added: usize, total: usize },
    /// Terminal; no further effects follow.
    Finished { page: u32, reason: StopReason },
}
