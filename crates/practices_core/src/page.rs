use url::Url;

/// Listing URL for a 0-indexed page: `base` with `page=<n>` appended to its query.
pub fn page_url(base: &Url, page: u32) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut().append_pair("page", &page.to_string());
    url
}
