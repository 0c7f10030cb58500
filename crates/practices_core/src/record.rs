use serde::{Deserialize, Serialize};

/// Placeholder for any field that could not be extracted.
pub const SENTINEL: &str = "N/A";

/// Human-readable column titles, in column order.
pub const COLUMN_TITLES: [&str; 10] = [
    "Title",
    "Description",
    "Link",
    "Organisation",
    "Type of Organisation",
    "Country",
    "Language",
    "Key Area",
    "Sector",
    "Scope",
];

/// One good-practice listing card.
///
/// Every field holds either an extracted, non-empty value or [`SENTINEL`].
/// Field order is the column order of the persisted dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Link")]
    pub link: String,
    #[serde(rename = "Organisation")]
    pub organisation: String,
    #[serde(rename = "Type of Organisation")]
    pub organisation_type: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Language")]
    pub language: String,
    #[serde(rename = "Key Area")]
    pub key_area: String,
    #[serde(rename = "Sector")]
    pub sector: String,
    #[serde(rename = "Scope")]
    pub scope: String,
}

impl Default for ListingRecord {
    fn default() -> Self {
        let na = || SENTINEL.to_string();
        Self {
            title: na(),
            description: na(),
            link: na(),
            organisation: na(),
            organisation_type: na(),
            country: na(),
            language: na(),
            key_area: na(),
            sector: na(),
            scope: na(),
        }
    }
}

impl ListingRecord {
    /// Field values in [`COLUMN_TITLES`] order.
    pub fn values(&self) -> [&str; 10] {
        [
            self.title.as_str(),
            self.description.as_str(),
            self.link.as_str(),
            self.organisation.as_str(),
            self.organisation_type.as_str(),
            self.country.as_str(),
            self.language.as_str(),
            self.key_area.as_str(),
            self.sector.as_str(),
            self.scope.as_str(),
        ]
    }
}

/// Substitutes the sentinel for an absent or blank value.
pub fn or_sentinel(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| SENTINEL.to_string())
}
