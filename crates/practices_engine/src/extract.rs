use practices_core::{or_sentinel, ListingRecord};
use scraper::{ElementRef, Html, Selector};

/// Domain prepended to root-relative listing links.
pub const DEFAULT_BASE_DOMAIN: &str = "https://circulareconomy.europa.eu";

const CARD: &str = "div.node--type-cecon-good-practice";

pub trait Extractor: Send + Sync {
    /// All top-level listing cards in `html`, in document order.
    fn extract(&self, html: &str) -> Vec<ListingRecord>;
}

/// Extracts good-practice cards from a directory page.
///
/// Every lookup is an `Option` chain ending in [`or_sentinel`], so a missing
/// node at any depth yields `"N/A"` for that field only.
#[derive(Debug)]
pub struct PracticeCardExtractor {
    base_domain: String,
    selectors: CardSelectors,
}

#[derive(Debug)]
struct CardSelectors {
    card: Option<Selector>,
    heading: Option<Selector>,
    anchor: Option<Selector>,
    description: Option<Selector>,
    organisation: Option<Selector>,
    organisation_type: Option<Selector>,
    country: Option<Selector>,
    language: Option<Selector>,
    key_area: Option<Selector>,
    sector: Option<Selector>,
    scope: Option<Selector>,
}

impl CardSelectors {
    fn new() -> Self {
        let sel = |css: &str| Selector::parse(css).ok();
        Self {
            card: sel(CARD),
            heading: sel("h2"),
            anchor: sel("a"),
            description: sel(".field-node--field-cecon-abstract"),
            organisation: sel(".field-node--field-cecon-organisation-company a"),
            organisation_type: sel(".field-node--field-cecon-contributor-category a"),
            country: sel(".field-node--field-cecon-country .field-item"),
            language: sel(".field-node--field-cecon-main-language a"),
            key_area: sel(".field-node--field-cecon-key-area a"),
            sector: sel(".field-node--field-cecon-sector a"),
            scope: sel(".field-node--field-cecon-scope a"),
        }
    }
}

impl PracticeCardExtractor {
    pub fn new(base_domain: impl Into<String>) -> Self {
        let base_domain = base_domain.into().trim_end_matches('/').to_string();
        Self {
            base_domain,
            selectors: CardSelectors::new(),
        }
    }

    pub fn base_domain(&self) -> &str {
        &self.base_domain
    }

    fn parse_card(&self, card: ElementRef<'_>) -> ListingRecord {
        let s = &self.selectors;
        let heading = first(card, &s.heading);

        let href = heading
            .and_then(|h| first(h, &s.anchor))
            .and_then(|a| a.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty());

        ListingRecord {
            title: or_sentinel(heading.map(element_text)),
            description: single(card, &s.description),
            link: or_sentinel(href.map(|href| self.resolve_link(href))),
            organisation: single(card, &s.organisation),
            organisation_type: single(card, &s.organisation_type),
            country: single(card, &s.country),
            language: single(card, &s.language),
            key_area: joined(card, &s.key_area),
            sector: joined(card, &s.sector),
            scope: joined(card, &s.scope),
        }
    }

    /// Root-relative paths are prefixed with the base domain; anything else
    /// is kept as written.
    fn resolve_link(&self, href: &str) -> String {
        if href.starts_with('/') {
            format!("{}{}", self.base_domain, href)
        } else {
            href.to_string()
        }
    }
}

impl Default for PracticeCardExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_DOMAIN)
    }
}

impl Extractor for PracticeCardExtractor {
    fn extract(&self, html: &str) -> Vec<ListingRecord> {
        let doc = Html::parse_document(html);
        let Some(card_sel) = self.selectors.card.as_ref() else {
            return Vec::new();
        };

        doc.select(card_sel)
            .filter(|card| !is_nested_card(*card, card_sel))
            .map(|card| self.parse_card(card))
            .collect()
    }
}

fn is_nested_card(card: ElementRef<'_>, card_sel: &Selector) -> bool {
    card.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| card_sel.matches(&ancestor))
}

fn first<'a>(scope: ElementRef<'a>, selector: &Option<Selector>) -> Option<ElementRef<'a>> {
    selector.as_ref().and_then(|sel| scope.select(sel).next())
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn single(card: ElementRef<'_>, selector: &Option<Selector>) -> String {
    or_sentinel(first(card, selector).map(element_text))
}

fn joined(card: ElementRef<'_>, selector: &Option<Selector>) -> String {
    let values: Vec<String> = selector
        .as_ref()
        .map(|sel| {
            card.select(sel)
                .map(element_text)
                .filter(|text| !text.is_empty())
                .collect()
        })
        .unwrap_or_default();
    or_sentinel(Some(values.join(", ")))
}
