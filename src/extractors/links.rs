// src/extractors/links.rs
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

// Every anchor that actually points somewhere
static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("a[href]").expect("Failed to compile ANCHOR_SELECTOR")
});

/// An `<a href>` element as found on the index page.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    pub href: String,
    pub text: String, // All descendant text, untrimmed
}

impl Anchor {
    pub fn label(&self) -> &str {
        self.text.trim()
    }

    /// Case-sensitive substring check against each label in turn.
    pub fn matches_any(&self, labels: &[String]) -> bool {
        labels.iter().any(|label| self.text.contains(label.as_str()))
    }
}

/// Collects anchors carrying an `href`, in document order.
pub fn collect_anchors(html: &str) -> Vec<Anchor> {
    let document = Html::parse_document(html);

    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| {
            let href = element.value().attr("href")?;
            Some(Anchor {
                href: href.to_string(),
                text: element.text().collect::<String>(),
            })
        })
        .collect()
}

/// First anchor in document order whose text contains one of `labels`.
/// Later matches are ignored even when they look more recent.
pub fn find_download_link(html: &str, labels: &[String]) -> Option<Anchor> {
    let anchors = collect_anchors(html);
    tracing::debug!("Index page has {} anchors with href", anchors.len());

    let found = anchors.into_iter().find(|anchor| anchor.matches_any(labels));
    if let Some(anchor) = &found {
        tracing::debug!("Matched anchor '{}' -> {}", anchor.label(), anchor.href);
    }
    found
}
