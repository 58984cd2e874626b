use scraper::{ElementRef, Html, Selector};

/// One `<a>` element lifted out of a result page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: Option<String>,
    /// Concatenated inner text, as rendered in the snippet.
    pub text: String,
    /// Text of the first `<h3>` nested in the anchor, if any.
    pub heading: Option<String>,
}

/// Every anchor in the page, in document order.
///
/// Works the same for any engine's result page. Empty or garbage bodies yield
/// an empty list rather than an error.
pub fn extract_links(body: &str) -> Vec<Anchor> {
    if body.trim().is_empty() {
        return Vec::new();
    }
    let (Ok(anchor_selector), Ok(heading_selector)) = (Selector::parse("a"), Selector::parse("h3")) else {
        return Vec::new();
    };

    let document = Html::parse_document(body);
    document
        .select(&anchor_selector)
        .map(|element| to_anchor(element, &heading_selector))
        .collect()
}

fn to_anchor(element: ElementRef<'_>, heading_selector: &Selector) -> Anchor {
    let heading = element
        .select(heading_selector)
        .next()
        .map(|h| h.text().collect::<String>());

    Anchor {
        href: element.value().attr("href").map(str::to_string),
        text: element.text().collect::<String>(),
        heading,
    }
}
