// src/extract/document.rs
use scraper::{ElementRef, Html, Node, Selector};

/// Parsed-tree view of one listing page. The extraction rules only talk to
/// this adapter, never to the parser directly, so a rule cannot error on a
/// selector: a selector that fails to parse simply matches nothing.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(raw: &str) -> Self {
        Self {
            html: Html::parse_document(raw),
        }
    }

    /// First element matching `css`, in document order.
    pub(crate) fn select_first(&self, css: &str) -> Option<ElementRef<'_>> {
        let selector = Selector::parse(css).ok()?;
        self.html.select(&selector).next()
    }

    /// Every element matching `css`, in document order.
    pub(crate) fn select_all(&self, css: &str) -> Vec<ElementRef<'_>> {
        match Selector::parse(css) {
            Ok(selector) => self.html.select(&selector).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Descendants of `el` matching `css`, in document order.
    pub(crate) fn select_within<'a>(el: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
        match Selector::parse(css) {
            Ok(selector) => el.select(&selector).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Text of `el`: each segment trimmed, empty segments dropped, the rest
    /// joined with `sep`.
    pub(crate) fn joined_text(el: ElementRef<'_>, sep: &str) -> String {
        el.text()
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join(sep)
    }

    /// Every text node in the document, in document order. Includes script
    /// bodies, like a raw walk over the parse tree does.
    pub(crate) fn text_nodes(&self) -> impl Iterator<Item = &str> {
        self.html.root_element().text()
    }

    /// Full text of the immediate parent element of the first text node
    /// whose trimmed content equals `needle`.
    pub(crate) fn parent_text_of(&self, needle: &str) -> Option<String> {
        for node in self.html.root_element().descendants() {
            if let Node::Text(text) = node.value() {
                if text.trim() != needle {
                    continue;
                }
                if let Some(parent) = node.parent().and_then(ElementRef::wrap) {
                    return Some(Self::joined_text(parent, " "));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joined_text_trims_and_drops_empty_segments() {
        let doc = Document::parse("<p>  Hello <b> world </b>\n  </p>");
        let p = doc.select_first("p").unwrap();
        assert_eq!(Document::joined_text(p, " "), "Hello world");
    }

    #[test]
    fn bad_selector_matches_nothing() {
        let doc = Document::parse("<p>text</p>");
        assert!(doc.select_first("p[").is_none());
        assert!(doc.select_all("p[").is_empty());
    }

    #[test]
    fn parent_text_of_trims_the_needle_node() {
        let doc = Document::parse("<div><span>\n  Marketed by\n</span> Acme Estates</div>");
        // The span's text is the needle, so its parent is the span itself.
        assert_eq!(doc.parent_text_of("Marketed by").as_deref(), Some("Marketed by"));
        assert_eq!(doc.parent_text_of("no such label"), None);
    }
}
