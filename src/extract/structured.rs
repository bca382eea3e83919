// src/extract/structured.rs
use serde_json::{Map, Value};

use crate::extract::document::Document;

/// JSON-LD `@type` values that describe the listing itself.
const ACCEPTED_TYPES: [&str; 3] = ["House", "Apartment", "Product"];

/// Scan the page's JSON-LD blocks for the first object describing the
/// listing and return its payload verbatim. A block that fails to decode is
/// skipped, never fatal; no qualifying block means "not found", not an
/// error.
pub fn find_listing(doc: &Document) -> Option<Map<String, Value>> {
    for script in doc.select_all(r#"script[type="application/ld+json"]"#) {
        let raw = script.text().collect::<String>();
        let payload = raw
            .trim()
            .trim_start_matches("<![CDATA[")
            .trim_end_matches("]]>")
            .trim();

        let Ok(Value::Object(data)) = serde_json::from_str::<Value>(payload) else {
            continue;
        };

        let accepted = data
            .get("@type")
            .and_then(Value::as_str)
            .is_some_and(|entity| ACCEPTED_TYPES.contains(&entity));
        if accepted {
            return Some(data);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(html: &str) -> Document {
        Document::parse(html)
    }

    #[test]
    fn accepts_a_house_block_verbatim() {
        let html = r#"
            <html><head>
            <script type="application/ld+json">
            {"@type":"House","name":"3 bed semi","offers":{"price":"325000"}}
            </script>
            </head><body></body></html>
        "#;

        let data = find_listing(&doc(html)).unwrap();
        assert_eq!(data.get("@type").unwrap(), "House");
        assert_eq!(data.get("name").unwrap(), "3 bed semi");

        // Round trip: encoding the accepted payload reproduces the block.
        let expected: Value =
            serde_json::from_str(r#"{"@type":"House","name":"3 bed semi","offers":{"price":"325000"}}"#)
                .unwrap();
        assert_eq!(Value::Object(data), expected);
    }

    #[test]
    fn malformed_block_is_skipped_in_favor_of_a_later_valid_one() {
        let html = r#"
            <script type="application/ld+json">{not valid json</script>
            <script type="application/ld+json">{"@type":"Apartment","name":"City flat"}</script>
        "#;

        let data = find_listing(&doc(html)).unwrap();
        assert_eq!(data.get("name").unwrap(), "City flat");
    }

    #[test]
    fn unrelated_types_are_rejected() {
        let html = r#"
            <script type="application/ld+json">{"@type":"BreadcrumbList","itemListElement":[]}</script>
            <script type="application/ld+json">{"@type":"Organization","name":"Acme"}</script>
        "#;

        assert!(find_listing(&doc(html)).is_none());
    }

    #[test]
    fn plain_scripts_are_ignored() {
        let html = r#"<script>{"@type":"House"}</script>"#;
        assert!(find_listing(&doc(html)).is_none());
    }
}
