// src/extract/mod.rs
mod document;
mod record;
mod rules;
mod structured;

pub use document::Document;
pub use record::{KeyInfo, ListingFields, ListingRecord};
pub use rules::{FieldRule, FIELD_RULES};

/// Extract one listing record from a parsed page. JSON-LD wins outright
/// when a qualifying block exists; otherwise every heuristic rule runs
/// independently and whatever matched is assembled into the record.
/// `host_marker` scopes the image rule to the listing site's own hosts.
pub fn extract_listing(doc: &Document, host_marker: &str) -> ListingRecord {
    if let Some(data) = structured::find_listing(doc) {
        return ListingRecord::Structured(data);
    }

    let mut fields = ListingFields::default();
    for rule in FIELD_RULES {
        (rule.apply)(doc, host_marker, &mut fields);
    }
    ListingRecord::Heuristic(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_data_fully_replaces_the_heuristic_fields() {
        // The h1 and price would both match heuristically; the JSON-LD
        // block must win outright, not merge.
        let html = r#"
            <script type="application/ld+json">
            {"@type":"House","name":"3 bed semi","offers":{"price":"£325,000"}}
            </script>
            <h1>Heuristic title</h1>
            <span>£999,999</span>
        "#;

        let doc = Document::parse(html);
        let record = extract_listing(&doc, "rightmove");

        match record {
            ListingRecord::Structured(data) => {
                assert_eq!(data.get("name").unwrap(), "3 bed semi");
                assert!(data.get("title").is_none());
            }
            ListingRecord::Heuristic(_) => panic!("expected the JSON-LD payload"),
        }
    }

    #[test]
    fn falls_back_to_heuristics_without_a_qualifying_block() {
        let html = r#"
            <script type="application/ld+json">{"@type":"WebPage"}</script>
            <h1>2 bed flat for sale</h1>
            <span>£250,000</span>
        "#;

        let doc = Document::parse(html);
        let record = extract_listing(&doc, "rightmove");

        match record {
            ListingRecord::Heuristic(fields) => {
                assert_eq!(fields.title.as_deref(), Some("2 bed flat for sale"));
                assert_eq!(fields.price.as_deref(), Some("£250,000"));
            }
            ListingRecord::Structured(_) => panic!("expected the heuristic path"),
        }
    }
}
