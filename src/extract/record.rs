// src/extract/record.rs
use serde::Serialize;
use serde_json::{Map, Value};

/// One extracted listing. Either the page's own JSON-LD payload passed
/// through verbatim, or whatever the heuristic rules recovered — never a
/// mix of the two in the same record.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ListingRecord {
    Structured(Map<String, Value>),
    Heuristic(ListingFields),
}

impl ListingRecord {
    /// Image URLs for the inline-preview surface, whichever path produced
    /// the record. JSON-LD allows `image` to be a single URL or a list.
    pub fn image_urls(&self) -> Vec<String> {
        match self {
            ListingRecord::Heuristic(fields) => fields.images.clone().unwrap_or_default(),
            ListingRecord::Structured(data) => match data.get("image") {
                Some(Value::String(url)) => vec![url.clone()],
                Some(Value::Array(items)) => items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect(),
                _ => Vec::new(),
            },
        }
    }
}

/// The fields the heuristic rules can produce, in emission order. Every
/// field is optional: a rule that found no signal leaves its field out of
/// the serialized record entirely. The facts fields (`bedrooms` through
/// `property_type`) hold the raw text of the matching container, not a
/// parsed number or enum.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct ListingFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_info: Option<KeyInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_history: Option<Vec<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

/// Fixed-key summary block: each key holds the full text of the container
/// that mentioned it.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct KeyInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub council_tax: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub garden: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<String>,
}

impl KeyInfo {
    pub fn is_empty(&self) -> bool {
        self.council_tax.is_none()
            && self.parking.is_none()
            && self.garden.is_none()
            && self.accessibility.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_are_not_serialized() {
        let record = ListingRecord::Heuristic(ListingFields {
            title: Some("2 bed flat".to_string()),
            ..Default::default()
        });

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"title":"2 bed flat"}"#);
    }

    #[test]
    fn non_ascii_is_preserved_not_escaped() {
        let record = ListingRecord::Heuristic(ListingFields {
            price: Some("£250,000".to_string()),
            ..Default::default()
        });

        let json = serde_json::to_string_pretty(&record).unwrap();
        assert!(json.contains("£250,000"));
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn image_urls_reads_both_jsonld_shapes() {
        let single: Map<String, serde_json::Value> =
            serde_json::from_str(r#"{"@type":"House","image":"https://x/a.jpg"}"#).unwrap();
        assert_eq!(
            ListingRecord::Structured(single).image_urls(),
            vec!["https://x/a.jpg"]
        );

        let many: Map<String, serde_json::Value> =
            serde_json::from_str(r#"{"@type":"House","image":["https://x/a.jpg","https://x/b.jpg"]}"#)
                .unwrap();
        assert_eq!(
            ListingRecord::Structured(many).image_urls(),
            vec!["https://x/a.jpg", "https://x/b.jpg"]
        );
    }
}
