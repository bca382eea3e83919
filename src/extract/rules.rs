// src/extract/rules.rs
use std::collections::HashSet;

use crate::extract::document::Document;
use crate::extract::record::{KeyInfo, ListingFields};

/// Currency marker for the price rule. One upstream variant compared
/// against a mis-encoded two-byte sequence that can never match decoded
/// text; only the canonical U+00A3 is matched here.
const CURRENCY_SIGN: char = '£';

/// Tags treated as block-level containers by the keyword scans. Nested
/// containers each match independently.
const BLOCK_CONTAINERS: &str = "div, p, li, td, section";

/// Text node marking the agent block.
const AGENT_MARKER: &str = "Marketed by";

/// One heuristic field rule. `host_marker` is only consulted by the image
/// rule; the others ignore it.
pub struct FieldRule {
    pub name: &'static str,
    pub apply: fn(&Document, &str, &mut ListingFields),
}

/// The heuristic rule set, in evaluation order. Rules are independent and
/// best-effort: a rule that finds no signal leaves its field unset and
/// never stops the others. Tie-breaks are part of the contract — first
/// match wins for title/address/features/price/agent, last match wins for
/// the facts and key-info scans.
pub const FIELD_RULES: &[FieldRule] = &[
    FieldRule { name: "title", apply: title },
    FieldRule { name: "address", apply: address },
    FieldRule { name: "description", apply: description },
    FieldRule { name: "features", apply: features },
    FieldRule { name: "price", apply: price },
    FieldRule { name: "facts", apply: facts },
    FieldRule { name: "agent", apply: agent },
    FieldRule { name: "key_info", apply: key_info },
    FieldRule { name: "sale_history", apply: sale_history },
    FieldRule { name: "images", apply: images },
];

fn title(doc: &Document, _marker: &str, out: &mut ListingFields) {
    out.title = doc
        .select_first("h1")
        .map(|el| Document::joined_text(el, " "))
        .filter(|text| !text.is_empty());
}

fn address(doc: &Document, _marker: &str, out: &mut ListingFields) {
    out.address = doc
        .select_first("address")
        .map(|el| Document::joined_text(el, " "))
        .filter(|text| !text.is_empty());
}

fn description(doc: &Document, _marker: &str, out: &mut ListingFields) {
    out.description = doc
        .select_first("#description")
        .map(|el| Document::joined_text(el, "\n"))
        .filter(|text| !text.is_empty());
}

/// The first <ul> anywhere in the document is taken to be the key-features
/// list. That is a heuristic carried over from the site's layout, not a
/// guarantee.
fn features(doc: &Document, _marker: &str, out: &mut ListingFields) {
    let Some(list) = doc.select_first("ul") else {
        return;
    };

    let items: Vec<String> = Document::select_within(list, "li")
        .into_iter()
        .map(|li| Document::joined_text(li, " "))
        .filter(|text| !text.is_empty())
        .collect();

    if !items.is_empty() {
        out.features = Some(items);
    }
}

/// First text node carrying the currency sign, in document order. No
/// numeric parsing or currency normalization.
fn price(doc: &Document, _marker: &str, out: &mut ListingFields) {
    out.price = doc
        .text_nodes()
        .find(|text| text.contains(CURRENCY_SIGN))
        .map(|text| text.trim().to_string());
}

/// Keyword classification over block containers. Classification is
/// text-based, not structural, so a later unrelated container mentioning a
/// keyword silently overwrites an earlier hit.
fn facts(doc: &Document, _marker: &str, out: &mut ListingFields) {
    for el in doc.select_all(BLOCK_CONTAINERS) {
        let text = Document::joined_text(el, " ");
        if text.is_empty() {
            continue;
        }
        let lower = text.to_lowercase();

        if lower.contains("bedroom") {
            out.bedrooms = Some(text.clone());
        }
        if lower.contains("bathroom") {
            out.bathrooms = Some(text.clone());
        }
        if lower.contains("sq ft") || lower.contains("sq m") {
            out.size = Some(text.clone());
        }
        if lower.contains("freehold") || lower.contains("leasehold") {
            out.tenure = Some(text.clone());
        }
        if lower.contains("house") || lower.contains("flat") || lower.contains("apartment") {
            out.property_type = Some(text.clone());
        }
    }
}

fn agent(doc: &Document, _marker: &str, out: &mut ListingFields) {
    out.agent = doc.parent_text_of(AGENT_MARKER);
}

/// Same block scan as the facts rule, but against fixed case-sensitive
/// labels. One container may populate several keys.
fn key_info(doc: &Document, _marker: &str, out: &mut ListingFields) {
    let mut info = KeyInfo::default();

    for el in doc.select_all(BLOCK_CONTAINERS) {
        let text = Document::joined_text(el, " ");
        if text.is_empty() {
            continue;
        }

        if text.contains("Council Tax") {
            info.council_tax = Some(text.clone());
        }
        if text.contains("Parking") {
            info.parking = Some(text.clone());
        }
        if text.contains("Garden") {
            info.garden = Some(text.clone());
        }
        if text.contains("Accessibility") {
            info.accessibility = Some(text.clone());
        }
    }

    if !info.is_empty() {
        out.key_info = Some(info);
    }
}

/// Rows of the sale-history table, row and cell order preserved. Rows with
/// no <td> cells (header rows) are skipped; there is no deeper header
/// detection.
fn sale_history(doc: &Document, _marker: &str, out: &mut ListingFields) {
    let Some(section) = doc.select_first("#propertyHistory") else {
        return;
    };

    let rows: Vec<Vec<String>> = Document::select_within(section, "tr")
        .into_iter()
        .map(|row| {
            Document::select_within(row, "td")
                .into_iter()
                .map(|cell| Document::joined_text(cell, " "))
                .collect::<Vec<_>>()
        })
        .filter(|cells| !cells.is_empty())
        .collect();

    if !rows.is_empty() {
        out.sale_history = Some(rows);
    }
}

/// Same-host images only, deduplicated in first-seen order.
fn images(doc: &Document, marker: &str, out: &mut ListingFields) {
    let mut seen = HashSet::new();
    let mut urls = Vec::new();

    for img in doc.select_all("img") {
        let Some(src) = img.value().attr("src") else {
            continue;
        };
        if !src.contains(marker) {
            continue;
        }
        if seen.insert(src.to_string()) {
            urls.push(src.to_string());
        }
    }

    if !urls.is_empty() {
        out.images = Some(urls);
    }
}
