use crate::extract::Document;
use crate::fetch::ListingClient;
use url::Url;

mod display;
mod extract;
mod fetch;

fn main() {
    let Some(listing_url) = std::env::args().nth(1) else {
        eprintln!("Usage: listing_scraper <listing-url>");
        std::process::exit(1);
    };

    // The image rule only keeps images hosted by the listing site itself.
    let Some(marker) = host_marker(&listing_url) else {
        eprintln!("❌ Not a valid listing URL: {listing_url}");
        std::process::exit(1);
    };

    let client = match ListingClient::new() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ Client init failed: {e}");
            std::process::exit(1);
        }
    };

    eprintln!("📄 Fetching {listing_url}");
    let html = match client.fetch(&listing_url) {
        Ok(html) => html,
        Err(e) => {
            eprintln!("❌ Fetch failed: {e}");
            std::process::exit(1);
        }
    };

    let doc = Document::parse(&html);
    let record = extract::extract_listing(&doc, &marker);

    match serde_json::to_string_pretty(&record) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("❌ Serialization failed: {e}");
            std::process::exit(1);
        }
    }

    if display::supports_inline_images() {
        display::show_images(&client, &record);
    }
}

/// Hostname marker for the image rule: the first host label after any
/// leading `www.` ("www.rightmove.co.uk" -> "rightmove").
fn host_marker(listing_url: &str) -> Option<String> {
    let parsed = Url::parse(listing_url).ok()?;
    let host = parsed.host_str()?;
    host.split('.')
        .find(|label| *label != "www" && !label.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_marker_skips_www_and_keeps_the_site_label() {
        assert_eq!(
            host_marker("https://www.rightmove.co.uk/properties/123").as_deref(),
            Some("rightmove")
        );
        assert_eq!(
            host_marker("https://media.example.com/x").as_deref(),
            Some("media")
        );
        assert_eq!(host_marker("not a url"), None);
    }
}
