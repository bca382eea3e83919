// src/display.rs
//
// Inline image previews for terminals that understand the OSC 1337 file
// protocol (iTerm2 and compatible emulators). Purely a side surface: the
// record has already been printed before this runs, and any failure here
// only costs the preview.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::extract::ListingRecord;
use crate::fetch::ListingClient;

const PREVIEW_LIMIT: usize = 5;

/// Whether the current terminal can render OSC 1337 inline images.
pub fn supports_inline_images() -> bool {
    std::env::var("TERM_PROGRAM")
        .map(|term| term == "iTerm.app" || term == "WezTerm")
        .unwrap_or(false)
}

/// Preview up to five of the record's images inline. Each image goes
/// through the same polite client that fetched the page; a failed image is
/// logged and skipped.
pub fn show_images(client: &ListingClient, record: &ListingRecord) {
    for url in record.image_urls().iter().take(PREVIEW_LIMIT) {
        match client.fetch_bytes(url) {
            Ok(bytes) => print_inline(url, &bytes),
            Err(e) => eprintln!("⚠️ Image preview failed for {url}: {e}"),
        }
    }
}

fn print_inline(name: &str, bytes: &[u8]) {
    let payload = STANDARD.encode(bytes);
    // The protocol wants the file name base64-encoded too.
    let label = STANDARD.encode(name.as_bytes());
    println!(
        "\x1b]1337;File=name={label};size={};inline=1:{payload}\x07",
        bytes.len()
    );
}
