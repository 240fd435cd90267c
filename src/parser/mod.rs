// src/parser/mod.rs
// =============================================================================
// HTML link extraction.
//
// Submodules:
// - anchor: AnchorTagParser, which scans a document for <a href> tags
//
// This file also holds `get_hrefs_from_html`, the one-call entry point that
// most callers want.
// =============================================================================

mod anchor;

pub use anchor::AnchorTagParser;

use crate::link::HyperlinkCollection;

/// Extracts every `<a href>` link from `html`, in document order.
///
/// With `unique` set, only the first occurrence of each distinct
/// (normalized) link is kept.
///
/// ```
/// use link_harvester::get_hrefs_from_html;
///
/// let html = r#"<a href="/hello">x</a><br><a href="/hello">y</a>"#;
/// assert_eq!(get_hrefs_from_html(html, false).len(), 2);
/// assert_eq!(get_hrefs_from_html(html, true).len(), 1);
/// ```
pub fn get_hrefs_from_html(html: &str, unique: bool) -> HyperlinkCollection {
    let mut parser = AnchorTagParser::new();
    parser.feed(html);
    let found = parser.into_found_links();

    if unique {
        found.dedupe()
    } else {
        found
    }
}
