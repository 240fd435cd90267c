//! Hyperlink extraction and normalization for a crawler's link-discovery stage.
//!
//! Raw HTML goes in; a [`HyperlinkCollection`] of normalized links comes out.
//! Links can then be deduplicated, resolved against a base domain and
//! filtered by component before being handed to whatever schedules fetches.
//!
//! ```
//! use link_harvester::get_hrefs_from_html;
//!
//! let html = r#"<a href="/docs">Docs</a><a href="https://Other.org">Other</a><a href="docs">Again</a>"#;
//!
//! let links = get_hrefs_from_html(html, true).join_all("https://example.com")?;
//! let same_site = links.filter_by([("authority", "example.com")])?;
//!
//! assert_eq!(same_site.len(), 1);
//! assert_eq!(same_site[0].to_string(), "https://example.com/docs");
//! # Ok::<(), link_harvester::LinkError>(())
//! ```

pub mod error;
pub mod link;
pub mod parser;

pub use error::{LinkError, Result};
pub use link::{make_hyperlink, Component, Hyperlink, HyperlinkCollection, LinkFilter};
pub use parser::{get_hrefs_from_html, AnchorTagParser};
