// src/link/mod.rs
// =============================================================================
// The hyperlink value type.
//
// A `Hyperlink` is built once from a raw href string and never changes.
// Construction normalizes the input (case-folding, rooting, percent-encoding)
// and caches the canonical string, which is then used for equality, hashing,
// ordering and display.
//
// Submodules:
// - normalize: splitting and percent-encoding of raw hrefs
// - collection: HyperlinkCollection and LinkFilter
// =============================================================================

mod collection;
mod normalize;

pub use collection::{HyperlinkCollection, LinkFilter};

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;
use url::Url;

use crate::error::{LinkError, Result};
use normalize::Parts;

/// Builds a normalized [`Hyperlink`] from a raw href string.
///
/// This never fails: anything that isn't `<scheme>://<authority>...` is
/// treated as a relative reference and rooted at `/`.
///
/// ```
/// use link_harvester::make_hyperlink;
///
/// assert_eq!(make_hyperlink(".").to_string(), "/");
/// assert_eq!(make_hyperlink("https://www.example.com.").to_string(), "https://www.example.com/");
/// assert_eq!(make_hyperlink("?hello=world+hello").to_string(), "/?hello=world%2Bhello");
/// ```
pub fn make_hyperlink(raw: &str) -> Hyperlink {
    Hyperlink::from_parts(normalize::normalize(raw))
}

/// One of the five components of a hyperlink.
///
/// Used to address components by name, e.g. when filtering a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Scheme,
    Authority,
    Path,
    Query,
    Fragment,
}

impl Component {
    pub const ALL: [Component; 5] = [
        Component::Scheme,
        Component::Authority,
        Component::Path,
        Component::Query,
        Component::Fragment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Component::Scheme => "scheme",
            Component::Authority => "authority",
            Component::Path => "path",
            Component::Query => "query",
            Component::Fragment => "fragment",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Component {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self> {
        Component::ALL
            .into_iter()
            .find(|component| component.as_str() == s)
            .ok_or_else(|| LinkError::InvalidFilterField(s.to_string()))
    }
}

/// A normalized URL or URL reference.
///
/// Two hyperlinks are equal when their normalized string forms are equal,
/// regardless of how the raw inputs were spelled.
#[derive(Debug, Clone)]
pub struct Hyperlink {
    parts: Parts,
    normalized: String,
}

impl Hyperlink {
    fn from_parts(parts: Parts) -> Self {
        let normalized = parts.render();
        Hyperlink { parts, normalized }
    }

    /// Lowercase scheme, empty for relative links.
    pub fn scheme(&self) -> &str {
        &self.parts.scheme
    }

    /// Lowercase `host[:port]`, empty for relative links.
    pub fn authority(&self) -> &str {
        &self.parts.authority
    }

    /// Percent-encoded path, always starting with `/` for rooted links.
    pub fn path(&self) -> &str {
        &self.parts.path
    }

    /// Percent-encoded query without the leading `?`.
    pub fn query(&self) -> &str {
        &self.parts.query
    }

    /// Fragment without the leading `#`.
    pub fn fragment(&self) -> &str {
        &self.parts.fragment
    }

    /// Looks a component up by name. Missing components are empty strings.
    pub fn component(&self, component: Component) -> &str {
        match component {
            Component::Scheme => self.scheme(),
            Component::Authority => self.authority(),
            Component::Path => self.path(),
            Component::Query => self.query(),
            Component::Fragment => self.fragment(),
        }
    }

    /// The normalized string form.
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    pub fn is_absolute(&self) -> bool {
        !self.parts.scheme.is_empty() && !self.parts.authority.is_empty()
    }

    pub fn is_relative(&self) -> bool {
        !self.is_absolute()
    }

    /// Resolves this link against `base_domain` (e.g. `https://example.com`).
    ///
    /// Absolute links come back unchanged. Relative links are appended to
    /// the base domain as written: `https://example.com` + `/a?b=c` gives
    /// `https://example.com/a?b=c`. A single trailing `/` on the base is
    /// dropped first so it isn't doubled.
    ///
    /// Fails with [`LinkError::InvalidDomain`] when `base_domain` isn't a bare
    /// `<scheme>://<authority>` origin, whatever kind of link `self` is.
    pub fn join(&self, base_domain: &str) -> Result<Hyperlink> {
        let base = validate_base_domain(base_domain)?;
        Ok(self.join_base(base))
    }

    // Joins onto a base that has already been through `validate_base_domain`.
    pub(crate) fn join_base(&self, base: &str) -> Hyperlink {
        if self.is_absolute() {
            return self.clone();
        }

        let joined = format!("{}{}", base, self.normalized);
        debug!(link = %self, base, joined = %joined, "joined relative link");
        make_hyperlink(&joined)
    }
}

// Checks that a base domain is a bare origin and returns it without its
// trailing slash, ready to have a rooted link appended.
//
// Accepts `scheme://authority` with at most a single trailing slash. The
// `url` crate checks that the host is well-formed; our own segmentation then
// checks that it reads the scheme and authority the same way, and that
// nothing follows the authority.
pub(crate) fn validate_base_domain(base_domain: &str) -> Result<&str> {
    let trimmed = base_domain.strip_suffix('/').unwrap_or(base_domain);

    let parsed = Url::parse(trimmed)
        .map_err(|e| LinkError::invalid_domain(base_domain, e.to_string()))?;

    if parsed.cannot_be_a_base() || parsed.host_str().map_or(true, str::is_empty) {
        return Err(LinkError::invalid_domain(base_domain, "missing authority"));
    }

    if make_hyperlink(trimmed).is_relative() {
        return Err(LinkError::invalid_domain(base_domain, "missing scheme or authority"));
    }

    // `https://x.com?` or `https://x.com//` would leak into the joined link
    let after_scheme = trimmed.split_once("://").map_or("", |(_, rest)| rest);
    if after_scheme.contains(&['/', '?', '#'][..]) {
        return Err(LinkError::invalid_domain(
            base_domain,
            "must not contain a path, query or fragment",
        ));
    }

    Ok(trimmed)
}

impl fmt::Display for Hyperlink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

impl PartialEq for Hyperlink {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for Hyperlink {}

impl Hash for Hyperlink {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}

impl PartialOrd for Hyperlink {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Hyperlink {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normalized.cmp(&other.normalized)
    }
}

impl AsRef<str> for Hyperlink {
    fn as_ref(&self) -> &str {
        &self.normalized
    }
}

impl From<&str> for Hyperlink {
    fn from(raw: &str) -> Self {
        make_hyperlink(raw)
    }
}

impl From<String> for Hyperlink {
    fn from(raw: String) -> Self {
        make_hyperlink(&raw)
    }
}

impl FromStr for Hyperlink {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(make_hyperlink(s))
    }
}

// Hyperlinks travel as their normalized string, e.g. "https://example.com/".
impl Serialize for Hyperlink {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.normalized)
    }
}

impl<'de> Deserialize<'de> for Hyperlink {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(make_hyperlink(&raw))
    }
}
