// src/link/normalize.rs
// =============================================================================
// Turns a raw href string into the five normalized components of a link.
//
// Steps:
// 1. Detect `<scheme>://<authority>` and lowercase both parts
// 2. Otherwise treat the input as a relative reference and root it at `/`
// 3. Split the remainder into path, query and fragment
// 4. Percent-encode path and query with their own "safe" byte sets
//
// The fragment is only separated, never encoded.
// =============================================================================

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

// Bytes left untouched in a path. `%` passes through as-is, so existing
// escapes survive a second round of normalization.
const PATH_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/')
    .remove(b'%');

// `=` and `&` separate query pairs and must stay literal. `+` is NOT safe:
// it is encoded as `%2B` rather than read as a space.
const QUERY_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'=')
    .remove(b'&')
    .remove(b'%');

/// The normalized pieces of a link, before they are rendered back to a string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Parts {
    pub scheme: String,
    pub authority: String,
    pub path: String,
    pub query: String,
    pub fragment: String,
}

impl Parts {
    // Rebuilds the canonical string form:
    //   scheme://authority + path [+ ?query] [+ #fragment]
    // Relative links have no scheme/authority and render as just the path.
    pub fn render(&self) -> String {
        let mut out = String::new();

        if !self.scheme.is_empty() && !self.authority.is_empty() {
            out.push_str(&self.scheme);
            out.push_str("://");
            out.push_str(&self.authority);
        }

        out.push_str(&self.path);

        if !self.query.is_empty() {
            out.push('?');
            out.push_str(&self.query);
        }

        if !self.fragment.is_empty() {
            out.push('#');
            out.push_str(&self.fragment);
        }

        out
    }
}

/// Normalizes a raw href into its components. Never fails.
pub(crate) fn normalize(raw: &str) -> Parts {
    if let Some(parts) = parse_absolute(raw) {
        return parts;
    }
    parse_relative(raw)
}

// Parses `<scheme>://<authority>[/path][?query][#fragment]`.
//
// Returns None when the input has no scheme prefix, or when the authority
// turns out to be empty (e.g. `file:///etc`); such inputs are handled as
// relative references instead so that `is_absolute` always means
// "scheme and authority are both present".
fn parse_absolute(raw: &str) -> Option<Parts> {
    let (scheme, after) = split_scheme(raw)?;

    let authority_end = after.find(&['/', '?', '#'][..]).unwrap_or(after.len());
    let (mut authority, remainder) = after.split_at(authority_end);

    // A fully-qualified host like `www.example.com.` with nothing after it
    // collapses onto the plain host.
    if !remainder.starts_with('/') {
        authority = authority.strip_suffix('.').unwrap_or(authority);
    }

    if authority.is_empty() {
        return None;
    }

    let (path, query, fragment) = split_reference(remainder);
    let path = if path.is_empty() { "/" } else { path };

    Some(Parts {
        scheme: scheme.to_ascii_lowercase(),
        authority: authority.to_ascii_lowercase(),
        path: encode_path(path),
        query: encode_query(query),
        fragment: fragment.to_string(),
    })
}

// Parses a relative reference: `/`, `.`, `example`, `/a/b`, `#frag`, `?q=1`...
// Anything that isn't already rooted is rooted at `/`.
fn parse_relative(raw: &str) -> Parts {
    let (head, query, fragment) = split_reference(raw);

    let path = match head {
        // `.` is the current directory, which collapses onto the root
        "" | "." => "/".to_string(),
        rooted if rooted.starts_with('/') => rooted.to_string(),
        bare => format!("/{}", bare),
    };

    Parts {
        scheme: String::new(),
        authority: String::new(),
        path: encode_path(&path),
        query: encode_query(query),
        fragment: fragment.to_string(),
    }
}

// Splits off a leading `<scheme>://`.
//
// The scheme must start with an ASCII letter and contain only letters,
// digits, `+`, `-` and `.`, so `//example.com` or `/a://b` never match.
fn split_scheme(raw: &str) -> Option<(&str, &str)> {
    let (scheme, after) = raw.split_once("://")?;

    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        return None;
    }

    Some((scheme, after))
}

// Splits `path?query#fragment` into its three parts.
//
// The first `#` ends everything before it, so a `?` inside the fragment
// belongs to the fragment. Separators are dropped from the returned pieces.
pub(crate) fn split_reference(s: &str) -> (&str, &str, &str) {
    let (before_fragment, fragment) = s.split_once('#').unwrap_or((s, ""));
    let (path, query) = before_fragment.split_once('?').unwrap_or((before_fragment, ""));
    (path, query, fragment)
}

/// Percent-encodes a path, keeping letters, digits, `-_.~/` and `%`.
pub(crate) fn encode_path(path: &str) -> String {
    utf8_percent_encode(path, PATH_SAFE).to_string()
}

/// Percent-encodes a query, keeping letters, digits, `-_.~`, `=`, `&` and `%`.
pub(crate) fn encode_query(query: &str) -> String {
    utf8_percent_encode(query, QUERY_SAFE).to_string()
}
