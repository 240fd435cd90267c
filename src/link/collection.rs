// src/link/collection.rs
// =============================================================================
// An ordered list of hyperlinks, plus the transforms a crawler needs on it.
//
// Transforms (dedupe, join_all, filter_by, filter) never touch the
// collection they are called on; each one builds and returns a new one.
// Insertion order is always preserved.
// =============================================================================

use std::collections::HashSet;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use super::{make_hyperlink, validate_base_domain, Component, Hyperlink};
use crate::error::Result;

/// An ordered, possibly duplicated, sequence of [`Hyperlink`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HyperlinkCollection {
    collection: Vec<Hyperlink>,
}

impl HyperlinkCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a link to the end of the collection.
    pub fn append(&mut self, link: Hyperlink) {
        self.collection.push(link);
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Hyperlink> {
        self.collection.get(index)
    }

    /// Membership test using normalized equality.
    pub fn contains(&self, link: &Hyperlink) -> bool {
        self.collection.contains(link)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hyperlink> {
        self.collection.iter()
    }

    pub fn as_slice(&self) -> &[Hyperlink] {
        &self.collection
    }

    pub fn into_vec(self) -> Vec<Hyperlink> {
        self.collection
    }

    /// Keeps the first occurrence of every distinct link, in original order.
    pub fn dedupe(&self) -> Self {
        let mut seen = HashSet::with_capacity(self.collection.len());
        self.collection
            .iter()
            .filter(|link| seen.insert(*link))
            .cloned()
            .collect()
    }

    /// Joins every link onto `base_domain` (see [`Hyperlink::join`]).
    ///
    /// The base domain is validated once up front, so an invalid one is
    /// reported even when the collection is empty.
    pub fn join_all(&self, base_domain: &str) -> Result<Self> {
        let base = validate_base_domain(base_domain)?;
        Ok(self
            .collection
            .iter()
            .map(|link| link.join_base(base))
            .collect())
    }

    /// Keeps the links whose named components equal the given values.
    ///
    /// Field names are `scheme`, `authority`, `path`, `query` and `fragment`;
    /// several fields must all match. A component a link doesn't have
    /// compares as `""`, so `("fragment", "")` keeps links without a fragment.
    ///
    /// ```
    /// use link_harvester::{make_hyperlink, HyperlinkCollection};
    ///
    /// let links: HyperlinkCollection = ["/", "/hello-world?hello=world"].into_iter().collect();
    /// let filtered = links.filter_by([("path", "/hello-world")])?;
    /// assert_eq!(filtered.as_slice(), &[make_hyperlink("/hello-world?hello=world")]);
    /// # Ok::<(), link_harvester::LinkError>(())
    /// ```
    ///
    /// Fails with [`LinkError::InvalidFilterField`](crate::LinkError::InvalidFilterField)
    /// on an unknown field name.
    pub fn filter_by<I, K, V>(&self, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut filter = LinkFilter::new();
        for (field, value) in fields {
            let component: Component = field.as_ref().parse()?;
            filter = filter.with(component, value);
        }
        Ok(self.filter(&filter))
    }

    /// Keeps the links matching every criterion in `filter`.
    pub fn filter(&self, filter: &LinkFilter) -> Self {
        self.collection
            .iter()
            .filter(|link| filter.matches(link))
            .cloned()
            .collect()
    }
}

/// A set of `component == value` criteria, all of which must hold.
///
/// An empty filter matches every link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkFilter {
    criteria: Vec<(Component, String)>,
}

impl LinkFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a criterion. Builder style: `LinkFilter::new().with(Component::Scheme, "https")`.
    pub fn with(mut self, component: Component, value: impl Into<String>) -> Self {
        self.criteria.push((component, value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn matches(&self, link: &Hyperlink) -> bool {
        self.criteria
            .iter()
            .all(|(component, value)| link.component(*component) == value)
    }
}

impl From<Vec<Hyperlink>> for HyperlinkCollection {
    fn from(collection: Vec<Hyperlink>) -> Self {
        HyperlinkCollection { collection }
    }
}

impl FromIterator<Hyperlink> for HyperlinkCollection {
    fn from_iter<I: IntoIterator<Item = Hyperlink>>(iter: I) -> Self {
        HyperlinkCollection {
            collection: iter.into_iter().collect(),
        }
    }
}

// Raw strings go through `make_hyperlink` on the way in.
impl<'a> FromIterator<&'a str> for HyperlinkCollection {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(make_hyperlink).collect()
    }
}

impl FromIterator<String> for HyperlinkCollection {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        iter.into_iter().map(|raw| make_hyperlink(&raw)).collect()
    }
}

impl Extend<Hyperlink> for HyperlinkCollection {
    fn extend<I: IntoIterator<Item = Hyperlink>>(&mut self, iter: I) {
        self.collection.extend(iter);
    }
}

impl Index<usize> for HyperlinkCollection {
    type Output = Hyperlink;

    fn index(&self, index: usize) -> &Hyperlink {
        &self.collection[index]
    }
}

impl IntoIterator for HyperlinkCollection {
    type Item = Hyperlink;
    type IntoIter = std::vec::IntoIter<Hyperlink>;

    fn into_iter(self) -> Self::IntoIter {
        self.collection.into_iter()
    }
}

impl<'a> IntoIterator for &'a HyperlinkCollection {
    type Item = &'a Hyperlink;
    type IntoIter = std::slice::Iter<'a, Hyperlink>;

    fn into_iter(self) -> Self::IntoIter {
        self.collection.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LinkError;

    fn links(raw: &[&str]) -> HyperlinkCollection {
        raw.iter().copied().collect()
    }

    #[test]
    fn test_behaves_like_a_list() {
        let hrefs = vec![
            make_hyperlink("/hello"),
            make_hyperlink("/world"),
            make_hyperlink("/?hello=world"),
        ];
        let mut collection = HyperlinkCollection::from(hrefs.clone());
        assert_eq!(collection.len(), 3);

        collection.append(make_hyperlink("/?hello=world&world=hello"));
        assert_eq!(collection.len(), 4);
        assert_eq!(collection[0], make_hyperlink("/hello"));
        assert_eq!(collection[3], make_hyperlink("/?hello=world&world=hello"));
        assert_eq!(collection.get(4), None);

        for href in &hrefs {
            assert!(collection.contains(href));
        }
        for (index, link) in collection.iter().take(3).enumerate() {
            assert_eq!(&hrefs[index], link);
        }
    }

    #[test]
    fn test_dedupe_keeps_first_seen_order() {
        let input = links(&["/world", "/hello", "world", "/hello", "/"]);
        let deduped = input.dedupe();
        assert_eq!(deduped, links(&["/world", "/hello", "/"]));
        // The original is untouched.
        assert_eq!(input.len(), 5);
    }

    #[test]
    fn test_dedupe_empty() {
        assert!(HyperlinkCollection::new().dedupe().is_empty());
    }

    #[test]
    fn test_join_all_mixed() {
        let input = links(&["hello", "https://other.org/x", "?q=1"]);
        let joined = input.join_all("https://www.google.com").unwrap();
        assert_eq!(
            joined,
            links(&[
                "https://www.google.com/hello",
                "https://other.org/x",
                "https://www.google.com/?q=1",
            ])
        );
    }

    #[test]
    fn test_join_all_validates_even_when_empty() {
        let err = HyperlinkCollection::new().join_all("not a domain").unwrap_err();
        assert!(matches!(err, LinkError::InvalidDomain { .. }));
    }

    #[test]
    fn test_filter_by_absent_component_is_empty_string() {
        let input = links(&["/a#x", "/b", "https://c.com"]);
        let filtered = input.filter_by([("fragment", "")]).unwrap();
        assert_eq!(filtered, links(&["/b", "https://c.com"]));

        let relative_only = input.filter_by([("scheme", "")]).unwrap();
        assert_eq!(relative_only, links(&["/a#x", "/b"]));
    }

    #[test]
    fn test_filter_by_unknown_field() {
        let err = links(&["/"]).filter_by([("host", "x")]).unwrap_err();
        assert_eq!(err, LinkError::InvalidFilterField("host".to_string()));
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let input = links(&["/a", "/b"]);
        assert!(LinkFilter::new().is_empty());
        assert_eq!(input.filter(&LinkFilter::new()), input);
        let no_fields: [(&str, &str); 0] = [];
        assert_eq!(input.filter_by(no_fields).unwrap(), input);
    }

    #[test]
    fn test_typed_filter() {
        let input = links(&["https://a.com/x", "http://a.com/x", "https://b.com/x"]);
        let filter = LinkFilter::new()
            .with(Component::Scheme, "https")
            .with(Component::Authority, "a.com");
        assert_eq!(input.filter(&filter), links(&["https://a.com/x"]));
    }

    #[test]
    fn test_serializes_as_string_array() {
        let json = serde_json::to_string(&links(&["/a", "HTTP://B.COM"])).unwrap();
        assert_eq!(json, r#"["/a","http://b.com/"]"#);
    }
}
