// src/parser/anchor.rs
// =============================================================================
// This module pulls href values out of <a> tags.
//
// We drive the `html5ever` tokenizer (the engine underneath `scraper`)
// directly instead of building a DOM:
// - It never fails: unclosed tags and stray brackets are tokenized anyway
// - No tree builder runs, so nothing is reordered, cloned or dropped. Each
//   <a> start tag shows up exactly once, in source order
// - Attribute values come out with entities already decoded
//
// Every href found is normalized through `make_hyperlink` and appended to
// the parser's `found_links` collection. Duplicates are kept.
// =============================================================================

use html5ever::local_name;
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use tracing::debug;

use crate::link::{make_hyperlink, HyperlinkCollection};

/// Collects the `href` of every `<a>` tag in an HTML document.
///
/// A parser is meant to be used for ONE document: calling [`feed`](Self::feed)
/// again appends the second document's links to the first's instead of
/// starting over. Create a fresh parser per document.
#[derive(Debug, Default)]
pub struct AnchorTagParser {
    found_links: HyperlinkCollection,
}

impl AnchorTagParser {
    pub fn new() -> Self {
        Self::default()
    }

    // Scans `html` once, left to right, appending the href of every <a>
    // start tag it meets.
    //
    // Parameters:
    //   html: the whole document, already decoded to text
    //
    // <a> tags without an href attribute are skipped (logged at debug level).
    // An href that is present but empty still goes through make_hyperlink.
    pub fn feed(&mut self, html: &str) {
        let mut input = BufferQueue::default();
        input.push_back(StrTendril::from_slice(html));

        let mut tokenizer = Tokenizer::new(AnchorSink::default(), TokenizerOpts::default());
        // The sink never asks for a script pause, so one feed consumes everything
        let _ = tokenizer.feed(&mut input);
        tokenizer.end();

        let found = tokenizer.sink.links;
        debug!(
            found = found.len(),
            total = self.found_links.len() + found.len(),
            "fed document"
        );
        self.found_links.extend(found);
    }

    /// Links found so far, in document order.
    pub fn found_links(&self) -> &HyperlinkCollection {
        &self.found_links
    }

    pub fn into_found_links(self) -> HyperlinkCollection {
        self.found_links
    }
}

// Receives tokens from the tokenizer and keeps the <a href> values.
#[derive(Debug, Default)]
struct AnchorSink {
    links: HyperlinkCollection,
}

impl AnchorSink {
    fn anchor(&mut self, tag: &Tag) {
        let href = tag
            .attrs
            .iter()
            .find(|attr| attr.name.local == local_name!("href"));

        match href {
            Some(attr) => {
                let link = make_hyperlink(&attr.value);
                debug!(href = %attr.value, link = %link, "found anchor");
                self.links.append(link);
            }
            None => debug!("skipping anchor without href"),
        }
    }
}

impl TokenSink for AnchorSink {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        let tag = match token {
            Token::TagToken(tag) if tag.kind == TagKind::StartTag => tag,
            _ => return TokenSinkResult::Continue,
        };

        if tag.name == local_name!("a") {
            self.anchor(&tag);
        }

        // Without a tree builder the tokenizer can't know which elements hold
        // raw text, so we tell it. Markup inside <script> or <textarea> is
        // not markup. <noscript> is left alone: its links are real fallbacks.
        match tag.name {
            local_name!("script") => TokenSinkResult::RawData(RawKind::ScriptData),
            local_name!("style")
            | local_name!("xmp")
            | local_name!("iframe")
            | local_name!("noembed")
            | local_name!("noframes") => TokenSinkResult::RawData(RawKind::Rawtext),
            local_name!("textarea") | local_name!("title") => {
                TokenSinkResult::RawData(RawKind::Rcdata)
            }
            local_name!("plaintext") => TokenSinkResult::Plaintext,
            _ => TokenSinkResult::Continue,
        }
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why a tokenizer and not scraper's Html::parse_document?
//    - A DOM parser repairs the page the way a browser would: anchors inside
//      a <table> get moved in front of it, an unclosed <a> gets copied into
//      the next paragraph
//    - That changes the order and the number of links
//    - The tokenizer only reports the tags as they are written
//
// 2. What is a TokenSink?
//    - The tokenizer pushes every token (tags, text, comments...) into it
//    - process_token's return value steers the tokenizer, e.g. RawData
//      switches it into "this is text until </script>" mode
//
// 3. Why does the parser keep duplicates?
//    - The same link can appear many times on a page (nav bars, footers)
//    - Whether that matters is the caller's decision: see dedupe()
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_link() {
        let mut parser = AnchorTagParser::new();
        parser.feed(r#"<html><body><a href="/docs">Docs</a></body></html>"#);
        assert_eq!(parser.found_links().as_slice(), &[make_hyperlink("/docs")]);
    }

    #[test]
    fn test_keeps_order_and_duplicates() {
        let mut parser = AnchorTagParser::new();
        parser.feed(r#"<a href="/a">A</a><p><a href="/b">B</a></p><a href="a">A again</a>"#);
        let expected: HyperlinkCollection = ["/a", "/b", "/a"].into_iter().collect();
        assert_eq!(parser.found_links(), &expected);
    }

    #[test]
    fn test_ignores_other_tags_and_missing_href() {
        let html = r#"
            <link href="/style.css">
            <img src="/logo.png">
            <a name="top">no href</a>
            <area href="/map">
            <A HREF="/upper">upper-case tag</A>
        "#;
        let mut parser = AnchorTagParser::new();
        parser.feed(html);
        let expected: HyperlinkCollection = ["/upper"].into_iter().collect();
        assert_eq!(parser.into_found_links(), expected);
    }

    #[test]
    fn test_tolerates_malformed_html() {
        // unclosed <li>, a bare "<", an unquoted value and an unclosed final <a>
        let html = r#"<ul><li><a href="/one">one</a> 1 < 2 <li><a href='/two'>two</a></ul><a href=/three>three"#;
        let mut parser = AnchorTagParser::new();
        parser.feed(html);
        let expected: HyperlinkCollection = ["/one", "/two", "/three"].into_iter().collect();
        assert_eq!(parser.found_links(), &expected);
    }

    #[test]
    fn test_empty_href_is_still_a_link() {
        let mut parser = AnchorTagParser::new();
        parser.feed(r#"<a href="/a">1</a><a href="">2</a><a href="/a">3</a><a href=" ">4</a>"#);
        let expected: HyperlinkCollection = ["/a", "", "/a", " "].into_iter().collect();
        assert_eq!(parser.found_links(), &expected);
        assert_eq!(parser.found_links()[1].to_string(), "/");
    }

    #[test]
    fn test_table_anchors_keep_source_order() {
        // a DOM parser would move the stray "/second" in front of the table
        let html = r#"<table><tr><td><a href="/first">1</a></td></tr><a href="/second">2</a></table>"#;
        let mut parser = AnchorTagParser::new();
        parser.feed(html);
        let expected: HyperlinkCollection = ["/first", "/second"].into_iter().collect();
        assert_eq!(parser.found_links(), &expected);
    }

    #[test]
    fn test_unclosed_anchor_counts_once() {
        // a DOM parser would re-open the unclosed <a> inside the second <p>
        let mut parser = AnchorTagParser::new();
        parser.feed(r#"<p><a href="/x">one<p>two</p>"#);
        assert_eq!(parser.found_links().as_slice(), &[make_hyperlink("/x")]);
    }

    #[test]
    fn test_misnested_formatting_counts_once() {
        let html = r#"<b><a href="/one">one</b> two <i>three</a></i><a href="/two">x</a>"#;
        let mut parser = AnchorTagParser::new();
        parser.feed(html);
        let expected: HyperlinkCollection = ["/one", "/two"].into_iter().collect();
        assert_eq!(parser.found_links(), &expected);
    }

    #[test]
    fn test_noscript_anchors_are_found() {
        let mut parser = AnchorTagParser::new();
        parser.feed(r#"<body><noscript><a href="/ns">x</a></noscript></body>"#);
        assert_eq!(parser.found_links().as_slice(), &[make_hyperlink("/ns")]);
    }

    #[test]
    fn test_markup_in_raw_text_is_ignored() {
        let html = r#"
            <script>document.write('<a href="/js">js</a>');</script>
            <style>a[href="/css"] { color: red }</style>
            <textarea><a href="/typed">typed</a></textarea>
            <title><a href="/title"></title>
            <a href="/real">real</a>
        "#;
        let mut parser = AnchorTagParser::new();
        parser.feed(html);
        assert_eq!(parser.found_links().as_slice(), &[make_hyperlink("/real")]);
    }

    #[test]
    fn test_first_duplicate_attribute_wins() {
        let mut parser = AnchorTagParser::new();
        parser.feed(r#"<a href="/first" HREF="/second">x</a>"#);
        assert_eq!(parser.found_links().as_slice(), &[make_hyperlink("/first")]);
    }

    #[test]
    fn test_decodes_entities_in_href() {
        let mut parser = AnchorTagParser::new();
        parser.feed(r#"<a href="/search?a=1&amp;b=2">s</a>"#);
        assert_eq!(parser.found_links()[0].to_string(), "/search?a=1&b=2");
    }

    #[test]
    fn test_feeding_twice_accumulates() {
        let mut parser = AnchorTagParser::new();
        parser.feed(r#"<a href="/first">1</a>"#);
        parser.feed(r#"<a href="/second">2</a>"#);
        let expected: HyperlinkCollection = ["/first", "/second"].into_iter().collect();
        assert_eq!(parser.found_links(), &expected);
    }

    #[test]
    fn test_no_anchors() {
        let mut parser = AnchorTagParser::new();
        parser.feed("");
        assert!(parser.found_links().is_empty());
    }
}
