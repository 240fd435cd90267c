// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is a single command: read an HTML document and print the links
// in it. Every flag maps onto one library operation:
//   --unique   -> dedupe()
//   --base     -> join_all()
//   --filter   -> filter_by()
// =============================================================================

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "link-harvester",
    version,
    about = "Extract and normalize the links in an HTML document",
    long_about = "link-harvester reads an HTML document, collects the href of every <a> tag, \
                  and prints each one in a normalized form. Nothing is fetched over the network."
)]
pub struct Cli {
    /// HTML file to read; omit or pass `-` to read from stdin
    pub input: Option<PathBuf>,

    /// Drop repeated links, keeping the first occurrence of each
    #[arg(long)]
    pub unique: bool,

    /// Resolve relative links against this origin (e.g. https://example.com)
    #[arg(long, value_name = "ORIGIN")]
    pub base: Option<String>,

    /// Keep only links whose component equals a value, e.g. `authority=example.com`
    ///
    /// Fields: scheme, authority, path, query, fragment.
    /// Repeat the flag to require several fields at once.
    #[arg(long = "filter", value_name = "FIELD=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Output results in JSON format instead of one link per line
    #[arg(long)]
    pub json: bool,

    /// Log what the parser finds and skips (to stderr)
    #[arg(short, long)]
    pub verbose: bool,
}

// Splits `field=value` at the first `=`. The value may be empty
// (`fragment=` keeps links without a fragment). The field name itself is
// checked later by the library, so typos surface as InvalidFilterField.
fn parse_filter(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(field, value)| (field.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", s))
}
