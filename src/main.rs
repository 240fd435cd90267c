// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Read the HTML document (file or stdin)
// 3. Extract, resolve and filter its links with the link_harvester library
// 4. Print them and exit with a grep-like code:
//    0 = links printed, 1 = no links matched, 2 = error
// =============================================================================

mod cli;
mod logging;

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::debug;

use cli::Cli;
use link_harvester::{get_hrefs_from_html, Hyperlink, HyperlinkCollection};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("Warning: {:#}", e);
    }

    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<i32> {
    let html = read_input(cli.input.as_deref())?;

    let links = collect_links(&html, cli)?;
    debug!(count = links.len(), "links after resolving and filtering");

    print_results(&links, cli.json)?;

    if links.is_empty() {
        Ok(1)
    } else {
        Ok(0)
    }
}

// Runs the library pipeline in the order the flags imply:
// extract (+dedupe) -> join onto --base (+dedupe again) -> filter
fn collect_links(html: &str, cli: &Cli) -> Result<HyperlinkCollection> {
    let mut links = get_hrefs_from_html(html, cli.unique);

    if let Some(base) = &cli.base {
        links = links
            .join_all(base)
            .with_context(|| format!("cannot resolve links against '{}'", base))?;

        // "/a" and "https://base/a" only become equal after joining
        if cli.unique {
            links = links.dedupe();
        }
    }

    if !cli.filters.is_empty() {
        links = links
            .filter_by(cli.filters.iter().map(|(field, value)| (field, value.clone())))
            .context("invalid --filter")?;
    }

    Ok(links)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut html = String::new();
            io::stdin()
                .read_to_string(&mut html)
                .context("failed to read stdin")?;
            Ok(html)
        }
    }
}

// One JSON object per link, with its components broken out
#[derive(Debug, Serialize)]
struct LinkRecord<'a> {
    url: &'a str,
    scheme: &'a str,
    authority: &'a str,
    path: &'a str,
    query: &'a str,
    fragment: &'a str,
    absolute: bool,
}

impl<'a> From<&'a Hyperlink> for LinkRecord<'a> {
    fn from(link: &'a Hyperlink) -> Self {
        LinkRecord {
            url: link.as_str(),
            scheme: link.scheme(),
            authority: link.authority(),
            path: link.path(),
            query: link.query(),
            fragment: link.fragment(),
            absolute: link.is_absolute(),
        }
    }
}

fn print_results(links: &HyperlinkCollection, json: bool) -> Result<()> {
    if json {
        let records: Vec<LinkRecord<'_>> = links.iter().map(LinkRecord::from).collect();
        let json_output = serde_json::to_string_pretty(&records)?;
        println!("{}", json_output);
    } else {
        for link in links {
            println!("{}", link);
        }
    }
    Ok(())
}
