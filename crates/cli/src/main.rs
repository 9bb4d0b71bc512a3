// ABOUTME: Crawl driver: collects article links from a rendered blog index and extracts each one.
// ABOUTME: Prints a preview per article, saves full text under an output directory, emits a JSON summary.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{json, Value};
use threatscribe_extract::{Client, ExtractError, ExtractResult};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Collect article links from a script-rendered index and extract each article.
#[derive(Parser, Debug)]
#[command(name = "threatscribe")]
#[command(about = "Crawl a rendered blog index and save extracted article text", long_about = None)]
struct Args {
    /// Index page whose article list is populated by client-side script.
    index_url: String,

    /// Extract at most this many articles (newest first, as listed).
    #[arg(long, default_value_t = 3)]
    limit: usize,

    /// Directory receiving one .txt file per article.
    #[arg(long, default_value = "parsed_texts")]
    out: PathBuf,

    /// Characters of each article printed as a preview.
    #[arg(long, default_value_t = 500)]
    preview: usize,

    /// Chrome/Chromium binary used to render the index.
    #[arg(long)]
    chrome: Option<PathBuf>,

    /// Output compact JSON instead of pretty.
    #[arg(long, default_value_t = false)]
    compact: bool,
}

/// File name for an article: the last non-empty path segment plus `.txt`.
fn output_file_name(link: &str) -> String {
    let segment = url::Url::parse(link)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|segs| segs.filter(|s| !s.is_empty()).last().map(str::to_string))
                .or_else(|| u.host_str().map(str::to_string))
        })
        .unwrap_or_else(|| "article".to_string());
    format!("{}.txt", segment)
}

fn save_text(dir: &Path, link: &str, text: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(output_file_name(link));
    fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn failed_entry(link: &str, error: String) -> Value {
    json!({
        "url": link,
        "ok": false,
        "path": null,
        "word_count": 0,
        "error": error
    })
}

/// Prints a preview of an extracted article and saves its text under `out`.
///
/// Extraction and write failures both become failed entries.
fn article_entry(
    out: &Path,
    link: &str,
    outcome: Result<ExtractResult, ExtractError>,
    preview: usize,
) -> Value {
    let result = match outcome {
        Ok(result) => result,
        Err(err) => {
            warn!(link = %link, error = %err, "extraction failed");
            return failed_entry(link, err.to_string());
        }
    };

    eprintln!("{}...", result.preview(preview));
    match save_text(out, link, &result.text) {
        Ok(saved) => {
            info!(path = %saved.display(), "saved article text");
            json!({
                "url": link,
                "ok": true,
                "path": saved,
                "word_count": result.word_count,
                "error": null
            })
        }
        Err(err) => {
            warn!(link = %link, error = %err, "saving article failed");
            failed_entry(link, format!("{:#}", err))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut builder = Client::builder();
    if let Some(chrome) = &args.chrome {
        builder = builder.chrome_executable(chrome);
    }
    let client = builder.build();

    info!(index_url = %args.index_url, "collecting article links");
    let links = client.collect_index_links(&args.index_url).await;
    info!(count = links.len(), "article links found");

    let mut articles = Vec::new();
    for (i, link) in links.iter().take(args.limit).enumerate() {
        info!(n = i + 1, link = %link, "extracting article");
        let outcome = client.extract_text(link).await;
        articles.push(article_entry(&args.out, link, outcome, args.preview));
    }

    let extracted = articles
        .iter()
        .filter(|a| a.get("ok").and_then(|v| v.as_bool()) == Some(true))
        .count();
    let output = json!({
        "index_url": args.index_url,
        "links_found": links.len(),
        "articles": articles,
        "extracted": extracted,
        "failed": articles.len() - extracted
    });

    if args.compact {
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}
