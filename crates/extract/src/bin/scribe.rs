// ABOUTME: CLI binary for the threatscribe extractor.
// ABOUTME: Extracts text from URLs, HTML snapshots or PDFs, or lists links from a rendered index.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use threatscribe_extract::{Client, ExtractResult};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scribe")]
#[command(about = "Extract readable text from web pages, PDFs and rendered blog indexes")]
struct Args {
    /// Output as JSON instead of raw text
    #[arg(long = "json")]
    json_output: bool,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// HTML file to extract (requires --url)
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// URL context for HTML file extraction (required with --html)
    #[arg(long = "url")]
    url: Option<String>,

    /// PDF file to extract
    #[arg(long = "pdf")]
    pdf: Option<PathBuf>,

    /// Print the article links of a script-rendered index page
    #[arg(long = "index")]
    index: Option<String>,

    /// Network timeout in seconds for page fetches and index rendering
    #[arg(long = "timeout", default_value_t = 10)]
    timeout_secs: u64,

    /// Chrome/Chromium binary used for --index
    #[arg(long = "chrome")]
    chrome: Option<PathBuf>,

    /// Print elapsed time in ms to stderr
    #[arg(long = "timing")]
    timing: bool,

    /// URLs to extract (fetch mode)
    #[arg()]
    urls: Vec<String>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Format extracted results as raw text (separated by blank lines) or JSON.
fn format_output(results: &[ExtractResult], json_output: bool) -> Result<String, serde_json::Error> {
    if json_output {
        if results.len() == 1 {
            serde_json::to_string_pretty(&results[0])
        } else {
            serde_json::to_string_pretty(results)
        }
    } else {
        Ok(results
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n"))
    }
}

/// Format collected links one per line, or as a JSON array.
fn format_links(links: &[String], json_output: bool) -> Result<String, serde_json::Error> {
    if json_output {
        serde_json::to_string_pretty(links)
    } else {
        Ok(links.join("\n"))
    }
}

fn write_output(output: &Option<PathBuf>, content: &str) -> bool {
    if let Some(path) = output {
        if let Err(e) = fs::write(path, content) {
            eprintln!("error writing to {:?}: {}", path, e);
            return false;
        }
    } else {
        println!("{}", content);
    }
    true
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    let modes = [
        args.html.is_some(),
        args.pdf.is_some(),
        args.index.is_some(),
        !args.urls.is_empty(),
    ]
    .iter()
    .filter(|m| **m)
    .count();

    if args.html.is_some() && args.url.is_none() {
        eprintln!("error: --url is required when using --html");
        return ExitCode::from(1);
    }
    if modes == 0 {
        eprintln!("error: give at least one URL, or use --html, --pdf or --index");
        return ExitCode::from(1);
    }
    if modes > 1 {
        eprintln!("error: URLs, --html, --pdf and --index are mutually exclusive");
        return ExitCode::from(1);
    }

    let timeout = Duration::from_secs(args.timeout_secs);
    let mut builder = Client::builder().timeout(timeout).render_timeout(timeout);
    if let Some(chrome) = &args.chrome {
        builder = builder.chrome_executable(chrome);
    }
    let client = builder.build();

    let start = Instant::now();
    let mut had_error = false;

    if let Some(index_url) = &args.index {
        match client.try_collect_index_links(index_url).await {
            Ok(links) => match format_links(&links, args.json_output) {
                Ok(out) => had_error |= !write_output(&args.output, &out),
                Err(e) => {
                    eprintln!("error encoding JSON: {}", e);
                    had_error = true;
                }
            },
            Err(e) => {
                eprintln!("error collecting {}: {}", index_url, e);
                had_error = true;
            }
        }
    } else {
        let mut results: Vec<ExtractResult> = Vec::new();

        if let (Some(html_path), Some(url)) = (&args.html, &args.url) {
            match fs::read_to_string(html_path) {
                Ok(html) => match client.extract_html(&html, url) {
                    Ok(result) => results.push(result),
                    Err(e) => {
                        eprintln!("error extracting HTML: {}", e);
                        had_error = true;
                    }
                },
                Err(e) => {
                    eprintln!("error reading file {:?}: {}", html_path, e);
                    had_error = true;
                }
            }
        } else if let Some(pdf_path) = &args.pdf {
            match client.extract_text_from_pdf(pdf_path) {
                Ok(result) => results.push(result),
                Err(e) => {
                    eprintln!("error extracting PDF: {}", e);
                    had_error = true;
                }
            }
        } else {
            for url in &args.urls {
                match client.extract_text(url).await {
                    Ok(result) => results.push(result),
                    Err(e) => {
                        eprintln!("error extracting {}: {}", url, e);
                        had_error = true;
                    }
                }
            }
        }

        if !results.is_empty() {
            match format_output(&results, args.json_output) {
                Ok(out) => had_error |= !write_output(&args.output, &out),
                Err(e) => {
                    eprintln!("error encoding JSON: {}", e);
                    had_error = true;
                }
            }
        }
    }

    if args.timing {
        let _ = writeln!(io::stderr(), "elapsed: {}ms", start.elapsed().as_millis());
    }

    if had_error {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_format_as_lines_or_json() {
        let links = vec![
            "https://example.com/a".to_string(),
            "https://example.com/b".to_string(),
        ];
        assert_eq!(
            format_links(&links, false).unwrap(),
            "https://example.com/a\nhttps://example.com/b"
        );
        let json: Vec<String> = serde_json::from_str(&format_links(&links, true).unwrap()).unwrap();
        assert_eq!(json, links);
        assert_eq!(format_links(&[], true).unwrap(), "[]");
    }
}
