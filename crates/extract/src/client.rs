// ABOUTME: The main Client that fetches pages, routes them to an extractor and collects index links.
// ABOUTME: Every entry point returns a typed Result; nothing is reported through sentinel text.

use std::path::Path;
use std::time::Duration;

use scraper::Html;
use tracing::{debug, info, warn};

use crate::error::ExtractError;
use crate::extractors::generic::extract_generic;
use crate::extractors::structured::extract_structured;
use crate::extractors::{route, ExtractorKind};
use crate::options::{ClientBuilder, Options, DEFAULT_USER_AGENT};
use crate::pdf;
use crate::render::{ChromeRenderer, IndexCollector};
use crate::resource::{fetch, FetchOptions};
use crate::result::ExtractResult;

/// The extraction client.
///
/// Holds configuration and a reusable HTTP client; each call is otherwise
/// self-contained and performs its own fetch, file read or browser launch.
pub struct Client {
    opts: Options,
    http_client: reqwest::Client,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Self {
        let http_client = opts
            .http_client
            .clone()
            .unwrap_or_else(|| build_http_client(&opts));

        Self { opts, http_client }
    }

    /// The options this client was built with.
    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Fetches `url` and extracts its text with the extractor its URL routes to.
    pub async fn extract_text(&self, url: &str) -> Result<ExtractResult, ExtractError> {
        if url.is_empty() {
            return Err(ExtractError::invalid_url(url, "Extract", None));
        }

        let fetch_opts = FetchOptions {
            headers: self.opts.headers.clone(),
            timeout: Some(self.opts.timeout),
        };
        let fetched = fetch(&self.http_client, url, &fetch_opts).await?;
        let raw_html = fetched.text_utf8();

        self.extract_html(&raw_html, url)
    }

    /// Extracts text from an already-fetched HTML string.
    ///
    /// `url` drives routing and labels errors; it is not fetched.
    pub fn extract_html(&self, html: &str, url: &str) -> Result<ExtractResult, ExtractError> {
        let kind = route(url, self.opts.structured_patterns.as_slice());
        debug!(url, extractor = %kind, "routing page");

        let doc = Html::parse_document(html);
        let text = match kind {
            ExtractorKind::Structured => extract_structured(&doc, url)?,
            _ => extract_generic(doc, &self.opts.content_chain, url)?,
        };

        info!(url, extractor = %kind, chars = text.len(), "extracted text");
        Ok(ExtractResult::new(url, kind, text))
    }

    /// Extracts the text of every page of a PDF file.
    pub fn extract_text_from_pdf(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<ExtractResult, ExtractError> {
        pdf::extract_text_from_pdf(path)
    }

    fn index_collector(&self) -> IndexCollector<ChromeRenderer> {
        IndexCollector::new(
            ChromeRenderer::from_options(&self.opts),
            self.opts.index_marker_class.clone(),
            self.opts.index_link_class.clone(),
        )
    }

    /// Renders a script-populated index page and returns its article links,
    /// or the typed failure.
    pub async fn try_collect_index_links(
        &self,
        index_url: &str,
    ) -> Result<Vec<String>, ExtractError> {
        self.index_collector().try_collect(index_url).await
    }

    /// Renders a script-populated index page and returns its article links.
    ///
    /// Any failure is logged and yields an empty list.
    pub async fn collect_index_links(&self, index_url: &str) -> Vec<String> {
        self.index_collector().collect(index_url).await
    }
}

fn http_client_builder(user_agent: &str, timeout: Duration) -> reqwest::ClientBuilder {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .cookie_store(true)
        .gzip(true)
        .brotli(true)
        .deflate(true)
}

/// Builds the default HTTP client. A user agent that is not a valid header
/// value falls back to the default agent; the timeout is always kept.
fn build_http_client(opts: &Options) -> reqwest::Client {
    match http_client_builder(&opts.user_agent, opts.timeout).build() {
        Ok(client) => client,
        Err(e) => {
            warn!(
                user_agent = %opts.user_agent,
                error = %e,
                "HTTP client rejected configuration, using default user agent"
            );
            http_client_builder(DEFAULT_USER_AGENT, opts.timeout)
                .build()
                .unwrap_or_else(|e| {
                    warn!(error = %e, "falling back to a bare HTTP client");
                    reqwest::Client::new()
                })
        }
    }
}
