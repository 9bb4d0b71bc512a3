// ABOUTME: Configuration options for the extractor, including Options and ClientBuilder.
// ABOUTME: ClientBuilder provides a fluent API for constructing Client instances with custom settings.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::client::Client;
use crate::extractors::generic::ContentChain;
use crate::extractors::DEFAULT_STRUCTURED_PATTERNS;

/// Browser-like user agent sent with every page request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Class of the element whose appearance marks a rendered blog index.
pub const DEFAULT_INDEX_MARKER_CLASS: &str = "BlogList-item";

/// Class carried by article links on a rendered blog index.
pub const DEFAULT_INDEX_LINK_CLASS: &str = "BlogList-item-title";

/// Configuration options for the extraction client.
#[derive(Debug, Clone)]
pub struct Options {
    /// Network timeout for page fetches.
    pub timeout: Duration,
    pub user_agent: String,
    pub headers: HashMap<String, String>,
    pub http_client: Option<reqwest::Client>,
    /// URL substrings routed to the structured extractor.
    pub structured_patterns: Vec<String>,
    pub content_chain: ContentChain,
    /// How long the index collector waits for the marker element.
    pub render_timeout: Duration,
    pub index_marker_class: String,
    pub index_link_class: String,
    /// Chrome/Chromium binary; autodetected when unset.
    pub chrome_executable: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: HashMap::new(),
            http_client: None,
            structured_patterns: DEFAULT_STRUCTURED_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            content_chain: ContentChain::default(),
            render_timeout: Duration::from_secs(10),
            index_marker_class: DEFAULT_INDEX_MARKER_CLASS.to_string(),
            index_link_class: DEFAULT_INDEX_LINK_CLASS.to_string(),
            chrome_executable: None,
        }
    }
}

/// Builder for constructing Client instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the page fetch timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Use a custom HTTP client. Its own timeout and user agent apply.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Add a URL substring that routes to the structured extractor.
    pub fn structured_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.opts.structured_patterns.push(pattern.into());
        self
    }

    /// Replace the generic extractor's rule chain.
    pub fn content_chain(mut self, chain: ContentChain) -> Self {
        self.opts.content_chain = chain;
        self
    }

    /// Set how long the index collector waits for rendered content.
    pub fn render_timeout(mut self, timeout: Duration) -> Self {
        self.opts.render_timeout = timeout;
        self
    }

    pub fn index_marker_class(mut self, class: impl Into<String>) -> Self {
        self.opts.index_marker_class = class.into();
        self
    }

    pub fn index_link_class(mut self, class: impl Into<String>) -> Self {
        self.opts.index_link_class = class.into();
        self
    }

    /// Point the index collector at a specific browser binary.
    pub fn chrome_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.opts.chrome_executable = Some(path.into());
        self
    }

    /// Build the Client with the configured options.
    pub fn build(self) -> Client {
        Client::new(self.opts)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
