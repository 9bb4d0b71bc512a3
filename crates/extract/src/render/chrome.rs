// ABOUTME: Headless Chrome page renderer built on chromiumoxide.
// ABOUTME: Launches an isolated browser per call and always tears it down before returning.

use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::debug;

use super::PageRenderer;
use crate::error::ExtractError;
use crate::options::Options;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Renders pages in a fresh headless Chrome instance.
#[derive(Debug, Clone)]
pub struct ChromeRenderer {
    timeout: Duration,
    chrome_executable: Option<PathBuf>,
}

impl ChromeRenderer {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            chrome_executable: None,
        }
    }

    pub fn from_options(opts: &Options) -> Self {
        Self {
            timeout: opts.render_timeout,
            chrome_executable: opts.chrome_executable.clone(),
        }
    }

    pub fn with_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_executable = Some(path.into());
        self
    }

    fn config(&self, url: &str) -> Result<BrowserConfig, ExtractError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--log-level=3")
            .arg("--silent");
        if let Some(path) = &self.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        builder.build().map_err(|e| {
            ExtractError::automation(url, "ConfigureBrowser", Some(anyhow::anyhow!(e)))
        })
    }

    async fn load_rendered(
        &self,
        browser: &Browser,
        url: &str,
        marker_class: &str,
    ) -> Result<String, ExtractError> {
        let marker = format!(".{}", marker_class);
        let page = browser.new_page(url).await.map_err(|e| {
            ExtractError::automation(url, "Navigate", Some(anyhow::anyhow!("{}", e)))
        })?;

        wait_for_marker(&page, &marker).await;
        debug!(url, marker = %marker, "marker element present");

        page.content().await.map_err(|e| {
            ExtractError::automation(url, "ReadContent", Some(anyhow::anyhow!("{}", e)))
        })
    }
}

async fn wait_for_marker(page: &Page, selector: &str) {
    while page.find_element(selector).await.is_err() {
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// A launched browser plus the task pumping its CDP connection.
///
/// Dropping the session aborts the handler task; [`shutdown`](Self::shutdown)
/// additionally closes the browser and reaps the child process.
struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    async fn launch(config: BrowserConfig, url: &str) -> Result<Self, ExtractError> {
        let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
            ExtractError::automation(url, "LaunchBrowser", Some(anyhow::anyhow!("{}", e)))
        })?;
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });
        Ok(Self { browser, handler })
    }

    async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            debug!(error = %e, "browser close failed");
        }
        if let Err(e) = self.browser.wait().await {
            debug!(error = %e, "waiting for browser exit failed");
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

impl PageRenderer for ChromeRenderer {
    async fn render(&self, url: &str, marker_class: &str) -> Result<String, ExtractError> {
        let session = BrowserSession::launch(self.config(url)?, url).await?;

        let outcome = match tokio::time::timeout(
            self.timeout,
            self.load_rendered(&session.browser, url, marker_class),
        )
        .await
        {
            Ok(rendered) => rendered,
            Err(_) => Err(ExtractError::automation(
                url,
                "WaitForMarker",
                Some(anyhow::anyhow!(
                    "element .{} did not appear within {:?}",
                    marker_class,
                    self.timeout
                )),
            )),
        };

        session.shutdown().await;
        outcome
    }
}
