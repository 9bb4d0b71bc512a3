// ABOUTME: Collects article links from a JavaScript-rendered index page.
// ABOUTME: A PageRenderer produces the rendered markup; link extraction itself is pure.

//! Rendered-index collection.
//!
//! Some blog indexes only contain their article list after client-side
//! scripts run. [`IndexCollector`] asks a [`PageRenderer`] for the markup
//! once a marker element has appeared, then resolves every matching anchor
//! against the index URL.
//!
//! Links are returned in document order and are not deduplicated.

pub mod chrome;

use std::future::Future;

use scraper::Html;
use tracing::{debug, info, warn};
use url::Url;

use crate::dom::selectors::get_or_compile;
use crate::error::ExtractError;

pub use chrome::ChromeRenderer;

/// Something that can load a page, wait for an element carrying
/// `marker_class`, and hand back the rendered markup.
pub trait PageRenderer {
    fn render(
        &self,
        url: &str,
        marker_class: &str,
    ) -> impl Future<Output = Result<String, ExtractError>> + Send;
}

/// Finds every `a.<link_class>[href]` in `html` and resolves it against `base_url`.
///
/// Hrefs that cannot be resolved are skipped.
pub fn extract_links(
    html: &str,
    base_url: &str,
    link_class: &str,
) -> Result<Vec<String>, ExtractError> {
    let base = Url::parse(base_url).map_err(|e| {
        ExtractError::invalid_url(base_url, "ExtractLinks", Some(anyhow::anyhow!("{}", e)))
    })?;
    let css = format!("a.{}[href]", link_class);
    let selector = get_or_compile(&css).ok_or_else(|| {
        ExtractError::parse(
            base_url,
            "ExtractLinks",
            Some(anyhow::anyhow!("invalid link class {:?}", link_class)),
        )
    })?;

    let doc = Html::parse_document(html);
    let links = doc
        .select(&selector)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| match base.join(href.trim()) {
            Ok(u) => Some(u.to_string()),
            Err(e) => {
                debug!(href, error = %e, "skipping unresolvable link");
                None
            }
        })
        .collect();
    Ok(links)
}

/// Drives a renderer over an index page and extracts its article links.
#[derive(Debug, Clone)]
pub struct IndexCollector<R> {
    renderer: R,
    marker_class: String,
    link_class: String,
}

impl<R: PageRenderer> IndexCollector<R> {
    pub fn new(renderer: R, marker_class: impl Into<String>, link_class: impl Into<String>) -> Self {
        Self {
            renderer,
            marker_class: marker_class.into(),
            link_class: link_class.into(),
        }
    }

    /// Renders the index and returns its links, or the typed failure.
    pub async fn try_collect(&self, index_url: &str) -> Result<Vec<String>, ExtractError> {
        let html = self.renderer.render(index_url, &self.marker_class).await?;
        let links = extract_links(&html, index_url, &self.link_class)?;
        info!(index_url, count = links.len(), "collected index links");
        Ok(links)
    }

    /// Like [`try_collect`](Self::try_collect), but logs any failure and
    /// returns an empty list instead.
    pub async fn collect(&self, index_url: &str) -> Vec<String> {
        match self.try_collect(index_url).await {
            Ok(links) => links,
            Err(e) => {
                warn!(index_url, error = %e, "index collection failed");
                Vec::new()
            }
        }
    }
}
