// ABOUTME: Synchronous adapters over the async Client for blocking callers.
// ABOUTME: Each call spins up a private tokio runtime and runs one extraction on it.

use tokio::runtime::Runtime;
use tracing::warn;

use crate::error::ExtractError;
use crate::result::ExtractResult;
use crate::Client;

fn runtime(target: &str, op: &str) -> Result<Runtime, ExtractError> {
    Runtime::new().map_err(|e| {
        ExtractError::io(
            target,
            op,
            Some(anyhow::anyhow!("Failed to create runtime: {}", e)),
        )
    })
}

/// Fetch and extract `url` synchronously with a default client.
pub fn extract_text_sync(url: &str) -> Result<ExtractResult, ExtractError> {
    let rt = runtime(url, "extract_text_sync")?;
    let client = Client::builder().build();
    rt.block_on(client.extract_text(url))
}

/// Collect rendered index links synchronously with a default client.
///
/// Returns an empty list on any failure, including runtime creation.
pub fn collect_index_links_sync(index_url: &str) -> Vec<String> {
    match runtime(index_url, "collect_index_links_sync") {
        Ok(rt) => {
            let client = Client::builder().build();
            rt.block_on(client.collect_index_links(index_url))
        }
        Err(e) => {
            warn!(index_url, error = %e, "index collection failed");
            Vec::new()
        }
    }
}
