// ABOUTME: Main library entry point for the threatscribe content extractor.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, ExtractResult, ExtractError, ErrorCode, Options.

//! Threatscribe - readable text extraction for threat-intelligence pipelines.
//!
//! Pulls the meaningful text out of web pages, a known threat-group site
//! layout, PDF files and script-rendered blog indexes, ready for indicator
//! extraction downstream.
//!
//! # Example
//!
//! ```no_run
//! use threatscribe_extract::{Client, ExtractError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ExtractError> {
//!     let client = Client::builder().build();
//!     for link in client.collect_index_links("https://www.zerodayinitiative.com/blog/").await {
//!         let result = client.extract_text(&link).await?;
//!         println!("{}", result.text);
//!     }
//!     Ok(())
//! }
//! ```

pub mod blocking;
pub mod client;
pub mod dom;
pub mod error;
pub mod extractors;
pub mod options;
pub mod pdf;
pub mod render;
pub mod resource;
pub mod result;

pub use crate::client::Client;
pub use crate::error::{ErrorCode, ExtractError};
pub use crate::extractors::generic::{ContentChain, ContentRule};
pub use crate::extractors::structured::PageVariant;
pub use crate::extractors::ExtractorKind;
pub use crate::options::{ClientBuilder, Options};
pub use crate::pdf::extract_text_from_pdf;
pub use crate::render::{ChromeRenderer, IndexCollector, PageRenderer};
pub use crate::result::ExtractResult;
