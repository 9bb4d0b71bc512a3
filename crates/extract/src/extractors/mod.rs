// ABOUTME: Content extraction strategies and URL-based routing between them.
// ABOUTME: Structured pages go to the site extractor, everything else to the generic chain.

//! Content extraction module.
//!
//! Submodules:
//! - `table`: Markdown rendering of HTML tables.
//! - `structured`: extractor for the known threat-group page layout.
//! - `generic`: prioritized selector chain for unknown layouts.

pub mod generic;
pub mod structured;
pub mod table;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which extractor produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractorKind {
    Structured,
    Generic,
    Pdf,
}

impl fmt::Display for ExtractorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExtractorKind::Structured => "structured",
            ExtractorKind::Generic => "generic",
            ExtractorKind::Pdf => "pdf",
        };
        write!(f, "{}", s)
    }
}

/// URL substrings handled by the structured extractor out of the box.
pub const DEFAULT_STRUCTURED_PATTERNS: &[&str] = &["attack.mitre.org/groups"];

/// Picks the extractor for a URL: structured when any pattern occurs in it.
pub fn route<S: AsRef<str>>(url: &str, structured_patterns: &[S]) -> ExtractorKind {
    if structured_patterns
        .iter()
        .any(|p| !p.as_ref().is_empty() && url.contains(p.as_ref()))
    {
        ExtractorKind::Structured
    } else {
        ExtractorKind::Generic
    }
}
