// ABOUTME: Site-specific extractor for threat-group pages (group listing and group detail).
// ABOUTME: Classifies the page variant first, then emits title, description and table sections.

//! Structured-page extraction.
//!
//! Group pages share one DOM vocabulary: an `h1` title, a description
//! column (`div.col-md-10`) and Bootstrap tables. The listing page carries a
//! single `table.table-striped`; detail pages carry several `table.table`
//! elements, each introduced by an `h2` sibling.

use scraper::{ElementRef, Html};
use tracing::debug;

use crate::dom::selectors::get_or_compile;
use crate::dom::{element_text, previous_sibling_named};
use crate::error::ExtractError;
use crate::extractors::table::format_table_markdown;

const TITLE_SELECTOR: &str = "h1";
const DESCRIPTION_SELECTOR: &str = "div.col-md-10";
const LISTING_TABLE_SELECTOR: &str = "table.table-striped";
const DETAIL_TABLE_SELECTOR: &str = "table.table";

/// Section header emitted above the listing table.
pub const LISTING_SECTION: &str = "Threat Groups List";
/// Section title used when a detail table has no preceding `h2`.
pub const DEFAULT_TABLE_TITLE: &str = "Details Table";

/// The two layouts a structured page can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageVariant {
    Listing,
    Detail,
}

fn first<'a>(doc: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    get_or_compile(css).and_then(|sel| doc.select(&sel).next())
}

/// Decides the page variant from the presence of the striped listing table.
pub fn classify(doc: &Html) -> PageVariant {
    if first(doc, LISTING_TABLE_SELECTOR).is_some() {
        PageVariant::Listing
    } else {
        PageVariant::Detail
    }
}

fn section(title: &str) -> String {
    format!("\n--- {} ---\n", title)
}

/// Extracts title, description paragraphs and tables from a structured page.
///
/// `target` is only used to label errors.
pub fn extract_structured(doc: &Html, target: &str) -> Result<String, ExtractError> {
    let mut parts: Vec<String> = Vec::new();

    if let Some(h1) = first(doc, TITLE_SELECTOR) {
        parts.push(format!("Title: {}\n", element_text(&h1)));
    }

    if let (Some(desc), Some(p)) = (first(doc, DESCRIPTION_SELECTOR), get_or_compile("p")) {
        parts.extend(desc.select(&p).map(|para| element_text(&para)));
    }

    let variant = classify(doc);
    debug!(?variant, source = target, "classified structured page");

    match variant {
        PageVariant::Listing => {
            if let Some(table) = first(doc, LISTING_TABLE_SELECTOR) {
                parts.push(section(LISTING_SECTION));
                parts.push(
                    format_table_markdown(&table).map_err(|e| e.into_extract_error(target))?,
                );
            }
        }
        PageVariant::Detail => {
            let Some(sel) = get_or_compile(DETAIL_TABLE_SELECTOR) else {
                return Ok(parts.join("\n").trim().to_string());
            };
            for table in doc.select(&sel) {
                let title = previous_sibling_named(&table, "h2")
                    .map(|h2| element_text(&h2))
                    .unwrap_or_else(|| DEFAULT_TABLE_TITLE.to_string());
                parts.push(section(&title));
                parts.push(
                    format_table_markdown(&table).map_err(|e| e.into_extract_error(target))?,
                );
            }
        }
    }

    Ok(parts.join("\n").trim().to_string())
}
