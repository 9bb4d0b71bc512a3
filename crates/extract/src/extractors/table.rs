// ABOUTME: Renders an HTML table element as a Markdown-style text table.
// ABOUTME: Header-less tables render as an empty string; a missing tbody is a typed error.

use scraper::ElementRef;

use crate::dom::selectors::get_or_compile;
use crate::dom::{element_text, normalize_whitespace};
use crate::error::ExtractError;

/// Failures specific to table formatting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The table has header cells but no `<tbody>` row group.
    #[error("table has {columns} header cell(s) but no tbody row group")]
    MissingBody { columns: usize },
}

impl TableError {
    /// Lifts the table failure into the crate error, tagged as a parse failure.
    pub fn into_extract_error(self, target: &str) -> ExtractError {
        ExtractError::parse(target, "FormatTable", Some(anyhow::Error::new(self)))
    }
}

fn select_all<'a>(el: &ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match get_or_compile(css) {
        Some(sel) => el.select(&sel).collect(),
        None => Vec::new(),
    }
}

/// Formats a `<table>` element as Markdown.
///
/// Layout:
/// ```text
/// | Name | Description |
/// |---|---|
/// | APT1 | Some group |
/// ```
///
/// Header texts come from every `th` in the table, trimmed. Body rows come
/// from the first `tbody`; each `td` has its whitespace collapsed to single
/// spaces. Rows without `td` cells are skipped. The output always ends with
/// exactly one newline. A table with no `th` is presentational and yields
/// an empty string.
pub fn format_table_markdown(table: &ElementRef) -> Result<String, TableError> {
    let headers: Vec<String> = select_all(table, "th")
        .iter()
        .map(element_text)
        .collect();
    if headers.is_empty() {
        return Ok(String::new());
    }

    let tbody = select_all(table, "tbody")
        .into_iter()
        .next()
        .ok_or(TableError::MissingBody {
            columns: headers.len(),
        })?;

    let mut lines = Vec::with_capacity(2);
    lines.push(format!("| {} |", headers.join(" | ")));
    lines.push(format!("|{}", "---|".repeat(headers.len())));

    for row in select_all(&tbody, "tr") {
        let cols: Vec<String> = select_all(&row, "td")
            .iter()
            .map(|td| normalize_whitespace(&td.text().collect::<Vec<_>>().join(" ")))
            .collect();
        if cols.is_empty() {
            continue;
        }
        lines.push(format!("| {} |", cols.join(" | ")));
    }

    Ok(lines.join("\n") + "\n")
}
