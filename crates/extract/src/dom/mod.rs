// ABOUTME: DOM traversal and text helpers for working with scraper's HTML document tree.
// ABOUTME: Provides whitespace normalization, sibling lookup, text collection and noise pruning.

//! DOM utilities shared by the extractors.
//!
//! Documents are parsed with `scraper`; the helpers here only read the tree,
//! except for [`prune::prune_noise`] which detaches noise subtrees in place.

pub mod prune;
pub mod selectors;

use scraper::ElementRef;

/// Collapses runs of whitespace (including newlines) into single spaces.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Concatenated text of an element with surrounding whitespace trimmed.
pub fn element_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Text of every descendant text node, each trimmed, empty ones dropped,
/// joined with newlines so block boundaries survive.
pub fn stripped_text(el: &ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Nearest preceding sibling element with the given tag name.
pub fn previous_sibling_named<'a>(el: &ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    el.prev_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sib| sib.value().name().eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scraper::{Html, Selector};

    #[test]
    fn normalize_collapses_newlines_and_tabs() {
        assert_eq!(normalize_whitespace("  a\n\tb   c \n"), "a b c");
    }

    #[test]
    fn stripped_text_joins_nodes_with_newlines() {
        let doc = Html::parse_fragment("<div><p>  One </p>\n<p>Two</p>   <span> </span></div>");
        let sel = Selector::parse("div").unwrap();
        let div = doc.select(&sel).next().unwrap();
        assert_eq!(stripped_text(&div), "One\nTwo");
    }

    #[test]
    fn previous_sibling_skips_other_tags() {
        let html = "<div><h2>Alpha</h2><p>intro</p><table id=t></table></div>";
        let doc = Html::parse_fragment(html);
        let sel = Selector::parse("#t").unwrap();
        let table = doc.select(&sel).next().unwrap();
        let heading = previous_sibling_named(&table, "h2").unwrap();
        assert_eq!(element_text(&heading), "Alpha");
    }

    #[test]
    fn previous_sibling_ignores_following_headings() {
        let html = "<div><table id=t></table><h2>After</h2></div>";
        let doc = Html::parse_fragment(html);
        let sel = Selector::parse("#t").unwrap();
        let table = doc.select(&sel).next().unwrap();
        assert!(previous_sibling_named(&table, "h2").is_none());
    }
}
