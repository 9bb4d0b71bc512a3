// ABOUTME: Generic main-content extractor for pages of unknown layout.
// ABOUTME: Walks an ordered selector chain, prunes noise from the winning region, emits plain text.

//! Generic page extraction.
//!
//! Key behaviors:
//! - Rules are tried in order; the first rule whose selector matches wins.
//! - Publisher-specific containers come before bare `<article>`, which comes
//!   before id- and CMS-class based regions, with `<body>` last.
//! - Noise subtrees are detached from the winning region before its text is
//!   collected, one trimmed text node per line.

use scraper::Html;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dom::prune::{prune_noise, NOISE_SELECTORS};
use crate::dom::selectors::get_or_compile;
use crate::dom::stripped_text;
use crate::error::ExtractError;

/// One step of the content-location chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRule {
    /// Short label used in logs.
    pub name: String,
    /// CSS selector for the candidate region.
    pub selector: String,
}

impl ContentRule {
    pub fn new(name: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selector: selector.into(),
        }
    }
}

/// Ordered list of content rules, evaluated first-match-wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentChain {
    pub rules: Vec<ContentRule>,
}

impl Default for ContentChain {
    fn default() -> Self {
        Self {
            rules: vec![
                ContentRule::new("publisher", ".blog-item-content"),
                ContentRule::new("article", "article"),
                ContentRule::new("content-id", "#content"),
                ContentRule::new("blogger", ".post-body"),
                ContentRule::new("newspaper", ".td-post-content"),
                ContentRule::new("body", "body"),
            ],
        }
    }
}

impl ContentChain {
    pub fn new(rules: Vec<ContentRule>) -> Self {
        Self { rules }
    }

    /// Returns the first rule matching the document, with the matched node id.
    ///
    /// Rules with invalid selectors never match.
    pub fn locate(&self, doc: &Html) -> Option<(&ContentRule, ego_tree::NodeId)> {
        self.rules.iter().find_map(|rule| {
            let sel = get_or_compile(&rule.selector)?;
            doc.select(&sel).next().map(|el| (rule, el.id()))
        })
    }
}

/// Extracts the main text of an arbitrary page.
///
/// Takes the document by value because noise pruning mutates the tree.
pub fn extract_generic(
    mut doc: Html,
    chain: &ContentChain,
    target: &str,
) -> Result<String, ExtractError> {
    let Some((rule, region)) = chain.locate(&doc) else {
        return Err(ExtractError::not_found(
            target,
            "LocateContent",
            Some(anyhow::anyhow!(
                "no content region matched {} rule(s)",
                chain.rules.len()
            )),
        ));
    };
    debug!(rule = %rule.name, selector = %rule.selector, source = target, "content region located");

    let removed = prune_noise(&mut doc, region, NOISE_SELECTORS);
    debug!(removed, source = target, "pruned noise subtrees");

    let text = doc
        .tree
        .get(region)
        .and_then(scraper::ElementRef::wrap)
        .map(|el| stripped_text(&el))
        .unwrap_or_default();
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(html: &str) -> Result<String, ExtractError> {
        extract_generic(Html::parse_document(html), &ContentChain::default(), "test")
    }

    #[test]
    fn article_text_excludes_scripts() {
        let text = extract(
            r#"<html><body>
                <header>Site header</header>
                <article>
                    <h1>Exploit chain</h1>
                    <script>window.tracking = "SECRET";</script>
                    <p>First paragraph.</p>
                    <p>Second <a href="/x">paragraph</a>.</p>
                </article>
            </body></html>"#,
        )
        .unwrap();

        assert_eq!(
            text,
            "Exploit chain\nFirst paragraph.\nSecond\nparagraph\n."
        );
        assert!(!text.contains("SECRET"));
        assert!(!text.contains("Site header"));
    }

    #[test]
    fn publisher_container_wins_over_article() {
        let text = extract(
            r#"<html><body>
                <article><p>Teaser card</p></article>
                <div class="blog-item-content"><p>Full write-up</p></div>
            </body></html>"#,
        )
        .unwrap();
        assert_eq!(text, "Full write-up");
    }

    #[test]
    fn content_id_then_cms_classes() {
        let by_id = extract(
            r#"<html><body><div class="post-body">cms</div><div id="content">by id</div></body></html>"#,
        )
        .unwrap();
        assert_eq!(by_id, "by id");

        let by_class = extract(
            r#"<html><body><p>chrome</p><div class="td-post-content">newspaper theme</div></body></html>"#,
        )
        .unwrap();
        assert_eq!(by_class, "newspaper theme");
    }

    #[test]
    fn falls_back_to_body_and_prunes_noise() {
        let text = extract(
            r#"<html><head><style>p { color: red }</style></head><body>
                <nav><a href="/">Home</a></nav>
                <p>Plain page</p>
                <aside>Sidebar</aside>
                <div class="related-posts">More</div>
                <footer>Copyright</footer>
            </body></html>"#,
        )
        .unwrap();
        assert_eq!(text, "Plain page");
    }

    #[test]
    fn chain_without_match_is_not_found() {
        let chain = ContentChain::new(vec![
            ContentRule::new("article", "article"),
            ContentRule::new("content-id", "#content"),
        ]);
        let doc = Html::parse_document("<html><body><p>x</p></body></html>");
        let err = extract_generic(doc, &chain, "https://example.com").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn locate_reports_winning_rule() {
        let chain = ContentChain::default();
        let doc = Html::parse_document("<html><body><div id=content>x</div></body></html>");
        let (rule, _) = chain.locate(&doc).unwrap();
        assert_eq!(rule.name, "content-id");
    }

    #[test]
    fn invalid_selector_rule_is_skipped() {
        let chain = ContentChain::new(vec![
            ContentRule::new("broken", "[[["),
            ContentRule::new("body", "body"),
        ]);
        let doc = Html::parse_document("<html><body>fallback</body></html>");
        let (rule, _) = chain.locate(&doc).unwrap();
        assert_eq!(rule.name, "body");
    }
}
