// ABOUTME: Destructive removal of noise subtrees (scripts, navigation, ads, comments).
// ABOUTME: Detaches matching nodes from the scraper tree so they never reach the text output.

use ego_tree::NodeId;
use scraper::{ElementRef, Html};

use super::selectors::get_or_compile;

/// Selectors for elements stripped from a content region before text extraction.
pub const NOISE_SELECTORS: &[&str] = &[
    "script",
    "style",
    "nav",
    "footer",
    "aside",
    ".ads",
    ".comments",
    ".related-posts",
];

/// Detaches every descendant of `region` matching one of `noise` from the tree.
///
/// The region itself is never removed. Returns the number of detached subtrees.
pub fn prune_noise(doc: &mut Html, region: NodeId, noise: &[&str]) -> usize {
    let doomed: Vec<NodeId> = {
        let Some(root) = doc.tree.get(region).and_then(ElementRef::wrap) else {
            return 0;
        };
        noise
            .iter()
            .filter_map(|css| get_or_compile(css))
            .flat_map(|sel| root.select(&sel).map(|el| el.id()).collect::<Vec<_>>())
            .collect()
    };

    let mut removed = 0;
    for id in doomed {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
            removed += 1;
        }
    }
    removed
}
