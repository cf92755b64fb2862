//! Structural removal passes: excluded subtrees, comments, and style/link elements

use crate::dom::{ElementNode, Node};

/// Selector for a subtree removed before reduction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionSelector {
    /// Matches by tag name, case-insensitively
    Tag(&'static str),
    /// Matches elements carrying the class
    Class(&'static str),
}

impl ExclusionSelector {
    pub fn matches(&self, element: &ElementNode) -> bool {
        match self {
            ExclusionSelector::Tag(tag) => element.is_tag(tag),
            ExclusionSelector::Class(class) => element.has_class(class),
        }
    }
}

/// Subtrees removed from under `body`; cookie-consent banners included
pub const EXCLUDED_ELEMENTS: [ExclusionSelector; 7] = [
    ExclusionSelector::Tag("script"),
    ExclusionSelector::Tag("noscript"),
    ExclusionSelector::Tag("svg"),
    ExclusionSelector::Class("cc-revoke"),
    ExclusionSelector::Class("cc-window"),
    ExclusionSelector::Class("cookie-status-message"),
    ExclusionSelector::Tag("meta"),
];

/// `meta` names kept even though `meta` is excluded
pub const META_NAMES_TO_KEEP: [&str; 2] = ["title", "description"];

fn is_kept_meta(element: &ElementNode) -> bool {
    element.is_tag("meta")
        && element
            .get_attribute("name")
            .is_some_and(|name| META_NAMES_TO_KEEP.contains(&name.as_str()))
}

fn is_excluded(element: &ElementNode) -> bool {
    EXCLUDED_ELEMENTS.iter().any(|selector| selector.matches(element)) && !is_kept_meta(element)
}

/// Remove every excluded subtree below `body`, returning how many were removed
pub fn remove_excluded(body: &mut ElementNode) -> usize {
    let mut removed = 0;
    remove_matching(&mut body.children, &is_excluded, &mut removed);
    removed
}

/// Remove every comment node anywhere below `root`
pub fn strip_comments(root: &mut ElementNode) -> usize {
    let mut removed = 0;
    strip_comments_in(&mut root.children, &mut removed);
    removed
}

fn strip_comments_in(children: &mut Vec<Node>, removed: &mut usize) {
    let before = children.len();
    children.retain(|child| !child.is_comment());
    *removed += before - children.len();

    for child in children.iter_mut().filter_map(Node::as_element_mut) {
        strip_comments_in(&mut child.children, removed);
    }
}

/// Whether the element is a `style` or `link` element
pub fn is_style_or_link(element: &ElementNode) -> bool {
    element.is_tag("style") || element.is_tag("link")
}

/// Remove every `style` and `link` element below `body`
pub fn strip_style_and_link(body: &mut ElementNode) -> usize {
    let mut removed = 0;
    remove_matching(&mut body.children, &is_style_or_link, &mut removed);
    removed
}

fn remove_matching(children: &mut Vec<Node>, matches: &dyn Fn(&ElementNode) -> bool, removed: &mut usize) {
    let before = children.len();
    children.retain(|child| !child.as_element().is_some_and(matches));
    *removed += before - children.len();

    for child in children.iter_mut().filter_map(Node::as_element_mut) {
        remove_matching(&mut child.children, matches, removed);
    }
}
