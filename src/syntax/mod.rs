//! Reduction of a styled document tree into compact markup
//!
//! The pipeline runs once per call, synchronously, over the `body` of a [`DomTree`]:
//! - filter: drop scripts, SVG, cookie banners and unlisted `meta` tags, then comments
//! - extract: resolve and normalize the tracked computed styles of each element
//! - reduce: keep a few attributes, then write only the styles that changed since
//!   the previous element in document order
//! - serialize: read the inner markup back and strip layout whitespace
//!
//! The tree is snapshotted on entry and restored on exit.

pub mod color;
pub mod extract;
pub mod filter;
pub mod reduce;
pub mod resolver;
pub mod serialize;
pub mod style;

pub use resolver::{SnapshotResolver, StyleResolver};
pub use style::{ComputedStyles, STYLE_SPECS, StyleDelta, StyleKey, StyleSpec};

use crate::dom::DomTree;
use crate::error::{ErrorReport, Result};
use serde::{Deserialize, Serialize};

/// Produce the reduced markup of `tree`'s body.
///
/// The tree is identical to its original state when this returns, on success
/// and on failure alike.
pub fn generate<R>(tree: &mut DomTree, resolver: &R) -> Result<String>
where
    R: StyleResolver + ?Sized,
{
    let mut scope = tree.snapshot();

    let excluded = filter::remove_excluded(scope.body_mut()?);
    let comments = filter::strip_comments(&mut scope.document);
    log::debug!("Removed {} excluded subtrees and {} comments", excluded, comments);

    let mut delta = StyleDelta::seeded();
    let reduced = reduce::reduce_attributes(scope.body_mut()?, resolver, &mut delta)?;
    let stripped = filter::strip_style_and_link(scope.body_mut()?);
    log::debug!("Reduced {} elements, stripped {} style/link elements", reduced, stripped);

    let llm_syntax = serialize::serialize_body(scope.body()?);
    log::debug!("Serialized {} bytes of markup", llm_syntax.len());

    Ok(llm_syntax)
}

/// Outcome handed to the transport layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SyntaxMessage {
    LlmSyntax(String),
    HtmlParsingError(ErrorReport),
}

impl SyntaxMessage {
    pub fn is_success(&self) -> bool {
        matches!(self, SyntaxMessage::LlmSyntax(_))
    }

    pub fn into_result(self) -> std::result::Result<String, ErrorReport> {
        match self {
            SyntaxMessage::LlmSyntax(markup) => Ok(markup),
            SyntaxMessage::HtmlParsingError(report) => Err(report),
        }
    }
}

/// Run [`generate`], reporting any failure as a structured message instead of an error
pub fn run<R>(tree: &mut DomTree, resolver: &R) -> SyntaxMessage
where
    R: StyleResolver + ?Sized,
{
    match generate(tree, resolver) {
        Ok(markup) => SyntaxMessage::LlmSyntax(markup),
        Err(e) => {
            log::warn!("Failed to generate LLM syntax: {}", e);
            SyntaxMessage::HtmlParsingError(ErrorReport::from_error(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{ElementNode, Node};
    use crate::error::SyntaxError;

    fn create_tree() -> DomTree {
        let head = ElementNode::new("head").with_child(ElementNode::new("title").with_text("Shop"));
        let body = ElementNode::new("body")
            .with_attribute("class", "home")
            .with_children(vec![
                Node::comment(" nav "),
                Node::Element(
                    ElementNode::new("h1")
                        .with_attribute("class", "title")
                        .with_computed_style("display", "block")
                        .with_computed_style("fontSize", "32px")
                        .with_text("Shoes"),
                ),
                Node::Element(ElementNode::new("script").with_text("track()")),
                Node::Element(
                    ElementNode::new("a")
                        .with_attribute("href", "/buy")
                        .with_attribute("id", "buy")
                        .with_computed_style("display", "inline")
                        .with_computed_style("fontSize", "32px")
                        .with_text("Buy"),
                ),
            ]);

        DomTree::new(ElementNode::new("html").with_child(head).with_child(body))
    }

    #[test]
    fn test_generate() {
        let mut tree = create_tree();
        let markup = generate(&mut tree, &SnapshotResolver).unwrap();

        assert_eq!(
            markup,
            "<h1 fontsize=\"32\" display=\"block\">Shoes</h1><a href=\"/buy\">Buy</a>"
        );
    }

    #[test]
    fn test_generate_restores_tree() {
        let mut tree = create_tree();
        let before = tree.clone();

        generate(&mut tree, &SnapshotResolver).unwrap();
        assert_eq!(tree, before);
    }

    #[test]
    fn test_run_reports_failure() {
        let mut tree = create_tree();
        if let Some(body) = tree.document.children.last_mut().and_then(Node::as_element_mut) {
            body.add_child(ElementNode::new("p"));
        }
        let before = tree.clone();

        let message = run(&mut tree, &SnapshotResolver);
        assert!(!message.is_success());

        let report = message.into_result().unwrap_err();
        assert_eq!(report.name, "StyleResolutionFailed");
        assert!(report.message.contains("<p>"));
        assert_eq!(tree, before);
    }

    #[test]
    fn test_missing_body_is_reported() {
        let mut tree = DomTree::new(ElementNode::new("html"));
        let message = run(&mut tree, &SnapshotResolver);

        assert_eq!(
            message,
            SyntaxMessage::HtmlParsingError(ErrorReport::from_error(&SyntaxError::MissingBody))
        );
    }

    #[test]
    fn test_message_wire_format() {
        let ok = serde_json::to_value(SyntaxMessage::LlmSyntax("<p></p>".to_string())).unwrap();
        assert_eq!(ok, serde_json::json!({"llm_syntax": "<p></p>"}));

        let failed = serde_json::to_value(SyntaxMessage::HtmlParsingError(ErrorReport {
            message: "boom".to_string(),
            stack: String::new(),
            name: "MissingBody".to_string(),
        }))
        .unwrap();
        assert_eq!(failed["html_parsing_error"]["name"], "MissingBody");
    }
}
