use crate::dom::element::{ElementNode, Node};
use crate::error::{Result, SyntaxError};
use headless_chrome::Tab;
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::Path;
use std::sync::Arc;

/// Represents the styled document tree of a web page
#[derive(Debug, Clone, PartialEq)]
pub struct DomTree {
    /// Document element (`html`) of the page
    pub document: ElementNode,
}

impl DomTree {
    /// Create a new DomTree from its document element
    pub fn new(document: ElementNode) -> Self {
        Self { document }
    }

    /// Build the styled tree from a browser tab
    pub fn from_tab(tab: &Arc<Tab>) -> Result<Self> {
        // The script walks the live document and returns it as a JSON string
        let js_code = include_str!("extract_styled_dom.js");

        let result = tab
            .evaluate(js_code, false)
            .map_err(|e| SyntaxError::EvaluationFailed(format!("Failed to execute DOM extraction script: {}", e)))?;

        let json_value = result
            .value
            .ok_or_else(|| SyntaxError::DomParseFailed("No value returned from DOM extraction".to_string()))?;

        let json_str: String = serde_json::from_value(json_value)
            .map_err(|e| SyntaxError::DomParseFailed(format!("Failed to get JSON string: {}", e)))?;

        let tree = Self::from_json(&json_str)?;
        log::debug!("Extracted styled DOM with {} elements", tree.count_elements());

        Ok(tree)
    }

    /// Parse a tree previously captured with [`DomTree::to_json`]
    ///
    /// Pages nest far deeper than serde_json's default recursion limit allows,
    /// so the limit is lifted and the stack grows on demand instead.
    pub fn from_json(json: &str) -> Result<Self> {
        let parse_err = |e: serde_json::Error| SyntaxError::DomParseFailed(format!("Failed to parse DOM JSON: {}", e));

        let mut deserializer = serde_json::Deserializer::from_str(json);
        deserializer.disable_recursion_limit();
        let node = Node::deserialize(serde_stacker::Deserializer::new(&mut deserializer)).map_err(parse_err)?;
        deserializer.end().map_err(parse_err)?;

        match node {
            Node::Element(document) => Ok(Self::new(document)),
            _ => Err(SyntaxError::DomParseFailed("Document root is not an element".to_string())),
        }
    }

    /// Load a captured tree from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Convert the DOM tree to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&Node::Element(self.document.clone()))
            .map_err(|e| SyntaxError::DomParseFailed(format!("Failed to serialize DOM to JSON: {}", e)))
    }

    /// Write the tree to disk as JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// The `body` element of the document
    pub fn body(&self) -> Result<&ElementNode> {
        if self.document.is_tag("body") {
            return Ok(&self.document);
        }

        self.document
            .elements()
            .find(|child| child.is_tag("body"))
            .ok_or(SyntaxError::MissingBody)
    }

    /// Mutable access to the `body` element of the document
    pub fn body_mut(&mut self) -> Result<&mut ElementNode> {
        if self.document.is_tag("body") {
            return Ok(&mut self.document);
        }

        self.document
            .children
            .iter_mut()
            .filter_map(Node::as_element_mut)
            .find(|child| child.is_tag("body"))
            .ok_or(SyntaxError::MissingBody)
    }

    /// Count total elements in the tree
    pub fn count_elements(&self) -> usize {
        self.document.count_elements()
    }

    /// Deep-copy the document and hand out a guard that puts the copy back when dropped.
    ///
    /// Everything done through the guard is undone on exit, whether the work
    /// succeeded or bailed out early with an error.
    pub fn snapshot(&mut self) -> TreeSnapshot<'_> {
        let original = self.document.clone();
        TreeSnapshot {
            tree: self,
            original: Some(original),
        }
    }
}

/// Scoped mutable access to a [`DomTree`] that restores the original document on drop
pub struct TreeSnapshot<'a> {
    tree: &'a mut DomTree,
    original: Option<ElementNode>,
}

impl Deref for TreeSnapshot<'_> {
    type Target = DomTree;

    fn deref(&self) -> &DomTree {
        self.tree
    }
}

impl DerefMut for TreeSnapshot<'_> {
    fn deref_mut(&mut self) -> &mut DomTree {
        self.tree
    }
}

impl Drop for TreeSnapshot<'_> {
    fn drop(&mut self) {
        if let Some(original) = self.original.take() {
            self.tree.document = original;
        }
    }
}
