//! Host document tree
//!
//! This module provides the document tree the reduction pipeline operates on. It includes:
//! - Node / ElementNode: owned tree nodes carrying attributes and captured computed styles
//! - DomTree: the whole document, with body lookup, JSON capture and snapshot/restore

pub mod element;
pub mod tree;

pub use element::{ElementNode, Node};
pub use tree::{DomTree, TreeSnapshot};

use crate::error::Result;
use headless_chrome::Tab;
use std::sync::Arc;

/// Extract the styled DOM tree from a browser tab
pub fn extract_dom(tab: &Arc<Tab>) -> Result<DomTree> {
    DomTree::from_tab(tab)
}
