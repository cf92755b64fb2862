use crate::dom::ElementNode;
use crate::error::{Result, SyntaxError};
use crate::syntax::style::StyleKey;

/// Computed style lookup supplied by the rendering host
pub trait StyleResolver {
    /// Resolved value of `key` for `element`, exactly as the host reports it
    fn resolve(&self, element: &ElementNode, key: StyleKey) -> Result<String>;
}

impl<F> StyleResolver for F
where
    F: Fn(&ElementNode, StyleKey) -> Result<String>,
{
    fn resolve(&self, element: &ElementNode, key: StyleKey) -> Result<String> {
        self(element, key)
    }
}

/// Reads the computed styles captured on each element at extraction time
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotResolver;

impl StyleResolver for SnapshotResolver {
    fn resolve(&self, element: &ElementNode, key: StyleKey) -> Result<String> {
        let styles = element
            .computed_style
            .as_ref()
            .ok_or_else(|| SyntaxError::StyleResolutionFailed {
                tag: element.tag_name.clone(),
                property: key.css_property().to_string(),
                reason: "no computed style was captured for this element".to_string(),
            })?;

        Ok(styles.get(key.css_property()).cloned().unwrap_or_default())
    }
}
