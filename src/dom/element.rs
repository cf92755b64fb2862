use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Elements written without an end tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "track", "wbr",
];

/// Elements whose text children are written without escaping
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

/// A node of the host document tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Element(ElementNode),
    Text { text: String },
    Comment { text: String },
}

impl Node {
    /// Create a text node
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    /// Create a comment node
    pub fn comment(text: impl Into<String>) -> Self {
        Node::Comment { text: text.into() }
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementNode> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Node::Comment { .. })
    }
}

impl From<ElementNode> for Node {
    fn from(element: ElementNode) -> Self {
        Node::Element(element)
    }
}

/// Represents a DOM element node together with the styles the host resolved for it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementNode {
    /// Lowercase HTML tag name (e.g., "div", "a", "meta")
    pub tag_name: String,

    /// Element attributes, in document order
    #[serde(default)]
    pub attributes: IndexMap<String, String>,

    /// Child nodes, in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,

    /// Computed style values captured by the host, keyed by camelCase property name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed_style: Option<IndexMap<String, String>>,
}

impl ElementNode {
    /// Create a new ElementNode
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
            computed_style: None,
        }
    }

    /// Builder method: set a single attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Builder method: set attributes
    pub fn with_attributes<K, V>(mut self, attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in attributes {
            self.set_attribute(key, value);
        }
        self
    }

    /// Builder method: append a text child
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::text(text));
        self
    }

    /// Builder method: set children
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Builder method: append a child element
    pub fn with_child(mut self, child: ElementNode) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Builder method: set one computed style value
    pub fn with_computed_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.computed_style
            .get_or_insert_with(IndexMap::new)
            .insert(property.into(), value.into());
        self
    }

    /// Add a child node
    pub fn add_child(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Get attribute value by key
    pub fn get_attribute(&self, key: &str) -> Option<&String> {
        self.attributes.get(key)
    }

    /// Set an attribute, keeping its position when it already exists
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Remove an attribute, preserving the order of the remaining ones
    pub fn remove_attribute(&mut self, key: &str) -> Option<String> {
        self.attributes.shift_remove(key)
    }

    /// Keep only the attributes whose name satisfies `keep`
    pub fn retain_attributes(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.attributes.retain(|name, _| keep(name));
    }

    /// Check if element has a specific class
    pub fn has_class(&self, class_name: &str) -> bool {
        self.attributes
            .get("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class_name))
    }

    /// Check if element is a specific tag
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }

    /// Child elements, skipping text and comments
    pub fn elements(&self) -> impl Iterator<Item = &ElementNode> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        Self::collect_text(&self.children, &mut out);
        out
    }

    fn collect_text(children: &[Node], out: &mut String) {
        for child in children {
            match child {
                Node::Text { text } => out.push_str(text),
                Node::Element(element) => Self::collect_text(&element.children, out),
                Node::Comment { .. } => {}
            }
        }
    }

    /// Count this element and all descendant elements
    pub fn count_elements(&self) -> usize {
        1 + self.elements().map(ElementNode::count_elements).sum::<usize>()
    }

    fn is_void(&self) -> bool {
        VOID_ELEMENTS.iter().any(|tag| self.is_tag(tag))
    }

    fn is_raw_text(&self) -> bool {
        RAW_TEXT_ELEMENTS.iter().any(|tag| self.is_tag(tag))
    }

    /// Markup of the children, as a browser's `innerHTML` would produce it
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        self.write_children(&mut out);
        out
    }

    /// Markup of the element itself, as a browser's `outerHTML` would produce it
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.write_element(&mut out);
        out
    }

    fn write_element(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag_name);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            escape_into(value, true, out);
            out.push('"');
        }
        out.push('>');

        if self.is_void() {
            return;
        }

        self.write_children(out);
        out.push_str("</");
        out.push_str(&self.tag_name);
        out.push('>');
    }

    fn write_children(&self, out: &mut String) {
        let raw = self.is_raw_text();
        for child in &self.children {
            match child {
                Node::Element(element) => element.write_element(out),
                Node::Text { text } if raw => out.push_str(text),
                Node::Text { text } => escape_into(text, false, out),
                Node::Comment { text } => {
                    out.push_str("<!--");
                    out.push_str(text);
                    out.push_str("-->");
                }
            }
        }
    }
}

fn escape_into(value: &str, attribute: bool, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if attribute => out.push_str("&quot;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_node_creation() {
        let element = ElementNode::new("a")
            .with_attribute("href", "/page")
            .with_attribute("class", "btn primary")
            .with_text("Click me");

        assert_eq!(element.tag_name, "a");
        assert_eq!(element.get_attribute("href"), Some(&"/page".to_string()));
        assert_eq!(element.text_content(), "Click me");
        assert!(element.computed_style.is_none());
    }

    #[test]
    fn test_has_class() {
        let element = ElementNode::new("div").with_attribute("class", "container cc-window active");

        assert!(element.has_class("container"));
        assert!(element.has_class("cc-window"));
        assert!(!element.has_class("cc"));
    }

    #[test]
    fn test_attribute_order_survives_removal() {
        let mut element = ElementNode::new("img")
            .with_attributes([("id", "logo"), ("alt", "Logo"), ("src", "/logo.png")]);

        element.remove_attribute("id");
        element.set_attribute("width", "120");

        let names: Vec<&str> = element.attributes.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["alt", "src", "width"]);
    }

    #[test]
    fn test_inner_html_escapes_text_and_attributes() {
        let element = ElementNode::new("p").with_child(
            ElementNode::new("a")
                .with_attribute("href", "/?a=1&b=\"2\"")
                .with_text("Tom & <Jerry>\u{a0}!"),
        );

        assert_eq!(
            element.inner_html(),
            "<a href=\"/?a=1&amp;b=&quot;2&quot;\">Tom &amp; &lt;Jerry&gt;&nbsp;!</a>"
        );
    }

    #[test]
    fn test_void_and_raw_text_elements() {
        let mut body = ElementNode::new("body");
        body.add_child(ElementNode::new("br"));
        body.add_child(ElementNode::new("img").with_attribute("alt", "x"));
        body.add_child(ElementNode::new("style").with_text("a > b { color: red; }"));
        body.add_child(Node::comment(" banner "));

        assert_eq!(
            body.inner_html(),
            "<br><img alt=\"x\"><style>a > b { color: red; }</style><!-- banner -->"
        );
        assert_eq!(body.count_elements(), 4);
    }

    #[test]
    fn test_serialization() {
        let element = ElementNode::new("div")
            .with_attribute("id", "main")
            .with_computed_style("display", "block")
            .with_text("Hello");

        let json = serde_json::to_string(&Node::Element(element.clone())).unwrap();
        assert!(json.contains("\"type\":\"element\""));

        let deserialized: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, Node::Element(element));
    }

    #[test]
    fn test_deserialize_host_json() {
        let json = r#"{
            "type": "element",
            "tag_name": "p",
            "attributes": {"class": "lead"},
            "children": [
                {"type": "text", "text": "Hi"},
                {"type": "comment", "text": "note"}
            ]
        }"#;

        let node: Node = serde_json::from_str(json).unwrap();
        let element = node.as_element().unwrap();
        assert!(element.has_class("lead"));
        assert_eq!(element.children.len(), 2);
        assert!(element.children[1].is_comment());
    }
}
