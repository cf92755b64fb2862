use llm_syntax::syntax::style::STYLE_SPECS;
use regex::Regex;
use llm_syntax::{DomTree, ElementNode, Node, SnapshotResolver, StyleKey, SyntaxMessage};

const LANDING_PAGE: &str = include_str!("fixtures/landing_page.json");

const EXPECTED_LANDING_PAGE: &str = concat!(
    r#"<meta name="description" content="Shoes for trails" display="none">"#,
    r##"<header backgroundcolor="#222222" color="#ffffff" fontsize="16" display="block" width="1280" height="64">"##,
    r#"<a href="/"><img alt="Trail Co" width="121" height="32"></a>"#,
    r#"</header>"#,
    r##"<main color="#000000" margin="0 0 24">"##,
    r#"<h1 fontsize="32" fontweight="700">Run further</h1>"#,
    r#"<p color="rgba(0, 0, 0, 0.6)" fontsize="16" fontweight="400">Light &amp; grippy.</p>"#,
    r#"</main>"#,
);

fn landing_page() -> DomTree {
    DomTree::from_json(LANDING_PAGE).expect("fixture parses")
}

#[test]
fn test_landing_page_markup() {
    let mut tree = landing_page();
    let markup = llm_syntax::generate(&mut tree, &SnapshotResolver).unwrap();

    assert_eq!(markup, EXPECTED_LANDING_PAGE);
}

#[test]
fn test_landing_page_is_restored() {
    let mut tree = landing_page();
    let before = tree.clone();
    let before_markup = before.body().unwrap().inner_html();

    llm_syntax::generate(&mut tree, &SnapshotResolver).unwrap();

    assert_eq!(tree, before);
    assert_eq!(tree.body().unwrap().inner_html(), before_markup);
}

#[test]
fn test_repeated_runs_are_identical() {
    let mut tree = landing_page();

    let first = llm_syntax::generate(&mut tree, &SnapshotResolver).unwrap();
    let second = llm_syntax::generate(&mut tree, &SnapshotResolver).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_only_known_attributes_are_emitted() {
    let mut tree = landing_page();
    let markup = llm_syntax::generate(&mut tree, &SnapshotResolver).unwrap();

    let mut allowed: Vec<&str> = vec!["name", "content", "alt", "href"];
    allowed.extend(STYLE_SPECS.iter().map(|spec| spec.short_attribute));

    let attribute = Regex::new(r#"\s([A-Za-z-]+)=""#).unwrap();
    let names: Vec<&str> = attribute
        .captures_iter(&markup)
        .map(|caps| caps.get(1).unwrap().as_str())
        .collect();

    assert!(!names.is_empty());
    for name in names {
        assert!(allowed.contains(&name), "unexpected attribute {name} in {markup}");
    }
}

#[test]
fn test_excluded_content_is_gone() {
    let mut tree = landing_page();
    let markup = llm_syntax::generate(&mut tree, &SnapshotResolver).unwrap();

    assert!(!markup.contains("track("));
    assert!(!markup.contains("cookies"));
    assert!(!markup.contains("Cookie Policy"));
    assert!(!markup.contains("Preferences saved"));
    assert!(!markup.contains("<svg"));
    assert!(!markup.contains("<!--"));
    assert!(!markup.contains("<link"));
}

#[test]
fn test_adjacent_identical_colors_emit_once() {
    let item = |text: &str| {
        ElementNode::new("li")
            .with_computed_style("color", "rgb(200, 0, 0)")
            .with_computed_style("display", "list-item")
            .with_text(text)
    };
    let list = ElementNode::new("ul")
        .with_computed_style("display", "block")
        .with_child(item("One"))
        .with_child(item("Two"));
    let mut tree = DomTree::new(ElementNode::new("html").with_child(ElementNode::new("body").with_child(list)));

    let markup = llm_syntax::generate(&mut tree, &SnapshotResolver).unwrap();
    assert_eq!(
        markup,
        r##"<ul display="block"><li color="#c80000" display="list-item">One</li><li>Two</li></ul>"##
    );
}

#[test]
fn test_deeply_nested_snapshot() {
    const DEPTH: usize = 120;

    let mut nested = ElementNode::new("div")
        .with_computed_style("display", "block")
        .with_text("deep");
    for _ in 1..DEPTH {
        nested = ElementNode::new("div")
            .with_computed_style("display", "block")
            .with_child(nested);
    }
    let captured = DomTree::new(ElementNode::new("html").with_child(ElementNode::new("body").with_child(nested)));

    let mut tree = DomTree::from_json(&captured.to_json().unwrap()).unwrap();
    let markup = llm_syntax::generate(&mut tree, &SnapshotResolver).unwrap();

    let expected = format!(
        r#"<div display="block">{}deep{}"#,
        "<div>".repeat(DEPTH - 1),
        "</div>".repeat(DEPTH)
    );
    assert_eq!(markup, expected);
}

#[test]
fn test_failure_is_reported_with_kind() {
    let mut tree = landing_page();
    tree.body_mut().unwrap().add_child(Node::Element(ElementNode::new("footer")));

    match llm_syntax::run(&mut tree, &SnapshotResolver) {
        SyntaxMessage::HtmlParsingError(report) => {
            assert_eq!(report.name, "StyleResolutionFailed");
            assert!(report.message.contains("footer"));
        }
        SyntaxMessage::LlmSyntax(markup) => panic!("expected failure, got {markup}"),
    }
}

#[test]
fn test_custom_resolver() {
    let body = ElementNode::new("body")
        .with_child(ElementNode::new("section").with_attribute("data-size", "15.2px"))
        .with_child(ElementNode::new("section").with_attribute("data-size", "15.9px"));
    let mut tree = DomTree::new(ElementNode::new("html").with_child(body));

    let resolver = |element: &ElementNode, key: StyleKey| -> llm_syntax::Result<String> {
        Ok(match key {
            StyleKey::FontSize => element.get_attribute("data-size").cloned().unwrap_or_default(),
            _ => String::new(),
        })
    };

    let markup = llm_syntax::generate(&mut tree, &resolver).unwrap();
    assert_eq!(markup, r#"<section fontsize="16"></section><section></section>"#);
}
