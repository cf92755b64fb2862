use crate::dom::ElementNode;

/// Strip layout whitespace from inner markup.
///
/// Double spaces are removed in a single left-to-right pass, so a run of three
/// spaces leaves one behind and a run of four leaves none.
pub fn normalize_markup(markup: &str) -> String {
    markup
        .replace('\n', "")
        .replace('\t', "")
        .replace("  ", "")
        .replace(" />", "/>")
        .trim()
        .to_string()
}

/// Inner markup of `body` with whitespace normalized
pub fn serialize_body(body: &ElementNode) -> String {
    normalize_markup(&body.inner_html())
}
