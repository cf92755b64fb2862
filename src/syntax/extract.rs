//! Per-element computed style extraction and value normalization

use crate::dom::ElementNode;
use crate::error::Result;
use crate::syntax::color::compress_colors;
use crate::syntax::resolver::StyleResolver;
use crate::syntax::style::{ComputedStyles, STYLE_SPECS, StyleSpec};
use regex::Regex;
use std::sync::LazyLock;

static LEADING_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:\d+(?:\.\d*)?|\.\d+)").expect("LEADING_NUMBER_RE: hardcoded regex is valid")
});

/// Resolve and normalize every tracked style of `element`
pub fn computed_styles<R>(element: &ElementNode, resolver: &R) -> Result<ComputedStyles>
where
    R: StyleResolver + ?Sized,
{
    let mut styles = ComputedStyles::new();

    for spec in &STYLE_SPECS {
        let raw = resolver.resolve(element, spec.key)?;
        if let Some(value) = normalize_value(spec, &raw) {
            styles.insert(spec.key, value);
        }
    }

    Ok(styles)
}

/// Normalize one resolved value, or `None` when the key should be skipped.
///
/// `Some("")` means the value equals the property's default.
pub fn normalize_value(spec: &StyleSpec, raw: &str) -> Option<String> {
    let value = raw.replace("px", "");

    if spec.values_to_exclude.iter().any(|excluded| value.contains(excluded)) {
        return None;
    }

    if value.contains("rgb") {
        return compress_colors(&value);
    }

    if spec.is_numeric {
        return parse_rounded(&value).map(|number| number.to_string());
    }

    if spec.default == Some(value.as_str()) {
        Some(String::new())
    } else {
        Some(value)
    }
}

/// Leading number of `value`, rounded up; `None` when it does not start with one
pub fn parse_rounded(value: &str) -> Option<i64> {
    let number = LEADING_NUMBER_RE.find(value)?.as_str().trim_start();
    let parsed = number.parse::<f64>().ok()?;
    Some(parsed.ceil() as i64)
}
