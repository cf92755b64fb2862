//! Tracked style properties, their emission rules, and the carry-forward delta table

use serde::{Deserialize, Serialize};

/// A visual property whose computed value may be written onto the reduced markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleKey {
    BackgroundColor,
    Color,
    FontSize,
    Border,
    Display,
    Width,
    Height,
    Margin,
    Float,
    FontWeight,
    TextDecoration,
    Opacity,
    Visibility,
}

impl StyleKey {
    pub const COUNT: usize = 13;

    /// Every key, in the order styles are extracted and emitted
    pub const ALL: [StyleKey; StyleKey::COUNT] = [
        StyleKey::BackgroundColor,
        StyleKey::Color,
        StyleKey::FontSize,
        StyleKey::Border,
        StyleKey::Display,
        StyleKey::Width,
        StyleKey::Height,
        StyleKey::Margin,
        StyleKey::Float,
        StyleKey::FontWeight,
        StyleKey::TextDecoration,
        StyleKey::Opacity,
        StyleKey::Visibility,
    ];

    /// Property name as exposed by `CSSStyleDeclaration` (camelCase)
    pub fn css_property(self) -> &'static str {
        match self {
            StyleKey::BackgroundColor => "backgroundColor",
            StyleKey::Color => "color",
            StyleKey::FontSize => "fontSize",
            StyleKey::Border => "border",
            StyleKey::Display => "display",
            StyleKey::Width => "width",
            StyleKey::Height => "height",
            StyleKey::Margin => "margin",
            StyleKey::Float => "float",
            StyleKey::FontWeight => "fontWeight",
            StyleKey::TextDecoration => "textDecoration",
            StyleKey::Opacity => "opacity",
            StyleKey::Visibility => "visibility",
        }
    }

    /// Emission rules for this key
    pub fn spec(self) -> &'static StyleSpec {
        &STYLE_SPECS[self as usize]
    }
}

/// Emission rules for one tracked property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSpec {
    pub key: StyleKey,
    /// Attribute name written onto the reduced element
    pub short_attribute: &'static str,
    /// Value not worth emitting; also seeds the delta table
    pub default: Option<&'static str>,
    /// Substrings that disqualify a value entirely
    pub values_to_exclude: &'static [&'static str],
    /// Coerce the value to an integer, rounding up
    pub is_numeric: bool,
}

// Attribute names are lowercase: an HTML host lowercases names passed to setAttribute.
pub static STYLE_SPECS: [StyleSpec; StyleKey::COUNT] = [
    StyleSpec {
        key: StyleKey::BackgroundColor,
        short_attribute: "backgroundcolor",
        default: Some("#000000"),
        values_to_exclude: &[],
        is_numeric: false,
    },
    StyleSpec {
        key: StyleKey::Color,
        short_attribute: "color",
        default: Some("#000000"),
        values_to_exclude: &[],
        is_numeric: false,
    },
    StyleSpec {
        key: StyleKey::FontSize,
        short_attribute: "fontsize",
        default: None,
        values_to_exclude: &[],
        is_numeric: true,
    },
    StyleSpec {
        key: StyleKey::Border,
        short_attribute: "border",
        default: Some("0 none rgb(0, 0, 0)"),
        values_to_exclude: &["none"],
        is_numeric: false,
    },
    StyleSpec {
        key: StyleKey::Display,
        short_attribute: "display",
        default: Some("inline"),
        values_to_exclude: &["inline"],
        is_numeric: false,
    },
    StyleSpec {
        key: StyleKey::Width,
        short_attribute: "width",
        default: Some("auto"),
        values_to_exclude: &["auto"],
        is_numeric: true,
    },
    StyleSpec {
        key: StyleKey::Height,
        short_attribute: "height",
        default: Some("auto"),
        values_to_exclude: &["auto"],
        is_numeric: true,
    },
    StyleSpec {
        key: StyleKey::Margin,
        short_attribute: "margin",
        default: Some("0"),
        values_to_exclude: &[],
        is_numeric: false,
    },
    StyleSpec {
        key: StyleKey::Float,
        short_attribute: "float",
        default: Some("none"),
        values_to_exclude: &["none"],
        is_numeric: false,
    },
    StyleSpec {
        key: StyleKey::FontWeight,
        short_attribute: "fontweight",
        default: Some("normal"),
        values_to_exclude: &[],
        is_numeric: false,
    },
    StyleSpec {
        key: StyleKey::TextDecoration,
        short_attribute: "textdecoration",
        default: Some("none solid rgb(0, 0, 0)"),
        values_to_exclude: &["none"],
        is_numeric: false,
    },
    StyleSpec {
        key: StyleKey::Opacity,
        short_attribute: "opacity",
        default: Some("1"),
        values_to_exclude: &["1"],
        is_numeric: false,
    },
    StyleSpec {
        key: StyleKey::Visibility,
        short_attribute: "visibility",
        default: Some("visible"),
        values_to_exclude: &["visible"],
        is_numeric: false,
    },
];

/// Normalized style values of a single element.
///
/// A key with no entry was skipped during extraction; an entry holding an
/// empty string means the value carried no information.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputedStyles {
    values: [Option<String>; StyleKey::COUNT],
}

impl ComputedStyles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: StyleKey) -> Option<&str> {
        self.values[key as usize].as_deref()
    }

    pub fn insert(&mut self, key: StyleKey, value: impl Into<String>) {
        self.values[key as usize] = Some(value.into());
    }

    pub fn contains(&self, key: StyleKey) -> bool {
        self.values[key as usize].is_some()
    }

    /// Entries in table order
    pub fn iter(&self) -> impl Iterator<Item = (StyleKey, &str)> {
        StyleKey::ALL
            .into_iter()
            .filter_map(move |key| self.get(key).map(|value| (key, value)))
    }
}

/// Last emitted value per key, carried forward in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDelta {
    previous: [Option<String>; StyleKey::COUNT],
}

impl StyleDelta {
    /// Empty table: the first non-empty value of every key is emitted
    pub fn new() -> Self {
        Self::default()
    }

    /// Table seeded with each key's default
    pub fn seeded() -> Self {
        let mut delta = Self::new();
        for spec in &STYLE_SPECS {
            delta.previous[spec.key as usize] = spec.default.map(str::to_string);
        }
        delta
    }

    pub fn get(&self, key: StyleKey) -> Option<&str> {
        self.previous[key as usize].as_deref()
    }

    /// Whether `value` differs from what was last recorded for `key`
    pub fn should_emit(&self, key: StyleKey, value: &str) -> bool {
        !value.is_empty() && self.get(key) != Some(value)
    }

    /// Record an emitted value; empty values never overwrite the table
    pub fn record(&mut self, key: StyleKey, value: &str) {
        if !value.is_empty() {
            self.previous[key as usize] = Some(value.to_string());
        }
    }
}
