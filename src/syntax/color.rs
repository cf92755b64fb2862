//! `rgb()`/`rgba()` to `#rrggbb` compression

use regex::{Captures, Regex};
use std::sync::LazyLock;

static TRANSPARENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)rgba?\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*,\s*(0)\s*\)")
        .expect("TRANSPARENT_RE: hardcoded regex is valid")
});

static COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)rgba?\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*(?:,\s*(1|0?\.\d+))?\s*\)")
        .expect("COLOR_RE: hardcoded regex is valid")
});

/// Replace every opaque color token in `value` with its hex form.
///
/// Returns `None` when any token has an alpha of exactly `0`; the whole value
/// is invisible and should not be emitted. Translucent tokens are left as-is.
pub fn compress_colors(value: &str) -> Option<String> {
    if TRANSPARENT_RE.is_match(value) {
        return None;
    }

    let compressed = COLOR_RE.replace_all(value, |caps: &Captures| compress_token(caps));
    Some(compressed.into_owned())
}

fn compress_token(caps: &Captures) -> String {
    let original = caps[0].to_string();

    let alpha = match caps.get(4) {
        Some(alpha) => alpha.as_str().parse::<f64>().unwrap_or(1.0),
        None => 1.0,
    };
    if alpha < 1.0 {
        return original;
    }

    // Channels outside 0..=255 have no hex form; the token stays as written
    let channel = |index: usize| caps[index].parse::<u8>().ok().map(u32::from);
    let (Some(r), Some(g), Some(b)) = (channel(1), channel(2), channel(3)) else {
        return original;
    };

    // The leading 1 pads the value to seven hex digits and is dropped again
    let packed = (1u32 << 24) + (r << 16) + (g << 8) + b;
    let hex = format!("{:x}", packed);
    format!("#{}", &hex[1..])
}
