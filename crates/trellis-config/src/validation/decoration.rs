//! Decoration validation (border, title bar, color format).

use std::sync::LazyLock;

use regex::Regex;

use super::helpers::validate_range;
use crate::schema::TrellisConfig;

/// `#RRGGBB`, the only color form a border pixel can be built from.
static HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("hex color pattern is valid"));

pub(crate) fn validate_decoration(errors: &mut Vec<String>, config: &TrellisConfig) {
    let decoration = &config.decoration;
    validate_range(
        errors,
        "decoration.border_width",
        decoration.border_width,
        0,
        20,
    );
    validate_range(
        errors,
        "decoration.titlebar_height",
        decoration.titlebar_height,
        0,
        64,
    );
    if !HEX_RE.is_match(&decoration.border_color) {
        errors.push(format!(
            "decoration.border_color = {:?} is not a #RRGGBB color",
            decoration.border_color
        ));
    }
}
