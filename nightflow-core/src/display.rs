//! Presentation helpers for renderers: sign → display class and cell text.
//!
//! Nothing here feeds back into metric computation.

use crate::metrics::{CoMovement, PairedValue};
use serde::{Deserialize, Serialize};

/// Styling bucket for a signed value. Net buying / rising is `Up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayClass {
    Up,
    Down,
}

impl DisplayClass {
    /// CSS class name used by HTML renderers.
    pub fn css_class(&self) -> &'static str {
        match self {
            DisplayClass::Up => "up",
            DisplayClass::Down => "down",
        }
    }
}

/// `Up` for positive, `Down` for negative, unstyled for zero or NaN.
pub fn display_class(value: f64) -> Option<DisplayClass> {
    if value > 0.0 {
        Some(DisplayClass::Up)
    } else if value < 0.0 {
        Some(DisplayClass::Down)
    } else {
        None
    }
}

/// Signed whole number with thousands grouping: `+1,234`, `-50`, `+0`.
pub fn format_flow(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { '-' } else { '+' };
    format!("{sign}{}", group_thousands(&format!("{:.0}", rounded.abs())))
}

/// Unsigned number with grouping and fixed decimals: `2,650.31`.
pub fn format_level(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };
    let sign = if value < 0.0 && text.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{sign}{}.{frac}", group_thousands(int_part)),
        None => format!("{sign}{}", group_thousands(int_part)),
    }
}

/// Signed percentage with two decimals: `+1.00%`, `-1.98%`.
pub fn format_pct(value: f64) -> String {
    format!("{value:+.2}%")
}

/// Cell text for the next-day side of a comparison row.
pub fn format_paired(value: &PairedValue) -> String {
    match value {
        PairedValue::Flow { value } => format_flow(*value),
        PairedValue::Index { level, change_pct } => {
            format!("{} ({})", format_level(*level, 2), format_pct(*change_pct))
        }
    }
}

/// Probability text, or a fixed marker when the slice was empty.
pub fn format_probability(result: Option<&CoMovement>) -> String {
    match result {
        Some(c) => format_pct(c.probability_pct),
        None => "undefined".to_string(),
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
