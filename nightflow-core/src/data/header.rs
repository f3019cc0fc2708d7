//! Leading-row detection: unit/label banners and blank spacer rows that sit
//! between the header row and the first data row.

use serde::{Deserialize, Serialize};

/// Predicate over a row, judged by its first cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowMatcher {
    /// First cell equals one of `exact`, or contains one of `contains`.
    FirstCellMarker {
        #[serde(default)]
        exact: Vec<String>,
        #[serde(default)]
        contains: Vec<String>,
    },
    /// First cell is absent, empty, or a missing-value token.
    FirstCellBlank,
}

impl RowMatcher {
    pub fn matches(&self, row: &[String], missing_tokens: &[String]) -> bool {
        let first = row.first().map(|c| c.trim()).unwrap_or("");
        match self {
            RowMatcher::FirstCellMarker { exact, contains } => {
                exact.iter().any(|m| m == first)
                    || contains.iter().any(|m| !m.is_empty() && first.contains(m.as_str()))
            }
            RowMatcher::FirstCellBlank => is_missing(first, missing_tokens),
        }
    }
}

/// Drop the current first row while it matches, at most `max_skips` times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadingRowRule {
    pub matcher: RowMatcher,
    #[serde(default = "default_max_skips")]
    pub max_skips: usize,
}

fn default_max_skips() -> usize {
    1
}

impl LeadingRowRule {
    /// The stock rules: one unit/label banner, then one blank row.
    pub fn defaults() -> Vec<LeadingRowRule> {
        vec![
            LeadingRowRule {
                matcher: RowMatcher::FirstCellMarker {
                    exact: vec!["단위".into(), "UNIT".into(), "구분".into()],
                    contains: vec!["단위".into()],
                },
                max_skips: 1,
            },
            LeadingRowRule {
                matcher: RowMatcher::FirstCellBlank,
                max_skips: 1,
            },
        ]
    }
}

/// Apply `rules` in order to the front of `rows`. Returns how many rows were
/// removed; the remaining rows are returned as a sub-slice.
pub fn skip_leading_rows<'a>(
    rows: &'a [Vec<String>],
    rules: &[LeadingRowRule],
    missing_tokens: &[String],
) -> (&'a [Vec<String>], usize) {
    let mut skipped = 0;
    for rule in rules {
        let mut taken = 0;
        while taken < rule.max_skips {
            match rows.get(skipped) {
                Some(row) if rule.matcher.matches(row, missing_tokens) => {
                    tracing::debug!(row = ?row.first(), rule = ?rule.matcher, "skipping leading row");
                    skipped += 1;
                    taken += 1;
                }
                _ => break,
            }
        }
    }
    (&rows[skipped..], skipped)
}

/// True when a trimmed cell carries no value.
pub fn is_missing(cell: &str, missing_tokens: &[String]) -> bool {
    let cell = cell.trim();
    cell.is_empty() || missing_tokens.iter().any(|t| t == cell)
}
