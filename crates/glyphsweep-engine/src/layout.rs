#![forbid(unsafe_code)]

//! Phase layouts.
//!
//! [`build_lines`] is a pure function from (phase, display values, grid
//! dimensions) to an ordered list of text lines. No randomness, no state;
//! calling it twice with the same arguments yields the same lines. The
//! engine writes the result into cell targets on each sweep trigger.
//!
//! Row positions are computed around the vertical middle `mid = rows / 2`.
//! Lines that land outside the grid (above row 0 or at/past the bottom
//! edge) are dropped whole, not clipped.

use unicode_width::UnicodeWidthStr;

/// Pipeline phase driving which layout is shown.
///
/// Unrecognized phase strings map to [`Phase::Idle`], which renders a blank
/// frame (pure noise, nothing to resolve).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    Extracting,
    Researching,
    Generating,
    Complete,
    #[default]
    Idle,
}

impl Phase {
    /// Parse a pipeline status string. Unknown values become [`Phase::Idle`].
    #[must_use]
    pub fn parse(status: &str) -> Self {
        match status {
            "extracting" => Self::Extracting,
            "researching" => Self::Researching,
            "generating" => Self::Generating,
            "complete" => Self::Complete,
            _ => Self::Idle,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Extracting => "extracting",
            Self::Researching => "researching",
            Self::Generating => "generating",
            Self::Complete => "complete",
            Self::Idle => "idle",
        }
    }
}

/// One piece of layout output, consumed by the sweep trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub row: usize,
    pub col: usize,
    pub text: String,
    /// Bright lines paint at emphasis opacity once resolved.
    pub bright: bool,
}

/// Horizontal centering: `max(0, (cols - width) / 2)`, flooring, so odd
/// leftover width leans left.
#[must_use]
pub fn center_col(text: &str, cols: usize) -> usize {
    let width = text.width() as i64;
    ((cols as i64 - width) / 2).max(0) as usize
}

/// Decorative horizontal rule of box-drawing dashes.
#[must_use]
fn rule(len: usize) -> String {
    "─".repeat(len)
}

/// Currency label for revenue at risk.
///
/// Values of a million and up render with one decimal in millions
/// (`$1.3M ARR AT RISK`); below that, rounded whole thousands
/// (`$420K ARR AT RISK`).
#[must_use]
pub fn format_arr(amount: f64) -> String {
    if amount >= 1_000_000.0 {
        format!("${:.1}M ARR AT RISK", amount / 1_000_000.0)
    } else {
        format!("${}K ARR AT RISK", (amount / 1000.0).round() as i64)
    }
}

/// A line placed before bounds filtering; `row` may be off-grid.
struct Placed {
    row: i64,
    text: String,
    bright: bool,
}

fn centered(text: impl Into<String>, row: i64, bright: bool) -> Placed {
    Placed {
        row,
        text: text.into(),
        bright,
    }
}

/// Compute the layout for one phase.
///
/// Missing required values (`top_theme` for researching/generating,
/// `recommendation` for complete) yield an empty list — a blank frame, not
/// an error.
#[must_use]
pub fn build_lines(
    phase: Phase,
    cols: usize,
    rows: usize,
    top_theme: Option<&str>,
    arr_at_risk: Option<f64>,
    recommendation: Option<&str>,
) -> Vec<Line> {
    let mid = (rows / 2) as i64;
    let max_rule = cols.saturating_sub(4);

    let placed: Vec<Placed> = match phase {
        Phase::Extracting => vec![
            centered("SCANNING CUSTOMER SIGNALS", mid - 1, false),
            centered("EXTRACTING THEMES", mid + 1, false),
        ],

        Phase::Researching => match top_theme {
            Some(theme) => {
                let t = theme.to_uppercase();
                let b = rule((t.width() + 6).min(max_rule));
                // Label sits one row above the top rule; the theme row is
                // two rows under the label but only one above the bottom
                // rule. Keep this asymmetry.
                vec![
                    centered("TOP THEME IDENTIFIED", mid - 3, false),
                    centered(b.clone(), mid - 2, false),
                    centered(t, mid, true),
                    centered(b, mid + 2, false),
                ]
            }
            None => Vec::new(),
        },

        Phase::Generating => match top_theme {
            Some(theme) => {
                let t = theme.to_uppercase();
                let arr = arr_at_risk.map(format_arr).unwrap_or_default();
                let b = rule((t.width().max(arr.width()) + 6).min(max_rule));
                vec![
                    centered(b.clone(), mid - 3, false),
                    centered(t, mid - 1, true),
                    centered(arr, mid + 1, true),
                    centered(b, mid + 3, false),
                ]
            }
            None => Vec::new(),
        },

        Phase::Complete => match recommendation {
            Some(rec) => {
                let parts: Vec<&str> = rec.split('\n').filter(|p| !p.is_empty()).collect();
                let total_height = parts.len() as i64 * 2 - 1;
                let start_row = mid - total_height / 2;
                parts
                    .iter()
                    .enumerate()
                    .map(|(i, p)| {
                        let bright = p.starts_with("BUILD") || p.starts_with('+');
                        centered(p.to_uppercase(), start_row + i as i64 * 2, bright)
                    })
                    .collect()
            }
            None => Vec::new(),
        },

        Phase::Idle => Vec::new(),
    };

    placed
        .into_iter()
        .filter(|p| p.row >= 0 && (p.row as usize) < rows)
        .map(|p| Line {
            row: p.row as usize,
            col: center_col(&p.text, cols),
            text: p.text,
            bright: p.bright,
        })
        .collect()
}
