//! Colour assignment for chart series and categories.
use serde::{Deserialize, Serialize};

/// Fixed series palette, in assignment order.
pub const PALETTE: [&str; 15] = [
    "#2563eb", "#f97316", "#10b981", "#ef4444", "#8b5cf6",
    "#eab308", "#06b6d4", "#ec4899", "#84cc16", "#6366f1",
    "#14b8a6", "#f59e0b", "#a855f7", "#64748b", "#0ea5e9",
];

/// First and second category colours used in gender mode.
pub const GENDER_COLORS: [&str; 2] = ["#3b82f6", "#ec4899"];

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Palette,
    Gender,
}

/// Returns the colours for `count` categories.
///
/// Gender mode always yields exactly two colours, whatever `count` is.
pub fn assign_colors(count: usize, mode: ColorMode) -> Vec<String> {
    match mode {
        ColorMode::Palette => (0..count)
            .map(|i| PALETTE[i % PALETTE.len()].to_string())
            .collect(),
        ColorMode::Gender => GENDER_COLORS.iter().map(|c| c.to_string()).collect(),
    }
}

/// Fixed colour for a recognised demographic label (exact, case-sensitive).
pub fn semantic_color(label: &str) -> Option<&'static str> {
    match label {
        "Male" | "Men" => Some(GENDER_COLORS[0]),
        "Female" | "Women" => Some(GENDER_COLORS[1]),
        _ => None,
    }
}

/// Colour for the series at `index`, preferring a semantic match on its label.
pub fn series_color(label: &str, index: usize) -> &'static str {
    semantic_color(label).unwrap_or(PALETTE[index % PALETTE.len()])
}
