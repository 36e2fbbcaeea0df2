use crate::models::{Palette, Style};
use crate::services::presets;

/// Palettes never drop below this many colors
pub const MIN_COLORS: usize = 4;
/// Palettes are truncated to this many colors
pub const MAX_COLORS: usize = 8;

const FALLBACK_COLORS: [&str; 4] = ["navy", "white", "black", "grey"];

/// Normalizes raw style tags against the fixed vocabulary
///
/// Unknown tags are dropped, duplicates collapsed, and at most two styles kept.
/// Defaults to casual when nothing matches.
pub fn normalize_styles(raw: &[String]) -> Vec<Style> {
    let mut styles: Vec<Style> = Vec::new();
    for style in raw.iter().filter_map(|s| s.parse::<Style>().ok()) {
        if !styles.contains(&style) {
            styles.push(style);
        }
    }
    if styles.is_empty() {
        styles.push(Style::Casual);
    }
    styles.truncate(2);
    styles
}

/// Derives the working palette from style presets and favorite colors
pub fn resolve_palette(styles: &[Style], favorites: Option<&[String]>) -> Palette {
    let mut colors: Vec<String> = Vec::new();

    for favorite in favorites.unwrap_or_default() {
        push_unique(&mut colors, &favorite.trim().to_lowercase());
    }

    for style in styles {
        for color in presets::style_palette(*style) {
            push_unique(&mut colors, color);
        }
    }

    for color in FALLBACK_COLORS {
        if colors.len() >= MIN_COLORS {
            break;
        }
        push_unique(&mut colors, color);
    }

    colors.truncate(MAX_COLORS);
    Palette { colors }
}

fn push_unique(colors: &mut Vec<String>, color: &str) {
    if !color.is_empty() && !colors.iter().any(|c| c == color) {
        colors.push(color.to_string());
    }
}
