// Language -> swatch color, GitHub linguist-ish palette

/// Used for unknown languages and repos with no detected language
pub const DEFAULT_LANGUAGE_COLOR: &str = "#8b949e";

const LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("JavaScript", "#f1e05a"),
    ("TypeScript", "#2b7489"),
    ("Python", "#3572A5"),
    ("Java", "#b07219"),
    ("C++", "#f34b7d"),
    ("C", "#555555"),
    ("C#", "#239120"),
    ("PHP", "#4F5D95"),
    ("Ruby", "#701516"),
    ("Go", "#00ADD8"),
    ("Rust", "#dea584"),
    ("Swift", "#ffac45"),
    ("Kotlin", "#F18E33"),
    ("Dart", "#00B4AB"),
    ("HTML", "#e34c26"),
    ("CSS", "#1572B6"),
    ("Vue", "#4FC08D"),
    ("React", "#61DAFB"),
    ("Angular", "#DD0031"),
    ("Svelte", "#ff3e00"),
    ("Shell", "#89e051"),
    ("PowerShell", "#012456"),
    ("Dockerfile", "#384d54"),
    ("YAML", "#cb171e"),
    ("JSON", "#292929"),
    ("Markdown", "#083fa1"),
];

/// Hex color for a language name. Total: anything unmapped gets the default.
pub fn language_color(language: Option<&str>) -> &'static str {
    language
        .and_then(|lang| {
            LANGUAGE_COLORS
                .iter()
                .find(|(name, _)| *name == lang)
                .map(|(_, color)| *color)
        })
        .unwrap_or(DEFAULT_LANGUAGE_COLOR)
}

/// Split `#rrggbb` into components
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }

    let value = u32::from_str_radix(digits, 16).ok()?;
    Some((
        ((value >> 16) & 0xFF) as u8,
        ((value >> 8) & 0xFF) as u8,
        (value & 0xFF) as u8,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_languages() {
        assert_eq!(language_color(Some("Rust")), "#dea584");
        assert_eq!(language_color(Some("C#")), "#239120");
        assert_eq!(language_color(Some("Markdown")), "#083fa1");
    }

    #[test]
    fn test_unknown_and_absent_fall_back() {
        assert_eq!(language_color(None), DEFAULT_LANGUAGE_COLOR);
        assert_eq!(language_color(Some("Cobol")), DEFAULT_LANGUAGE_COLOR);
        assert_eq!(language_color(Some("")), DEFAULT_LANGUAGE_COLOR);
        // Lookup is exact, like the GitHub API's casing
        assert_eq!(language_color(Some("rust")), DEFAULT_LANGUAGE_COLOR);
    }

    #[test]
    fn test_every_palette_entry_parses() {
        for (name, color) in LANGUAGE_COLORS {
            assert!(hex_to_rgb(color).is_some(), "{name} has bad color {color}");
        }
        assert_eq!(hex_to_rgb("#dea584"), Some((0xde, 0xa5, 0x84)));
        assert_eq!(hex_to_rgb("dea584"), None);
        assert_eq!(hex_to_rgb("#fff"), None);
    }
}
