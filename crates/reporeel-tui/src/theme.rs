// Dark/light palettes. Styling only, no behavior hangs off the theme.
use ratatui::style::Color;
use reporeel_core::colors::hex_to_rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,
    pub title: Color,
    pub subtitle: Color,
    pub muted: Color,
    pub selected_bg: Color,
    pub error: Color,
    pub info: Color,
    pub stars: Color,
    pub forks: Color,
    pub issues: Color,
    pub topic: Color,
    pub liked: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "Dark",
            background: Color::Rgb(0x11, 0x18, 0x27),
            foreground: Color::Rgb(0xf9, 0xfa, 0xfb),
            border: Color::Rgb(0x37, 0x41, 0x51),
            border_focused: Color::Rgb(0x3b, 0x82, 0xf6),
            title: Color::Rgb(0x60, 0xa5, 0xfa),
            subtitle: Color::Rgb(0xd1, 0xd5, 0xdb),
            muted: Color::Rgb(0x9c, 0xa3, 0xaf),
            selected_bg: Color::Rgb(0x1f, 0x29, 0x37),
            error: Color::Rgb(0xf8, 0x71, 0x71),
            info: Color::Rgb(0x93, 0xc5, 0xfd),
            stars: Color::Rgb(0xea, 0xb3, 0x08),
            forks: Color::Rgb(0x3b, 0x82, 0xf6),
            issues: Color::Rgb(0xef, 0x44, 0x44),
            topic: Color::Rgb(0x93, 0xc5, 0xfd),
            liked: Color::Rgb(0xef, 0x44, 0x44),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light",
            background: Color::Rgb(0xf9, 0xfa, 0xfb),
            foreground: Color::Rgb(0x11, 0x18, 0x27),
            border: Color::Rgb(0xd1, 0xd5, 0xdb),
            border_focused: Color::Rgb(0x25, 0x63, 0xeb),
            title: Color::Rgb(0x25, 0x63, 0xeb),
            subtitle: Color::Rgb(0x4b, 0x55, 0x63),
            muted: Color::Rgb(0x6b, 0x72, 0x80),
            selected_bg: Color::Rgb(0xdb, 0xea, 0xfe),
            error: Color::Rgb(0xdc, 0x26, 0x26),
            info: Color::Rgb(0x1d, 0x4e, 0xd8),
            stars: Color::Rgb(0xca, 0x8a, 0x04),
            forks: Color::Rgb(0x25, 0x63, 0xeb),
            issues: Color::Rgb(0xdc, 0x26, 0x26),
            topic: Color::Rgb(0x1d, 0x4e, 0xd8),
            liked: Color::Rgb(0xef, 0x44, 0x44),
        }
    }

    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

/// `#rrggbb` to a terminal color, gray if it doesn't parse
pub fn hex_color(hex: &str) -> Color {
    hex_to_rgb(hex)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::Gray)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_selects_palette() {
        assert_eq!(Theme::for_mode(true).name, "Dark");
        assert_eq!(Theme::for_mode(false).name, "Light");
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#dea584"), Color::Rgb(0xde, 0xa5, 0x84));
        assert_eq!(hex_color("nope"), Color::Gray);
    }
}
