//! Badge Themes
//!
//! Named colour palettes for the counter badge.

// == Theme ==
/// Colours used to draw one badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    /// Tile fill
    pub tile: &'static str,
    /// Tile outline
    pub border: &'static str,
    /// Digit glyph colour
    pub digit: &'static str,
}

/// Theme used when none, or an unknown one, is requested.
pub const DEFAULT_THEME: &str = "moebooru";

static THEMES: &[Theme] = &[
    Theme {
        name: "moebooru",
        tile: "#fdf6e3",
        border: "#e8a0bf",
        digit: "#d6336c",
    },
    Theme {
        name: "rule34",
        tile: "#aae5a4",
        border: "#006ffa",
        digit: "#004a99",
    },
    Theme {
        name: "gelbooru",
        tile: "#ffffff",
        border: "#0773fb",
        digit: "#0773fb",
    },
    Theme {
        name: "asoul",
        tile: "#2b2d42",
        border: "#9d8df1",
        digit: "#f8f7ff",
    },
];

impl Theme {
    // == Lookup ==
    /// Returns the theme called `name`, or the default theme.
    pub fn by_name(name: &str) -> &'static Theme {
        THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .unwrap_or(&THEMES[0])
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        THEMES.iter().map(|t| t.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_is_first() {
        assert_eq!(THEMES[0].name, DEFAULT_THEME);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(Theme::by_name("GelBooru").name, "gelbooru");
    }

    #[test]
    fn test_unknown_falls_back() {
        assert!(!Theme::names().any(|n| n == "nope"));
        assert_eq!(Theme::by_name("nope").name, DEFAULT_THEME);
    }
}
