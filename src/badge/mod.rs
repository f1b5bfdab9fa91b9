//! Badge Module
//!
//! Turns a count into an SVG image of fixed-width digit tiles.

mod theme;

pub use theme::{Theme, DEFAULT_THEME};

// == Public Constants ==
/// Digits shown when no width is requested
pub const DEFAULT_PLACES: usize = 7;

/// Upper bound on requested width
pub const MAX_PLACES: usize = 16;

const TILE_WIDTH: usize = 45;
const TILE_HEIGHT: usize = 100;

// == Pad Digits ==
/// Left-pads `display` with zeros to `length` characters. Longer values are
/// kept whole.
pub fn pad_digits(display: &str, length: usize) -> String {
    format!("{:0>width$}", display, width = length)
}

// == Render ==
/// Renders `display` as an SVG badge in the given theme.
pub fn render(display: &str, theme: &Theme, length: usize) -> String {
    let digits = pad_digits(display, length);
    let count = digits.chars().count();
    let width = TILE_WIDTH * count;

    let mut svg = String::with_capacity(256 + count * 320);
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><svg width="{w}" height="{h}" version="1.1" xmlns="http://www.w3.org/2000/svg"><title>{title}</title><g>"#,
        w = width,
        h = TILE_HEIGHT,
        title = digits,
    ));

    for (i, ch) in digits.chars().enumerate() {
        let x = i * TILE_WIDTH;
        svg.push_str(&format!(
            r#"<rect x="{rx}" y="2" width="{rw}" height="{rh}" rx="8" fill="{fill}" stroke="{stroke}" stroke-width="3"/><text x="{tx}" y="{ty}" font-family="monospace" font-size="56" font-weight="bold" text-anchor="middle" fill="{digit}">{ch}</text>"#,
            rx = x + 2,
            rw = TILE_WIDTH - 4,
            rh = TILE_HEIGHT - 4,
            fill = theme.tile,
            stroke = theme.border,
            tx = x + TILE_WIDTH / 2,
            ty = TILE_HEIGHT / 2 + 20,
            digit = theme.digit,
            ch = ch,
        ));
    }

    svg.push_str("</g></svg>");
    svg
}
