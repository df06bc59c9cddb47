//! Conversions between library types and slint types.

use slint::{Rgba8Pixel, SharedPixelBuffer};

/// Build a slint image from tightly packed RGBA8 pixels.
pub fn image_from_rgba(rgba: &[u8], width: u32, height: u32) -> slint::Image {
    let buffer = SharedPixelBuffer::<Rgba8Pixel>::clone_from_slice(rgba, width, height);
    slint::Image::from_rgba8(buffer)
}

/// Parse a hex color string (e.g., "#ff0000") to a Slint Color
pub fn parse_color(hex: &str) -> Option<slint::Color> {
    let hex = hex.trim_start_matches('#');
    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(slint::Color::from_rgb_u8(r, g, b))
    } else {
        None
    }
}

/// Human-readable rendering of a roster's first row.
pub fn format_sample_row(row: &[(String, String)]) -> String {
    row.iter()
        .map(|(header, value)| format!("{header}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
