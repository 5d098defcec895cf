//! Runtime theme and the built-in palettes
//!
//! Themes are picked by name from `[ui.theme]`; individual semantic colors can
//! be overridden with hex strings.

use glidepath_core::config::ThemeConfig;
use ratatui::style::Color;
use tracing::warn;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub surface: Color,
    pub border: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    /// Steps and connectors already passed
    pub complete: Color,
    /// The step in progress
    pub active: Color,
    /// Steps not reached yet
    pub pending: Color,
    /// Traveling highlight on a connector
    pub pulse: Color,
    pub pupil: Color,
}

impl Default for Theme {
    fn default() -> Self {
        gruvbox_dark()
    }
}

fn gruvbox_dark() -> Theme {
    Theme {
        bg: Color::Rgb(0x28, 0x28, 0x28),
        surface: Color::Rgb(0x32, 0x30, 0x2f),
        border: Color::Rgb(0x50, 0x49, 0x45),
        fg: Color::Rgb(0xd4, 0xbe, 0x98),
        muted: Color::Rgb(0x92, 0x83, 0x74),
        accent: Color::Rgb(0x89, 0xb4, 0x82),
        complete: Color::Rgb(0xa9, 0xb6, 0x65),
        active: Color::Rgb(0xd8, 0xa6, 0x57),
        pending: Color::Rgb(0x7c, 0x6f, 0x64),
        pulse: Color::Rgb(0xe7, 0x8a, 0x4e),
        pupil: Color::Rgb(0xdd, 0xc7, 0xa1),
    }
}

fn nord() -> Theme {
    Theme {
        bg: Color::Rgb(0x2e, 0x34, 0x40),
        surface: Color::Rgb(0x3b, 0x42, 0x52),
        border: Color::Rgb(0x4c, 0x56, 0x6a),
        fg: Color::Rgb(0xec, 0xef, 0xf4),
        muted: Color::Rgb(0x5e, 0x68, 0x7a),
        accent: Color::Rgb(0x8f, 0xbc, 0xbb),
        complete: Color::Rgb(0xa3, 0xbe, 0x8c),
        active: Color::Rgb(0xeb, 0xcb, 0x8b),
        pending: Color::Rgb(0x4c, 0x56, 0x6a),
        pulse: Color::Rgb(0x88, 0xc0, 0xd0),
        pupil: Color::Rgb(0xe5, 0xe9, 0xf0),
    }
}

fn dracula() -> Theme {
    Theme {
        bg: Color::Rgb(0x28, 0x2a, 0x36),
        surface: Color::Rgb(0x21, 0x22, 0x2c),
        border: Color::Rgb(0x44, 0x47, 0x5a),
        fg: Color::Rgb(0xf8, 0xf8, 0xf2),
        muted: Color::Rgb(0x62, 0x72, 0xa4),
        accent: Color::Rgb(0xbd, 0x93, 0xf9),
        complete: Color::Rgb(0x50, 0xfa, 0x7b),
        active: Color::Rgb(0xf1, 0xfa, 0x8c),
        pending: Color::Rgb(0x62, 0x72, 0xa4),
        pulse: Color::Rgb(0xff, 0x79, 0xc6),
        pupil: Color::Rgb(0xe9, 0xe9, 0xea),
    }
}

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Load a theme by name from config
pub fn load_theme(config: &ThemeConfig) -> Theme {
    let mut theme = match config.name.to_lowercase().as_str() {
        "gruvbox" | "gruvbox-dark" => gruvbox_dark(),
        "nord" => nord(),
        "dracula" => dracula(),
        other => {
            warn!("Unknown theme '{}', using gruvbox-dark", other);
            gruvbox_dark()
        }
    };

    let overrides = [
        (&config.accent, &mut theme.accent),
        (&config.complete, &mut theme.complete),
        (&config.pending, &mut theme.pending),
        (&config.pulse, &mut theme.pulse),
    ];
    for (hex, slot) in overrides {
        if let Some(hex) = hex {
            match parse_hex_color(hex) {
                Some(color) => *slot = color,
                None => warn!("Invalid theme color '{}', keeping default", hex),
            }
        }
    }
    theme
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("0f0"), Some(Color::Rgb(0, 255, 0)));
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("zzzzzz"), None);
    }

    #[test]
    fn test_load_theme_with_override() {
        let config = ThemeConfig {
            name: "nord".to_string(),
            pulse: Some("#010203".to_string()),
            ..ThemeConfig::default()
        };
        let theme = load_theme(&config);
        assert_eq!(theme.pulse, Color::Rgb(1, 2, 3));
        assert_eq!(theme.bg, nord().bg);
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let config = ThemeConfig {
            name: "no-such-theme".to_string(),
            ..ThemeConfig::default()
        };
        assert_eq!(load_theme(&config).bg, gruvbox_dark().bg);
    }
}
