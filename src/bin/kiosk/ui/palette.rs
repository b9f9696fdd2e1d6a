//! Light and dark colour schemes

use ratatui::style::Color;

use what_is_music::content::Theme;

/// Brand accent shared by both themes
pub const PRIMARY: Color = Color::Rgb(0x13, 0xc8, 0xec);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    /// Fill for inactive cells and keys
    pub surface: Color,
    pub accent: Color,
    pub alert: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                bg: Color::Rgb(0x10, 0x1f, 0x22),
                fg: Color::Rgb(0xf1, 0xf5, 0xf9),
                muted: Color::Rgb(0x94, 0xa3, 0xb8),
                border: Color::Rgb(0x33, 0x41, 0x55),
                surface: Color::Rgb(0x1e, 0x29, 0x3b),
                accent: PRIMARY,
                alert: Color::Rgb(0xf8, 0x71, 0x71),
            },
            Theme::Light => Self {
                bg: Color::Rgb(0xf6, 0xf8, 0xf8),
                fg: Color::Rgb(0x0f, 0x17, 0x2a),
                muted: Color::Rgb(0x64, 0x74, 0x8b),
                border: Color::Rgb(0xcb, 0xd5, 0xe1),
                surface: Color::Rgb(0xe2, 0xe8, 0xf0),
                accent: PRIMARY,
                alert: Color::Rgb(0xdc, 0x26, 0x26),
            },
        }
    }
}

pub fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}
