//! Colors and typeface shared by every slide.

use serde::{Deserialize, Serialize};

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Upper-case `RRGGBB`, as used by `<a:srgbClr val="..."/>`.
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
pub const BLACK: Color = Color::rgb(0x33, 0x33, 0x33);
pub const DARK: Color = Color::rgb(0x22, 0x22, 0x22);
pub const GRAY: Color = Color::rgb(0x66, 0x66, 0x66);
pub const LIGHT_GRAY: Color = Color::rgb(0xE8, 0xE8, 0xE8);
pub const BLUE: Color = Color::rgb(0x1F, 0x4E, 0x79);
pub const TABLE_HEAD: Color = Color::rgb(0x1F, 0x4E, 0x79);
pub const TABLE_ROW1: Color = Color::rgb(0xF2, 0xF2, 0xF2);
pub const TABLE_ROW2: Color = WHITE;

/// Fill of cards, section boxes and flow steps.
pub const PANEL: Color = Color::rgb(0xF7, 0xF9, 0xFC);

/// Typeface applied to every run.
pub const TYPEFACE: &str = "Calibri";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(BLUE.hex(), "1F4E79");
        assert_eq!(PANEL.hex(), "F7F9FC");
        assert_eq!(Color::rgb(0, 10, 255).hex(), "000AFF");
    }
}
