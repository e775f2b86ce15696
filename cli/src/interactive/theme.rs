//! Color palette of the interactive form

use iocraft::prelude::*;

/// RGB palette shared by the terminal UI and the plain-text printer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub primary: (u8, u8, u8),
    pub secondary: (u8, u8, u8),
    pub background: (u8, u8, u8),
    pub text: (u8, u8, u8),
    pub muted: (u8, u8, u8),
    pub danger: (u8, u8, u8),
    pub success: (u8, u8, u8),
    /// Fill of the error panel
    pub error_tint: (u8, u8, u8),
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: (25, 118, 210), // #1976d2
            secondary: (245, 0, 87), // #f50057
            background: (245, 245, 245), // #f5f5f5
            text: (33, 33, 33),
            muted: (117, 117, 117),
            danger: (211, 47, 47), // #d32f2f
            success: (46, 125, 50), // #2e7d32
            error_tint: (255, 235, 238), // #ffebee
        }
    }
}

impl Theme {
    /// Convert one palette entry for iocraft
    pub fn color(rgb: (u8, u8, u8)) -> Color {
        Color::Rgb {
            r: rgb.0,
            g: rgb.1,
            b: rgb.2,
        }
    }

    /// Headline color for a risk class
    pub fn risk_color(&self, high: bool) -> (u8, u8, u8) {
        if high {
            self.danger
        } else {
            self.success
        }
    }

    /// Panels and buttons use rounded corners
    pub fn border_style(&self) -> BorderStyle {
        BorderStyle::Round
    }
}
