//! Centralized color theme for the application.
//!
//! Canvas colors are raw RGBA pixels; everything drawn by egui uses `Color32`.

use bevy_egui::egui;
use image::Rgba;

// ============================================================================
// Canvas Colors
// ============================================================================

/// Canvas background, also the eraser color
pub const CANVAS_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Default pen color (black)
pub const DEFAULT_PEN_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

// ============================================================================
// Notes Colors
// ============================================================================

/// Dark notes background (#2b2b2b)
pub const NOTES_BACKGROUND_RGB: [u8; 3] = [0x2b, 0x2b, 0x2b];

/// Notes text color
pub const NOTES_TEXT_RGB: [u8; 3] = [0xff, 0xff, 0xff];

// ============================================================================
// UI Colors (egui)
// ============================================================================

pub mod ui {
    use bevy_egui::egui;

    use super::{NOTES_BACKGROUND_RGB, NOTES_TEXT_RGB};

    /// Notes editor background
    pub const NOTES_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(
        NOTES_BACKGROUND_RGB[0],
        NOTES_BACKGROUND_RGB[1],
        NOTES_BACKGROUND_RGB[2],
    );

    /// Notes editor text
    pub const NOTES_TEXT: egui::Color32 =
        egui::Color32::from_rgb(NOTES_TEXT_RGB[0], NOTES_TEXT_RGB[1], NOTES_TEXT_RGB[2]);

    /// Grey behind the canvas when the viewport is larger than the canvas
    pub const VIEWPORT_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(90, 90, 90);

    /// Dark grey panel background (tools dock)
    pub const PANEL_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(45, 45, 48);

    /// Light grey for label text
    pub const LABEL_TEXT: egui::Color32 = egui::Color32::LIGHT_GRAY;

    /// Grey for help/hint text
    pub const HINT_TEXT: egui::Color32 = egui::Color32::GRAY;

    /// Red for error messages
    pub const ERROR_TEXT: egui::Color32 = egui::Color32::RED;
}

// ============================================================================
// Color Conversion Utilities
// ============================================================================

/// Convert a canvas pixel to egui Color32 (preserving alpha)
pub fn rgba_to_egui(color: Rgba<u8>) -> egui::Color32 {
    let [r, g, b, a] = color.0;
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Convert an egui Color32 to an opaque canvas pixel
pub fn egui_to_rgba_opaque(color: egui::Color32) -> Rgba<u8> {
    let [r, g, b, _] = color.to_srgba_unmultiplied();
    Rgba([r, g, b, 255])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notes_background_matches_rgb() {
        assert_eq!(ui::NOTES_BACKGROUND.r(), 0x2b);
        assert_eq!(ui::NOTES_BACKGROUND.g(), 0x2b);
        assert_eq!(ui::NOTES_BACKGROUND.b(), 0x2b);
    }

    #[test]
    fn test_egui_roundtrip_opaque() {
        let pixel = Rgba([12, 34, 56, 255]);
        assert_eq!(egui_to_rgba_opaque(rgba_to_egui(pixel)), pixel);
    }

    #[test]
    fn test_egui_to_rgba_drops_alpha() {
        let color = egui::Color32::from_rgba_unmultiplied(200, 100, 50, 10);
        assert_eq!(egui_to_rgba_opaque(color).0[3], 255);
    }
}
