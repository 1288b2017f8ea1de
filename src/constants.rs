//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1200.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 800.0;

/// Window title
pub const WINDOW_TITLE: &str = "Notes + Drawing (Dark Notes, White Canvas)";

/// Default canvas width in pixels (fixed for the lifetime of the surface)
pub const DEFAULT_CANVAS_WIDTH: u32 = 2000;

/// Default canvas height in pixels (fixed for the lifetime of the surface)
pub const DEFAULT_CANVAS_HEIGHT: u32 = 2000;

/// Largest canvas edge accepted from the config file
pub const MAX_CANVAS_DIMENSION: u32 = 8192;

/// Pen stroke width in pixels
pub const PEN_WIDTH: f32 = 3.0;

/// Highlighter stroke width in pixels
pub const HIGHLIGHTER_WIDTH: f32 = 20.0;

/// Eraser stroke width in pixels
pub const ERASER_WIDTH: f32 = 20.0;

/// Alpha applied to the base color to get the highlighter color
pub const HIGHLIGHTER_ALPHA: u8 = 128;

/// Default notes font size in points
pub const DEFAULT_NOTES_FONT_SIZE: f32 = 14.0;

/// Notes font size bounds for the zoom shortcuts
pub const MIN_NOTES_FONT_SIZE: f32 = 6.0;
pub const MAX_NOTES_FONT_SIZE: f32 = 72.0;

/// Font size change per zoom shortcut press
pub const NOTES_ZOOM_STEP: f32 = 1.0;

/// Snapshot size used when the notes panel has no usable size yet
pub const FALLBACK_SNAPSHOT_WIDTH: u32 = 400;
pub const FALLBACK_SNAPSHOT_HEIGHT: u32 = 300;

/// A4 page size in PDF points (1/72 inch)
pub const PDF_PAGE_WIDTH_PT: f32 = 595.28;
pub const PDF_PAGE_HEIGHT_PT: f32 = 841.89;

/// PDF page margin (10 mm) in points
pub const PDF_MARGIN_PT: f32 = 28.35;

/// Resolution images are resampled to before embedding in the PDF
pub const PDF_IMAGE_DPI: f32 = 150.0;

/// JPEG quality for images embedded in the PDF
pub const PDF_JPEG_QUALITY: u8 = 90;
