//! Canvas image and notes text exporters.

use image::{DynamicImage, ImageError, ImageFormat, RgbaImage};
use std::path::{Path, PathBuf};

use super::error::ExportError;
use crate::paths::with_default_extension;

/// Write the canvas buffer in the format implied by the extension.
///
/// A path without extension gets `.png`. Formats without an alpha channel
/// (JPEG) receive the RGB channels only. Returns the path actually written.
pub fn write_canvas_image(image: &RgbaImage, path: &Path) -> Result<PathBuf, ExportError> {
    let path = with_default_extension(path, "png");
    let result = match ImageFormat::from_path(&path) {
        Ok(ImageFormat::Jpeg) => DynamicImage::ImageRgba8(image.clone()).to_rgb8().save(&path),
        _ => image.save(&path),
    };
    result.map_err(|e| match e {
        ImageError::IoError(io) => ExportError::Write {
            path: path.clone(),
            reason: io.to_string(),
        },
        other => ExportError::from(other),
    })?;
    Ok(path)
}

/// Write the notes text verbatim as UTF-8.
pub fn write_notes_text(text: &str, path: &Path) -> Result<PathBuf, ExportError> {
    std::fs::write(path, text.as_bytes()).map_err(|e| ExportError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(path.to_path_buf())
}

/// Write already-encoded bytes (used for the PDF).
pub fn write_bytes(bytes: &[u8], path: &Path) -> Result<PathBuf, ExportError> {
    std::fs::write(path, bytes).map_err(|e| ExportError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CanvasTool, DrawingSurface};
    use crate::theme::CANVAS_BACKGROUND;
    use bevy::math::Vec2;
    use image::Rgba;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("notesketch-test-{}-{}", std::process::id(), name))
    }

    fn sketched_surface() -> DrawingSurface {
        let mut surface = DrawingSurface::new(40, 30, CANVAS_BACKGROUND);
        surface.set_color(Rgba([200, 30, 90, 255]));
        surface.pointer_down(Vec2::new(2.0, 2.0));
        surface.pointer_move(Vec2::new(35.0, 25.0));
        surface.set_tool(CanvasTool::Highlighter);
        surface.pointer_move(Vec2::new(5.0, 25.0));
        surface.pointer_up();
        surface
    }

    #[test]
    fn test_png_export_reloads_identically() {
        let surface = sketched_surface();
        let path = temp_path("roundtrip.png");

        let written = write_canvas_image(surface.image(), &path).unwrap();
        let reloaded = image::open(&written).unwrap().to_rgba8();
        let _ = std::fs::remove_file(&written);

        assert_eq!(&reloaded, surface.image());
    }

    #[test]
    fn test_missing_extension_defaults_to_png() {
        let surface = sketched_surface();
        let path = temp_path("no-extension");

        let written = write_canvas_image(surface.image(), &path).unwrap();
        let format = image::ImageFormat::from_path(&written);
        let exists = written.exists();
        let _ = std::fs::remove_file(&written);

        assert_eq!(written.extension().and_then(|e| e.to_str()), Some("png"));
        assert!(exists);
        assert_eq!(format.ok(), Some(image::ImageFormat::Png));
    }

    #[test]
    fn test_jpeg_export_drops_alpha() {
        let surface = sketched_surface();
        let path = temp_path("canvas.jpg");

        let written = write_canvas_image(surface.image(), &path).unwrap();
        let reloaded = image::open(&written).unwrap();
        let _ = std::fs::remove_file(&written);

        assert_eq!(reloaded.width(), 40);
        assert_eq!(reloaded.height(), 30);
    }

    #[test]
    fn test_unwritable_image_path_is_error() {
        let surface = sketched_surface();
        let path = temp_path("missing-dir").join("canvas.png");
        assert!(write_canvas_image(surface.image(), &path).is_err());
    }

    #[test]
    fn test_notes_text_written_verbatim() {
        let path = temp_path("notes.txt");
        let text = "line one\n2+2=4\nunicode: café ∑\n";

        write_notes_text(text, &path).unwrap();
        let read_back = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(read_back, text);
    }

    #[test]
    fn test_notes_text_error_names_path() {
        let path = temp_path("missing-dir").join("notes.txt");
        let err = write_notes_text("x", &path).unwrap_err();
        assert!(matches!(err, ExportError::Write { .. }));
        assert!(err.to_string().contains("notes.txt"));
    }
}
