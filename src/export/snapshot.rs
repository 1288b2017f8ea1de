//! Capturing the notes panel for the PDF.
//!
//! egui has no offscreen rendering of a single widget, so the whole window is
//! captured through bevy's screenshot pipeline and cropped to the rect the
//! notes editor occupied. The capture arrives a frame or two later through an
//! observer, which then hands the pixels to the PDF writer task.

use bevy::prelude::*;
use bevy::render::view::screenshot::{Screenshot, ScreenshotCaptured};
use bevy::tasks::IoTaskPool;
use image::{imageops, Rgb, Rgba, RgbaImage};
use std::path::PathBuf;

use super::pdf::{self, PageLayout};
use super::{files, ExportError, ExportKind, ExportResult, ExportTask};
use crate::canvas::DrawingSurface;
use crate::constants::{FALLBACK_SNAPSHOT_HEIGHT, FALLBACK_SNAPSHOT_WIDTH};
use crate::notes::NotesViewport;
use crate::theme::NOTES_BACKGROUND_RGB;

/// PDF export waiting for its window capture
#[derive(Resource, Default)]
pub struct PendingPdfExport {
    pub path: Option<PathBuf>,
}

fn notes_background() -> Rgba<u8> {
    let [r, g, b] = NOTES_BACKGROUND_RGB;
    Rgba([r, g, b, 255])
}

/// Crop `region` (x, y, width, height in physical pixels) out of a window
/// capture onto the notes background.
///
/// Without a capture or a usable region the result is a blank
/// 400x300 background image.
pub fn notes_snapshot(
    capture: Option<&RgbaImage>,
    region: Option<(u32, u32, u32, u32)>,
) -> RgbaImage {
    let fallback =
        || RgbaImage::from_pixel(FALLBACK_SNAPSHOT_WIDTH, FALLBACK_SNAPSHOT_HEIGHT, notes_background());

    let (Some(capture), Some((x, y, width, height))) = (capture, region) else {
        return fallback();
    };
    if x >= capture.width() || y >= capture.height() {
        return fallback();
    }
    let width = width.min(capture.width() - x);
    let height = height.min(capture.height() - y);
    if width == 0 || height == 0 {
        return fallback();
    }

    let mut snapshot = RgbaImage::from_pixel(width, height, notes_background());
    let cropped = imageops::crop_imm(capture, x, y, width, height).to_image();
    imageops::overlay(&mut snapshot, &cropped, 0, 0);
    snapshot
}

/// Request a capture of the primary window for the PDF at `path`.
pub fn request_notes_capture(commands: &mut Commands, pending: &mut PendingPdfExport, path: PathBuf) {
    pending.path = Some(path);
    commands
        .spawn(Screenshot::primary_window())
        .observe(on_notes_captured);
}

fn on_notes_captured(
    captured: On<ScreenshotCaptured>,
    mut commands: Commands,
    mut pending: ResMut<PendingPdfExport>,
    viewport: Res<NotesViewport>,
    surface: Option<Res<DrawingSurface>>,
) {
    let Some(path) = pending.path.take() else {
        return;
    };

    let capture = match captured.image.clone().try_into_dynamic() {
        Ok(dynamic) => Some(dynamic.to_rgba8()),
        Err(e) => {
            warn!("Window capture unusable, exporting blank notes: {}", e);
            None
        }
    };
    let region = viewport.physical_rect();
    if region.is_none() {
        debug!("Notes panel has no usable size, using blank snapshot");
    }
    let notes = notes_snapshot(capture.as_ref(), region);

    let task_pool = IoTaskPool::get();
    let task = match surface {
        Some(surface) => {
            let canvas = surface.image().clone();
            let [r, g, b, _] = surface.background().0;
            let [nr, ng, nb] = NOTES_BACKGROUND_RGB;
            task_pool.spawn(async move {
                let result = pdf::compose(
                    &PageLayout::a4(),
                    &notes,
                    Rgb([nr, ng, nb]),
                    &canvas,
                    Rgb([r, g, b]),
                )
                .and_then(|bytes| files::write_bytes(&bytes, &path));
                ExportResult {
                    kind: ExportKind::Pdf,
                    result,
                }
            })
        }
        None => task_pool.spawn(async move {
            ExportResult {
                kind: ExportKind::Pdf,
                result: Err(ExportError::Snapshot("canvas is not ready".to_string())),
            }
        }),
    };
    commands.spawn(ExportTask(task));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture() -> RgbaImage {
        RgbaImage::from_fn(100, 80, |x, y| Rgba([x as u8, y as u8, 7, 255]))
    }

    #[test]
    fn test_crops_requested_region() {
        let snapshot = notes_snapshot(Some(&capture()), Some((10, 20, 30, 40)));
        assert_eq!(snapshot.dimensions(), (30, 40));
        assert_eq!(snapshot.get_pixel(0, 0), &Rgba([10, 20, 7, 255]));
        assert_eq!(snapshot.get_pixel(29, 39), &Rgba([39, 59, 7, 255]));
    }

    #[test]
    fn test_region_clipped_to_capture() {
        let snapshot = notes_snapshot(Some(&capture()), Some((90, 70, 50, 50)));
        assert_eq!(snapshot.dimensions(), (10, 10));
    }

    #[test]
    fn test_transparent_capture_shows_background() {
        let transparent = RgbaImage::from_pixel(20, 20, Rgba([255, 0, 0, 0]));
        let snapshot = notes_snapshot(Some(&transparent), Some((0, 0, 5, 5)));
        assert_eq!(snapshot.get_pixel(2, 2), &notes_background());
    }

    #[test]
    fn test_fallback_without_region() {
        let snapshot = notes_snapshot(Some(&capture()), None);
        assert_eq!(snapshot.dimensions(), (400, 300));
        assert!(snapshot.pixels().all(|p| *p == notes_background()));
    }

    #[test]
    fn test_fallback_without_capture() {
        let snapshot = notes_snapshot(None, Some((0, 0, 10, 10)));
        assert_eq!(snapshot.dimensions(), (400, 300));
    }

    #[test]
    fn test_fallback_when_region_outside_capture() {
        let snapshot = notes_snapshot(Some(&capture()), Some((150, 0, 10, 10)));
        assert_eq!(snapshot.dimensions(), (400, 300));
    }
}
