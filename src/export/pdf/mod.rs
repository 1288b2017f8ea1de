//! Single-page A4 PDF: notes snapshot on the top half, canvas on the bottom.

pub mod writer;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage, RgbaImage};

use super::error::ExportError;
use crate::constants::{
    PDF_IMAGE_DPI, PDF_JPEG_QUALITY, PDF_MARGIN_PT, PDF_PAGE_HEIGHT_PT, PDF_PAGE_WIDTH_PT,
};
use writer::{JpegImage, Placement};

const POINTS_PER_INCH: f32 = 72.0;

/// A box on the page in points. `top` is measured from the bottom edge,
/// as PDF coordinates are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    /// Place a `width` x `height` item against the top-left corner.
    pub fn place_top_left(&self, width: f32, height: f32) -> Placement {
        Placement {
            x: self.left,
            y: self.top - height,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::a4()
    }
}

impl PageLayout {
    /// A4 portrait with 10 mm margins
    pub fn a4() -> Self {
        Self {
            page_width: PDF_PAGE_WIDTH_PT,
            page_height: PDF_PAGE_HEIGHT_PT,
            margin: PDF_MARGIN_PT,
        }
    }

    pub fn content(&self) -> Region {
        Region {
            left: self.margin,
            top: self.page_height - self.margin,
            width: self.page_width - 2.0 * self.margin,
            height: self.page_height - 2.0 * self.margin,
        }
    }

    pub fn top_half(&self) -> Region {
        let content = self.content();
        Region {
            height: content.height / 2.0,
            ..content
        }
    }

    pub fn bottom_half(&self) -> Region {
        let content = self.content();
        let half = content.height / 2.0;
        Region {
            top: content.top - half,
            height: half,
            ..content
        }
    }
}

/// Largest size with the source aspect ratio that fits in `max_width` x `max_height`.
pub fn fit_within(width: u32, height: u32, max_width: f32, max_height: f32) -> (f32, f32) {
    if width == 0 || height == 0 {
        return (0.0, 0.0);
    }
    let (w, h) = (width as f32, height as f32);
    let scale = (max_width / w).min(max_height / h);
    (w * scale, h * scale)
}

/// Pixel size to rasterize an image displayed at `width` x `height` points.
/// Never upsamples beyond the source.
fn raster_size(source: (u32, u32), width: f32, height: f32) -> (u32, u32) {
    let scale = PDF_IMAGE_DPI as f32 / POINTS_PER_INCH;
    let target_w = ((width * scale).round() as u32).clamp(1, source.0.max(1));
    let target_h = ((height * scale).round() as u32).clamp(1, source.1.max(1));
    (target_w, target_h)
}

/// Drop alpha by compositing over an opaque background.
fn flatten(image: &RgbaImage, background: Rgb<u8>) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let a = a as u32;
        let mix = |src: u8, dst: u8| ((src as u32 * a + dst as u32 * (255 - a) + 127) / 255) as u8;
        Rgb([
            mix(r, background[0]),
            mix(g, background[1]),
            mix(b, background[2]),
        ])
    })
}

fn encode_jpeg(image: &RgbImage) -> Result<JpegImage, ExportError> {
    let mut data = Vec::new();
    JpegEncoder::new_with_quality(&mut data, PDF_JPEG_QUALITY).encode_image(image)?;
    Ok(JpegImage {
        width: image.width(),
        height: image.height(),
        data,
    })
}

/// Scale `image` into `region`, resample it for print and encode it.
fn prepare(
    image: &RgbaImage,
    region: Region,
    background: Rgb<u8>,
) -> Result<(JpegImage, Placement), ExportError> {
    let (width, height) = fit_within(image.width(), image.height(), region.width, region.height);
    let placement = region.place_top_left(width, height);

    let (raster_w, raster_h) = raster_size(image.dimensions(), width, height);
    let flat = flatten(image, background);
    let resampled = if (raster_w, raster_h) == flat.dimensions() {
        flat
    } else {
        imageops::resize(&flat, raster_w, raster_h, FilterType::Triangle)
    };
    Ok((encode_jpeg(&resampled)?, placement))
}

/// Compose the notes snapshot and the canvas into PDF bytes.
pub fn compose(
    layout: &PageLayout,
    notes: &RgbaImage,
    notes_background: Rgb<u8>,
    canvas: &RgbaImage,
    canvas_background: Rgb<u8>,
) -> Result<Vec<u8>, ExportError> {
    if notes.width() == 0 || canvas.width() == 0 || notes.height() == 0 || canvas.height() == 0 {
        return Err(ExportError::Encode("cannot place an empty image".to_string()));
    }
    let top = prepare(notes, layout.top_half(), notes_background)?;
    let bottom = prepare(canvas, layout.bottom_half(), canvas_background)?;
    Ok(writer::single_page(
        layout.page_width,
        layout.page_height,
        &[top, bottom],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const DARK: Rgb<u8> = Rgb([0x2b, 0x2b, 0x2b]);

    fn contains(region: &Region, placement: &Placement) -> bool {
        const EPS: f32 = 1e-3;
        placement.x >= region.left - EPS
            && placement.y >= region.top - region.height - EPS
            && placement.x + placement.width <= region.left + region.width + EPS
            && placement.y + placement.height <= region.top + EPS
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_a4_halves_split_content_area() {
        let layout = PageLayout::a4();
        let top = layout.top_half();
        let bottom = layout.bottom_half();

        assert!(approx(top.left, 28.35));
        assert!(approx(top.top, 841.89 - 28.35));
        assert!(approx(top.width, 595.28 - 56.7));
        assert!(approx(top.height, bottom.height));
        assert!(approx(top.top - top.height, bottom.top));
        assert!(approx(bottom.top - bottom.height, 28.35));
    }

    #[test]
    fn test_fit_within_preserves_aspect() {
        let (w, h) = fit_within(2000, 2000, 538.58, 392.595);
        assert!(approx(w, h));
        assert!(approx(h, 392.595));

        let (w, h) = fit_within(800, 200, 538.58, 392.595);
        assert!(approx(w, 538.58));
        assert!(approx(w / h, 4.0));
    }

    #[test]
    fn test_fit_within_scales_small_images_up() {
        let (w, h) = fit_within(400, 300, 538.58, 392.595);
        assert!(approx(w, 523.46));
        assert!(approx(h, 392.595));
    }

    #[test]
    fn test_fit_within_empty_image() {
        assert_eq!(fit_within(0, 10, 100.0, 100.0), (0.0, 0.0));
    }

    #[test]
    fn test_placements_stay_inside_their_half() {
        let layout = PageLayout::a4();
        for (w, h) in [(400, 300), (1200, 100), (100, 1200), (2000, 2000)] {
            for region in [layout.top_half(), layout.bottom_half()] {
                let (fw, fh) = fit_within(w, h, region.width, region.height);
                let placement = region.place_top_left(fw, fh);
                assert!(contains(&region, &placement), "{w}x{h} in {region:?}");
                assert!(approx(placement.x, region.left));
                assert!(approx(placement.y + placement.height, region.top));
                assert!(approx(fw / fh, w as f32 / h as f32));
            }
        }
    }

    #[test]
    fn test_raster_size_never_upsamples() {
        assert_eq!(raster_size((400, 300), 523.46, 392.595), (400, 300));
        // 150 DPI on 392.595pt is ~818px
        assert_eq!(raster_size((2000, 2000), 392.595, 392.595), (818, 818));
    }

    #[test]
    fn test_flatten_blends_alpha_over_background() {
        let mut image = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([0, 0, 0, 0]));
        let flat = flatten(&image, WHITE);
        assert_eq!(flat.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(flat.get_pixel(1, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_compose_produces_pdf() {
        let notes = RgbaImage::from_pixel(400, 300, Rgba([0x2b, 0x2b, 0x2b, 255]));
        let mut canvas = RgbaImage::from_pixel(300, 500, Rgba([255, 255, 255, 255]));
        canvas.put_pixel(10, 10, Rgba([0, 0, 0, 255]));

        let pdf = compose(&PageLayout::a4(), &notes, DARK, &canvas, WHITE).unwrap();
        let text = String::from_utf8_lossy(&pdf);

        assert!(pdf.starts_with(b"%PDF-"));
        assert!(pdf.ends_with(b"%%EOF"));
        assert_eq!(text.matches("/Subtype /Image").count(), 2);
        assert!(text.contains("/Width 400 /Height 300"));
        assert!(text.contains("/Width 300 /Height 500"));
    }

    #[test]
    fn test_compose_rejects_empty_images() {
        let empty = RgbaImage::new(0, 0);
        let canvas = RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255]));
        assert!(compose(&PageLayout::a4(), &empty, DARK, &canvas, WHITE).is_err());
    }
}
