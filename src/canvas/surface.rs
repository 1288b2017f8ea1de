//! The canvas raster and the stroke session that draws onto it.

use bevy::prelude::*;
use image::{Rgba, RgbaImage};

use super::tools::{CanvasTool, StrokeStyle, ToolParseError, ToolPresets};

/// Transient pointer state for the stroke in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StrokeSession {
    pub is_drawing: bool,
    pub last_point: Vec2,
}

/// Fixed-size RGBA buffer the user draws onto.
///
/// Points are in canvas pixel coordinates, where `(x, y)` is the center of
/// pixel `(x, y)`. Anything outside the buffer is clipped.
#[derive(Resource)]
pub struct DrawingSurface {
    image: RgbaImage,
    background: Rgba<u8>,
    presets: ToolPresets,
    session: StrokeSession,
    dirty: bool,
}

impl DrawingSurface {
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, background),
            background,
            presets: ToolPresets::new(background),
            session: StrokeSession::default(),
            dirty: false,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn background(&self) -> Rgba<u8> {
        self.background
    }

    pub fn presets(&self) -> &ToolPresets {
        &self.presets
    }

    #[cfg(test)]
    pub fn session(&self) -> StrokeSession {
        self.session
    }

    pub fn set_tool(&mut self, tool: CanvasTool) {
        self.presets.set_tool(tool);
    }

    /// Select a tool by its lowercase name; unknown names leave the tool unchanged.
    pub fn set_tool_by_name(&mut self, name: &str) -> Result<CanvasTool, ToolParseError> {
        let tool = name.parse::<CanvasTool>()?;
        self.set_tool(tool);
        Ok(tool)
    }

    pub fn set_color(&mut self, color: Rgba<u8>) {
        self.presets.set_color(color);
    }

    pub fn pointer_down(&mut self, point: Vec2) {
        self.session = StrokeSession {
            is_drawing: true,
            last_point: point,
        };
    }

    /// Stroke from the last point to `point`. Returns false when no stroke
    /// is in progress.
    pub fn pointer_move(&mut self, point: Vec2) -> bool {
        if !self.session.is_drawing {
            return false;
        }
        let style = self.presets.active_style();
        stroke_segment(&mut self.image, self.session.last_point, point, style);
        self.session.last_point = point;
        self.dirty = true;
        true
    }

    pub fn pointer_up(&mut self) {
        self.session.is_drawing = false;
    }

    /// Reset every pixel to the background color.
    pub fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = self.background;
        }
        self.dirty = true;
    }

    /// Returns whether pixels changed since the last call, resetting the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

/// Stroke a straight segment with round caps.
///
/// A pixel is covered when its center is within `width / 2` of the segment.
/// Consecutive segments share their end point, so round caps also give
/// round joins.
pub fn stroke_segment(image: &mut RgbaImage, from: Vec2, to: Vec2, style: StrokeStyle) {
    let radius = style.width / 2.0;
    if radius <= 0.0 || image.width() == 0 || image.height() == 0 {
        return;
    }

    let min_x = ((from.x.min(to.x) - radius).floor() as i64).max(0);
    let min_y = ((from.y.min(to.y) - radius).floor() as i64).max(0);
    let max_x = ((from.x.max(to.x) + radius).ceil() as i64).min(image.width() as i64 - 1);
    let max_y = ((from.y.max(to.y) + radius).ceil() as i64).min(image.height() as i64 - 1);
    if min_x > max_x || min_y > max_y {
        return;
    }

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let center = Vec2::new(x as f32, y as f32);
            if distance_to_segment(center, from, to) <= radius {
                blend_over(image.get_pixel_mut(x as u32, y as u32), style.color);
            }
        }
    }
}

/// Shortest distance from `point` to the segment `a..b`.
pub fn distance_to_segment(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let length_squared = ab.length_squared();
    if length_squared == 0.0 {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / length_squared).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

/// Porter-Duff source-over of `src` onto `dst`.
pub fn blend_over(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let src_alpha = src[3] as f32 / 255.0;
    if src_alpha >= 1.0 {
        *dst = src;
        return;
    }
    if src_alpha <= 0.0 {
        return;
    }

    let dst_alpha = dst[3] as f32 / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    if out_alpha <= 0.0 {
        *dst = Rgba([0, 0, 0, 0]);
        return;
    }

    for channel in 0..3 {
        let value = (src[channel] as f32 * src_alpha
            + dst[channel] as f32 * dst_alpha * (1.0 - src_alpha))
            / out_alpha;
        dst[channel] = value.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_alpha * 255.0).round() as u8;
}
