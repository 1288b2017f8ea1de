use std::fmt;
use std::str::FromStr;

use image::Rgba;

use crate::constants::{ERASER_WIDTH, HIGHLIGHTER_ALPHA, HIGHLIGHTER_WIDTH, PEN_WIDTH};
use crate::theme::{CANVAS_BACKGROUND, DEFAULT_PEN_COLOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CanvasTool {
    #[default]
    Pen,
    Highlighter,
    Eraser,
}

impl CanvasTool {
    /// Label shown on the tools dock button
    pub fn display_name(&self) -> &'static str {
        match self {
            CanvasTool::Pen => "Pen",
            CanvasTool::Highlighter => "Highlighter",
            CanvasTool::Eraser => "Eraser",
        }
    }

    /// Lowercase name accepted by `FromStr`
    pub fn name(&self) -> &'static str {
        match self {
            CanvasTool::Pen => "pen",
            CanvasTool::Highlighter => "highlighter",
            CanvasTool::Eraser => "eraser",
        }
    }

    pub fn all() -> &'static [CanvasTool] {
        &[CanvasTool::Pen, CanvasTool::Highlighter, CanvasTool::Eraser]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolParseError(pub String);

impl fmt::Display for ToolParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown canvas tool: {:?}", self.0)
    }
}

impl std::error::Error for ToolParseError {}

impl FromStr for CanvasTool {
    type Err = ToolParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CanvasTool::all()
            .iter()
            .copied()
            .find(|tool| tool.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ToolParseError(s.to_string()))
    }
}

/// Color and width used to stroke one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Rgba<u8>,
    pub width: f32,
}

/// The active tool plus the colors each preset strokes with.
///
/// The highlighter color is always the pen color with `HIGHLIGHTER_ALPHA`;
/// the eraser always paints the canvas background.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolPresets {
    tool: CanvasTool,
    pen_color: Rgba<u8>,
    highlight_color: Rgba<u8>,
    eraser_color: Rgba<u8>,
}

impl Default for ToolPresets {
    fn default() -> Self {
        Self::new(CANVAS_BACKGROUND)
    }
}

impl ToolPresets {
    pub fn new(background: Rgba<u8>) -> Self {
        let mut presets = Self {
            tool: CanvasTool::default(),
            pen_color: DEFAULT_PEN_COLOR,
            highlight_color: DEFAULT_PEN_COLOR,
            eraser_color: background,
        };
        presets.set_color(DEFAULT_PEN_COLOR);
        presets
    }

    pub fn tool(&self) -> CanvasTool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: CanvasTool) {
        self.tool = tool;
    }

    pub fn pen_color(&self) -> Rgba<u8> {
        self.pen_color
    }

    pub fn highlight_color(&self) -> Rgba<u8> {
        self.highlight_color
    }

    pub fn eraser_color(&self) -> Rgba<u8> {
        self.eraser_color
    }

    /// Set the base color; the highlighter follows with reduced opacity.
    pub fn set_color(&mut self, color: Rgba<u8>) {
        let [r, g, b, _] = color.0;
        self.pen_color = color;
        self.highlight_color = Rgba([r, g, b, HIGHLIGHTER_ALPHA]);
    }

    pub fn style_for(&self, tool: CanvasTool) -> StrokeStyle {
        match tool {
            CanvasTool::Pen => StrokeStyle {
                color: self.pen_color(),
                width: PEN_WIDTH,
            },
            CanvasTool::Highlighter => StrokeStyle {
                color: self.highlight_color(),
                width: HIGHLIGHTER_WIDTH,
            },
            CanvasTool::Eraser => StrokeStyle {
                color: self.eraser_color(),
                width: ERASER_WIDTH,
            },
        }
    }

    pub fn active_style(&self) -> StrokeStyle {
        self.style_for(self.tool)
    }
}
