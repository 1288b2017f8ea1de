pub mod surface;
pub mod tools;

pub use surface::DrawingSurface;
pub use tools::CanvasTool;

use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy_egui::{egui, EguiTextureHandle, EguiUserTextures};
use image::Rgba;

use crate::config::{AppConfig, ConfigLoaded, UpdateActiveToolRequest, UpdatePenColorRequest};
use crate::constants::MAX_CANVAS_DIMENSION;
use crate::theme::CANVAS_BACKGROUND;

/// Pointer events on the canvas viewport, in canvas pixel coordinates.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum CanvasPointer {
    Pressed(Vec2),
    Moved(Vec2),
    Released,
}

#[derive(Message)]
pub struct SetToolRequest {
    pub tool: CanvasTool,
}

#[derive(Message)]
pub struct SetColorRequest {
    pub color: Rgba<u8>,
}

#[derive(Message)]
pub struct ClearCanvasRequest;

/// GPU copy of the drawing surface, registered with egui for display.
#[derive(Resource)]
pub struct CanvasTexture {
    pub handle: Handle<Image>,
    pub texture_id: egui::TextureId,
    pub size: egui::Vec2,
}

/// Build a bevy image holding a copy of the surface pixels.
fn surface_to_image(surface: &DrawingSurface) -> Image {
    Image::new(
        Extent3d {
            width: surface.width(),
            height: surface.height(),
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        surface.image().as_raw().clone(),
        TextureFormat::Rgba8UnormSrgb,
        default(),
    )
}

/// Clamp configured canvas dimensions to something we can allocate.
fn canvas_dimensions(config: &AppConfig) -> (u32, u32) {
    let clamp = |v: u32| v.clamp(1, MAX_CANVAS_DIMENSION);
    (
        clamp(config.data.canvas_width),
        clamp(config.data.canvas_height),
    )
}

/// Blank surface with the persisted size, pen color and tool
fn surface_from_config(config: &AppConfig) -> DrawingSurface {
    let (width, height) = canvas_dimensions(config);
    let mut surface = DrawingSurface::new(width, height, CANVAS_BACKGROUND);
    let [r, g, b] = config.data.pen_color;
    surface.set_color(Rgba([r, g, b, 255]));
    if let Err(e) = surface.set_tool_by_name(&config.data.active_tool) {
        warn!("{}, keeping {}", e, surface.presets().tool().name());
    }
    surface
}

/// Startup system creating the surface and its texture once config is known
fn setup_canvas(
    mut commands: Commands,
    config: Res<AppConfig>,
    mut images: ResMut<Assets<Image>>,
    mut egui_textures: ResMut<EguiUserTextures>,
) {
    let surface = surface_from_config(&config);
    let (width, height) = (surface.width(), surface.height());

    let handle = images.add(surface_to_image(&surface));
    let texture_id = egui_textures.add_image(EguiTextureHandle::Weak(handle.id()));
    info!("Created {}x{} canvas", width, height);

    commands.insert_resource(CanvasTexture {
        handle,
        texture_id,
        size: egui::vec2(width as f32, height as f32),
    });
    commands.insert_resource(surface);
}

fn apply_tool_requests(
    mut surface: ResMut<DrawingSurface>,
    mut tool_events: MessageReader<SetToolRequest>,
    mut color_events: MessageReader<SetColorRequest>,
    mut config_events: MessageWriter<UpdatePenColorRequest>,
    mut tool_config_events: MessageWriter<UpdateActiveToolRequest>,
) {
    for event in tool_events.read() {
        surface.set_tool(event.tool);
        debug!("Canvas tool set to {}", event.tool.name());
        tool_config_events.write(UpdateActiveToolRequest {
            name: event.tool.name().to_string(),
        });
    }
    for event in color_events.read() {
        surface.set_color(event.color);
        let [r, g, b, _] = event.color.0;
        config_events.write(UpdatePenColorRequest { rgb: [r, g, b] });
    }
}

fn apply_pointer_events(
    mut surface: ResMut<DrawingSurface>,
    mut events: MessageReader<CanvasPointer>,
) {
    for event in events.read() {
        match *event {
            CanvasPointer::Pressed(point) => surface.pointer_down(point),
            CanvasPointer::Moved(point) => {
                surface.pointer_move(point);
            }
            CanvasPointer::Released => surface.pointer_up(),
        }
    }
}

fn clear_canvas(mut surface: ResMut<DrawingSurface>, mut events: MessageReader<ClearCanvasRequest>) {
    if events.read().count() > 0 {
        surface.clear();
        info!("Canvas cleared");
    }
}

/// Upload the surface pixels to the texture after they changed
fn sync_canvas_texture(
    mut surface: ResMut<DrawingSurface>,
    texture: Res<CanvasTexture>,
    mut images: ResMut<Assets<Image>>,
) {
    if !surface.take_dirty() {
        return;
    }
    if let Some(mut image) = images.get_mut(&texture.handle) {
        image.data = Some(surface.image().as_raw().clone());
    }
}

pub struct CanvasPlugin;

impl Plugin for CanvasPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<CanvasPointer>()
            .add_message::<SetToolRequest>()
            .add_message::<SetColorRequest>()
            .add_message::<ClearCanvasRequest>()
            .add_systems(Startup, setup_canvas.after(ConfigLoaded))
            .add_systems(
                Update,
                (
                    apply_tool_requests,
                    apply_pointer_events,
                    clear_canvas.run_if(on_message::<ClearCanvasRequest>),
                    sync_canvas_texture,
                )
                    .chain(),
            );
    }
}
