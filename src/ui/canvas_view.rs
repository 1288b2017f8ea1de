use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use super::DialogState;
use crate::canvas::{CanvasPointer, CanvasTexture};
use crate::theme;

/// Screen position to canvas pixel coordinates
fn to_canvas(pos: egui::Pos2, image_rect: egui::Rect) -> Vec2 {
    let local = pos - image_rect.min;
    Vec2::new(local.x.floor(), local.y.floor())
}

/// Central scrollable view of the canvas at 1:1 scale
pub fn canvas_view_ui(
    mut contexts: EguiContexts,
    texture: Res<CanvasTexture>,
    dialog_state: Res<DialogState>,
    mut pointer_events: MessageWriter<CanvasPointer>,
) -> Result {
    egui::CentralPanel::default()
        .frame(egui::Frame::new().fill(theme::ui::VIEWPORT_BACKGROUND))
        .show(contexts.ctx_mut()?, |ui| {
            egui::ScrollArea::both()
                .auto_shrink([false, false])
                .scroll_source(egui::scroll_area::ScrollSource {
                    scroll_bar: true,
                    drag: false,
                    mouse_wheel: true,
                })
                .show(ui, |ui| {
                    let image = egui::Image::new(egui::load::SizedTexture::new(
                        texture.texture_id,
                        texture.size,
                    ))
                    .sense(egui::Sense::click_and_drag());
                    let response = ui.add(image);

                    if dialog_state.any_modal_open {
                        return;
                    }
                    let rect = response.rect;
                    if response.drag_started_by(egui::PointerButton::Primary)
                        && let Some(pos) = response.interact_pointer_pos()
                    {
                        pointer_events.write(CanvasPointer::Pressed(to_canvas(pos, rect)));
                    }
                    if response.dragged_by(egui::PointerButton::Primary)
                        && let Some(pos) = response.interact_pointer_pos()
                    {
                        pointer_events.write(CanvasPointer::Moved(to_canvas(pos, rect)));
                    }
                    if response.drag_stopped_by(egui::PointerButton::Primary) {
                        pointer_events.write(CanvasPointer::Released);
                    }
                });
        });
    Ok(())
}
