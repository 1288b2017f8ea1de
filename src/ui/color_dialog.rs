use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use image::Rgba;

use crate::canvas::SetColorRequest;
use crate::theme;

/// State of the pen/highlight color dialog
#[derive(Resource, Default)]
pub struct ColorDialogState {
    pub is_open: bool,
    /// Color being edited; applied only on OK
    pub color: egui::Color32,
}

impl ColorDialogState {
    pub fn open(&mut self, current: Rgba<u8>) {
        self.color = theme::rgba_to_egui(current);
        self.is_open = true;
    }
}

pub fn color_dialog_ui(
    mut contexts: EguiContexts,
    mut state: ResMut<ColorDialogState>,
    mut color_events: MessageWriter<SetColorRequest>,
) -> Result {
    if !state.is_open {
        return Ok(());
    }

    let mut confirmed = false;
    let mut cancelled = false;

    egui::Window::new("Select Pen/Highlight Color")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            egui::color_picker::color_picker_color32(
                ui,
                &mut state.color,
                egui::color_picker::Alpha::Opaque,
            );
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("OK").clicked() {
                    confirmed = true;
                }
                if ui.button("Cancel").clicked() {
                    cancelled = true;
                }
            });
        });

    if confirmed {
        let color = theme::egui_to_rgba_opaque(state.color);
        debug!("Pen color set to {:?}", color.0);
        color_events.write(SetColorRequest { color });
    }
    if confirmed || cancelled {
        state.is_open = false;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_starts_from_current_color() {
        let mut state = ColorDialogState::default();
        state.open(Rgba([12, 34, 56, 255]));
        assert!(state.is_open);
        assert_eq!(state.color, egui::Color32::from_rgb(12, 34, 56));
    }
}
