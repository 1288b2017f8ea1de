use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use super::color_dialog::ColorDialogState;
use super::file_dialogs::{SaveDialogs, SaveTarget};
use super::toolbar::ToolsDockState;
use crate::canvas::{CanvasTool, ClearCanvasRequest, DrawingSurface, SetToolRequest};
use crate::config::AppConfig;
use crate::export::ExportState;
use crate::theme;

const BUTTON_WIDTH: f32 = 130.0;

fn action_button(ui: &mut egui::Ui, label: &str, selected: bool) -> egui::Response {
    ui.add(
        egui::Button::new(label)
            .min_size(egui::vec2(BUTTON_WIDTH, 26.0))
            .selected(selected),
    )
}

/// Left dock with the drawing tools and export actions
#[allow(clippy::too_many_arguments)]
pub fn tools_dock_ui(
    mut contexts: EguiContexts,
    dock: Res<ToolsDockState>,
    surface: Res<DrawingSurface>,
    config: Res<AppConfig>,
    export_state: Res<ExportState>,
    mut color_dialog: ResMut<ColorDialogState>,
    mut save_dialogs: ResMut<SaveDialogs>,
    mut tool_events: MessageWriter<SetToolRequest>,
    mut clear_events: MessageWriter<ClearCanvasRequest>,
) -> Result {
    if !dock.visible {
        return Ok(());
    }

    let active_tool = surface.presets().tool();
    let pen_color = surface.presets().pen_color();

    egui::SidePanel::left("tools_dock")
        .resizable(false)
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .fill(theme::ui::PANEL_BACKGROUND)
                .inner_margin(egui::Margin::same(8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.label(egui::RichText::new("Tools").color(theme::ui::LABEL_TEXT).strong());
            ui.add_space(4.0);

            for tool in CanvasTool::all() {
                if action_button(ui, tool.display_name(), active_tool == *tool).clicked() {
                    tool_events.write(SetToolRequest { tool: *tool });
                }
            }

            ui.separator();

            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                ui.painter()
                    .rect_filled(rect, 2.0, theme::rgba_to_egui(pen_color));
                if ui.button("Color Picker").clicked() {
                    color_dialog.open(pen_color);
                }
            });

            if action_button(ui, "Clear Canvas", false).clicked() {
                clear_events.write(ClearCanvasRequest);
            }

            ui.separator();

            let can_save = !export_state.is_busy() && !save_dialogs.is_pending();
            ui.add_enabled_ui(can_save, |ui| {
                for (label, target) in [
                    ("Save as PDF", SaveTarget::Pdf),
                    ("Save Canvas Img", SaveTarget::CanvasImage),
                    ("Save Notes Txt", SaveTarget::NotesText),
                ] {
                    if action_button(ui, label, false).clicked() {
                        save_dialogs.open(target, &config);
                    }
                }
            });

            if let Some(description) = &export_state.operation_description {
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.colored_label(theme::ui::HINT_TEXT, description);
                });
            }
        });
    Ok(())
}
