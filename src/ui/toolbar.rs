use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::{AppConfig, UpdateToolsDockRequest};

/// Whether the tools dock is shown
#[derive(Resource)]
pub struct ToolsDockState {
    pub visible: bool,
}

impl Default for ToolsDockState {
    fn default() -> Self {
        Self { visible: true }
    }
}

/// Startup system restoring the dock visibility from config
pub fn load_tools_dock_state(config: Res<AppConfig>, mut dock: ResMut<ToolsDockState>) {
    dock.visible = config.data.tools_dock_visible;
}

/// Main toolbar with the tools dock toggle
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    mut dock: ResMut<ToolsDockState>,
    mut config_events: MessageWriter<UpdateToolsDockRequest>,
) -> Result {
    egui::TopBottomPanel::top("main_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(8, 4)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                let button = egui::Button::new(egui::RichText::new("\u{2630}").size(16.0))
                    .min_size(egui::vec2(28.0, 24.0))
                    .selected(dock.visible);
                let response = ui.add(button);
                if response.clicked() {
                    dock.visible = !dock.visible;
                    config_events.write(UpdateToolsDockRequest {
                        visible: dock.visible,
                    });
                }
                response.on_hover_text("Show/Hide Tools");
            });
        });
    Ok(())
}
