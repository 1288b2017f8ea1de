mod canvas_view;
mod color_dialog;
mod file_dialogs;
mod notes_panel;
mod notifications;
mod toolbar;
mod tools_dock;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::config::{ConfigLoaded, ConfigResetNotification};
use crate::export::{ExportFailure, ExportNotice};

/// Resource that tracks whether any modal dialog is currently open.
/// Canvas input is ignored while this is set.
#[derive(Resource, Default)]
pub struct DialogState {
    /// True when any modal dialog is open that should block canvas input
    pub any_modal_open: bool,
}

/// System to aggregate all dialog open states into a single resource.
/// Runs in First schedule before input handlers.
fn update_dialog_state(
    color_dialog: Res<color_dialog::ColorDialogState>,
    save_dialogs: Res<file_dialogs::SaveDialogs>,
    config_reset: Res<ConfigResetNotification>,
    failure: Res<ExportFailure>,
    notice: Res<ExportNotice>,
    mut dialog_state: ResMut<DialogState>,
) {
    dialog_state.any_modal_open = color_dialog.is_open
        || save_dialogs.is_pending()
        || config_reset.show
        || failure.message.is_some()
        || notice.message.is_some();
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogState>()
            .init_resource::<toolbar::ToolsDockState>()
            .init_resource::<color_dialog::ColorDialogState>()
            .init_resource::<file_dialogs::SaveDialogs>()
            .add_systems(
                Startup,
                toolbar::load_tools_dock_state.after(ConfigLoaded),
            )
            .add_systems(Update, file_dialogs::poll_save_dialogs)
            // Top panel first so the side panels fit below it
            .add_systems(
                EguiPrimaryContextPass,
                (
                    toolbar::toolbar_ui,
                    tools_dock::tools_dock_ui,
                    notes_panel::notes_panel_ui,
                    canvas_view::canvas_view_ui,
                )
                    .chain(),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    color_dialog::color_dialog_ui,
                    notifications::export_error_dialog_ui,
                    notifications::pdf_saved_notice_ui,
                    notifications::config_reset_notification_ui,
                )
                    .after(canvas_view::canvas_view_ui),
            )
            // Update dialog state at the start of each frame
            .add_systems(First, update_dialog_state);
    }
}
