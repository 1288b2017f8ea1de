//! Dialogs reporting export results and config problems.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::ConfigResetNotification;
use crate::export::{ExportFailure, ExportNotice};
use crate::theme;

/// Error dialog for a failed export
pub fn export_error_dialog_ui(
    mut contexts: EguiContexts,
    mut failure: ResMut<ExportFailure>,
) -> Result {
    let Some(message) = failure.message.clone() else {
        return Ok(());
    };

    let mut dismissed = false;
    egui::Window::new("Export Error")
        .collapsible(false)
        .resizable(true)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                ui.colored_label(theme::ui::ERROR_TEXT, &message);
            });
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        failure.message = None;
    }
    Ok(())
}

/// "PDF Saved" confirmation
pub fn pdf_saved_notice_ui(
    mut contexts: EguiContexts,
    mut notice: ResMut<ExportNotice>,
) -> Result {
    let Some(message) = notice.message.clone() else {
        return Ok(());
    };

    let mut dismissed = false;
    egui::Window::new("PDF Saved")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label(&message);
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        notice.message = None;
    }
    Ok(())
}

/// Shown once at startup when config.json could not be used
pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    let mut dismissed = false;
    egui::Window::new("Configuration Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Your configuration file could not be loaded and was reset to defaults.");
            if let Some(reason) = &notification.reason {
                ui.add_space(4.0);
                ui.colored_label(theme::ui::HINT_TEXT, reason);
            }
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        notification.show = false;
        notification.reason = None;
    }
    Ok(())
}
