use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::notes::{NotesEditor, NotesViewport};
use crate::theme;

const DEFAULT_PANEL_WIDTH: f32 = 420.0;

/// Notes editor on the left of the canvas
pub fn notes_panel_ui(
    mut contexts: EguiContexts,
    mut editor: ResMut<NotesEditor>,
    mut viewport: ResMut<NotesViewport>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    let pixels_per_point = ctx.pixels_per_point();
    let editor = &mut *editor;

    egui::SidePanel::left("notes_panel")
        .resizable(true)
        .default_width(DEFAULT_PANEL_WIDTH)
        .width_range(120.0..=1200.0)
        .show(ctx, |ui| {
            ui.label(egui::RichText::new("NOTES (dark theme):").color(theme::ui::LABEL_TEXT));
            ui.add_space(2.0);

            let font = egui::FontId::proportional(editor.font_size);
            let frame = egui::Frame::new()
                .fill(theme::ui::NOTES_BACKGROUND)
                .inner_margin(egui::Margin::same(4));

            frame.show(ui, |ui| {
                let scroll = egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        let output = egui::TextEdit::multiline(&mut editor.text)
                            .hint_text("Type your notes here... (ends with '=' to auto-calc)")
                            .font(font)
                            .text_color(theme::ui::NOTES_TEXT)
                            .background_color(theme::ui::NOTES_BACKGROUND)
                            .frame(false)
                            .desired_width(f32::INFINITY)
                            .min_size(ui.available_size())
                            .show(ui);

                        if output.response.changed() {
                            editor.notify_changed();
                        }

                        if editor.take_cursor_to_end() {
                            let end = editor.text.chars().count();
                            let mut state = output.state;
                            state
                                .cursor
                                .set_char_range(Some(egui::text::CCursorRange::one(
                                    egui::text::CCursor::new(end),
                                )));
                            state.store(ui.ctx(), output.response.id);
                        }
                    });
                viewport.rect = Some(scroll.inner_rect);
            });
        });

    viewport.pixels_per_point = pixels_per_point;
    Ok(())
}
