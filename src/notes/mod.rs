pub mod evaluator;
pub mod math;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::{AppConfig, ConfigLoaded, UpdateNotesFontSizeRequest};
use crate::constants::{
    DEFAULT_NOTES_FONT_SIZE, MAX_NOTES_FONT_SIZE, MIN_NOTES_FONT_SIZE, NOTES_ZOOM_STEP,
};

/// The notes text plus the editor state around it.
///
/// The UI edits `text` in place and calls `notify_changed` after every user
/// edit. Programmatic rewrites go through `replace_text`, which raises the
/// same notification; `suppress_changes` keeps the auto-evaluator from
/// reacting to its own rewrite.
#[derive(Resource)]
pub struct NotesEditor {
    pub text: String,
    pub font_size: f32,
    suppress_changes: bool,
    cursor_to_end: bool,
}

impl Default for NotesEditor {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: DEFAULT_NOTES_FONT_SIZE,
            suppress_changes: false,
            cursor_to_end: false,
        }
    }
}

impl NotesEditor {
    /// Text-change notification; runs the auto-evaluator unless suppressed.
    pub fn notify_changed(&mut self) {
        if self.suppress_changes {
            return;
        }
        self.auto_evaluate();
    }

    /// Replace the whole text and move the cursor to the end.
    pub fn replace_text(&mut self, text: String) {
        self.text = text;
        self.cursor_to_end = true;
        self.notify_changed();
    }

    fn auto_evaluate(&mut self) {
        let Some(updated) = evaluator::evaluate_last_line(&self.text) else {
            return;
        };
        self.suppress_changes = true;
        self.replace_text(updated);
        self.suppress_changes = false;
    }

    /// Whether the UI should move the cursor to the end, resetting the request.
    pub fn take_cursor_to_end(&mut self) -> bool {
        std::mem::take(&mut self.cursor_to_end)
    }

    pub fn zoom_in(&mut self) {
        self.set_font_size(self.font_size + NOTES_ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_font_size(self.font_size - NOTES_ZOOM_STEP);
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size.clamp(MIN_NOTES_FONT_SIZE, MAX_NOTES_FONT_SIZE);
    }
}

/// Where the notes editor was drawn last frame, for the PDF snapshot.
#[derive(Resource, Default)]
pub struct NotesViewport {
    /// Editor rect in logical points
    pub rect: Option<egui::Rect>,
    pub pixels_per_point: f32,
}

impl NotesViewport {
    /// Editor rect in physical pixels as `(x, y, width, height)`.
    pub fn physical_rect(&self) -> Option<(u32, u32, u32, u32)> {
        let rect = self.rect?;
        let scale = if self.pixels_per_point > 0.0 {
            self.pixels_per_point
        } else {
            1.0
        };
        let min = rect.min * scale;
        let size = rect.size() * scale;
        if size.x < 2.0 || size.y < 2.0 {
            return None;
        }
        Some((
            min.x.max(0.0).round() as u32,
            min.y.max(0.0).round() as u32,
            size.x.round() as u32,
            size.y.round() as u32,
        ))
    }
}

/// Startup system applying the persisted font size
fn apply_config_font_size(config: Res<AppConfig>, mut editor: ResMut<NotesEditor>) {
    editor.set_font_size(config.data.notes_font_size);
}

/// Ctrl+Plus / Ctrl+Minus zoom the notes text
fn handle_zoom_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut editor: ResMut<NotesEditor>,
    mut config_events: MessageWriter<UpdateNotesFontSizeRequest>,
) {
    let ctrl = keyboard.any_pressed([
        KeyCode::ControlLeft,
        KeyCode::ControlRight,
        KeyCode::SuperLeft,
        KeyCode::SuperRight,
    ]);
    if !ctrl {
        return;
    }

    let before = editor.font_size;
    if keyboard.any_just_pressed([KeyCode::Equal, KeyCode::NumpadAdd]) {
        editor.zoom_in();
    } else if keyboard.any_just_pressed([KeyCode::Minus, KeyCode::NumpadSubtract]) {
        editor.zoom_out();
    }

    if editor.font_size != before {
        debug!("Notes font size {} -> {}", before, editor.font_size);
        config_events.write(UpdateNotesFontSizeRequest {
            size: editor.font_size,
        });
    }
}

/// Keep egui's own Ctrl+Plus/Minus zoom from scaling the whole UI
fn disable_global_keyboard_zoom(mut contexts: EguiContexts) -> Result {
    contexts
        .ctx_mut()?
        .options_mut(|options| options.zoom_with_keyboard = false);
    Ok(())
}

pub struct NotesPlugin;

impl Plugin for NotesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NotesEditor>()
            .init_resource::<NotesViewport>()
            .add_systems(Startup, apply_config_font_size.after(ConfigLoaded))
            .add_systems(Update, handle_zoom_shortcuts)
            .add_systems(
                bevy_egui::EguiPrimaryContextPass,
                disable_global_keyboard_zoom.run_if(run_once),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(editor: &mut NotesEditor, typed: &str) {
        for c in typed.chars() {
            editor.text.push(c);
            editor.notify_changed();
        }
    }

    #[test]
    fn test_typing_expression_evaluates() {
        let mut editor = NotesEditor::default();
        type_text(&mut editor, "2+2=");
        assert_eq!(editor.text, "2+2=4");
        assert!(editor.take_cursor_to_end());
        assert!(!editor.take_cursor_to_end());
    }

    #[test]
    fn test_failed_evaluation_leaves_text() {
        let mut editor = NotesEditor::default();
        type_text(&mut editor, "foo=");
        assert_eq!(editor.text, "foo=");
        assert!(!editor.take_cursor_to_end());
    }

    #[test]
    fn test_rewrite_does_not_notify_itself() {
        let mut editor = NotesEditor::default();
        type_text(&mut editor, "6*7=");
        assert_eq!(editor.text, "6*7=42");
        assert!(!editor.suppress_changes);

        // Notifications raised while suppressed are ignored
        editor.suppress_changes = true;
        editor.text.push_str("\n1+1=");
        editor.notify_changed();
        assert_eq!(editor.text, "6*7=42\n1+1=");
    }

    #[test]
    fn test_multiline_notes() {
        let mut editor = NotesEditor::default();
        type_text(&mut editor, "budget\n1/3=\nsqrt(9)=");
        assert_eq!(editor.text, "budget\n1/3=1/3\nsqrt(9)=3");
    }

    #[test]
    fn test_replace_text_runs_evaluator() {
        let mut editor = NotesEditor::default();
        editor.replace_text("10-4=".to_string());
        assert_eq!(editor.text, "10-4=6");
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut editor = NotesEditor::default();
        editor.zoom_in();
        assert_eq!(editor.font_size, DEFAULT_NOTES_FONT_SIZE + NOTES_ZOOM_STEP);
        for _ in 0..200 {
            editor.zoom_in();
        }
        assert_eq!(editor.font_size, MAX_NOTES_FONT_SIZE);
        for _ in 0..200 {
            editor.zoom_out();
        }
        assert_eq!(editor.font_size, MIN_NOTES_FONT_SIZE);
    }

    #[test]
    fn test_viewport_physical_rect_scales() {
        let viewport = NotesViewport {
            rect: Some(egui::Rect::from_min_size(
                egui::pos2(10.0, 20.0),
                egui::vec2(300.0, 200.0),
            )),
            pixels_per_point: 2.0,
        };
        assert_eq!(viewport.physical_rect(), Some((20, 40, 600, 400)));
    }

    #[test]
    fn test_viewport_without_size_has_no_rect() {
        assert_eq!(NotesViewport::default().physical_rect(), None);
        let tiny = NotesViewport {
            rect: Some(egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1.0, 1.0))),
            pixels_per_point: 1.0,
        };
        assert_eq!(tiny.physical_rect(), None);
    }
}
