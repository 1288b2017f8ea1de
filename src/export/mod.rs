//! Exporting the canvas, the notes and the combined PDF.
//!
//! Every export runs on the `IoTaskPool`; `poll_export_tasks` picks up the
//! result and reports success or failure to the UI resources.

mod error;
pub mod files;
pub mod pdf;
pub mod snapshot;

pub use error::ExportError;

use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, Task};
use futures_lite::future;
use std::path::PathBuf;

use crate::canvas::DrawingSurface;
use crate::config::UpdateLastExportDirRequest;
use crate::notes::NotesEditor;
use snapshot::PendingPdfExport;

#[derive(Message)]
pub struct ExportCanvasImageRequest {
    pub path: PathBuf,
}

#[derive(Message)]
pub struct ExportNotesTextRequest {
    pub path: PathBuf,
}

#[derive(Message)]
pub struct ExportPdfRequest {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    CanvasImage,
    NotesText,
    Pdf,
}

impl ExportKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ExportKind::CanvasImage => "canvas image",
            ExportKind::NotesText => "notes text",
            ExportKind::Pdf => "PDF",
        }
    }
}

/// Result of an async export
pub struct ExportResult {
    pub kind: ExportKind,
    pub result: Result<PathBuf, ExportError>,
}

#[derive(Component)]
pub struct ExportTask(pub Task<ExportResult>);

/// Tracks the export in progress; only one runs at a time
#[derive(Resource, Default)]
pub struct ExportState {
    pub operation_description: Option<String>,
}

impl ExportState {
    pub fn is_busy(&self) -> bool {
        self.operation_description.is_some()
    }

    /// Claim the export slot, or return false if an export is running.
    fn begin(&mut self, kind: ExportKind) -> bool {
        if self.is_busy() {
            warn!("Export already in progress, ignoring {} request", kind.display_name());
            return false;
        }
        self.operation_description = Some(format!("Saving {}...", kind.display_name()));
        true
    }
}

/// Last export failure, shown in an error dialog until dismissed
#[derive(Resource, Default)]
pub struct ExportFailure {
    pub message: Option<String>,
}

/// Confirmation shown after a PDF was written
#[derive(Resource, Default)]
pub struct ExportNotice {
    pub message: Option<String>,
}

fn export_canvas_image_system(
    mut commands: Commands,
    mut events: MessageReader<ExportCanvasImageRequest>,
    surface: Res<DrawingSurface>,
    mut state: ResMut<ExportState>,
) {
    for event in events.read() {
        if !state.begin(ExportKind::CanvasImage) {
            continue;
        }
        let image = surface.image().clone();
        let path = event.path.clone();
        let task = IoTaskPool::get().spawn(async move {
            ExportResult {
                kind: ExportKind::CanvasImage,
                result: files::write_canvas_image(&image, &path),
            }
        });
        commands.spawn(ExportTask(task));
    }
}

fn export_notes_text_system(
    mut commands: Commands,
    mut events: MessageReader<ExportNotesTextRequest>,
    editor: Res<NotesEditor>,
    mut state: ResMut<ExportState>,
) {
    for event in events.read() {
        if !state.begin(ExportKind::NotesText) {
            continue;
        }
        let text = editor.text.clone();
        let path = event.path.clone();
        let task = IoTaskPool::get().spawn(async move {
            ExportResult {
                kind: ExportKind::NotesText,
                result: files::write_notes_text(&text, &path),
            }
        });
        commands.spawn(ExportTask(task));
    }
}

/// Starts a PDF export; the write task is spawned once the window capture arrives
fn export_pdf_system(
    mut commands: Commands,
    mut events: MessageReader<ExportPdfRequest>,
    mut state: ResMut<ExportState>,
    mut pending: ResMut<PendingPdfExport>,
) {
    for event in events.read() {
        if !state.begin(ExportKind::Pdf) {
            continue;
        }
        snapshot::request_notes_capture(&mut commands, &mut pending, event.path.clone());
    }
}

/// Polls export tasks and handles completion
fn poll_export_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut ExportTask)>,
    mut state: ResMut<ExportState>,
    mut failure: ResMut<ExportFailure>,
    mut notice: ResMut<ExportNotice>,
    mut config_events: MessageWriter<UpdateLastExportDirRequest>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(outcome) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };
        state.operation_description = None;

        match outcome.result {
            Ok(path) => {
                info!("Saved {} to {:?}", outcome.kind.display_name(), path);
                failure.message = None;
                if outcome.kind == ExportKind::Pdf {
                    notice.message = Some(format!("Successfully saved PDF to:\n{}", path.display()));
                }
                config_events.write(UpdateLastExportDirRequest { path });
            }
            Err(e) => {
                error!("Export of {} failed: {}", outcome.kind.display_name(), e);
                failure.message = Some(e.to_string());
            }
        }

        commands.entity(entity).despawn();
    }
}

pub struct ExportPlugin;

impl Plugin for ExportPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ExportCanvasImageRequest>()
            .add_message::<ExportNotesTextRequest>()
            .add_message::<ExportPdfRequest>()
            .init_resource::<ExportState>()
            .init_resource::<ExportFailure>()
            .init_resource::<ExportNotice>()
            .init_resource::<PendingPdfExport>()
            .add_systems(
                Update,
                (
                    export_canvas_image_system.run_if(on_message::<ExportCanvasImageRequest>),
                    export_notes_text_system.run_if(on_message::<ExportNotesTextRequest>),
                    export_pdf_system.run_if(on_message::<ExportPdfRequest>),
                    poll_export_tasks,
                ),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_state_allows_one_export_at_a_time() {
        let mut state = ExportState::default();
        assert!(!state.is_busy());
        assert!(state.begin(ExportKind::Pdf));
        assert!(state.is_busy());
        assert!(!state.begin(ExportKind::CanvasImage));
        assert_eq!(state.operation_description.as_deref(), Some("Saving PDF..."));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ExportKind::NotesText.display_name(), "notes text");
        assert_eq!(ExportKind::CanvasImage.display_name(), "canvas image");
    }
}
