//! Native save dialogs for the export actions.

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use futures_lite::future;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::export::{ExportCanvasImageRequest, ExportNotesTextRequest, ExportPdfRequest};
use crate::paths;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTarget {
    Pdf,
    CanvasImage,
    NotesText,
}

impl SaveTarget {
    pub fn title(&self) -> &'static str {
        match self {
            SaveTarget::Pdf => "Save as PDF",
            SaveTarget::CanvasImage => "Save Canvas Image",
            SaveTarget::NotesText => "Save Notes",
        }
    }

    /// (filter name, extensions) pairs offered by the dialog
    pub fn filters(&self) -> &'static [(&'static str, &'static [&'static str])] {
        match self {
            SaveTarget::Pdf => &[("PDF Files", &["pdf"])],
            SaveTarget::CanvasImage => &[("PNG Files", &["png"]), ("All Files", &["*"])],
            SaveTarget::NotesText => &[("Text Files", &["txt"]), ("All Files", &["*"])],
        }
    }

    pub fn default_file_name(&self) -> &'static str {
        match self {
            SaveTarget::Pdf => "notes.pdf",
            SaveTarget::CanvasImage => "canvas.png",
            SaveTarget::NotesText => "notes.txt",
        }
    }
}

/// The save dialog currently open, if any
#[derive(Resource, Default)]
pub struct SaveDialogs {
    pending: Option<(SaveTarget, Task<Option<PathBuf>>)>,
}

impl SaveDialogs {
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Open a save dialog unless one is already showing.
    pub fn open(&mut self, target: SaveTarget, config: &AppConfig) {
        if self.pending.is_some() {
            return;
        }
        let start_dir = config
            .data
            .last_export_dir
            .clone()
            .filter(|dir| dir.is_dir())
            .or_else(paths::default_export_dir);

        let task_pool = AsyncComputeTaskPool::get();
        let task = task_pool.spawn(async move {
            let mut dialog = rfd::AsyncFileDialog::new()
                .set_title(target.title())
                .set_file_name(target.default_file_name());
            for (name, extensions) in target.filters() {
                dialog = dialog.add_filter(*name, *extensions);
            }
            if let Some(dir) = start_dir {
                dialog = dialog.set_directory(dir);
            }
            dialog.save_file().await.map(|h| h.path().to_path_buf())
        });
        self.pending = Some((target, task));
    }
}

/// Forward a chosen path to the matching exporter; cancelled dialogs do nothing
pub fn poll_save_dialogs(
    mut dialogs: ResMut<SaveDialogs>,
    mut pdf_events: MessageWriter<ExportPdfRequest>,
    mut image_events: MessageWriter<ExportCanvasImageRequest>,
    mut text_events: MessageWriter<ExportNotesTextRequest>,
) {
    let Some((target, task)) = dialogs.pending.as_mut() else {
        return;
    };
    let Some(result) = future::block_on(future::poll_once(task)) else {
        return;
    };
    let target = *target;
    dialogs.pending = None;

    let Some(path) = result else {
        debug!("{} cancelled", target.title());
        return;
    };
    match target {
        SaveTarget::Pdf => {
            pdf_events.write(ExportPdfRequest { path });
        }
        SaveTarget::CanvasImage => {
            image_events.write(ExportCanvasImageRequest { path });
        }
        SaveTarget::NotesText => {
            text_events.write(ExportNotesTextRequest { path });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_titles() {
        assert_eq!(SaveTarget::Pdf.title(), "Save as PDF");
        assert_eq!(SaveTarget::CanvasImage.title(), "Save Canvas Image");
        assert_eq!(SaveTarget::NotesText.title(), "Save Notes");
    }

    #[test]
    fn test_primary_filter_matches_default_name() {
        for target in [SaveTarget::Pdf, SaveTarget::CanvasImage, SaveTarget::NotesText] {
            let (_, extensions) = target.filters()[0];
            let name = target.default_file_name();
            assert!(name.ends_with(&format!(".{}", extensions[0])), "{name}");
        }
    }
}
