//! Async-friendly session facade backed by a dedicated worker thread.
//!
//! The worker thread owns a synchronous [`Editor`], the mounted surface
//! style, and the rasterizer, and executes commands sent from async tasks.
//! One command loop is the whole concurrency story: edits and exports are
//! serialized, so at most one image target is pending and at most one export
//! is in flight at a time. There is no cancellation — a command runs to
//! completion or failure.

use crate::document::Document;
use crate::editor::{EditTarget, Editor, TextTarget};
use crate::export::{self, Artifact, ExportOptions};
use crate::rendering::{BlockRasterizer, PosterSurface, PosterStyle, TitleFill};
use crate::{Error, Result};
use crate::EditorConfig;
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::thread;
use tokio::sync::oneshot;

enum Command {
    CommitText(TextTarget, String, oneshot::Sender<Result<()>>),
    BeginImageEdit(EditTarget, oneshot::Sender<Result<()>>),
    CommitImage(Vec<u8>, oneshot::Sender<Result<()>>),
    AddGuest(oneshot::Sender<Result<u32>>),
    RemoveGuest(oneshot::Sender<Result<Option<u32>>>),
    SetTitleFill(TitleFill, oneshot::Sender<Result<()>>),
    Snapshot(oneshot::Sender<Result<Document>>),
    ExportPng(Option<PathBuf>, oneshot::Sender<Result<Option<Artifact>>>),
    ExportPdf(Option<PathBuf>, oneshot::Sender<Result<Option<Artifact>>>),
    Close(oneshot::Sender<Result<()>>),
}

/// An async poster-editing studio. Cloneable; all clones talk to the same
/// worker-owned editor.
#[derive(Clone)]
pub struct Studio {
    cmd_tx: Sender<Command>,
}

/// A handle for driving edits and exports on the studio's document.
#[derive(Clone)]
pub struct Session {
    cmd_tx: Sender<Command>,
}

enum ExportFormat {
    Png,
    Pdf,
}

impl Studio {
    /// Create a new studio (spawns a background thread that owns the editor
    /// and a seeded document).
    pub async fn new(config: Option<EditorConfig>) -> Result<Studio> {
        let config = config.unwrap_or_default();

        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx): (oneshot::Sender<Result<()>>, oneshot::Receiver<Result<()>>) =
            oneshot::channel();

        thread::spawn(move || {
            let mut editor = Editor::new(config);
            let mut style = PosterStyle::default();
            let rasterizer = BlockRasterizer::new();

            let _ = init_tx.send(Ok(()));

            // Command loop
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::CommitText(target, value, resp) => {
                        editor.commit_text(target, value);
                        let _ = resp.send(Ok(()));
                    }
                    Command::BeginImageEdit(target, resp) => {
                        editor.begin_image_edit(target);
                        let _ = resp.send(Ok(()));
                    }
                    Command::CommitImage(bytes, resp) => {
                        let _ = resp.send(editor.commit_image(&bytes));
                    }
                    Command::AddGuest(resp) => {
                        let _ = resp.send(editor.add_guest());
                    }
                    Command::RemoveGuest(resp) => {
                        let _ = resp.send(Ok(editor.remove_guest()));
                    }
                    Command::SetTitleFill(fill, resp) => {
                        style.title_fill = fill;
                        let _ = resp.send(Ok(()));
                    }
                    Command::Snapshot(resp) => {
                        let _ = resp.send(Ok(editor.document().clone()));
                    }
                    Command::ExportPng(path_opt, resp) => {
                        let res = run_export(
                            &editor,
                            &style,
                            &rasterizer,
                            ExportFormat::Png,
                            path_opt,
                        );
                        let _ = resp.send(res);
                    }
                    Command::ExportPdf(path_opt, resp) => {
                        let res = run_export(
                            &editor,
                            &style,
                            &rasterizer,
                            ExportFormat::Pdf,
                            path_opt,
                        );
                        let _ = resp.send(res);
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(Ok(()));
                        break;
                    }
                }
            }
        });

        // Wait for the worker to report it is running
        init_rx
            .await
            .map_err(|e| Error::Other(format!("Worker init canceled: {}", e)))??;

        Ok(Studio { cmd_tx })
    }

    /// Open a session handle backed by the same worker thread.
    pub fn session(&self) -> Session {
        Session {
            cmd_tx: self.cmd_tx.clone(),
        }
    }

    /// Shutdown the background worker.
    pub async fn close(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(Command::Close(tx));
        rx.await
            .map_err(|e| Error::Other(format!("Close canceled: {}", e)))?
    }
}

fn run_export(
    editor: &Editor,
    style: &PosterStyle,
    rasterizer: &BlockRasterizer,
    format: ExportFormat,
    path_opt: Option<PathBuf>,
) -> Result<Option<Artifact>> {
    let surface = PosterSurface {
        document: editor.document().clone(),
        style: style.clone(),
        size: editor.config().surface,
    };
    let options = ExportOptions {
        scale: editor.config().export_scale,
        background: editor.config().background,
    };
    let artifact = match format {
        ExportFormat::Png => export::export_png(Some(&surface), rasterizer, &options)?,
        ExportFormat::Pdf => export::export_pdf(Some(&surface), rasterizer, &options)?,
    };
    if let (Some(artifact), Some(dir)) = (&artifact, path_opt) {
        artifact.write_to_dir(dir)?;
    }
    Ok(artifact)
}

impl Session {
    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<Result<T>>) -> Command,
        what: &str,
    ) -> Result<T> {
        let (tx, rx) = oneshot::channel();
        let _ = self.cmd_tx.send(make(tx));
        rx.await
            .map_err(|e| Error::Other(format!("{} canceled: {}", what, e)))?
    }

    /// Commit a finalized text edit.
    pub async fn commit_text(&self, target: TextTarget, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        self.request(|tx| Command::CommitText(target, value, tx), "CommitText")
            .await
    }

    /// Mark where the next picked image belongs.
    pub async fn begin_image_edit(&self, target: EditTarget) -> Result<()> {
        self.request(|tx| Command::BeginImageEdit(target, tx), "BeginImageEdit")
            .await
    }

    /// Resolve a completed image pick from raw bytes.
    pub async fn commit_image(&self, bytes: Vec<u8>) -> Result<()> {
        self.request(|tx| Command::CommitImage(bytes, tx), "CommitImage")
            .await
    }

    /// Read a picked file off-thread and commit it against the pending
    /// target. The whole pick resolves here: decode failure surfaces and the
    /// pending target is cleared either way.
    pub async fn pick_image(&self, path: impl Into<PathBuf>) -> Result<()> {
        let bytes = tokio::fs::read(path.into()).await?;
        self.commit_image(bytes).await
    }

    /// Append a guest, returning its id.
    pub async fn add_guest(&self) -> Result<u32> {
        self.request(Command::AddGuest, "AddGuest").await
    }

    /// Remove the most recently added guest.
    pub async fn remove_guest(&self) -> Result<Option<u32>> {
        self.request(Command::RemoveGuest, "RemoveGuest").await
    }

    /// Restyle the mounted surface's title fill.
    pub async fn set_title_fill(&self, fill: TitleFill) -> Result<()> {
        self.request(|tx| Command::SetTitleFill(fill, tx), "SetTitleFill")
            .await
    }

    /// A snapshot of the current document state.
    pub async fn snapshot(&self) -> Result<Document> {
        self.request(Command::Snapshot, "Snapshot").await
    }

    /// Export `poster.png`; when `dir` is given the artifact is also written
    /// there under its download name.
    pub async fn export_png(&self, dir: Option<PathBuf>) -> Result<Option<Artifact>> {
        self.request(|tx| Command::ExportPng(dir, tx), "ExportPng")
            .await
    }

    /// Export `poster.pdf`; when `dir` is given the artifact is also written
    /// there under its download name.
    pub async fn export_pdf(&self, dir: Option<PathBuf>) -> Result<Option<Artifact>> {
        self.request(|tx| Command::ExportPdf(dir, tx), "ExportPdf")
            .await
    }
}
