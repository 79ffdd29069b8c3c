//! Edit mediator: translates presentation-layer commit events into document
//! mutations and owns the single pending image-edit target.
//!
//! The presentation layer emits two kinds of commits: a finalized text edit
//! (an editable region losing focus) and a completed image pick. Text commits
//! route straight through; image picks are a two-step handshake — an
//! image-region click calls [`Editor::begin_image_edit`] to mark where the
//! next picked image belongs, and the eventual file bytes arrive through
//! [`Editor::commit_image`], which resolves and clears that target.

use crate::document::{Document, GuestEdit, ImageRef};
use crate::error::Result;
use crate::ingest;
use crate::EditorConfig;

/// The pending destination for the next completed image selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Poster,
    Logo,
    Guest(u32),
}

/// Which of a guest's two text fields a commit addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestTextField {
    Name,
    Title,
}

/// Identity of a finalized text edit: a global field (by its
/// presentation-layer name) or one of a guest's text fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextTarget {
    Field(String),
    Guest { id: u32, field: GuestTextField },
}

/// Owns the document and applies validated edits to it.
pub struct Editor {
    config: EditorConfig,
    document: Document,
    pending: Option<EditTarget>,
}

impl Editor {
    /// Create an editor over a freshly seeded document.
    pub fn new(config: EditorConfig) -> Editor {
        Editor::with_document(config, Document::seeded())
    }

    pub fn with_document(config: EditorConfig, document: Document) -> Editor {
        Editor {
            config,
            document,
            pending: None,
        }
    }

    /// Read access to the current document state.
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The currently pending image-edit target, if any.
    pub fn pending_target(&self) -> Option<EditTarget> {
        self.pending
    }

    /// Mark where the next picked image belongs. At most one target is
    /// pending at a time; a new call overwrites the previous one — there is
    /// no queueing.
    pub fn begin_image_edit(&mut self, target: EditTarget) {
        if let Some(previous) = self.pending.replace(target) {
            log::debug!(
                "begin_image_edit: replacing pending target {:?} with {:?}",
                previous,
                target
            );
        }
    }

    /// Resolve a completed image pick against the pending target.
    ///
    /// The bytes are validated by full decode before any mutation; a decode
    /// failure surfaces as [`Error::Decode`](crate::Error::Decode) and still
    /// clears the pending target so the user can retry cleanly. With no
    /// pending target the call is a defensive no-op — single-threaded UI
    /// sequencing should make that unreachable, but it must not crash.
    pub fn commit_image(&mut self, bytes: &[u8]) -> Result<()> {
        let Some(target) = self.pending.take() else {
            log::debug!("commit_image with no pending target; ignoring");
            return Ok(());
        };

        let image = ingest::decode(bytes)?;
        self.apply_image(target, image);
        Ok(())
    }

    /// Dispatch an already-ingested image reference to the pending target.
    /// Used by callers that ran ingestion themselves (e.g. the async session
    /// reading a picked file off-thread).
    pub fn commit_image_ref(&mut self, image: ImageRef) {
        let Some(target) = self.pending.take() else {
            log::debug!("commit_image_ref with no pending target; ignoring");
            return;
        };
        self.apply_image(target, image);
    }

    fn apply_image(&mut self, target: EditTarget, image: ImageRef) {
        match target {
            EditTarget::Poster => self.document.set_poster_image(image),
            EditTarget::Logo => self.document.set_logo_custom(image),
            EditTarget::Guest(id) => {
                self.document.update_guest(id, GuestEdit::Image(image));
            }
        }
    }

    /// Route a finalized text edit to the document. Unrecognized global
    /// field names and unknown guest ids are absorbed as silent no-ops.
    pub fn commit_text(&mut self, target: TextTarget, value: impl Into<String>) {
        let value = value.into();
        match target {
            TextTarget::Field(name) => self.document.set_text_by_name(&name, value),
            TextTarget::Guest { id, field } => {
                let edit = match field {
                    GuestTextField::Name => GuestEdit::Name(value),
                    GuestTextField::Title => GuestEdit::Title(value),
                };
                self.document.update_guest(id, edit);
            }
        }
    }

    /// Append a guest, returning the assigned id.
    pub fn add_guest(&mut self) -> Result<u32> {
        let placeholder = self.config.placeholder_guest_image.clone();
        self.document.add_guest_with(placeholder).map(|g| g.id)
    }

    /// Remove the most recently added guest, returning its id if one existed.
    pub fn remove_guest(&mut self) -> Option<u32> {
        self.document.remove_guest().map(|g| g.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Logo;
    use image::{DynamicImage, RgbaImage};
    use std::io::Cursor;

    fn editor() -> Editor {
        Editor::new(EditorConfig::default())
    }

    fn png_bytes() -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            2,
            2,
            image::Rgba([200, 100, 50, 255]),
        ));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageOutputFormat::Png)
            .expect("encode fixture");
        buf
    }

    #[test]
    fn commit_image_routes_to_poster_and_clears_target() {
        let mut ed = editor();
        ed.begin_image_edit(EditTarget::Poster);
        ed.commit_image(&png_bytes()).expect("decodable");

        assert!(ed.document().poster_image.is_inline());
        assert_eq!(ed.pending_target(), None);
    }

    #[test]
    fn commit_image_routes_to_logo() {
        let mut ed = editor();
        ed.begin_image_edit(EditTarget::Logo);
        ed.commit_image(&png_bytes()).expect("decodable");
        assert!(matches!(ed.document().logo, Logo::Custom { .. }));
    }

    #[test]
    fn commit_image_routes_to_the_selected_guest() {
        let mut ed = editor();
        ed.begin_image_edit(EditTarget::Guest(3));
        ed.commit_image(&png_bytes()).expect("decodable");

        let guest = ed.document().guests.iter().find(|g| g.id == 3).unwrap();
        assert!(guest.image.is_inline());
        // Neighbours untouched
        let other = ed.document().guests.iter().find(|g| g.id == 4).unwrap();
        assert!(!other.image.is_inline());
    }

    #[test]
    fn a_new_target_overwrites_the_previous_one() {
        let mut ed = editor();
        ed.begin_image_edit(EditTarget::Logo);
        ed.begin_image_edit(EditTarget::Poster);
        ed.commit_image(&png_bytes()).expect("decodable");

        assert!(ed.document().poster_image.is_inline());
        assert_eq!(ed.document().logo, Logo::Default);
    }

    #[test]
    fn commit_image_without_target_is_a_noop() {
        let mut ed = editor();
        let before = ed.document().clone();
        ed.commit_image(&png_bytes()).expect("no-op succeeds");
        assert_eq!(ed.document(), &before);
    }

    #[test]
    fn decode_failure_clears_the_target_for_a_clean_retry() {
        let mut ed = editor();
        ed.begin_image_edit(EditTarget::Poster);
        let before = ed.document().clone();

        ed.commit_image(b"not an image").expect_err("undecodable");
        assert_eq!(ed.document(), &before, "failed pick must not mutate");
        assert_eq!(ed.pending_target(), None, "target cleared for retry");
    }

    #[test]
    fn pre_ingested_refs_dispatch_like_picks() {
        let mut ed = editor();
        ed.begin_image_edit(EditTarget::Logo);
        ed.commit_image_ref(ImageRef::inline("image/png", "QUJD"));
        assert!(matches!(ed.document().logo, Logo::Custom { .. }));

        let before = ed.document().clone();
        ed.commit_image_ref(ImageRef::inline("image/png", "QUJD"));
        assert_eq!(ed.document(), &before, "no pending target is absorbed");
    }

    #[test]
    fn commit_text_routes_global_fields_and_guest_fields() {
        let mut ed = editor();
        ed.commit_text(TextTarget::Field("tagline".into()), "One Night Only");
        ed.commit_text(
            TextTarget::Guest {
                id: 1,
                field: GuestTextField::Name,
            },
            "Sarah Johnson",
        );

        assert_eq!(ed.document().texts.tagline, "One Night Only");
        assert_eq!(ed.document().guests[0].name, "Sarah Johnson");
    }

    #[test]
    fn commit_text_to_unknown_guest_is_a_noop() {
        let mut ed = editor();
        let before = ed.document().clone();
        ed.commit_text(
            TextTarget::Guest {
                id: 42,
                field: GuestTextField::Title,
            },
            "Ghost",
        );
        assert_eq!(ed.document(), &before);
    }

    #[test]
    fn add_and_remove_guest_pass_through() {
        let mut ed = editor();
        let id = ed.add_guest().expect("room for guest");
        assert_eq!(id, 7);
        assert_eq!(ed.remove_guest(), Some(7));
    }
}
