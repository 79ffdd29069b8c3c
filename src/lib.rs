//! PosterKit
//!
//! A headless poster editor and export engine for Rust: it owns the
//! canonical editable poster document, applies validated edits (text
//! commits, image picks, guest grid changes), and exports the rendered
//! poster as a PNG or a single-page PDF.
//!
//! # Features
//!
//! - **Fixed-shape document model**: one poster, seven text fields, a
//!   bounded guest grid with stable, never-reused ids
//! - **Mediated edits**: an active-edit-target handshake for image picks,
//!   silent absorption of malformed internal calls
//! - **Deterministic exports**: render overrides are passed as parameters
//!   (never mutated into live style), so snapshots are reproducible and
//!   there is no visual state to restore
//!
//! # Example
//!
//! ```
//! use posterkit::{
//!     export_png, BlockRasterizer, Editor, EditorConfig, ExportOptions, PosterSurface,
//!     SurfaceSize, TextTarget,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut editor = Editor::new(EditorConfig::default());
//! editor.commit_text(TextTarget::Field("title".into()), "NIGHT SHIFT");
//!
//! let surface = PosterSurface::mounted(
//!     editor.document().clone(),
//!     SurfaceSize { width: 120, height: 160 },
//! );
//! let artifact = export_png(
//!     Some(&surface),
//!     &BlockRasterizer::new(),
//!     &ExportOptions { scale: 1, background: None },
//! )?
//! .expect("surface is mounted");
//! assert_eq!(artifact.file_name, "poster.png");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod document;
pub mod editor;
pub mod export;
pub mod ingest;
pub mod rendering;

// Async session facade (worker-backed abstraction)
pub mod session;

pub use document::{Document, Guest, GuestEdit, ImageRef, Logo, TextField, Texts, MAX_GUESTS};
pub use editor::{EditTarget, Editor, GuestTextField, TextTarget};
pub use export::{
    export_pdf, export_png, page_size_mm, Artifact, ExportOptions, PDF_FILE_NAME,
    PDF_PAGE_WIDTH_MM, PNG_FILE_NAME,
};
pub use rendering::{
    Bitmap, BlockRasterizer, PosterStyle, PosterSurface, RasterOptions, Rasterizer,
    RenderOverrides, Rgba, TitleFill,
};

// Re-export the session types at the crate root for ergonomic use
pub use session::{Session, Studio};

/// Base dimensions of the mounted poster surface, in CSS-like pixels.
/// Exports multiply these by the quality scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self {
            width: 480,
            height: 640,
        }
    }
}

/// Configuration for the poster editor
///
/// The defaults mirror the live poster: a portrait surface, 4x export
/// quality, a transparent export canvas, and the stock placeholder image
/// for newly added guests.
///
/// # Examples
///
/// ```
/// let cfg = posterkit::EditorConfig::default();
/// assert_eq!(cfg.export_scale, 4);
/// ```
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Base surface dimensions
    pub surface: SurfaceSize,
    /// Quality multiplier applied to exports
    pub export_scale: u32,
    /// Export canvas background; `None` keeps it transparent
    pub background: Option<Rgba>,
    /// Image shown for newly added guests until the user picks one
    pub placeholder_guest_image: ImageRef,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceSize::default(),
            export_scale: 4,
            background: None,
            placeholder_guest_image: ImageRef::remote(document::PLACEHOLDER_GUEST_IMAGE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.surface.width, 480);
        assert_eq!(config.surface.height, 640);
        assert_eq!(config.export_scale, 4);
        assert!(config.background.is_none());
    }

    #[test]
    fn test_surface_size() {
        let size = SurfaceSize {
            width: 1080,
            height: 1920,
        };
        assert_eq!(size.width, 1080);
        assert_eq!(size.height, 1920);
    }
}
