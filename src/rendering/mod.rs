//! Rendering seam between the document model and the export pipeline.
//!
//! The export pipeline never touches presentation internals directly: it
//! sees a [`PosterSurface`] (the mounted document plus its visual style and
//! base size) and a [`Rasterizer`] that can snapshot that surface into a
//! [`Bitmap`]. Known rasterization incompatibilities are neutralized by
//! passing [`RenderOverrides`] *as parameters* — the live surface style is
//! never mutated, so there is no temporary visual state to restore and no
//! critical section around exports.

pub mod layout;
pub mod paint;
pub mod raster;

pub use raster::BlockRasterizer;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::SurfaceSize;
use sha2::{Digest, Sha256};

/// A straight-alpha RGBA color.
pub type Rgba = [u8; 4];

/// How the headline title is filled.
///
/// The on-screen default is a gradient clipped to the glyphs — the one
/// styling the raster snapshot path cannot capture faithfully, which is why
/// exports flatten it to a solid fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleFill {
    Gradient(Rgba, Rgba),
    Solid(Rgba),
}

/// Visual styling of the mounted poster that is not part of the document:
/// cosmetic frame chrome and the title fill technique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterStyle {
    /// Corner rounding of the poster frame, in surface pixels.
    pub corner_radius: u32,
    /// Whether the frame casts a drop shadow.
    pub frame_shadow: bool,
    pub title_fill: TitleFill,
}

impl Default for PosterStyle {
    fn default() -> Self {
        PosterStyle {
            corner_radius: 16,
            frame_shadow: true,
            title_fill: TitleFill::Gradient([255, 255, 255, 255], [168, 139, 250, 255]),
        }
    }
}

/// Render-time parameter overrides that neutralize known rasterizer
/// limitations. Applied per snapshot; the surface's own [`PosterStyle`] is
/// left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOverrides {
    /// Replace a gradient title fill with this solid color.
    pub flatten_title: Option<Rgba>,
    /// Drop corner rounding and frame shadow so the output is edge-to-edge.
    pub full_bleed: bool,
}

impl RenderOverrides {
    /// No overrides: render exactly what is on screen.
    pub fn none() -> RenderOverrides {
        RenderOverrides::default()
    }

    /// The compatibility transform every export applies: solid white title,
    /// full-bleed frame.
    pub fn export_defaults() -> RenderOverrides {
        RenderOverrides {
            flatten_title: Some([255, 255, 255, 255]),
            full_bleed: true,
        }
    }
}

/// The fully rendered poster as the export pipeline sees it: a document
/// snapshot, its visual style, and the base surface size.
#[derive(Debug, Clone)]
pub struct PosterSurface {
    pub document: Document,
    pub style: PosterStyle,
    pub size: SurfaceSize,
}

impl PosterSurface {
    pub fn mounted(document: Document, size: SurfaceSize) -> PosterSurface {
        PosterSurface {
            document,
            style: PosterStyle::default(),
            size,
        }
    }
}

/// Options for one rasterization pass, mirroring the snapshot capability's
/// surface: quality scale, canvas background, and the render overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterOptions {
    /// Quality multiplier over the surface's base size.
    pub scale: u32,
    /// Canvas background; `None` keeps the canvas transparent.
    pub background: Option<Rgba>,
    pub overrides: RenderOverrides,
}

impl Default for RasterOptions {
    fn default() -> Self {
        RasterOptions {
            scale: 4,
            background: None,
            overrides: RenderOverrides::none(),
        }
    }
}

/// A bitmap snapshot of the poster surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA, `width * height * 4` bytes.
    pub rgba: Vec<u8>,
}

impl Bitmap {
    /// An all-transparent bitmap.
    pub fn new(width: u32, height: u32) -> Bitmap {
        Bitmap {
            width,
            height,
            rgba: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    /// Content-addressed digest of the pixel data; rasterization is
    /// deterministic, so equal surfaces produce equal digests.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.width.to_le_bytes());
        hasher.update(self.height.to_le_bytes());
        hasher.update(&self.rgba);
        hex::encode(hasher.finalize())
    }

    /// Encode the snapshot as a PNG byte stream.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.rgba.clone())
            .ok_or_else(|| Error::Export("Bitmap buffer does not match dimensions".into()))?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(
                &mut std::io::Cursor::new(&mut buf),
                image::ImageOutputFormat::Png,
            )
            .map_err(|e| Error::Export(format!("PNG encoding failed: {}", e)))?;
        Ok(buf)
    }

    pub(crate) fn pixel(&self, x: u32, y: u32) -> Rgba {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.rgba[i],
            self.rgba[i + 1],
            self.rgba[i + 2],
            self.rgba[i + 3],
        ]
    }
}

/// Converts a rendered poster surface into a bitmap snapshot.
///
/// The crate ships [`BlockRasterizer`], a software implementation; embedders
/// with a real presentation layer can substitute their own.
pub trait Rasterizer {
    fn rasterize(&self, surface: &PosterSurface, options: &RasterOptions) -> Result<Bitmap>;
}
