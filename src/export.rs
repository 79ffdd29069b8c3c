//! Export pipeline: snapshot the rendered poster and package it as a
//! downloadable artifact.
//!
//! Every export runs the same first half: bail out quietly when no surface
//! is mounted, otherwise rasterize at the quality multiplier with the
//! compatibility overrides applied (solid title fill, full-bleed frame).
//! The second half branches on format — a PNG byte stream, or a single-page
//! PDF whose page is 210mm wide with height matching the snapshot's aspect
//! ratio and the image filling the entire page.

use crate::error::{Error, Result};
use crate::rendering::{Bitmap, PosterSurface, RasterOptions, Rasterizer, RenderOverrides, Rgba};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref};
use std::path::{Path, PathBuf};

/// Fixed page width of the PDF artifact, in millimetres (A4 width).
pub const PDF_PAGE_WIDTH_MM: f32 = 210.0;

pub const PNG_FILE_NAME: &str = "poster.png";
pub const PDF_FILE_NAME: &str = "poster.pdf";

/// A finished export: the artifact bytes plus the download name the
/// presentation layer offers the user.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Write the artifact into `dir` under its download name.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Export parameters: the quality multiplier and canvas background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub scale: u32,
    pub background: Option<Rgba>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            scale: 4,
            background: None,
        }
    }
}

/// Page size for a snapshot of the given pixel dimensions: fixed 210mm
/// width, proportional height.
pub fn page_size_mm(width_px: u32, height_px: u32) -> (f32, f32) {
    let height = height_px as f32 / width_px as f32 * PDF_PAGE_WIDTH_MM;
    (PDF_PAGE_WIDTH_MM, height)
}

fn mm_to_pt(mm: f32) -> f32 {
    mm / 25.4 * 72.0
}

/// Steps 1–3 of every export: no mounted surface means no artifact (a
/// benign outcome, not an error), otherwise snapshot with the export
/// overrides passed as render parameters. Nothing is mutated, so there is
/// no visual state to restore afterwards.
fn snapshot(
    surface: Option<&PosterSurface>,
    rasterizer: &dyn Rasterizer,
    options: &ExportOptions,
) -> Result<Option<Bitmap>> {
    let Some(surface) = surface else {
        log::debug!("export requested with no mounted surface; skipping");
        return Ok(None);
    };
    let raster_options = RasterOptions {
        scale: options.scale,
        background: options.background,
        overrides: RenderOverrides::export_defaults(),
    };
    rasterizer.rasterize(surface, &raster_options).map(Some)
}

/// Export the poster as `poster.png`.
pub fn export_png(
    surface: Option<&PosterSurface>,
    rasterizer: &dyn Rasterizer,
    options: &ExportOptions,
) -> Result<Option<Artifact>> {
    let Some(bitmap) = snapshot(surface, rasterizer, options)? else {
        return Ok(None);
    };
    let bytes = bitmap.encode_png()?;
    log::info!(
        "exported {} ({}x{}, {} bytes)",
        PNG_FILE_NAME,
        bitmap.width,
        bitmap.height,
        bytes.len()
    );
    Ok(Some(Artifact {
        file_name: PNG_FILE_NAME.to_string(),
        bytes,
    }))
}

/// Export the poster as `poster.pdf`: one page, 210mm wide, the snapshot
/// filling the page edge to edge.
pub fn export_pdf(
    surface: Option<&PosterSurface>,
    rasterizer: &dyn Rasterizer,
    options: &ExportOptions,
) -> Result<Option<Artifact>> {
    let Some(bitmap) = snapshot(surface, rasterizer, options)? else {
        return Ok(None);
    };
    let bytes = encode_pdf(&bitmap)?;
    log::info!("exported {} ({} bytes)", PDF_FILE_NAME, bytes.len());
    Ok(Some(Artifact {
        file_name: PDF_FILE_NAME.to_string(),
        bytes,
    }))
}

// Single-page assembly: catalog -> page tree -> page -> image XObject plus
// a content stream that maps the image onto the full page. The snapshot is
// embedded as zlib-compressed RGB with its alpha channel as a soft mask.
fn encode_pdf(bitmap: &Bitmap) -> Result<Vec<u8>> {
    if bitmap.width == 0 || bitmap.height == 0 {
        return Err(Error::Export("Cannot embed an empty snapshot".into()));
    }

    let (page_w_mm, page_h_mm) = page_size_mm(bitmap.width, bitmap.height);
    let page_w = mm_to_pt(page_w_mm);
    let page_h = mm_to_pt(page_h_mm);

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let image_id = Ref::new(4);
    let mask_id = Ref::new(5);
    let content_id = Ref::new(6);
    let image_name = Name(b"I0");

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    {
        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, page_w, page_h));
        page.parent(page_tree_id);
        page.contents(content_id);
        page.resources().x_objects().pair(image_name, image_id);
        page.finish();
    }

    let level = CompressionLevel::DefaultLevel as u8;
    let pixels = bitmap.rgba.len() / 4;
    let mut rgb = Vec::with_capacity(pixels * 3);
    let mut alpha = Vec::with_capacity(pixels);
    let mut has_alpha = false;
    for px in bitmap.rgba.chunks_exact(4) {
        rgb.extend_from_slice(&px[0..3]);
        alpha.push(px[3]);
        if px[3] != 255 {
            has_alpha = true;
        }
    }

    let rgb_compressed = compress_to_vec_zlib(&rgb, level);
    let mut image = pdf.image_xobject(image_id, &rgb_compressed);
    image.filter(Filter::FlateDecode);
    image.width(bitmap.width as i32);
    image.height(bitmap.height as i32);
    image.color_space().device_rgb();
    image.bits_per_component(8);
    if has_alpha {
        image.s_mask(mask_id);
    }
    image.finish();

    if has_alpha {
        let alpha_compressed = compress_to_vec_zlib(&alpha, level);
        let mut mask = pdf.image_xobject(mask_id, &alpha_compressed);
        mask.filter(Filter::FlateDecode);
        mask.width(bitmap.width as i32);
        mask.height(bitmap.height as i32);
        mask.color_space().device_gray();
        mask.bits_per_component(8);
        mask.finish();
    }

    let mut content = Content::new();
    content.save_state();
    content.transform([page_w, 0.0, 0.0, page_h, 0.0, 0.0]);
    content.x_object(image_name);
    content.restore_state();
    pdf.stream(content_id, &content.finish());

    Ok(pdf.finish())
}
