//! Image ingestion: turn user-picked files into inline image references.
//!
//! A picked file is validated by fully decoding it before anything touches
//! the document — a file that merely has an image extension is not enough.
//! The result is a self-contained [`ImageRef::Inline`] so the poster keeps
//! rendering (and exporting) even if the source file disappears.

use crate::document::ImageRef;
use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::ImageFormat;
use std::path::Path;

/// Validate raw bytes as a decodable image and wrap them in an inline
/// reference carrying the sniffed media type.
pub fn decode(bytes: &[u8]) -> Result<ImageRef> {
    let format = image::guess_format(bytes)
        .map_err(|e| Error::Decode(format!("Unrecognized image data: {}", e)))?;

    // Full decode, not just a header sniff: a truncated or corrupt file must
    // be rejected before it reaches the document.
    image::load_from_memory_with_format(bytes, format)
        .map_err(|e| Error::Decode(format!("Failed to decode image: {}", e)))?;

    Ok(ImageRef::inline(
        media_type_for(format),
        BASE64.encode(bytes),
    ))
}

/// Read a user-picked file and ingest it. Asynchronous — the read happens on
/// the runtime's blocking pool, never on the caller's thread. Resolves once,
/// with the inline reference or the decode failure.
pub async fn read_image_file(path: impl AsRef<Path>) -> Result<ImageRef> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    decode(&bytes)
}

fn media_type_for(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::Gif => "image/gif",
        ImageFormat::WebP => "image/webp",
        ImageFormat::Bmp => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Decode an inline reference back to pixels. Used by the built-in
/// rasterizer when blitting ingested images.
pub(crate) fn decode_inline(media_type: &str, data: &str) -> Result<image::DynamicImage> {
    let bytes = BASE64
        .decode(data)
        .map_err(|e| Error::Decode(format!("Invalid base64 payload ({}): {}", media_type, e)))?;
    image::load_from_memory(&bytes)
        .map_err(|e| Error::Decode(format!("Failed to decode inline image: {}", e)))
}
