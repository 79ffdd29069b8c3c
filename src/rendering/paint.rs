//! Paint command set and the software painter that executes it.
//!
//! Commands are produced by the rasterizer from the computed poster layout
//! and executed in order over an RGBA buffer. Everything is clipped to the
//! bitmap bounds; painting never panics on out-of-range rectangles.

use super::layout::Rect;
use super::{Bitmap, Rgba};
use crate::document::ImageRef;
use crate::ingest;
use image::imageops::FilterType;
use image::GenericImageView;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    /// Solid fill, alpha-blended over existing content.
    Fill { rect: Rect, rgba: Rgba },
    /// Vertical linear gradient from `top` to `bottom`.
    GradientV { rect: Rect, top: Rgba, bottom: Rgba },
    /// Scale an image reference to cover the rectangle. Remote references
    /// paint as a deterministic placeholder fill; the painter performs no
    /// network I/O.
    Blit { rect: Rect, image: ImageRef },
    /// Clear the rectangle's corner pixels outside a quarter-circle of the
    /// given radius, producing a rounded frame.
    MaskCorners { rect: Rect, radius: u32 },
}

/// Execute a command list over the bitmap, in order.
pub fn paint(bitmap: &mut Bitmap, commands: &[PaintCommand]) {
    for command in commands {
        match command {
            PaintCommand::Fill { rect, rgba } => fill_rect(bitmap, *rect, *rgba),
            PaintCommand::GradientV { rect, top, bottom } => {
                fill_gradient_v(bitmap, *rect, *top, *bottom)
            }
            PaintCommand::Blit { rect, image } => blit(bitmap, *rect, image),
            PaintCommand::MaskCorners { rect, radius } => mask_corners(bitmap, *rect, *radius),
        }
    }
}

/// Straight-alpha source-over blend.
fn blend(dst: Rgba, src: Rgba) -> Rgba {
    let sa = src[3] as u32;
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }
    let da = dst[3] as u32;
    let out_a = sa + da * (255 - sa) / 255;
    if out_a == 0 {
        return [0, 0, 0, 0];
    }
    let ch = |s: u8, d: u8| -> u8 {
        ((s as u32 * sa + d as u32 * da * (255 - sa) / 255) / out_a) as u8
    };
    [
        ch(src[0], dst[0]),
        ch(src[1], dst[1]),
        ch(src[2], dst[2]),
        out_a as u8,
    ]
}

fn put(bitmap: &mut Bitmap, x: i32, y: i32, rgba: Rgba) {
    if x < 0 || y < 0 || x >= bitmap.width as i32 || y >= bitmap.height as i32 {
        return;
    }
    let i = ((y as usize) * (bitmap.width as usize) + (x as usize)) * 4;
    let dst = [
        bitmap.rgba[i],
        bitmap.rgba[i + 1],
        bitmap.rgba[i + 2],
        bitmap.rgba[i + 3],
    ];
    let out = blend(dst, rgba);
    bitmap.rgba[i..i + 4].copy_from_slice(&out);
}

fn fill_rect(bitmap: &mut Bitmap, rect: Rect, rgba: Rgba) {
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            put(bitmap, x, y, rgba);
        }
    }
}

fn fill_gradient_v(bitmap: &mut Bitmap, rect: Rect, top: Rgba, bottom: Rgba) {
    if rect.height == 0 {
        return;
    }
    let span = (rect.height - 1).max(1) as u32;
    for (row, y) in (rect.y..rect.bottom()).enumerate() {
        let t = row as u32;
        let lerp = |a: u8, b: u8| -> u8 {
            ((a as u32 * (span - t.min(span)) + b as u32 * t.min(span)) / span) as u8
        };
        let rgba = [
            lerp(top[0], bottom[0]),
            lerp(top[1], bottom[1]),
            lerp(top[2], bottom[2]),
            lerp(top[3], bottom[3]),
        ];
        for x in rect.x..rect.right() {
            put(bitmap, x, y, rgba);
        }
    }
}

/// Placeholder fill for remote references: a muted color derived from the
/// URL, stable across runs so snapshots stay reproducible.
pub fn placeholder_color(url: &str) -> Rgba {
    let digest = Sha256::digest(url.as_bytes());
    [
        64 + digest[0] % 96,
        64 + digest[1] % 96,
        64 + digest[2] % 96,
        255,
    ]
}

fn blit(bitmap: &mut Bitmap, rect: Rect, image: &ImageRef) {
    if rect.width == 0 || rect.height == 0 {
        return;
    }
    match image {
        ImageRef::Remote { url } => fill_rect(bitmap, rect, placeholder_color(url)),
        ImageRef::Inline { media_type, data } => {
            let decoded = match ingest::decode_inline(media_type, data) {
                Ok(img) => img,
                Err(e) => {
                    // Ingestion validates before anything lands in the
                    // document, so this indicates a collaborator bug.
                    log::warn!("blit: undecodable inline image: {}", e);
                    fill_rect(bitmap, rect, placeholder_color(data));
                    return;
                }
            };
            let scaled = decoded.resize_exact(rect.width, rect.height, FilterType::Nearest);
            for (dx, dy, px) in scaled.pixels() {
                put(bitmap, rect.x + dx as i32, rect.y + dy as i32, px.0);
            }
        }
    }
}

fn mask_corners(bitmap: &mut Bitmap, rect: Rect, radius: u32) {
    if radius == 0 {
        return;
    }
    let r = radius as i32;
    let corners = [
        (rect.x + r, rect.y + r),
        (rect.right() - r - 1, rect.y + r),
        (rect.x + r, rect.bottom() - r - 1),
        (rect.right() - r - 1, rect.bottom() - r - 1),
    ];
    for (i, (cx, cy)) in corners.iter().enumerate() {
        let (x0, y0) = match i {
            0 => (rect.x, rect.y),
            1 => (rect.right() - r, rect.y),
            2 => (rect.x, rect.bottom() - r),
            _ => (rect.right() - r, rect.bottom() - r),
        };
        for y in y0..y0 + r {
            for x in x0..x0 + r {
                let dx = x - cx;
                let dy = y - cy;
                if dx * dx + dy * dy > r * r {
                    clear(bitmap, x, y);
                }
            }
        }
    }
}

fn clear(bitmap: &mut Bitmap, x: i32, y: i32) {
    if x < 0 || y < 0 || x >= bitmap.width as i32 || y >= bitmap.height as i32 {
        return;
    }
    let i = ((y as usize) * (bitmap.width as usize) + (x as usize)) * 4;
    bitmap.rgba[i..i + 4].copy_from_slice(&[0, 0, 0, 0]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ImageRef;
    use image::RgbaImage;
    use std::io::Cursor;

    #[test]
    fn fill_covers_the_rect_and_clips_to_bounds() {
        let mut bmp = Bitmap::new(8, 8);
        fill_rect(&mut bmp, Rect::new(4, 4, 100, 100), [10, 20, 30, 255]);
        assert_eq!(bmp.pixel(5, 5), [10, 20, 30, 255]);
        assert_eq!(bmp.pixel(0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn negative_origin_rects_do_not_panic() {
        let mut bmp = Bitmap::new(8, 8);
        fill_rect(&mut bmp, Rect::new(-4, -4, 6, 6), [255, 0, 0, 255]);
        assert_eq!(bmp.pixel(1, 1), [255, 0, 0, 255]);
    }

    #[test]
    fn gradient_varies_between_top_and_bottom_rows() {
        let mut bmp = Bitmap::new(4, 16);
        fill_gradient_v(
            &mut bmp,
            Rect::new(0, 0, 4, 16),
            [0, 0, 0, 255],
            [255, 255, 255, 255],
        );
        assert_ne!(bmp.pixel(0, 0), bmp.pixel(0, 15));
        assert_eq!(bmp.pixel(0, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn solid_fill_is_uniform_across_rows() {
        let mut bmp = Bitmap::new(4, 16);
        fill_rect(&mut bmp, Rect::new(0, 0, 4, 16), [200, 200, 200, 255]);
        assert_eq!(bmp.pixel(0, 0), bmp.pixel(0, 15));
    }

    #[test]
    fn remote_blit_paints_a_stable_placeholder() {
        let url = "https://example.com/poster.jpg";
        assert_eq!(placeholder_color(url), placeholder_color(url));

        let mut bmp = Bitmap::new(4, 4);
        blit(
            &mut bmp,
            Rect::new(0, 0, 4, 4),
            &ImageRef::remote(url),
        );
        assert_eq!(bmp.pixel(2, 2), placeholder_color(url));
    }

    #[test]
    fn inline_blit_scales_to_the_rect() {
        let img = image::DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            2,
            2,
            image::Rgba([9, 99, 199, 255]),
        ));
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), image::ImageOutputFormat::Png)
            .expect("encode");
        let r = crate::ingest::decode(&png).expect("decode");

        let mut bmp = Bitmap::new(8, 8);
        blit(&mut bmp, Rect::new(0, 0, 8, 8), &r);
        assert_eq!(bmp.pixel(0, 0), [9, 99, 199, 255]);
        assert_eq!(bmp.pixel(7, 7), [9, 99, 199, 255]);
    }

    #[test]
    fn mask_corners_clears_outside_the_radius() {
        let mut bmp = Bitmap::new(16, 16);
        fill_rect(&mut bmp, Rect::new(0, 0, 16, 16), [255, 255, 255, 255]);
        mask_corners(&mut bmp, Rect::new(0, 0, 16, 16), 4);

        assert_eq!(bmp.pixel(0, 0), [0, 0, 0, 0], "corner pixel cleared");
        assert_eq!(bmp.pixel(8, 8), [255, 255, 255, 255], "center untouched");
    }
}
