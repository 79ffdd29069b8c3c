//! Built-in software rasterizer.
//!
//! [`BlockRasterizer`] paints the poster as blocks: the background image (or
//! a placeholder fill for remote references), the headline bands, the guest
//! grid, the detail row, and the logo chip. Glyph rendering belongs to the
//! presentation layer; text regions here are bands in the poster's palette.
//! The output is deterministic for a given surface and options, which the
//! golden tests rely on.

use super::layout::{layout_poster, Rect};
use super::paint::{paint, PaintCommand};
use super::{Bitmap, PosterSurface, RasterOptions, Rasterizer, TitleFill};
use crate::document::Logo;
use crate::error::{Error, Result};

const CONTENT_SCRIM: [u8; 4] = [12, 12, 16, 120];
const TAGLINE_BAND: [u8; 4] = [230, 230, 235, 220];
const DESCRIPTION_BAND: [u8; 4] = [208, 208, 214, 180];
const LABEL_BAND: [u8; 4] = [235, 235, 240, 200];
const NAME_BAND: [u8; 4] = [245, 245, 245, 230];
const GUEST_TITLE_BAND: [u8; 4] = [198, 198, 205, 200];
const DETAIL_BAND: [u8; 4] = [224, 224, 230, 200];
const LOGO_CHIP: [u8; 4] = [240, 240, 240, 90];
const FRAME_SHADOW: [u8; 4] = [0, 0, 0, 90];

#[derive(Debug, Default, Clone, Copy)]
pub struct BlockRasterizer;

impl BlockRasterizer {
    pub fn new() -> BlockRasterizer {
        BlockRasterizer
    }
}

impl Rasterizer for BlockRasterizer {
    fn rasterize(&self, surface: &PosterSurface, options: &RasterOptions) -> Result<Bitmap> {
        if options.scale == 0 {
            return Err(Error::Render("Scale must be at least 1".into()));
        }
        let width = surface.size.width * options.scale;
        let height = surface.size.height * options.scale;
        if width == 0 || height == 0 {
            return Err(Error::Render("Surface has zero area".into()));
        }

        let mut bitmap = Bitmap::new(width, height);
        let mut commands = Vec::new();

        let canvas = Rect::new(0, 0, width, height);
        if let Some(background) = options.background {
            commands.push(PaintCommand::Fill {
                rect: canvas,
                rgba: background,
            });
        }

        // On-screen chrome insets the frame so the shadow has somewhere to
        // fall; a full-bleed export paints edge to edge.
        let chrome = !options.overrides.full_bleed;
        let margin = if chrome {
            (width.min(height) / 28).max(2)
        } else {
            0
        };
        let frame = Rect::new(
            margin as i32,
            margin as i32,
            width - margin * 2,
            height - margin * 2,
        );

        if chrome && surface.style.frame_shadow {
            let offset = (margin / 2).max(1) as i32;
            commands.push(PaintCommand::Fill {
                rect: Rect::new(frame.x + offset, frame.y + offset, frame.width, frame.height),
                rgba: FRAME_SHADOW,
            });
        }

        commands.push(PaintCommand::Blit {
            rect: frame,
            image: surface.document.poster_image.clone(),
        });
        commands.push(PaintCommand::Fill {
            rect: frame,
            rgba: CONTENT_SCRIM,
        });

        let layout = layout_poster(&surface.document, frame);

        commands.push(PaintCommand::Fill {
            rect: layout.tagline,
            rgba: TAGLINE_BAND,
        });
        commands.push(title_command(
            layout.title,
            surface.style.title_fill,
            options.overrides.flatten_title,
        ));
        commands.push(PaintCommand::Fill {
            rect: layout.description,
            rgba: DESCRIPTION_BAND,
        });

        if let Some(label) = layout.guests_label {
            commands.push(PaintCommand::Fill {
                rect: label,
                rgba: LABEL_BAND,
            });
        }
        for (cell, guest) in layout.guest_cells.iter().zip(&surface.document.guests) {
            commands.push(PaintCommand::Blit {
                rect: cell.image,
                image: guest.image.clone(),
            });
            commands.push(PaintCommand::Fill {
                rect: cell.name,
                rgba: NAME_BAND,
            });
            commands.push(PaintCommand::Fill {
                rect: cell.title,
                rgba: GUEST_TITLE_BAND,
            });
        }

        for detail in layout.details {
            commands.push(PaintCommand::Fill {
                rect: detail,
                rgba: DETAIL_BAND,
            });
        }

        match &surface.document.logo {
            Logo::Default => commands.push(PaintCommand::Fill {
                rect: layout.logo,
                rgba: LOGO_CHIP,
            }),
            Logo::Custom { src } => commands.push(PaintCommand::Blit {
                rect: layout.logo,
                image: src.clone(),
            }),
        }

        if chrome && surface.style.corner_radius > 0 {
            commands.push(PaintCommand::MaskCorners {
                rect: frame,
                radius: surface.style.corner_radius * options.scale,
            });
        }

        paint(&mut bitmap, &commands);
        Ok(bitmap)
    }
}

// The flatten override only replaces a gradient fill; a title already styled
// solid keeps its color.
fn title_command(
    rect: Rect,
    fill: TitleFill,
    flatten: Option<super::Rgba>,
) -> PaintCommand {
    match (flatten, fill) {
        (Some(flat), TitleFill::Gradient(_, _)) => PaintCommand::Fill { rect, rgba: flat },
        (_, TitleFill::Solid(rgba)) => PaintCommand::Fill { rect, rgba },
        (None, TitleFill::Gradient(top, bottom)) => {
            PaintCommand::GradientV { rect, top, bottom }
        }
    }
}
