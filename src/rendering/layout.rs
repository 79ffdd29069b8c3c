//! Block layout of the poster surface.
//!
//! Computes the rectangles every painted region lands in: headline stack,
//! guest grid, detail row, logo chip. Pure integer math over the frame
//! rectangle — deterministic for a given document and frame, which is what
//! keeps snapshots reproducible.

use crate::document::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Rect {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Rectangles for one guest card: portrait image on top, name and title
/// bars underneath.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestCell {
    pub guest_id: u32,
    pub image: Rect,
    pub name: Rect,
    pub title: Rect,
}

/// The full set of painted regions for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterLayout {
    /// The poster frame itself; the background image fills this.
    pub frame: Rect,
    /// Frame minus content padding.
    pub content: Rect,
    pub logo: Rect,
    pub tagline: Rect,
    pub title: Rect,
    pub description: Rect,
    /// Present only when the grid is non-empty, matching the live poster.
    pub guests_label: Option<Rect>,
    pub guest_cells: Vec<GuestCell>,
    /// Date and location items, left to right.
    pub details: [Rect; 2],
}

/// Grid columns for a given guest count. Mirrors the live grid's
/// count-keyed template: a single row up to three guests, two columns for
/// four, three columns beyond.
pub fn grid_columns(count: usize) -> u32 {
    match count {
        0 => 0,
        1..=3 => count as u32,
        4 => 2,
        _ => 3,
    }
}

/// Lay the poster out inside `frame`.
pub fn layout_poster(document: &Document, frame: Rect) -> PosterLayout {
    let pad = (frame.width / 12).max(4);
    let gap = (pad / 3).max(2);

    let content = Rect::new(
        frame.x + pad as i32,
        frame.y + pad as i32,
        frame.width.saturating_sub(pad * 2).max(1),
        frame.height.saturating_sub(pad * 2).max(1),
    );

    let logo_w = (frame.width / 6).max(8);
    let logo_h = (frame.width / 14).max(4);
    let logo = Rect::new(
        content.right() - logo_w as i32,
        content.y,
        logo_w,
        logo_h,
    );

    // Headline stack: tagline over title over description.
    let tagline = Rect::new(
        content.x,
        content.y,
        (content.width * 2 / 3).max(1),
        (frame.height / 36).max(2),
    );
    let title = Rect::new(
        content.x,
        tagline.bottom() + gap as i32,
        content.width,
        (frame.height / 9).max(4),
    );
    let description = Rect::new(
        content.x,
        title.bottom() + gap as i32,
        (content.width * 5 / 6).max(1),
        (frame.height / 16).max(2),
    );

    // Detail row pinned to the bottom of the content box.
    let detail_h = (frame.height / 13).max(4);
    let detail_w = content.width.saturating_sub(gap) / 2;
    let detail_y = content.bottom() - detail_h as i32;
    let details = [
        Rect::new(content.x, detail_y, detail_w, detail_h),
        Rect::new(
            content.x + (detail_w + gap) as i32,
            detail_y,
            detail_w,
            detail_h,
        ),
    ];

    // The guest block fills whatever is left between the headline stack and
    // the detail row.
    let count = document.guests.len();
    let mut grid_top = description.bottom() + (gap * 2) as i32;

    let guests_label = (count > 0).then(|| {
        let label = Rect::new(
            content.x,
            grid_top,
            (content.width / 3).max(1),
            (frame.height / 40).max(2),
        );
        grid_top = label.bottom() + gap as i32;
        label
    });

    let grid_bottom = detail_y - (gap * 2) as i32;
    let grid_h = (grid_bottom - grid_top).max(1) as u32;

    let cols = grid_columns(count);
    let mut guest_cells = Vec::with_capacity(count);
    if cols > 0 {
        let rows = (count as u32 + cols - 1) / cols;
        let cell_w = content.width.saturating_sub(gap * (cols - 1)) / cols;
        let cell_h = grid_h.saturating_sub(gap * (rows - 1)) / rows;

        for (i, guest) in document.guests.iter().enumerate() {
            let col = i as u32 % cols;
            let row = i as u32 / cols;
            let cell = Rect::new(
                content.x + (col * (cell_w + gap)) as i32,
                grid_top + (row * (cell_h + gap)) as i32,
                cell_w.max(3),
                cell_h.max(3),
            );

            let bar_h = (cell.height / 6).max(1);
            let image_h = cell.height.saturating_sub(bar_h * 2 + gap).max(1);
            guest_cells.push(GuestCell {
                guest_id: guest.id,
                image: Rect::new(cell.x, cell.y, cell.width, image_h),
                name: Rect::new(cell.x, cell.y + image_h as i32, cell.width, bar_h),
                title: Rect::new(
                    cell.x,
                    cell.y + (image_h + bar_h) as i32,
                    cell.width,
                    bar_h,
                ),
            });
        }
    }

    PosterLayout {
        frame,
        content,
        logo,
        tagline,
        title,
        description,
        guests_label,
        guest_cells,
        details,
    }
}
