//! Canonical poster document state.
//!
//! A [`Document`] holds everything the presentation layer renders: the
//! full-bleed background image, the logo, seven fixed text fields, and an
//! ordered guest grid. It lives for the session only; there is no
//! persistence. All mutations are synchronous and atomic — each call either
//! fully applies or fully fails.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Upper bound on the guest grid. Attempts to grow past this are rejected.
pub const MAX_GUESTS: usize = 9;

/// Background image a freshly seeded document starts with.
pub const DEFAULT_POSTER_IMAGE: &str =
    "https://images.unsplash.com/photo-1492684223066-81342ee5ff30?q=80&w=1000&auto=format&fit=crop";

/// Image shown for a newly added guest until the user picks one.
pub const PLACEHOLDER_GUEST_IMAGE: &str =
    "https://placehold.co/400x400/2a2a2a/ffffff?text=Add+Image";

const SEED_GUESTS: [(&str, &str, &str); 6] = [
    (
        "https://images.unsplash.com/photo-1534528741775-53994a69daeb?q=80&w=200&auto=format&fit=crop",
        "Sarah J.",
        "Designer",
    ),
    (
        "https://images.unsplash.com/photo-1506794778202-cad84cf45f1d?q=80&w=200&auto=format&fit=crop",
        "Mike T.",
        "Artist",
    ),
    (
        "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?q=80&w=200&auto=format&fit=crop",
        "Emma W.",
        "Architect",
    ),
    (
        "https://images.unsplash.com/photo-1494790108377-be9c29b29330?q=80&w=200&auto=format&fit=crop",
        "Jessica L.",
        "Innovator",
    ),
    (
        "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?q=80&w=200&auto=format&fit=crop",
        "David R.",
        "Tech Lead",
    ),
    (
        "https://images.unsplash.com/photo-1544005313-94ddf0286df2?q=80&w=200&auto=format&fit=crop",
        "Anna K.",
        "Strategy",
    ),
];

/// A value identifying a displayable image: either a remote address or a
/// self-contained inline-encoded payload.
///
/// Inline references are what image ingestion produces — they survive page
/// reloads and travel into exported artifacts without depending on a file
/// staying on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageRef {
    Remote { url: String },
    Inline { media_type: String, data: String },
}

impl ImageRef {
    pub fn remote(url: impl Into<String>) -> Self {
        ImageRef::Remote { url: url.into() }
    }

    pub fn inline(media_type: impl Into<String>, data: impl Into<String>) -> Self {
        ImageRef::Inline {
            media_type: media_type.into(),
            data: data.into(),
        }
    }

    /// The embeddable source string: the URL for remote references, a
    /// `data:` URL for inline ones.
    pub fn src(&self) -> String {
        match self {
            ImageRef::Remote { url } => url.clone(),
            ImageRef::Inline { media_type, data } => {
                format!("data:{};base64,{}", media_type, data)
            }
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, ImageRef::Inline { .. })
    }
}

/// The poster logo: the built-in mark, or a user-supplied image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Logo {
    Default,
    Custom { src: ImageRef },
}

/// The seven named text fields. The set is fixed: fields are never added or
/// removed, only replaced in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Tagline,
    Title,
    Description,
    DateLabel,
    DateValue,
    LocationLabel,
    LocationValue,
}

impl TextField {
    /// Resolve a presentation-layer field name. Returns `None` for anything
    /// outside the recognized set — callers treat that as a silent no-op.
    pub fn from_name(name: &str) -> Option<TextField> {
        match name {
            "tagline" => Some(TextField::Tagline),
            "title" => Some(TextField::Title),
            "description" => Some(TextField::Description),
            "dateLabel" => Some(TextField::DateLabel),
            "dateValue" => Some(TextField::DateValue),
            "locationLabel" => Some(TextField::LocationLabel),
            "locationValue" => Some(TextField::LocationValue),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TextField::Tagline => "tagline",
            TextField::Title => "title",
            TextField::Description => "description",
            TextField::DateLabel => "dateLabel",
            TextField::DateValue => "dateValue",
            TextField::LocationLabel => "locationLabel",
            TextField::LocationValue => "locationValue",
        }
    }
}

/// Values of the seven text fields. All fields are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Texts {
    pub tagline: String,
    pub title: String,
    pub description: String,
    pub date_label: String,
    pub date_value: String,
    pub location_label: String,
    pub location_value: String,
}

impl Texts {
    pub fn get(&self, field: TextField) -> &str {
        match field {
            TextField::Tagline => &self.tagline,
            TextField::Title => &self.title,
            TextField::Description => &self.description,
            TextField::DateLabel => &self.date_label,
            TextField::DateValue => &self.date_value,
            TextField::LocationLabel => &self.location_label,
            TextField::LocationValue => &self.location_value,
        }
    }

    fn set(&mut self, field: TextField, value: String) {
        match field {
            TextField::Tagline => self.tagline = value,
            TextField::Title => self.title = value,
            TextField::Description => self.description = value,
            TextField::DateLabel => self.date_label = value,
            TextField::DateValue => self.date_value = value,
            TextField::LocationLabel => self.location_label = value,
            TextField::LocationValue => self.location_value = value,
        }
    }
}

/// One entry in the guest grid. Ids are unique within the document and
/// stable for the entity's lifetime; they are never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
    pub id: u32,
    pub image: ImageRef,
    pub name: String,
    pub title: String,
}

/// A single field replacement on a guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuestEdit {
    Image(ImageRef),
    Name(String),
    Title(String),
}

/// The canonical editable poster state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub poster_image: ImageRef,
    pub logo: Logo,
    pub texts: Texts,
    pub guests: Vec<Guest>,
}

impl Document {
    /// The fixed session-start content: default background, default logo,
    /// default texts, and six seeded guests with ids 1 through 6.
    pub fn seeded() -> Document {
        let guests = SEED_GUESTS
            .iter()
            .enumerate()
            .map(|(i, (image, name, title))| Guest {
                id: i as u32 + 1,
                image: ImageRef::remote(*image),
                name: (*name).to_string(),
                title: (*title).to_string(),
            })
            .collect();

        Document {
            poster_image: ImageRef::remote(DEFAULT_POSTER_IMAGE),
            logo: Logo::Default,
            texts: Texts {
                tagline: "Exclusive Event".to_string(),
                title: "DESIGN FUTURE".to_string(),
                description: "Join us for a night of innovation and art. \
                              Meet the visionaries shaping tomorrow."
                    .to_string(),
                date_label: "Date".to_string(),
                date_value: "OCT 24".to_string(),
                location_label: "Location".to_string(),
                location_value: "NY CITY".to_string(),
            },
            guests,
        }
    }

    /// Replace one named text field.
    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        self.texts.set(field, value.into());
    }

    /// String-keyed variant of [`set_text`](Document::set_text). An
    /// unrecognized name is a silent no-op: it indicates a malformed internal
    /// call, not user input, and is absorbed here.
    pub fn set_text_by_name(&mut self, name: &str, value: impl Into<String>) {
        match TextField::from_name(name) {
            Some(field) => self.texts.set(field, value.into()),
            None => log::debug!("ignoring unrecognized text field {:?}", name),
        }
    }

    /// Revert to the built-in logo mark.
    pub fn set_logo_default(&mut self) {
        self.logo = Logo::Default;
    }

    /// Replace the logo with a custom image.
    pub fn set_logo_custom(&mut self, src: ImageRef) {
        self.logo = Logo::Custom { src };
    }

    /// Replace the full-bleed background.
    pub fn set_poster_image(&mut self, image: ImageRef) {
        self.poster_image = image;
    }

    /// Replace one field of the guest with the matching id. Returns whether a
    /// guest matched; an absent id leaves the collection untouched.
    pub fn update_guest(&mut self, id: u32, edit: GuestEdit) -> bool {
        match self.guests.iter_mut().find(|g| g.id == id) {
            Some(guest) => {
                match edit {
                    GuestEdit::Image(image) => guest.image = image,
                    GuestEdit::Name(name) => guest.name = name,
                    GuestEdit::Title(title) => guest.title = title,
                }
                true
            }
            None => {
                log::debug!("update_guest: no guest with id {}", id);
                false
            }
        }
    }

    /// Append a new guest with placeholder content and the next available id.
    /// Fails with [`Error::CapacityExceeded`] when the grid already holds
    /// [`MAX_GUESTS`] entries; no mutation occurs in that case.
    pub fn add_guest(&mut self) -> Result<&Guest> {
        self.add_guest_with(ImageRef::remote(PLACEHOLDER_GUEST_IMAGE))
    }

    /// As [`add_guest`](Document::add_guest), with a caller-supplied
    /// placeholder image.
    pub fn add_guest_with(&mut self, placeholder: ImageRef) -> Result<&Guest> {
        if self.guests.len() >= MAX_GUESTS {
            return Err(Error::CapacityExceeded);
        }
        let id = self.next_guest_id();
        self.guests.push(Guest {
            id,
            image: placeholder,
            name: "Name".to_string(),
            title: "Title".to_string(),
        });
        Ok(self.guests.last().expect("guest was just pushed"))
    }

    /// Remove the most recently added guest. Removal is positional — always
    /// the end of the sequence. Returns `None` on an empty grid.
    pub fn remove_guest(&mut self) -> Option<Guest> {
        self.guests.pop()
    }

    pub fn guest_count(&self) -> usize {
        self.guests.len()
    }

    // Ids reflect the current maximum, not a running counter: after removals
    // the next id is max(remaining) + 1.
    fn next_guest_id(&self) -> u32 {
        self.guests.iter().map(|g| g.id).max().map_or(1, |m| m + 1)
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_document_has_six_guests_with_sequential_ids() {
        let doc = Document::seeded();
        assert_eq!(doc.guest_count(), 6);
        let ids: Vec<u32> = doc.guests.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(doc.texts.title, "DESIGN FUTURE");
        assert_eq!(doc.logo, Logo::Default);
    }

    #[test]
    fn add_guest_rejects_the_tenth() {
        let mut doc = Document::seeded();
        for _ in 0..3 {
            doc.add_guest().expect("room for guest");
        }
        assert_eq!(doc.guest_count(), MAX_GUESTS);

        let before = doc.clone();
        let err = doc.add_guest().expect_err("grid is full");
        assert!(matches!(err, Error::CapacityExceeded));
        assert_eq!(doc, before, "rejected add must not mutate");
    }

    #[test]
    fn next_id_is_max_plus_one_not_a_counter() {
        let mut doc = Document::seeded();
        doc.guests.retain(|g| [2, 3, 5].contains(&g.id));

        let id = doc.add_guest().expect("room for guest").id;
        assert_eq!(id, 6);
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut doc = Document::seeded();
        for _ in 0..3 {
            doc.remove_guest();
        }
        let ids: Vec<u32> = doc.guests.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let id = doc.add_guest().expect("room for guest").id;
        assert_eq!(id, 4);
    }

    #[test]
    fn remove_guest_on_empty_grid_is_a_noop() {
        let mut doc = Document::seeded();
        while doc.remove_guest().is_some() {}
        assert_eq!(doc.guest_count(), 0);
        assert!(doc.remove_guest().is_none());
        assert_eq!(doc.guest_count(), 0);
    }

    #[test]
    fn set_text_touches_only_the_named_field() {
        let mut doc = Document::seeded();
        let before = doc.clone();

        doc.set_text(TextField::Title, "X");

        assert_eq!(doc.texts.title, "X");
        assert_eq!(doc.texts.tagline, before.texts.tagline);
        assert_eq!(doc.texts.description, before.texts.description);
        assert_eq!(doc.texts.date_value, before.texts.date_value);
        assert_eq!(doc.guests, before.guests);
    }

    #[test]
    fn unrecognized_field_name_is_a_silent_noop() {
        let mut doc = Document::seeded();
        let before = doc.clone();
        doc.set_text_by_name("subtitle", "nope");
        assert_eq!(doc, before);
    }

    #[test]
    fn recognized_field_names_route_correctly() {
        let mut doc = Document::seeded();
        doc.set_text_by_name("locationValue", "BERLIN");
        assert_eq!(doc.texts.location_value, "BERLIN");
        assert_eq!(
            TextField::from_name("dateLabel"),
            Some(TextField::DateLabel)
        );
        assert_eq!(TextField::from_name("date_label"), None);
    }

    #[test]
    fn update_guest_with_unknown_id_leaves_grid_unchanged() {
        let mut doc = Document::seeded();
        let before = doc.clone();
        let matched = doc.update_guest(99, GuestEdit::Name("X".into()));
        assert!(!matched);
        assert_eq!(doc, before);
    }

    #[test]
    fn update_guest_replaces_a_single_field() {
        let mut doc = Document::seeded();
        doc.update_guest(2, GuestEdit::Title("Curator".into()));
        let guest = doc.guests.iter().find(|g| g.id == 2).unwrap();
        assert_eq!(guest.title, "Curator");
        assert_eq!(guest.name, "Mike T.");
    }

    #[test]
    fn logo_replacement_is_wholesale() {
        let mut doc = Document::seeded();
        doc.set_logo_custom(ImageRef::inline("image/png", "QUJD"));
        assert!(matches!(doc.logo, Logo::Custom { .. }));
        doc.set_logo_default();
        assert_eq!(doc.logo, Logo::Default);
    }

    #[test]
    fn inline_ref_renders_a_data_url() {
        let r = ImageRef::inline("image/png", "QUJD");
        assert_eq!(r.src(), "data:image/png;base64,QUJD");
        assert!(r.is_inline());
        assert!(!ImageRef::remote("https://x/y.png").is_inline());
    }
}
