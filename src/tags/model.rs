//! Tag record types shared by the session, the metadata bridge and the UI.

use std::fmt;

use super::cover::FRONT_COVER_ID;

/// The editable text fields of a tag.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TagField {
    Title,
    Artist,
    TrackNumber,
    Album,
    /// Album artist (ID3 `TPE2`, "performer info").
    AlbumArtist,
    Year,
}

impl TagField {
    /// Fields in display order.
    pub const ALL: [TagField; 6] = [
        TagField::Title,
        TagField::Artist,
        TagField::TrackNumber,
        TagField::Album,
        TagField::AlbumArtist,
        TagField::Year,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Artist => "Artist",
            Self::TrackNumber => "Track",
            Self::Album => "Album",
            Self::AlbumArtist => "Album artist",
            Self::Year => "Year",
        }
    }
}

impl fmt::Display for TagField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Picture type slot of an embedded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureKind {
    pub id: u8,
    pub name: String,
}

/// Embedded artwork. `data == None` is the "no art" placeholder.
#[derive(Clone, PartialEq, Eq)]
pub struct CoverArt {
    pub mime: String,
    pub kind: PictureKind,
    pub description: String,
    pub data: Option<Vec<u8>>,
}

impl CoverArt {
    /// The canonical empty front cover.
    pub fn placeholder() -> Self {
        Self {
            mime: String::new(),
            kind: PictureKind {
                id: FRONT_COVER_ID,
                name: String::new(),
            },
            description: String::new(),
            data: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.data.is_none()
    }

    pub fn byte_len(&self) -> usize {
        self.data.as_ref().map(Vec::len).unwrap_or(0)
    }
}

// Image bytes would drown out everything else in debug output.
impl fmt::Debug for CoverArt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoverArt")
            .field("mime", &self.mime)
            .field("kind", &self.kind)
            .field("description", &self.description)
            .field("data", &self.data.as_ref().map(|d| d.len()))
            .finish()
    }
}

/// Tag values staged for the active selection.
///
/// Every field is independently optional; `None` means "unset", not "delete".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagRecord {
    pub title: Option<String>,
    pub artist: Option<String>,
    /// Kept as text; no numeric coercion.
    pub track_number: Option<String>,
    pub album: Option<String>,
    pub album_artist: Option<String>,
    /// Kept as text; no numeric coercion.
    pub year: Option<String>,
    pub image: Option<CoverArt>,
}

impl TagRecord {
    pub fn get(&self, field: TagField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn set(&mut self, field: TagField, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Copy every field that is set in `other` over this record.
    pub fn merge_from(&mut self, other: TagRecord) {
        let TagRecord {
            title,
            artist,
            track_number,
            album,
            album_artist,
            year,
            image,
        } = other;
        for (field, value) in [
            (TagField::Title, title),
            (TagField::Artist, artist),
            (TagField::TrackNumber, track_number),
            (TagField::Album, album),
            (TagField::AlbumArtist, album_artist),
            (TagField::Year, year),
        ] {
            if let Some(v) = value {
                self.set(field, v);
            }
        }
        if image.is_some() {
            self.image = image;
        }
    }

    pub fn is_empty(&self) -> bool {
        TagField::ALL.iter().all(|f| self.get(*f).is_none()) && self.image.is_none()
    }

    fn slot(&self, field: TagField) -> &Option<String> {
        match field {
            TagField::Title => &self.title,
            TagField::Artist => &self.artist,
            TagField::TrackNumber => &self.track_number,
            TagField::Album => &self.album,
            TagField::AlbumArtist => &self.album_artist,
            TagField::Year => &self.year,
        }
    }

    fn slot_mut(&mut self, field: TagField) -> &mut Option<String> {
        match field {
            TagField::Title => &mut self.title,
            TagField::Artist => &mut self.artist,
            TagField::TrackNumber => &mut self.track_number,
            TagField::Album => &mut self.album,
            TagField::AlbumArtist => &mut self.album_artist,
            TagField::Year => &mut self.year,
        }
    }
}
