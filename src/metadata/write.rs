use std::path::Path;

use id3::frame::{Picture, PictureType};
use id3::{Tag, TagLike, Version};
use tracing::debug;

use crate::config::{Id3VersionSetting, TagSettings};
use crate::error::WriteError;
use crate::tags::{CoverArt, TagField, TagRecord};

use super::TagWriter;

/// `TagWriter` that updates the ID3v2 tag of an MP3 in place.
#[derive(Debug, Clone, Copy)]
pub struct Id3Writer {
    version: Version,
}

impl Default for Id3Writer {
    fn default() -> Self {
        Self::new(Version::Id3v23)
    }
}

impl Id3Writer {
    pub fn new(version: Version) -> Self {
        Self { version }
    }

    pub fn from_settings(settings: &TagSettings) -> Self {
        Self::new(match settings.id3_version {
            Id3VersionSetting::V23 => Version::Id3v23,
            Id3VersionSetting::V24 => Version::Id3v24,
        })
    }

    pub fn version(&self) -> Version {
        self.version
    }

    fn frame_for(&self, field: TagField) -> &'static str {
        match field {
            TagField::Title => "TIT2",
            TagField::Artist => "TPE1",
            TagField::TrackNumber => "TRCK",
            TagField::Album => "TALB",
            TagField::AlbumArtist => "TPE2",
            TagField::Year => match self.version {
                Version::Id3v24 => "TDRC",
                _ => "TYER",
            },
        }
    }

    /// Copy the fields set in `record` into `tag`. Unset fields are left alone,
    /// blank fields remove their frame.
    fn apply(&self, tag: &mut Tag, record: &TagRecord) {
        for field in TagField::ALL {
            let Some(value) = record.get(field) else {
                continue;
            };

            // The record holds "3" for "3/12" and "2020" for "2020-05-01".
            // An unchanged value must not truncate what the file stores.
            if stored_value(tag, field) == Some(value.trim()) {
                continue;
            }

            // Never leave a stale year behind in the other revision's frame.
            if field == TagField::Year {
                tag.remove("TYER");
                tag.remove("TDRC");
            }

            let id = self.frame_for(field);
            if value.trim().is_empty() {
                tag.remove(id);
            } else {
                tag.set_text(id, value);
            }
        }

        if let Some(art) = &record.image {
            if already_stored(tag, art) {
                return;
            }
            tag.remove_picture_by_type(PictureType::CoverFront);
            if let Some(data) = &art.data {
                tag.add_frame(Picture {
                    mime_type: art.mime.clone(),
                    picture_type: PictureType::CoverFront,
                    description: art.description.clone(),
                    data: data.clone(),
                });
            }
        }
    }
}

fn frame_text<'a>(tag: &'a Tag, id: &str) -> Option<&'a str> {
    tag.get(id)
        .and_then(|frame| frame.content().text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Year and track number as the reader shows them, taken from the frames
/// `tag` already holds. Other fields are always rewritten.
fn stored_value(tag: &Tag, field: TagField) -> Option<&str> {
    let (text, sep) = match field {
        TagField::TrackNumber => (frame_text(tag, "TRCK")?, '/'),
        TagField::Year => (
            frame_text(tag, "TYER").or_else(|| frame_text(tag, "TDRC"))?,
            '-',
        ),
        _ => return None,
    };
    text.split(sep).next().map(str::trim)
}

/// Whether `art` is a picture the tag already carries, in any slot.
fn already_stored(tag: &Tag, art: &CoverArt) -> bool {
    let Some(data) = &art.data else {
        return false;
    };
    tag.pictures().any(|p| {
        p.data == *data && p.mime_type == art.mime && p.description == art.description
    })
}

impl TagWriter for Id3Writer {
    fn write(&self, path: &Path, record: &TagRecord) -> Result<(), WriteError> {
        let to_write_error = |e: id3::Error| WriteError::Tag {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let mut tag = match Tag::read_from_path(path) {
            Ok(tag) => tag,
            Err(e) if matches!(e.kind, id3::ErrorKind::NoTag) => {
                debug!(path = %path.display(), "no existing ID3 tag, starting fresh");
                Tag::new()
            }
            Err(e) => return Err(to_write_error(e)),
        };

        self.apply(&mut tag, record);

        tag.write_to_path(path, self.version)
            .map_err(to_write_error)
    }
}
