use std::path::Path;

use lofty::file::TaggedFileExt;
use lofty::picture::{Picture, PictureType};
use lofty::tag::{ItemKey, Tag};
use tracing::debug;

use crate::error::ReadError;
use crate::tags::cover::FRONT_COVER_ID;
use crate::tags::{CoverArt, PictureKind, TagField, TagRecord};

use super::TagReader;

/// `TagReader` backed by `lofty`, which understands ID3v1/v2, RIFF INFO and more.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyReader;

impl TagReader for LoftyReader {
    fn read(&self, path: &Path) -> Result<TagRecord, ReadError> {
        if !path.exists() {
            return Err(ReadError::NotFound(path.to_path_buf()));
        }

        let tagged = lofty::read_from_path(path).map_err(|e| ReadError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        match tagged.primary_tag().or_else(|| tagged.first_tag()) {
            Some(tag) => Ok(record_from_tag(tag)),
            None => {
                debug!(path = %path.display(), "file carries no tags");
                Ok(TagRecord::default())
            }
        }
    }
}

fn non_empty(v: &str) -> Option<&str> {
    let v = v.trim();
    (!v.is_empty()).then_some(v)
}

fn text<'a>(tag: &'a Tag, key: &ItemKey) -> Option<&'a str> {
    tag.get_string(*key).and_then(non_empty)
}

fn record_from_tag(tag: &Tag) -> TagRecord {
    let mut record = TagRecord::default();

    for (field, key) in [
        (TagField::Title, ItemKey::TrackTitle),
        (TagField::Artist, ItemKey::TrackArtist),
        (TagField::Album, ItemKey::AlbumTitle),
        (TagField::AlbumArtist, ItemKey::AlbumArtist),
    ] {
        if let Some(v) = text(tag, &key) {
            record.set(field, v);
        }
    }

    // "3/12" style values: keep the number, drop the total.
    if let Some(track) = text(tag, &ItemKey::TrackNumber)
        .and_then(|v| v.split('/').next())
        .and_then(non_empty)
    {
        record.set(TagField::TrackNumber, track);
    }

    // ID3v2.3 stores TYER, v2.4 stores a full TDRC timestamp.
    if let Some(year) = text(tag, &ItemKey::Year)
        .or_else(|| text(tag, &ItemKey::RecordingDate))
        .and_then(|v| v.split('-').next())
        .and_then(non_empty)
    {
        record.set(TagField::Year, year);
    }

    record.image = select_cover(tag.pictures()).map(cover_from_picture);
    record
}

/// Pick the front cover, or the first picture when there is none.
pub fn select_cover(pictures: &[Picture]) -> Option<&Picture> {
    pictures
        .iter()
        .find(|p| p.pic_type() == PictureType::CoverFront)
        .or_else(|| pictures.first())
}

fn cover_from_picture(picture: &Picture) -> CoverArt {
    CoverArt {
        mime: picture
            .mime_type()
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
        // Whatever slot it came from, the editor shows and saves it as the front cover.
        kind: PictureKind {
            id: FRONT_COVER_ID,
            name: PictureType::CoverFront
                .as_ape_key()
                .unwrap_or_default()
                .to_string(),
        },
        description: picture.description().unwrap_or_default().to_string(),
        data: Some(picture.data().to_vec()),
    }
}
