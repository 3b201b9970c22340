//! Fixtures shared by the unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::{ReadError, WriteError};
use crate::metadata::{TagReader, TagWriter};
use crate::tags::TagRecord;

/// MPEG-1 Layer III, 128 kbit/s, 44.1 kHz, joint stereo, no padding.
const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];
const FRAME_LEN: usize = 417;

/// Write a short, silent, tag-less MP3 made of zeroed frames.
pub fn write_silent_mp3(path: &Path) {
    let mut bytes = Vec::with_capacity(FRAME_LEN * 32);
    for _ in 0..32 {
        bytes.extend_from_slice(&FRAME_HEADER);
        bytes.resize(bytes.len() + FRAME_LEN - FRAME_HEADER.len(), 0);
    }
    fs::write(path, bytes).unwrap();
}

/// Reader that answers from a fixed table; unknown paths are "not found".
#[derive(Default)]
pub struct FakeReader {
    pub answers: HashMap<PathBuf, Result<TagRecord, ReadError>>,
}

impl TagReader for FakeReader {
    fn read(&self, path: &Path) -> Result<TagRecord, ReadError> {
        self.answers
            .get(path)
            .cloned()
            .unwrap_or_else(|| Err(ReadError::NotFound(path.to_path_buf())))
    }
}

/// Writer that records every call and fails for the configured paths.
#[derive(Default, Clone)]
pub struct FakeWriter {
    pub failing: HashSet<PathBuf>,
    pub calls: Rc<RefCell<Vec<(PathBuf, TagRecord)>>>,
}

impl FakeWriter {
    pub fn failing_on(path: &str) -> Self {
        let mut writer = Self::default();
        writer.failing.insert(PathBuf::from(path));
        writer
    }

    pub fn written_paths(&self) -> Vec<PathBuf> {
        self.calls.borrow().iter().map(|(p, _)| p.clone()).collect()
    }
}

impl TagWriter for FakeWriter {
    fn write(&self, path: &Path, record: &TagRecord) -> Result<(), WriteError> {
        self.calls
            .borrow_mut()
            .push((path.to_path_buf(), record.clone()));
        if self.failing.contains(path) {
            return Err(WriteError::Tag {
                path: path.to_path_buf(),
                reason: "disk on fire".to_string(),
            });
        }
        Ok(())
    }
}
