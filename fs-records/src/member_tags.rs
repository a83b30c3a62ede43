use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use data_error::{CrError, Result};
use data_tag::PlayerTag;
use fs_atomic_light::temp_and_move;

const STORAGE_VERSION: i32 = 1;

/// Association between chat members and their player tags, persisted as
/// a single versioned JSON document.
pub struct MemberTags {
    label: String,
    path: PathBuf,
    data: MemberTagsData,
}

/// The data that is serialized to and from disk.
#[derive(Serialize, Deserialize)]
struct MemberTagsData {
    version: i32,
    entries: BTreeMap<String, PlayerTag>,
}

impl MemberTags {
    /// Open the association file, reading it if it already exists.
    pub fn new(label: String, path: &Path) -> Result<Self> {
        let mut storage = Self {
            label,
            path: PathBuf::from(path),
            data: MemberTagsData {
                version: STORAGE_VERSION,
                entries: BTreeMap::new(),
            },
        };
        if path.exists() {
            storage.read_fs()?;
        }
        Ok(storage)
    }

    /// Associate `tag` with `member`, replacing any previous tag.
    pub fn set(&mut self, member: &str, tag: PlayerTag) -> Result<()> {
        let mut entries = self.data.entries.clone();
        entries.insert(member.to_owned(), tag);
        self.commit(entries)
    }

    pub fn tag_of(&self, member: &str) -> Option<&PlayerTag> {
        self.data.entries.get(member)
    }

    /// First member associated with `tag`.
    pub fn member_of(&self, tag: &PlayerTag) -> Option<&str> {
        self.data
            .entries
            .iter()
            .find(|(_, t)| *t == tag)
            .map(|(member, _)| member.as_str())
    }

    /// Forget every association.
    pub fn clear(&mut self) -> Result<()> {
        self.commit(BTreeMap::new())
    }

    pub fn len(&self) -> usize {
        self.data.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.entries.is_empty()
    }

    /// Persist `entries`, replacing the in-memory map only once the
    /// document is on disk.
    fn commit(&mut self, entries: BTreeMap<String, PlayerTag>) -> Result<()> {
        let data = MemberTagsData {
            version: STORAGE_VERSION,
            entries,
        };
        self.write_fs(&data)?;
        self.data = data;
        Ok(())
    }

    fn read_fs(&mut self) -> Result<()> {
        let file = fs::File::open(&self.path)?;
        let data: MemberTagsData = serde_json::from_reader(file)
            .map_err(|err| {
                CrError::Storage(self.label.clone(), err.to_string())
            })?;
        if data.version != STORAGE_VERSION {
            return Err(CrError::Storage(
                self.label.clone(),
                format!(
                    "Storage version mismatch: expected {}, got {}",
                    STORAGE_VERSION, data.version
                ),
            ));
        }
        self.data = data;
        log::debug!(
            "{}: {} entries have been read",
            self.label,
            self.data.entries.len()
        );
        Ok(())
    }

    fn write_fs(&self, data: &MemberTagsData) -> Result<()> {
        let parent_dir = self.path.parent().ok_or_else(|| {
            CrError::Storage(
                self.label.clone(),
                "Failed to get parent directory".to_owned(),
            )
        })?;
        let file_name = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                CrError::Storage(
                    self.label.clone(),
                    "Failed to get file name".to_owned(),
                )
            })?;

        let document = serde_json::to_vec_pretty(data)?;
        temp_and_move(&document, parent_dir, file_name)?;

        log::info!(
            "{} {} entries have been written",
            self.label,
            data.entries.len()
        );
        Ok(())
    }
}
