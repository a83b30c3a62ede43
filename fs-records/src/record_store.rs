use std::path::Path;
use std::time::{Duration, SystemTime};

use crate::document_store::DocumentStore;
use crate::folder_store::FolderStore;
use crate::PLAYERS_FOLDER;
use data_error::{CrError, Result};
use data_player::PlayerSnapshot;
use data_tag::PlayerTag;

/// Last known good snapshot of every player, one document per tag.
///
/// Snapshots are replaced as a whole, never merged, so concurrent
/// writers of the same tag are last-writer-wins and writers of different
/// tags never interact.
#[derive(Debug)]
pub struct PlayerRecordStore<D = FolderStore> {
    store: D,
}

impl PlayerRecordStore<FolderStore> {
    /// Open the snapshot folder under the data directory `root`.
    pub fn open(root: &Path) -> Result<Self> {
        let store =
            FolderStore::new("players".to_owned(), &root.join(PLAYERS_FOLDER))?;
        Ok(Self::new(store))
    }
}

impl<D: DocumentStore> PlayerRecordStore<D> {
    pub fn new(store: D) -> Self {
        Self { store }
    }

    pub fn write(&self, tag: &PlayerTag, snapshot: &PlayerSnapshot) -> Result<()> {
        let document = serde_json::to_vec_pretty(snapshot)?;
        self.store.put(tag.as_str(), &document)?;
        log::info!("players: stored snapshot of #{}", tag);
        Ok(())
    }

    /// The stored snapshot, `None` if nothing was ever written for `tag`.
    pub fn read(&self, tag: &PlayerTag) -> Result<Option<PlayerSnapshot>> {
        match self.store.get(tag.as_str())? {
            Some(document) => {
                let snapshot = PlayerSnapshot::from_json(&document).map_err(|e| {
                    log::warn!("players: snapshot of #{} is unreadable", tag);
                    e
                })?;
                Ok(Some(snapshot))
            }
            None => Ok(None),
        }
    }

    /// The stored snapshot together with its age.
    ///
    /// The write time is taken before the document is read, so a rewrite
    /// racing this call can only make the reported age older than the
    /// returned snapshot, never younger.
    pub fn read_aged(
        &self,
        tag: &PlayerTag,
    ) -> Result<Option<(PlayerSnapshot, Duration)>> {
        let modified = match self.store.last_modified(tag.as_str())? {
            Some(modified) => modified,
            None => return Ok(None),
        };
        let snapshot = match self.read(tag)? {
            Some(snapshot) => snapshot,
            None => return Ok(None),
        };
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or_default();
        Ok(Some((snapshot, age)))
    }

    /// Time elapsed since the snapshot of `tag` was written.
    pub fn age(&self, tag: &PlayerTag) -> Result<Duration> {
        let modified = self
            .store
            .last_modified(tag.as_str())?
            .ok_or_else(|| CrError::NoCachedRecord(tag.to_string()))?;
        // a write stamped in the future counts as brand new
        Ok(SystemTime::now()
            .duration_since(modified)
            .unwrap_or_default())
    }
}
