use std::collections::BTreeMap;
use std::sync::RwLock;
use std::time::SystemTime;

use crate::document_store::DocumentStore;
use data_error::{CrError, Result};

/// Volatile [`DocumentStore`] keeping documents and their write times in RAM.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<BTreeMap<String, (Vec<u8>, SystemTime)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document as if it had been written at `modified`.
    pub fn put_at(
        &self,
        key: &str,
        document: &[u8],
        modified: SystemTime,
    ) -> Result<()> {
        self.documents
            .write()
            .map_err(|_| poisoned())?
            .insert(key.to_owned(), (document.to_vec(), modified));
        Ok(())
    }
}

fn poisoned() -> CrError {
    CrError::Storage("memory".to_owned(), "Lock poisoned".to_owned())
}

impl DocumentStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let documents = self.documents.read().map_err(|_| poisoned())?;
        Ok(documents.get(key).map(|(bytes, _)| bytes.clone()))
    }

    fn put(&self, key: &str, document: &[u8]) -> Result<()> {
        self.put_at(key, document, SystemTime::now())
    }

    fn last_modified(&self, key: &str) -> Result<Option<SystemTime>> {
        let documents = self.documents.read().map_err(|_| poisoned())?;
        Ok(documents.get(key).map(|(_, modified)| *modified))
    }
}
