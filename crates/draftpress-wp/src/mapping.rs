//! File to post-id mapping store.
//!
//! `wordpress.json`, kept next to the source documents, maps source file
//! names to the post ids they were published as. It decides whether a
//! publish is a create or an update. The file is read in full before a
//! publish and rewritten in full (pretty-printed) after a successful
//! remote write.
//!
//! The store is single-writer, single-reader with no locking; concurrent
//! publishes against the same file must be serialized by the caller.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::Result;

/// Name of the mapping file within a blog directory.
pub const MAPPING_FILE: &str = "wordpress.json";

/// Mapping of source file names to remote post ids.
#[derive(Debug, Default)]
pub struct PostMap {
    path: PathBuf,
    entries: BTreeMap<String, u64>,
}

impl PostMap {
    /// Load the mapping for a blog directory. A missing file yields an
    /// empty mapping, not an error.
    pub async fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(MAPPING_FILE);
        let entries = match fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    /// Post id previously recorded for a file name, if any.
    pub fn get(&self, file_name: &str) -> Option<u64> {
        self.entries.get(file_name).copied()
    }

    /// Record (or overwrite) the post id for a file name.
    pub fn insert(&mut self, file_name: impl Into<String>, post_id: u64) {
        self.entries.insert(file_name.into(), post_id);
    }

    /// Write the full mapping back, pretty-printed.
    pub async fn save(&self) -> Result<()> {
        let contents = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, contents).await?;
        Ok(())
    }
}
