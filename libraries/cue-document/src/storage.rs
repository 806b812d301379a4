//! Playlist persistence
//!
//! Documents are stored as JSON under a key taken from the page query
//! string. The store itself is a trait so the browser can back it with
//! `localStorage` and tests with a map.

use crate::error::{DocumentError, Result};
use crate::types::PlaylistDocument;
use crate::validate::validate;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Key used when the query string carries no `id`
pub const DEFAULT_STORAGE_KEY: &str = "default-playlist";

fn query_param(query: &str, name: &str) -> Option<String> {
    url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Storage key for a page: its `id` query parameter, or the default key
pub fn storage_key(query: &str) -> String {
    query_param(query, "id").unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string())
}

/// Whether the page should show the editor
///
/// True for the anonymous page (no `id`) and when `mode=edit` is given.
pub fn is_editor_mode(query: &str) -> bool {
    query_param(query, "id").is_none() || query_param(query, "mode").as_deref() == Some("edit")
}

/// String key-value store
pub trait KeyValueStore {
    fn load(&self, key: &str) -> Result<Option<String>>;

    fn save(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Validating document access over a [`KeyValueStore`]
#[derive(Debug)]
pub struct DocumentRepository<S> {
    store: S,
}

impl<S: KeyValueStore> DocumentRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load and validate the document stored under `key`
    ///
    /// `Ok(None)` when nothing is stored there.
    pub fn load(&self, key: &str) -> Result<Option<PlaylistDocument>> {
        let Some(text) = self.store.load(key)? else {
            debug!("No playlist stored under {}", key);
            return Ok(None);
        };

        match PlaylistDocument::from_json(&text) {
            Ok(doc) => {
                debug!("Loaded playlist {} ({} items)", key, doc.len());
                Ok(Some(doc))
            }
            Err(e) => {
                warn!("Stored playlist {} is unusable: {}", key, e);
                Err(e)
            }
        }
    }

    /// Validate and store a document under `key`
    pub fn save(&mut self, key: &str, doc: &PlaylistDocument) -> Result<()> {
        let errors = validate(doc);
        if !errors.is_empty() {
            return Err(DocumentError::Invalid(errors));
        }

        let text = serde_json::to_string(doc)?;
        self.store.save(key, &text)?;
        debug!("Saved playlist {}", key);
        Ok(())
    }

    pub fn delete(&mut self, key: &str) -> Result<()> {
        self.store.remove(key)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
