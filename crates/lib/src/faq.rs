//! # FAQ Store
//!
//! Loads each client's question/answer pairs at start-up. A client without an
//! FAQ file, or whose file does not exist, simply has no pairs and is answered
//! by the model alone. A file that exists but cannot be parsed is remembered as
//! a load error and reported on every request for that client, so one broken
//! file never takes the other clients down.

use crate::{
    errors::FaqRelayError,
    registry::ClientRegistry,
    types::{ClientRecord, FaqPair},
};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{info, warn};

/// The outcome of loading one client's FAQ file.
#[derive(Debug, Clone)]
enum FaqEntry {
    Loaded(Arc<Vec<FaqPair>>),
    Malformed(String),
}

/// Reads an FAQ file from disk.
///
/// Returns `Ok(None)` when the file does not exist, and a
/// [`FaqRelayError::ConfigLoad`] when it exists but is unreadable or is not a
/// JSON array of `{q, a}` records.
pub fn read_faq_file(client_id: &str, path: &Path) -> Result<Option<Vec<FaqPair>>, FaqRelayError> {
    if !path.exists() {
        return Ok(None);
    }
    let config_error = |reason: String| FaqRelayError::ConfigLoad {
        client_id: client_id.to_string(),
        reason,
    };
    let content = fs::read_to_string(path)
        .map_err(|e| config_error(format!("failed to read '{}': {e}", path.display())))?;
    let pairs: Vec<FaqPair> = serde_json::from_str(&content)
        .map_err(|e| config_error(format!("invalid FAQ file '{}': {e}", path.display())))?;
    Ok(Some(pairs))
}

/// Per-client FAQ pairs, loaded once and never mutated.
#[derive(Debug, Clone, Default)]
pub struct FaqStore {
    base_dir: PathBuf,
    entries: HashMap<String, FaqEntry>,
}

impl FaqStore {
    /// An empty store rooted at `base_dir`; every client gets no pairs.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            entries: HashMap::new(),
        }
    }

    /// Loads the FAQ file of every client in the registry.
    ///
    /// Relative `faqFile` paths are resolved against `base_dir`.
    pub fn load_all(registry: &ClientRegistry, base_dir: impl Into<PathBuf>) -> Self {
        let mut store = Self::new(base_dir);
        for record in registry.iter() {
            store.load_client(record);
        }
        let loaded = store
            .entries
            .values()
            .filter(|entry| matches!(entry, FaqEntry::Loaded(_)))
            .count();
        info!(
            base_dir = %store.base_dir.display(),
            loaded,
            failed = store.entries.len() - loaded,
            "Loaded FAQ files."
        );
        store
    }

    fn load_client(&mut self, record: &ClientRecord) {
        let Some(faq_file) = record.faq_file.as_deref().filter(|f| !f.trim().is_empty()) else {
            return;
        };
        let path = self.resolve_path(faq_file);
        match read_faq_file(&record.id, &path) {
            Ok(Some(pairs)) => {
                info!(client_id = %record.id, pairs = pairs.len(), "Loaded FAQ file.");
                self.entries
                    .insert(record.id.clone(), FaqEntry::Loaded(Arc::new(pairs)));
            }
            Ok(None) => {
                warn!(client_id = %record.id, path = %path.display(), "FAQ file not found.");
            }
            Err(e) => {
                warn!(client_id = %record.id, error = %e, "FAQ file could not be parsed.");
                let reason = match e {
                    FaqRelayError::ConfigLoad { reason, .. } => reason,
                    other => other.to_string(),
                };
                self.entries
                    .insert(record.id.clone(), FaqEntry::Malformed(reason));
            }
        }
    }

    /// The FAQ pairs for a client, in file order.
    ///
    /// Empty when the client has no FAQ. Fails only when the client's FAQ file
    /// exists but was malformed at load time.
    pub fn pairs_for(&self, client_id: &str) -> Result<Arc<Vec<FaqPair>>, FaqRelayError> {
        match self.entries.get(client_id) {
            Some(FaqEntry::Loaded(pairs)) => Ok(pairs.clone()),
            Some(FaqEntry::Malformed(reason)) => Err(FaqRelayError::ConfigLoad {
                client_id: client_id.to_string(),
                reason: reason.clone(),
            }),
            None => Ok(Arc::new(Vec::new())),
        }
    }

    fn resolve_path(&self, faq_file: &str) -> PathBuf {
        let path = Path::new(faq_file);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}
