//! # Client Registry
//!
//! Loads the per-client configuration once at start-up and answers lookups by
//! client id. The configuration file may be a JSON object keyed by id or a JSON
//! array of records with an `id` field; both are normalized into one map here so
//! that lookups have a single path.

use crate::{errors::FaqRelayError, types::ClientRecord};
use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};
use tracing::{info, warn};

/// The two accepted shapes of a client configuration source.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ClientSource {
    Keyed(HashMap<String, ClientRecord>),
    Sequence(Vec<ClientRecord>),
}

/// An immutable index of client records.
#[derive(Debug, Clone, Default)]
pub struct ClientRegistry {
    clients: HashMap<String, ClientRecord>,
    /// Ids in source order (sorted for keyed sources).
    order: Vec<String>,
    default_id: Option<String>,
}

impl ClientRegistry {
    /// Builds a registry from an already-parsed source.
    ///
    /// The default tenant is `default_client_id` when it exists in the source.
    /// Otherwise a sequence source falls back to its first record, and a keyed
    /// source has no default.
    pub fn from_source(source: ClientSource, default_client_id: Option<&str>) -> Self {
        let mut clients = HashMap::new();
        let mut order = Vec::new();

        let is_sequence = matches!(source, ClientSource::Sequence(_));
        let records: Vec<ClientRecord> = match source {
            ClientSource::Keyed(map) => {
                let mut entries: Vec<(String, ClientRecord)> = map.into_iter().collect();
                entries.sort_by(|a, b| a.0.cmp(&b.0));
                entries
                    .into_iter()
                    .map(|(key, mut record)| {
                        if record.id.is_empty() {
                            record.id = key;
                        } else if record.id != key {
                            warn!(key = %key, id = %record.id, "Client record id differs from its key; using the key.");
                            record.id = key;
                        }
                        record
                    })
                    .collect()
            }
            ClientSource::Sequence(list) => list,
        };

        for record in records {
            if record.id.is_empty() {
                warn!("Skipping client record without an id.");
                continue;
            }
            if clients.contains_key(&record.id) {
                warn!(id = %record.id, "Duplicate client id; keeping the first record.");
                continue;
            }
            order.push(record.id.clone());
            clients.insert(record.id.clone(), record);
        }

        let default_id = match default_client_id {
            Some(id) if clients.contains_key(id) => Some(id.to_string()),
            _ if is_sequence => order.first().cloned(),
            _ => None,
        };

        Self {
            clients,
            order,
            default_id,
        }
    }

    /// Parses a registry from JSON text.
    pub fn from_json_str(
        content: &str,
        default_client_id: Option<&str>,
    ) -> Result<Self, FaqRelayError> {
        let source: ClientSource = serde_json::from_str(content).map_err(|e| {
            FaqRelayError::RegistryLoad(format!(
                "expected an object keyed by client id or an array of client records: {e}"
            ))
        })?;
        Ok(Self::from_source(source, default_client_id))
    }

    /// Reads and parses the client configuration file.
    pub fn load(path: impl AsRef<Path>, default_client_id: Option<&str>) -> Result<Self, FaqRelayError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            FaqRelayError::RegistryLoad(format!("failed to read '{}': {e}", path.display()))
        })?;
        let registry = Self::from_json_str(&content, default_client_id)?;
        info!(
            path = %path.display(),
            clients = registry.len(),
            default = ?registry.default_id,
            "Loaded client registry."
        );
        Ok(registry)
    }

    /// Looks up a client by exact id, falling back to the default tenant.
    pub fn resolve(&self, client_id: Option<&str>) -> Result<&ClientRecord, FaqRelayError> {
        if let Some(record) = client_id.and_then(|id| self.clients.get(id)) {
            return Ok(record);
        }
        self.default_client().ok_or_else(|| {
            FaqRelayError::ClientNotFound(
                client_id
                    .or(self.default_id.as_deref())
                    .unwrap_or_default()
                    .to_string(),
            )
        })
    }

    /// Exact lookup without any fallback.
    pub fn get(&self, client_id: &str) -> Option<&ClientRecord> {
        self.clients.get(client_id)
    }

    pub fn default_client(&self) -> Option<&ClientRecord> {
        self.default_id.as_deref().and_then(|id| self.clients.get(id))
    }

    pub fn default_id(&self) -> Option<&str> {
        self.default_id.as_deref()
    }

    /// Records in source order.
    pub fn iter(&self) -> impl Iterator<Item = &ClientRecord> {
        self.order.iter().filter_map(|id| self.clients.get(id))
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyed_source_fills_id_from_key() {
        let registry =
            ClientRegistry::from_json_str(r#"{"demo-gym": {"name": "Iron Gym"}}"#, None).unwrap();
        assert_eq!(registry.get("demo-gym").unwrap().id, "demo-gym");
        assert!(registry.default_id().is_none());
    }

    #[test]
    fn sequence_source_keeps_first_duplicate() {
        let registry = ClientRegistry::from_json_str(
            r#"[{"id": "a", "name": "First"}, {"id": "a", "name": "Second"}]"#,
            None,
        )
        .unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a").unwrap().name.as_deref(), Some("First"));
    }

    #[test]
    fn scalar_source_is_rejected() {
        let err = ClientRegistry::from_json_str("42", None).unwrap_err();
        assert!(matches!(err, FaqRelayError::RegistryLoad(_)));
    }
}
