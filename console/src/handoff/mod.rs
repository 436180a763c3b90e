//! Transfer carrier between the intake and confirm screens
//!
//! A single well-known slot carries the serialized deployment request from
//! the intake screen to the confirm screen. The slot is unsynchronized by
//! design: only the intake screen writes and only the immediately following
//! confirm screen reads. If a second intake submits between handoff and
//! read (two tabs, two terminals), the second write wins. Last-writer-wins
//! is a documented property of the carrier, not a bug.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::ConsoleError;
use crate::models::request::DeploymentRequest;
use crate::storage::file::File;

/// Slot key holding the pending deployment request
pub const HANDOFF_SLOT: &str = "gfconsole.pending_request";

/// An opaque key-value store used as the handoff carrier
///
/// Injected into both screens rather than reached for as ambient state, so
/// tests and the CLI can choose the backing.
#[async_trait]
pub trait CarrierStore: Send + Sync {
    /// Store a value under a key, replacing any previous value
    async fn put(&self, key: &str, value: String) -> Result<(), ConsoleError>;

    /// Fetch the current value of a key, if present
    async fn get(&self, key: &str) -> Result<Option<String>, ConsoleError>;

    /// Remove a key
    async fn remove(&self, key: &str) -> Result<(), ConsoleError>;
}

/// Serialize the full request into the handoff slot
///
/// The encoding is structurally lossless JSON: every field name and value
/// is preserved, no coercion.
pub async fn write_request(
    store: &dyn CarrierStore,
    request: &DeploymentRequest,
) -> Result<(), ConsoleError> {
    let blob = serde_json::to_string(request)?;
    debug!("Writing deployment request to handoff slot");
    store.put(HANDOFF_SLOT, blob).await
}

/// Read the pending request from the handoff slot
///
/// Returns `Ok(None)` when the slot is absent (first visit). Content that
/// is present but unparsable raises `HandoffCorrupt`.
pub async fn read_request(
    store: &dyn CarrierStore,
) -> Result<Option<DeploymentRequest>, ConsoleError> {
    let blob = match store.get(HANDOFF_SLOT).await? {
        Some(blob) => blob,
        None => return Ok(None),
    };

    match serde_json::from_str(&blob) {
        Ok(request) => Ok(Some(request)),
        Err(e) => Err(ConsoleError::HandoffCorrupt(e.to_string())),
    }
}

/// In-memory carrier
pub struct MemoryCarrier {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryCarrier {
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryCarrier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CarrierStore for MemoryCarrier {
    async fn put(&self, key: &str, value: String) -> Result<(), ConsoleError> {
        let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
        slots.insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, ConsoleError> {
        let slots = self.slots.read().unwrap_or_else(|e| e.into_inner());
        Ok(slots.get(key).cloned())
    }

    async fn remove(&self, key: &str) -> Result<(), ConsoleError> {
        let mut slots = self.slots.write().unwrap_or_else(|e| e.into_inner());
        slots.remove(key);
        Ok(())
    }
}

/// File-backed carrier
///
/// Stores the slot map as one JSON file so that separate console
/// invocations playing the two screens share the slot, the way two browser
/// screens share local storage.
pub struct FileCarrier {
    file: File,
}

impl FileCarrier {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            file: File::new(path),
        }
    }

    async fn load(&self) -> Result<HashMap<String, String>, ConsoleError> {
        if !self.file.exists().await {
            return Ok(HashMap::new());
        }
        self.file.read_json().await
    }
}

#[async_trait]
impl CarrierStore for FileCarrier {
    async fn put(&self, key: &str, value: String) -> Result<(), ConsoleError> {
        let mut slots = self.load().await?;
        slots.insert(key.to_string(), value);
        self.file.write_json(&slots).await
    }

    async fn get(&self, key: &str) -> Result<Option<String>, ConsoleError> {
        let slots = self.load().await?;
        Ok(slots.get(key).cloned())
    }

    async fn remove(&self, key: &str) -> Result<(), ConsoleError> {
        let mut slots = self.load().await?;
        slots.remove(key);
        self.file.write_json(&slots).await
    }
}
