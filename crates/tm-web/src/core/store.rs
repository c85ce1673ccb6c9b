//! App-wide yewdux store and its persisted slice.
//!
//! # Design
//! - Keep shared UI state in one store to avoid ad-hoc contexts.
//! - Only preferences are persisted; system flags are rebuilt every page load.
//! - Persisted payloads carry a version and are discarded on mismatch.

use crate::i18n::LocaleCode;
use serde::{Deserialize, Serialize};
use yewdux::store::Store;

/// Storage key for the persisted slice.
pub const PERSIST_KEY: &str = "tm.persist.root";
/// Version written with every persisted payload.
pub const PERSIST_VERSION: u32 = 1;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Eq, Store, Default)]
pub struct AppStore {
    /// User preferences restored by the persistence gate.
    pub preferences: Preferences,
    /// Session-only system flags.
    pub system: SystemState,
}

/// Persisted user preferences.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Preferences {
    /// Explicitly chosen locale; `None` follows the browser language.
    pub locale: Option<LocaleCode>,
}

/// Session-only flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SystemState {
    /// Persisted state has been restored; the gate renders children once set.
    pub rehydrated: bool,
    /// A newer cached build is waiting to take over.
    pub update_available: bool,
}

/// Serialized form of the persisted slice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    /// Payload version.
    pub version: u32,
    /// Chosen locale.
    #[serde(default)]
    pub locale: Option<LocaleCode>,
}

impl AppStore {
    /// Snapshot the persisted slice.
    #[must_use]
    pub const fn persisted(&self) -> PersistedState {
        PersistedState {
            version: PERSIST_VERSION,
            locale: self.preferences.locale,
        }
    }

    /// Apply a restored payload and mark the store as rehydrated.
    pub fn rehydrate(&mut self, persisted: Option<PersistedState>) {
        if let Some(persisted) = persisted {
            self.preferences.locale = persisted.locale;
        }
        self.system.rehydrated = true;
    }
}

/// Decode a stored payload, discarding corrupt or outdated ones.
#[must_use]
pub fn decode_persisted(raw: &str) -> Option<PersistedState> {
    serde_json::from_str::<PersistedState>(raw)
        .ok()
        .filter(|state| state.version == PERSIST_VERSION)
}

/// Encode the persisted slice.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_persisted(state: &PersistedState) -> Result<String, serde_json::Error> {
    serde_json::to_string(state)
}
