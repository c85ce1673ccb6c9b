//! Persistence and environment helpers for the app shell.

use crate::core::store::{AppStore, PERSIST_KEY, PersistedState, decode_persisted, encode_persisted};
use crate::i18n::{DEFAULT_LOCALE, LocaleCode};
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::window;
use tracing::{debug, warn};
use yewdux::prelude::Dispatch;

/// `LocalStorage`-backed persistence for the store's persisted slice.
pub(crate) struct Persistor {
    key: &'static str,
}

impl Persistor {
    pub(crate) const fn new() -> Self {
        Self { key: PERSIST_KEY }
    }

    /// Restore the persisted slice into the store and open the gate.
    pub(crate) fn rehydrate(&self, dispatch: &Dispatch<AppStore>) {
        let restored = self.load();
        debug!(restored = restored.is_some(), "rehydrating store");
        dispatch.reduce_mut(|store| store.rehydrate(restored));
    }

    /// Write the persisted slice.
    pub(crate) fn persist(&self, state: &PersistedState) {
        let raw = match encode_persisted(state) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "failed to encode persisted state");
                return;
            }
        };
        if let Err(err) = LocalStorage::raw().set_item(self.key, &raw) {
            log_storage_error("set", self.key, &format!("{err:?}"));
        }
    }

    fn load(&self) -> Option<PersistedState> {
        let raw = LocalStorage::raw().get_item(self.key).ok().flatten()?;
        let decoded = decode_persisted(&raw);
        if decoded.is_none() {
            warn!(key = self.key, "discarding unreadable persisted state");
            LocalStorage::delete(self.key);
        }
        decoded
    }
}

/// Locale announced by the browser, falling back to the default.
pub(crate) fn browser_locale() -> LocaleCode {
    window()
        .navigator()
        .language()
        .and_then(|tag| LocaleCode::from_lang_tag(&tag))
        .unwrap_or(DEFAULT_LOCALE)
}

fn log_storage_error(operation: &'static str, key: &'static str, detail: &str) {
    warn!(operation, key, detail, "storage operation failed");
}
