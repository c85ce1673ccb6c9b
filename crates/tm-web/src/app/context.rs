//! Application context shared through the store scope.
//!
//! # Design
//! - Built exactly once per page load in `run_app` and handed to the mount call.
//! - Equality is identity so providers never re-render on a clone.

use crate::app::preferences::Persistor;
use crate::core::store::AppStore;
use std::rc::Rc;
use tm_config::AppConfig;
use yewdux::prelude::Dispatch;

/// Store handle, persistor and configuration for the page's lifetime.
#[derive(Clone)]
pub(crate) struct AppContext {
    /// Resolved configuration bundle.
    pub(crate) config: Rc<AppConfig>,
    /// Store dispatcher.
    pub(crate) dispatch: Dispatch<AppStore>,
    /// Persistence backend for the store's persisted slice.
    pub(crate) persistor: Rc<Persistor>,
}

impl AppContext {
    pub(crate) fn new(config: AppConfig) -> Self {
        Self {
            config: Rc::new(config),
            dispatch: Dispatch::<AppStore>::new(),
            persistor: Rc::new(Persistor::new()),
        }
    }
}

impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config) && Rc::ptr_eq(&self.persistor, &other.persistor)
    }
}
