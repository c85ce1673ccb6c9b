#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Startup configuration for the Tasking Manager web front-end.
//!
//! Layout: `flag.rs` (loosely-typed feature flags), `model.rs` (the resolved
//! [`AppConfig`] bundle), `loader.rs` (layering compile-time and runtime values),
//! `error.rs` (error types).

pub mod error;
pub mod flag;
pub mod loader;
pub mod model;

pub use error::{ConfigError, ConfigResult};
pub use flag::FlagValue;
pub use loader::{
    ENVIRONMENT_KEY, RawConfig, SENTRY_DSN_KEY, SERVICE_WORKER_KEY, load, load_from_str,
};
pub use model::AppConfig;
