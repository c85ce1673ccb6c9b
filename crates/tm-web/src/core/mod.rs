//! Core, DOM-free primitives and helpers for the Web UI.
pub mod bootstrap;
pub mod fonts;
pub mod providers;
pub mod store;
pub mod worker;
