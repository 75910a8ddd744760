//! Pet Square local state layer.
//!
//! SYSTEM CONTEXT
//! ==============
//! The Pet Square app keeps all of its data in the browser's `localStorage`
//! under a `petSquare_` namespace. This crate is that layer: a total JSON
//! gateway over a pluggable string store, reactive bindings that mirror one
//! key each and follow changes made by other tabs, and the page actions and
//! fixtures built on top.
//!
//! DESIGN
//! ======
//! - [`area`]: raw string stores (in-memory origin, JSON file, browser).
//! - [`gateway`]: prefixing and JSON, never failing toward callers.
//! - [`binding`] / [`bus`] / [`context`]: one context per tab; bindings
//!   reconcile external changes when the context drains its feed.
//! - [`keys`], [`models`], [`fixtures`], [`actions`], [`routes`]: the
//!   application's data and the transitions its pages perform.

pub mod actions;
pub mod area;
pub mod binding;
pub mod bus;
pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod fixtures;
pub mod gateway;
pub mod keys;
pub mod models;
pub mod routes;

pub use area::{ContextId, StorageArea, StorageEvent};
pub use binding::{Binding, ObserverId, SetValue};
pub use config::StorageConfig;
pub use context::Context;
pub use error::{ConfigError, SignUpError, StorageError};
pub use gateway::Storage;
pub use keys::Key;
pub use routes::Route;
