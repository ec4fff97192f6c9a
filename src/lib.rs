//! Cache Adapter - a namespaced key-value cache over pluggable stores
//!
//! Callers program against the [`Cache`] trait; [`NamespacedCache`] implements
//! it over any [`BackingStore`], prefixing every key with a configured
//! namespace. [`MemoryStore`] is the in-process store, served over HTTP by the
//! `cache_adapter` binary.

pub mod adapter;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod store;
pub mod tasks;

pub use adapter::{Cache, MultiGet, NamespacedCache};
pub use api::AppState;
pub use config::{AdapterConfig, ConfigSource, EnvConfigSource, ServerConfig};
pub use error::{CacheError, Result};
pub use registry::StoreRegistry;
pub use store::{BackingStore, MemoryStore};
pub use tasks::spawn_sweeper;
