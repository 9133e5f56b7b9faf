//! # Sentinel-Store
//!
//! Storage abstractions for Prompt Sentinel.
//!
//! ## Overview
//!
//! The inspection pipeline touches shared storage in exactly three ways:
//! resolving an API key by its secret, best-effort stamping of a key's
//! last-use time, and appending/listing audit entries. Those operations
//! are expressed as provider-agnostic traits so backends can be swapped
//! without changing pipeline code:
//!
//! - [`ApiKeyStore`] - credential lookup and usage stamping
//! - [`ProjectStore`] - read-only project resolution
//! - [`AuditStore`] - append-and-list persistence for audit entries
//!
//! [`MemoryStore`] implements all three for tests and single-process
//! deployments. Management CRUD (creating projects, issuing keys) is a
//! separate concern and writes through whatever backs these traits.
//!
//! ## Quick Start
//!
//! ```rust
//! use sentinel_store::{ApiKeyStore, MemoryStore};
//! use sentinel_core::ApiKey;
//!
//! # async fn example() -> Result<(), sentinel_store::StoreError> {
//! let store = MemoryStore::new();
//! let key = ApiKey::issue("ci", None);
//! let secret = key.secret.clone();
//! store.add_key(key).await;
//!
//! let found = store.find_by_secret(&secret).await?;
//! assert!(found.is_some());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod memory;
pub mod store;

// Primary exports
pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::{ApiKeyStore, AuditStore, ProjectStore};
