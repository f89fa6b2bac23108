//! Key-value persistence for playground sessions.
//!
//! The playground persists the three buffer contents under fixed keys on
//! explicit user action and restores them at startup, before the first
//! render. This crate provides the [`KeyValueStore`] boundary plus two
//! implementations:
//!
//! - [`MemoryStore`] — volatile, for tests and embedding hosts that bring
//!   their own durability.
//! - [`JsonFileStore`] — one JSON object file, rewritten atomically
//!   (temp file + rename) on every write.
//!
//! Persistence is a separate path from the live preview: a failed save is
//! reported to the caller and never disturbs buffers or rendering.

mod error;
mod file;
mod kv;
mod session;

pub use error::StoreError;
pub use file::JsonFileStore;
pub use kv::{KeyValueStore, MemoryStore};
pub use session::{load_or_default, load_session, save_session};
