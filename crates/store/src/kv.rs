use std::collections::HashMap;

use crate::StoreError;

/// Key-value boundary for client-local persistence.
///
/// Three fixed keys are in use, one per buffer role (see
/// [`BufferId::storage_key`](tinker_compose::BufferId::storage_key)); the
/// trait itself is key-agnostic.
pub trait KeyValueStore {
	/// Returns the stored value for `key`, if any.
	fn get(&self, key: &str) -> Option<String>;

	/// Stores `value` under `key`, replacing any previous value.
	fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Volatile in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
	entries: HashMap<String, String>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl KeyValueStore for MemoryStore {
	fn get(&self, key: &str) -> Option<String> {
		self.entries.get(key).cloned()
	}

	fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
		self.entries.insert(key.to_string(), value.to_string());
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn memory_store_overwrites_previous_value() {
		let mut store = MemoryStore::new();
		assert!(store.get("userHtml").is_none());

		store.set("userHtml", "<p>first</p>").expect("set");
		store.set("userHtml", "<p>second</p>").expect("set");

		assert_eq!(store.get("userHtml").as_deref(), Some("<p>second</p>"));
		assert_eq!(store.len(), 1);
	}
}
