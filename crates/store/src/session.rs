//! Session save and restore across the three fixed buffer keys.

use tinker_compose::{BufferId, SourceSnapshot};
use tracing::{debug, info};

use crate::{KeyValueStore, StoreError};

/// Persists all three buffer snapshots under their fixed keys.
///
/// Invoked only on explicit user action, never per edit. A partial write is
/// possible if the store fails midway; the next successful save repairs it.
pub fn save_session<S>(store: &mut S, snapshot: &SourceSnapshot) -> Result<(), StoreError>
where
	S: KeyValueStore + ?Sized,
{
	for id in BufferId::ALL {
		store.set(id.storage_key(), snapshot.get(id))?;
	}
	info!(bytes = snapshot.len_bytes(), "session.save");
	Ok(())
}

/// Returns the persisted content for `id`, or its placeholder when the store
/// holds nothing under that key.
pub fn load_or_default<S>(store: &S, id: BufferId) -> String
where
	S: KeyValueStore + ?Sized,
{
	match store.get(id.storage_key()) {
		Some(text) => text,
		None => {
			debug!(buffer = %id, "session.load_default");
			id.placeholder().to_string()
		}
	}
}

/// Restores a full snapshot, falling back to placeholders per buffer.
pub fn load_session<S>(store: &S) -> SourceSnapshot
where
	S: KeyValueStore + ?Sized,
{
	SourceSnapshot::new(
		load_or_default(store, BufferId::Html),
		load_or_default(store, BufferId::Css),
		load_or_default(store, BufferId::Js),
	)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::MemoryStore;

	#[test]
	fn save_then_load_round_trips_exactly() {
		let mut store = MemoryStore::new();
		let snapshot = SourceSnapshot::new(
			"<main>hello</main>",
			"main { display: grid; }",
			"document.title = 'hi';",
		);

		save_session(&mut store, &snapshot).expect("save");

		for id in BufferId::ALL {
			assert_eq!(load_or_default(&store, id), snapshot.get(id));
		}
		assert_eq!(load_session(&store), snapshot);
	}

	#[test]
	fn untouched_store_yields_placeholders() {
		let store = MemoryStore::new();
		for id in BufferId::ALL {
			assert_eq!(load_or_default(&store, id), id.placeholder());
		}
		assert_eq!(load_session(&store), SourceSnapshot::placeholders());
	}

	#[test]
	fn partial_store_falls_back_per_buffer() {
		let mut store = MemoryStore::new();
		store.set(BufferId::Css.storage_key(), "b { color: blue; }").expect("set");

		let snapshot = load_session(&store);
		assert_eq!(snapshot.css, "b { color: blue; }");
		assert_eq!(snapshot.html, BufferId::Html.placeholder());
		assert_eq!(snapshot.js, BufferId::Js.placeholder());
	}

	#[test]
	fn save_round_trips_through_file_store() {
		let dir = tempfile::tempdir().expect("tempdir");
		let path = dir.path().join("session.json");

		let mut store = crate::JsonFileStore::open(&path).expect("open");
		let snapshot = SourceSnapshot::new("<p>a</p>", "p {}", "let n = 0;");
		save_session(&mut store, &snapshot).expect("save");

		let reopened = crate::JsonFileStore::open(&path).expect("reopen");
		assert_eq!(load_session(&reopened), snapshot);
	}
}
