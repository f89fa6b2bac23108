//! Shared text buffers with change notification.

use std::sync::Arc;

use parking_lot::RwLock;
use ropey::Rope;
use tinker_compose::{BufferId, SourceSnapshot};
use tinker_store::{KeyValueStore, load_session};
use tokio::sync::mpsc;
use tracing::trace;

/// Handle to one independently edited text buffer.
///
/// Cloning shares the underlying content. Every content mutation emits
/// exactly one change notification to the owning recomposer; finer-grained
/// upstream signals (per keystroke, per mutation batch) are equivalent once
/// debounced, so callers may map either onto [`set_text`](Self::set_text)
/// or [`edit`](Self::edit).
#[derive(Debug, Clone)]
pub struct SharedBuffer {
	id: BufferId,
	content: Arc<RwLock<Rope>>,
	changes: mpsc::UnboundedSender<BufferId>,
}

impl SharedBuffer {
	fn new(id: BufferId, initial: &str, changes: mpsc::UnboundedSender<BufferId>) -> Self {
		Self {
			id,
			content: Arc::new(RwLock::new(Rope::from_str(initial))),
			changes,
		}
	}

	pub fn id(&self) -> BufferId {
		self.id
	}

	/// Current content as an owned snapshot.
	pub fn text(&self) -> String {
		self.content.read().to_string()
	}

	pub fn len_bytes(&self) -> usize {
		self.content.read().len_bytes()
	}

	pub fn is_empty(&self) -> bool {
		self.len_bytes() == 0
	}

	/// Reads the underlying rope without copying it out.
	pub fn with<R>(&self, f: impl FnOnce(&Rope) -> R) -> R {
		let guard = self.content.read();
		f(&guard)
	}

	/// Replaces the whole content and emits one change notification.
	pub fn set_text(&self, text: &str) {
		*self.content.write() = Rope::from_str(text);
		self.notify();
	}

	/// Applies `f` to the underlying rope and emits one change notification.
	pub fn edit<R>(&self, f: impl FnOnce(&mut Rope) -> R) -> R {
		let out = {
			let mut guard = self.content.write();
			f(&mut guard)
		};
		self.notify();
		out
	}

	fn notify(&self) {
		trace!(buffer = %self.id, "buffer.change");
		// A stopped recomposer has nothing left to regenerate; the edit
		// itself still applies.
		let _ = self.changes.send(self.id);
	}
}

/// The three playground buffers.
///
/// Construction also yields the change-notification receiver that the
/// recomposer consumes; the set itself is a cheap-clone bundle of handles.
#[derive(Debug, Clone)]
pub struct BufferSet {
	html: SharedBuffer,
	css: SharedBuffer,
	js: SharedBuffer,
}

impl BufferSet {
	/// Creates the three buffers seeded from `initial`.
	pub fn new(initial: &SourceSnapshot) -> (Self, mpsc::UnboundedReceiver<BufferId>) {
		let (tx, rx) = mpsc::unbounded_channel();
		let set = Self {
			html: SharedBuffer::new(BufferId::Html, &initial.html, tx.clone()),
			css: SharedBuffer::new(BufferId::Css, &initial.css, tx.clone()),
			js: SharedBuffer::new(BufferId::Js, &initial.js, tx),
		};
		(set, rx)
	}

	/// Creates the three buffers seeded from persisted session content,
	/// falling back to each buffer's placeholder.
	pub fn restore<S>(store: &S) -> (Self, mpsc::UnboundedReceiver<BufferId>)
	where
		S: KeyValueStore + ?Sized,
	{
		Self::new(&load_session(store))
	}

	pub fn get(&self, id: BufferId) -> &SharedBuffer {
		match id {
			BufferId::Html => &self.html,
			BufferId::Css => &self.css,
			BufferId::Js => &self.js,
		}
	}

	pub fn html(&self) -> &SharedBuffer {
		&self.html
	}

	pub fn css(&self) -> &SharedBuffer {
		&self.css
	}

	pub fn js(&self) -> &SharedBuffer {
		&self.js
	}

	/// Captures all three buffers at one instant.
	pub fn snapshot(&self) -> SourceSnapshot {
		SourceSnapshot::new(self.html.text(), self.css.text(), self.js.text())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn set_text_emits_exactly_one_notification() {
		let (set, mut rx) = BufferSet::new(&SourceSnapshot::default());

		set.css().set_text("body { margin: 0; }");

		assert_eq!(rx.try_recv().ok(), Some(BufferId::Css));
		assert!(rx.try_recv().is_err(), "no extra notifications");
	}

	#[test]
	fn edit_applies_and_notifies() {
		let (set, mut rx) = BufferSet::new(&SourceSnapshot::new("<p>", "", ""));

		set.html().edit(|rope| {
			let end = rope.len_chars();
			rope.insert(end, "hi</p>");
		});

		assert_eq!(set.html().text(), "<p>hi</p>");
		assert_eq!(rx.try_recv().ok(), Some(BufferId::Html));
		assert!(rx.try_recv().is_err());
	}

	#[test]
	fn snapshot_reflects_latest_content() {
		let (set, _rx) = BufferSet::new(&SourceSnapshot::placeholders());

		set.js().set_text("let done = true;");
		let snapshot = set.snapshot();

		assert_eq!(snapshot.js, "let done = true;");
		assert_eq!(snapshot.html, BufferId::Html.placeholder());
	}

	#[test]
	fn restore_seeds_from_store() {
		let mut store = tinker_store::MemoryStore::new();
		store.set(BufferId::Html.storage_key(), "<h1>saved</h1>").expect("set");

		let (set, _rx) = BufferSet::restore(&store);

		assert_eq!(set.html().text(), "<h1>saved</h1>");
		assert_eq!(set.css().text(), BufferId::Css.placeholder());
	}

	#[test]
	fn edits_survive_recomposer_shutdown() {
		let (set, rx) = BufferSet::new(&SourceSnapshot::default());
		drop(rx);

		set.js().set_text("still editable");
		assert_eq!(set.js().text(), "still editable");
	}
}
