//! Preview sinks: where composite documents are delivered.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tinker_compose::CompositeDocument;
use tracing::debug;

/// Errors surfaced by a preview sink.
#[derive(Debug, Error)]
pub enum SinkError {
	/// Error writing the preview target.
	#[error("I/O error writing preview {path}: {error}")]
	Io {
		path: PathBuf,
		#[source]
		error: std::io::Error,
	},

	/// Renderer-specific failure (preview pane unavailable, display gone).
	#[error("renderer failure: {0}")]
	Renderer(String),
}

/// Accepts complete composite documents for display.
///
/// Every render must fully replace the previously rendered state, including
/// any executable state from the prior document, as if the document were
/// loaded into a fresh execution context. The recomposer guarantees in turn
/// that `render` only ever receives complete, self-consistent documents,
/// never partial ones.
pub trait PreviewSink: Send {
	fn render(&mut self, doc: &CompositeDocument) -> Result<(), SinkError>;
}

/// Sink that atomically rewrites a single HTML file per render.
///
/// The temp-file + rename write means anything watching the file only ever
/// sees complete documents, and a reloading viewer starts each render from
/// a fresh execution context.
#[derive(Debug)]
pub struct FileSink {
	path: PathBuf,
}

impl FileSink {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl PreviewSink for FileSink {
	fn render(&mut self, doc: &CompositeDocument) -> Result<(), SinkError> {
		crate::io::write_atomic(&self.path, doc.as_str().as_bytes()).map_err(|error| {
			SinkError::Io {
				path: self.path.clone(),
				error,
			}
		})?;
		debug!(path = %self.path.display(), bytes = doc.len_bytes(), "preview.render");
		Ok(())
	}
}

/// In-memory sink retaining every rendered document.
///
/// Cheap-clone handle; all clones observe the same render history. Used by
/// tests and by embedding hosts that present the document themselves.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
	rendered: Arc<Mutex<Vec<CompositeDocument>>>,
}

impl MemorySink {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn render_count(&self) -> usize {
		self.rendered.lock().len()
	}

	/// The most recently rendered document, if any.
	pub fn last(&self) -> Option<CompositeDocument> {
		self.rendered.lock().last().cloned()
	}

	/// Full render history, oldest first.
	pub fn rendered(&self) -> Vec<CompositeDocument> {
		self.rendered.lock().clone()
	}
}

impl PreviewSink for MemorySink {
	fn render(&mut self, doc: &CompositeDocument) -> Result<(), SinkError> {
		self.rendered.lock().push(doc.clone());
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use tinker_compose::{SourceSnapshot, compose};

	use super::*;

	#[test]
	fn file_sink_fully_replaces_previous_render() {
		let dir = tempfile::tempdir().expect("tempdir");
		let mut sink = FileSink::new(dir.path().join("preview.html"));

		let first = compose(&SourceSnapshot::new("<p>one</p>", "", ""));
		let second = compose(&SourceSnapshot::new("<p>two</p>", "", ""));
		sink.render(&first).expect("render");
		sink.render(&second).expect("render");

		let on_disk = std::fs::read_to_string(sink.path()).expect("read");
		assert_eq!(on_disk, second.as_str());
		assert!(!on_disk.contains("<p>one</p>"));
	}

	#[test]
	fn file_sink_reports_unwritable_target() {
		let mut sink = FileSink::new("/nonexistent-dir/sub/preview.html");
		let doc = compose(&SourceSnapshot::default());

		match sink.render(&doc) {
			Err(SinkError::Io { path, .. }) => {
				assert_eq!(path, Path::new("/nonexistent-dir/sub/preview.html"));
			}
			other => panic!("expected Io error, got {other:?}"),
		}
	}

	#[test]
	fn memory_sink_clones_share_history() {
		let sink = MemorySink::new();
		let mut writer = sink.clone();

		let doc = compose(&SourceSnapshot::placeholders());
		writer.render(&doc).expect("render");

		assert_eq!(sink.render_count(), 1);
		assert_eq!(sink.last(), Some(doc));
	}
}
