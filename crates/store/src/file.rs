use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::{KeyValueStore, StoreError};

/// Durable key-value store backed by a single JSON object file.
///
/// The whole map is rewritten on every [`set`](KeyValueStore::set) through a
/// temp file in the target directory followed by a rename, so readers never
/// observe a partial store.
#[derive(Debug)]
pub struct JsonFileStore {
	path: PathBuf,
	entries: BTreeMap<String, String>,
}

impl JsonFileStore {
	/// Opens the store at `path`, loading existing content if present.
	///
	/// A missing file is an empty store; an unreadable or malformed file is
	/// an error.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();
		let entries = match fs::read_to_string(&path) {
			Ok(raw) => serde_json::from_str(&raw).map_err(|error| StoreError::Malformed {
				path: path.clone(),
				error,
			})?,
			Err(error) if error.kind() == ErrorKind::NotFound => BTreeMap::new(),
			Err(error) => return Err(StoreError::Io { path, error }),
		};
		Ok(Self { path, entries })
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn io_err(&self, error: std::io::Error) -> StoreError {
		StoreError::Io {
			path: self.path.clone(),
			error,
		}
	}

	fn flush(&self) -> Result<(), StoreError> {
		let json =
			serde_json::to_string_pretty(&self.entries).map_err(|error| StoreError::Encode {
				path: self.path.clone(),
				error,
			})?;

		let dir = match self.path.parent() {
			Some(parent) if !parent.as_os_str().is_empty() => parent,
			_ => Path::new("."),
		};
		let mut tmp = NamedTempFile::new_in(dir).map_err(|error| self.io_err(error))?;
		tmp.write_all(json.as_bytes())
			.map_err(|error| self.io_err(error))?;
		tmp.persist(&self.path).map_err(|error| self.io_err(error.error))?;

		debug!(path = %self.path.display(), entries = self.entries.len(), "store.flush");
		Ok(())
	}
}

impl KeyValueStore for JsonFileStore {
	fn get(&self, key: &str) -> Option<String> {
		self.entries.get(key).cloned()
	}

	fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
		self.entries.insert(key.to_string(), value.to_string());
		self.flush()
	}
}
