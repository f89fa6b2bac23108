use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when reading or writing the playground store.
#[derive(Debug, Error)]
pub enum StoreError {
	/// Error reading or writing the backing file.
	#[error("I/O error accessing {path}: {error}")]
	Io {
		/// Path of the store file involved.
		path: PathBuf,
		/// The underlying I/O error.
		#[source]
		error: std::io::Error,
	},

	/// The backing file exists but is not a valid store.
	#[error("malformed store file {path}: {error}")]
	Malformed {
		path: PathBuf,
		#[source]
		error: serde_json::Error,
	},

	/// Store content could not be encoded for writing.
	#[error("failed to encode store file {path}: {error}")]
	Encode {
		path: PathBuf,
		#[source]
		error: serde_json::Error,
	},
}
