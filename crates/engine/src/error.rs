use thiserror::Error;
use tinker_store::StoreError;

use crate::sink::SinkError;

/// Errors surfaced by the recompose loop and its handle.
#[derive(Debug, Error)]
pub enum EngineError {
	/// The preview sink rejected a render. Fatal to the loop: a preview
	/// that cannot be reached must fail loudly, not drop renders silently.
	#[error("preview sink failed: {0}")]
	Sink(#[from] SinkError),

	/// The store rejected a session save. Reported to the caller of
	/// [`PlaygroundHandle::save`](crate::PlaygroundHandle::save); the loop
	/// itself keeps running.
	#[error("session save failed: {0}")]
	Store(#[from] StoreError),

	/// The recomposer is no longer running.
	#[error("recomposer is no longer running")]
	Disconnected,
}
