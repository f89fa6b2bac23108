//! Wiring: buffers, recomposer, store, and sink behind one constructor.

use std::time::Duration;

use tinker_compose::BufferId;
use tinker_store::KeyValueStore;
use tokio::sync::{mpsc, oneshot};

use crate::buffer::{BufferSet, SharedBuffer};
use crate::debounce::Debounce;
use crate::error::EngineError;
use crate::recomposer::{Command, Recomposer, SaveReceipt};
use crate::sink::PreviewSink;

/// Default quiet period between the last edit and a regeneration.
///
/// Chosen to balance responsiveness against redundant recomposition work;
/// anything in the 300-500 ms band behaves well for interactive typing.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Fixed engine configuration.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
	/// Span of inactivity required before a pending regeneration fires.
	pub quiet_period: Duration,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			quiet_period: DEFAULT_QUIET_PERIOD,
		}
	}
}

/// Command handle to a running playground.
#[derive(Debug, Clone)]
pub struct PlaygroundHandle {
	commands: mpsc::UnboundedSender<Command>,
}

impl PlaygroundHandle {
	/// Snapshots all three buffers and writes them through the store.
	///
	/// Resolves with the save confirmation, or with the failed-save signal
	/// if the store rejects the write. Neither outcome disturbs the live
	/// preview or the buffer contents.
	pub async fn save(&self) -> Result<SaveReceipt, EngineError> {
		let (tx, rx) = oneshot::channel();
		self.commands
			.send(Command::Save { ack: tx })
			.map_err(|_| EngineError::Disconnected)?;
		rx.await
			.map_err(|_| EngineError::Disconnected)?
			.map_err(EngineError::from)
	}

	/// Asks the recomposer to stop after flushing any pending regeneration.
	pub fn shutdown(&self) {
		let _ = self.commands.send(Command::Shutdown);
	}
}

/// A wired playground: the three buffer handles plus the command handle.
#[derive(Debug, Clone)]
pub struct Playground {
	buffers: BufferSet,
	handle: PlaygroundHandle,
}

impl Playground {
	/// Restores buffer content from `store` and wires the recompose loop.
	///
	/// The returned [`Recomposer`] must be driven (spawned or awaited) for
	/// the playground to make progress; the sink must be ready before that
	/// happens, since the loop renders immediately on startup.
	pub fn launch<P, S>(sink: P, store: S, config: EngineConfig) -> (Self, Recomposer<P, S>)
	where
		P: PreviewSink,
		S: KeyValueStore,
	{
		let (buffers, changes) = BufferSet::restore(&store);
		let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
		let recomposer = Recomposer::new(
			buffers.clone(),
			changes,
			cmd_rx,
			sink,
			store,
			Debounce::new(config.quiet_period),
		);
		let playground = Self {
			buffers,
			handle: PlaygroundHandle { commands: cmd_tx },
		};
		(playground, recomposer)
	}

	pub fn buffer(&self, id: BufferId) -> &SharedBuffer {
		self.buffers.get(id)
	}

	pub fn buffers(&self) -> &BufferSet {
		&self.buffers
	}

	pub fn handle(&self) -> &PlaygroundHandle {
		&self.handle
	}
}
