//! The debounced recompose loop.
//!
//! One task owns everything that can trigger a regeneration: the buffer
//! change stream, the playground command stream, and the lone debounce
//! deadline. Because at most one deadline is ever pending and one task
//! performs every render, regenerations are strictly ordered; the Nth
//! firing always observes buffer state at least as recent as the (N-1)th.

use std::time::Instant;

use tinker_compose::{BufferId, compose};
use tinker_store::{KeyValueStore, StoreError, save_session};
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use crate::buffer::BufferSet;
use crate::debounce::Debounce;
use crate::error::EngineError;
use crate::sink::PreviewSink;

/// Commands accepted by a running recomposer.
#[derive(Debug)]
pub(crate) enum Command {
	/// Snapshot all three buffers and write them through the store.
	Save {
		ack: oneshot::Sender<Result<SaveReceipt, StoreError>>,
	},
	/// Stop the loop after flushing any pending regeneration.
	Shutdown,
}

/// Counters reported when the loop exits.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RecomposeStats {
	/// Documents delivered to the sink, including the startup render.
	pub renders: u64,
	/// Change notifications observed across all buffers.
	pub changes_seen: u64,
	/// Successful session saves.
	pub saves: u64,
}

/// Confirmation signal for a successful session save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveReceipt {
	/// Total bytes persisted across the three buffers.
	pub bytes: usize,
}

/// Owns the change stream, the lone pending deadline, the sink, and the
/// store. Constructed by [`Playground::launch`](crate::Playground::launch).
pub struct Recomposer<P, S>
where
	P: PreviewSink,
	S: KeyValueStore,
{
	buffers: BufferSet,
	changes: mpsc::UnboundedReceiver<BufferId>,
	commands: mpsc::UnboundedReceiver<Command>,
	sink: P,
	store: S,
	debounce: Debounce,
	stats: RecomposeStats,
}

impl<P, S> Recomposer<P, S>
where
	P: PreviewSink,
	S: KeyValueStore,
{
	pub(crate) fn new(
		buffers: BufferSet,
		changes: mpsc::UnboundedReceiver<BufferId>,
		commands: mpsc::UnboundedReceiver<Command>,
		sink: P,
		store: S,
		debounce: Debounce,
	) -> Self {
		Self {
			buffers,
			changes,
			commands,
			sink,
			store,
			debounce,
			stats: RecomposeStats::default(),
		}
	}

	/// Runs until cancellation, shutdown, or a sink failure.
	///
	/// Renders once immediately so the preview reflects startup content
	/// before any edit, then once per elapsed quiet period. On a graceful
	/// stop a still-pending regeneration is flushed first; cancellation
	/// stops without flushing.
	pub async fn run(mut self, cancel: CancellationToken) -> Result<RecomposeStats, EngineError> {
		debug!(quiet_ms = self.debounce.quiet_period().as_millis() as u64, "recompose.start");
		self.render()?;

		let flush_pending = loop {
			tokio::select! {
				() = cancel.cancelled() => {
					debug!("recompose.cancelled");
					break false;
				}
				() = self.debounce.elapsed() => {
					self.render()?;
				}
				changed = self.changes.recv() => match changed {
					Some(id) => self.on_change(id),
					// Every buffer handle is gone; nothing can change again.
					None => break true,
				},
				cmd = self.commands.recv() => match cmd {
					Some(Command::Save { ack }) => self.save(ack),
					Some(Command::Shutdown) | None => break true,
				},
			}
		};

		if flush_pending && self.debounce.is_armed() {
			self.render()?;
		}

		info!(
			renders = self.stats.renders,
			changes = self.stats.changes_seen,
			saves = self.stats.saves,
			"recompose.stopped"
		);
		Ok(self.stats)
	}

	fn on_change(&mut self, id: BufferId) {
		self.stats.changes_seen += 1;
		trace!(buffer = %id, "recompose.arm");
		self.debounce.arm();
	}

	/// Snapshots all three buffers, composes, and delivers to the sink.
	fn render(&mut self) -> Result<(), EngineError> {
		let started = Instant::now();
		let snapshot = self.buffers.snapshot();
		let doc = compose(&snapshot);
		let bytes = doc.len_bytes();

		if let Err(err) = self.sink.render(&doc) {
			error!(error = %err, "recompose.render_failed");
			return Err(err.into());
		}

		self.stats.renders += 1;
		debug!(
			bytes,
			elapsed_us = started.elapsed().as_micros() as u64,
			"recompose.flush"
		);
		Ok(())
	}

	fn save(&mut self, ack: oneshot::Sender<Result<SaveReceipt, StoreError>>) {
		let snapshot = self.buffers.snapshot();
		let bytes = snapshot.len_bytes();
		let result = save_session(&mut self.store, &snapshot).map(|()| SaveReceipt { bytes });

		match &result {
			Ok(receipt) => {
				self.stats.saves += 1;
				debug!(bytes = receipt.bytes, "session.saved");
			}
			Err(err) => warn!(error = %err, "session.save_failed"),
		}

		// The caller may have given up waiting; the save itself already
		// happened (or failed) either way.
		let _ = ack.send(result);
	}
}
