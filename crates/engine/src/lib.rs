//! Debounced recomposition engine for the live playground.
//!
//! Three independently edited buffers feed one preview. Every content
//! mutation emits a change notification; the recomposer coalesces bursts of
//! notifications behind a fixed quiet period, then snapshots all three
//! buffers, composes one standalone document, and hands it to the sink:
//!
//! ```text
//! ┌──────────────┐ change  ┌──────────┐ quiet   ┌─────────┐ doc  ┌──────┐
//! │ SharedBuffer │────────▶│ Debounce │────────▶│ compose │─────▶│ Sink │
//! │ (HTML/CSS/JS)│         │ (one     │ period  │ (pure)  │      │      │
//! └──────────────┘         │ deadline)│         └─────────┘      └──────┘
//! ```
//!
//! Everything runs on one logical thread of control: a single
//! [`Recomposer`] task owns the change stream, the lone pending deadline,
//! and the sink, so two regenerations can never race or interleave.
//! Persistence is a separate, timer-free path driven through
//! [`PlaygroundHandle::save`].
//!
//! [`Playground::launch`] wires buffers, recomposer, store, and sink
//! together with explicit dependency passing; there is no ambient global
//! state anywhere in the pipeline.

mod buffer;
mod debounce;
mod error;
mod io;
mod playground;
mod recomposer;
mod sink;

pub use buffer::{BufferSet, SharedBuffer};
pub use debounce::Debounce;
pub use error::EngineError;
pub use playground::{DEFAULT_QUIET_PERIOD, EngineConfig, Playground, PlaygroundHandle};
pub use recomposer::{RecomposeStats, Recomposer, SaveReceipt};
pub use sink::{FileSink, MemorySink, PreviewSink, SinkError};
