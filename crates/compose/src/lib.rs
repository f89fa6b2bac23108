//! Source buffer identities and composite preview document assembly.
//!
//! The playground edits three independent text sources (HTML, CSS, JS) and
//! periodically folds them into one standalone document for the preview
//! renderer. This crate is the pure data layer of that pipeline:
//!
//! - [`BufferId`] names the three sources and carries their fixed storage
//!   keys and fallback placeholders.
//! - [`SourceSnapshot`] is an owned capture of all three buffers at one
//!   instant.
//! - [`compose`] deterministically assembles a snapshot into a
//!   [`CompositeDocument`].
//!
//! Nothing here does I/O or holds hidden state; scheduling and delivery live
//! in `tinker-engine`.

mod buffer;
mod document;

pub use buffer::{BufferId, SourceSnapshot};
pub use document::{CompositeDocument, compose};
