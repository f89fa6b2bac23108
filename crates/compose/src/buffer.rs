use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one of the three independently edited text sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BufferId {
	Html,
	Css,
	Js,
}

impl BufferId {
	/// All buffer identities, in composition order.
	pub const ALL: [BufferId; 3] = [BufferId::Html, BufferId::Css, BufferId::Js];

	/// Fixed key under which this buffer's content is persisted.
	pub const fn storage_key(self) -> &'static str {
		match self {
			BufferId::Html => "userHtml",
			BufferId::Css => "userCss",
			BufferId::Js => "userJs",
		}
	}

	/// Fallback content used when the store holds nothing for this buffer.
	pub const fn placeholder(self) -> &'static str {
		match self {
			BufferId::Html => "<!-- HTML content here -->\n",
			BufferId::Css => "/* CSS content here */\n",
			BufferId::Js => "// JavaScript content here\n",
		}
	}
}

impl fmt::Display for BufferId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			BufferId::Html => "html",
			BufferId::Css => "css",
			BufferId::Js => "js",
		};
		f.write_str(name)
	}
}

/// Owned capture of all three buffers at one instant.
///
/// Snapshots are taken fresh for every composition and never mutated
/// afterwards; no relationship between the three strings is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceSnapshot {
	pub html: String,
	pub css: String,
	pub js: String,
}

impl SourceSnapshot {
	pub fn new(
		html: impl Into<String>,
		css: impl Into<String>,
		js: impl Into<String>,
	) -> Self {
		Self {
			html: html.into(),
			css: css.into(),
			js: js.into(),
		}
	}

	/// Snapshot holding each buffer's fallback placeholder.
	pub fn placeholders() -> Self {
		Self::new(
			BufferId::Html.placeholder(),
			BufferId::Css.placeholder(),
			BufferId::Js.placeholder(),
		)
	}

	pub fn get(&self, id: BufferId) -> &str {
		match id {
			BufferId::Html => &self.html,
			BufferId::Css => &self.css,
			BufferId::Js => &self.js,
		}
	}

	pub fn set(&mut self, id: BufferId, text: impl Into<String>) {
		match id {
			BufferId::Html => self.html = text.into(),
			BufferId::Css => self.css = text.into(),
			BufferId::Js => self.js = text.into(),
		}
	}

	/// Total content size across all three buffers.
	pub fn len_bytes(&self) -> usize {
		self.html.len() + self.css.len() + self.js.len()
	}
}
