use std::fmt;

use crate::SourceSnapshot;

/// A complete standalone preview document.
///
/// Produced by [`compose`], handed to the preview sink, and discarded; it
/// has no identity beyond the moment it is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeDocument(String);

impl CompositeDocument {
	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_string(self) -> String {
		self.0
	}

	pub fn len_bytes(&self) -> usize {
		self.0.len()
	}
}

impl fmt::Display for CompositeDocument {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for CompositeDocument {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

/// Assembles the three buffer snapshots into one standalone document.
///
/// The CSS snapshot lands verbatim in a `<style>` block, the HTML snapshot
/// verbatim in the body, and the JS snapshot inside an immediately-invoked
/// function so that top-level `let`/`const`/function declarations get a
/// fresh scope on every regeneration instead of colliding with the previous
/// render's globals.
///
/// Deterministic and infallible: identical snapshots always produce the
/// identical string, and no input can make assembly fail. Content is trusted
/// author input and is not escaped; a literal `</script>` inside the JS
/// snapshot therefore truncates the script region of the rendered preview.
/// That failure stays inside the preview and never reaches the pipeline.
pub fn compose(snapshot: &SourceSnapshot) -> CompositeDocument {
	const SKELETON_LEN: usize = 192;

	let mut doc = String::with_capacity(SKELETON_LEN + snapshot.len_bytes());
	doc.push_str("<!DOCTYPE html>\n");
	doc.push_str("<html>\n");
	doc.push_str("<head>\n");
	doc.push_str("<title>Preview</title>\n");
	doc.push_str("<style>\n");
	doc.push_str(&snapshot.css);
	doc.push_str("\n</style>\n");
	doc.push_str("</head>\n");
	doc.push_str("<body>\n");
	doc.push_str(&snapshot.html);
	doc.push_str("\n<script type=\"text/javascript\">\n");
	doc.push_str("(function() {\n");
	doc.push_str(&snapshot.js);
	doc.push_str("\n})();\n");
	doc.push_str("</script>\n");
	doc.push_str("</body>\n");
	doc.push_str("</html>\n");
	CompositeDocument(doc)
}
