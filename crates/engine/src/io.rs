use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Writes `bytes` to `path` atomically: temp file in the target directory,
/// then rename over the destination. Readers only ever see a complete file.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
	let dir = match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};
	let mut tmp = NamedTempFile::new_in(dir)?;
	tmp.write_all(bytes)?;
	tmp.persist(path).map_err(|err| err.error)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn write_replaces_existing_content() {
		let dir = tempfile::tempdir().expect("tempdir");
		let path = dir.path().join("preview.html");

		write_atomic(&path, b"first").expect("write");
		write_atomic(&path, b"second").expect("write");

		assert_eq!(std::fs::read(&path).expect("read"), b"second");
	}
}
