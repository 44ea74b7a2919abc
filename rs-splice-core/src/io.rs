use std::fs;
use std::path::Path;

use crate::error::{SpliceError, SpliceResult};
use crate::model::block::Tag;
use crate::model::graph_index::Corpus;

/// Reads a whole corpus file as UTF-8 text.
///
/// # Errors
/// Returns [`SpliceError::Io`] naming the path if the file cannot be read.
pub fn read_corpus<P: AsRef<Path>>(path: P) -> SpliceResult<String> {
	let path = path.as_ref();
	fs::read_to_string(path).map_err(|source| SpliceError::Io { path: path.to_path_buf(), source })
}

/// Tag used for a corpus loaded from `path`: the path as given.
pub fn default_tag<P: AsRef<Path>>(path: P) -> Tag {
	Tag::new(&path.as_ref().to_string_lossy())
}

/// Loads `path` as a corpus, tagged with `tag` or the path itself.
pub fn load_corpus<P: AsRef<Path>>(path: P, tag: Option<&str>) -> SpliceResult<Corpus> {
	let text = read_corpus(&path)?;
	let tag = tag.map_or_else(|| default_tag(&path), Tag::new);
	Ok(Corpus { tag, text })
}
