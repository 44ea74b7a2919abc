use std::path::PathBuf;

use thiserror::Error;

use crate::model::node::NodeId;

/// Errors raised while tokenizing corpora, building the index or walking it.
///
/// Reaching a dead-end node or exhausting the sentence budget are normal
/// walk outcomes and never show up here.
#[derive(Error, Debug)]
pub enum SpliceError {
	/// The input at `offset` matches none of the tokenizer rules.
	#[error("no token rule matches {found:?} at byte {offset}")]
	Tokenization { offset: usize, found: char },

	/// The index holds no start node, so a walk cannot begin.
	#[error("graph has no start node, nothing to walk")]
	EmptyGraph,

	/// A corpus was rejected while the index was being built.
	#[error("corpus `{tag}`: {source}")]
	Corpus {
		tag: String,
		#[source]
		source: Box<SpliceError>,
	},

	#[error("cannot read corpus {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("unknown node {0}")]
	UnknownNode(NodeId),
}

pub type SpliceResult<T> = Result<T, SpliceError>;

impl SpliceError {
	/// Wraps `self` with the tag of the corpus that produced it.
	pub fn in_corpus(self, tag: &str) -> Self {
		SpliceError::Corpus {
			tag: tag.to_owned(),
			source: Box::new(self),
		}
	}
}
