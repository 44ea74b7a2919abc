use std::fmt;

use super::block::{Block, Tag};

/// Index of a node inside its [`GraphIndex`](super::graph_index::GraphIndex).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Category of a forward relation, decided by comparing the tags of its
/// two endpoints. Travel direction plays no part in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelationKind {
	SameCorpus,
	CrossCorpus,
}

impl RelationKind {
	pub fn between(a: &Tag, b: &Tag) -> Self {
		if a == b { RelationKind::SameCorpus } else { RelationKind::CrossCorpus }
	}

	pub fn other(self) -> Self {
		match self {
			RelationKind::SameCorpus => RelationKind::CrossCorpus,
			RelationKind::CrossCorpus => RelationKind::SameCorpus,
		}
	}
}

/// A block of one corpus, placed in the overlap graph.
///
/// ## Invariants
/// - Every id in the relation lists points at a node whose prefix equals
///   this node's suffix.
/// - `same_corpus` targets carry this node's tag, `cross_corpus` targets
///   carry a different one.
#[derive(Clone, Debug)]
pub struct Node {
	block: Block,
	tag: Tag,
	terminal: bool,
	same_corpus: Vec<NodeId>,
	cross_corpus: Vec<NodeId>,
}

impl Node {
	pub fn new(block: Block, tag: Tag) -> Self {
		Self {
			terminal: block.is_terminal(),
			block,
			tag,
			same_corpus: Vec::new(),
			cross_corpus: Vec::new(),
		}
	}

	pub fn block(&self) -> &Block {
		&self.block
	}

	pub fn tag(&self) -> &Tag {
		&self.tag
	}

	pub fn is_terminal(&self) -> bool {
		self.terminal
	}

	/// Forward relations of the given category.
	pub fn relations(&self, kind: RelationKind) -> &[NodeId] {
		match kind {
			RelationKind::SameCorpus => &self.same_corpus,
			RelationKind::CrossCorpus => &self.cross_corpus,
		}
	}

	pub fn has_relations(&self) -> bool {
		!self.same_corpus.is_empty() || !self.cross_corpus.is_empty()
	}

	/// Records a forward relation toward `target`.
	pub(crate) fn link(&mut self, kind: RelationKind, target: NodeId) {
		match kind {
			RelationKind::SameCorpus => self.same_corpus.push(target),
			RelationKind::CrossCorpus => self.cross_corpus.push(target),
		}
	}
}
