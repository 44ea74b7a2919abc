use std::collections::{BTreeSet, HashMap};

use log::{debug, info, warn};
use serde::Serialize;

use crate::error::SpliceResult;
use crate::tokenizer::tokenize;

use super::block::{windows, Block, Overlap, Tag, Token};
use super::node::{Node, NodeId, RelationKind};

/// A raw corpus waiting to be indexed.
#[derive(Clone, Debug)]
pub struct Corpus {
	pub tag: Tag,
	pub text: String,
}

impl Corpus {
	pub fn new(tag: impl Into<Tag>, text: impl Into<String>) -> Self {
		Self { tag: tag.into(), text: text.into() }
	}
}

/// A forward relation `from -> to`, as listed on `from`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Relation {
	pub from: NodeId,
	pub to: NodeId,
	pub kind: RelationKind,
}

/// Summary counters of a built index.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct GraphStats {
	pub nodes: usize,
	pub starts: usize,
	pub same_corpus_relations: usize,
	pub cross_corpus_relations: usize,
	pub tags: Vec<String>,
}

/// Overlap graph linking the blocks of one or more corpora.
///
/// The index owns every [`Node`]; relation lists and lookup tables only
/// hold [`NodeId`]s into the node arena.
///
/// # Responsibilities
/// - Slice token streams into blocks and register them (`insert`)
/// - Link every pair of blocks where the suffix of one is the prefix of the other
/// - Decide which nodes may open a walk
///
/// # Invariants
/// - A relation `a -> b` exists iff `a.suffix() == b.prefix()`
/// - Identical blocks are distinct nodes, linked independently
/// - Nodes are only ever appended; the start status of a node is decided
///   once, when it is added
#[derive(Debug, Default)]
pub struct GraphIndex {
	nodes: Vec<Node>,
	by_block: HashMap<Block, Vec<NodeId>>,
	by_prefix: HashMap<Overlap, Vec<NodeId>>,
	by_suffix: HashMap<Overlap, Vec<NodeId>>,
	starts: Vec<NodeId>,
}

impl GraphIndex {
	pub fn new() -> Self {
		Self::default()
	}

	/// Tokenizes every corpus, then indexes them in order.
	///
	/// All corpora are tokenized before the first insertion, so a bad corpus
	/// never leaves a partially built index behind.
	///
	/// # Errors
	/// Returns [`SpliceError::Corpus`](crate::error::SpliceError::Corpus)
	/// naming the first corpus that failed to tokenize.
	pub fn build<'a, I>(corpora: I) -> SpliceResult<Self>
	where
		I: IntoIterator<Item = &'a Corpus>,
	{
		let tokenized = corpora
			.into_iter()
			.map(|corpus| {
				tokenize(&corpus.text)
					.map(|tokens| (corpus.tag.clone(), tokens))
					.map_err(|e| e.in_corpus(corpus.tag.as_str()))
			})
			.collect::<SpliceResult<Vec<_>>>()?;

		let mut index = Self::new();
		for (tag, tokens) in &tokenized {
			index.insert(tag, tokens);
		}

		let stats = index.stats();
		info!(
			"index built: {} nodes, {} starts, {} same-corpus and {} cross-corpus relations",
			stats.nodes, stats.starts, stats.same_corpus_relations, stats.cross_corpus_relations
		);
		Ok(index)
	}

	/// Adds every full window of `tokens` as a node tagged `tag`.
	///
	/// Returns the number of nodes added. Streams shorter than a block add
	/// nothing.
	pub fn insert(&mut self, tag: &Tag, tokens: &[Token]) -> usize {
		let before = self.nodes.len();
		for block in windows(tokens) {
			self.add_node(Node::new(block, tag.clone()));
		}

		let added = self.nodes.len() - before;
		if added == 0 {
			warn!("corpus `{tag}` has {} tokens, too few to form a block", tokens.len());
		} else {
			debug!("corpus `{tag}`: {} tokens, {added} blocks", tokens.len());
		}
		added
	}

	/// Registers `node` and links it with every overlapping node.
	///
	/// Relations are filed on their source node, as same-corpus or
	/// cross-corpus depending on the tags of both endpoints. The node becomes
	/// a start node when no same-corpus predecessor exists, or when one of
	/// them opens right after a sentence terminator.
	pub fn add_node(&mut self, node: Node) -> NodeId {
		let id = NodeId(self.nodes.len());
		let prefix = node.block().prefix();
		let suffix = node.block().suffix();

		self.by_block.entry(node.block().clone()).or_default().push(id);
		self.by_prefix.entry(prefix.clone()).or_default().push(id);
		self.by_suffix.entry(suffix.clone()).or_default().push(id);
		self.nodes.push(node);

		let mut has_same_corpus_predecessor = false;
		let mut predecessor_starts_sentence = false;

		// May include the node itself when its prefix equals its suffix
		let predecessors = self.by_suffix.get(&prefix).cloned().unwrap_or_default();
		for pred in predecessors {
			let kind = RelationKind::between(self.nodes[pred.0].tag(), self.nodes[id.0].tag());
			self.nodes[pred.0].link(kind, id);

			if kind == RelationKind::SameCorpus {
				has_same_corpus_predecessor = true;
				if self.nodes[pred.0].block().starts_sentence() {
					predecessor_starts_sentence = true;
				}
			}
		}

		// A self-overlapping node links to itself a second time here
		let successors = self.by_prefix.get(&suffix).cloned().unwrap_or_default();
		for succ in successors {
			let kind = RelationKind::between(self.nodes[id.0].tag(), self.nodes[succ.0].tag());
			self.nodes[id.0].link(kind, succ);
		}

		if !has_same_corpus_predecessor || predecessor_starts_sentence {
			self.starts.push(id);
		}

		id
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.nodes.get(id.0)
	}

	pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
		self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
	}

	/// Nodes a walk may start from, in insertion order.
	pub fn starts(&self) -> &[NodeId] {
		&self.starts
	}

	pub fn with_block(&self, block: &Block) -> &[NodeId] {
		self.by_block.get(block).map(Vec::as_slice).unwrap_or(&[])
	}

	pub fn with_prefix(&self, prefix: &Overlap) -> &[NodeId] {
		self.by_prefix.get(prefix).map(Vec::as_slice).unwrap_or(&[])
	}

	pub fn with_suffix(&self, suffix: &Overlap) -> &[NodeId] {
		self.by_suffix.get(suffix).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Every recorded relation, grouped by source node.
	pub fn relations(&self) -> impl Iterator<Item = Relation> + '_ {
		self.nodes().flat_map(|(from, node)| {
			[RelationKind::SameCorpus, RelationKind::CrossCorpus]
				.into_iter()
				.flat_map(move |kind| {
					node.relations(kind).iter().map(move |&to| Relation { from, to, kind })
				})
		})
	}

	pub fn stats(&self) -> GraphStats {
		let (mut same, mut cross) = (0, 0);
		for relation in self.relations() {
			match relation.kind {
				RelationKind::SameCorpus => same += 1,
				RelationKind::CrossCorpus => cross += 1,
			}
		}
		let tags: BTreeSet<&str> = self.nodes.iter().map(|n| n.tag().as_str()).collect();

		GraphStats {
			nodes: self.nodes.len(),
			starts: self.starts.len(),
			same_corpus_relations: same,
			cross_corpus_relations: cross,
			tags: tags.into_iter().map(str::to_owned).collect(),
		}
	}
}
