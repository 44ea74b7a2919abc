use log::{debug, trace};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::{SpliceError, SpliceResult};

use super::block::Token;
use super::graph_index::GraphIndex;
use super::node::{NodeId, RelationKind};

/// Which relation category a walk tries first at each step.
///
/// Whatever the preference, a walk falls back to the other category when
/// the preferred one is empty at the current node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Preference {
	/// Cross into the other corpus at every step where possible.
	#[default]
	PreferCross,
	/// After a cross-corpus hop, prefer staying in the corpus for one step,
	/// and the other way round.
	Alternate,
}

/// Parameters of a single walk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkOptions {
	/// Number of terminal blocks after which the walk stops.
	pub max_sentences: usize,
	pub preference: Preference,
}

impl WalkOptions {
	pub fn new(max_sentences: usize) -> Self {
		Self { max_sentences, preference: Preference::default() }
	}

	pub fn with_preference(mut self, preference: Preference) -> Self {
		self.preference = preference;
		self
	}
}

/// Outcome of a walk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Walk {
	/// Emitted tokens, final partial block included.
	pub tokens: Vec<Token>,
	/// Visited nodes, start first.
	pub path: Vec<NodeId>,
	/// Terminal blocks passed through.
	pub sentences: usize,
	/// Cross-corpus relations taken.
	pub crossings: usize,
}

/// Biased random walk over a built [`GraphIndex`].
///
/// # Behavior
/// - Starts from a uniformly random start node (or a given one).
/// - At each step, emits the first token of the current block, counts a
///   sentence if the block is terminal, then moves along a uniformly random
///   relation of the preferred category.
/// - Stops once `max_sentences` sentences were counted or when the current
///   node has no relation at all, then flushes all but the last token of
///   the current block.
///
/// The generator never mutates the index, so any number of them can walk
/// the same index at once. Randomness comes from the caller.
#[derive(Clone, Copy, Debug)]
pub struct Generator<'a> {
	index: &'a GraphIndex,
	options: WalkOptions,
}

impl<'a> Generator<'a> {
	pub fn new(index: &'a GraphIndex, options: WalkOptions) -> Self {
		Self { index, options }
	}

	/// Walks from a uniformly random start node.
	///
	/// # Errors
	/// Returns [`SpliceError::EmptyGraph`] when the index has no start node.
	pub fn walk<R: Rng + ?Sized>(&self, rng: &mut R) -> SpliceResult<Walk> {
		let start = self.index.starts().choose(rng).copied().ok_or(SpliceError::EmptyGraph)?;
		self.walk_from(start, rng)
	}

	/// Walks from `start`, which does not need to be a start node.
	///
	/// # Errors
	/// Returns [`SpliceError::UnknownNode`] if `start` is not in the index.
	pub fn walk_from<R: Rng + ?Sized>(&self, start: NodeId, rng: &mut R) -> SpliceResult<Walk> {
		let mut node = self.index.node(start).ok_or(SpliceError::UnknownNode(start))?;
		let mut walk = Walk { tokens: Vec::new(), path: vec![start], sentences: 0, crossings: 0 };
		let mut prefer = RelationKind::CrossCorpus;

		while walk.sentences < self.options.max_sentences && node.has_relations() {
			walk.tokens.push(node.block().first().clone());
			if node.is_terminal() {
				walk.sentences += 1;
			}

			let kind = if node.relations(prefer).is_empty() { prefer.other() } else { prefer };
			let Some(&next) = node.relations(kind).choose(rng) else {
				break;
			};
			trace!("{} -> {} ({kind:?})", node.block(), next);

			if kind == RelationKind::CrossCorpus {
				walk.crossings += 1;
			}
			if self.options.preference == Preference::Alternate {
				prefer = kind.other();
			}

			node = self.index.node(next).ok_or(SpliceError::UnknownNode(next))?;
			walk.path.push(next);
		}

		walk.tokens.extend(node.block().head().iter().cloned());

		debug!(
			"walk from {start}: {} steps, {} sentences, {} crossings",
			walk.path.len(),
			walk.sentences,
			walk.crossings
		);
		Ok(walk)
	}
}

impl GraphIndex {
	/// Emits up to `max_sentences` sentences, always preferring to cross
	/// into the other corpus.
	///
	/// # Errors
	/// Returns [`SpliceError::EmptyGraph`] when the index has no start node.
	pub fn generate<R: Rng + ?Sized>(&self, max_sentences: usize, rng: &mut R) -> SpliceResult<Vec<Token>> {
		Generator::new(self, WalkOptions::new(max_sentences)).walk(rng).map(|walk| walk.tokens)
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::model::block::Tag;

	fn tokens(text: &str) -> Vec<Token> {
		text.split_whitespace().map(str::to_owned).collect()
	}

	#[test]
	fn empty_index_cannot_be_walked() {
		let index = GraphIndex::new();
		let mut rng = StdRng::seed_from_u64(1);
		assert!(matches!(index.generate(3, &mut rng), Err(SpliceError::EmptyGraph)));
	}

	#[test]
	fn unknown_start_is_rejected() {
		let index = GraphIndex::new();
		let generator = Generator::new(&index, WalkOptions::new(1));
		let mut rng = StdRng::seed_from_u64(1);
		assert!(matches!(
			generator.walk_from(NodeId(3), &mut rng),
			Err(SpliceError::UnknownNode(NodeId(3)))
		));
	}

	#[test]
	fn zero_sentences_flushes_the_start_block() {
		let mut index = GraphIndex::new();
		index.insert(&Tag::new("a"), &tokens("a b c d ."));
		let mut rng = StdRng::seed_from_u64(7);
		assert_eq!(index.generate(0, &mut rng).unwrap(), tokens("a b"));
	}

	#[test]
	fn linear_corpus_is_replayed_up_to_the_dead_end() {
		let mut index = GraphIndex::new();
		index.insert(&Tag::new("a"), &tokens("a b c d e"));
		let mut rng = StdRng::seed_from_u64(7);

		let walk = Generator::new(&index, WalkOptions::new(5)).walk(&mut rng).unwrap();
		assert_eq!(walk.tokens, tokens("a b c d"));
		assert_eq!(walk.path, vec![NodeId(0), NodeId(1), NodeId(2)]);
		assert_eq!(walk.sentences, 0);
		assert_eq!(walk.crossings, 0);
	}

	#[test]
	fn stops_after_the_requested_sentences() {
		let mut index = GraphIndex::new();
		index.insert(&Tag::new("a"), &tokens("x y . z w . v u ."));
		let mut rng = StdRng::seed_from_u64(11);

		let walk = Generator::new(&index, WalkOptions::new(2)).walk_from(NodeId(0), &mut rng).unwrap();
		assert_eq!(walk.sentences, 2);
		assert_eq!(walk.tokens, tokens("x y . z w ."));
	}

	#[test]
	fn prefers_crossing_corpora() {
		let mut index = GraphIndex::new();
		index.insert(&Tag::new("a"), &tokens("s t u v"));
		index.insert(&Tag::new("b"), &tokens("t u q"));
		let mut rng = StdRng::seed_from_u64(3);

		// [s t u] can continue with [t u v] (a) or [t u q] (b)
		let generator = Generator::new(&index, WalkOptions::new(1));
		for _ in 0..20 {
			let walk = generator.walk_from(NodeId(0), &mut rng).unwrap();
			assert_eq!(walk.tokens, tokens("s t u"));
			assert_eq!(walk.path, vec![NodeId(0), NodeId(2)]);
			assert_eq!(walk.crossings, 1);
		}
	}
}
