use std::fmt;
use std::sync::Arc;

/// A case-folded unit of text produced by the tokenizer.
pub type Token = String;

/// Number of consecutive tokens in a block.
pub const BLOCK_SIZE: usize = 3;

/// Number of tokens two chained blocks share.
pub const OVERLAP_SIZE: usize = BLOCK_SIZE - 1;

/// Token ending a sentence.
pub const TERMINATOR: &str = ".";

/// A fixed-width window of consecutive tokens taken from one corpus.
///
/// Blocks chain into each other when the [`suffix`](Block::suffix) of one
/// equals the [`prefix`](Block::prefix) of the next.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Block([Token; BLOCK_SIZE]);

/// The first or last `OVERLAP_SIZE` tokens of a block.
///
/// Prefixes and suffixes share this type so that "suffix of A equals
/// prefix of B" is plain equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Overlap([Token; OVERLAP_SIZE]);

impl Block {
	/// Builds a block from the first `BLOCK_SIZE` tokens of `window`.
	///
	/// Returns `None` if `window` is too short.
	pub fn from_window(window: &[Token]) -> Option<Self> {
		if window.len() < BLOCK_SIZE {
			return None;
		}
		Some(Self(std::array::from_fn(|i| window[i].clone())))
	}

	pub fn tokens(&self) -> &[Token; BLOCK_SIZE] {
		&self.0
	}

	pub fn first(&self) -> &Token {
		&self.0[0]
	}

	pub fn prefix(&self) -> Overlap {
		Overlap(std::array::from_fn(|i| self.0[i].clone()))
	}

	pub fn suffix(&self) -> Overlap {
		Overlap(std::array::from_fn(|i| self.0[i + 1].clone()))
	}

	/// The block closes a sentence.
	pub fn is_terminal(&self) -> bool {
		self.0[BLOCK_SIZE - 1] == TERMINATOR
	}

	/// The block opens right after a sentence terminator.
	pub fn starts_sentence(&self) -> bool {
		self.0[0] == TERMINATOR
	}

	/// Tokens flushed when a walk stops on this block (all but the last).
	pub fn head(&self) -> &[Token] {
		&self.0[..OVERLAP_SIZE]
	}
}

impl Overlap {
	pub fn tokens(&self) -> &[Token; OVERLAP_SIZE] {
		&self.0
	}
}

impl fmt::Display for Block {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[{}]", self.0.join(" "))
	}
}

/// Every full sliding window of `tokens`, in order.
///
/// A stream shorter than `BLOCK_SIZE` yields nothing; the trailing tokens
/// that cannot fill a window are only covered by earlier windows.
pub fn windows(tokens: &[Token]) -> impl Iterator<Item = Block> + '_ {
	tokens.windows(BLOCK_SIZE).filter_map(Block::from_window)
}

/// Opaque identifier of the corpus a block came from.
///
/// Only compared for equality. Cloning is cheap so every node can carry
/// its own copy.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(Arc<str>);

impl Tag {
	pub fn new(name: &str) -> Self {
		Self(Arc::from(name))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&str> for Tag {
	fn from(name: &str) -> Self {
		Self::new(name)
	}
}

impl fmt::Display for Tag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tokens(text: &str) -> Vec<Token> {
		text.split_whitespace().map(str::to_owned).collect()
	}

	#[test]
	fn prefix_and_suffix_overlap() {
		let block = Block::from_window(&tokens("cat sat .")).unwrap();
		assert_eq!(block.prefix().tokens(), &["cat".to_owned(), "sat".to_owned()]);
		assert_eq!(block.suffix().tokens(), &["sat".to_owned(), ".".to_owned()]);
		assert!(block.is_terminal());
		assert!(!block.starts_sentence());
		assert_eq!(block.head(), &["cat".to_owned(), "sat".to_owned()][..]);
		assert_eq!(block.to_string(), "[cat sat .]");

		let next = Block::from_window(&tokens("sat . the")).unwrap();
		assert_eq!(block.suffix(), next.prefix());
	}

	#[test]
	fn windows_slide_one_token_at_a_time() {
		let stream = tokens("a b c d e");
		let blocks: Vec<String> = windows(&stream).map(|b| b.to_string()).collect();
		assert_eq!(blocks, vec!["[a b c]", "[b c d]", "[c d e]"]);
	}

	#[test]
	fn short_streams_have_no_windows() {
		assert_eq!(windows(&tokens("")).count(), 0);
		assert_eq!(windows(&tokens("only two")).count(), 0);
		assert!(Block::from_window(&tokens("x y")).is_none());
	}

	#[test]
	fn tags_compare_by_name() {
		assert_eq!(Tag::new("a.txt"), Tag::from("a.txt"));
		assert_ne!(Tag::new("a.txt"), Tag::new("b.txt"));
	}
}
