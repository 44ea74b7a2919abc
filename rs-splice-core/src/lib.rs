//! Two-corpus text splicing library.
//!
//! Corpora are cut into overlapping windows of consecutive tokens, linked
//! wherever one window continues another, then a biased random walk over
//! these links produces text that jumps between corpora whenever it can.
//!
//! This crate provides:
//! - A composable tokenizer for raw corpus text
//! - The block-overlap graph index shared by all corpora
//! - Random walk generation with explicit, seedable randomness
//! - Rendering of generated tokens back to a line of text

/// Error taxonomy shared by tokenizing, indexing and walking.
pub mod error;

/// Corpus file loading.
pub mod io;

/// Graph index and walk generation.
pub mod model;

/// Token stream back to text.
pub mod render;

/// Character scanner producing token streams.
pub mod tokenizer;

pub use error::{SpliceError, SpliceResult};
pub use model::block::{Block, Overlap, Tag, Token, BLOCK_SIZE, OVERLAP_SIZE, TERMINATOR};
pub use model::generator::{Generator, Preference, Walk, WalkOptions};
pub use model::graph_index::{Corpus, GraphIndex, GraphStats, Relation};
pub use model::node::{Node, NodeId, RelationKind};
