//! Overlap graph of token blocks and the random walk over it.
//!
//! - Fixed-width blocks and their prefix/suffix keys (`block`)
//! - Graph nodes and relation categories (`node`)
//! - The index linking overlapping blocks (`GraphIndex`)
//! - Biased random walk generation (`Generator`)

/// Blocks, overlaps, tags and sliding windows.
pub mod block;

/// Nodes of the overlap graph.
///
/// A node carries one block, its corpus tag and its forward relations,
/// split by whether they stay in the corpus or cross into another one.
pub mod node;

/// The overlap graph itself.
///
/// Owns all nodes, links them at insertion time and tracks start nodes.
pub mod graph_index;

/// Random walk over a built index.
pub mod generator;
