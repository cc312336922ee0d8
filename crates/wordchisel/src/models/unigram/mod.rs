//! # Unigram Model
//!
//! Max-score segmentation: candidate pieces come from a [`CharTrie`]
//! common-prefix search at each char position, and a [`TokenLattice`]
//! keeps the best-scoring path to every position.

pub mod char_trie;
pub mod token_lattice;
pub mod unigram_model;

#[doc(inline)]
pub use char_trie::CharTrie;
#[doc(inline)]
pub use token_lattice::TokenLattice;
#[doc(inline)]
pub use unigram_model::UnigramModel;
