//! # Byte-Pair Encoding Model
//!
//! * [`MergeTable`] - interned symbols and ranked merge rules.
//! * [`merge_word`] - the heap-driven merge loop over one word.
//! * [`WordCache`] - a shared per-word memo of merge results.
//! * [`BpeModel`] - the model; vocabulary mapping, suffixes and fallbacks.

pub mod bpe_model;
pub mod merge_heap;
pub mod merge_table;
pub mod word_cache;

#[doc(inline)]
pub use bpe_model::BpeModel;
#[doc(inline)]
pub use merge_heap::merge_word;
#[doc(inline)]
pub use merge_table::{MergeRule, MergeTable};
#[doc(inline)]
pub use word_cache::WordCache;
