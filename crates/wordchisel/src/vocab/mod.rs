//! # Vocabulary
//!
//! * [`TokenVocab`] - the bidirectional token/id table.
//! * [`AddedToken`] / [`AddedTokenSplitter`] - tokens registered outside the
//!   base vocabulary, and the boundary splitter that isolates them in text.
//! * [`ByteTable`] - the byte-level byte/char bijection.

pub mod added_tokens;
pub mod byte_table;
pub mod token_vocab;

#[doc(inline)]
pub use added_tokens::{AddedToken, AddedTokenSplitter, TextSection};
#[doc(inline)]
pub use byte_table::ByteTable;
#[doc(inline)]
pub use token_vocab::TokenVocab;
