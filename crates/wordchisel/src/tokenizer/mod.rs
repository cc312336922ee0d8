//! # Tokenizer Orchestration
//!
//! [`Tokenizer`] composes the component pipeline into `encode`/`decode`
//! and batch encoding with padding and truncation.

mod encode_options;
mod encoding;
mod tokenizer_impl;

#[doc(inline)]
pub use encode_options::*;
#[doc(inline)]
pub use encoding::*;
#[doc(inline)]
pub use tokenizer_impl::*;
