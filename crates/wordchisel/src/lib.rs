//! # `wordchisel` Subword Tokenizer Engine
//!
//! A config-driven subword tokenizer: it reads a `tokenizer.json` style
//! definition (plus optional `tokenizer_config.json` settings), and runs the
//! normalize => pre-tokenize => model => post-process pipeline to encode text;
//! and the decoder pipeline to turn ids back into text.
//!
//! See:
//! * [`tokenizer`] for the [`Tokenizer`] orchestrator and batch encoding.
//! * [`models`] for the WordPiece, BPE and Unigram subword models.
//! * [`normalizers`], [`pre_tokenizers`], [`processors`] and [`decoders`]
//!   for the pipeline components.
//! * [`vocab`] for the token/id tables and added-token splitting.
//! * [`config`] for the JSON configuration surface.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//! * ``rayon``
//!
//! #### feature: ``ahash``
//!
//! This swaps all HashMap/HashSet implementations for ``ahash``; which is a performance
//! win on many/(most?) modern CPUs.
//!
//! This is done by the ``types::WCHash{*}`` type alias machinery.
//!
//! #### feature: ``foldhash``
//!
//! This swaps all HashMap/HashSet implementations for ``foldhash``.
//! If both "ahash" and "foldhash" are enabled, then "ahash" will win.
//!
//! #### feature: ``rayon``
//!
//! This enables parallel batch encode / decode using the ``rayon`` crate.
//!
//! #### feature: ``tracing``
//!
//! This enables a number of ``tracing`` instrumentation points.
//! This is only useful for timing tracing of the library itself.
//!
//! ## Loading a Tokenizer
//!
//! ```rust,ignore
//! use wordchisel::Tokenizer;
//! use wordchisel::tokenizer::{DecodeOptions, EncodeOptions, Padding};
//!
//! let tokenizer: Tokenizer<u32> =
//!     Tokenizer::from_files("tokenizer.json", Some("tokenizer_config.json"))?;
//!
//! let ids = tokenizer.encode("Hello world!", None, true)?;
//! let text = tokenizer.decode(&ids, &DecodeOptions::default())?;
//!
//! let batch = tokenizer.encode_batch(
//!     &["Hello world!", "Hi"],
//!     None,
//!     &EncodeOptions::default().with_padding(Padding::Longest),
//! )?;
//! let tensor = batch.into_tensor()?;
//! ```
#![warn(missing_docs, unused)]

pub mod config;
pub mod decoders;
pub mod errors;
pub mod models;
pub mod normalizers;
pub mod pre_tokenizers;
pub mod processors;
pub mod regex;
pub mod tokenizer;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use errors::{WCResult, WordchiselError};
#[doc(inline)]
pub use tokenizer::Tokenizer;
#[doc(inline)]
pub use types::TokenType;
