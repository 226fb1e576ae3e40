//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Normalizer**: Lowercases raw text for case-insensitive counting
//! - **Tokenizer**: Splits text into words on a fixed separator set
//! - **Triplet**: Extracts 3-character windows, optionally letters only

pub mod normalizer;
pub mod tokenizer;
pub mod triplet;

pub use normalizer::TextNormalizer;
pub use tokenizer::{split_into_words, Tokenizer, Words, SEPARATORS};
pub use triplet::{count_triplets, extract_triplets, Triplets};
