//! Document input: splitting documents into front matter and body

pub mod tokenizer;

pub use tokenizer::{FrontMatterFormat, GrayMatterTokenizer, Tokenized, Tokenizer};
