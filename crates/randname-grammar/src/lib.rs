//! Tokenizer, AST and parser for randname naming patterns.
//!
//! A pattern concatenates quantified blocks:
//! - `[bbbb](n,m)` picks characters from the flagged pools
//!   (uppercase, lowercase, digit, underscore)
//! - `{...}(n,m)` repeats a nested pattern as a unit
//! - `<text>` is copied verbatim
pub mod ast;
pub mod parser;
pub mod tokenizer;

#[cfg(test)]
mod parser_tests;

pub use ast::*;
pub use parser::{ParseError, ParseErrorKind, parse_pattern};
pub use tokenizer::{TokenizeError, TokenizeErrorKind};
