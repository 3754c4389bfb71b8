// randname-grammar/src/ast.rs

/// A parsed pattern (or the body of a `{...}` group), shaped the way the
/// quantified items were written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternAst {
    /// A lone block written without a quantifier, e.g. `[0100]` or `{...}`.
    Bare(Block),

    /// Exactly one block together with its quantifier, e.g. `[0100](3,9)`.
    Single(QuantifiedBlock),

    /// Two or more quantified blocks concatenated left to right.
    Sequence(Vec<QuantifiedBlock>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantifiedBlock {
    pub block: Block,
    pub quantifier: Quantifier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    /// Span of the whole block including its delimiters.
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// `<text>`
    Literal { text: String },

    /// `[bbbb]`; `flags` holds the raw contents, unvalidated.
    Class { flags: String },

    /// `{...}`
    Group { body: Box<PatternAst> },
}

/// A `(n)` or `(n,m)` suffix.
///
/// Literal blocks always carry an implicit `(1)` quantifier that does not
/// appear in the source; for those `implicit` is set and `span` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantifier {
    pub min: u32,
    pub max: Option<u32>,
    pub span: Span,
    pub implicit: bool,
}

impl Quantifier {
    pub fn implicit_at(offset: usize) -> Self {
        Self {
            min: 1,
            max: None,
            span: Span::new(offset, offset),
            implicit: true,
        }
    }

    /// `(n)` is shorthand for `(n,n)`.
    pub fn bounds(&self) -> (u32, u32) {
        (self.min, self.max.unwrap_or(self.min))
    }
}

/// Byte span in the original pattern string.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: usize, // inclusive
    pub end: usize,   // exclusive
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn join(a: Span, b: Span) -> Span {
        Span {
            start: a.start.min(b.start),
            end: a.end.max(b.end),
        }
    }
}
