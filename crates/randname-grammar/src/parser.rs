// randname-grammar/src/parser.rs

use std::fmt;

use crate::ast::*;
use crate::tokenizer::{SpannedToken, Token, TokenizeError, Tokenizer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    TokenizeFailed,
    UnexpectedEof,
    UnexpectedToken,
    ExpectedToken(&'static str),
    EmptyPattern,
    EmptyGroup,
    InvalidNumber,
    /// A second `{...}` block at the same nesting level.
    MultipleGroups,
    /// An odd number (> 1) of blocks and quantifiers at one level.
    OddItemCount(usize),
    /// A block was followed by another block where its quantifier belongs.
    ExpectedQuantifier,
    /// A quantifier appeared where a block belongs.
    ExpectedBlock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub at: usize,          // byte offset
    pub span: Option<Span>, // token span if available
    pub message: String,
    pub source_tokenize: Option<String>,
}

impl ParseError {
    fn new(
        kind: ParseErrorKind,
        at: usize,
        span: Option<Span>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            at,
            span,
            message: message.into(),
            source_tokenize: None,
        }
    }

    fn from_tokenize(err: TokenizeError) -> Self {
        Self {
            kind: ParseErrorKind::TokenizeFailed,
            at: err.at,
            span: Some(Span::new(err.at, err.at + 1)),
            message: format!("{}", err),
            source_tokenize: Some(format!("{:?}", err.kind)),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == ParseErrorKind::TokenizeFailed {
            // The tokenizer message already names its byte offset.
            return f.write_str(&self.message);
        }
        write!(f, "{} (at byte {})", self.message, self.at)
    }
}

impl std::error::Error for ParseError {}

/// Parse a whole naming pattern, e.g. `{[1000](1)[0100](3,9)}(2,3)`.
pub fn parse_pattern(input: &str) -> Result<PatternAst, ParseError> {
    let tokens = Tokenizer::new(input)
        .tokenize_all()
        .map_err(ParseError::from_tokenize)?;

    let mut c = Cursor::new(&tokens);

    let items = parse_items(&mut c)?;

    // parse_items only stops early on a '}' with no group open.
    if let Some(t) = c.peek() {
        return Err(ParseError::new(
            ParseErrorKind::UnexpectedToken,
            t.start,
            Some(Span::new(t.start, t.end)),
            "unmatched '}'",
        ));
    }

    shape(
        items,
        Span::new(0, input.len()),
        ParseErrorKind::EmptyPattern,
    )
}

/// One entry of the flat block/quantifier run at a single nesting level.
#[derive(Debug)]
enum Item {
    Block(Block),
    Quantifier(Quantifier),
}

/// Collects blocks and quantifiers in source order until end of input or a
/// closing '}' (left for the caller).
fn parse_items(c: &mut Cursor<'_>) -> Result<Vec<Item>, ParseError> {
    let mut items: Vec<Item> = Vec::new();
    let mut group: Option<Span> = None;

    while let Some(t) = c.peek() {
        let span = Span::new(t.start, t.end);

        match &t.token {
            Token::RBrace => break,
            Token::Literal(text) => {
                c.bump();
                items.push(Item::Block(Block {
                    kind: BlockKind::Literal { text: text.clone() },
                    span,
                }));
                // A literal never takes a written quantifier.
                items.push(Item::Quantifier(Quantifier::implicit_at(span.end)));
            }
            Token::Flags(raw) => {
                c.bump();
                items.push(Item::Block(Block {
                    kind: BlockKind::Class { flags: raw.clone() },
                    span,
                }));
            }
            Token::LBrace => {
                let block = parse_group(c)?;
                if let Some(first) = group {
                    return Err(ParseError::new(
                        ParseErrorKind::MultipleGroups,
                        block.span.start,
                        Some(block.span),
                        format!(
                            "only one '{{...}}' group is allowed per level; \
                             another group already starts at byte {}",
                            first.start
                        ),
                    ));
                }
                group = Some(block.span);
                items.push(Item::Block(block));
            }
            Token::LParen => {
                items.push(Item::Quantifier(parse_quantifier(c)?));
            }
            other => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedToken,
                    t.start,
                    Some(span),
                    format!("unexpected token {:?}", other),
                ));
            }
        }
    }

    Ok(items)
}

fn parse_group(c: &mut Cursor<'_>) -> Result<Block, ParseError> {
    let lbrace = c.expect_token("'{'", |t| matches!(t, Token::LBrace))?;
    let lspan = Span::new(lbrace.start, lbrace.end);

    let items = parse_items(c)?;

    if c.is_eof() {
        return Err(ParseError::new(
            ParseErrorKind::UnexpectedEof,
            lbrace.start,
            Some(lspan),
            "unclosed '{'",
        ));
    }
    let rbrace = c.expect_token("'}'", |t| matches!(t, Token::RBrace))?;
    let rspan = Span::new(rbrace.start, rbrace.end);

    let body = shape(
        items,
        Span::new(lspan.end, rspan.start),
        ParseErrorKind::EmptyGroup,
    )?;

    Ok(Block {
        kind: BlockKind::Group {
            body: Box::new(body),
        },
        span: Span::join(lspan, rspan),
    })
}

fn parse_quantifier(c: &mut Cursor<'_>) -> Result<Quantifier, ParseError> {
    let lp = c.expect_token("'('", |t| matches!(t, Token::LParen))?;
    let mut span = Span::new(lp.start, lp.end);

    let min = parse_count(c, span)?;
    let mut max = None;

    if c.peek()
        .map(|t| matches!(t.token, Token::Comma))
        .unwrap_or(false)
    {
        c.bump();
        max = Some(parse_count(c, span)?);
    }

    let rp = c.expect_token("')'", |t| matches!(t, Token::RParen))?;
    span = Span::join(span, Span::new(rp.start, rp.end));

    Ok(Quantifier {
        min,
        max,
        span,
        implicit: false,
    })
}

fn parse_count(c: &mut Cursor<'_>, open: Span) -> Result<u32, ParseError> {
    let t = c.peek().ok_or_else(|| {
        ParseError::new(
            ParseErrorKind::UnexpectedEof,
            open.start,
            Some(open),
            "unclosed quantifier",
        )
    })?;
    let sp = Span::new(t.start, t.end);

    match &t.token {
        Token::Number(s) => {
            c.bump();
            s.parse::<u32>().map_err(|_| {
                ParseError::new(
                    ParseErrorKind::InvalidNumber,
                    t.start,
                    Some(sp),
                    format!("repeat count {} is too large", s),
                )
            })
        }
        other => Err(ParseError::new(
            ParseErrorKind::ExpectedToken("NUMBER"),
            t.start,
            Some(sp),
            format!("expected a repeat count, got {:?}", other),
        )),
    }
}

/// Interprets the item run of one level:
/// - 1 item: an unquantified block
/// - 2 items: block + quantifier
/// - even count: (block, quantifier) pairs in order
/// - odd count: malformed
fn shape(
    items: Vec<Item>,
    span: Span,
    empty: ParseErrorKind,
) -> Result<PatternAst, ParseError> {
    let n = items.len();

    if n == 0 {
        let message = match empty {
            ParseErrorKind::EmptyGroup => "empty group '{}' is not allowed",
            _ => "empty pattern",
        };
        return Err(ParseError::new(empty, span.start, Some(span), message));
    }

    if n == 1 {
        let mut items = items;
        return match items.pop() {
            Some(Item::Block(block)) => Ok(PatternAst::Bare(block)),
            Some(Item::Quantifier(q)) => Err(expected_block(q.span)),
            None => Err(ParseError::new(empty, span.start, Some(span), "empty pattern")),
        };
    }

    if n % 2 == 1 {
        return Err(ParseError::new(
            ParseErrorKind::OddItemCount(n),
            span.start,
            Some(span),
            format!(
                "malformed pattern: {} blocks and quantifiers do not pair up",
                n
            ),
        ));
    }

    let mut nodes = Vec::with_capacity(n / 2);
    let mut it = items.into_iter();
    while let (Some(first), Some(second)) = (it.next(), it.next()) {
        match (first, second) {
            (Item::Block(block), Item::Quantifier(quantifier)) => {
                nodes.push(QuantifiedBlock { block, quantifier });
            }
            (Item::Block(_), Item::Block(b)) => {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedQuantifier,
                    b.span.start,
                    Some(b.span),
                    "expected a quantifier before this block",
                ));
            }
            (Item::Quantifier(q), _) => return Err(expected_block(q.span)),
        }
    }

    if nodes.len() == 1 {
        let node = nodes.remove(0);
        Ok(PatternAst::Single(node))
    } else {
        Ok(PatternAst::Sequence(nodes))
    }
}

fn expected_block(span: Span) -> ParseError {
    let message = if span.start == span.end {
        // Implicit quantifier of a literal ended up in block position.
        "quantifier does not apply here (literals cannot be quantified)"
    } else {
        "quantifier is not attached to a '[...]' or '{...}' block"
    };
    ParseError::new(ParseErrorKind::ExpectedBlock, span.start, Some(span), message)
}

/// Simple cursor over spanned tokens.
struct Cursor<'a> {
    toks: &'a [SpannedToken],
    i: usize,
}

impl<'a> Cursor<'a> {
    fn new(toks: &'a [SpannedToken]) -> Self {
        Self { toks, i: 0 }
    }

    fn is_eof(&self) -> bool {
        self.i >= self.toks.len()
    }

    fn peek(&self) -> Option<&'a SpannedToken> {
        self.toks.get(self.i)
    }

    fn bump(&mut self) -> Option<&'a SpannedToken> {
        let t = self.toks.get(self.i);
        if t.is_some() {
            self.i += 1;
        }
        t
    }

    fn expect_token<F>(
        &mut self,
        expected: &'static str,
        pred: F,
    ) -> Result<&'a SpannedToken, ParseError>
    where
        F: Fn(&Token) -> bool,
    {
        let end = self.toks.last().map(|t| t.end).unwrap_or(0);
        let t = self.peek().ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::UnexpectedEof,
                end,
                None,
                format!("expected {}", expected),
            )
        })?;

        if pred(&t.token) {
            self.i += 1;
            Ok(t)
        } else {
            Err(ParseError::new(
                ParseErrorKind::ExpectedToken(expected),
                t.start,
                Some(Span::new(t.start, t.end)),
                format!("expected {}, got {:?}", expected, t.token),
            ))
        }
    }
}
