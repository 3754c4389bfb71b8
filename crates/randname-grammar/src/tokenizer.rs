// randname-grammar/src/tokenizer.rs

use std::fmt;

/// Token kinds produced by the pattern tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // Structural single-char tokens
    LBrace, // '{'
    RBrace, // '}'
    LParen, // '('
    RParen, // ')'
    Comma,  // ','

    // Value tokens
    /// A `<...>` literal block. The value is the text between the angle brackets.
    Literal(String),

    /// A `[...]` character-class block. The value is the raw text between the
    /// square brackets; flag validation happens when the block is resolved.
    Flags(String),

    /// A run of ASCII digits inside a quantifier.
    Number(String),
}

/// Token with span information (byte offsets in the original input).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken {
    pub token: Token,
    pub start: usize, // inclusive
    pub end: usize,   // exclusive
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizeErrorKind {
    UnterminatedLiteral,
    UnterminatedClass,
    UnmatchedRAngle,
    UnmatchedRBracket,
    UnmatchedRParen,
    ReservedCharInLiteral(char),
    UnexpectedChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizeError {
    pub kind: TokenizeErrorKind,
    pub at: usize, // byte offset
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TokenizeErrorKind::*;
        match self.kind {
            UnterminatedLiteral => write!(f, "unterminated '<' literal at byte {}", self.at),
            UnterminatedClass => write!(f, "unterminated '[' class at byte {}", self.at),
            UnmatchedRAngle => write!(f, "unmatched '>' at byte {}", self.at),
            UnmatchedRBracket => write!(f, "unmatched ']' at byte {}", self.at),
            UnmatchedRParen => write!(f, "unmatched ')' at byte {}", self.at),
            ReservedCharInLiteral(c) => {
                write!(f, "{:?} is not allowed inside a literal (byte {})", c, self.at)
            }
            UnexpectedChar(c) => write!(f, "unexpected character {:?} at byte {}", c, self.at),
        }
    }
}

impl std::error::Error for TokenizeError {}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Mode {
    Blocks,
    Quantifier,
}

/// Tokenizer for a naming pattern such as `{[1000](1)[0100](3,9)}(2,3)<Activity>`.
///
/// Key behaviors:
/// - Between blocks:
///   - `{` / `}` => LBrace / RBrace (nesting is checked by the parser)
///   - `<...>` => Literal, taken verbatim up to the first `>`; `<`, `>`, `{` and `}`
///     may not appear inside
///   - `[...]` => Flags, raw contents
///   - `(` => LParen (switch to quantifier mode)
/// - Inside a quantifier:
///   - digits => Number
///   - `,` => Comma
///   - `)` => RParen (switch back)
///
/// Whitespace is not skipped anywhere; a pattern is a single unbroken token run.
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize, // byte offset
    mode: Mode,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            mode: Mode::Blocks,
        }
    }

    pub fn tokenize_all(mut self) -> Result<Vec<SpannedToken>, TokenizeError> {
        let mut out = Vec::new();
        while let Some(tok) = self.next_token()? {
            out.push(tok);
        }
        Ok(out)
    }

    /// Returns next spanned token, or Ok(None) at end-of-input.
    pub fn next_token(&mut self) -> Result<Option<SpannedToken>, TokenizeError> {
        let Some(ch) = self.peek_char() else {
            return Ok(None);
        };

        match self.mode {
            Mode::Blocks => self.next_block(ch).map(Some),
            Mode::Quantifier => self.next_quantifier(ch).map(Some),
        }
    }

    fn next_block(&mut self, ch: char) -> Result<SpannedToken, TokenizeError> {
        let start = self.pos;

        let single = match ch {
            '{' => Some(Token::LBrace),
            '}' => Some(Token::RBrace),
            '(' => Some(Token::LParen),
            _ => None,
        };

        if let Some(tok) = single {
            self.pos += 1;
            if matches!(tok, Token::LParen) {
                self.mode = Mode::Quantifier;
            }
            return Ok(self.spanned(tok, start));
        }

        match ch {
            '<' => {
                let text = self.read_delimited('>', TokenizeErrorKind::UnterminatedLiteral, |c| {
                    matches!(c, '<' | '{' | '}')
                        .then_some(TokenizeErrorKind::ReservedCharInLiteral(c))
                })?;
                Ok(self.spanned(Token::Literal(text), start))
            }
            '[' => {
                let raw = self.read_delimited(']', TokenizeErrorKind::UnterminatedClass, |c| {
                    (c == '[').then_some(TokenizeErrorKind::UnexpectedChar(c))
                })?;
                Ok(self.spanned(Token::Flags(raw), start))
            }
            '>' => Err(self.error(TokenizeErrorKind::UnmatchedRAngle)),
            ']' => Err(self.error(TokenizeErrorKind::UnmatchedRBracket)),
            ')' => Err(self.error(TokenizeErrorKind::UnmatchedRParen)),
            other => Err(self.error(TokenizeErrorKind::UnexpectedChar(other))),
        }
    }

    fn next_quantifier(&mut self, ch: char) -> Result<SpannedToken, TokenizeError> {
        let start = self.pos;

        match ch {
            ',' => {
                self.pos += 1;
                Ok(self.spanned(Token::Comma, start))
            }
            ')' => {
                self.pos += 1;
                self.mode = Mode::Blocks;
                Ok(self.spanned(Token::RParen, start))
            }
            c if c.is_ascii_digit() => {
                let end = self.scan_while(|b| b.is_ascii_digit());
                let num = self.input[start..end].to_string();
                self.pos = end;
                Ok(self.spanned(Token::Number(num), start))
            }
            other => Err(self.error(TokenizeErrorKind::UnexpectedChar(other))),
        }
    }

    /// Reads from an opening delimiter up to and including `close`, returning
    /// the text in between. `reject` may veto characters found inside.
    fn read_delimited<F>(
        &mut self,
        close: char,
        unterminated: TokenizeErrorKind,
        reject: F,
    ) -> Result<String, TokenizeError>
    where
        F: Fn(char) -> Option<TokenizeErrorKind>,
    {
        let start = self.pos;
        self.pos += 1; // opening delimiter

        let body_start = self.pos;
        while let Some(ch) = self.peek_char() {
            if ch == close {
                let body = self.input[body_start..self.pos].to_string();
                self.pos += 1;
                return Ok(body);
            }
            if let Some(kind) = reject(ch) {
                return Err(self.error(kind));
            }
            self.pos += ch.len_utf8();
        }

        Err(TokenizeError {
            kind: unterminated,
            at: start,
        })
    }

    fn scan_while<F>(&self, mut pred: F) -> usize
    where
        F: FnMut(u8) -> bool,
    {
        let mut i = self.pos;
        while i < self.input.len() {
            let b = self.input.as_bytes()[i];
            if !pred(b) {
                break;
            }
            i += 1;
        }
        i
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn spanned(&self, token: Token, start: usize) -> SpannedToken {
        SpannedToken {
            token,
            start,
            end: self.pos,
        }
    }

    fn error(&self, kind: TokenizeErrorKind) -> TokenizeError {
        TokenizeError { kind, at: self.pos }
    }
}
