//! Conformance checks: does a name fit a compiled pattern?

use regex::Regex;

use crate::error::Error;
use crate::tree::{CharPool, Element, PatternNode, PatternTree, Range};

/// An anchored regex accepting exactly the names a [`PatternTree`] can produce.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
}

impl Matcher {
    pub fn new(tree: &PatternTree) -> Result<Self, Error> {
        let source = to_regex_source(tree)?;
        // Large repeat counts can blow past the regex size limit.
        let regex = Regex::new(&source)?;
        Ok(Self { regex })
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Renders `tree` as regex source, e.g. `^(?:[A-Z][a-z]{6,12}){2,3}$` for
/// `{[1000](1)[0100](6,12)}(2,3)`.
pub fn to_regex_source(tree: &PatternTree) -> Result<String, Error> {
    let mut pat = String::from("^");
    for node in tree.nodes() {
        push_node(node, &mut pat)?;
    }
    pat.push('$');
    Ok(pat)
}

fn push_node(node: &PatternNode, pat: &mut String) -> Result<(), Error> {
    match node.element() {
        Element::Literal(text) => pat.push_str(&regex::escape(text)),
        Element::Class(class) => {
            pat.push('[');
            for pool in class.pools() {
                pat.push_str(match pool {
                    CharPool::Upper => "A-Z",
                    CharPool::Lower => "a-z",
                    CharPool::Digit => "0-9",
                    CharPool::Underscore => "_",
                });
            }
            pat.push(']');
            push_repeat(node.range(), pat)?;
        }
        Element::SingleChild(child) => {
            pat.push_str("(?:");
            push_node(child, pat)?;
            pat.push(')');
            push_repeat(node.range(), pat)?;
        }
        Element::Group(children) => {
            pat.push_str("(?:");
            for child in children {
                push_node(child, pat)?;
            }
            pat.push(')');
            push_repeat(node.range(), pat)?;
        }
    }
    Ok(())
}

fn push_repeat(range: Range, pat: &mut String) -> Result<(), Error> {
    range.check()?;
    if range.is_fixed() {
        if range.min() != 1 {
            pat.push_str(&format!("{{{}}}", range.min()));
        }
    } else {
        pat.push_str(&format!("{{{},{}}}", range.min(), range.max()));
    }
    Ok(())
}
