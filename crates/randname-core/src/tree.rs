//! Compiled pattern tree.
//!
//! These types represent the *meaning* of a naming pattern,
//! independent of how it was parsed or how names are drawn from it.
//!
//! Compilation produces these structures.
//! Generation and matching consume them.

use crate::error::Error;

/// Inclusive repetition bounds `[min, max]`.
///
/// `min == max` is a fixed count. An inverted range (`min > max`) can be
/// written in pattern text and is kept as written; using it is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    min: u32,
    max: u32,
}

impl Range {
    /// The implicit `(1)` of unquantified blocks and literals.
    pub const ONCE: Range = Range { min: 1, max: 1 };

    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub const fn fixed(n: u32) -> Self {
        Self { min: n, max: n }
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_fixed(&self) -> bool {
        self.min == self.max
    }

    pub fn check(&self) -> Result<(), Error> {
        if self.min > self.max {
            return Err(Error::Configuration {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// One of the four fixed character pools, in `[bbbb]` flag order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CharPool {
    Upper,
    Lower,
    Digit,
    Underscore,
}

impl CharPool {
    pub const ALL: [CharPool; 4] = [
        CharPool::Upper,
        CharPool::Lower,
        CharPool::Digit,
        CharPool::Underscore,
    ];

    pub fn chars(self) -> &'static str {
        match self {
            CharPool::Upper => "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            CharPool::Lower => "abcdefghijklmnopqrstuvwxyz",
            CharPool::Digit => "0123456789",
            CharPool::Underscore => "_",
        }
    }
}

/// A non-empty union of [`CharPool`]s.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharacterClass {
    pools: Vec<CharPool>,
    alphabet: Vec<char>,
}

impl CharacterClass {
    /// Returns `None` when no pool is selected.
    pub fn new(pools: impl IntoIterator<Item = CharPool>) -> Option<Self> {
        let mut pools: Vec<CharPool> = pools.into_iter().collect();
        pools.sort();
        pools.dedup();

        if pools.is_empty() {
            return None;
        }

        let alphabet = pools.iter().flat_map(|p| p.chars().chars()).collect();
        Some(Self { pools, alphabet })
    }

    pub fn pools(&self) -> &[CharPool] {
        &self.pools
    }

    /// Every candidate character, each exactly once.
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn contains(&self, c: char) -> bool {
        self.alphabet.contains(&c)
    }
}

/// What a [`PatternNode`] expands to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Element {
    /// Fixed text, emitted once regardless of the node's range.
    Literal(String),

    /// `L` characters drawn from the class.
    Class(CharacterClass),

    /// The whole child sequence, repeated `L` times as a unit.
    Group(Vec<PatternNode>),

    /// `L` independent expansions of one nested node.
    SingleChild(Box<PatternNode>),
}

/// A repetition range paired with an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternNode {
    range: Range,
    element: Element,
}

impl PatternNode {
    pub fn new(range: Range, element: Element) -> Self {
        Self { range, element }
    }

    pub fn range(&self) -> Range {
        self.range
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    fn visit<'a>(&'a self, f: &mut impl FnMut(&'a PatternNode)) {
        f(self);
        match &self.element {
            Element::Literal(_) | Element::Class(_) => {}
            Element::Group(children) => {
                for child in children {
                    child.visit(f);
                }
            }
            Element::SingleChild(child) => child.visit(f),
        }
    }
}

/// The compiled form of a whole pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternTree {
    /// The pattern was one block (with or without a quantifier).
    Node(PatternNode),

    /// Top-level concatenation; each sibling is expanded once, in order.
    List(Vec<PatternNode>),
}

impl PatternTree {
    /// Top-level nodes in order.
    pub fn nodes(&self) -> &[PatternNode] {
        match self {
            PatternTree::Node(node) => std::slice::from_ref(node),
            PatternTree::List(nodes) => nodes,
        }
    }

    /// Number of nodes at every depth.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        for node in self.nodes() {
            node.visit(&mut |_| count += 1);
        }
        count
    }

    /// Fails with [`Error::Configuration`] on the first inverted range that
    /// generation would sample. Literal ranges are never sampled.
    pub fn check_ranges(&self) -> Result<(), Error> {
        let mut first_err = None;
        for node in self.nodes() {
            node.visit(&mut |n| {
                if first_err.is_none() && !matches!(n.element, Element::Literal(_)) {
                    first_err = n.range.check().err();
                }
            });
        }
        first_err.map_or(Ok(()), Err)
    }
}
