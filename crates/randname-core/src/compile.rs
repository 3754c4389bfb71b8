// Compilation module: resolves a parsed pattern into a PatternTree

use randname_grammar::{Block, BlockKind, PatternAst, QuantifiedBlock, Span, parse_pattern};
use tracing::debug;

use crate::error::{Error, GrammarError};
use crate::tree::{CharPool, CharacterClass, Element, PatternNode, PatternTree, Range};

/// Compile pattern text into an immutable [`PatternTree`].
///
/// Only grammar problems are reported here. Ranges are kept as written, so
/// `[0100](9,3)` compiles and fails later when generation samples it.
pub fn compile(pattern: &str) -> Result<PatternTree, Error> {
    let ast = parse_pattern(pattern).map_err(|source| GrammarError::Syntax {
        pattern: pattern.to_string(),
        source,
    })?;

    let tree = Resolver { pattern }.root(&ast)?;

    debug!(pattern, nodes = tree.node_count(), "compiled naming pattern");
    Ok(tree)
}

/// Turns parsed blocks into typed elements.
struct Resolver<'a> {
    pattern: &'a str,
}

impl Resolver<'_> {
    fn root(&self, ast: &PatternAst) -> Result<PatternTree, Error> {
        Ok(match ast {
            // `{...}` on its own: the group body is the whole pattern.
            PatternAst::Bare(Block {
                kind: BlockKind::Group { body },
                ..
            }) => self.root(body)?,
            PatternAst::Bare(block) => {
                PatternTree::Node(PatternNode::new(Range::ONCE, self.element(block)?))
            }
            PatternAst::Single(node) => PatternTree::Node(self.node(node)?),
            PatternAst::Sequence(nodes) => PatternTree::List(self.nodes(nodes)?),
        })
    }

    fn nodes(&self, nodes: &[QuantifiedBlock]) -> Result<Vec<PatternNode>, Error> {
        nodes.iter().map(|n| self.node(n)).collect()
    }

    fn node(&self, node: &QuantifiedBlock) -> Result<PatternNode, Error> {
        let (min, max) = node.quantifier.bounds();
        Ok(PatternNode::new(Range::new(min, max), self.element(&node.block)?))
    }

    fn element(&self, block: &Block) -> Result<Element, Error> {
        match &block.kind {
            BlockKind::Literal { text } => Ok(Element::Literal(text.clone())),
            BlockKind::Class { flags } => self.class(flags, block.span),
            BlockKind::Group { body } => self.group(body),
        }
    }

    /// A group's element is its body as parsed: a lone unquantified block
    /// lends its element to the group's range, one quantified block becomes
    /// a `SingleChild`, several become a `Group`.
    fn group(&self, body: &PatternAst) -> Result<Element, Error> {
        Ok(match body {
            PatternAst::Bare(block) => self.element(block)?,
            PatternAst::Single(node) => Element::SingleChild(Box::new(self.node(node)?)),
            PatternAst::Sequence(nodes) => Element::Group(self.nodes(nodes)?),
        })
    }

    /// `[bbbb]`: four `0`/`1` flags for uppercase, lowercase, digit, underscore.
    fn class(&self, flags: &str, span: Span) -> Result<Element, Error> {
        let fail = |reason: &'static str| GrammarError::CharacterClass {
            pattern: self.pattern.to_string(),
            flags: flags.to_string(),
            at: span.start,
            reason,
        };

        if flags.chars().count() != CharPool::ALL.len() {
            return Err(fail("expected exactly four flags").into());
        }

        let mut pools = Vec::with_capacity(CharPool::ALL.len());
        for (flag, pool) in flags.chars().zip(CharPool::ALL) {
            match flag {
                '1' => pools.push(pool),
                '0' => {}
                _ => return Err(fail("flags must be '0' or '1'").into()),
            }
        }

        let class =
            CharacterClass::new(pools).ok_or_else(|| fail("at least one flag must be '1'"))?;
        Ok(Element::Class(class))
    }
}
