use rand::Rng;
use tracing::trace;

use crate::error::Error;
use crate::tree::{Element, PatternNode, PatternTree, Range};

impl Range {
    /// Draws a repeat count: the fixed value, or uniformly from `[min, max]`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<u32, Error> {
        self.check()?;
        if self.is_fixed() {
            return Ok(self.min());
        }
        Ok(rng.gen_range(self.min()..=self.max()))
    }
}

impl PatternTree {
    /// Draws one name. See [`generate`].
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, Error> {
        generate(self, rng)
    }
}

/// Expands `tree` into one concrete name, sampling every range afresh.
///
/// Top-level siblings are expanded once each, in order. Fails with
/// [`Error::Configuration`] if a sampled range has `min > max`; no partial
/// name is returned.
pub fn generate<R: Rng + ?Sized>(tree: &PatternTree, rng: &mut R) -> Result<String, Error> {
    let mut out = String::new();
    for node in tree.nodes() {
        expand(node, rng, &mut out)?;
    }
    trace!(name = %out, "generated name");
    Ok(out)
}

fn expand<R: Rng + ?Sized>(
    node: &PatternNode,
    rng: &mut R,
    out: &mut String,
) -> Result<(), Error> {
    match node.element() {
        // Literal ranges are never sampled.
        Element::Literal(text) => out.push_str(text),
        Element::Class(class) => {
            let len = node.range().sample(rng)?;
            let alphabet = class.alphabet();
            for _ in 0..len {
                out.push(alphabet[rng.gen_range(0..alphabet.len())]);
            }
        }
        Element::SingleChild(child) => {
            let len = node.range().sample(rng)?;
            for _ in 0..len {
                expand(child, rng, out)?;
            }
        }
        Element::Group(children) => {
            let len = node.range().sample(rng)?;
            for _ in 0..len {
                for child in children {
                    expand(child, rng, out)?;
                }
            }
        }
    }
    Ok(())
}
