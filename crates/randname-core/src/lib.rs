mod compile;
mod error;
mod generate;
mod matcher;
mod policy;
mod tree;

pub use compile::compile;
pub use error::{Error, GrammarError};
pub use generate::generate;
pub use matcher::{Matcher, to_regex_source};
pub use policy::{DEFAULT_POLICIES, Policy, PolicySet};
pub use tree::{CharPool, CharacterClass, Element, PatternNode, PatternTree, Range};

pub use randname_grammar::{ParseError, ParseErrorKind};
