//! Named naming policies, one pattern per symbol category.

use std::collections::BTreeMap;
use std::path::Path;

use rand::Rng;
use tracing::debug;

use crate::compile::compile;
use crate::error::Error;
use crate::matcher::Matcher;
use crate::tree::PatternTree;

/// Built-in rules, one per category the renamer handles.
pub const DEFAULT_POLICIES: [(&str, &str); 5] = [
    // 2-3 capitalized pseudo-words: `KzqwhejAbcdefgh`
    ("class", "{[1000](1)[0100](6,12)}(2,3)"),
    // lowercase word, then up to 2 capitalized ones: `qwertyuAbcdefg`
    ("method", "[0100](7,13){[1000](1)[0100](6,12)}(0,2)"),
    ("field", "[0100](7,13){[1000](1)[0100](6,12)}(0,1)"),
    // resource names: `abcdefg_hijklmn`
    ("id_res", "[0100](7,11){<_>[0100](7,11)}(0,1)"),
    ("layout_res", "[0100](7,11){<_>[0100](7,11)}(1,2)"),
];

/// A named, compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    name: String,
    pattern: String,
    tree: PatternTree,
    /// 1-based line in the policy file; `None` for built-in and API-created rules.
    line: Option<usize>,
}

impl Policy {
    /// Compiles `pattern` and checks every range up front, so a policy that
    /// exists can always generate.
    ///
    /// This is stricter than [`generate`](crate::generate): an inverted range
    /// is rejected here even where generation would never sample it, e.g.
    /// under a `(0)` repeat.
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Result<Self, Error> {
        let name = name.into();
        let pattern = pattern.into();
        let tree = compile(&pattern)?;
        tree.check_ranges()?;
        Ok(Self {
            name,
            pattern,
            tree,
            line: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn tree(&self) -> &PatternTree {
        &self.tree
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<String, Error> {
        self.tree.generate(rng)
    }

    pub fn matcher(&self) -> Result<Matcher, Error> {
        Matcher::new(&self.tree)
    }

    /// Whether `name` is something this policy could have generated.
    pub fn matches(&self, name: &str) -> Result<bool, Error> {
        Ok(self.matcher()?.is_match(name))
    }
}

/// Policies by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicySet {
    policies: BTreeMap<String, Policy>,
}

impl PolicySet {
    /// The built-in [`DEFAULT_POLICIES`].
    pub fn defaults() -> Result<Self, Error> {
        let mut set = Self::default();
        for (name, pattern) in DEFAULT_POLICIES {
            set.insert(Policy::new(name, pattern)?);
        }
        Ok(set)
    }

    /// Defaults, overridden and extended by the rules in `src`.
    pub fn from_source(src: &str) -> Result<Self, Error> {
        let mut set = Self::defaults()?;
        for policy in parse_policy_file(src)? {
            if let Some(old) = set.insert(policy) {
                debug!(rule = old.name(), "policy file overrides default rule");
            }
        }
        Ok(set)
    }

    /// Reads a policy file; see [`PolicySet::from_source`].
    pub fn load(path: &Path) -> Result<Self, Error> {
        let src = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let set = Self::from_source(&src)?;
        debug!(path = %path.display(), rules = set.len(), "loaded policy file");
        Ok(set)
    }

    /// Adds `policy`, returning the one it replaced.
    pub fn insert(&mut self, policy: Policy) -> Option<Policy> {
        self.policies.insert(policy.name.clone(), policy)
    }

    pub fn get(&self, name: &str) -> Result<&Policy, Error> {
        self.policies
            .get(name)
            .ok_or_else(|| Error::policy(0, format!("unknown rule {name:?}")))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.policies.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Policy> {
        self.policies.values()
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    pub fn generate<R: Rng + ?Sized>(&self, name: &str, rng: &mut R) -> Result<String, Error> {
        self.get(name)?.generate(rng)
    }
}

/// Parses `name = pattern` lines. Blank lines and `#` comments are skipped.
pub(crate) fn parse_policy_file(src: &str) -> Result<Vec<Policy>, Error> {
    let mut policies: Vec<Policy> = Vec::new();

    for (idx, raw_line) in src.lines().enumerate() {
        let line_no = idx + 1;

        // Handle Windows CRLF files.
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let trimmed = line.trim();

        // Comments only at start of line (after optional leading whitespace).
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (name, pattern) = trimmed
            .split_once('=')
            .ok_or_else(|| Error::policy(line_no, "expected 'name = pattern'"))?;

        let name = name.trim_end();
        if name.is_empty() {
            return Err(Error::policy(line_no, "expected a rule name before '='"));
        }
        if !is_rule_name(name) {
            return Err(Error::policy(
                line_no,
                format!("invalid rule name {name:?} (use letters, digits, '_' and '-')"),
            ));
        }

        let pattern = pattern.trim_start();
        if pattern.is_empty() {
            return Err(Error::policy(line_no, "expected a pattern after '='"));
        }

        if let Some(first) = policies.iter().find(|p| p.name == name) {
            return Err(Error::policy(
                line_no,
                format!(
                    "rule {name:?} is already defined on line {}",
                    first.line.unwrap_or(0)
                ),
            ));
        }

        let mut policy = Policy::new(name, pattern).map_err(|source| Error::Rule {
            line: line_no,
            name: name.to_string(),
            source: Box::new(source),
        })?;
        policy.line = Some(line_no);
        policies.push(policy);
    }

    Ok(policies)
}

fn is_rule_name(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
