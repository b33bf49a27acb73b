use crate::direction::LocalPattern;
use crate::error::RuleError;
use crate::rule::Rule;
use std::fmt;
use std::str::FromStr;

/// Ordered, conflict-free list of rules. Earlier rules win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Parse a block of rule text.
    ///
    /// Blank lines and lines starting with `#` are skipped. The whole block is
    /// rejected on the first malformed line, or if any two rules conflict.
    pub fn parse(text: &str) -> Result<Self, RuleError> {
        let mut rules = Vec::new();
        for (i, line) in text.lines().enumerate() {
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }
            rules.push(Rule::parse_numbered(line, i + 1)?);
        }
        Self::from_rules(rules)
    }

    /// Validate an already parsed list
    pub fn from_rules(rules: Vec<Rule>) -> Result<Self, RuleError> {
        validate(&rules)?;
        Ok(RuleSet { rules })
    }

    /// First rule that fires for `state` and `pattern`
    pub fn first_match(&self, state: u32, pattern: &LocalPattern) -> Option<&Rule> {
        self.rules.iter().find(|r| r.matches(state, pattern))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }
}

// Pairwise check; rule sets are hand-written and small.
fn validate(rules: &[Rule]) -> Result<(), RuleError> {
    for (i, first) in rules.iter().enumerate() {
        for second in &rules[i + 1..] {
            if first.conflicts_with(second) {
                return Err(RuleError::RuleConflict {
                    first: first.to_string(),
                    second: second.to_string(),
                });
            }
        }
    }
    Ok(())
}

impl FromStr for RuleSet {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleSet::parse(s)
    }
}

/// One rule per line, each newline-terminated
impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
