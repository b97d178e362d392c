use crate::at::{parse_directive, Directive, Error, MemberKind};
use crate::jvm::BinaryName;
use std::collections::HashMap;

/// How precisely a directive picks out its target
///
/// When several directives select the same member, the most specific one applies, and among
/// equally specific ones the one declared last.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Specificity {
    Wildcard,
    Exact,
}

impl Specificity {
    pub fn of(directive: &Directive) -> Specificity {
        if directive.target.is_wildcard() {
            Specificity::Wildcard
        } else {
            Specificity::Exact
        }
    }
}

/// Directives indexed by the class they target
///
/// The directives of each owner are kept in the order they were added. Nothing is deduplicated:
/// conflicts are resolved by [`RuleSet::find`].
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct RuleSet {
    directives: HashMap<BinaryName, Vec<Directive>>,
}

impl RuleSet {
    pub fn new() -> RuleSet {
        RuleSet::default()
    }

    /// Parse a rule set from clean lines (no comments, no blank lines)
    ///
    /// The first bad line aborts the whole parse.
    pub fn from_lines<I, S>(lines: I) -> Result<RuleSet, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = RuleSet::new();
        for line in lines {
            rules.push(parse_directive(line.as_ref())?);
        }
        Ok(rules)
    }

    pub fn push(&mut self, directive: Directive) {
        self.directives
            .entry(directive.owner.clone())
            .or_default()
            .push(directive);
    }

    /// Add all of the directives in another rule set after those already here, so that they
    /// override ours when equally specific
    pub fn merge(&mut self, other: RuleSet) {
        for (owner, directives) in other.directives {
            self.directives.entry(owner).or_default().extend(directives);
        }
    }

    /// Find the directive that applies to a member of `owner`
    ///
    /// `owner` is in internal form (eg. `pkg/TestClass1`) and `descriptor` is only given for
    /// methods. For [`MemberKind::Class`], `name` is not consulted.
    pub fn find(
        &self,
        owner: &str,
        kind: MemberKind,
        name: &str,
        descriptor: Option<&str>,
    ) -> Option<&Directive> {
        self.directives_for(owner)
            .iter()
            .enumerate()
            .filter(|(_, directive)| directive.matches(kind, name, descriptor))
            .max_by_key(|(index, directive)| (Specificity::of(directive), *index))
            .map(|(_, directive)| directive)
    }

    /// Directives targeting `owner`, in the order they were added
    pub fn directives_for(&self, owner: &str) -> &[Directive] {
        self.directives.get(owner).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_owner(&self, owner: &str) -> bool {
        self.directives.contains_key(owner)
    }

    /// Every class targeted by at least one directive
    pub fn owners(&self) -> impl Iterator<Item = &BinaryName> {
        self.directives.keys()
    }

    /// Total number of directives
    pub fn len(&self) -> usize {
        self.directives.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

impl Extend<Directive> for RuleSet {
    fn extend<I: IntoIterator<Item = Directive>>(&mut self, iter: I) {
        for directive in iter {
            self.push(directive);
        }
    }
}

impl FromIterator<Directive> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Directive>>(iter: I) -> RuleSet {
        let mut rules = RuleSet::new();
        rules.extend(iter);
        rules
    }
}
