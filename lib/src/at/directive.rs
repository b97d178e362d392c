use crate::at::{AccessLevel, MemberKind, ModifierToggle};
use crate::jvm::{BinaryName, UnqualifiedName};
use std::fmt::{Display, Error as FmtError, Formatter};

/// Which members of a kind a directive selects
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum MemberPattern {
    /// Every member of the kind declared directly on the owner
    Wildcard,

    /// One member. Fields have no descriptor.
    Exact {
        name: UnqualifiedName,
        descriptor: Option<String>,
    },
}

impl MemberPattern {
    pub fn matches(&self, name: &str, descriptor: Option<&str>) -> bool {
        match self {
            MemberPattern::Wildcard => true,
            MemberPattern::Exact {
                name: expected_name,
                descriptor: expected_descriptor,
            } => expected_name.as_ref() == name && expected_descriptor.as_deref() == descriptor,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Target {
    Class,
    Field(MemberPattern),
    Method(MemberPattern),
}

impl Target {
    pub fn kind(&self) -> MemberKind {
        match self {
            Target::Class => MemberKind::Class,
            Target::Field(_) => MemberKind::Field,
            Target::Method(_) => MemberKind::Method,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(
            self,
            Target::Field(MemberPattern::Wildcard) | Target::Method(MemberPattern::Wildcard)
        )
    }
}

/// One parsed rule line
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Directive {
    pub access: AccessLevel,

    /// Applied in order, after the access level
    pub toggles: Vec<ModifierToggle>,

    pub owner: BinaryName,
    pub target: Target,
}

impl Directive {
    pub fn kind(&self) -> MemberKind {
        self.target.kind()
    }

    /// Does this directive select the given member of its owner?
    ///
    /// For class queries the name is ignored: a class directive only ever selects its owner.
    pub fn matches(&self, kind: MemberKind, name: &str, descriptor: Option<&str>) -> bool {
        match (&self.target, kind) {
            (Target::Class, MemberKind::Class) => true,
            (Target::Field(pattern), MemberKind::Field) => pattern.matches(name, None),
            (Target::Method(pattern), MemberKind::Method) => {
                // Static initializers are not an access surface, even for wildcards
                name != UnqualifiedName::CLINIT.as_ref() && pattern.matches(name, descriptor)
            }
            _ => false,
        }
    }
}

/// Renders the directive back into rule syntax
impl Display for Directive {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.access)?;
        for toggle in &self.toggles {
            write!(f, "{}", toggle)?;
        }
        write!(f, " {}", self.owner)?;
        match &self.target {
            Target::Class => Ok(()),
            Target::Field(MemberPattern::Wildcard) => f.write_str(" *"),
            Target::Method(MemberPattern::Wildcard) => f.write_str(" *()"),
            Target::Field(MemberPattern::Exact { name, .. }) => write!(f, " {}", name),
            Target::Method(MemberPattern::Exact { name, descriptor }) => {
                write!(f, " {}{}", name, descriptor.as_deref().unwrap_or("()V"))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::at::Modifier;
    use crate::jvm::Name;

    fn method(name: &str, descriptor: &str) -> Directive {
        Directive {
            access: AccessLevel::Public,
            toggles: vec![],
            owner: BinaryName::from_qualified("pkg.TestClass1").unwrap(),
            target: Target::Method(MemberPattern::Exact {
                name: UnqualifiedName::from_string(name.to_owned()).unwrap(),
                descriptor: Some(descriptor.to_owned()),
            }),
        }
    }

    #[test]
    fn exact_methods_need_matching_descriptors() {
        let directive = method("h", "(Ljava/lang/String;)V");
        assert!(directive.matches(MemberKind::Method, "h", Some("(Ljava/lang/String;)V")));
        assert!(!directive.matches(MemberKind::Method, "h", Some("()V")));
        assert!(!directive.matches(MemberKind::Method, "g", Some("(Ljava/lang/String;)V")));
        assert!(!directive.matches(MemberKind::Field, "h", None));
    }

    #[test]
    fn wildcards_skip_static_initializers() {
        let directive = Directive {
            target: Target::Method(MemberPattern::Wildcard),
            ..method("h", "()V")
        };
        assert!(directive.target.is_wildcard());
        assert!(directive.matches(MemberKind::Method, "<init>", Some("()V")));
        assert!(directive.matches(MemberKind::Method, "anything", Some("(IJ)I")));
        assert!(!directive.matches(MemberKind::Method, "<clinit>", Some("()V")));
        assert!(!directive.matches(MemberKind::Class, "pkg/TestClass1", None));
    }

    #[test]
    fn renders_as_rule_text() {
        let mut directive = method("<init>", "(J)V");
        assert_eq!(directive.to_string(), "public pkg/TestClass1 <init>(J)V");

        directive.access = AccessLevel::PackagePrivate;
        directive.toggles = vec![
            ModifierToggle::add(Modifier::Final),
            ModifierToggle::remove(Modifier::Final),
        ];
        directive.target = Target::Field(MemberPattern::Wildcard);
        assert_eq!(directive.to_string(), "default+f-f pkg/TestClass1 *");

        directive.target = Target::Class;
        assert_eq!(directive.to_string(), "default+f-f pkg/TestClass1");
    }
}
