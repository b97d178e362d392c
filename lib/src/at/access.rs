use crate::jvm::{MethodAccessFlags, VISIBILITY_MASK};
use std::fmt::{Display, Error as FmtError, Formatter};

/// Visibility a directive gives its target
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum AccessLevel {
    Public,
    Protected,
    #[default]
    PackagePrivate,
    Private,
}

impl AccessLevel {
    /// Parse the access level keyword of a rule (`default` is package-private)
    pub fn by_name(name: &str) -> Option<AccessLevel> {
        match name {
            "public" => Some(AccessLevel::Public),
            "protected" => Some(AccessLevel::Protected),
            "default" => Some(AccessLevel::PackagePrivate),
            "private" => Some(AccessLevel::Private),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            AccessLevel::Public => "public",
            AccessLevel::Protected => "protected",
            AccessLevel::PackagePrivate => "default",
            AccessLevel::Private => "private",
        }
    }

    /// Visibility bit in the access flags (package-private has none)
    pub const fn flag(self) -> u16 {
        match self {
            AccessLevel::Public => MethodAccessFlags::PUBLIC.bits(),
            AccessLevel::Protected => MethodAccessFlags::PROTECTED.bits(),
            AccessLevel::PackagePrivate => 0,
            AccessLevel::Private => MethodAccessFlags::PRIVATE.bits(),
        }
    }

    /// Read the visibility out of access flags
    ///
    /// Flags with several visibility bits set are malformed; the widest one wins.
    pub fn from_flags(flags: u16) -> AccessLevel {
        let visibility = flags & VISIBILITY_MASK;
        if visibility & AccessLevel::Public.flag() != 0 {
            AccessLevel::Public
        } else if visibility & AccessLevel::Protected.flag() != 0 {
            AccessLevel::Protected
        } else if visibility & AccessLevel::Private.flag() != 0 {
            AccessLevel::Private
        } else {
            AccessLevel::PackagePrivate
        }
    }
}

impl Display for AccessLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        f.write_str(self.name())
    }
}

/// What a directive applies to. Constructors are methods named `<init>`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum MemberKind {
    Class,
    Field,
    Method,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn keywords() {
        assert_eq!(AccessLevel::by_name("public"), Some(AccessLevel::Public));
        assert_eq!(AccessLevel::by_name("default"), Some(AccessLevel::PackagePrivate));
        assert_eq!(AccessLevel::by_name("Public"), None);
        assert_eq!(AccessLevel::by_name("package"), None);
        assert_eq!(AccessLevel::default(), AccessLevel::PackagePrivate);
    }

    #[test]
    fn flags() {
        assert_eq!(AccessLevel::Public.flag(), 0x0001);
        assert_eq!(AccessLevel::Private.flag(), 0x0002);
        assert_eq!(AccessLevel::Protected.flag(), 0x0004);
        assert_eq!(AccessLevel::PackagePrivate.flag(), 0);

        assert_eq!(AccessLevel::from_flags(0x0019), AccessLevel::Public);
        assert_eq!(AccessLevel::from_flags(0x0014), AccessLevel::Protected);
        assert_eq!(AccessLevel::from_flags(0x1012), AccessLevel::Private);
        assert_eq!(AccessLevel::from_flags(0x0010), AccessLevel::PackagePrivate);
    }
}
