use std::borrow::{Borrow, Cow};
use std::fmt::{Debug, Display, Error as FmtError, Formatter};

/// Names of methods, fields
///
/// See <https://docs.oracle.com/javase/specs/jvms/se16/html/jvms-4.html#jvms-4.2.2>
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct UnqualifiedName(Cow<'static, str>);

/// Names of classes and interfaces, in their internal `/`-separated form
///
/// See <https://docs.oracle.com/javase/specs/jvms/se16/html/jvms-4.html#jvms-4.2.1>
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct BinaryName(Cow<'static, str>);

/// Extracts the raw underlying string name
impl AsRef<str> for UnqualifiedName {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

/// Extracts the raw underlying string name
impl AsRef<str> for BinaryName {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

/// Lets maps keyed by class name be queried with plain strings read out of a class file
impl Borrow<str> for BinaryName {
    fn borrow(&self) -> &str {
        self.0.as_ref()
    }
}

pub trait Name: Sized {
    /// Check if a string would be a valid name
    fn check_valid(name: impl AsRef<str>) -> Result<(), String>;

    /// Extact the raw underlying string data:
    fn as_cow(&self) -> &Cow<'static, str>;

    /// Extact the raw underlying string name
    fn as_str(&self) -> &str {
        self.as_cow().as_ref()
    }

    /// Try to construct a name from a string
    fn from_string(name: String) -> Result<Self, String>;
}

impl Name for UnqualifiedName {
    fn check_valid(name: impl AsRef<str>) -> Result<(), String> {
        let name = name.as_ref();
        if name.contains(&['.', ';', '[', '/'][..]) {
            Err(format!(
                "Unqualified name '{}' contains an illegal character",
                name
            ))
        } else if name.is_empty() {
            Err(format!("Unqualified name '{}' is empty", name))
        } else {
            Ok(())
        }
    }

    fn as_cow(&self) -> &Cow<'static, str> {
        &self.0
    }

    fn from_string(name: String) -> Result<Self, String> {
        match Self::check_valid(&name) {
            Ok(()) => Ok(UnqualifiedName(Cow::Owned(name))),
            Err(msg) => Err(msg),
        }
    }
}

impl Name for BinaryName {
    fn check_valid(name: impl AsRef<str>) -> Result<(), String> {
        let name = name.as_ref();
        if name.is_empty() {
            Err(format!("Binary name '{}' is empty", name))
        } else {
            name.split('/').map(UnqualifiedName::check_valid).collect()
        }
    }

    fn as_cow(&self) -> &Cow<'static, str> {
        &self.0
    }

    fn from_string(name: String) -> Result<Self, String> {
        match Self::check_valid(&name) {
            Ok(()) => Ok(BinaryName(Cow::Owned(name))),
            Err(msg) => Err(msg),
        }
    }
}

impl Debug for UnqualifiedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        f.write_str(self.0.as_ref())
    }
}

impl Debug for BinaryName {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        f.write_str(self.0.as_ref())
    }
}

impl Display for UnqualifiedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        f.write_str(self.0.as_ref())
    }
}

impl Display for BinaryName {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        f.write_str(self.0.as_ref())
    }
}

impl UnqualifiedName {
    const fn name(value: &'static str) -> UnqualifiedName {
        UnqualifiedName(Cow::Borrowed(value))
    }

    /// Only methods may have these special names, which are the only names allowed to have angle
    /// brackets in them
    pub fn is_special_method(&self) -> bool {
        *self == Self::INIT || *self == Self::CLINIT
    }

    /// Valid as the name of a method: angle brackets only appear in the special names
    pub fn is_valid_method_name(&self) -> bool {
        self.is_special_method() || !self.as_str().contains(&['<', '>'][..])
    }

    pub const INIT: Self = Self::name("<init>");
    pub const CLINIT: Self = Self::name("<clinit>");
}

impl BinaryName {
    /// Parse a class name written either in source form (`java.lang.Object`) or in internal form
    /// (`java/lang/Object`)
    ///
    /// Nested classes still need their `$` (eg. `java.util.Map$Entry`).
    pub fn from_qualified(name: &str) -> Result<BinaryName, String> {
        BinaryName::from_string(name.replace('.', "/"))
    }

    const fn name(value: &'static str) -> BinaryName {
        BinaryName(Cow::Borrowed(value))
    }

    pub const OBJECT: Self = Self::name("java/lang/Object");
    pub const STRING: Self = Self::name("java/lang/String");
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn qualified_names_become_internal() {
        assert_eq!(
            BinaryName::from_qualified("java.lang.String").unwrap(),
            BinaryName::STRING
        );
        assert_eq!(
            BinaryName::from_qualified("java/lang/Object").unwrap(),
            BinaryName::OBJECT
        );
        assert_eq!(
            BinaryName::from_qualified("a.B$C").unwrap().as_str(),
            "a/B$C"
        );
    }

    #[test]
    fn bad_binary_names() {
        assert!(BinaryName::from_qualified("").is_err());
        assert!(BinaryName::from_qualified("a..B").is_err());
        assert!(BinaryName::from_qualified("a/B;").is_err());
        assert!(BinaryName::from_qualified("[I").is_err());
    }

    #[test]
    fn method_names() {
        assert!(UnqualifiedName::INIT.is_valid_method_name());
        assert!(UnqualifiedName::CLINIT.is_special_method());

        let odd = UnqualifiedName::from_string(String::from("<odd>")).unwrap();
        assert!(!odd.is_valid_method_name());

        let plain = UnqualifiedName::from_string(String::from("run")).unwrap();
        assert!(plain.is_valid_method_name());
        assert!(!plain.is_special_method());
    }
}
