use crate::at::{
    AccessLevel, Directive, Error, MemberPattern, Modifier, ModifierToggle, Target, ToggleAction,
};
use crate::jvm::{BinaryName, MethodDescriptor, Name, ParseDescriptor, UnqualifiedName};
use std::str::FromStr;

/// Parse one configuration line into a directive
///
/// The line must already be free of comments and surrounding whitespace. The grammar is:
///
/// ```text
/// line         := access-spec WS owner [ WS member ]
/// access-spec  := access-level ( ("+" | "-") modifier )*
/// access-level := "public" | "protected" | "private" | "default"
/// member       := "*" | "*()" | field-name | method-name method-descriptor
/// ```
///
/// `*` selects all fields and `*()` all methods (constructors included). Owners may be written
/// with either `.` or `/` separators.
pub fn parse_directive(line: &str) -> Result<Directive, Error> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (access_spec, owner, member) = match tokens[..] {
        [access_spec, owner] => (access_spec, owner, None),
        [access_spec, owner, member] => (access_spec, owner, Some(member)),
        _ => {
            let msg = format!("expected 2 or 3 tokens, found {}", tokens.len());
            return Err(Error::malformed(line, msg));
        }
    };

    let (access, toggles) = parse_access_spec(line, access_spec)?;
    let owner = BinaryName::from_qualified(owner).map_err(|msg| Error::malformed(line, msg))?;
    let target = match member {
        None => Target::Class,
        Some(member) => parse_member(line, member)?,
    };

    Ok(Directive {
        access,
        toggles,
        owner,
        target,
    })
}

impl FromStr for Directive {
    type Err = Error;

    fn from_str(line: &str) -> Result<Directive, Error> {
        parse_directive(line)
    }
}

fn parse_access_spec(line: &str, spec: &str) -> Result<(AccessLevel, Vec<ModifierToggle>), Error> {
    let split = spec.find(['+', '-']).unwrap_or(spec.len());
    let (level, mut rest) = spec.split_at(split);

    let access = AccessLevel::by_name(level)
        .ok_or_else(|| Error::malformed(line, format!("unknown access level '{}'", level)))?;

    let mut toggles = vec![];
    while let Some(sign) = rest.chars().next() {
        let action = if sign == '+' {
            ToggleAction::Add
        } else {
            ToggleAction::Remove
        };
        rest = &rest[1..];

        let end = rest.find(['+', '-']).unwrap_or(rest.len());
        let (code, remaining) = rest.split_at(end);
        if code.is_empty() {
            let msg = format!("'{}' is not followed by a modifier", sign);
            return Err(Error::malformed(line, msg));
        }
        let modifier = Modifier::by_name(code).ok_or_else(|| Error::UnknownModifier {
            line: line.to_owned(),
            code: code.to_owned(),
        })?;

        toggles.push(ModifierToggle { action, modifier });
        rest = remaining;
    }

    Ok((access, toggles))
}

fn parse_member(line: &str, member: &str) -> Result<Target, Error> {
    match member {
        "*" => return Ok(Target::Field(MemberPattern::Wildcard)),
        "*()" => return Ok(Target::Method(MemberPattern::Wildcard)),
        _ => (),
    }

    let (name, descriptor) = match member.find('(') {
        None => (member, None),
        Some(paren) => {
            let (name, descriptor) = member.split_at(paren);
            (name, Some(descriptor))
        }
    };

    if name == "*" {
        let msg = "wildcards are '*' for fields or '*()' for methods";
        return Err(Error::malformed(line, msg));
    }
    let name = UnqualifiedName::from_string(name.to_owned())
        .map_err(|msg| Error::malformed(line, msg))?;

    match descriptor {
        None => {
            if name.as_str().contains(['<', '>', ')']) {
                let msg = format!("'{}' is not a valid field name", name);
                return Err(Error::malformed(line, msg));
            }
            Ok(Target::Field(MemberPattern::Exact {
                name,
                descriptor: None,
            }))
        }
        Some(descriptor) => {
            if !name.is_valid_method_name() {
                let msg = format!("'{}' is not a valid method name", name);
                return Err(Error::malformed(line, msg));
            }
            if name == UnqualifiedName::CLINIT {
                let msg = "static initializers have no access to change";
                return Err(Error::malformed(line, msg));
            }

            let parsed = MethodDescriptor::<BinaryName>::parse(descriptor).map_err(|err| {
                Error::malformed(line, format!("bad descriptor '{}': {}", descriptor, err))
            })?;
            if name == UnqualifiedName::INIT && parsed.return_type.is_some() {
                let msg = "constructors must return 'V'";
                return Err(Error::malformed(line, msg));
            }

            Ok(Target::Method(MemberPattern::Exact {
                name,
                descriptor: Some(descriptor.to_owned()),
            }))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::at::MemberKind;

    fn exact(name: &str, descriptor: Option<&str>) -> MemberPattern {
        MemberPattern::Exact {
            name: UnqualifiedName::from_string(name.to_owned()).unwrap(),
            descriptor: descriptor.map(str::to_owned),
        }
    }

    #[test]
    fn fields() {
        let directive = parse_directive("protected pkg.TestClass1 a").unwrap();
        assert_eq!(directive.access, AccessLevel::Protected);
        assert!(directive.toggles.is_empty());
        assert_eq!(directive.owner.as_str(), "pkg/TestClass1");
        assert_eq!(directive.target, Target::Field(exact("a", None)));
    }

    #[test]
    fn methods_and_constructors() {
        let directive = parse_directive("public pkg.TestClass1 <init>(J)V").unwrap();
        assert_eq!(directive.target, Target::Method(exact("<init>", Some("(J)V"))));

        let directive = parse_directive("public pkg/TestClass1 h(Ljava/lang/String;)V").unwrap();
        assert_eq!(
            directive.target,
            Target::Method(exact("h", Some("(Ljava/lang/String;)V")))
        );
        assert_eq!(directive.kind(), MemberKind::Method);
    }

    #[test]
    fn classes_and_wildcards() {
        let directive = parse_directive("default-f pkg.Outer$Inner").unwrap();
        assert_eq!(directive.access, AccessLevel::PackagePrivate);
        assert_eq!(directive.toggles, vec![ModifierToggle::remove(Modifier::Final)]);
        assert_eq!(directive.owner.as_str(), "pkg/Outer$Inner");
        assert_eq!(directive.target, Target::Class);

        let directive = parse_directive("public+f pkg.TestClass1 *").unwrap();
        assert_eq!(directive.toggles, vec![ModifierToggle::add(Modifier::Final)]);
        assert_eq!(directive.target, Target::Field(MemberPattern::Wildcard));

        let directive = parse_directive("private pkg.TestClass1 *()").unwrap();
        assert_eq!(directive.target, Target::Method(MemberPattern::Wildcard));
    }

    #[test]
    fn toggles_keep_their_order() {
        let directive: Directive = "public-f+f  pkg.A\tx".parse().unwrap();
        assert_eq!(
            directive.toggles,
            vec![
                ModifierToggle::remove(Modifier::Final),
                ModifierToggle::add(Modifier::Final)
            ]
        );
    }

    #[test]
    fn rejects_malformed_lines() {
        for line in [
            "",
            "public",
            "public pkg.A a b",
            "publik pkg.A a",
            "+f pkg.A a",
            "public+ pkg.A a",
            "public+f- pkg.A a",
            "public pkg..A a",
            "public pkg.A; a",
            "public pkg.A a.b",
            "public pkg.A <a>",
            "public pkg.A <a>()V",
            "public pkg.A <clinit>()V",
            "public pkg.A <init>()I",
            "public pkg.A h(",
            "public pkg.A h()",
            "public pkg.A h(Q)V",
            "public pkg.A *(I)V",
        ] {
            let err = parse_directive(line).unwrap_err();
            assert!(
                matches!(err, Error::MalformedDirective { .. }),
                "'{}' gave {:?}",
                line,
                err
            );
        }
    }

    #[test]
    fn rejects_unknown_modifiers() {
        match parse_directive("public+s pkg.A a") {
            Err(Error::UnknownModifier { code, .. }) => assert_eq!(code, "s"),
            other => panic!("unexpected {:?}", other),
        }
        match parse_directive("public-final pkg.A a") {
            Err(Error::UnknownModifier { code, .. }) => assert_eq!(code, "final"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
