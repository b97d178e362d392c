use crate::at::{rewrite, AccessLevel, Directive, Error, MemberKind, RuleSet};
use crate::jvm::class_file::{ClassFile, ClassVisitor};
use crate::jvm::{ClassAccessFlags, FieldAccessFlags, InnerClassAccessFlags, MethodAccessFlags};
use log::{debug, warn};

/// What happened while transforming one class
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TransformOutcome {
    /// Internal name of the transformed class
    pub owner: String,

    /// Number of access flags (header, members, inner class entries) that actually changed
    pub changed: usize,

    /// Nested classes whose `InnerClasses` entry matched a class directive
    pub nested: Vec<String>,

    /// Directives that were applied but produce flags the JVM is likely to reject
    pub warnings: Vec<String>,
}

impl TransformOutcome {
    pub fn is_unchanged(&self) -> bool {
        self.changed == 0
    }
}

/// Applies a rule set to class files
///
/// The rule set is only ever read, so one transformer (or many) can be used from several threads
/// at once.
#[derive(Clone, Copy, Debug)]
pub struct AccessTransformer<'r> {
    rules: &'r RuleSet,
}

impl<'r> AccessTransformer<'r> {
    pub fn new(rules: &'r RuleSet) -> AccessTransformer<'r> {
        AccessTransformer { rules }
    }

    pub fn transform(&self, class_bytes: &[u8]) -> Result<Vec<u8>, Error> {
        self.transform_with_outcome(class_bytes).map(|(bytes, _)| bytes)
    }

    /// Transform a class, also reporting what changed
    ///
    /// When no flag changes, the output is a copy of the input (the class is not re-encoded).
    pub fn transform_with_outcome(
        &self,
        class_bytes: &[u8],
    ) -> Result<(Vec<u8>, TransformOutcome), Error> {
        let mut class_file = ClassFile::parse(class_bytes)?;
        let mut applier = DirectiveApplier {
            rules: self.rules,
            owner: class_file.this_class_name()?,
            is_interface: class_file.is_interface(),
            stage: Stage::NotStarted,
            changed: 0,
            nested: vec![],
            warnings: vec![],
        };
        class_file.accept(&mut applier)?;

        let outcome = TransformOutcome {
            owner: applier.owner,
            changed: applier.changed,
            nested: applier.nested,
            warnings: applier.warnings,
        };
        let output = if outcome.is_unchanged() {
            class_bytes.to_vec()
        } else {
            debug!("{}: {} access flags changed", outcome.owner, outcome.changed);
            class_file.to_bytes()?
        };
        Ok((output, outcome))
    }
}

/// Transform one class with a rule set
pub fn transform(class_bytes: &[u8], rules: &RuleSet) -> Result<Vec<u8>, Error> {
    AccessTransformer::new(rules).transform(class_bytes)
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Stage {
    NotStarted,
    Members,
    Done,
}

/// Visitor that looks up and applies directives to everything in one class
struct DirectiveApplier<'r> {
    rules: &'r RuleSet,
    owner: String,
    is_interface: bool,
    stage: Stage,
    changed: usize,
    nested: Vec<String>,
    warnings: Vec<String>,
}

impl<'r> DirectiveApplier<'r> {
    /// Rewrite `flags` if there is a matching directive, counting actual changes
    fn apply(&mut self, directive: Option<&Directive>, flags: u16) -> u16 {
        match directive {
            None => flags,
            Some(directive) => {
                let new_flags = rewrite(flags, directive);
                if new_flags != flags {
                    debug!(
                        "{}: '{}' takes {:#06x} ({}) to {:#06x} ({})",
                        self.owner,
                        directive,
                        flags,
                        AccessLevel::from_flags(flags),
                        new_flags,
                        AccessLevel::from_flags(new_flags)
                    );
                    self.changed += 1;
                }
                new_flags
            }
        }
    }

    fn warn(&mut self, message: String) {
        warn!("{}", message);
        self.warnings.push(message);
    }

    fn find_member(
        &mut self,
        kind: MemberKind,
        name: &str,
        descriptor: Option<&str>,
    ) -> Option<&'r Directive> {
        let rules: &'r RuleSet = self.rules;
        let directive = rules.find(&self.owner, kind, name, descriptor)?;
        if self.is_interface && directive.access != AccessLevel::Public {
            self.warn(format!(
                "'{}' makes a member of interface {} {}, which the JVM will reject",
                directive, self.owner, directive.access
            ));
        }
        Some(directive)
    }
}

impl<'r> ClassVisitor for DirectiveApplier<'r> {
    fn visit_class(&mut self, access_flags: ClassAccessFlags, name: &str) -> ClassAccessFlags {
        debug_assert_eq!(self.stage, Stage::NotStarted);
        self.stage = Stage::Members;

        let rules: &'r RuleSet = self.rules;
        let directive = rules.find(name, MemberKind::Class, name, None);
        if let Some(directive) = directive {
            if matches!(directive.access, AccessLevel::Protected | AccessLevel::Private) {
                self.warn(format!(
                    "'{}': class headers can only be public or package-private, {} is only \
                     meaningful on the InnerClasses entry of a nested class",
                    directive, directive.access
                ));
            }
        }
        let flags = self.apply(directive, access_flags.bits());
        ClassAccessFlags::from_bits_retain(flags)
    }

    fn visit_field(
        &mut self,
        access_flags: FieldAccessFlags,
        name: &str,
        _descriptor: &str,
    ) -> FieldAccessFlags {
        debug_assert_eq!(self.stage, Stage::Members);
        let directive = self.find_member(MemberKind::Field, name, None);
        let flags = self.apply(directive, access_flags.bits());
        FieldAccessFlags::from_bits_retain(flags)
    }

    fn visit_method(
        &mut self,
        access_flags: MethodAccessFlags,
        name: &str,
        descriptor: &str,
    ) -> MethodAccessFlags {
        debug_assert_eq!(self.stage, Stage::Members);
        let directive = self.find_member(MemberKind::Method, name, Some(descriptor));
        let flags = self.apply(directive, access_flags.bits());
        MethodAccessFlags::from_bits_retain(flags)
    }

    /// Nested classes are targeted by class directives on their own name
    fn visit_inner_class(
        &mut self,
        access_flags: InnerClassAccessFlags,
        inner_name: &str,
    ) -> InnerClassAccessFlags {
        debug_assert_eq!(self.stage, Stage::Members);
        let rules: &'r RuleSet = self.rules;
        let directive = rules.find(inner_name, MemberKind::Class, inner_name, None);
        if directive.is_some() {
            self.nested.push(inner_name.to_owned());
        }
        let flags = self.apply(directive, access_flags.bits());
        InnerClassAccessFlags::from_bits_retain(flags)
    }

    fn visit_end(&mut self) {
        self.stage = Stage::Done;
    }
}
