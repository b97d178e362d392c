use crate::at::Directive;
use crate::jvm::VISIBILITY_MASK;

/// Compute the access flags a directive gives a member that currently has `original`
///
/// Only the visibility bits and the bits of toggled modifiers are touched. Everything else
/// (`static`, `synthetic`, `interface`, reserved bits, ...) is passed through as is.
pub fn rewrite(original: u16, directive: &Directive) -> u16 {
    let flags = (original & !VISIBILITY_MASK) | directive.access.flag();
    directive
        .toggles
        .iter()
        .fold(flags, |flags, toggle| toggle.apply(flags))
}
