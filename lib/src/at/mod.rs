//! Access transformers: rules that change the visibility of classes and their members
//!
//! Every rule is one line of the form
//!
//! ```text
//! <access>[+f|-f]* <owner> [<member>]
//! ```
//!
//! - `access` is one of `public`, `protected`, `default` (package-private) or `private`. It can
//!   be followed by `+f` or `-f` to set or clear `final`.
//! - `owner` is the class, written like `pkg.Outer$Inner` or `pkg/Outer$Inner`.
//! - `member` is a field name, a method name followed by its descriptor (eg. `<init>(J)V` or
//!   `h(Ljava/lang/String;)V`), `*` for all fields, or `*()` for all methods. Leaving it off
//!   targets the class itself.
//!
//! Rule files may have blank lines and `#` comments. When several rules apply to the same member,
//! a rule naming the member beats a wildcard, and otherwise the last rule wins.

mod access;
mod directive;
mod errors;
mod loader;
mod modifier;
mod parser;
mod rewrite;
mod rule_set;
mod transformer;

pub use access::*;
pub use directive::*;
pub use errors::*;
pub use modifier::*;
pub use parser::*;
pub use rewrite::*;
pub use rule_set::*;
pub use transformer::*;
