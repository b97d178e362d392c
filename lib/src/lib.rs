//! Rewrite the access modifiers of compiled JVM classes
//!
//! Rules are written one per line (see [`at`]) and loaded into an [`at::RuleSet`], which is then
//! used to transform as many class files as needed:
//!
//! ```
//! use access_transformer::at::RuleSet;
//!
//! let rules = RuleSet::from_lines([
//!     "public pkg.TestClass1 a",
//!     "public+f pkg.TestClass1 *",
//!     "protected pkg.TestClass1 <init>(J)V",
//! ])
//! .unwrap();
//! assert_eq!(rules.len(), 3);
//! ```

pub mod at;
pub mod jvm;
pub mod util;
