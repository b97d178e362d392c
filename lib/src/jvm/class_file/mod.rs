//! Reading and writing the JVM class file format
//!
//! Only as much of the format is modelled as is needed to round trip a class byte for byte while
//! exposing its access flags: the constant pool is fully decoded, attributes stay opaque.

mod attribute;
mod class;
mod constants;
mod field;
mod method;
mod serialize;
mod version;
mod visitor;

pub use attribute::*;
pub use class::*;
pub use constants::*;
pub use field::*;
pub use method::*;
pub use serialize::*;
pub use version::*;
pub use visitor::*;
