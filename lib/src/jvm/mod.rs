//! Read, inspect, and write back JVM classes
//!
//! ### Simple example
//!
//! Consider the following simple Java class:
//!
//! ```java,ignore,no_run
//! public class Point {
//!     private int x;
//! }
//! ```
//!
//! Building an analogous class file and then reading its field back out can be done as follows:
//!
//! ```
//! use access_transformer::jvm::class_file::{ClassFile, ConstantLookup, ConstantsPool, Field, Version};
//! use access_transformer::jvm::*;
//!
//! # fn generate_class() -> Result<(), Error> {
//! let mut pool = ConstantsPool::new();
//! let this_class = pool.get_class("me/alec/Point").unwrap();
//! let super_class = pool.get_class("java/lang/Object").unwrap();
//! let x = pool.get_utf8("x").unwrap();
//! let int = pool.get_utf8("I").unwrap();
//!
//! let class_file = ClassFile {
//!     version: Version::JAVA8,
//!     constants: pool.into_offset_vec(),
//!     access_flags: ClassAccessFlags::PUBLIC | ClassAccessFlags::SUPER,
//!     this_class,
//!     super_class,
//!     interfaces: vec![],
//!     fields: vec![Field {
//!         access_flags: FieldAccessFlags::PRIVATE,
//!         name_index: x,
//!         descriptor_index: int,
//!         attributes: vec![],
//!     }],
//!     methods: vec![],
//!     attributes: vec![],
//! };
//!
//! // Encode the class into bytes, then decode it again
//! let class_bytes: Vec<u8> = class_file.to_bytes()?;
//! let parsed = ClassFile::parse(&class_bytes)?;
//! assert_eq!(parsed.this_class_name()?, "me/alec/Point");
//! assert_eq!(parsed.constants.utf8(parsed.fields[0].name_index)?, "x");
//! # Ok(())
//! # }
//! # generate_class().unwrap();
//! ```

mod access_flags;
pub mod class_file;
mod descriptors;
mod errors;
mod names;

pub use access_flags::*;
pub use descriptors::*;
pub use errors::*;
pub use names::*;
