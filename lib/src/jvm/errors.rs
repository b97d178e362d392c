use thiserror::Error;

/// Ways reading or writing a class file can go wrong
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid magic {0:#010x}: not a class file")]
    BadMagic(u32),

    #[error("Unknown constant pool tag {tag} at index {index}")]
    UnknownConstantTag { tag: u8, index: u16 },

    /// Constant pool declared `count` slots, but the last constant ends past the end
    #[error("Constant pool declares {count} slots but its entries end at {end}")]
    ConstantPoolOverrun { count: u16, end: usize },

    #[error("Constant pool index {index} is not a {expected} constant")]
    BadConstantIndex { index: u16, expected: &'static str },

    #[error("Invalid method handle kind {0}")]
    BadHandleKind(u8),

    #[error("Invalid modified UTF-8 in constant {0}")]
    BadModifiedUtf8(u16),

    #[error("Malformed {0} attribute")]
    MalformedAttribute(&'static str),

    #[error("{0} unexpected trailing bytes after the class file")]
    TrailingBytes(usize),
}
