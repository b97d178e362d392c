use crate::jvm::class_file::{Deserialize, Serialize};
use crate::jvm::Error;
use crate::util::{Offset, OffsetVec, Width};
use byteorder::{ReadBytesExt, WriteBytesExt};
use std::borrow::{Borrow, Cow};
use std::collections::HashMap;
use std::result::Result;

/// Class file constants pool builder
///
/// The pool is append only and only after the pool is fully built up, it can be consumed into a
/// regular [`OffsetVec`]. Parsed class files never go through here: their pool is read directly
/// with [`read_constant_pool`].
pub struct ConstantsPool {
    constants: OffsetVec<Constant>,

    classes: HashMap<Utf8ConstantIndex, ClassConstantIndex>,
    utf8s: HashMap<String, Utf8ConstantIndex>,
}

impl ConstantsPool {
    /// Make a fresh empty constants pool
    pub fn new() -> ConstantsPool {
        ConstantsPool {
            constants: OffsetVec::new_starting_at(Offset(1)),
            classes: HashMap::new(),
            utf8s: HashMap::new(),
        }
    }

    /// Push a constant into the constant pool, provided there is space for it
    ///
    /// Note: the largest valid index is 65535, indexing starts at 1, and some constants take two
    /// spaces.
    pub fn push_constant(&mut self, constant: Constant) -> Result<ConstantIndex, ConstantPoolOverflow> {
        // Compute the offset at which this constant will be inserted
        let offset: u16 = self.constants.offset_len().0 as u16;

        // Detect if the next constant would overflow the pool
        if offset.checked_add(constant.width() as u16).is_none() {
            return Err(ConstantPoolOverflow { constant, offset });
        }

        self.constants.push(constant);
        Ok(ConstantIndex(offset))
    }

    /// Consume the pool and return the final vector of constants
    pub fn into_offset_vec(self) -> OffsetVec<Constant> {
        self.constants
    }

    /// Get or insert a utf8 constant from the constant pool
    pub fn get_utf8<'a, S: Into<Cow<'a, str>>>(
        &mut self,
        utf8: S,
    ) -> Result<Utf8ConstantIndex, ConstantPoolOverflow> {
        let cow = utf8.into();

        if let Some(idx) = self.utf8s.get::<str>(cow.borrow()) {
            Ok(*idx)
        } else {
            let owned = cow.into_owned();
            let constant = Constant::Utf8(encode_modified_utf8(&owned));
            let idx = Utf8ConstantIndex(self.push_constant(constant)?);
            self.utf8s.insert(owned, idx);
            Ok(idx)
        }
    }

    /// Get or insert a class constant (named in the internal `foo/bar/Baz` form)
    pub fn get_class<'a, S: Into<Cow<'a, str>>>(
        &mut self,
        class_name: S,
    ) -> Result<ClassConstantIndex, ConstantPoolOverflow> {
        let name = self.get_utf8(class_name)?;
        if let Some(idx) = self.classes.get(&name) {
            Ok(*idx)
        } else {
            let idx = ClassConstantIndex(self.push_constant(Constant::Class(name))?);
            self.classes.insert(name, idx);
            Ok(idx)
        }
    }
}

impl Default for ConstantsPool {
    fn default() -> Self {
        ConstantsPool::new()
    }
}

#[derive(Debug)]
pub struct ConstantPoolOverflow {
    pub constant: Constant,
    pub offset: u16,
}

/// Constants as in the constant pool
///
/// Everything is kept exactly as it was read so that an unmodified pool serializes back to the
/// same bytes. In particular, floating point constants are kept as their raw bits and UTF-8
/// constants as their raw modified UTF-8 bytes.
///
/// [0]: https://docs.oracle.com/javase/specs/jvms/se21/html/jvms-4.html#jvms-4.4
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constant {
    /// Class or an interface
    Class(Utf8ConstantIndex),

    /// Field
    FieldRef(ClassConstantIndex, NameAndTypeConstantIndex),

    /// Method (this combines `Methodref` and `InterfaceMethodref`)
    MethodRef {
        class: ClassConstantIndex,
        name_and_type: NameAndTypeConstantIndex,
        is_interface: bool,
    },

    /// Constant object of type `java.lang.String`
    String(Utf8ConstantIndex),

    /// Constant primitive of type `int`
    Integer(i32),

    /// Constant primitive of type `float`, as raw IEEE 754 bits
    Float(u32),

    /// Constant primitive of type `long`
    Long(i64),

    /// Constant primitive of type `double`, as raw IEEE 754 bits
    Double(u64),

    /// Name and a type (eg. for a field or a method)
    NameAndType {
        name: Utf8ConstantIndex,
        descriptor: Utf8ConstantIndex,
    },

    /// Constant raw string value, in modified UTF-8
    ///
    /// Use [`decode_modified_utf8`] to get at the string. Not every sequence of bytes here is
    /// valid Rust string data (eg. unpaired surrogates), which is why this stays undecoded.
    Utf8(Vec<u8>),

    /// Constant object of type `java.lang.invoke.MethodHandle`
    MethodHandle {
        handle_kind: HandleKind,
        member: ConstantIndex,
    },

    /// Method type
    MethodType { descriptor: Utf8ConstantIndex },

    /// Dynamically-computed constant
    Dynamic {
        /// Index into the `BootstrapMethods` attribute
        bootstrap_method: u16,
        name_and_type: NameAndTypeConstantIndex,
    },

    /// Dynamically-computed call site
    InvokeDynamic {
        /// Index into the `BootstrapMethods` attribute
        bootstrap_method: u16,
        method_descriptor: NameAndTypeConstantIndex,
    },

    /// Module (only in `module-info` classes)
    Module(Utf8ConstantIndex),

    /// Package exported or opened by a module
    Package(Utf8ConstantIndex),
}

impl Serialize for Constant {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        match self {
            Constant::Utf8(bytes) => {
                1u8.serialize(writer)?;
                (bytes.len() as u16).serialize(writer)?;
                writer.write_all(bytes)?;
            }
            Constant::Integer(integer) => {
                3u8.serialize(writer)?;
                integer.serialize(writer)?;
            }
            Constant::Float(bits) => {
                4u8.serialize(writer)?;
                bits.serialize(writer)?;
            }
            Constant::Long(long) => {
                5u8.serialize(writer)?;
                long.serialize(writer)?;
            }
            Constant::Double(bits) => {
                6u8.serialize(writer)?;
                bits.serialize(writer)?;
            }
            Constant::Class(name) => {
                7u8.serialize(writer)?;
                name.serialize(writer)?;
            }
            Constant::String(bytes) => {
                8u8.serialize(writer)?;
                bytes.serialize(writer)?;
            }
            Constant::FieldRef(class, name_and_type) => {
                9u8.serialize(writer)?;
                class.serialize(writer)?;
                name_and_type.serialize(writer)?;
            }
            Constant::MethodRef {
                class,
                name_and_type,
                is_interface,
            } => {
                (if !is_interface { 10u8 } else { 11u8 }).serialize(writer)?;
                class.serialize(writer)?;
                name_and_type.serialize(writer)?;
            }
            Constant::NameAndType { name, descriptor } => {
                12u8.serialize(writer)?;
                name.serialize(writer)?;
                descriptor.serialize(writer)?;
            }
            Constant::MethodHandle {
                handle_kind,
                member,
            } => {
                15u8.serialize(writer)?;
                handle_kind.serialize(writer)?;
                member.serialize(writer)?;
            }
            Constant::MethodType { descriptor } => {
                16u8.serialize(writer)?;
                descriptor.serialize(writer)?;
            }
            Constant::Dynamic {
                bootstrap_method,
                name_and_type,
            } => {
                17u8.serialize(writer)?;
                bootstrap_method.serialize(writer)?;
                name_and_type.serialize(writer)?;
            }
            Constant::InvokeDynamic {
                bootstrap_method,
                method_descriptor,
            } => {
                18u8.serialize(writer)?;
                bootstrap_method.serialize(writer)?;
                method_descriptor.serialize(writer)?;
            }
            Constant::Module(name) => {
                19u8.serialize(writer)?;
                name.serialize(writer)?;
            }
            Constant::Package(name) => {
                20u8.serialize(writer)?;
                name.serialize(writer)?;
            }
        };
        Ok(())
    }
}

impl Constant {
    /// Read one constant, which will end up at `index` in the pool (used for error reporting)
    fn deserialize_at<R: ReadBytesExt>(reader: &mut R, index: u16) -> Result<Constant, Error> {
        let tag = u8::deserialize(reader)?;
        let constant = match tag {
            1 => {
                let len = u16::deserialize(reader)?;
                let mut bytes = vec![0; len as usize];
                reader.read_exact(&mut bytes)?;
                Constant::Utf8(bytes)
            }
            3 => Constant::Integer(i32::deserialize(reader)?),
            4 => Constant::Float(u32::deserialize(reader)?),
            5 => Constant::Long(i64::deserialize(reader)?),
            6 => Constant::Double(u64::deserialize(reader)?),
            7 => Constant::Class(Utf8ConstantIndex::deserialize(reader)?),
            8 => Constant::String(Utf8ConstantIndex::deserialize(reader)?),
            9 => Constant::FieldRef(
                ClassConstantIndex::deserialize(reader)?,
                NameAndTypeConstantIndex::deserialize(reader)?,
            ),
            10 | 11 => Constant::MethodRef {
                class: ClassConstantIndex::deserialize(reader)?,
                name_and_type: NameAndTypeConstantIndex::deserialize(reader)?,
                is_interface: tag == 11,
            },
            12 => Constant::NameAndType {
                name: Utf8ConstantIndex::deserialize(reader)?,
                descriptor: Utf8ConstantIndex::deserialize(reader)?,
            },
            15 => Constant::MethodHandle {
                handle_kind: HandleKind::deserialize(reader)?,
                member: ConstantIndex::deserialize(reader)?,
            },
            16 => Constant::MethodType {
                descriptor: Utf8ConstantIndex::deserialize(reader)?,
            },
            17 => Constant::Dynamic {
                bootstrap_method: u16::deserialize(reader)?,
                name_and_type: NameAndTypeConstantIndex::deserialize(reader)?,
            },
            18 => Constant::InvokeDynamic {
                bootstrap_method: u16::deserialize(reader)?,
                method_descriptor: NameAndTypeConstantIndex::deserialize(reader)?,
            },
            19 => Constant::Module(Utf8ConstantIndex::deserialize(reader)?),
            20 => Constant::Package(Utf8ConstantIndex::deserialize(reader)?),
            _ => return Err(Error::UnknownConstantTag { tag, index }),
        };
        Ok(constant)
    }
}

/// Almost all constants have width 1, except for `Constant::Long` and `Constant::Double`. Quoting
/// the JVM specification:
///
/// > All 8-byte constants take up two entries in the constant_pool table of the class file. If a
/// > CONSTANT_Long_info or CONSTANT_Double_info structure is the item in the constant_pool table
/// > at index n, then the next usable item in the pool is located at index n+2. The constant_pool
/// > index n+1 must be valid but is considered unusable.
impl Width for Constant {
    fn width(&self) -> usize {
        match self {
            Constant::Long(_) | Constant::Double(_) => 2,
            _ => 1,
        }
    }
}

/// The pool count written is the offset of the next free slot, which (since offsets start at 1)
/// is exactly the `constant_pool_count` the format wants
impl Serialize for OffsetVec<Constant> {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        (self.offset_len().0 as u16).serialize(writer)?;
        for (_, _, constant) in self {
            constant.serialize(writer)?;
        }
        Ok(())
    }
}

/// Read a `constant_pool_count` followed by the constants themselves
pub fn read_constant_pool<R: ReadBytesExt>(reader: &mut R) -> Result<OffsetVec<Constant>, Error> {
    let count = u16::deserialize(reader)?;
    let mut constants = OffsetVec::new_starting_at(Offset(1));
    while constants.offset_len().0 < count as usize {
        let index = constants.offset_len().0 as u16;
        constants.push(Constant::deserialize_at(reader, index)?);
    }
    if constants.offset_len().0 != count as usize {
        return Err(Error::ConstantPoolOverrun {
            count,
            end: constants.offset_len().0,
        });
    }
    Ok(constants)
}

/// Typed lookups into a constant pool
pub trait ConstantLookup {
    /// Decode the UTF-8 constant at some index
    fn utf8(&self, index: Utf8ConstantIndex) -> Result<String, Error>;

    /// Get the internal name (eg. `java/lang/Object`) of the class constant at some index
    fn class_name(&self, index: ClassConstantIndex) -> Result<String, Error>;
}

impl ConstantLookup for OffsetVec<Constant> {
    fn utf8(&self, index: Utf8ConstantIndex) -> Result<String, Error> {
        let raw = (index.0).0;
        match self.get_offset(Offset(raw as usize)).ok() {
            Some(Constant::Utf8(bytes)) => {
                decode_modified_utf8(bytes).ok_or(Error::BadModifiedUtf8(raw))
            }
            _ => Err(Error::BadConstantIndex {
                index: raw,
                expected: "Utf8",
            }),
        }
    }

    fn class_name(&self, index: ClassConstantIndex) -> Result<String, Error> {
        let raw = (index.0).0;
        match self.get_offset(Offset(raw as usize)).ok() {
            Some(Constant::Class(name)) => self.utf8(*name),
            _ => Err(Error::BadConstantIndex {
                index: raw,
                expected: "Class",
            }),
        }
    }
}

#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug)]
pub struct ConstantIndex(pub u16);

#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug)]
pub struct Utf8ConstantIndex(pub ConstantIndex);

#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug)]
pub struct ClassConstantIndex(pub ConstantIndex);

#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug)]
pub struct NameAndTypeConstantIndex(pub ConstantIndex);

impl From<Utf8ConstantIndex> for ConstantIndex {
    fn from(index: Utf8ConstantIndex) -> ConstantIndex {
        index.0
    }
}

impl From<ClassConstantIndex> for ConstantIndex {
    fn from(index: ClassConstantIndex) -> ConstantIndex {
        index.0
    }
}

impl From<NameAndTypeConstantIndex> for ConstantIndex {
    fn from(index: NameAndTypeConstantIndex) -> ConstantIndex {
        index.0
    }
}

impl Serialize for ConstantIndex {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        self.0.serialize(writer)
    }
}

impl Serialize for Utf8ConstantIndex {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        self.0.serialize(writer)
    }
}

impl Serialize for ClassConstantIndex {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        self.0.serialize(writer)
    }
}

impl Serialize for NameAndTypeConstantIndex {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        self.0.serialize(writer)
    }
}

impl Deserialize for ConstantIndex {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> Result<Self, Error> {
        u16::deserialize(reader).map(ConstantIndex)
    }
}

impl Deserialize for Utf8ConstantIndex {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> Result<Self, Error> {
        ConstantIndex::deserialize(reader).map(Utf8ConstantIndex)
    }
}

impl Deserialize for ClassConstantIndex {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> Result<Self, Error> {
        ConstantIndex::deserialize(reader).map(ClassConstantIndex)
    }
}

impl Deserialize for NameAndTypeConstantIndex {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> Result<Self, Error> {
        ConstantIndex::deserialize(reader).map(NameAndTypeConstantIndex)
    }
}

/// Type of method handle
///
/// [0]: https://docs.oracle.com/javase/specs/jvms/se15/html/jvms-5.html#jvms-5.4.3.5-220
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum HandleKind {
    GetField,
    GetStatic,
    PutField,
    PutStatic,
    InvokeVirtual,
    InvokeStatic,
    InvokeSpecial,
    NewInvokeSpecial,
    InvokeInterface,
}

impl Serialize for HandleKind {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        let byte: u8 = match self {
            HandleKind::GetField => 1,
            HandleKind::GetStatic => 2,
            HandleKind::PutField => 3,
            HandleKind::PutStatic => 4,
            HandleKind::InvokeVirtual => 5,
            HandleKind::InvokeStatic => 6,
            HandleKind::InvokeSpecial => 7,
            HandleKind::NewInvokeSpecial => 8,
            HandleKind::InvokeInterface => 9,
        };
        byte.serialize(writer)
    }
}

impl Deserialize for HandleKind {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> Result<Self, Error> {
        let kind = match u8::deserialize(reader)? {
            1 => HandleKind::GetField,
            2 => HandleKind::GetStatic,
            3 => HandleKind::PutField,
            4 => HandleKind::PutStatic,
            5 => HandleKind::InvokeVirtual,
            6 => HandleKind::InvokeStatic,
            7 => HandleKind::InvokeSpecial,
            8 => HandleKind::NewInvokeSpecial,
            9 => HandleKind::InvokeInterface,
            other => return Err(Error::BadHandleKind(other)),
        };
        Ok(kind)
    }
}

/// Modified UTF-8 format used in class files.
///
/// See [this `DataInput` section for details][0]. Quoting from that section:
///
/// > The differences between this format and the standard UTF-8 format are the following:
/// >
/// >  * The null byte `\u0000` is encoded in 2-byte format rather than 1-byte, so that the encoded
/// >    strings never have embedded nulls.
/// >  * Only the 1-byte, 2-byte, and 3-byte formats are used.
/// >  * Supplementary characters are represented in the form of surrogate pairs.
///
/// [0]: https://docs.oracle.com/en/java/javase/17/docs/api/java.base/java/io/DataInput.html#modified-utf-8
pub fn encode_modified_utf8(string: &str) -> Vec<u8> {
    let mut buffer: Vec<u8> = vec![];
    for c in string.chars() {
        // Handle the exception for how `\u{0000}` is represented
        let len: usize = if c == '\u{0000}' { 2 } else { c.len_utf8() };
        let code: u32 = c as u32;

        match len {
            1 => buffer.push(code as u8),
            2 => {
                buffer.push((code >> 6 & 0x1F) as u8 | 0b1100_0000);
                buffer.push((code & 0x3F) as u8 | 0b1000_0000);
            }
            3 => {
                buffer.push((code >> 12 & 0x0F) as u8 | 0b1110_0000);
                buffer.push((code >> 6 & 0x3F) as u8 | 0b1000_0000);
                buffer.push((code & 0x3F) as u8 | 0b1000_0000);
            }

            // Supplementary characters: main divergence from unicode
            _ => {
                buffer.push(0b1110_1101);
                buffer.push(((code >> 16 & 0x0F) as u8).wrapping_sub(1) & 0x0F | 0b1010_0000);
                buffer.push((code >> 10 & 0x3F) as u8 | 0b1000_0000);

                buffer.push(0b1110_1101);
                buffer.push(((code >> 6 & 0x0F) as u8) | 0b1011_0000);
                buffer.push((code & 0x3F) as u8 | 0b1000_0000);
            }
        }
    }
    buffer
}

/// Decode modified UTF-8 (see [`encode_modified_utf8`])
///
/// Returns `None` on malformed input, including surrogates that don't pair up.
pub fn decode_modified_utf8(bytes: &[u8]) -> Option<String> {
    let continuation = |byte: Option<&u8>| -> Option<u16> {
        match byte {
            Some(b) if b & 0b1100_0000 == 0b1000_0000 => Some((b & 0x3F) as u16),
            _ => None,
        }
    };

    let mut units: Vec<u16> = Vec::with_capacity(bytes.len());
    let mut iter = bytes.iter();
    while let Some(&byte) = iter.next() {
        let unit = match byte {
            0x01..=0x7F => byte as u16,
            0xC0..=0xDF => {
                let low = continuation(iter.next())?;
                ((byte & 0x1F) as u16) << 6 | low
            }
            0xE0..=0xEF => {
                let mid = continuation(iter.next())?;
                let low = continuation(iter.next())?;
                ((byte & 0x0F) as u16) << 12 | mid << 6 | low
            }
            _ => return None,
        };
        units.push(unit);
    }

    char::decode_utf16(units).collect::<Result<String, _>>().ok()
}

#[cfg(test)]
mod modified_utf8_tests {
    use super::*;

    #[test]
    fn containing_null_byte() {
        assert_eq!(encode_modified_utf8("a\x00a"), vec![97, 192, 128, 97]);
        assert_eq!(
            decode_modified_utf8(&[97, 192, 128, 97]).as_deref(),
            Some("a\x00a")
        );
    }

    #[test]
    fn simple_ascii() {
        assert_eq!(encode_modified_utf8("foo"), vec![102, 111, 111]);
        assert_eq!(
            decode_modified_utf8(b"java/lang/String").as_deref(),
            Some("java/lang/String")
        );
    }

    #[test]
    fn two_and_three_byte_encodings() {
        let text = "ĄǍǞǠǺȀȂȦȺӐӒऄअॲঅਅઅଅஅఅಅഅะະ༁ཨ";
        assert_eq!(
            encode_modified_utf8("ĄǍ"),
            vec![196, 132, 199, 141]
        );
        assert_eq!(
            decode_modified_utf8(&encode_modified_utf8(text)).as_deref(),
            Some(text)
        );
    }

    #[test]
    fn supplementary_characters() {
        let encoded = vec![
            237, 160, 128, 237, 176, 128, 237, 172, 191, 237, 191, 191, 237, 175, 191, 237, 191,
            191,
        ];
        assert_eq!(encode_modified_utf8("\u{10000}\u{dffff}\u{10FFFF}"), encoded);
        assert_eq!(
            decode_modified_utf8(&encoded).as_deref(),
            Some("\u{10000}\u{dffff}\u{10FFFF}")
        );
    }

    #[test]
    fn rejects_malformed_input() {
        // Raw null byte
        assert_eq!(decode_modified_utf8(&[0]), None);

        // Four byte form
        assert_eq!(decode_modified_utf8(&[0xF0, 0x9F, 0x98, 0x80]), None);

        // Truncated two byte form
        assert_eq!(decode_modified_utf8(&[0xC4]), None);

        // Unpaired high surrogate
        assert_eq!(decode_modified_utf8(&[237, 160, 128]), None);
    }
}

#[cfg(test)]
mod pool_tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn wide_constants_take_two_slots() {
        let mut pool = ConstantsPool::new();
        let before = pool.get_utf8("before").unwrap();
        let long = pool.push_constant(Constant::Long(42)).unwrap();
        let after = pool.get_class("after/Klass").unwrap();

        assert_eq!(before, Utf8ConstantIndex(ConstantIndex(1)));
        assert_eq!(long, ConstantIndex(2));
        // `after/Klass` utf8 lands at 4, its class constant right after
        assert_eq!(after, ClassConstantIndex(ConstantIndex(5)));

        let constants = pool.into_offset_vec();
        assert_eq!(constants.offset_len(), Offset(6));
        assert_eq!(constants.class_name(after).unwrap(), "after/Klass");
    }

    #[test]
    fn utf8_and_class_constants_are_deduplicated() {
        let mut pool = ConstantsPool::new();
        let first = pool.get_class("a/B").unwrap();
        let second = pool.get_class("a/B").unwrap();
        let utf8 = pool.get_utf8("a/B").unwrap();
        assert_eq!(first, second);
        assert_eq!(utf8, Utf8ConstantIndex(ConstantIndex(1)));
        assert_eq!(pool.into_offset_vec().len(), 2);
    }

    #[test]
    fn pool_round_trips_byte_for_byte() {
        let mut pool = ConstantsPool::new();
        let name = pool.get_utf8("value").unwrap();
        let descriptor = pool.get_utf8("D").unwrap();
        pool.push_constant(Constant::Double(f64::NAN.to_bits() | 1)).unwrap();
        pool.push_constant(Constant::Float(0x7FC0_0001)).unwrap();
        pool.push_constant(Constant::NameAndType { name, descriptor })
            .unwrap();
        pool.push_constant(Constant::Utf8(vec![237, 160, 128])).unwrap();
        let constants = pool.into_offset_vec();

        let mut bytes = vec![];
        constants.serialize(&mut bytes).unwrap();
        let parsed = read_constant_pool(&mut Cursor::new(&bytes[..])).unwrap();
        assert_eq!(parsed, constants);

        let mut reserialized = vec![];
        parsed.serialize(&mut reserialized).unwrap();
        assert_eq!(reserialized, bytes);
    }

    #[test]
    fn lookups_check_constant_kinds() {
        let mut pool = ConstantsPool::new();
        let utf8 = pool.get_utf8("x").unwrap();
        pool.push_constant(Constant::Utf8(vec![0xFF])).unwrap();
        let constants = pool.into_offset_vec();

        assert!(matches!(
            constants.class_name(ClassConstantIndex(utf8.0)),
            Err(Error::BadConstantIndex { index: 1, .. })
        ));
        assert!(matches!(
            constants.utf8(Utf8ConstantIndex(ConstantIndex(2))),
            Err(Error::BadModifiedUtf8(2))
        ));
        assert!(matches!(
            constants.utf8(Utf8ConstantIndex(ConstantIndex(7))),
            Err(Error::BadConstantIndex { index: 7, .. })
        ));
    }

    #[test]
    fn unknown_tags_are_rejected() {
        // count = 2, then a constant with tag 2 (unused by the format)
        let bytes = [0u8, 2, 2, 0, 0];
        assert!(matches!(
            read_constant_pool(&mut Cursor::new(&bytes[..])),
            Err(Error::UnknownConstantTag { tag: 2, index: 1 })
        ));
    }

    #[test]
    fn long_overrunning_the_pool_is_rejected() {
        // count = 2 leaves room for one narrow constant, but a long needs two
        let bytes = [0u8, 2, 5, 0, 0, 0, 0, 0, 0, 0, 1];
        assert!(matches!(
            read_constant_pool(&mut Cursor::new(&bytes[..])),
            Err(Error::ConstantPoolOverrun { count: 2, end: 3 })
        ));
    }
}
