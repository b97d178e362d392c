use crate::jvm::class_file::{
    read_constant_pool, Attribute, ClassConstantIndex, Constant, ConstantLookup, Deserialize,
    Field, Method, Serialize, Version,
};
use crate::jvm::{ClassAccessFlags, Error};
use crate::util::OffsetVec;
use byteorder::{ReadBytesExt, WriteBytesExt};
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Representation of the [`class` file format of the JVM][0]
///
/// [0]: https://docs.oracle.com/javase/specs/jvms/se15/html/jvms-4.html
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassFile {
    pub version: Version,
    pub constants: OffsetVec<Constant>,
    pub access_flags: ClassAccessFlags,
    pub this_class: ClassConstantIndex,
    pub super_class: ClassConstantIndex,
    pub interfaces: Vec<ClassConstantIndex>,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
    pub attributes: Vec<Attribute>,
}

impl ClassFile {
    /// Magic header bytes that go at the front of the serialized class file
    const MAGIC: [u8; 4] = [0xCA, 0xFE, 0xBA, 0xBE];

    /// Parse a class file from its bytes
    ///
    /// The whole input must be consumed: trailing bytes are an error.
    pub fn parse(bytes: &[u8]) -> Result<ClassFile, Error> {
        let mut reader = Cursor::new(bytes);
        let class_file = ClassFile::deserialize(&mut reader)?;
        let leftover = bytes.len() - reader.position() as usize;
        if leftover != 0 {
            return Err(Error::TrailingBytes(leftover));
        }
        Ok(class_file)
    }

    /// Encode the class file into bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut bytes = vec![];
        self.serialize(&mut bytes)?;
        Ok(bytes)
    }

    /// Internal name of this class (eg. `java/lang/Object`)
    pub fn this_class_name(&self) -> Result<String, Error> {
        self.constants.class_name(self.this_class)
    }

    pub fn is_interface(&self) -> bool {
        self.access_flags.contains(ClassAccessFlags::INTERFACE)
    }

    /// Save the class file to disk
    pub fn save_to_path<P: AsRef<Path>>(
        &self,
        path: P,
        create_missing_directories: bool,
    ) -> std::io::Result<()> {
        let path = path.as_ref();
        if create_missing_directories {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut class_file = fs::File::create(path)?;
        self.serialize(&mut class_file)
    }
}

impl Serialize for ClassFile {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&ClassFile::MAGIC)?;
        self.version.serialize(writer)?;
        self.constants.serialize(writer)?;
        self.access_flags.serialize(writer)?;
        self.this_class.serialize(writer)?;
        self.super_class.serialize(writer)?;
        self.interfaces.serialize(writer)?;
        self.fields.serialize(writer)?;
        self.methods.serialize(writer)?;
        self.attributes.serialize(writer)?;
        Ok(())
    }
}

impl Deserialize for ClassFile {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> Result<Self, Error> {
        let magic = u32::deserialize(reader)?;
        if magic != u32::from_be_bytes(ClassFile::MAGIC) {
            return Err(Error::BadMagic(magic));
        }
        Ok(ClassFile {
            version: Version::deserialize(reader)?,
            constants: read_constant_pool(reader)?,
            access_flags: ClassAccessFlags::deserialize(reader)?,
            this_class: ClassConstantIndex::deserialize(reader)?,
            super_class: ClassConstantIndex::deserialize(reader)?,
            interfaces: Vec::<ClassConstantIndex>::deserialize(reader)?,
            fields: Vec::<Field>::deserialize(reader)?,
            methods: Vec::<Method>::deserialize(reader)?,
            attributes: Vec::<Attribute>::deserialize(reader)?,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::jvm::class_file::{
        AttributeLike, ConstantIndex, ConstantsPool, InnerClass, InnerClasses,
    };
    use crate::jvm::{FieldAccessFlags, InnerClassAccessFlags, MethodAccessFlags};

    fn sample_class() -> ClassFile {
        let mut pool = ConstantsPool::new();
        let this_class = pool.get_class("pkg/Sample").unwrap();
        let super_class = pool.get_class("java/lang/Object").unwrap();
        let nested = pool.get_class("pkg/Sample$Nested").unwrap();
        let field_name = pool.get_utf8("count").unwrap();
        let field_descriptor = pool.get_utf8("J").unwrap();
        let init_name = pool.get_utf8("<init>").unwrap();
        let init_descriptor = pool.get_utf8("()V").unwrap();
        let inner_classes_name = pool.get_utf8(InnerClasses::NAME).unwrap();
        pool.push_constant(Constant::Long(-1)).unwrap();
        let inner_classes = InnerClasses(vec![InnerClass {
            inner_class: nested,
            outer_class: this_class.0,
            inner_name: ConstantIndex(0),
            access_flags: InnerClassAccessFlags::PRIVATE | InnerClassAccessFlags::STATIC,
        }]);

        ClassFile {
            version: Version::JAVA8,
            constants: pool.into_offset_vec(),
            access_flags: ClassAccessFlags::PUBLIC | ClassAccessFlags::SUPER,
            this_class,
            super_class,
            interfaces: vec![],
            fields: vec![Field {
                access_flags: FieldAccessFlags::PRIVATE | FieldAccessFlags::from_bits_retain(0x0800),
                name_index: field_name,
                descriptor_index: field_descriptor,
                attributes: vec![],
            }],
            methods: vec![Method {
                access_flags: MethodAccessFlags::PUBLIC,
                name_index: init_name,
                descriptor_index: init_descriptor,
                attributes: vec![Attribute {
                    name_index: field_name,
                    info: vec![1, 2, 3],
                }],
            }],
            attributes: vec![Attribute {
                name_index: inner_classes_name,
                info: inner_classes.to_info().unwrap(),
            }],
        }
    }

    #[test]
    fn round_trip_is_byte_exact() {
        let class = sample_class();
        let bytes = class.to_bytes().unwrap();
        assert_eq!(&bytes[..4], &[0xCA, 0xFE, 0xBA, 0xBE]);

        let parsed = ClassFile::parse(&bytes).unwrap();
        assert_eq!(parsed, class);
        assert_eq!(parsed.to_bytes().unwrap(), bytes);
    }

    #[test]
    fn reserved_flag_bits_survive() {
        let bytes = sample_class().to_bytes().unwrap();
        let parsed = ClassFile::parse(&bytes).unwrap();
        assert_eq!(parsed.fields[0].access_flags.bits(), 0x0802);
    }

    #[test]
    fn names_are_resolved() {
        let class = sample_class();
        assert_eq!(class.this_class_name().unwrap(), "pkg/Sample");
        assert!(!class.is_interface());
    }

    #[test]
    fn bad_magic_is_rejected() {
        let mut bytes = sample_class().to_bytes().unwrap();
        bytes[0] = 0xCB;
        assert!(matches!(
            ClassFile::parse(&bytes),
            Err(Error::BadMagic(0xCBFE_BABE))
        ));
    }

    #[test]
    fn trailing_and_missing_bytes_are_rejected() {
        let mut bytes = sample_class().to_bytes().unwrap();
        bytes.push(0);
        assert!(matches!(ClassFile::parse(&bytes), Err(Error::TrailingBytes(1))));

        bytes.truncate(bytes.len() - 3);
        assert!(matches!(ClassFile::parse(&bytes), Err(Error::IoError(_))));
    }
}
