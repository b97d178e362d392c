use crate::jvm::class_file::{
    ClassConstantIndex, ConstantIndex, Deserialize, Serialize, Utf8ConstantIndex,
};
use crate::jvm::{Error, InnerClassAccessFlags};
use byteorder::{ReadBytesExt, WriteBytesExt};
use std::io::Cursor;

/// Attributes (used in classes, fields, methods, and even on some attributes)
///
/// Attributes are kept as opaque bytes. The only one ever looked inside of is `InnerClasses`,
/// since it carries its own copy of access flags for nested classes.
///
/// [0]: https://docs.oracle.com/javase/specs/jvms/se15/html/jvms-4.html#jvms-4.7
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name_index: Utf8ConstantIndex,
    pub info: Vec<u8>,
}

impl Serialize for Attribute {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        self.name_index.serialize(writer)?;

        // Attribute info length is 4 bytes
        (self.info.len() as u32).serialize(writer)?;
        writer.write_all(&self.info)?;

        Ok(())
    }
}

impl Deserialize for Attribute {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> Result<Self, Error> {
        let name_index = Utf8ConstantIndex::deserialize(reader)?;
        let len = u32::deserialize(reader)?;
        let mut info = vec![0; len as usize];
        reader.read_exact(&mut info)?;
        Ok(Attribute { name_index, info })
    }
}

/// Attributes are all stored in the same way (see `Attribute`), but internally
/// they represent very different things. This trait is implemented by things
/// which can be turned into attributes, and read back out of them.
pub trait AttributeLike: Serialize + Deserialize {
    /// Name of the attribute
    const NAME: &'static str;

    /// Decode the attribute from its info bytes, requiring all of them to be consumed
    fn from_info(info: &[u8]) -> Result<Self, Error> {
        let mut reader = Cursor::new(info);
        let attribute = Self::deserialize(&mut reader)
            .map_err(|_| Error::MalformedAttribute(Self::NAME))?;
        if reader.position() as usize != info.len() {
            return Err(Error::MalformedAttribute(Self::NAME));
        }
        Ok(attribute)
    }

    /// Encode the attribute into info bytes
    fn to_info(&self) -> std::io::Result<Vec<u8>> {
        let mut info = vec![];
        self.serialize(&mut info)?;
        Ok(info)
    }
}

/// [0]: https://docs.oracle.com/javase/specs/jvms/se15/html/jvms-4.html#jvms-4.7.6
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerClasses(pub Vec<InnerClass>);

impl Serialize for InnerClasses {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        self.0.serialize(writer)
    }
}

impl Deserialize for InnerClasses {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> Result<Self, Error> {
        Vec::<InnerClass>::deserialize(reader).map(InnerClasses)
    }
}

impl AttributeLike for InnerClasses {
    const NAME: &'static str = "InnerClasses";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerClass {
    pub inner_class: ClassConstantIndex,

    /// Zero if the class is not a member (eg. local or anonymous classes)
    pub outer_class: ConstantIndex,

    /// Zero if the class is anonymous
    pub inner_name: ConstantIndex,
    pub access_flags: InnerClassAccessFlags,
}

impl Serialize for InnerClass {
    fn serialize<W: WriteBytesExt>(&self, writer: &mut W) -> std::io::Result<()> {
        self.inner_class.serialize(writer)?;
        self.outer_class.serialize(writer)?;
        self.inner_name.serialize(writer)?;
        self.access_flags.serialize(writer)?;
        Ok(())
    }
}

impl Deserialize for InnerClass {
    fn deserialize<R: ReadBytesExt>(reader: &mut R) -> Result<Self, Error> {
        Ok(InnerClass {
            inner_class: ClassConstantIndex::deserialize(reader)?,
            outer_class: ConstantIndex::deserialize(reader)?,
            inner_name: ConstantIndex::deserialize(reader)?,
            access_flags: InnerClassAccessFlags::deserialize(reader)?,
        })
    }
}
