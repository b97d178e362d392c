use crate::jvm::class_file::{AttributeLike, ClassFile, ConstantLookup, InnerClasses};
use crate::jvm::{
    ClassAccessFlags, Error, FieldAccessFlags, InnerClassAccessFlags, MethodAccessFlags,
};

/// Callbacks invoked while walking the access flags of a class file
///
/// Every callback gets the current flags and returns the flags to write back. Callbacks are
/// invoked in class file order: the class header once, then every field, then every method, then
/// every `InnerClasses` entry, then `visit_end`.
pub trait ClassVisitor {
    /// Visit the class header. `name` is the internal name (eg. `foo/bar/Baz`).
    fn visit_class(&mut self, access_flags: ClassAccessFlags, name: &str) -> ClassAccessFlags;

    fn visit_field(
        &mut self,
        access_flags: FieldAccessFlags,
        name: &str,
        descriptor: &str,
    ) -> FieldAccessFlags;

    /// Visit a method (including constructors, named `<init>`)
    fn visit_method(
        &mut self,
        access_flags: MethodAccessFlags,
        name: &str,
        descriptor: &str,
    ) -> MethodAccessFlags;

    /// Visit an entry of the `InnerClasses` attribute. `inner_name` is the internal name of the
    /// nested class, which need not be this class.
    fn visit_inner_class(
        &mut self,
        access_flags: InnerClassAccessFlags,
        _inner_name: &str,
    ) -> InnerClassAccessFlags {
        access_flags
    }

    fn visit_end(&mut self) {}
}

impl ClassFile {
    /// Walk the class with a visitor, writing back whatever flags it returns
    pub fn accept<V: ClassVisitor>(&mut self, visitor: &mut V) -> Result<(), Error> {
        let constants = &self.constants;

        let name = constants.class_name(self.this_class)?;
        self.access_flags = visitor.visit_class(self.access_flags, &name);

        for field in &mut self.fields {
            let name = constants.utf8(field.name_index)?;
            let descriptor = constants.utf8(field.descriptor_index)?;
            field.access_flags = visitor.visit_field(field.access_flags, &name, &descriptor);
        }

        for method in &mut self.methods {
            let name = constants.utf8(method.name_index)?;
            let descriptor = constants.utf8(method.descriptor_index)?;
            method.access_flags = visitor.visit_method(method.access_flags, &name, &descriptor);
        }

        for attribute in &mut self.attributes {
            if constants.utf8(attribute.name_index)? != InnerClasses::NAME {
                continue;
            }
            let mut inner_classes = InnerClasses::from_info(&attribute.info)?;
            let mut changed = false;
            for inner_class in &mut inner_classes.0 {
                let inner_name = constants.class_name(inner_class.inner_class)?;
                let new_flags = visitor.visit_inner_class(inner_class.access_flags, &inner_name);
                changed |= new_flags != inner_class.access_flags;
                inner_class.access_flags = new_flags;
            }
            if changed {
                attribute.info = inner_classes.to_info()?;
            }
        }

        visitor.visit_end();
        Ok(())
    }
}

/// Parse class bytes, walk them with the visitor, and serialize the result
pub fn visit<V: ClassVisitor>(class_bytes: &[u8], visitor: &mut V) -> Result<Vec<u8>, Error> {
    let mut class_file = ClassFile::parse(class_bytes)?;
    class_file.accept(visitor)?;
    class_file.to_bytes()
}
