use parser::types::{BaseType, Type};

pub trait TypeExt {
    /// The named type at the bottom of any list and non-null wrappers.
    fn concrete_typename(&self) -> &str;

    /// The same type with the outermost non-null wrapper removed.
    fn nullable_type(&self) -> Type;

    /// The element type when this is a list, ignoring nullability.
    fn list_element(&self) -> Option<&Type>;
}

impl TypeExt for Type {
    fn concrete_typename(&self) -> &str {
        match &self.base {
            BaseType::Named(name) => name.as_str(),
            BaseType::List(ty) => ty.concrete_typename(),
        }
    }

    fn nullable_type(&self) -> Type {
        Type {
            base: self.base.clone(),
            nullable: true,
        }
    }

    fn list_element(&self) -> Option<&Type> {
        match &self.base {
            BaseType::List(ty) => Some(ty),
            BaseType::Named(_) => None,
        }
    }
}
