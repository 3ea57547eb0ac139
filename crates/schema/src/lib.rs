#![forbid(unsafe_code)]

mod error;
mod scalar;
mod schema;
mod type_ext;

pub use error::SchemaError;
pub use scalar::{builtin_scalar_parser, ScalarParser};
pub use schema::{
    Deprecation, MetaDirective, MetaEnumValue, MetaField, MetaInputValue, MetaType, Schema,
    TypeKind,
};
pub use type_ext::TypeExt;
