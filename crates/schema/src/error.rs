use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Failed to parse schema: {0}")]
    Parse(#[from] parser::Error),

    #[error("Root operation type '{type_name}' is not defined.")]
    UnknownRootType { type_name: String },

    #[error("Root operation type '{type_name}' must be an object type.")]
    RootTypeNotObject { type_name: String },
}
