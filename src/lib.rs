#![forbid(unsafe_code)]

mod config;
mod validator;

pub use config::{Config, RulesConfig};
pub use graphcheck_schema::{
    builtin_scalar_parser, MetaDirective, MetaField, MetaInputValue, MetaType, ScalarParser,
    Schema, SchemaError, TypeKind,
};
pub use graphcheck_validation::{
    check_rules, validate, Definition, Document, ErrorCode, Rule, RuleSet, ValidationError,
    ValidationResult,
};
pub use validator::Validator;
pub use value::{ConstValue, Variables};
