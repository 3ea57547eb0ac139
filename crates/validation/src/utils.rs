use std::fmt::{Display, Formatter, Result as FmtResult};

use graphcheck_schema::{Schema, TypeKind};
use parser::types::{BaseType, Type};
use value::{ConstValue, Value, Variables};

use crate::error::ErrorCode;

#[derive(Debug, Copy, Clone)]
pub enum PathSegment<'a> {
    Name(&'a str),
    Index(usize),
}

/// Location of a nested value inside an argument or variable, printed as `name.0.field`.
#[derive(Debug, Copy, Clone)]
pub struct PathNode<'a> {
    pub parent: Option<&'a PathNode<'a>>,
    pub segment: PathSegment<'a>,
}

impl<'a> PathNode<'a> {
    pub fn new(name: &'a str) -> Self {
        PathNode {
            parent: None,
            segment: PathSegment::Name(name),
        }
    }

    pub fn index(&'a self, idx: usize) -> Self {
        Self {
            parent: Some(self),
            segment: PathSegment::Index(idx),
        }
    }

    pub fn name(&'a self, name: &'a str) -> Self {
        Self {
            parent: Some(self),
            segment: PathSegment::Name(name),
        }
    }
}

impl<'a> Display for PathNode<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        fn write_node(f: &mut Formatter<'_>, node: &PathNode) -> FmtResult {
            if let Some(parent) = node.parent {
                write_node(f, parent)?;
                write!(f, ".")?;
            }
            match &node.segment {
                PathSegment::Name(name) => write!(f, "{}", name),
                PathSegment::Index(idx) => write!(f, "{}", idx),
            }
        }
        write_node(f, self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputValueError {
    pub code: ErrorCode,
    pub message: String,
}

fn valid_error(code: ErrorCode, path_node: &PathNode, msg: String) -> Option<InputValueError> {
    Some(InputValueError {
        code,
        message: format!("\"{}\", {}", path_node, msg),
    })
}

/// Checks a value literal against an input type.
///
/// Variables with a supplied value are checked through that value. Variables without one
/// are left to the variable position checks.
pub fn is_valid_input_value(
    schema: &Schema,
    variables: &Variables,
    ty: &Type,
    value: &Value,
    path_node: PathNode,
) -> Option<InputValueError> {
    if let Value::Variable(name) = value {
        return match variables.get(name) {
            Some(supplied) => is_valid_input_value(
                schema,
                variables,
                ty,
                &supplied.clone().into_value(),
                path_node,
            ),
            None => None,
        };
    }

    if !ty.nullable && matches!(value, Value::Null) {
        return valid_error(
            ErrorCode::ValuesOfCorrectType,
            &path_node,
            format!("expected type \"{}\"", ty),
        );
    }

    match &ty.base {
        BaseType::List(element_ty) => match value {
            Value::List(elements) => elements.iter().enumerate().find_map(|(idx, elem)| {
                is_valid_input_value(schema, variables, element_ty, elem, path_node.index(idx))
            }),
            Value::Null => None,
            _ => is_valid_input_value(schema, variables, element_ty, value, path_node),
        },
        BaseType::Named(type_name) => {
            if matches!(value, Value::Null) {
                return None;
            }
            let ty = schema.named_type(type_name)?;
            match ty.kind {
                TypeKind::Scalar => {
                    // Literals that still hold variables are only checked once supplied.
                    let literal = value.clone().into_const()?;
                    match schema.parse_scalar_literal(type_name, &literal) {
                        Ok(_) => None,
                        Err(reason) => valid_error(
                            ErrorCode::ValuesOfCorrectType,
                            &path_node,
                            format!("expected type \"{}\", {}", type_name, reason),
                        ),
                    }
                }
                TypeKind::Enum => {
                    let enum_value = match value {
                        Value::Enum(name) => Some(name.as_str()),
                        Value::String(s) => Some(s.as_str()),
                        _ => None,
                    };
                    match enum_value {
                        Some(enum_value) if ty.enum_values.contains_key(enum_value) => None,
                        Some(enum_value) => valid_error(
                            ErrorCode::ValuesOfCorrectType,
                            &path_node,
                            format!(
                                "enumeration type \"{}\" does not contain the value \"{}\"",
                                ty.name, enum_value
                            ),
                        ),
                        None => valid_error(
                            ErrorCode::ValuesOfCorrectType,
                            &path_node,
                            format!("expected type \"{}\"", type_name),
                        ),
                    }
                }
                TypeKind::InputObject => {
                    let values = match value {
                        Value::Object(values) => values,
                        _ => {
                            return valid_error(
                                ErrorCode::ValuesOfCorrectType,
                                &path_node,
                                format!("expected type \"{}\"", type_name),
                            )
                        }
                    };

                    for field in ty.input_fields.values() {
                        if let Some(value) = values.get(&field.name) {
                            if let Some(error) = is_valid_input_value(
                                schema,
                                variables,
                                &field.ty,
                                value,
                                path_node.name(field.name.as_str()),
                            ) {
                                return Some(error);
                            }
                        } else if !field.ty.nullable && field.default_value.is_none() {
                            return valid_error(
                                ErrorCode::InputObjectRequiredFields,
                                &path_node,
                                format!(
                                    "field \"{}\" of type \"{}\" is required but not provided",
                                    field.name, ty.name,
                                ),
                            );
                        }
                    }

                    if let Some(name) = values.keys().find(|name| !ty.input_fields.contains_key(*name)) {
                        return valid_error(
                            ErrorCode::InputObjectFieldNames,
                            &path_node,
                            format!("unknown field \"{}\" of type \"{}\"", name, ty.name),
                        );
                    }

                    None
                }
                TypeKind::Object | TypeKind::Interface | TypeKind::Union => None,
            }
        }
    }
}

/// Coerces a literal to its input type for comparison purposes.
///
/// Returns `None` for values that cannot be compared this way, such as variables or
/// literals the input type rejects.
pub fn coerce_input_value(schema: &Schema, ty: Option<&Type>, value: &Value) -> Option<ConstValue> {
    let ty = match ty {
        Some(ty) => ty,
        None => return value.clone().into_const(),
    };

    match (&ty.base, value) {
        (_, Value::Variable(_)) => None,
        (_, Value::Null) => Some(ConstValue::Null),
        (BaseType::List(element_ty), Value::List(elements)) => elements
            .iter()
            .map(|element| coerce_input_value(schema, Some(element_ty), element))
            .collect::<Option<Vec<_>>>()
            .map(ConstValue::List),
        (BaseType::List(element_ty), _) => {
            coerce_input_value(schema, Some(element_ty), value).map(|value| ConstValue::List(vec![value]))
        }
        (BaseType::Named(type_name), _) => match schema.named_type(type_name) {
            Some(input_type) if input_type.kind == TypeKind::Scalar => schema
                .parse_scalar_literal(type_name, &value.clone().into_const()?)
                .ok(),
            Some(input_type) if input_type.kind == TypeKind::InputObject => match value {
                Value::Object(fields) => fields
                    .iter()
                    .map(|(name, field)| {
                        let field_ty = input_type.input_field(name).map(|field| &field.ty);
                        coerce_input_value(schema, field_ty, field).map(|field| (name.clone(), field))
                    })
                    .collect::<Option<_>>()
                    .map(ConstValue::Object),
                _ => None,
            },
            _ => value.clone().into_const(),
        },
    }
}

/// Whether a type names an input type known to the schema.
pub fn is_input_type(schema: &Schema, ty: &Type) -> bool {
    schema
        .concrete_type(ty)
        .map_or(false, |concrete_type| concrete_type.is_input())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::schema;

    fn check(ty: &str, value: &str) -> Option<InputValueError> {
        check_with(ty, value, &Variables::default())
    }

    fn check_with(ty: &str, value: &str, variables: &Variables) -> Option<InputValueError> {
        let ty = Type::new(ty).unwrap();
        let doc = parser::parse_query(format!("{{ f(a: {}) }}", value)).unwrap();
        let value = match &doc.operations {
            parser::types::DocumentOperations::Single(op) => match &op.node.selection_set.node.items[0].node {
                parser::types::Selection::Field(field) => field.node.arguments[0].1.node.clone(),
                _ => unreachable!(),
            },
            _ => unreachable!(),
        };
        is_valid_input_value(schema(), variables, &ty, &value, PathNode::new("a"))
    }

    #[test]
    fn scalars() {
        assert!(check("Int", "1").is_none());
        assert!(check("Int", "null").is_none());
        assert!(check("Float", "1").is_none());
        assert!(check("ID", "1").is_none());
        assert!(check("Int!", "null").is_some());

        let error = check("Int", "\"one\"").unwrap();
        assert_eq!(error.code, ErrorCode::ValuesOfCorrectType);
        assert!(error.message.starts_with("\"a\", expected type \"Int\""));
    }

    #[test]
    fn lists_accept_single_items() {
        assert!(check("[String]", "\"a\"").is_none());
        assert!(check("[String]", "[\"a\", null]").is_none());
        assert!(check("[String!]", "[\"a\", null]").is_some());
        assert_eq!(
            check("[Int]", "[1, \"b\"]").unwrap().message,
            "\"a.1\", expected type \"Int\", Int cannot represent non-integer value: \"b\""
        );
    }

    #[test]
    fn enums() {
        assert!(check("FurColor", "BROWN").is_none());
        assert!(check("FurColor", "PURPLE").is_some());
        assert!(check("FurColor", "1").is_some());
    }

    #[test]
    fn input_objects() {
        assert!(check("ComplexInput", "{ requiredField: true }").is_none());

        let error = check("ComplexInput", "{ intField: 4 }").unwrap();
        assert_eq!(error.code, ErrorCode::InputObjectRequiredFields);

        let error = check("ComplexInput", "{ requiredField: true, unknownField: 1 }").unwrap();
        assert_eq!(error.code, ErrorCode::InputObjectFieldNames);

        let error = check("ComplexInput", "{ requiredField: true, intField: \"x\" }").unwrap();
        assert!(error.message.starts_with("\"a.intField\""));
    }

    #[test]
    fn variables() {
        assert!(check("Int!", "$v").is_none());

        let variables = Variables::from_json(serde_json::json!({ "v": "str" }));
        assert!(check_with("Int", "$v", &variables).is_some());
        assert!(check_with("String", "$v", &variables).is_none());
        assert!(check_with("[String]", "[$v, $missing]", &variables).is_none());
    }

    #[test]
    fn coercion_compares_equivalent_literals() {
        let schema = schema();
        let id = Type::new("ID").unwrap();
        let int_list = Type::new("[Int]").unwrap();

        assert_eq!(
            coerce_input_value(schema, Some(&id), &Value::Number(4.into())),
            coerce_input_value(schema, Some(&id), &Value::String("4".to_string())),
        );
        assert_eq!(
            coerce_input_value(schema, Some(&int_list), &Value::Number(1.into())),
            coerce_input_value(schema, Some(&int_list), &Value::List(vec![Value::Number(1.into())])),
        );
        assert_eq!(
            coerce_input_value(schema, Some(&id), &Value::Variable(value::Name::new("id"))),
            None
        );
    }
}
