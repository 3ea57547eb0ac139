use graphcheck_schema::{Schema, TypeExt, TypeKind};
use parser::types::{BaseType, Type};
use value::ConstValue;

/// Whether a value of `maybe_subtype` can always be used where `super_type` is expected.
pub fn is_type_subtype_of(schema: &Schema, maybe_subtype: &Type, super_type: &Type) -> bool {
    if maybe_subtype == super_type {
        return true;
    }

    if !super_type.nullable {
        return !maybe_subtype.nullable
            && is_type_subtype_of(
                schema,
                &maybe_subtype.nullable_type(),
                &super_type.nullable_type(),
            );
    }

    if !maybe_subtype.nullable {
        return is_type_subtype_of(schema, &maybe_subtype.nullable_type(), super_type);
    }

    match (&maybe_subtype.base, &super_type.base) {
        (BaseType::List(sub_item), BaseType::List(super_item)) => {
            is_type_subtype_of(schema, sub_item, super_item)
        }
        (BaseType::Named(sub_name), BaseType::Named(super_name)) => {
            match (schema.named_type(sub_name), schema.named_type(super_name)) {
                (Some(sub), Some(sup)) => {
                    sup.is_abstract() && sub.kind == TypeKind::Object && sup.is_possible_type(&sub.name)
                }
                _ => false,
            }
        }
        _ => false,
    }
}

/// Whether a variable may be passed to a location of `location_type`.
///
/// A nullable variable is accepted in a non-null location when either the variable or the
/// location provides a non-null default.
pub fn is_allowed_variable_usage(
    schema: &Schema,
    variable_type: &Type,
    variable_default_value: Option<&ConstValue>,
    location_type: &Type,
    location_has_default_value: bool,
) -> bool {
    if !location_type.nullable && variable_type.nullable {
        let has_non_null_variable_default_value =
            matches!(variable_default_value, Some(value) if *value != ConstValue::Null);
        if !has_non_null_variable_default_value && !location_has_default_value {
            return false;
        }
        return is_type_subtype_of(schema, variable_type, &location_type.nullable_type());
    }

    is_type_subtype_of(schema, variable_type, location_type)
}

/// Whether two field types prevent their fields from being merged into one response entry.
pub fn types_conflict(schema: &Schema, type1: &Type, type2: &Type) -> bool {
    if type1.nullable != type2.nullable {
        return true;
    }

    match (&type1.base, &type2.base) {
        (BaseType::List(item1), BaseType::List(item2)) => types_conflict(schema, item1, item2),
        (BaseType::List(_), _) | (_, BaseType::List(_)) => true,
        (BaseType::Named(name1), BaseType::Named(name2)) => {
            let is_leaf = |name: &str| schema.named_type(name).map_or(false, |ty| ty.is_leaf());
            (is_leaf(name1) || is_leaf(name2)) && name1 != name2
        }
    }
}
