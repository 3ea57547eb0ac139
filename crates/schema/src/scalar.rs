use value::{ConstValue, Number};

/// Converts a literal into the internal value of a scalar type.
///
/// An `Err` carries the reason the literal cannot represent a value of the scalar.
pub trait ScalarParser: Send + Sync {
    fn parse_literal(&self, value: &ConstValue) -> Result<ConstValue, String>;
}

impl<F> ScalarParser for F
where
    F: Fn(&ConstValue) -> Result<ConstValue, String> + Send + Sync,
{
    fn parse_literal(&self, value: &ConstValue) -> Result<ConstValue, String> {
        self(value)
    }
}

type ParseFn = fn(&ConstValue) -> Result<ConstValue, String>;

/// Returns the converter of a built-in scalar.
pub fn builtin_scalar_parser(type_name: &str) -> Option<ParseFn> {
    match type_name {
        "Int" => Some(parse_int),
        "Float" => Some(parse_float),
        "String" => Some(parse_string),
        "Boolean" => Some(parse_boolean),
        "ID" => Some(parse_id),
        _ => None,
    }
}

fn parse_int(value: &ConstValue) -> Result<ConstValue, String> {
    match value {
        ConstValue::Number(n) => match n.as_i64() {
            Some(v) if i32::try_from(v).is_ok() => Ok(ConstValue::Number(n.clone())),
            _ => Err(format!(
                "Int cannot represent non 32-bit signed integer value: {}",
                n
            )),
        },
        _ => Err(format!("Int cannot represent non-integer value: {}", value)),
    }
}

fn parse_float(value: &ConstValue) -> Result<ConstValue, String> {
    match value {
        ConstValue::Number(n) => n
            .as_f64()
            .and_then(Number::from_f64)
            .map(ConstValue::Number)
            .ok_or_else(|| format!("Float cannot represent value: {}", n)),
        _ => Err(format!("Float cannot represent non numeric value: {}", value)),
    }
}

fn parse_string(value: &ConstValue) -> Result<ConstValue, String> {
    match value {
        ConstValue::String(_) => Ok(value.clone()),
        _ => Err(format!("String cannot represent a non string value: {}", value)),
    }
}

fn parse_boolean(value: &ConstValue) -> Result<ConstValue, String> {
    match value {
        ConstValue::Boolean(_) => Ok(value.clone()),
        _ => Err(format!(
            "Boolean cannot represent a non boolean value: {}",
            value
        )),
    }
}

fn parse_id(value: &ConstValue) -> Result<ConstValue, String> {
    match value {
        ConstValue::String(_) => Ok(value.clone()),
        ConstValue::Number(n) if n.is_i64() || n.is_u64() => Ok(ConstValue::String(n.to_string())),
        _ => Err(format!("ID cannot represent a non-string and non-integer value: {}", value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(type_name: &str, value: ConstValue) -> Result<ConstValue, String> {
        builtin_scalar_parser(type_name).unwrap()(&value)
    }

    #[test]
    fn id_coerces_integers_to_strings() {
        assert_eq!(
            parse("ID", ConstValue::Number(1.into())),
            Ok(ConstValue::String("1".to_string()))
        );
        assert!(parse("ID", ConstValue::Boolean(true)).is_err());
    }

    #[test]
    fn int_is_range_checked() {
        assert!(parse("Int", ConstValue::Number(i64::from(i32::MAX).into())).is_ok());
        assert!(parse("Int", ConstValue::Number((i64::from(i32::MAX) + 1).into())).is_err());
        assert!(parse("Int", ConstValue::Number(Number::from_f64(1.5).unwrap())).is_err());
    }

    #[test]
    fn float_accepts_integers() {
        assert_eq!(
            parse("Float", ConstValue::Number(3.into())),
            Ok(ConstValue::Number(Number::from_f64(3.0).unwrap()))
        );
        assert!(parse("Float", ConstValue::String("3".to_string())).is_err());
    }

    #[test]
    fn custom_scalars_have_no_builtin_parser() {
        assert!(builtin_scalar_parser("DateTime").is_none());
    }
}
