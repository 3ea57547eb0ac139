use parser::types::VariableDefinition;
use parser::Positioned;

use crate::context::VisitorContext;
use crate::utils::{is_valid_input_value, PathNode};
use crate::visitor::Visitor;

#[derive(Default)]
pub struct DefaultValuesOfCorrectType;

impl<'a> Visitor<'a> for DefaultValuesOfCorrectType {
    fn enter_variable_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        variable_definition: &'a Positioned<VariableDefinition>,
    ) {
        let default_value = match &variable_definition.node.default_value {
            Some(default_value) => default_value,
            None => return,
        };

        if let Some(error) = is_valid_input_value(
            ctx.schema,
            ctx.variables,
            &variable_definition.node.var_type.node,
            &default_value.node.clone().into_value(),
            PathNode::new(&variable_definition.node.name.node),
        ) {
            ctx.report_error(
                error.code,
                vec![default_value.pos],
                format!("Invalid default value for variable {}", error.message),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::test_harness::validate;
    use crate::Document;

    pub fn factory() -> DefaultValuesOfCorrectType {
        DefaultValuesOfCorrectType
    }

    #[test]
    fn variables_with_no_default_values() {
        expect_passes_rule!(
            factory,
            r#"
          query NullableValues($a: Int, $b: String, $c: ComplexInput) {
            dog { name }
          }
        "#,
        );
    }

    #[test]
    fn required_variables_without_default_values() {
        expect_passes_rule!(
            factory,
            r#"
          query RequiredValues($a: Int!, $b: String!) {
            dog { name }
          }
        "#,
        );
    }

    #[test]
    fn variables_with_valid_default_values() {
        expect_passes_rule!(
            factory,
            r#"
          query WithDefaultValues(
            $a: Int = 1,
            $b: String = "ok",
            $c: ComplexInput = { requiredField: true, intField: 3 }
            $d: [String] = "single"
          ) {
            dog { name }
          }
        "#,
        );
    }

    #[test]
    fn non_null_variables_may_have_defaults() {
        expect_passes_rule!(
            factory,
            r#"
          query WithDefaultValues($a: Int! = 1, $b: String! = "ok") {
            dog { name }
          }
        "#,
        );
    }

    #[test]
    fn variables_with_invalid_default_values() {
        let doc = Document::parse(
            r#"
          query InvalidDefaultValues(
            $a: Int = "one",
            $b: String = 4,
            $c: ComplexInput = "notverycomplex"
          ) {
            dog { name }
          }
        "#,
        )
        .unwrap();
        let errors = validate(&doc, factory);
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|error| error.code == ErrorCode::ValuesOfCorrectType));
        assert_eq!(
            errors[0].message,
            "Invalid default value for variable \"a\", expected type \"Int\", Int cannot represent non-integer value: \"one\""
        );
    }

    #[test]
    fn null_default_for_non_null_variable() {
        expect_fails_rule!(
            factory,
            r#"
          query WithNull($a: Int! = null) {
            dog { name }
          }
        "#,
        );
    }

    #[test]
    fn complex_variables_missing_required_field() {
        let doc = Document::parse(
            r#"
          query MissingRequiredField($a: ComplexInput = { intField: 3 }) {
            dog { name }
          }
        "#,
        )
        .unwrap();
        let errors = validate(&doc, factory);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::InputObjectRequiredFields);
    }

    #[test]
    fn list_variables_with_invalid_item() {
        expect_fails_rule!(
            factory,
            r#"
          query InvalidItem($a: [String] = ["one", 2]) {
            dog { name }
          }
        "#,
        );
    }
}
