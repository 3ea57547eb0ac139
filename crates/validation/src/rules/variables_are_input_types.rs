use graphcheck_schema::TypeExt;
use parser::types::VariableDefinition;
use parser::Positioned;

use crate::context::VisitorContext;
use crate::error::ErrorCode;
use crate::utils::is_input_type;
use crate::visitor::Visitor;

#[derive(Default)]
pub struct VariablesAreInputTypes;

impl<'a> Visitor<'a> for VariablesAreInputTypes {
    fn enter_variable_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        variable_definition: &'a Positioned<VariableDefinition>,
    ) {
        let var_type = &variable_definition.node.var_type.node;
        // Unknown types are reported by the type name rule.
        if ctx.schema.named_type(var_type.concrete_typename()).is_none() {
            return;
        }

        if !is_input_type(ctx.schema, var_type) {
            ctx.report_error(
                ErrorCode::VariablesAreInputTypes,
                vec![variable_definition.pos],
                format!(
                    "Variable \"${}\" cannot be non-input type \"{}\".",
                    variable_definition.node.name.node, var_type
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::validate;
    use crate::Document;

    pub fn factory() -> VariablesAreInputTypes {
        VariablesAreInputTypes
    }

    #[test]
    fn input_types_are_valid() {
        expect_passes_rule!(
            factory,
            r#"
          query Foo($a: String, $b: [Boolean!]!, $c: ComplexInput, $d: FurColor) {
            field(a: $a, b: $b, c: $c, d: $d)
          }
        "#,
        );
    }

    #[test]
    fn output_types_are_invalid() {
        let doc = Document::parse(
            r#"
          query Foo($a: Dog, $b: [[CatOrDog!]]!, $c: Pet) {
            field(a: $a, b: $b, c: $c)
          }
        "#,
        )
        .unwrap();
        let errors = validate(&doc, factory);
        let messages = errors.iter().map(|error| error.message.as_str()).collect::<Vec<_>>();
        assert_eq!(
            messages,
            vec![
                "Variable \"$a\" cannot be non-input type \"Dog\".",
                "Variable \"$b\" cannot be non-input type \"[[CatOrDog!]]!\".",
                "Variable \"$c\" cannot be non-input type \"Pet\".",
            ]
        );
        assert_eq!(errors[0].code, ErrorCode::VariablesAreInputTypes);
    }

    #[test]
    fn unknown_types_are_left_to_type_names() {
        expect_passes_rule!(
            factory,
            r#"
          query Foo($a: Unknown) {
            field(a: $a)
          }
        "#,
        );
    }
}
