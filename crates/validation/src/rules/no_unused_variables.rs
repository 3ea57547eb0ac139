use std::collections::HashSet;

use parser::types::OperationDefinition;
use parser::Positioned;
use value::Name;

use crate::context::VisitorContext;
use crate::error::ErrorCode;
use crate::visitor::Visitor;

#[derive(Default)]
pub struct NoUnusedVariables;

impl<'a> Visitor<'a> for NoUnusedVariables {
    fn exit_operation_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        name: Option<&'a Name>,
        operation_definition: &'a Positioned<OperationDefinition>,
    ) {
        let used = ctx
            .recursive_variable_usages(name, operation_definition)
            .iter()
            .map(|usage| usage.name.as_str())
            .collect::<HashSet<_>>();

        for variable_definition in &operation_definition.node.variable_definitions {
            let variable_name = &variable_definition.node.name.node;
            if used.contains(variable_name.as_str()) {
                continue;
            }
            let message = match name {
                Some(name) => format!(
                    "Variable \"${}\" is never used in operation \"{}\".",
                    variable_name, name
                ),
                None => format!("Variable \"${}\" is never used.", variable_name),
            };
            ctx.report_error(
                ErrorCode::NoUnusedVariables,
                vec![variable_definition.pos],
                message,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::validate;
    use crate::Document;

    pub fn factory() -> NoUnusedVariables {
        NoUnusedVariables
    }

    fn messages(source: &str) -> Vec<String> {
        let doc = Document::parse(source).unwrap();
        validate(&doc, factory)
            .into_iter()
            .map(|error| {
                assert_eq!(error.code, ErrorCode::NoUnusedVariables);
                error.message
            })
            .collect()
    }

    #[test]
    fn uses_all_variables() {
        expect_passes_rule!(
            factory,
            r#"
          query ($a: String, $b: String, $c: String) {
            field(a: $a, b: $b, c: $c)
          }
        "#,
        );
    }

    #[test]
    fn uses_all_variables_deeply_in_inline_fragments() {
        expect_passes_rule!(
            factory,
            r#"
          query Foo($a: String, $b: String, $c: String) {
            ... on Type {
              field(a: $a) {
                field(b: $b) {
                  ... on Type {
                    field(c: $c)
                  }
                }
              }
            }
          }
        "#,
        );
    }

    #[test]
    fn variables_used_by_fragment_in_multiple_operations() {
        expect_passes_rule!(
            factory,
            r#"
          query Foo($a: String) {
            ...FragA
          }
          query Bar($b: String) {
            ...FragB
          }
          fragment FragA on Type {
            field(a: $a)
          }
          fragment FragB on Type {
            field(b: $b)
          }
        "#,
        );
    }

    #[test]
    fn variables_used_by_recursive_fragment() {
        expect_passes_rule!(
            factory,
            r#"
          query Foo($a: String) {
            ...FragA
          }
          fragment FragA on Type {
            field(a: $a) {
              ...FragA
            }
          }
        "#,
        );
    }

    #[test]
    fn variable_not_used() {
        let doc = Document::parse("query ($unused: Int) { dog { name } }").unwrap();
        let errors = validate(&doc, factory);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::NoUnusedVariables);
        assert_eq!(errors[0].message, "Variable \"$unused\" is never used.");
    }

    #[test]
    fn variable_used_through_transitive_fragments() {
        expect_passes_rule!(
            factory,
            r#"
          query Foo($unused: Int) {
            dog { ...A }
          }
          fragment A on Dog { ...B }
          fragment B on Dog {
            isAtLocation(x: $unused)
          }
        "#,
        );
    }

    #[test]
    fn variable_not_used_in_fragment() {
        assert_eq!(
            messages(
                r#"
          query Foo($a: String, $b: String, $c: String) {
            ...FragA
          }
          fragment FragA on Type {
            field(a: $a) {
              ...FragB
            }
          }
          fragment FragB on Type {
            field(b: $b) {
              ...FragC
            }
          }
          fragment FragC on Type {
            field
          }
        "#
            ),
            vec!["Variable \"$c\" is never used in operation \"Foo\"."]
        );
    }

    #[test]
    fn variable_not_used_by_unreferenced_fragment() {
        assert_eq!(
            messages(
                r#"
          query Foo($b: String) {
            ...FragA
          }
          fragment FragA on Type {
            field(a: $a)
          }
          fragment FragB on Type {
            field(b: $b)
          }
        "#
            ),
            vec!["Variable \"$b\" is never used in operation \"Foo\"."]
        );
    }

    #[test]
    fn variable_used_only_in_directive() {
        expect_passes_rule!(
            factory,
            r#"
          query Foo($skip: Boolean!) {
            dog @skip(if: $skip) { name }
          }
        "#,
        );
    }
}
