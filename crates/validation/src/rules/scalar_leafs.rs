use parser::types::Field;
use parser::Positioned;

use crate::context::VisitorContext;
use crate::error::ErrorCode;
use crate::visitor::Visitor;

#[derive(Default)]
pub struct ScalarLeafs;

impl<'a> Visitor<'a> for ScalarLeafs {
    fn enter_field(&mut self, ctx: &mut VisitorContext<'a>, field: &'a Positioned<Field>) {
        let (field_def, ty) = match (ctx.field_def(), ctx.current_type()) {
            (Some(field_def), Some(ty)) => (field_def, ty),
            _ => return,
        };
        let has_selection = !field.node.selection_set.node.items.is_empty();

        if ty.is_leaf() && has_selection {
            ctx.report_error(
                ErrorCode::ScalarLeafs,
                vec![field.pos],
                format!(
                    "Field \"{}\" must not have a selection since type \"{}\" has no subfields.",
                    field.node.name.node, field_def.ty
                ),
            );
        } else if ty.is_composite() && !has_selection {
            ctx.report_error(
                ErrorCode::ScalarLeafs,
                vec![field.pos],
                format!(
                    "Field \"{}\" of type \"{}\" must have a selection of subfields. Did you mean \"{} {{ ... }}\"?",
                    field.node.name.node, field_def.ty, field.node.name.node
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

    pub fn factory() -> ScalarLeafs {
        ScalarLeafs
    }

    #[test]
    fn valid_scalar_selection() {
        expect_passes_rule!(
            factory,
            r#"
          fragment scalarSelection on Dog {
            barks
          }
          { dog { ...scalarSelection } }
        "#,
        );
    }

    #[test]
    fn object_type_missing_selection() {
        let doc = Document::parse("query directQueryOnObjectWithoutSubFields { human }").unwrap();
        let errors = validate(&doc, factory);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::ScalarLeafs);
        assert_eq!(
            errors[0].message,
            "Field \"human\" of type \"Human\" must have a selection of subfields. Did you mean \"human { ... }\"?"
        );
    }

    #[test]
    fn interface_type_missing_selection() {
        expect_fails_rule!(
            factory,
            r#"
          {
            human { pets }
          }
        "#,
        );
    }

    #[test]
    fn valid_scalar_selection_with_args() {
        expect_passes_rule!(
            factory,
            r#"
          fragment scalarSelectionWithArgs on Dog {
            doesKnowCommand(dogCommand: SIT)
          }
          { dog { ...scalarSelectionWithArgs } }
        "#,
        );
    }

    #[test]
    fn scalar_selection_not_allowed_on_boolean() {
        let doc = Document::parse(
            r#"
          fragment scalarSelectionsNotAllowedOnBoolean on Dog {
            barks { sinceWhen }
          }
          { dog { ...scalarSelectionsNotAllowedOnBoolean } }
        "#,
        )
        .unwrap();
        let errors = validate(&doc, factory);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "Field \"barks\" must not have a selection since type \"Boolean\" has no subfields."
        );
    }

    #[test]
    fn scalar_selection_not_allowed_on_enum() {
        expect_fails_rule!(
            factory,
            r#"
          fragment scalarSelectionsNotAllowedOnEnum on Cat {
            furColor { inHexdec }
          }
          { cat { ...scalarSelectionsNotAllowedOnEnum } }
        "#,
        );
    }

    #[test]
    fn scalar_selection_not_allowed_with_directives_and_args() {
        expect_fails_rule!(
            factory,
            r#"
          fragment scalarSelectionsNotAllowedWithDirectivesAndArgs on Dog {
            doesKnowCommand(dogCommand: SIT) @include(if: true) { sinceWhen }
          }
          { dog { ...scalarSelectionsNotAllowedWithDirectivesAndArgs } }
        "#,
        );
    }

    #[test]
    fn list_of_objects_needs_selection() {
        expect_fails_rule!(
            factory,
            r#"
          { human { relatives } }
        "#,
        );
    }
}
