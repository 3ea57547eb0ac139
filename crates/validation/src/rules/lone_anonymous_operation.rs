use parser::types::OperationDefinition;
use parser::Positioned;
use value::Name;

use crate::context::VisitorContext;
use crate::document::Document;
use crate::error::ErrorCode;
use crate::visitor::Visitor;

#[derive(Default)]
pub struct LoneAnonymousOperation {
    operation_count: usize,
}

impl<'a> Visitor<'a> for LoneAnonymousOperation {
    fn enter_document(&mut self, _ctx: &mut VisitorContext<'a>, doc: &'a Document) {
        self.operation_count = doc.operations().count();
    }

    fn enter_operation_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        name: Option<&'a Name>,
        operation_definition: &'a Positioned<OperationDefinition>,
    ) {
        if name.is_none() && self.operation_count > 1 {
            ctx.report_error(
                ErrorCode::LoneAnonymousOperation,
                vec![operation_definition.pos],
                "This anonymous operation must be the only defined operation.",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::{fragments_only, validate};

    pub fn factory() -> LoneAnonymousOperation {
        LoneAnonymousOperation::default()
    }

    #[test]
    fn no_operations() {
        let doc = fragments_only("fragment fragA on Dog { name }");
        assert_eq!(doc.operations().count(), 0);
        assert!(validate(&doc, factory).is_empty());
    }

    #[test]
    fn one_anon_operation() {
        expect_passes_rule!(
            factory,
            r#"
          {
            dog { name }
          }
        "#,
        );
    }

    #[test]
    fn anon_operation_with_fragment() {
        expect_passes_rule!(
            factory,
            r#"
          {
            ...Foo
          }
          fragment Foo on Query {
            dog { name }
          }
        "#,
        );
    }

    #[test]
    fn anon_operation_with_another_source() {
        let doc = Document::parse_sources(["{ dog { name } }", "query Named { cat { name } }"]).unwrap();
        let errors = validate(&doc, factory);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::LoneAnonymousOperation);
        assert_eq!(
            errors[0].message,
            "This anonymous operation must be the only defined operation."
        );
    }

    #[test]
    fn two_anon_operations() {
        let doc = Document::parse_sources(["{ dog { name } }", "{ cat { name } }"]).unwrap();
        assert_eq!(validate(&doc, factory).len(), 2);
    }
}
