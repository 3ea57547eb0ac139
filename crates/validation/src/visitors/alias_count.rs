use parser::types::Field;
use parser::Positioned;
use value::ConstValue;

use crate::context::VisitorContext;
use crate::document::Document;
use crate::visitor::Visitor;

/// Records the number of aliased fields in the document under the `aliasCount` extension.
#[derive(Default)]
pub struct AliasCountCalculate {
    count: usize,
}

impl<'a> Visitor<'a> for AliasCountCalculate {
    fn enter_field(&mut self, _ctx: &mut VisitorContext<'a>, field: &'a Positioned<Field>) {
        if field.node.alias.is_some() {
            self.count += 1;
        }
    }

    fn exit_document(&mut self, ctx: &mut VisitorContext<'a>, _doc: &'a Document) {
        ctx.set_extension("aliasCount", ConstValue::Number(self.count.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::schema;
    use crate::visitor::visit;
    use value::Variables;

    #[test]
    fn counts_aliases_in_operations_and_fragments() {
        let doc = Document::parse(
            r#"
          { a: dog { b: name ...F } cat { name } }
          fragment F on Dog { c: nickname barks }
        "#,
        )
        .unwrap();
        let variables = Variables::default();
        let mut ctx = VisitorContext::new(schema(), &doc, &variables);
        visit(&mut AliasCountCalculate::default(), &mut ctx, &doc);
        assert_eq!(
            ctx.extensions.get("aliasCount"),
            Some(&ConstValue::Number(3.into()))
        );
    }
}
