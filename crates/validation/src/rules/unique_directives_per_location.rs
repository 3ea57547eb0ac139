use std::collections::HashMap;

use parser::types::{
    Directive, Field, FragmentDefinition, FragmentSpread, InlineFragment, OperationDefinition,
    VariableDefinition,
};
use parser::Positioned;
use value::Name;

use crate::context::VisitorContext;
use crate::error::ErrorCode;
use crate::visitor::Visitor;

#[derive(Default)]
pub struct UniqueDirectivesPerLocation;

fn check_duplicate_directive(ctx: &mut VisitorContext<'_>, directives: &[Positioned<Directive>]) {
    let mut seen = HashMap::new();
    for directive in directives {
        let name = directive.node.name.node.as_str();
        match ctx.schema.directive(name) {
            Some(schema_directive) if !schema_directive.is_repeatable => {}
            _ => continue,
        }

        match seen.get(name) {
            Some(first) => ctx.report_error(
                ErrorCode::UniqueDirectivesPerLocation,
                vec![*first, directive.pos],
                format!(
                    "The directive \"@{}\" can only be used once at this location.",
                    name
                ),
            ),
            None => {
                seen.insert(name, directive.pos);
            }
        }
    }
}

impl<'a> Visitor<'a> for UniqueDirectivesPerLocation {
    fn enter_operation_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        _name: Option<&'a Name>,
        operation_definition: &'a Positioned<OperationDefinition>,
    ) {
        check_duplicate_directive(ctx, &operation_definition.node.directives);
    }

    fn enter_fragment_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        _name: &'a Name,
        fragment_definition: &'a Positioned<FragmentDefinition>,
    ) {
        check_duplicate_directive(ctx, &fragment_definition.node.directives);
    }

    fn enter_variable_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        variable_definition: &'a Positioned<VariableDefinition>,
    ) {
        check_duplicate_directive(ctx, &variable_definition.node.directives);
    }

    fn enter_field(&mut self, ctx: &mut VisitorContext<'a>, field: &'a Positioned<Field>) {
        check_duplicate_directive(ctx, &field.node.directives);
    }

    fn enter_fragment_spread(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        fragment_spread: &'a Positioned<FragmentSpread>,
    ) {
        check_duplicate_directive(ctx, &fragment_spread.node.directives);
    }

    fn enter_inline_fragment(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        inline_fragment: &'a Positioned<InlineFragment>,
    ) {
        check_duplicate_directive(ctx, &inline_fragment.node.directives);
    }
}
