use graphcheck_schema::TypeExt;
use parser::types::{FragmentDefinition, InlineFragment, TypeCondition, VariableDefinition};
use parser::{Pos, Positioned};
use value::Name;

use crate::context::VisitorContext;
use crate::error::ErrorCode;
use crate::suggestion::make_suggestion;
use crate::visitor::Visitor;

#[derive(Default)]
pub struct KnownTypeNames;

impl<'a> Visitor<'a> for KnownTypeNames {
    fn enter_fragment_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        _name: &'a Name,
        fragment_definition: &'a Positioned<FragmentDefinition>,
    ) {
        let TypeCondition { on: name } = &fragment_definition.node.type_condition.node;
        validate_type(ctx, &name.node, fragment_definition.pos);
    }

    fn enter_variable_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        variable_definition: &'a Positioned<VariableDefinition>,
    ) {
        validate_type(
            ctx,
            variable_definition.node.var_type.node.concrete_typename(),
            variable_definition.pos,
        );
    }

    fn enter_inline_fragment(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        inline_fragment: &'a Positioned<InlineFragment>,
    ) {
        if let Some(TypeCondition { on: name }) = inline_fragment
            .node
            .type_condition
            .as_ref()
            .map(|c| &c.node)
        {
            validate_type(ctx, &name.node, inline_fragment.pos);
        }
    }
}

fn validate_type(ctx: &mut VisitorContext<'_>, type_name: &str, pos: Pos) {
    if ctx.schema.named_type(type_name).is_none() {
        let suggestion = make_suggestion(
            " Did you mean",
            ctx.schema
                .types()
                .filter(|ty| !ty.is_introspection)
                .map(|ty| ty.name.as_str()),
            type_name,
        );
        ctx.report_error(
            ErrorCode::KnownTypeNames,
            vec![pos],
            format!("Unknown type \"{}\".{}", type_name, suggestion.unwrap_or_default()),
        );
    }
}
