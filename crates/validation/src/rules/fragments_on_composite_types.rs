use parser::types::{FragmentDefinition, InlineFragment};
use parser::Positioned;
use value::Name;

use crate::context::VisitorContext;
use crate::error::ErrorCode;
use crate::visitor::Visitor;

#[derive(Default)]
pub struct FragmentsOnCompositeTypes;

impl<'a> Visitor<'a> for FragmentsOnCompositeTypes {
    fn enter_fragment_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        name: &'a Name,
        fragment_definition: &'a Positioned<FragmentDefinition>,
    ) {
        if let Some(current_type) = ctx.current_type() {
            if !current_type.is_composite() {
                ctx.report_error(
                    ErrorCode::FragmentsOnCompositeTypes,
                    vec![fragment_definition.pos],
                    format!(
                        "Fragment \"{}\" cannot condition on non composite type \"{}\".",
                        name, fragment_definition.node.type_condition.node.on.node
                    ),
                );
            }
        }
    }

    fn enter_inline_fragment(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        inline_fragment: &'a Positioned<InlineFragment>,
    ) {
        if let Some(type_condition) = &inline_fragment.node.type_condition {
            if let Some(current_type) = ctx.current_type() {
                if !current_type.is_composite() {
                    ctx.report_error(
                        ErrorCode::FragmentsOnCompositeTypes,
                        vec![inline_fragment.pos],
                        format!(
                            "Fragment cannot condition on non composite type \"{}\".",
                            type_condition.node.on.node
                        ),
                    );
                }
            }
        }
    }
}
