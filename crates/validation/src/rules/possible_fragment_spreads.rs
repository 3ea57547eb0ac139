use parser::types::{FragmentSpread, InlineFragment};
use parser::Positioned;

use crate::context::VisitorContext;
use crate::error::ErrorCode;
use crate::visitor::Visitor;

#[derive(Default)]
pub struct PossibleFragmentSpreads;

impl<'a> Visitor<'a> for PossibleFragmentSpreads {
    fn enter_fragment_spread(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        fragment_spread: &'a Positioned<FragmentSpread>,
    ) {
        let fragment_name = &fragment_spread.node.fragment_name.node;
        let fragment_type = ctx
            .fragment(fragment_name)
            .and_then(|fragment| ctx.schema.named_type(&fragment.node.type_condition.node.on.node));

        if let (Some(fragment_type), Some(parent_type)) = (fragment_type, ctx.parent_type()) {
            if fragment_type.is_composite() && !fragment_type.type_overlap(parent_type) {
                ctx.report_error(
                    ErrorCode::PossibleFragmentSpreads,
                    vec![fragment_spread.pos],
                    format!(
                        "Fragment \"{}\" cannot be spread here as objects of type \"{}\" can never be of type \"{}\".",
                        fragment_name, parent_type.name, fragment_type.name
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
        if inline_fragment.node.type_condition.is_none() {
            return;
        }

        if let (Some(fragment_type), Some(parent_type)) = (ctx.current_type(), ctx.parent_type()) {
            if fragment_type.is_composite() && !fragment_type.type_overlap(parent_type) {
                ctx.report_error(
                    ErrorCode::PossibleFragmentSpreads,
                    vec![inline_fragment.pos],
                    format!(
                        "Fragment cannot be spread here as objects of type \"{}\" can never be of type \"{}\".",
                        parent_type.name, fragment_type.name
                    ),
                );
            }
        }
    }
}
