use std::collections::HashSet;

use parser::types::{Field, OperationDefinition, OperationType, Selection, SelectionSet};
use parser::Positioned;
use value::Name;

use crate::context::VisitorContext;
use crate::error::ErrorCode;
use crate::visitor::Visitor;

#[derive(Default)]
pub struct SingleFieldSubscriptions;

impl<'a> Visitor<'a> for SingleFieldSubscriptions {
    fn enter_operation_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        name: Option<&'a Name>,
        operation_definition: &'a Positioned<OperationDefinition>,
    ) {
        if operation_definition.node.ty != OperationType::Subscription {
            return;
        }

        let mut fields = Vec::new();
        collect_root_fields(
            ctx,
            &operation_definition.node.selection_set.node,
            &mut fields,
            &mut HashSet::new(),
        );

        let subject = match name {
            Some(name) => format!("Subscription \"{}\"", name),
            None => "Anonymous Subscription".to_string(),
        };

        // Fields sharing the first response key merge into one root field.
        let first_key = fields
            .first()
            .map(|field| field.node.response_key().node.as_str());
        let extra_fields = fields
            .iter()
            .filter(|field| Some(field.node.response_key().node.as_str()) != first_key)
            .map(|field| field.pos)
            .collect::<Vec<_>>();
        if !extra_fields.is_empty() {
            ctx.report_error(
                ErrorCode::SingleFieldSubscriptions,
                extra_fields,
                format!("{} must select only one top level field.", subject),
            );
        }

        for field in fields {
            if field.node.name.node.starts_with("__") {
                ctx.report_error(
                    ErrorCode::SingleFieldSubscriptions,
                    vec![field.pos],
                    format!("{} must not select an introspection top level field.", subject),
                );
            }
        }
    }
}

fn collect_root_fields<'a>(
    ctx: &VisitorContext<'a>,
    selection_set: &'a SelectionSet,
    fields: &mut Vec<&'a Positioned<Field>>,
    visited_fragments: &mut HashSet<&'a str>,
) {
    for selection in &selection_set.items {
        match &selection.node {
            Selection::Field(field) => fields.push(field),
            Selection::InlineFragment(inline_fragment) => collect_root_fields(
                ctx,
                &inline_fragment.node.selection_set.node,
                fields,
                visited_fragments,
            ),
            Selection::FragmentSpread(fragment_spread) => {
                let name = fragment_spread.node.fragment_name.node.as_str();
                if !visited_fragments.insert(name) {
                    continue;
                }
                if let Some(fragment) = ctx.fragment(name) {
                    collect_root_fields(ctx, &fragment.node.selection_set.node, fields, visited_fragments);
                }
            }
        }
    }
}
