use indexmap::IndexMap;
use graphcheck_schema::MetaInputValue;
use parser::types::{Directive, Field};
use parser::{Pos, Positioned};
use value::{Name, Value};

use crate::context::VisitorContext;
use crate::error::ErrorCode;
use crate::visitor::Visitor;

#[derive(Default)]
pub struct ProvidedNonNullArguments;

/// The first required argument definition without a supplied value.
fn first_missing_argument<'a>(
    definitions: &'a IndexMap<Name, MetaInputValue>,
    arguments: &[(Positioned<Name>, Positioned<Value>)],
) -> Option<&'a MetaInputValue> {
    definitions.values().find(|definition| {
        !definition.ty.nullable
            && definition.default_value.is_none()
            && !arguments.iter().any(|(name, _)| name.node == definition.name)
    })
}

impl<'a> Visitor<'a> for ProvidedNonNullArguments {
    fn enter_directive(&mut self, ctx: &mut VisitorContext<'a>, directive: &'a Positioned<Directive>) {
        let schema_directive = match ctx.schema.directive(&directive.node.name.node) {
            Some(schema_directive) => schema_directive,
            None => return,
        };
        if let Some(arg) = first_missing_argument(&schema_directive.arguments, &directive.node.arguments) {
            report(
                ctx,
                directive.pos,
                format!(
                    "Directive \"@{}\" argument \"{}\" of type \"{}\" is required, but it was not provided.",
                    directive.node.name.node, arg.name, arg.ty
                ),
            );
        }
    }

    fn enter_field(&mut self, ctx: &mut VisitorContext<'a>, field: &'a Positioned<Field>) {
        let field_def = match ctx.field_def() {
            Some(field_def) => field_def,
            None => return,
        };
        if let Some(arg) = first_missing_argument(&field_def.arguments, &field.node.arguments) {
            report(
                ctx,
                field.pos,
                format!(
                    "Field \"{}\" argument \"{}\" of type \"{}\" is required, but it was not provided.",
                    field.node.name.node, arg.name, arg.ty
                ),
            );
        }
    }
}

fn report(ctx: &mut VisitorContext<'_>, pos: Pos, message: String) {
    ctx.report_error(ErrorCode::ProvidedNonNullArguments, vec![pos], message);
}
