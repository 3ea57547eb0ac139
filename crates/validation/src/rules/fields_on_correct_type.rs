use parser::types::Field;
use parser::Positioned;

use crate::context::VisitorContext;
use crate::error::ErrorCode;
use crate::suggestion::make_suggestion;
use crate::visitor::Visitor;

#[derive(Default)]
pub struct FieldsOnCorrectType;

impl<'a> Visitor<'a> for FieldsOnCorrectType {
    fn enter_field(&mut self, ctx: &mut VisitorContext<'a>, field: &'a Positioned<Field>) {
        let parent_type = match ctx.parent_type() {
            Some(parent_type) => parent_type,
            None => return,
        };
        if ctx.field_def().is_some() {
            return;
        }

        let field_name = field.node.name.node.as_str();
        let schema = ctx.schema;
        let fragment_suggestion = if parent_type.is_abstract() {
            let mut types = parent_type
                .possible_types()
                .filter(|type_name| {
                    schema
                        .named_type(type_name)
                        .map_or(false, |ty| ty.field_by_name(field_name).is_some())
                })
                .map(|type_name| format!("\"{}\"", type_name))
                .collect::<Vec<_>>();
            types.sort();
            match types.len() {
                0 => None,
                1 => Some(format!(" Did you mean to use an inline fragment on {}?", types[0])),
                _ => {
                    let last = types.pop().unwrap_or_default();
                    Some(format!(
                        " Did you mean to use an inline fragment on {} or {}?",
                        types.join(", "),
                        last
                    ))
                }
            }
        } else {
            None
        };
        let suggestion = fragment_suggestion.or_else(|| {
            make_suggestion(
                " Did you mean",
                parent_type
                    .fields
                    .keys()
                    .map(|name| name.as_str())
                    .filter(|name| !name.starts_with("__")),
                field_name,
            )
        });

        ctx.report_error(
            ErrorCode::FieldsOnCorrectType,
            vec![field.pos],
            format!(
                "Unknown field \"{}\" on type \"{}\".{}",
                field_name,
                parent_type.name,
                suggestion.unwrap_or_default()
            ),
        );
    }
}
