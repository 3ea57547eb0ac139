use indexmap::IndexMap;
use graphcheck_schema::MetaInputValue;
use parser::types::{Directive, Field};
use parser::Positioned;
use value::{Name, Value};

use crate::context::VisitorContext;
use crate::error::ErrorCode;
use crate::suggestion::make_suggestion;
use crate::visitor::Visitor;

enum ArgsType<'a> {
    Directive(&'a str),
    Field {
        field_name: &'a str,
        type_name: &'a str,
    },
}

#[derive(Default)]
pub struct KnownArgumentNames<'a> {
    current_args: Option<(&'a IndexMap<Name, MetaInputValue>, ArgsType<'a>)>,
}

impl<'a> KnownArgumentNames<'a> {
    fn get_suggestion(&self, name: &str) -> String {
        make_suggestion(
            " Did you mean",
            self.current_args
                .iter()
                .flat_map(|(args, _)| args.keys().map(|name| name.as_str())),
            name,
        )
        .unwrap_or_default()
    }
}

impl<'a> Visitor<'a> for KnownArgumentNames<'a> {
    fn enter_directive(&mut self, ctx: &mut VisitorContext<'a>, directive: &'a Positioned<Directive>) {
        self.current_args = ctx
            .schema
            .directive(&directive.node.name.node)
            .map(|d| (&d.arguments, ArgsType::Directive(&directive.node.name.node)));
    }

    fn exit_directive(&mut self, _ctx: &mut VisitorContext<'a>, _directive: &'a Positioned<Directive>) {
        self.current_args = None;
    }

    fn enter_argument(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        name: &'a Positioned<Name>,
        _value: &'a Positioned<Value>,
    ) {
        if let Some((args, arg_type)) = &self.current_args {
            if !args.contains_key(name.node.as_str()) {
                let message = match arg_type {
                    ArgsType::Field {
                        field_name,
                        type_name,
                    } => format!(
                        "Unknown argument \"{}\" on field \"{}\" of type \"{}\".{}",
                        name.node,
                        field_name,
                        type_name,
                        self.get_suggestion(name.node.as_str())
                    ),
                    ArgsType::Directive(directive_name) => format!(
                        "Unknown argument \"{}\" on directive \"@{}\".{}",
                        name.node,
                        directive_name,
                        self.get_suggestion(name.node.as_str())
                    ),
                };
                ctx.report_error(ErrorCode::KnownArgumentNames, vec![name.pos], message);
            }
        }
    }

    fn enter_field(&mut self, ctx: &mut VisitorContext<'a>, field: &'a Positioned<Field>) {
        self.current_args = match (ctx.parent_type(), ctx.field_def()) {
            (Some(parent_type), Some(field_def)) => Some((
                &field_def.arguments,
                ArgsType::Field {
                    field_name: &field.node.name.node,
                    type_name: &parent_type.name,
                },
            )),
            _ => None,
        };
    }

    fn exit_field(&mut self, _ctx: &mut VisitorContext<'a>, _field: &'a Positioned<Field>) {
        self.current_args = None;
    }
}
