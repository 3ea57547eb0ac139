use parser::Positioned;
use value::{Name, Value};

use crate::context::VisitorContext;
use crate::utils::{is_valid_input_value, PathNode};
use crate::visitor::Visitor;

#[derive(Default)]
pub struct ArgumentsOfCorrectType;

impl<'a> Visitor<'a> for ArgumentsOfCorrectType {
    fn enter_argument(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        name: &'a Positioned<Name>,
        value: &'a Positioned<Value>,
    ) {
        let argument = match ctx.argument() {
            Some(argument) => argument,
            None => return,
        };

        if let Some(error) = is_valid_input_value(
            ctx.schema,
            ctx.variables,
            &argument.ty,
            &value.node,
            PathNode::new(&name.node),
        ) {
            ctx.report_error(
                error.code,
                vec![value.pos],
                format!("Invalid value for argument {}", error.message),
            );
        }
    }
}
