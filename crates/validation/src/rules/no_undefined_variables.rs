use std::collections::HashSet;

use parser::types::OperationDefinition;
use parser::Positioned;
use value::Name;

use crate::context::VisitorContext;
use crate::error::ErrorCode;
use crate::visitor::Visitor;

#[derive(Default)]
pub struct NoUndefinedVariables;

impl<'a> Visitor<'a> for NoUndefinedVariables {
    fn exit_operation_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        name: Option<&'a Name>,
        operation_definition: &'a Positioned<OperationDefinition>,
    ) {
        let defined = operation_definition
            .node
            .variable_definitions
            .iter()
            .map(|variable_definition| variable_definition.node.name.node.as_str())
            .collect::<HashSet<_>>();

        for usage in ctx
            .recursive_variable_usages(name, operation_definition)
            .iter()
        {
            if defined.contains(usage.name.as_str()) {
                continue;
            }
            let message = match name {
                Some(name) => format!(
                    "Variable \"${}\" is not defined by operation \"{}\".",
                    usage.name, name
                ),
                None => format!("Variable \"${}\" is not defined.", usage.name),
            };
            ctx.report_error(
                ErrorCode::NoUndefinedVariables,
                vec![usage.pos, operation_definition.pos],
                message,
            );
        }
    }
}
