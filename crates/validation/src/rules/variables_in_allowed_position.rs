use std::collections::HashMap;

use parser::types::{OperationDefinition, VariableDefinition};
use parser::Positioned;
use value::Name;

use crate::context::VisitorContext;
use crate::error::ErrorCode;
use crate::type_compare::is_allowed_variable_usage;
use crate::utils::is_input_type;
use crate::visitor::Visitor;

#[derive(Default)]
pub struct VariablesInAllowedPosition;

impl<'a> Visitor<'a> for VariablesInAllowedPosition {
    fn exit_operation_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        name: Option<&'a Name>,
        operation_definition: &'a Positioned<OperationDefinition>,
    ) {
        let mut variable_definitions: HashMap<&str, &Positioned<VariableDefinition>> = HashMap::new();
        for variable_definition in &operation_definition.node.variable_definitions {
            variable_definitions
                .entry(variable_definition.node.name.node.as_str())
                .or_insert(variable_definition);
        }

        // Every usage is checked, so one variable passed to several positions is judged
        // against each of them.
        for usage in ctx
            .recursive_variable_usages(name, operation_definition)
            .iter()
        {
            let (variable_definition, location_type) =
                match (variable_definitions.get(usage.name.as_str()), usage.ty) {
                    (Some(variable_definition), Some(location_type)) => {
                        (*variable_definition, location_type)
                    }
                    _ => continue,
                };
            let variable_type = &variable_definition.node.var_type.node;
            if !is_input_type(ctx.schema, variable_type) {
                continue;
            }

            if !is_allowed_variable_usage(
                ctx.schema,
                variable_type,
                variable_definition
                    .node
                    .default_value
                    .as_ref()
                    .map(|value| &value.node),
                location_type,
                usage.default_value.is_some(),
            ) {
                ctx.report_error(
                    ErrorCode::VariablesInAllowedPosition,
                    vec![variable_definition.pos, usage.pos],
                    format!(
                        "Variable \"${}\" of type \"{}\" used in position expecting type \"{}\".",
                        usage.name, variable_type, location_type
                    ),
                );
            }
        }
    }
}
