use std::collections::HashMap;

use parser::types::OperationDefinition;
use parser::{Pos, Positioned};
use value::Name;

use crate::context::VisitorContext;
use crate::error::ErrorCode;
use crate::visitor::Visitor;

#[derive(Default)]
pub struct UniqueOperationNames<'a> {
    names: HashMap<&'a str, Pos>,
}

impl<'a> Visitor<'a> for UniqueOperationNames<'a> {
    fn enter_operation_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        name: Option<&'a Name>,
        operation_definition: &'a Positioned<OperationDefinition>,
    ) {
        let name = match name {
            Some(name) => name,
            None => return,
        };
        match self.names.get(name.as_str()) {
            Some(first) => ctx.report_error(
                ErrorCode::UniqueOperationNames,
                vec![*first, operation_definition.pos],
                format!("There can be only one operation named \"{}\".", name),
            ),
            None => {
                self.names.insert(name.as_str(), operation_definition.pos);
            }
        }
    }
}
