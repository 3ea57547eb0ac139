use std::collections::HashMap;

use parser::types::FragmentDefinition;
use parser::{Pos, Positioned};
use value::Name;

use crate::context::VisitorContext;
use crate::error::ErrorCode;
use crate::visitor::Visitor;

#[derive(Default)]
pub struct UniqueFragmentNames<'a> {
    names: HashMap<&'a str, Pos>,
}

impl<'a> Visitor<'a> for UniqueFragmentNames<'a> {
    fn enter_fragment_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        name: &'a Name,
        fragment_definition: &'a Positioned<FragmentDefinition>,
    ) {
        match self.names.get(name.as_str()) {
            Some(first) => ctx.report_error(
                ErrorCode::UniqueFragmentNames,
                vec![*first, fragment_definition.pos],
                format!("There can be only one fragment named \"{}\".", name),
            ),
            None => {
                self.names.insert(name.as_str(), fragment_definition.pos);
            }
        }
    }
}
