use std::collections::HashMap;

use parser::types::{Directive, Field};
use parser::{Pos, Positioned};
use value::{Name, Value};

use crate::context::VisitorContext;
use crate::error::ErrorCode;
use crate::visitor::Visitor;

#[derive(Default)]
pub struct UniqueArgumentNames<'a> {
    names: HashMap<&'a str, Pos>,
}

impl<'a> Visitor<'a> for UniqueArgumentNames<'a> {
    fn enter_directive(&mut self, _ctx: &mut VisitorContext<'a>, _directive: &'a Positioned<Directive>) {
        self.names.clear();
    }

    fn enter_argument(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        name: &'a Positioned<Name>,
        _value: &'a Positioned<Value>,
    ) {
        match self.names.get(name.node.as_str()) {
            Some(first) => ctx.report_error(
                ErrorCode::UniqueArgumentNames,
                vec![*first, name.pos],
                format!("There can be only one argument named \"{}\".", name.node),
            ),
            None => {
                self.names.insert(&name.node, name.pos);
            }
        }
    }

    fn enter_field(&mut self, _ctx: &mut VisitorContext<'a>, _field: &'a Positioned<Field>) {
        self.names.clear();
    }
}
