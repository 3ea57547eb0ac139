use std::collections::HashMap;

use parser::types::{OperationDefinition, VariableDefinition};
use parser::{Pos, Positioned};
use value::Name;

use crate::context::VisitorContext;
use crate::error::ErrorCode;
use crate::visitor::Visitor;

#[derive(Default)]
pub struct UniqueVariableNames<'a> {
    names: HashMap<&'a str, Pos>,
}

impl<'a> Visitor<'a> for UniqueVariableNames<'a> {
    fn enter_operation_definition(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _name: Option<&'a Name>,
        _operation_definition: &'a Positioned<OperationDefinition>,
    ) {
        self.names.clear();
    }

    fn enter_variable_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        variable_definition: &'a Positioned<VariableDefinition>,
    ) {
        let name = variable_definition.node.name.node.as_str();
        match self.names.get(name) {
            Some(first) => ctx.report_error(
                ErrorCode::UniqueVariableNames,
                vec![*first, variable_definition.pos],
                format!("There can be only one variable named \"${}\".", name),
            ),
            None => {
                self.names.insert(name, variable_definition.pos);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::validate;
    use crate::Document;

    pub fn factory<'a>() -> UniqueVariableNames<'a> {
        UniqueVariableNames::default()
    }

    #[test]
    fn unique_variable_names() {
        expect_passes_rule!(
            factory,
            r#"
          query A($x: Int, $y: String) { __typename }
          query B($x: String, $y: Int) { __typename }
        "#,
        );
    }

    #[test]
    fn duplicate_variable_names() {
        let doc = Document::parse(
            r#"
          query A($x: Int, $x: Int, $x: String) { __typename }
          query B($x: String, $x: Int) { __typename }
          query C($x: Int, $x: Int) { __typename }
        "#,
        )
        .unwrap();
        let errors = validate(&doc, factory);
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().all(|error| error.code == ErrorCode::UniqueVariableNames
            && error.message == "There can be only one variable named \"$x\"."));
    }
}
