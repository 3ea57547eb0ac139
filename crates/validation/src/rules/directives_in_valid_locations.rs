use parser::types::{
    Directive, DirectiveLocation, Field, FragmentDefinition, FragmentSpread, InlineFragment,
    OperationDefinition, OperationType, VariableDefinition,
};
use parser::Positioned;
use value::Name;

use crate::context::VisitorContext;
use crate::error::ErrorCode;
use crate::visitor::Visitor;

#[derive(Default)]
pub struct DirectivesInValidLocations {
    location_stack: Vec<(DirectiveLocation, &'static str)>,
}

impl<'a> Visitor<'a> for DirectivesInValidLocations {
    fn enter_operation_definition(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _name: Option<&'a Name>,
        operation_definition: &'a Positioned<OperationDefinition>,
    ) {
        self.location_stack.push(match operation_definition.node.ty {
            OperationType::Query => (DirectiveLocation::Query, "QUERY"),
            OperationType::Mutation => (DirectiveLocation::Mutation, "MUTATION"),
            OperationType::Subscription => (DirectiveLocation::Subscription, "SUBSCRIPTION"),
        });
    }

    fn exit_operation_definition(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _name: Option<&'a Name>,
        _operation_definition: &'a Positioned<OperationDefinition>,
    ) {
        self.location_stack.pop();
    }

    fn enter_fragment_definition(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _name: &'a Name,
        _fragment_definition: &'a Positioned<FragmentDefinition>,
    ) {
        self.location_stack
            .push((DirectiveLocation::FragmentDefinition, "FRAGMENT_DEFINITION"));
    }

    fn exit_fragment_definition(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _name: &'a Name,
        _fragment_definition: &'a Positioned<FragmentDefinition>,
    ) {
        self.location_stack.pop();
    }

    fn enter_variable_definition(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _variable_definition: &'a Positioned<VariableDefinition>,
    ) {
        self.location_stack
            .push((DirectiveLocation::VariableDefinition, "VARIABLE_DEFINITION"));
    }

    fn exit_variable_definition(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _variable_definition: &'a Positioned<VariableDefinition>,
    ) {
        self.location_stack.pop();
    }

    fn enter_directive(&mut self, ctx: &mut VisitorContext<'a>, directive: &'a Positioned<Directive>) {
        let schema_directive = match ctx.schema.directive(&directive.node.name.node) {
            Some(schema_directive) => schema_directive,
            None => return,
        };

        if let Some((location, location_name)) = self.location_stack.last() {
            if !schema_directive.locations.contains(location) {
                ctx.report_error(
                    ErrorCode::DirectivesInValidLocations,
                    vec![directive.pos],
                    format!(
                        "Directive \"@{}\" may not be used on {}.",
                        directive.node.name.node, location_name
                    ),
                );
            }
        }
    }

    fn enter_field(&mut self, _ctx: &mut VisitorContext<'a>, _field: &'a Positioned<Field>) {
        self.location_stack.push((DirectiveLocation::Field, "FIELD"));
    }

    fn exit_field(&mut self, _ctx: &mut VisitorContext<'a>, _field: &'a Positioned<Field>) {
        self.location_stack.pop();
    }

    fn enter_fragment_spread(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _fragment_spread: &'a Positioned<FragmentSpread>,
    ) {
        self.location_stack
            .push((DirectiveLocation::FragmentSpread, "FRAGMENT_SPREAD"));
    }

    fn exit_fragment_spread(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _fragment_spread: &'a Positioned<FragmentSpread>,
    ) {
        self.location_stack.pop();
    }

    fn enter_inline_fragment(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _inline_fragment: &'a Positioned<InlineFragment>,
    ) {
        self.location_stack
            .push((DirectiveLocation::InlineFragment, "INLINE_FRAGMENT"));
    }

    fn exit_inline_fragment(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _inline_fragment: &'a Positioned<InlineFragment>,
    ) {
        self.location_stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::validate;
    use crate::Document;

    pub fn factory() -> DirectivesInValidLocations {
        DirectivesInValidLocations::default()
    }

    #[test]
    fn with_well_placed_directives() {
        expect_passes_rule!(
            factory,
            r#"
          query Foo($var: Boolean @onVariableDefinition) @onQuery {
            dog @include(if: true) { name }
            ...Frag @include(if: true) @onFragmentSpread
            skippedField @skip(if: true)
            ... on Query @onInlineFragment { dog { name } }
          }
          mutation Bar @onMutation {
            someField
          }
          subscription Baz @onSubscription {
            newMessage { body }
          }
          fragment Frag on Query @onFragmentDefinition {
            dog { name @onField }
          }
        "#,
        );
    }

    #[test]
    fn with_misplaced_directives() {
        let doc = Document::parse(
            r#"
          query Foo($var: Boolean @onField) @include(if: true) {
            name @onQuery @include(if: $var)
            ...Frag @onQuery
          }
          mutation Bar @onQuery {
            someField
          }
        "#,
        )
        .unwrap();
        let errors = validate(&doc, factory);
        let messages = errors.iter().map(|error| error.message.as_str()).collect::<Vec<_>>();
        assert_eq!(
            messages,
            vec![
                "Directive \"@onField\" may not be used on VARIABLE_DEFINITION.",
                "Directive \"@include\" may not be used on QUERY.",
                "Directive \"@onQuery\" may not be used on FIELD.",
                "Directive \"@onQuery\" may not be used on FRAGMENT_SPREAD.",
                "Directive \"@onQuery\" may not be used on MUTATION.",
            ]
        );
        assert!(errors
            .iter()
            .all(|error| error.code == ErrorCode::DirectivesInValidLocations));
    }

    #[test]
    fn ignores_unknown_directives() {
        expect_passes_rule!(
            factory,
            r#"
          {
            dog @unknown { name }
          }
        "#,
        );
    }
}
