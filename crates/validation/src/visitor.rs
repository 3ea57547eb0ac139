use parser::types::{
    Directive, Field, FragmentDefinition, FragmentSpread, InlineFragment, OperationDefinition,
    Selection, SelectionSet, VariableDefinition,
};
use parser::{Pos, Positioned};
use value::{Name, Value};

use crate::context::VisitorContext;
use crate::document::{Definition, Document};

/// A node of an executable document, as seen by the walker.
#[derive(Debug, Copy, Clone)]
pub enum Node<'a> {
    Document(&'a Document),
    OperationDefinition(Option<&'a Name>, &'a Positioned<OperationDefinition>),
    FragmentDefinition(&'a Name, &'a Positioned<FragmentDefinition>),
    VariableDefinition(&'a Positioned<VariableDefinition>),
    Directive(&'a Positioned<Directive>),
    Argument(&'a Positioned<Name>, &'a Positioned<Value>),
    SelectionSet(&'a Positioned<SelectionSet>),
    Selection(&'a Positioned<Selection>),
    Field(&'a Positioned<Field>),
    FragmentSpread(&'a Positioned<FragmentSpread>),
    InlineFragment(&'a Positioned<InlineFragment>),
    Value(Pos, &'a Value),
    ListItem(Pos, &'a Value),
    ObjectField(Pos, &'a Name, &'a Value),
    Variable(Pos, &'a Name),
}

pub trait Visitor<'a> {
    fn enter(&mut self, ctx: &mut VisitorContext<'a>, node: Node<'a>) {
        match node {
            Node::Document(doc) => self.enter_document(ctx, doc),
            Node::OperationDefinition(name, operation_definition) => {
                self.enter_operation_definition(ctx, name, operation_definition)
            }
            Node::FragmentDefinition(name, fragment_definition) => {
                self.enter_fragment_definition(ctx, name, fragment_definition)
            }
            Node::VariableDefinition(variable_definition) => {
                self.enter_variable_definition(ctx, variable_definition)
            }
            Node::Directive(directive) => self.enter_directive(ctx, directive),
            Node::Argument(name, value) => self.enter_argument(ctx, name, value),
            Node::SelectionSet(selection_set) => self.enter_selection_set(ctx, selection_set),
            Node::Selection(selection) => self.enter_selection(ctx, selection),
            Node::Field(field) => self.enter_field(ctx, field),
            Node::FragmentSpread(fragment_spread) => {
                self.enter_fragment_spread(ctx, fragment_spread)
            }
            Node::InlineFragment(inline_fragment) => {
                self.enter_inline_fragment(ctx, inline_fragment)
            }
            Node::Value(pos, value) => self.enter_input_value(ctx, pos, value),
            Node::ListItem(pos, value) => self.enter_list_item(ctx, pos, value),
            Node::ObjectField(pos, name, value) => self.enter_object_field(ctx, pos, name, value),
            Node::Variable(pos, name) => self.enter_variable(ctx, pos, name),
        }
    }

    fn leave(&mut self, ctx: &mut VisitorContext<'a>, node: Node<'a>) {
        match node {
            Node::Document(doc) => self.exit_document(ctx, doc),
            Node::OperationDefinition(name, operation_definition) => {
                self.exit_operation_definition(ctx, name, operation_definition)
            }
            Node::FragmentDefinition(name, fragment_definition) => {
                self.exit_fragment_definition(ctx, name, fragment_definition)
            }
            Node::VariableDefinition(variable_definition) => {
                self.exit_variable_definition(ctx, variable_definition)
            }
            Node::Directive(directive) => self.exit_directive(ctx, directive),
            Node::Argument(name, value) => self.exit_argument(ctx, name, value),
            Node::SelectionSet(selection_set) => self.exit_selection_set(ctx, selection_set),
            Node::Selection(selection) => self.exit_selection(ctx, selection),
            Node::Field(field) => self.exit_field(ctx, field),
            Node::FragmentSpread(fragment_spread) => {
                self.exit_fragment_spread(ctx, fragment_spread)
            }
            Node::InlineFragment(inline_fragment) => {
                self.exit_inline_fragment(ctx, inline_fragment)
            }
            Node::Value(pos, value) => self.exit_input_value(ctx, pos, value),
            Node::ListItem(pos, value) => self.exit_list_item(ctx, pos, value),
            Node::ObjectField(pos, name, value) => self.exit_object_field(ctx, pos, name, value),
            Node::Variable(pos, name) => self.exit_variable(ctx, pos, name),
        }
    }

    fn enter_document(&mut self, _ctx: &mut VisitorContext<'a>, _doc: &'a Document) {}
    fn exit_document(&mut self, _ctx: &mut VisitorContext<'a>, _doc: &'a Document) {}

    fn enter_operation_definition(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _name: Option<&'a Name>,
        _operation_definition: &'a Positioned<OperationDefinition>,
    ) {
    }
    fn exit_operation_definition(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _name: Option<&'a Name>,
        _operation_definition: &'a Positioned<OperationDefinition>,
    ) {
    }

    fn enter_fragment_definition(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _name: &'a Name,
        _fragment_definition: &'a Positioned<FragmentDefinition>,
    ) {
    }
    fn exit_fragment_definition(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _name: &'a Name,
        _fragment_definition: &'a Positioned<FragmentDefinition>,
    ) {
    }

    fn enter_variable_definition(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _variable_definition: &'a Positioned<VariableDefinition>,
    ) {
    }
    fn exit_variable_definition(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _variable_definition: &'a Positioned<VariableDefinition>,
    ) {
    }

    fn enter_directive(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _directive: &'a Positioned<Directive>,
    ) {
    }
    fn exit_directive(&mut self, _ctx: &mut VisitorContext<'a>, _directive: &'a Positioned<Directive>) {}

    fn enter_argument(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _name: &'a Positioned<Name>,
        _value: &'a Positioned<Value>,
    ) {
    }
    fn exit_argument(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _name: &'a Positioned<Name>,
        _value: &'a Positioned<Value>,
    ) {
    }

    fn enter_selection_set(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _selection_set: &'a Positioned<SelectionSet>,
    ) {
    }
    fn exit_selection_set(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _selection_set: &'a Positioned<SelectionSet>,
    ) {
    }

    fn enter_selection(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _selection: &'a Positioned<Selection>,
    ) {
    }
    fn exit_selection(&mut self, _ctx: &mut VisitorContext<'a>, _selection: &'a Positioned<Selection>) {}

    fn enter_field(&mut self, _ctx: &mut VisitorContext<'a>, _field: &'a Positioned<Field>) {}
    fn exit_field(&mut self, _ctx: &mut VisitorContext<'a>, _field: &'a Positioned<Field>) {}

    fn enter_fragment_spread(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _fragment_spread: &'a Positioned<FragmentSpread>,
    ) {
    }
    fn exit_fragment_spread(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _fragment_spread: &'a Positioned<FragmentSpread>,
    ) {
    }

    fn enter_inline_fragment(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _inline_fragment: &'a Positioned<InlineFragment>,
    ) {
    }
    fn exit_inline_fragment(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _inline_fragment: &'a Positioned<InlineFragment>,
    ) {
    }

    fn enter_input_value(&mut self, _ctx: &mut VisitorContext<'a>, _pos: Pos, _value: &'a Value) {}
    fn exit_input_value(&mut self, _ctx: &mut VisitorContext<'a>, _pos: Pos, _value: &'a Value) {}

    fn enter_list_item(&mut self, _ctx: &mut VisitorContext<'a>, _pos: Pos, _value: &'a Value) {}
    fn exit_list_item(&mut self, _ctx: &mut VisitorContext<'a>, _pos: Pos, _value: &'a Value) {}

    fn enter_object_field(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _pos: Pos,
        _name: &'a Name,
        _value: &'a Value,
    ) {
    }
    fn exit_object_field(
        &mut self,
        _ctx: &mut VisitorContext<'a>,
        _pos: Pos,
        _name: &'a Name,
        _value: &'a Value,
    ) {
    }

    fn enter_variable(&mut self, _ctx: &mut VisitorContext<'a>, _pos: Pos, _name: &'a Name) {}
    fn exit_variable(&mut self, _ctx: &mut VisitorContext<'a>, _pos: Pos, _name: &'a Name) {}
}

/// Runs several visitors in lockstep over a single traversal.
pub struct VisitorList<'a>(Vec<Box<dyn Visitor<'a> + 'a>>);

impl<'a> VisitorList<'a> {
    pub fn new(visitors: Vec<Box<dyn Visitor<'a> + 'a>>) -> Self {
        Self(visitors)
    }
}

impl<'a> Visitor<'a> for VisitorList<'a> {
    fn enter(&mut self, ctx: &mut VisitorContext<'a>, node: Node<'a>) {
        for visitor in &mut self.0 {
            visitor.enter(ctx, node);
        }
    }

    fn leave(&mut self, ctx: &mut VisitorContext<'a>, node: Node<'a>) {
        for visitor in &mut self.0 {
            visitor.leave(ctx, node);
        }
    }
}

fn enter<'a, V: Visitor<'a> + ?Sized>(v: &mut V, ctx: &mut VisitorContext<'a>, node: Node<'a>) {
    ctx.type_info.enter(node);
    v.enter(ctx, node);
}

fn leave<'a, V: Visitor<'a> + ?Sized>(v: &mut V, ctx: &mut VisitorContext<'a>, node: Node<'a>) {
    v.leave(ctx, node);
    ctx.type_info.leave(node);
}

pub fn visit<'a, V: Visitor<'a> + ?Sized>(v: &mut V, ctx: &mut VisitorContext<'a>, doc: &'a Document) {
    enter(v, ctx, Node::Document(doc));
    for definition in doc.definitions() {
        match definition {
            Definition::Operation(name, operation_definition) => {
                visit_operation_definition(v, ctx, name.as_ref(), operation_definition)
            }
            Definition::Fragment(name, fragment_definition) => {
                visit_fragment_definition(v, ctx, name, fragment_definition)
            }
        }
    }
    leave(v, ctx, Node::Document(doc));
}

pub(crate) fn visit_operation_definition<'a, V: Visitor<'a> + ?Sized>(
    v: &mut V,
    ctx: &mut VisitorContext<'a>,
    name: Option<&'a Name>,
    operation: &'a Positioned<OperationDefinition>,
) {
    enter(v, ctx, Node::OperationDefinition(name, operation));
    for variable_definition in &operation.node.variable_definitions {
        enter(v, ctx, Node::VariableDefinition(variable_definition));
        visit_directives(v, ctx, &variable_definition.node.directives);
        leave(v, ctx, Node::VariableDefinition(variable_definition));
    }
    visit_directives(v, ctx, &operation.node.directives);
    visit_selection_set(v, ctx, &operation.node.selection_set);
    leave(v, ctx, Node::OperationDefinition(name, operation));
}

pub(crate) fn visit_fragment_definition<'a, V: Visitor<'a> + ?Sized>(
    v: &mut V,
    ctx: &mut VisitorContext<'a>,
    name: &'a Name,
    fragment: &'a Positioned<FragmentDefinition>,
) {
    enter(v, ctx, Node::FragmentDefinition(name, fragment));
    visit_directives(v, ctx, &fragment.node.directives);
    visit_selection_set(v, ctx, &fragment.node.selection_set);
    leave(v, ctx, Node::FragmentDefinition(name, fragment));
}

fn visit_selection_set<'a, V: Visitor<'a> + ?Sized>(
    v: &mut V,
    ctx: &mut VisitorContext<'a>,
    selection_set: &'a Positioned<SelectionSet>,
) {
    enter(v, ctx, Node::SelectionSet(selection_set));
    for selection in &selection_set.node.items {
        enter(v, ctx, Node::Selection(selection));
        match &selection.node {
            Selection::Field(field) => {
                enter(v, ctx, Node::Field(field));
                visit_arguments(v, ctx, &field.node.arguments);
                visit_directives(v, ctx, &field.node.directives);
                visit_selection_set(v, ctx, &field.node.selection_set);
                leave(v, ctx, Node::Field(field));
            }
            Selection::FragmentSpread(fragment_spread) => {
                enter(v, ctx, Node::FragmentSpread(fragment_spread));
                visit_directives(v, ctx, &fragment_spread.node.directives);
                leave(v, ctx, Node::FragmentSpread(fragment_spread));
            }
            Selection::InlineFragment(inline_fragment) => {
                enter(v, ctx, Node::InlineFragment(inline_fragment));
                visit_directives(v, ctx, &inline_fragment.node.directives);
                visit_selection_set(v, ctx, &inline_fragment.node.selection_set);
                leave(v, ctx, Node::InlineFragment(inline_fragment));
            }
        }
        leave(v, ctx, Node::Selection(selection));
    }
    leave(v, ctx, Node::SelectionSet(selection_set));
}

fn visit_directives<'a, V: Visitor<'a> + ?Sized>(
    v: &mut V,
    ctx: &mut VisitorContext<'a>,
    directives: &'a [Positioned<Directive>],
) {
    for directive in directives {
        enter(v, ctx, Node::Directive(directive));
        visit_arguments(v, ctx, &directive.node.arguments);
        leave(v, ctx, Node::Directive(directive));
    }
}

fn visit_arguments<'a, V: Visitor<'a> + ?Sized>(
    v: &mut V,
    ctx: &mut VisitorContext<'a>,
    arguments: &'a [(Positioned<Name>, Positioned<Value>)],
) {
    for (name, value) in arguments {
        enter(v, ctx, Node::Argument(name, value));
        visit_input_value(v, ctx, value.pos, &value.node);
        leave(v, ctx, Node::Argument(name, value));
    }
}

fn visit_input_value<'a, V: Visitor<'a> + ?Sized>(
    v: &mut V,
    ctx: &mut VisitorContext<'a>,
    pos: Pos,
    value: &'a Value,
) {
    enter(v, ctx, Node::Value(pos, value));
    match value {
        Value::Variable(name) => {
            enter(v, ctx, Node::Variable(pos, name));
            leave(v, ctx, Node::Variable(pos, name));
        }
        Value::List(items) => {
            for item in items {
                enter(v, ctx, Node::ListItem(pos, item));
                visit_input_value(v, ctx, pos, item);
                leave(v, ctx, Node::ListItem(pos, item));
            }
        }
        Value::Object(fields) => {
            for (name, field) in fields {
                enter(v, ctx, Node::ObjectField(pos, name, field));
                visit_input_value(v, ctx, pos, field);
                leave(v, ctx, Node::ObjectField(pos, name, field));
            }
        }
        _ => {}
    }
    leave(v, ctx, Node::Value(pos, value));
}
