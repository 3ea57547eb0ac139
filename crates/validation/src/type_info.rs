use graphcheck_schema::{MetaDirective, MetaField, MetaInputValue, MetaType, Schema, TypeExt, TypeKind};
use parser::types::Type;
use value::ConstValue;

use crate::visitor::Node;

/// Tracks the schema types in scope while walking a document.
///
/// Every stack is pushed when a node is entered and popped when it is left, so lookups
/// always reflect the node currently being visited.
pub struct TypeInfo<'a> {
    schema: &'a Schema,
    type_stack: Vec<Option<&'a MetaType>>,
    parent_type_stack: Vec<Option<&'a MetaType>>,
    field_def_stack: Vec<Option<&'a MetaField>>,
    input_type_stack: Vec<Option<&'a Type>>,
    default_value_stack: Vec<Option<&'a ConstValue>>,
    /// `Some` while inside a directive, holding its definition when the name is known.
    directive: Option<Option<&'a MetaDirective>>,
    argument: Option<&'a MetaInputValue>,
}

impl<'a> TypeInfo<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            type_stack: Vec::new(),
            parent_type_stack: Vec::new(),
            field_def_stack: Vec::new(),
            input_type_stack: Vec::new(),
            default_value_stack: Vec::new(),
            directive: None,
            argument: None,
        }
    }

    #[inline]
    pub fn current_type(&self) -> Option<&'a MetaType> {
        self.type_stack.last().copied().flatten()
    }

    #[inline]
    pub fn parent_type(&self) -> Option<&'a MetaType> {
        self.parent_type_stack.last().copied().flatten()
    }

    #[inline]
    pub fn field_def(&self) -> Option<&'a MetaField> {
        self.field_def_stack.last().copied().flatten()
    }

    #[inline]
    pub fn input_type(&self) -> Option<&'a Type> {
        self.input_type_stack.last().copied().flatten()
    }

    #[inline]
    pub fn default_value(&self) -> Option<&'a ConstValue> {
        self.default_value_stack.last().copied().flatten()
    }

    #[inline]
    pub fn argument(&self) -> Option<&'a MetaInputValue> {
        self.argument
    }

    pub fn enter(&mut self, node: Node<'a>) {
        let schema = self.schema;
        match node {
            Node::OperationDefinition(_, operation) => {
                self.type_stack.push(schema.root_type(operation.node.ty));
            }
            Node::FragmentDefinition(_, fragment) => {
                let type_condition = &fragment.node.type_condition.node.on.node;
                self.type_stack.push(schema.named_type(type_condition));
            }
            Node::InlineFragment(inline_fragment) => {
                let ty = match &inline_fragment.node.type_condition {
                    Some(type_condition) => schema.named_type(&type_condition.node.on.node),
                    None => self.current_type(),
                };
                self.type_stack.push(ty);
            }
            Node::SelectionSet(_) => {
                let parent_type = self.current_type().filter(|ty| ty.is_composite());
                self.parent_type_stack.push(parent_type);
            }
            Node::Field(field) => {
                let field_def = self
                    .parent_type()
                    .and_then(|parent_type| field_definition(schema, parent_type, &field.node.name.node));
                self.field_def_stack.push(field_def);
                self.type_stack
                    .push(field_def.and_then(|field_def| schema.concrete_type(&field_def.ty)));
            }
            Node::VariableDefinition(variable_definition) => {
                self.input_type_stack
                    .push(Some(&variable_definition.node.var_type.node));
                self.default_value_stack.push(None);
            }
            Node::Directive(directive) => {
                self.directive = Some(schema.directive(&directive.node.name.node));
            }
            Node::Argument(name, _) => {
                let arguments = match self.directive {
                    Some(directive) => directive.map(|directive| &directive.arguments),
                    None => self.field_def().map(|field_def| &field_def.arguments),
                };
                let argument = arguments.and_then(|arguments| arguments.get(name.node.as_str()));
                self.argument = argument;
                self.input_type_stack.push(argument.map(|argument| &argument.ty));
                self.default_value_stack
                    .push(argument.and_then(|argument| argument.default_value.as_ref()));
            }
            Node::ListItem(..) => {
                let item_type = self
                    .input_type()
                    .map(|ty| ty.list_element().unwrap_or(ty));
                self.input_type_stack.push(item_type);
                self.default_value_stack.push(None);
            }
            Node::ObjectField(_, name, _) => {
                let input_field = self
                    .input_type()
                    .filter(|ty| ty.list_element().is_none())
                    .and_then(|ty| schema.concrete_type(ty))
                    .filter(|ty| ty.kind == TypeKind::InputObject)
                    .and_then(|ty| ty.input_field(name));
                self.input_type_stack
                    .push(input_field.map(|input_field| &input_field.ty));
                self.default_value_stack.push(
                    input_field.and_then(|input_field| input_field.default_value.as_ref()),
                );
            }
            Node::Document(_)
            | Node::Selection(_)
            | Node::FragmentSpread(_)
            | Node::Value(..)
            | Node::Variable(..) => {}
        }
    }

    pub fn leave(&mut self, node: Node<'a>) {
        match node {
            Node::OperationDefinition(..)
            | Node::FragmentDefinition(..)
            | Node::InlineFragment(_) => {
                self.type_stack.pop();
            }
            Node::SelectionSet(_) => {
                self.parent_type_stack.pop();
            }
            Node::Field(_) => {
                self.field_def_stack.pop();
                self.type_stack.pop();
            }
            Node::Directive(_) => {
                self.directive = None;
            }
            Node::Argument(..) => {
                self.argument = None;
                self.input_type_stack.pop();
                self.default_value_stack.pop();
            }
            Node::VariableDefinition(_) | Node::ListItem(..) | Node::ObjectField(..) => {
                self.input_type_stack.pop();
                self.default_value_stack.pop();
            }
            Node::Document(_)
            | Node::Selection(_)
            | Node::FragmentSpread(_)
            | Node::Value(..)
            | Node::Variable(..) => {}
        }
    }
}

/// Looks up a field selected on `parent_type`, including the `__typename` meta field.
pub fn field_definition<'a>(
    schema: &'a Schema,
    parent_type: &'a MetaType,
    name: &str,
) -> Option<&'a MetaField> {
    if name == "__typename" && parent_type.is_composite() {
        return Some(schema.typename_field());
    }
    parent_type.field_by_name(name)
}
