use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use graphcheck_schema::{MetaField, MetaInputValue, MetaType, Schema};
use parser::types::{
    FragmentDefinition, FragmentSpread, OperationDefinition, Selection, SelectionSet, Type,
};
use parser::{Pos, Positioned};
use value::{ConstValue, Name, Variables};

use crate::document::Document;
use crate::error::{ErrorCode, ValidationError};
use crate::type_info::TypeInfo;
use crate::visitor::{visit_fragment_definition, visit_operation_definition, Visitor};

/// Identity of a document node, used as a cache key.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub fn of<T>(node: &T) -> Self {
        NodeId(node as *const T as usize)
    }
}

/// A variable referenced from a value position.
#[derive(Debug, Copy, Clone)]
pub struct VariableUsage<'a> {
    pub name: &'a Name,
    pub pos: Pos,
    /// The input type expected where the variable is used, when it is known.
    pub ty: Option<&'a Type>,
    /// The default of the argument or input field the variable is passed to.
    pub default_value: Option<&'a ConstValue>,
}

pub type FragmentRef<'a> = (&'a Name, &'a Positioned<FragmentDefinition>);

#[derive(Copy, Clone)]
enum UsageScope<'a> {
    Operation(Option<&'a Name>, &'a Positioned<OperationDefinition>),
    Fragment(FragmentRef<'a>),
}

pub struct VisitorContext<'a> {
    pub(crate) schema: &'a Schema,
    pub(crate) document: &'a Document,
    pub(crate) variables: &'a Variables,
    pub(crate) errors: Vec<ValidationError>,
    pub(crate) extensions: HashMap<String, ConstValue>,
    pub(crate) type_info: TypeInfo<'a>,
    fragments: HashMap<&'a str, FragmentRef<'a>>,
    fragment_closures: HashMap<NodeId, Rc<[FragmentRef<'a>]>>,
    variable_usages: HashMap<NodeId, Rc<[VariableUsage<'a>]>>,
    recursive_variable_usages: HashMap<NodeId, Rc<[VariableUsage<'a>]>>,
}

impl<'a> VisitorContext<'a> {
    pub fn new(schema: &'a Schema, document: &'a Document, variables: &'a Variables) -> Self {
        let mut fragments = HashMap::new();
        for (name, fragment) in document.fragments() {
            fragments.entry(name.as_str()).or_insert((name, fragment));
        }

        Self {
            schema,
            document,
            variables,
            errors: Vec::new(),
            extensions: HashMap::new(),
            type_info: TypeInfo::new(schema),
            fragments,
            fragment_closures: HashMap::new(),
            variable_usages: HashMap::new(),
            recursive_variable_usages: HashMap::new(),
        }
    }

    pub fn report_error<T: Into<String>>(&mut self, code: ErrorCode, locations: Vec<Pos>, msg: T) {
        let message = msg.into();
        tracing::trace!(code = %code, message = %message, "Validation error.");
        self.errors.push(ValidationError {
            code,
            message,
            locations,
        });
    }

    pub fn set_extension(&mut self, key: impl Into<String>, value: ConstValue) {
        self.extensions.insert(key.into(), value);
    }

    #[inline]
    pub fn current_type(&self) -> Option<&'a MetaType> {
        self.type_info.current_type()
    }

    #[inline]
    pub fn parent_type(&self) -> Option<&'a MetaType> {
        self.type_info.parent_type()
    }

    #[inline]
    pub fn field_def(&self) -> Option<&'a MetaField> {
        self.type_info.field_def()
    }

    #[inline]
    pub fn input_type(&self) -> Option<&'a Type> {
        self.type_info.input_type()
    }

    #[inline]
    pub fn default_value(&self) -> Option<&'a ConstValue> {
        self.type_info.default_value()
    }

    #[inline]
    pub fn argument(&self) -> Option<&'a MetaInputValue> {
        self.type_info.argument()
    }

    /// The first fragment definition with this name.
    #[inline]
    pub fn fragment(&self, name: &str) -> Option<&'a Positioned<FragmentDefinition>> {
        self.fragments.get(name).map(|(_, fragment)| *fragment)
    }

    #[inline]
    pub fn is_known_fragment(&self, name: &str) -> bool {
        self.fragments.contains_key(name)
    }

    /// Fragment spreads directly inside a selection set, in document order, including those
    /// nested in fields and inline fragments but not those inside spread fragments.
    pub fn fragment_spreads(&self, selection_set: &'a SelectionSet) -> Vec<&'a Positioned<FragmentSpread>> {
        fn collect<'a>(selection_set: &'a SelectionSet, spreads: &mut Vec<&'a Positioned<FragmentSpread>>) {
            for selection in &selection_set.items {
                match &selection.node {
                    Selection::Field(field) => collect(&field.node.selection_set.node, spreads),
                    Selection::FragmentSpread(spread) => spreads.push(spread),
                    Selection::InlineFragment(inline_fragment) => {
                        collect(&inline_fragment.node.selection_set.node, spreads)
                    }
                }
            }
        }

        let mut spreads = Vec::new();
        collect(selection_set, &mut spreads);
        spreads
    }

    /// Every fragment reachable from a selection set through spreads, in discovery order.
    pub fn recursively_referenced_fragments(
        &mut self,
        selection_set: &'a Positioned<SelectionSet>,
    ) -> Rc<[FragmentRef<'a>]> {
        let key = NodeId::of(selection_set);
        if let Some(fragments) = self.fragment_closures.get(&key) {
            return fragments.clone();
        }

        let mut fragments = Vec::new();
        let mut collected = HashSet::new();
        let mut sets_to_visit = vec![&selection_set.node];
        while let Some(selection_set) = sets_to_visit.pop() {
            for spread in self.fragment_spreads(selection_set) {
                let name = spread.node.fragment_name.node.as_str();
                if !collected.insert(name) {
                    continue;
                }
                if let Some(&(name, fragment)) = self.fragments.get(name) {
                    fragments.push((name, fragment));
                    sets_to_visit.push(&fragment.node.selection_set.node);
                }
            }
        }

        let fragments: Rc<[FragmentRef<'a>]> = fragments.into();
        self.fragment_closures.insert(key, fragments.clone());
        fragments
    }

    /// Variables used by an operation and by every fragment it references.
    pub fn recursive_variable_usages(
        &mut self,
        name: Option<&'a Name>,
        operation: &'a Positioned<OperationDefinition>,
    ) -> Rc<[VariableUsage<'a>]> {
        let key = NodeId::of(operation);
        if let Some(usages) = self.recursive_variable_usages.get(&key) {
            return usages.clone();
        }

        let mut usages = self
            .variable_usages(UsageScope::Operation(name, operation))
            .to_vec();
        let fragments = self.recursively_referenced_fragments(&operation.node.selection_set);
        for fragment in fragments.iter() {
            usages.extend(self.variable_usages(UsageScope::Fragment(*fragment)).iter());
        }

        let usages: Rc<[VariableUsage<'a>]> = usages.into();
        self.recursive_variable_usages.insert(key, usages.clone());
        usages
    }

    fn variable_usages(&mut self, scope: UsageScope<'a>) -> Rc<[VariableUsage<'a>]> {
        let key = match scope {
            UsageScope::Operation(_, operation) => NodeId::of(operation),
            UsageScope::Fragment((_, fragment)) => NodeId::of(fragment),
        };
        if let Some(usages) = self.variable_usages.get(&key) {
            return usages.clone();
        }

        // A fresh context keeps the type stacks of the outer traversal untouched.
        let mut ctx = VisitorContext::new(self.schema, self.document, self.variables);
        let mut collector = VariableUsageCollector::default();
        match scope {
            UsageScope::Operation(name, operation) => {
                visit_operation_definition(&mut collector, &mut ctx, name, operation)
            }
            UsageScope::Fragment((name, fragment)) => {
                visit_fragment_definition(&mut collector, &mut ctx, name, fragment)
            }
        }

        let usages: Rc<[VariableUsage<'a>]> = collector.usages.into();
        self.variable_usages.insert(key, usages.clone());
        usages
    }
}

#[derive(Default)]
struct VariableUsageCollector<'a> {
    usages: Vec<VariableUsage<'a>>,
}

impl<'a> Visitor<'a> for VariableUsageCollector<'a> {
    fn enter_variable(&mut self, ctx: &mut VisitorContext<'a>, pos: Pos, name: &'a Name) {
        self.usages.push(VariableUsage {
            name,
            pos,
            ty: ctx.input_type(),
            default_value: ctx.default_value(),
        });
    }
}
