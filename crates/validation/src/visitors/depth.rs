use std::collections::HashMap;

use parser::types::{OperationDefinition, Selection, SelectionSet};
use parser::Positioned;
use value::{ConstValue, Name};

use crate::context::VisitorContext;
use crate::document::Document;
use crate::visitor::Visitor;

/// Records the deepest field nesting of any operation under the `depth` extension.
#[derive(Default)]
pub struct DepthCalculate<'a> {
    max_depth: usize,
    fragment_depths: HashMap<&'a str, Option<usize>>,
}

impl<'a> DepthCalculate<'a> {
    fn selection_set_depth(&mut self, ctx: &VisitorContext<'a>, selection_set: &'a SelectionSet) -> usize {
        let mut depth = 0;
        for selection in &selection_set.items {
            let selection_depth = match &selection.node {
                Selection::Field(field) => {
                    1 + self.selection_set_depth(ctx, &field.node.selection_set.node)
                }
                Selection::InlineFragment(inline_fragment) => {
                    self.selection_set_depth(ctx, &inline_fragment.node.selection_set.node)
                }
                Selection::FragmentSpread(fragment_spread) => {
                    self.fragment_depth(ctx, &fragment_spread.node.fragment_name.node)
                }
            };
            depth = depth.max(selection_depth);
        }
        depth
    }

    fn fragment_depth(&mut self, ctx: &VisitorContext<'a>, name: &'a str) -> usize {
        match self.fragment_depths.get(name) {
            Some(Some(depth)) => return *depth,
            // The fragment is being expanded: a cycle adds nothing.
            Some(None) => return 0,
            None => {}
        }
        let fragment = match ctx.fragment(name) {
            Some(fragment) => fragment,
            None => return 0,
        };

        self.fragment_depths.insert(name, None);
        let depth = self.selection_set_depth(ctx, &fragment.node.selection_set.node);
        self.fragment_depths.insert(name, Some(depth));
        depth
    }
}

impl<'a> Visitor<'a> for DepthCalculate<'a> {
    fn enter_operation_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        _name: Option<&'a Name>,
        operation_definition: &'a Positioned<OperationDefinition>,
    ) {
        let depth = self.selection_set_depth(ctx, &operation_definition.node.selection_set.node);
        self.max_depth = self.max_depth.max(depth);
    }

    fn exit_document(&mut self, ctx: &mut VisitorContext<'a>, _doc: &'a Document) {
        ctx.set_extension("depth", ConstValue::Number(self.max_depth.into()));
    }
}
