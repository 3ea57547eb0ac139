use std::collections::{HashMap, HashSet};

use parser::types::{FragmentDefinition, FragmentSpread};
use parser::Positioned;
use value::Name;

use crate::context::VisitorContext;
use crate::error::ErrorCode;
use crate::visitor::Visitor;

/// Depth-first search over fragment spreads.
///
/// Fragments are marked verified once their whole spread tree has been explored, so each one
/// is searched at most once however many definitions reach it.
#[derive(Default)]
pub struct NoFragmentCycles<'a> {
    verified: HashSet<&'a str>,
    spread_path: Vec<&'a Positioned<FragmentSpread>>,
    spread_path_index_by_name: HashMap<&'a str, usize>,
}

impl<'a> NoFragmentCycles<'a> {
    fn detect_cycle_recursive(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        name: &'a str,
        fragment: &'a Positioned<FragmentDefinition>,
    ) {
        if self.verified.contains(name) {
            return;
        }

        let spreads = ctx.fragment_spreads(&fragment.node.selection_set.node);
        if spreads.is_empty() {
            self.verified.insert(name);
            return;
        }

        self.spread_path_index_by_name
            .insert(name, self.spread_path.len());

        for spread in spreads {
            let spread_name = spread.node.fragment_name.node.as_str();
            let cycle_index = self.spread_path_index_by_name.get(spread_name).copied();

            self.spread_path.push(spread);
            match cycle_index {
                None => {
                    if let Some(spread_fragment) = ctx.fragment(spread_name) {
                        self.detect_cycle_recursive(ctx, spread_name, spread_fragment);
                    }
                }
                Some(index) => {
                    let cycle_path = &self.spread_path[index..];
                    let via = cycle_path[..cycle_path.len() - 1]
                        .iter()
                        .map(|spread| format!("\"{}\"", spread.node.fragment_name.node))
                        .collect::<Vec<_>>();
                    let message = if via.is_empty() {
                        format!("Cannot spread fragment \"{}\" within itself.", spread_name)
                    } else {
                        format!(
                            "Cannot spread fragment \"{}\" within itself via {}.",
                            spread_name,
                            via.join(", ")
                        )
                    };
                    let locations = cycle_path.iter().map(|spread| spread.pos).collect();
                    ctx.report_error(ErrorCode::NoFragmentCycles, locations, message);
                }
            }
            self.spread_path.pop();
        }

        self.spread_path_index_by_name.remove(name);
        self.verified.insert(name);
    }
}

impl<'a> Visitor<'a> for NoFragmentCycles<'a> {
    fn enter_fragment_definition(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        name: &'a Name,
        fragment_definition: &'a Positioned<FragmentDefinition>,
    ) {
        self.detect_cycle_recursive(ctx, name.as_str(), fragment_definition);
    }
}
