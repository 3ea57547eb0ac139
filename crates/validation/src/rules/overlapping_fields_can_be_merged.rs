use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use graphcheck_schema::{MetaField, MetaType, Schema, TypeKind};
use indexmap::{IndexMap, IndexSet};
use parser::types::{Field, FragmentDefinition, Selection, SelectionSet};
use parser::Positioned;

use crate::context::{NodeId, VisitorContext};
use crate::error::ErrorCode;
use crate::type_compare::types_conflict;
use crate::type_info::field_definition;
use crate::utils::coerce_input_value;
use crate::visitor::Visitor;

/// A selected field with the type it was selected on and its definition, when known.
type FieldEntry<'a> = (Option<&'a MetaType>, &'a Positioned<Field>, Option<&'a MetaField>);

type FieldMap<'a> = IndexMap<&'a str, Vec<FieldEntry<'a>>>;

struct FieldsAndFragmentNames<'a> {
    id: NodeId,
    fields: FieldMap<'a>,
    fragment_names: IndexSet<&'a str>,
}

#[derive(Debug, Clone, PartialEq)]
enum ConflictReason {
    Message(String),
    Subfields(Vec<(String, ConflictReason)>),
}

impl ConflictReason {
    fn message(&self) -> String {
        match self {
            ConflictReason::Message(message) => message.clone(),
            ConflictReason::Subfields(subfields) => subfields
                .iter()
                .map(|(response_name, reason)| {
                    format!(
                        "subfields \"{}\" conflict because {}",
                        response_name,
                        reason.message()
                    )
                })
                .collect::<Vec<_>>()
                .join(" and "),
        }
    }
}

#[derive(Debug)]
struct Conflict<'a> {
    response_name: &'a str,
    reason: ConflictReason,
    fields1: Vec<&'a Positioned<Field>>,
    fields2: Vec<&'a Positioned<Field>>,
}

/// Fragment pairs already compared, remembering whether the comparison assumed mutually
/// exclusive parents.
#[derive(Default)]
struct PairSet<'a> {
    data: HashMap<(&'a str, &'a str), bool>,
}

impl<'a> PairSet<'a> {
    fn key(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
        if a < b {
            (a, b)
        } else {
            (b, a)
        }
    }

    fn has(&self, a: &'a str, b: &'a str, mutually_exclusive: bool) -> bool {
        match self.data.get(&Self::key(a, b)) {
            None => false,
            // A comparison made without exclusivity covers both cases.
            Some(&was_exclusive) => mutually_exclusive || !was_exclusive,
        }
    }

    fn add(&mut self, a: &'a str, b: &'a str, mutually_exclusive: bool) {
        self.data.insert(Self::key(a, b), mutually_exclusive);
    }
}

#[derive(Default)]
struct ConflictCache<'a> {
    fields_and_fragment_names: HashMap<NodeId, Rc<FieldsAndFragmentNames<'a>>>,
    compared_fragment_pairs: PairSet<'a>,
    compared_fields_and_fragments: HashSet<(NodeId, &'a str, bool)>,
}

pub struct OverlappingFieldsCanBeMerged<'a> {
    cache: ConflictCache<'a>,
    memoize: bool,
}

impl<'a> Default for OverlappingFieldsCanBeMerged<'a> {
    fn default() -> Self {
        Self {
            cache: ConflictCache::default(),
            memoize: true,
        }
    }
}

impl<'a> Visitor<'a> for OverlappingFieldsCanBeMerged<'a> {
    fn enter_selection_set(
        &mut self,
        ctx: &mut VisitorContext<'a>,
        selection_set: &'a Positioned<SelectionSet>,
    ) {
        let parent_type = ctx.parent_type();
        let conflicts = ConflictFinder::new(ctx, &mut self.cache, self.memoize)
            .find_conflicts_within_selection_set(parent_type, selection_set);

        for conflict in conflicts {
            let locations = conflict
                .fields1
                .iter()
                .chain(conflict.fields2.iter())
                .map(|field| field.pos)
                .collect();
            ctx.report_error(
                ErrorCode::OverlappingFieldsCanBeMerged,
                locations,
                format!(
                    "Fields \"{}\" conflict because {}. Use different aliases on the fields to fetch both if this was intentional.",
                    conflict.response_name,
                    conflict.reason.message()
                ),
            );
        }
    }
}

struct ConflictFinder<'a, 'c> {
    ctx: &'c VisitorContext<'a>,
    cache: &'c mut ConflictCache<'a>,
    memoize: bool,
    /// Comparisons on the current recursion path, so fragment cycles terminate without the cache.
    fields_and_fragments_in_progress: HashSet<(NodeId, &'a str, bool)>,
    fragment_pairs_in_progress: HashSet<(&'a str, &'a str, bool)>,
}

impl<'a, 'c> ConflictFinder<'a, 'c> {
    fn new(ctx: &'c VisitorContext<'a>, cache: &'c mut ConflictCache<'a>, memoize: bool) -> Self {
        Self {
            ctx,
            cache,
            memoize,
            fields_and_fragments_in_progress: HashSet::new(),
            fragment_pairs_in_progress: HashSet::new(),
        }
    }

    fn schema(&self) -> &'a Schema {
        self.ctx.schema
    }

    /// Conflicts between fields of one selection set, including fields from the fragments
    /// it spreads.
    fn find_conflicts_within_selection_set(
        &mut self,
        parent_type: Option<&'a MetaType>,
        selection_set: &'a Positioned<SelectionSet>,
    ) -> Vec<Conflict<'a>> {
        let mut conflicts = Vec::new();
        let set = self.fields_and_fragment_names(parent_type, selection_set);

        self.collect_conflicts_within(&mut conflicts, &set.fields);

        let fragment_names = set.fragment_names.iter().copied().collect::<Vec<_>>();
        for (idx, &fragment_name) in fragment_names.iter().enumerate() {
            self.collect_conflicts_between_fields_and_fragment(
                &mut conflicts,
                false,
                &set,
                fragment_name,
            );
            for &other_fragment_name in &fragment_names[idx + 1..] {
                self.collect_conflicts_between_fragments(
                    &mut conflicts,
                    false,
                    fragment_name,
                    other_fragment_name,
                );
            }
        }

        conflicts
    }

    fn collect_conflicts_between_fields_and_fragment(
        &mut self,
        conflicts: &mut Vec<Conflict<'a>>,
        mutually_exclusive: bool,
        set: &FieldsAndFragmentNames<'a>,
        fragment_name: &'a str,
    ) {
        if self.memoize
            && !self
                .cache
                .compared_fields_and_fragments
                .insert((set.id, fragment_name, mutually_exclusive))
        {
            return;
        }

        let fragment = match self.ctx.fragment(fragment_name) {
            Some(fragment) => fragment,
            None => return,
        };
        let fragment_set = self.referenced_fields_and_fragment_names(fragment);
        if fragment_set.id == set.id {
            return;
        }

        let key = (set.id, fragment_name, mutually_exclusive);
        if !self.fields_and_fragments_in_progress.insert(key) {
            return;
        }

        self.collect_conflicts_between(
            conflicts,
            mutually_exclusive,
            &set.fields,
            &fragment_set.fields,
        );

        for &referenced_fragment_name in &fragment_set.fragment_names {
            self.collect_conflicts_between_fields_and_fragment(
                conflicts,
                mutually_exclusive,
                set,
                referenced_fragment_name,
            );
        }

        self.fields_and_fragments_in_progress.remove(&key);
    }

    fn collect_conflicts_between_fragments(
        &mut self,
        conflicts: &mut Vec<Conflict<'a>>,
        mutually_exclusive: bool,
        fragment_name1: &'a str,
        fragment_name2: &'a str,
    ) {
        if fragment_name1 == fragment_name2 {
            return;
        }

        if self.memoize {
            if self
                .cache
                .compared_fragment_pairs
                .has(fragment_name1, fragment_name2, mutually_exclusive)
            {
                return;
            }
            self.cache
                .compared_fragment_pairs
                .add(fragment_name1, fragment_name2, mutually_exclusive);
        }

        let (fragment1, fragment2) = match (
            self.ctx.fragment(fragment_name1),
            self.ctx.fragment(fragment_name2),
        ) {
            (Some(fragment1), Some(fragment2)) => (fragment1, fragment2),
            _ => return,
        };

        let key = (fragment_name1, fragment_name2, mutually_exclusive);
        if !self.fragment_pairs_in_progress.insert(key) {
            return;
        }

        let set1 = self.referenced_fields_and_fragment_names(fragment1);
        let set2 = self.referenced_fields_and_fragment_names(fragment2);

        self.collect_conflicts_between(conflicts, mutually_exclusive, &set1.fields, &set2.fields);

        for &referenced_fragment_name2 in &set2.fragment_names {
            self.collect_conflicts_between_fragments(
                conflicts,
                mutually_exclusive,
                fragment_name1,
                referenced_fragment_name2,
            );
        }
        for &referenced_fragment_name1 in &set1.fragment_names {
            self.collect_conflicts_between_fragments(
                conflicts,
                mutually_exclusive,
                referenced_fragment_name1,
                fragment_name2,
            );
        }

        self.fragment_pairs_in_progress.remove(&key);
    }

    /// Conflicts between the sub-selections of two fields sharing a response name.
    fn find_conflicts_between_sub_selection_sets(
        &mut self,
        mutually_exclusive: bool,
        parent_type1: Option<&'a MetaType>,
        selection_set1: &'a Positioned<SelectionSet>,
        parent_type2: Option<&'a MetaType>,
        selection_set2: &'a Positioned<SelectionSet>,
    ) -> Vec<Conflict<'a>> {
        let mut conflicts = Vec::new();
        let set1 = self.fields_and_fragment_names(parent_type1, selection_set1);
        let set2 = self.fields_and_fragment_names(parent_type2, selection_set2);

        self.collect_conflicts_between(&mut conflicts, mutually_exclusive, &set1.fields, &set2.fields);

        for &fragment_name2 in &set2.fragment_names {
            self.collect_conflicts_between_fields_and_fragment(
                &mut conflicts,
                mutually_exclusive,
                &set1,
                fragment_name2,
            );
        }
        for &fragment_name1 in &set1.fragment_names {
            self.collect_conflicts_between_fields_and_fragment(
                &mut conflicts,
                mutually_exclusive,
                &set2,
                fragment_name1,
            );
        }
        for &fragment_name1 in &set1.fragment_names {
            for &fragment_name2 in &set2.fragment_names {
                self.collect_conflicts_between_fragments(
                    &mut conflicts,
                    mutually_exclusive,
                    fragment_name1,
                    fragment_name2,
                );
            }
        }

        conflicts
    }

    fn collect_conflicts_within(&mut self, conflicts: &mut Vec<Conflict<'a>>, fields: &FieldMap<'a>) {
        for (&response_name, fields) in fields {
            for (idx, &field1) in fields.iter().enumerate() {
                for &field2 in &fields[idx + 1..] {
                    if let Some(conflict) = self.find_conflict(response_name, false, field1, field2) {
                        conflicts.push(conflict);
                    }
                }
            }
        }
    }

    fn collect_conflicts_between(
        &mut self,
        conflicts: &mut Vec<Conflict<'a>>,
        mutually_exclusive: bool,
        fields1: &FieldMap<'a>,
        fields2: &FieldMap<'a>,
    ) {
        for (&response_name, fields1) in fields1 {
            if let Some(fields2) = fields2.get(&response_name) {
                for &field1 in fields1 {
                    for &field2 in fields2 {
                        if let Some(conflict) =
                            self.find_conflict(response_name, mutually_exclusive, field1, field2)
                        {
                            conflicts.push(conflict);
                        }
                    }
                }
            }
        }
    }

    fn find_conflict(
        &mut self,
        response_name: &'a str,
        parent_fields_are_mutually_exclusive: bool,
        (parent_type1, field1, def1): FieldEntry<'a>,
        (parent_type2, field2, def2): FieldEntry<'a>,
    ) -> Option<Conflict<'a>> {
        // Fields on two different object types can never both be present in a response.
        let mutually_exclusive = parent_fields_are_mutually_exclusive
            || match (parent_type1, parent_type2) {
                (Some(parent_type1), Some(parent_type2)) => {
                    parent_type1.name != parent_type2.name
                        && parent_type1.kind == TypeKind::Object
                        && parent_type2.kind == TypeKind::Object
                }
                _ => false,
            };

        if !mutually_exclusive {
            let name1 = field1.node.name.node.as_str();
            let name2 = field2.node.name.node.as_str();
            if name1 != name2 {
                return Some(Conflict {
                    response_name,
                    reason: ConflictReason::Message(format!(
                        "\"{}\" and \"{}\" are different fields",
                        name1, name2
                    )),
                    fields1: vec![field1],
                    fields2: vec![field2],
                });
            }

            if !self.same_arguments(def1, &field1.node, &field2.node) {
                return Some(Conflict {
                    response_name,
                    reason: ConflictReason::Message("they have differing arguments".to_string()),
                    fields1: vec![field1],
                    fields2: vec![field2],
                });
            }
        }

        if let (Some(def1), Some(def2)) = (def1, def2) {
            if types_conflict(self.schema(), &def1.ty, &def2.ty) {
                return Some(Conflict {
                    response_name,
                    reason: ConflictReason::Message(format!(
                        "they return conflicting types \"{}\" and \"{}\"",
                        def1.ty, def2.ty
                    )),
                    fields1: vec![field1],
                    fields2: vec![field2],
                });
            }
        }

        let selection_set1 = &field1.node.selection_set;
        let selection_set2 = &field2.node.selection_set;
        if selection_set1.node.items.is_empty() || selection_set2.node.items.is_empty() {
            return None;
        }

        let schema = self.schema();
        let sub_conflicts = self.find_conflicts_between_sub_selection_sets(
            mutually_exclusive,
            def1.and_then(|def| schema.concrete_type(&def.ty)),
            selection_set1,
            def2.and_then(|def| schema.concrete_type(&def.ty)),
            selection_set2,
        );
        if sub_conflicts.is_empty() {
            return None;
        }

        let mut fields1 = vec![field1];
        let mut fields2 = vec![field2];
        let mut subfields = Vec::with_capacity(sub_conflicts.len());
        for conflict in sub_conflicts {
            fields1.extend(conflict.fields1);
            fields2.extend(conflict.fields2);
            subfields.push((conflict.response_name.to_string(), conflict.reason));
        }
        Some(Conflict {
            response_name,
            reason: ConflictReason::Subfields(subfields),
            fields1,
            fields2,
        })
    }

    /// Compares argument lists, treating literals that coerce to the same value as equal.
    fn same_arguments(&self, field_def: Option<&'a MetaField>, field1: &Field, field2: &Field) -> bool {
        if field1.arguments.len() != field2.arguments.len() {
            return false;
        }

        let schema = self.schema();
        field1.arguments.iter().all(|(name1, value1)| {
            let value2 = match field2
                .arguments
                .iter()
                .find(|(name2, _)| name1.node == name2.node)
            {
                Some((_, value2)) => value2,
                None => return false,
            };
            let ty = field_def
                .and_then(|field_def| field_def.arguments.get(name1.node.as_str()))
                .map(|argument| &argument.ty);
            match (
                coerce_input_value(schema, ty, &value1.node),
                coerce_input_value(schema, ty, &value2.node),
            ) {
                (Some(coerced1), Some(coerced2)) => coerced1 == coerced2,
                _ => value1.node == value2.node,
            }
        })
    }

    fn fields_and_fragment_names(
        &mut self,
        parent_type: Option<&'a MetaType>,
        selection_set: &'a Positioned<SelectionSet>,
    ) -> Rc<FieldsAndFragmentNames<'a>> {
        let id = NodeId::of(selection_set);
        if let Some(cached) = self.cache.fields_and_fragment_names.get(&id) {
            return cached.clone();
        }

        let mut fields = FieldMap::new();
        let mut fragment_names = IndexSet::new();
        self.collect_fields_and_fragment_names(
            parent_type,
            &selection_set.node,
            &mut fields,
            &mut fragment_names,
        );

        let set = Rc::new(FieldsAndFragmentNames {
            id,
            fields,
            fragment_names,
        });
        self.cache.fields_and_fragment_names.insert(id, set.clone());
        set
    }

    fn referenced_fields_and_fragment_names(
        &mut self,
        fragment: &'a Positioned<FragmentDefinition>,
    ) -> Rc<FieldsAndFragmentNames<'a>> {
        let fragment_type = self
            .schema()
            .named_type(&fragment.node.type_condition.node.on.node);
        self.fields_and_fragment_names(fragment_type, &fragment.node.selection_set)
    }

    fn collect_fields_and_fragment_names(
        &self,
        parent_type: Option<&'a MetaType>,
        selection_set: &'a SelectionSet,
        fields: &mut FieldMap<'a>,
        fragment_names: &mut IndexSet<&'a str>,
    ) {
        let schema = self.schema();
        for selection in &selection_set.items {
            match &selection.node {
                Selection::Field(field) => {
                    let field_def = parent_type.and_then(|parent_type| {
                        field_definition(schema, parent_type, &field.node.name.node)
                    });
                    fields
                        .entry(field.node.response_key().node.as_str())
                        .or_default()
                        .push((parent_type, field, field_def));
                }
                Selection::FragmentSpread(fragment_spread) => {
                    fragment_names.insert(fragment_spread.node.fragment_name.node.as_str());
                }
                Selection::InlineFragment(inline_fragment) => {
                    let type_condition_type = match &inline_fragment.node.type_condition {
                        Some(type_condition) => schema.named_type(&type_condition.node.on.node),
                        None => parent_type,
                    };
                    self.collect_fields_and_fragment_names(
                        type_condition_type,
                        &inline_fragment.node.selection_set.node,
                        fields,
                        fragment_names,
                    );
                }
            }
        }
    }
}
