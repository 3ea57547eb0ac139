mod arguments_of_correct_type;
mod default_values_of_correct_type;
mod directives_in_valid_locations;
mod fields_on_correct_type;
mod fragments_on_composite_types;
mod known_argument_names;
mod known_directives;
mod known_fragment_names;
mod known_type_names;
mod lone_anonymous_operation;
mod no_fragment_cycles;
mod no_undefined_variables;
mod no_unused_fragments;
mod no_unused_variables;
mod overlapping_fields_can_be_merged;
mod possible_fragment_spreads;
mod provided_non_null_arguments;
mod scalar_leafs;
mod single_field_subscriptions;
mod unique_argument_names;
mod unique_directives_per_location;
mod unique_fragment_names;
mod unique_operation_names;
mod unique_variable_names;
mod variables_are_input_types;
mod variables_in_allowed_position;

use std::fmt::{self, Display, Formatter};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

pub use arguments_of_correct_type::ArgumentsOfCorrectType;
pub use default_values_of_correct_type::DefaultValuesOfCorrectType;
pub use directives_in_valid_locations::DirectivesInValidLocations;
pub use fields_on_correct_type::FieldsOnCorrectType;
pub use fragments_on_composite_types::FragmentsOnCompositeTypes;
pub use known_argument_names::KnownArgumentNames;
pub use known_directives::KnownDirectives;
pub use known_fragment_names::KnownFragmentNames;
pub use known_type_names::KnownTypeNames;
pub use lone_anonymous_operation::LoneAnonymousOperation;
pub use no_fragment_cycles::NoFragmentCycles;
pub use no_undefined_variables::NoUndefinedVariables;
pub use no_unused_fragments::NoUnusedFragments;
pub use no_unused_variables::NoUnusedVariables;
pub use overlapping_fields_can_be_merged::OverlappingFieldsCanBeMerged;
pub use possible_fragment_spreads::PossibleFragmentSpreads;
pub use provided_non_null_arguments::ProvidedNonNullArguments;
pub use scalar_leafs::ScalarLeafs;
pub use single_field_subscriptions::SingleFieldSubscriptions;
pub use unique_argument_names::UniqueArgumentNames;
pub use unique_directives_per_location::UniqueDirectivesPerLocation;
pub use unique_fragment_names::UniqueFragmentNames;
pub use unique_operation_names::UniqueOperationNames;
pub use unique_variable_names::UniqueVariableNames;
pub use variables_are_input_types::VariablesAreInputTypes;
pub use variables_in_allowed_position::VariablesInAllowedPosition;

use crate::error::ErrorCode;
use crate::visitor::Visitor;

macro_rules! define_rules {
    ($($rule:ident => $name:literal, $code:ident;)*) => {
        /// A validation rule that can be enabled or disabled.
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Rule {
            $(
                #[serde(rename = $name)]
                $rule,
            )*
        }

        impl Rule {
            /// Every rule, in the order rules run.
            pub const ALL: &'static [Rule] = &[$(Rule::$rule),*];

            /// The kebab-case name used in configuration files.
            pub fn name(self) -> &'static str {
                match self {
                    $(Rule::$rule => $name,)*
                }
            }

            /// The primary error code reported by the rule.
            pub fn code(self) -> ErrorCode {
                match self {
                    $(Rule::$rule => ErrorCode::$code,)*
                }
            }

            pub(crate) fn create<'a>(self) -> Box<dyn Visitor<'a> + 'a> {
                match self {
                    $(Rule::$rule => Box::new($rule::default()),)*
                }
            }
        }
    };
}

define_rules! {
    UniqueOperationNames => "unique-operation-names", UniqueOperationNames;
    LoneAnonymousOperation => "lone-anonymous-operation", LoneAnonymousOperation;
    SingleFieldSubscriptions => "single-field-subscriptions", SingleFieldSubscriptions;
    FieldsOnCorrectType => "fields-on-correct-type", FieldsOnCorrectType;
    OverlappingFieldsCanBeMerged => "overlapping-fields-can-be-merged", OverlappingFieldsCanBeMerged;
    ScalarLeafs => "scalar-leafs", ScalarLeafs;
    KnownArgumentNames => "known-argument-names", KnownArgumentNames;
    UniqueArgumentNames => "unique-argument-names", UniqueArgumentNames;
    ProvidedNonNullArguments => "provided-non-null-arguments", ProvidedNonNullArguments;
    UniqueFragmentNames => "unique-fragment-names", UniqueFragmentNames;
    KnownTypeNames => "known-type-names", KnownTypeNames;
    FragmentsOnCompositeTypes => "fragments-on-composite-types", FragmentsOnCompositeTypes;
    NoUnusedFragments => "no-unused-fragments", NoUnusedFragments;
    KnownFragmentNames => "known-fragment-names", KnownFragmentNames;
    NoFragmentCycles => "no-fragment-cycles", NoFragmentCycles;
    PossibleFragmentSpreads => "possible-fragment-spreads", PossibleFragmentSpreads;
    ArgumentsOfCorrectType => "arguments-of-correct-type", ValuesOfCorrectType;
    DefaultValuesOfCorrectType => "default-values-of-correct-type", ValuesOfCorrectType;
    KnownDirectives => "known-directives", KnownDirectives;
    DirectivesInValidLocations => "directives-in-valid-locations", DirectivesInValidLocations;
    UniqueDirectivesPerLocation => "unique-directives-per-location", UniqueDirectivesPerLocation;
    UniqueVariableNames => "unique-variable-names", UniqueVariableNames;
    VariablesAreInputTypes => "variables-are-input-types", VariablesAreInputTypes;
    NoUndefinedVariables => "no-undefined-variables", NoUndefinedVariables;
    NoUnusedVariables => "no-unused-variables", NoUnusedVariables;
    VariablesInAllowedPosition => "variables-in-allowed-position", VariablesInAllowedPosition;
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered set of rules to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet(IndexSet<Rule>);

impl Default for RuleSet {
    fn default() -> Self {
        Self::all()
    }
}

impl RuleSet {
    pub fn all() -> Self {
        Rule::ALL.iter().copied().collect()
    }

    pub fn empty() -> Self {
        RuleSet(IndexSet::new())
    }

    #[must_use]
    pub fn with(mut self, rule: Rule) -> Self {
        self.0.insert(rule);
        self
    }

    #[must_use]
    pub fn without(mut self, rule: Rule) -> Self {
        self.0.shift_remove(&rule);
        self
    }

    #[inline]
    pub fn contains(&self, rule: Rule) -> bool {
        self.0.contains(&rule)
    }

    pub fn iter(&self) -> impl Iterator<Item = Rule> + '_ {
        self.0.iter().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = Rule>>(iter: T) -> Self {
        RuleSet(iter.into_iter().collect())
    }
}
