use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

use parser::Pos;
use serde::{Serialize, Serializer};
use value::ConstValue;

/// Stable identifier of the GraphQL validation rule a [`ValidationError`] comes from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    UniqueOperationNames,
    LoneAnonymousOperation,
    SingleFieldSubscriptions,
    FieldsOnCorrectType,
    OverlappingFieldsCanBeMerged,
    ScalarLeafs,
    KnownArgumentNames,
    UniqueArgumentNames,
    ProvidedNonNullArguments,
    UniqueFragmentNames,
    KnownTypeNames,
    FragmentsOnCompositeTypes,
    NoUnusedFragments,
    KnownFragmentNames,
    NoFragmentCycles,
    PossibleFragmentSpreads,
    ValuesOfCorrectType,
    InputObjectFieldNames,
    InputObjectRequiredFields,
    KnownDirectives,
    DirectivesInValidLocations,
    UniqueDirectivesPerLocation,
    UniqueVariableNames,
    VariablesAreInputTypes,
    NoUndefinedVariables,
    NoUnusedVariables,
    VariablesInAllowedPosition,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::UniqueOperationNames => "R5211",
            ErrorCode::LoneAnonymousOperation => "R5221",
            ErrorCode::SingleFieldSubscriptions => "R5231",
            ErrorCode::FieldsOnCorrectType => "R531",
            ErrorCode::OverlappingFieldsCanBeMerged => "R532",
            ErrorCode::ScalarLeafs => "R533",
            ErrorCode::KnownArgumentNames => "R541",
            ErrorCode::UniqueArgumentNames => "R542",
            ErrorCode::ProvidedNonNullArguments => "R5421",
            ErrorCode::UniqueFragmentNames => "R5511",
            ErrorCode::KnownTypeNames => "R5512",
            ErrorCode::FragmentsOnCompositeTypes => "R5513",
            ErrorCode::NoUnusedFragments => "R5514",
            ErrorCode::KnownFragmentNames => "R5521",
            ErrorCode::NoFragmentCycles => "R5522",
            ErrorCode::PossibleFragmentSpreads => "R5523",
            ErrorCode::ValuesOfCorrectType => "R561",
            ErrorCode::InputObjectFieldNames => "R562",
            ErrorCode::InputObjectRequiredFields => "R564",
            ErrorCode::KnownDirectives => "R571",
            ErrorCode::DirectivesInValidLocations => "R572",
            ErrorCode::UniqueDirectivesPerLocation => "R573",
            ErrorCode::UniqueVariableNames => "R581",
            ErrorCode::VariablesAreInputTypes => "R582",
            ErrorCode::NoUndefinedVariables => "R583",
            ErrorCode::NoUnusedVariables => "R584",
            ErrorCode::VariablesInAllowedPosition => "R585",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub code: ErrorCode,
    pub message: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Pos>,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(pos) = self.locations.first() {
            write!(f, "[{}:{}] ", pos.line, pos.column)?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,

    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub extensions: HashMap<String, ConstValue>,
}

impl ValidationResult {
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
