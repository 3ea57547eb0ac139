#![forbid(unsafe_code)]

#[cfg(test)]
#[macro_use]
mod test_harness;

mod context;
mod document;
mod error;
mod rules;
mod suggestion;
mod type_compare;
mod type_info;
mod utils;
mod visitor;
mod visitors;

use graphcheck_schema::Schema;
use value::Variables;

pub use document::{Definition, Document};
pub use error::{ErrorCode, ValidationError, ValidationResult};
pub use rules::{Rule, RuleSet};

use context::VisitorContext;
use visitor::{visit, Visitor, VisitorList};

/// Validates `document` against `schema`, running the rules in `rules`.
///
/// `variables` are the values supplied with the request; variables that are referenced in
/// argument literals are substituted before their values are checked.
pub fn validate(
    rules: &RuleSet,
    schema: &Schema,
    document: &Document,
    variables: &Variables,
) -> ValidationResult {
    let mut ctx = VisitorContext::new(schema, document, variables);
    let mut visitors = rules
        .iter()
        .map(Rule::create)
        .collect::<Vec<Box<dyn Visitor<'_> + '_>>>();
    visitors.push(Box::new(visitors::DepthCalculate::default()));
    visitors.push(Box::new(visitors::AliasCountCalculate::default()));

    visit(&mut VisitorList::new(visitors), &mut ctx, document);

    tracing::debug!(
        rules = rules.len(),
        errors = ctx.errors.len(),
        "Document validated."
    );
    ValidationResult {
        errors: ctx.errors,
        extensions: ctx.extensions,
    }
}

/// Validates `document` against `schema` with every rule enabled.
pub fn check_rules(schema: &Schema, document: &Document, variables: &Variables) -> ValidationResult {
    validate(&RuleSet::all(), schema, document, variables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_harness::schema;
    use value::{ConstValue, Name};

    #[test]
    fn valid_document() {
        let doc = Document::parse(
            r#"
          query DogQuery($command: DogCommand = SIT) {
            dog {
              ...DogFields
              knows: doesKnowCommand(dogCommand: $command)
            }
          }
          fragment DogFields on Dog {
            name
            mother { name }
          }
        "#,
        )
        .unwrap();
        let result = check_rules(schema(), &doc, &Variables::default());
        assert!(result.is_valid(), "{:?}", result.errors);
        assert_eq!(
            result.extensions.get("depth"),
            Some(&ConstValue::Number(3.into()))
        );
        assert_eq!(
            result.extensions.get("aliasCount"),
            Some(&ConstValue::Number(1.into()))
        );
    }

    #[test]
    fn reports_errors_from_several_rules_in_document_order() {
        let doc = Document::parse(
            r#"
          query Q($unused: Int) {
            dog {
              unknownField
              name @unknown
            }
          }
        "#,
        )
        .unwrap();
        let result = check_rules(schema(), &doc, &Variables::default());
        let codes = result.errors.iter().map(|error| error.code).collect::<Vec<_>>();
        assert_eq!(
            codes,
            vec![
                ErrorCode::FieldsOnCorrectType,
                ErrorCode::KnownDirectives,
                ErrorCode::NoUnusedVariables,
            ]
        );
    }

    #[test]
    fn unknown_directive_arguments_are_not_checked_against_the_field() {
        for source in [
            "{ dog { doesKnowCommand(dogCommand: SIT) @unknown(dogCommand: 5) } }",
            "query Q($c: String) { dog { isHouseTrained(atOtherHomes: true) @nope(atOtherHomes: $c) } }",
        ] {
            let doc = Document::parse(source).unwrap();
            let result = check_rules(schema(), &doc, &Variables::default());
            let codes = result.errors.iter().map(|error| error.code).collect::<Vec<_>>();
            assert_eq!(codes, vec![ErrorCode::KnownDirectives], "{}", source);
        }
    }

    #[test]
    fn disabled_rules_do_not_report() {
        let doc = Document::parse("query Q($unused: Int) { dog { name } }").unwrap();
        let rules = RuleSet::all().without(Rule::NoUnusedVariables);
        let result = validate(&rules, schema(), &doc, &Variables::default());
        assert!(result.is_valid());

        let result = validate(&RuleSet::empty(), schema(), &doc, &Variables::default());
        assert!(result.is_valid());
        assert!(result.extensions.contains_key("depth"));
    }

    #[test]
    fn supplied_variables_are_checked() {
        let doc = Document::parse(
            r#"
          query Q($command: DogCommand) {
            dog {
              doesKnowCommand(dogCommand: $command)
            }
          }
        "#,
        )
        .unwrap();
        let mut variables = Variables::default();
        variables.insert(Name::new("command"), ConstValue::Enum(Name::new("JUMP")));
        let result = check_rules(schema(), &doc, &variables);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, ErrorCode::ValuesOfCorrectType);
    }

    #[test]
    fn multiple_sources_keep_duplicates() {
        let doc = Document::parse_sources([
            "query Q { dog { name } }",
            "query Q { cat { name } }",
        ])
        .unwrap();
        let result = check_rules(schema(), &doc, &Variables::default());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, ErrorCode::UniqueOperationNames);
        assert_eq!(result.errors[0].locations.len(), 2);
    }

    #[test]
    fn serializes_errors() {
        let doc = Document::parse("{ dog { unknownField } }").unwrap();
        let result = check_rules(schema(), &doc, &Variables::default());
        let json = serde_json::to_value(&result.errors[0]).unwrap();
        assert_eq!(json["code"], "R531");
        assert_eq!(json["locations"][0]["line"], 1);
        assert_eq!(json["locations"][0]["column"], 9);
    }
}
