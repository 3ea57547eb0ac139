use std::collections::HashMap;

use once_cell::sync::Lazy;
use graphcheck_schema::Schema;
use parser::types::{DocumentOperations, ExecutableDocument};
use value::Variables;

use crate::context::VisitorContext;
use crate::error::ValidationError;
use crate::visitor::{visit, Visitor};
use crate::Document;

static SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::parse(include_str!("test_harness.graphql")).expect("invalid test schema")
});

static EMPTY_VARIABLES: Lazy<Variables> = Lazy::new(Variables::default);

pub fn schema() -> &'static Schema {
    &SCHEMA
}

/// A document holding only the fragments of `source`, which the parser alone cannot produce.
pub fn fragments_only(source: &str) -> Document {
    let parsed = parser::parse_query(format!("{}\n{{ __typename }}", source)).expect("Parse error");
    let mut doc = Document::default();
    doc.add_source(ExecutableDocument {
        operations: DocumentOperations::Multiple(HashMap::new()),
        fragments: parsed.fragments,
    });
    doc
}

pub fn validate_with_variables<'a, V, F>(
    doc: &'a Document,
    variables: &'a Variables,
    factory: F,
) -> Vec<ValidationError>
where
    V: Visitor<'a> + 'a,
    F: Fn() -> V,
{
    let mut ctx = VisitorContext::new(&SCHEMA, doc, variables);
    let mut visitor = factory();
    visit(&mut visitor, &mut ctx, doc);
    ctx.errors
}

pub fn validate<'a, V, F>(doc: &'a Document, factory: F) -> Vec<ValidationError>
where
    V: Visitor<'a> + 'a,
    F: Fn() -> V,
{
    validate_with_variables(doc, &EMPTY_VARIABLES, factory)
}

pub fn expect_passes_rule_<'a, V, F>(doc: &'a Document, factory: F)
where
    V: Visitor<'a> + 'a,
    F: Fn() -> V,
{
    let errors = validate(doc, factory);
    if !errors.is_empty() {
        for err in &errors {
            println!("{}", err);
        }
        panic!("Expected rule to pass, but errors found");
    }
}

pub fn expect_fails_rule_<'a, V, F>(doc: &'a Document, factory: F)
where
    V: Visitor<'a> + 'a,
    F: Fn() -> V,
{
    if validate(doc, factory).is_empty() {
        panic!("Expected rule to fail, but no errors were found");
    }
}

macro_rules! expect_passes_rule {
    ($factory:expr, $query_source:literal $(,)?) => {
        let doc = crate::Document::parse($query_source).expect("Parse error");
        crate::test_harness::expect_passes_rule_(&doc, $factory);
    };
}

macro_rules! expect_fails_rule {
    ($factory:expr, $query_source:literal $(,)?) => {
        let doc = crate::Document::parse($query_source).expect("Parse error");
        crate::test_harness::expect_fails_rule_(&doc, $factory);
    };
}
