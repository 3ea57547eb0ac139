use std::sync::Arc;

use anyhow::{Context, Result};
use graphcheck_schema::Schema;
use graphcheck_validation::{Document, RuleSet, ValidationResult};
use value::Variables;

use crate::config::Config;

/// A schema paired with the rules documents are checked against.
///
/// Cloning is cheap; the schema is shared.
#[derive(Clone)]
pub struct Validator {
    schema: Arc<Schema>,
    rules: RuleSet,
}

impl Validator {
    /// Creates a validator running every rule.
    pub fn new(schema: impl Into<Arc<Schema>>) -> Self {
        Self {
            schema: schema.into(),
            rules: RuleSet::all(),
        }
    }

    #[must_use]
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let path = config
            .schema
            .as_ref()
            .context("No schema file is configured.")?;
        let sdl = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to load schema file '{}'.", path.display()))?;
        let schema = Schema::parse(&sdl)
            .with_context(|| format!("Failed to parse schema file '{}'.", path.display()))?;

        let rules = config.rule_set();
        tracing::info!(schema = %path.display(), rules = rules.len(), "Validator created.");
        Ok(Self::new(schema).with_rules(rules))
    }

    #[inline]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    #[inline]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn validate(&self, document: &Document, variables: &Variables) -> ValidationResult {
        let result = graphcheck_validation::validate(&self.rules, &self.schema, document, variables);
        if !result.is_valid() {
            tracing::debug!(errors = result.errors.len(), "Document rejected.");
        }
        result
    }

    /// Parses `source` and validates it. Syntax errors are returned as `Err`.
    pub fn validate_source(&self, source: &str, variables: &Variables) -> Result<ValidationResult> {
        let document = Document::parse(source).context("Failed to parse document.")?;
        Ok(self.validate(&document, variables))
    }
}
