use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use graphcheck_validation::{Rule, RuleSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct RulesConfig {
    /// Rules to run. All rules run when absent.
    #[serde(default)]
    pub enabled: Option<Vec<Rule>>,

    /// Rules removed from the enabled set.
    #[serde(default)]
    pub disabled: Vec<Rule>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Path of the schema SDL file.
    #[serde(default)]
    pub schema: Option<PathBuf>,

    #[serde(default)]
    pub rules: RulesConfig,
}

impl Config {
    /// Loads a TOML config file. A relative schema path is resolved against the directory
    /// containing the file.
    pub fn load(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to load config file '{}'.", path.display()))?;
        let mut config = Config::from_toml(&source)
            .with_context(|| format!("Failed to parse config file '{}'.", path.display()))?;

        if let (Some(schema), Some(dir)) = (&config.schema, path.parent()) {
            if schema.is_relative() {
                config.schema = Some(dir.join(schema));
            }
        }
        Ok(config)
    }

    pub fn from_toml(source: &str) -> Result<Config> {
        Ok(toml::from_str(source)?)
    }

    pub fn rule_set(&self) -> RuleSet {
        let rules = match &self.rules.enabled {
            Some(enabled) => enabled.iter().copied().collect(),
            None => RuleSet::all(),
        };
        self.rules
            .disabled
            .iter()
            .fold(rules, |rules, rule| rules.without(*rule))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_all_rules() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.rule_set(), RuleSet::all());
    }

    #[test]
    fn enabled_and_disabled_rules() {
        let config = Config::from_toml(
            r#"
            schema = "schema.graphql"

            [rules]
            enabled = ["scalar-leafs", "known-directives", "no-unused-fragments"]
            disabled = ["no-unused-fragments"]
            "#,
        )
        .unwrap();
        assert_eq!(config.schema, Some(PathBuf::from("schema.graphql")));
        assert_eq!(
            config.rule_set().iter().collect::<Vec<_>>(),
            vec![Rule::ScalarLeafs, Rule::KnownDirectives]
        );
    }

    #[test]
    fn disabled_rules_only() {
        let config = Config::from_toml(
            r#"
            [rules]
            disabled = ["no-unused-variables"]
            "#,
        )
        .unwrap();
        let rules = config.rule_set();
        assert_eq!(rules.len(), Rule::ALL.len() - 1);
        assert!(!rules.contains(Rule::NoUnusedVariables));
    }

    #[test]
    fn unknown_rule_name() {
        assert!(Config::from_toml("[rules]\ndisabled = [\"no-such-rule\"]").is_err());
    }

    #[test]
    fn missing_file() {
        let err = Config::load("does/not/exist.toml").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to load config file 'does/not/exist.toml'."
        );
    }
}
