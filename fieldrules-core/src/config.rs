//! Configuration management for `fieldrules-core`.
//!
//! This module defines the serialisable descriptors for field rules. The
//! canonical table ships embedded as YAML; locale or application overrides are
//! loaded from YAML files and merged over it by key. Descriptors are plain data:
//! the compiler in [`crate::sanitizers::compiler`] turns them into behaviour.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::sanitizers::pipeline::{unstable_numeric_sample, RegexReplacement};

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Which sanitiser a rule applies to raw keystrokes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SanitiserConfig {
    /// Input is passed through unchanged.
    #[default]
    None,
    /// Keep ASCII digits only, truncated to `max_length`.
    Digits { max_length: usize },
    /// Keep a leading `+` and digits, truncated to `max_length`.
    IntlPhone { max_length: usize },
    /// The numeric pipeline with ordered extraction rules.
    ///
    /// Extraction must leave its own output unchanged when applied again, so
    /// that a sanitised value sanitises to itself. Rules that do not are
    /// reported with a warning when the table is validated.
    Numeric {
        #[serde(default)]
        extract: Vec<String>,
        #[serde(default)]
        max_length: Option<usize>,
    },
    Name,
    Title,
    AddressLine,
}

/// Which check decides acceptability of a fully entered value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValidatorKind {
    /// Full-string test of the rule's pattern.
    #[default]
    Pattern,
    Email,
    Password,
}

/// Descriptor for a single field type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FieldRuleConfig {
    /// Unique identifier for the rule (e.g., "mobilephone").
    pub key: String,
    /// Human-readable description of the field type.
    pub description: Option<String>,
    /// The regex source. Also the source of the HTML `pattern` attribute.
    pub pattern: String,
    /// Compile `pattern` case-insensitively. The flag only affects `validate`:
    /// the derived HTML attribute carries no flags, so a pattern meant for
    /// markup should spell out both cases.
    pub case_insensitive: bool,
    pub placeholder: String,
    /// Message returned when validation fails. May be empty.
    pub error: String,
    pub validator: ValidatorKind,
    pub sanitiser: SanitiserConfig,
    pub pre_icon: String,
    pub post_icon: String,
    /// Marks a rule that is deliberately accepted without any constraint.
    pub unconstrained: bool,
}

/// Top-level configuration: a locale tag plus the ordered rule table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct FieldConfig {
    #[serde(default)]
    pub locale: Option<String>,
    pub rules: Vec<FieldRuleConfig>,
}

impl FieldConfig {
    /// Loads field rules from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading field rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read field rule file {}", path.display()))?;
        let config: FieldConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse field rule file {}", path.display()))?;

        validate_rules(&config.rules)?;
        info!("Loaded {} field rules from file {}.", config.rules.len(), path.display());

        Ok(config)
    }

    /// Loads the canonical field rules from the embedded table.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default field rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let config: FieldConfig = serde_yml::from_str(default_yaml)
            .context("Failed to parse default field rules")?;

        debug!(
            "Loaded {} default field rules for locale {:?}.",
            config.rules.len(),
            config.locale
        );
        Ok(config)
    }

    /// Returns the rule with the given key, if present.
    pub fn rule(&self, key: &str) -> Option<&FieldRuleConfig> {
        self.rules.iter().find(|r| r.key == key)
    }
}

/// Merges user-defined rules over the defaults.
///
/// A user rule replaces the default with the same key in place; rules with new
/// keys are appended in the order they appear. A user locale replaces the
/// default locale.
pub fn merge_rules(default_config: FieldConfig, user_config: Option<FieldConfig>) -> FieldConfig {
    debug!(
        "merge_rules called. Initial default rules count: {}",
        default_config.rules.len()
    );

    let Some(user_cfg) = user_config else {
        return default_config;
    };

    let mut rules = default_config.rules;
    let positions: HashMap<String, usize> = rules
        .iter()
        .enumerate()
        .map(|(i, rule)| (rule.key.clone(), i))
        .collect();

    debug!("User config provided. Merging {} user rules.", user_cfg.rules.len());
    for user_rule in user_cfg.rules {
        match positions.get(&user_rule.key) {
            Some(&i) => {
                debug!("Overriding field rule '{}'.", user_rule.key);
                rules[i] = user_rule;
            }
            None => {
                debug!("Adding field rule '{}'.", user_rule.key);
                rules.push(user_rule);
            }
        }
    }

    let locale = user_cfg.locale.or(default_config.locale);
    debug!("Final total field rules after merge: {}", rules.len());

    FieldConfig { locale, rules }
}

/// Counts the capture groups a pattern declares, ignoring non-capturing groups.
fn capture_group_count(pattern: &str) -> Result<usize> {
    let regex = Regex::new(pattern)?;
    Ok(regex.captures_len().saturating_sub(1))
}

/// Validates rule integrity: unique keys, compiling patterns, extraction rules
/// with a capture group, and at least one constraint per rule.
pub fn validate_rules(rules: &[FieldRuleConfig]) -> Result<()> {
    let mut keys = HashSet::new();
    let mut errors = Vec::new();

    for rule in rules {
        if rule.key.is_empty() {
            errors.push("A rule has an empty `key` field.".to_string());
        } else if !keys.insert(rule.key.as_str()) {
            errors.push(format!("Duplicate rule key found: '{}'.", rule.key));
        }

        if rule.pattern.len() > MAX_PATTERN_LENGTH {
            errors.push(format!(
                "Rule '{}': pattern length ({}) exceeds maximum allowed ({}).",
                rule.key,
                rule.pattern.len(),
                MAX_PATTERN_LENGTH
            ));
        } else if !rule.pattern.is_empty() {
            if let Err(e) = Regex::new(&rule.pattern) {
                errors.push(format!("Rule '{}' has an invalid regex pattern: {}", rule.key, e));
            }
        }

        if rule.validator == ValidatorKind::Pattern && rule.pattern.is_empty() && !rule.unconstrained {
            errors.push(format!(
                "Rule '{}' has neither a validator nor a pattern; mark it `unconstrained` if intended.",
                rule.key
            ));
        }

        if rule.validator == ValidatorKind::Pattern && !rule.pattern.is_empty() && rule.error.is_empty() {
            warn!("Rule '{}' has a pattern but no error message.", rule.key);
        }

        if let SanitiserConfig::Numeric { extract, max_length } = &rule.sanitiser {
            let compiled: std::result::Result<Vec<_>, _> = extract
                .iter()
                .map(|source| RegexReplacement::new(&rule.key, source))
                .collect();
            if let Ok(compiled) = compiled {
                if let Some(sample) = unstable_numeric_sample(&compiled, *max_length) {
                    warn!(
                        "Rule '{}': extraction rules are not idempotent; sanitising {:?} twice gives different results.",
                        rule.key, sample
                    );
                }
            }

            for source in extract {
                match capture_group_count(source) {
                    Ok(0) => errors.push(format!(
                        "Rule '{}': extraction rule '{}' has no capture group.",
                        rule.key, source
                    )),
                    Ok(_) => {}
                    Err(e) => errors.push(format!(
                        "Rule '{}' has an invalid extraction rule '{}': {}",
                        rule.key, source, e
                    )),
                }
            }
        }
    }

    if !errors.is_empty() {
        let full_error_message = format!("Field rule validation failed:\n{}", errors.join("\n"));
        Err(anyhow!(full_error_message))
    } else {
        Ok(())
    }
}
