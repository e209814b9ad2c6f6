// File: fieldrules-core/src/registry.rs

//! `registry.rs`
//! The field type registry: an immutable table of compiled rules looked up by key.
//!
//! The default registry is compiled from the embedded rule table the first
//! time it is used and shared by the whole process. Registries with overrides
//! are built with [`Registry::from_config`] or [`Registry::with_overrides`].

use anyhow::{Context, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;

use crate::config::{merge_rules, validate_rules, FieldConfig};
use crate::engine::{FieldBehaviour, RuleDescriptor};
use crate::errors::FieldRuleError;
use crate::sanitizers::compiler::{compile_rules, CompiledRule};

static DEFAULT_REGISTRY: Lazy<Registry> = Lazy::new(|| {
    Registry::load_default().expect("the embedded field rule table must compile")
});

/// An immutable set of compiled field rules, in table order.
#[derive(Debug)]
pub struct Registry {
    locale: Option<String>,
    rules: Vec<CompiledRule>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Validates and compiles a rule configuration.
    pub fn from_config(config: FieldConfig) -> Result<Self> {
        validate_rules(&config.rules)?;
        let rules = compile_rules(config.rules).context("Failed to compile field rules")?;
        let index = rules
            .iter()
            .enumerate()
            .map(|(i, rule)| (rule.key.clone(), i))
            .collect();

        debug!("Registry built with {} field rules for locale {:?}.", rules.len(), config.locale);
        Ok(Self {
            locale: config.locale,
            rules,
            index,
        })
    }

    /// Compiles the embedded default rule table.
    pub fn load_default() -> Result<Self> {
        Self::from_config(FieldConfig::load_default_rules()?)
    }

    /// Compiles the default table with the rules of a YAML override file merged over it.
    pub fn with_overrides<P: AsRef<Path>>(path: P) -> Result<Self> {
        let user_config = FieldConfig::load_from_file(path)?;
        let merged = merge_rules(FieldConfig::load_default_rules()?, Some(user_config));
        Self::from_config(merged)
    }

    /// The process-wide registry built from the embedded rule table.
    pub fn global() -> &'static Registry {
        &DEFAULT_REGISTRY
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Looks up the rule for `key`.
    pub fn lookup(&self, key: &str) -> Result<&CompiledRule, FieldRuleError> {
        match self.index.get(key) {
            Some(&i) => Ok(&self.rules[i]),
            None => {
                warn!("Lookup of unknown field type '{}'.", key);
                Err(FieldRuleError::UnknownFieldType(key.to_string()))
            }
        }
    }

    pub fn get_rule(&self, key: &str) -> Result<RuleDescriptor, FieldRuleError> {
        Ok(self.lookup(key)?.descriptor())
    }

    /// Sanitises `raw` with the rule for `key`.
    pub fn sanitise_value(&self, key: &str, raw: &str) -> Result<String, FieldRuleError> {
        Ok(self.lookup(key)?.sanitise(raw))
    }

    /// Validates `value` with the rule for `key`. An empty string means valid.
    pub fn validate_value(&self, key: &str, value: &str) -> Result<String, FieldRuleError> {
        Ok(self.lookup(key)?.validate(value))
    }

    /// Rule keys in table order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.key.as_str())
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Returns the descriptor for `key` from the default registry.
pub fn get_rule(key: &str) -> Result<RuleDescriptor, FieldRuleError> {
    Registry::global().get_rule(key)
}

/// Sanitises `raw` with the default rule for `key`.
pub fn sanitise(key: &str, raw: &str) -> Result<String, FieldRuleError> {
    Registry::global().sanitise_value(key, raw)
}

/// Validates `value` with the default rule for `key`. An empty string means valid.
pub fn validate(key: &str, value: &str) -> Result<String, FieldRuleError> {
    Registry::global().validate_value(key, value)
}

/// Validates an email address with the default `email` rule.
pub fn validate_email(email: &str) -> String {
    validate_builtin("email", email)
}

/// Validates a password with the default `password` rule.
pub fn validate_password(password: &str) -> String {
    validate_builtin("password", password)
}

fn validate_builtin(key: &str, value: &str) -> String {
    match Registry::global().lookup(key) {
        Ok(rule) => rule.validate(value),
        Err(e) => unreachable!("the embedded table always defines '{key}': {e}"),
    }
}
