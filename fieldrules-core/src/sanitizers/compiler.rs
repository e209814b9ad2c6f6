//! compiler.rs - Compilation of field rule descriptors.
//!
//! This module converts `FieldRuleConfig` descriptors into `CompiledRule`s:
//! the pattern is compiled once as a full-string matcher, extraction rules are
//! compiled, and the configured sanitiser and validator are resolved into
//! tagged variants that dispatch without any further lookups.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::config::{FieldRuleConfig, SanitiserConfig, ValidatorKind, MAX_PATTERN_LENGTH};
use crate::engine::{FieldBehaviour, RuleDescriptor};
use crate::errors::FieldRuleError;
use crate::markup::html_pattern;
use crate::sanitizers::pipeline::{self, RegexReplacement};
use crate::validators;

/// A resolved sanitiser.
#[derive(Debug, Clone)]
pub enum Sanitiser {
    None,
    Digits { max_length: usize },
    IntlPhone { max_length: usize },
    Numeric { extract: Vec<RegexReplacement>, max_length: Option<usize> },
    Name,
    Title,
    AddressLine,
}

impl Sanitiser {
    fn compile(key: &str, config: &SanitiserConfig) -> Result<Self, FieldRuleError> {
        Ok(match config {
            SanitiserConfig::None => Sanitiser::None,
            SanitiserConfig::Digits { max_length } => Sanitiser::Digits { max_length: *max_length },
            SanitiserConfig::IntlPhone { max_length } => Sanitiser::IntlPhone { max_length: *max_length },
            SanitiserConfig::Numeric { extract, max_length } => Sanitiser::Numeric {
                extract: extract
                    .iter()
                    .map(|source| RegexReplacement::new(key, source))
                    .collect::<Result<_, _>>()?,
                max_length: *max_length,
            },
            SanitiserConfig::Name => Sanitiser::Name,
            SanitiserConfig::Title => Sanitiser::Title,
            SanitiserConfig::AddressLine => Sanitiser::AddressLine,
        })
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Sanitiser::None)
    }

    pub fn apply(&self, raw: &str) -> String {
        match self {
            Sanitiser::None => raw.to_string(),
            Sanitiser::Digits { max_length } => pipeline::sanitise_digits(raw, *max_length),
            Sanitiser::IntlPhone { max_length } => pipeline::sanitise_intl_phone(raw, *max_length),
            Sanitiser::Numeric { extract, max_length } => pipeline::sanitise_numeric(raw, extract, *max_length),
            Sanitiser::Name => pipeline::sanitise_name(raw),
            Sanitiser::Title => pipeline::sanitise_title(raw),
            Sanitiser::AddressLine => pipeline::sanitise_address_line(raw),
        }
    }
}

/// A resolved validator. `Email` carries the compiled shape of the address.
#[derive(Debug, Clone)]
pub enum Validator {
    /// Full-string test of the pattern. `None` accepts every value.
    Pattern(Option<Regex>),
    Email(Regex),
    Password,
}

/// A single field rule, ready for use.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub key: String,
    pub description: Option<String>,
    /// The pattern as written in the rule table.
    pub pattern: String,
    /// The HTML `pattern` attribute form derived from `pattern`.
    pub html_pattern: String,
    pub placeholder: String,
    pub error: String,
    pub pre_icon: String,
    pub post_icon: String,
    pub sanitiser: Sanitiser,
    pub validator: Validator,
}

/// Compiles `source` so that it only matches whole values, as the HTML
/// `pattern` attribute does.
fn compile_full_match(key: &str, source: &str, case_insensitive: bool) -> Result<Regex, FieldRuleError> {
    if source.len() > MAX_PATTERN_LENGTH {
        return Err(FieldRuleError::PatternLengthExceeded(
            key.to_string(),
            source.len(),
            MAX_PATTERN_LENGTH,
        ));
    }

    RegexBuilder::new(&format!("^(?:{source})$"))
        .case_insensitive(case_insensitive)
        .size_limit(1 << 20)
        .build()
        .map_err(|e| FieldRuleError::RuleCompilationError(key.to_string(), e))
}

/// Compiles a single descriptor.
pub fn compile_rule(rule: FieldRuleConfig) -> Result<CompiledRule, FieldRuleError> {
    debug!("Attempting to compile field rule '{}' with pattern {:?}", rule.key, rule.pattern);

    let matcher = if rule.pattern.is_empty() {
        None
    } else {
        Some(compile_full_match(&rule.key, &rule.pattern, rule.case_insensitive)?)
    };

    let validator = match (rule.validator, matcher) {
        (ValidatorKind::Pattern, matcher) => Validator::Pattern(matcher),
        (ValidatorKind::Email, Some(shape)) => Validator::Email(shape),
        (ValidatorKind::Email, None) => {
            return Err(FieldRuleError::InvalidConfig(format!(
                "rule '{}': the email validator needs a pattern describing the address shape",
                rule.key
            )));
        }
        (ValidatorKind::Password, _) => Validator::Password,
    };

    let sanitiser = Sanitiser::compile(&rule.key, &rule.sanitiser)?;

    log::debug!(
        target: "fieldrules_core::compiler",
        "Field rule '{}' compiled successfully.",
        rule.key
    );

    Ok(CompiledRule {
        html_pattern: html_pattern(&rule.pattern),
        key: rule.key,
        description: rule.description,
        pattern: rule.pattern,
        placeholder: rule.placeholder,
        error: rule.error,
        pre_icon: rule.pre_icon,
        post_icon: rule.post_icon,
        sanitiser,
        validator,
    })
}

/// Compiles a list of descriptors, reporting every failure at once.
pub fn compile_rules(rules_to_compile: Vec<FieldRuleConfig>) -> Result<Vec<CompiledRule>, FieldRuleError> {
    debug!("Starting compilation of {} field rules.", rules_to_compile.len());

    let mut compiled_rules = Vec::with_capacity(rules_to_compile.len());
    let mut compilation_errors = Vec::new();

    for rule in rules_to_compile {
        match compile_rule(rule) {
            Ok(compiled) => compiled_rules.push(compiled),
            Err(e) => compilation_errors.push(e),
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        return Err(FieldRuleError::InvalidConfig(format!(
            "Failed to compile {} field rule(s):\n{}",
            compilation_errors.len(),
            error_message
        )));
    }

    debug!("Finished compiling field rules. Total compiled: {}.", compiled_rules.len());
    Ok(compiled_rules)
}

impl FieldBehaviour for CompiledRule {
    fn key(&self) -> &str {
        &self.key
    }

    fn sanitise(&self, raw: &str) -> String {
        self.sanitiser.apply(raw)
    }

    /// A value is only accepted when it is also a fixed point of the sanitiser,
    /// so an accepted value is never rewritten by the next keystroke.
    fn validate(&self, value: &str) -> String {
        let message = match &self.validator {
            Validator::Pattern(Some(matcher)) if !matcher.is_match(value) => return self.error.clone(),
            Validator::Pattern(_) => String::new(),
            Validator::Email(shape) => validators::check_email(value, shape, &self.error),
            Validator::Password => validators::check_password(value, &self.error),
        };

        if message.is_empty() && !self.sanitiser.is_none() && self.sanitiser.apply(value) != value {
            return self.error.clone();
        }
        message
    }

    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor {
            key: self.key.clone(),
            description: self.description.clone(),
            pattern: self.pattern.clone(),
            html_pattern: self.html_pattern.clone(),
            placeholder: self.placeholder.clone(),
            error: self.error.clone(),
            pre_icon: self.pre_icon.clone(),
            post_icon: self.post_icon.clone(),
        }
    }
}
