//! Defines the core `FieldBehaviour` trait and the read-only rule descriptor.
//!
//! The `FieldBehaviour` trait is the capability interface every field type
//! offers: sanitise raw keystrokes and validate a finished value. Callers that
//! render or drive form fields depend on this trait rather than on how a rule
//! was configured or compiled.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};

/// Read-only descriptor used to render a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDescriptor {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The rule's regex source.
    pub pattern: String,
    /// `pattern` escaped for use verbatim as an HTML `pattern` attribute.
    pub html_pattern: String,
    pub placeholder: String,
    pub error: String,
    pub pre_icon: String,
    pub post_icon: String,
}

/// What a field type can do with user input.
///
/// Implementations must be pure: no shared mutable state, so one instance can
/// serve any number of threads.
pub trait FieldBehaviour: Send + Sync {
    /// The registry key of the field type.
    fn key(&self) -> &str;

    /// Cleans raw input into its canonical form.
    ///
    /// Never fails and is idempotent. Input is returned unchanged when the
    /// field type has no sanitiser.
    fn sanitise(&self, raw: &str) -> String;

    /// Returns the error message for an unacceptable value, or an empty
    /// string when the value is valid.
    fn validate(&self, value: &str) -> String;

    fn is_valid(&self, value: &str) -> bool {
        self.validate(value).is_empty()
    }

    /// Returns the descriptor used to render the field.
    fn descriptor(&self) -> RuleDescriptor;
}
