//! Structured errors
//!
//! Every failure this layer can detect is about the caller's arguments or
//! the registry's configuration. Errors carry a machine-readable code, a
//! message and, where it helps, a suggestion. Remote failures are not
//! represented here; they travel through the evaluator's own error type.

use crate::KindError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
    pub const LENGTH_MISMATCH: &str = "LENGTH_MISMATCH";
    pub const EMPTY_INPUT: &str = "EMPTY_INPUT";
    pub const TYPE_ERROR: &str = "TYPE_ERROR";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const UNKNOWN_KIND: &str = "UNKNOWN_KIND";
    pub const UNKNOWN_BUNDLE: &str = "UNKNOWN_BUNDLE";
    pub const UNKNOWN_METHOD: &str = "UNKNOWN_METHOD";
    pub const DUPLICATE_BUNDLE: &str = "DUPLICATE_BUNDLE";
    pub const DEPRECATED: &str = "DEPRECATED";
    pub const EVALUATION: &str = "EVALUATION";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational, the call went through
    Warning,
    /// The call was rejected
    Error,
    /// Configuration is broken; the process should not continue
    Fatal,
}

/// Where an error occurred
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Proxy kind the call targeted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Method or legacy function name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<String>,
}

/// Structured error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeeError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,

    pub severity: Severity,
}

impl GeeError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            context: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: set kind context
    pub fn on_kind(mut self, kind: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.kind = Some(kind.into());
        self
    }

    /// Builder: set method context
    pub fn in_method(mut self, method: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.method = Some(method.into());
        self
    }

    /// Builder: add a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.notes.push(note.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }

    // ========== Common Error Constructors ==========

    pub fn invalid_argument(func: &str, details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_ARGUMENT, format!("{}(): {}", func, details.into()))
            .in_method(func)
    }

    pub fn length_mismatch(func: &str, left: &str, right: &str, l: usize, r: usize) -> Self {
        Self::new(
            codes::LENGTH_MISMATCH,
            format!("{}(): {} has {} elements but {} has {}", func, left, l, right, r),
        )
        .with_suggestion(format!("Pass one entry in '{}' per entry in '{}'", right, left))
        .in_method(func)
    }

    pub fn empty_input(func: &str, arg: &str) -> Self {
        Self::new(codes::EMPTY_INPUT, format!("{}(): '{}' must not be empty", func, arg))
            .in_method(func)
    }

    pub fn type_error(expected: &str, got: &str) -> Self {
        Self::new(codes::TYPE_ERROR, format!("Expected {}, got {}", expected, got))
    }

    pub fn arg_count(func: &str, expected: usize, got: usize) -> Self {
        Self::new(
            codes::ARG_COUNT,
            format!("{}() expects at most {} arguments, got {}", func, expected, got),
        )
        .with_suggestion(format!("Use help('{}') for usage", func))
        .in_method(func)
    }

    pub fn arg_type(func: &str, arg: &str, expected: &str, got: &str) -> Self {
        Self::new(
            codes::ARG_TYPE,
            format!("{}() argument '{}': expected {}, got {}", func, arg, expected, got),
        )
        .in_method(func)
    }

    pub fn unknown_bundle(kind: &str, bundle: &str) -> Self {
        Self::new(
            codes::UNKNOWN_BUNDLE,
            format!("No extension bundle '{}' registered on {}", bundle, kind),
        )
        .on_kind(kind)
    }

    pub fn unknown_method(kind: &str, bundle: &str, method: &str) -> Self {
        Self::new(
            codes::UNKNOWN_METHOD,
            format!("{}.{} has no method '{}'", kind, bundle, method),
        )
        .on_kind(kind)
        .in_method(method)
    }

    pub fn duplicate_bundle(kind: &str, bundle: &str) -> Self {
        Self::new(
            codes::DUPLICATE_BUNDLE,
            format!("Extension bundle '{}' is already registered on {}", bundle, kind),
        )
        .with_suggestion("Register each bundle once, at startup")
        .on_kind(kind)
        .with_severity(Severity::Fatal)
    }

    pub fn deprecated(legacy: &str, replacement: &str, since: &str) -> Self {
        Self::new(
            codes::DEPRECATED,
            format!("{} is deprecated since {}", legacy, since),
        )
        .with_suggestion(format!("Use {} instead", replacement))
        .in_method(legacy)
    }

    pub fn evaluation(details: impl Into<String>) -> Self {
        Self::new(codes::EVALUATION, format!("Evaluation failed: {}", details.into()))
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
            .with_severity(Severity::Fatal)
    }
}

impl std::fmt::Display for GeeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for GeeError {}

impl From<KindError> for GeeError {
    fn from(err: KindError) -> Self {
        match err {
            KindError::Unknown(name) => Self::new(
                codes::UNKNOWN_KIND,
                format!("Unknown proxy kind: {}", name),
            )
            .with_suggestion(format!(
                "Known kinds: {}",
                crate::Kind::ALL.iter().map(|k| k.name()).collect::<Vec<_>>().join(", ")
            ))
            .with_severity(Severity::Fatal),
        }
    }
}
