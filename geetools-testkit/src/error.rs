//! Evaluation errors

use geetools_core::GeeError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("algorithm '{0}' is not supported by the local evaluator")]
    Unsupported(String),

    #[error("{function}: argument '{arg}' must be {expected}, got {got}")]
    ArgType {
        function: String,
        arg: String,
        expected: &'static str,
        got: &'static str,
    },

    #[error("unbound function argument '{0}'")]
    Unbound(String),

    #[error("image asset '{0}' not found")]
    UnknownAsset(String),

    #[error("{function}: {message}")]
    Failed { function: String, message: String },

    #[error("{0} cannot be converted to JSON")]
    NotSerializable(&'static str),
}

impl EvalError {
    pub fn failed(function: &str, message: impl Into<String>) -> Self {
        EvalError::Failed {
            function: function.to_string(),
            message: message.into(),
        }
    }
}

impl From<EvalError> for GeeError {
    fn from(err: EvalError) -> Self {
        GeeError::evaluation(err.to_string())
    }
}
