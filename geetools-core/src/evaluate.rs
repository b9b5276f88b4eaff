//! Evaluation seam
//!
//! Helpers only build graphs. Turning a handle into a concrete value is the
//! caller's business and goes through an implementation of [`Evaluate`]:
//! a remote client, or the in-memory evaluator used by the test suites.

use crate::proxy::Proxy;
use crate::value::Value;

/// Something that can compute the concrete value of an expression graph
pub trait Evaluate {
    /// Error reported by the backend. Passed through unchanged.
    type Error: std::error::Error;

    fn evaluate(&self, value: &Value) -> Result<serde_json::Value, Self::Error>;

    /// Concrete value of a handle
    fn get_info<P: Proxy>(&self, handle: &P) -> Result<serde_json::Value, Self::Error> {
        self.evaluate(handle.value())
    }
}
