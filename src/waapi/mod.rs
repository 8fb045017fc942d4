//! WAAPI Boundary for the Assigner
//!
//! Everything the core needs from the Wwise authoring tool is behind the
//! `SwitchContainerOps` trait, so the matching and reconciliation pipeline
//! never talks to the wire directly.
//!
//! # Architecture
//!
//! ```text
//! ContainerRun → SwitchContainerOps trait → [WaapiClient, MockProject]
//! ```
//!
//! Query failures degrade at this boundary: the trait reports an absent
//! switch group, an empty object list, or a `false` success flag instead of
//! propagating transport errors into the pipeline. The concrete client logs
//! the underlying `WaapiError` before degrading.

pub mod client;
pub mod mock;
pub mod objects;

pub use client::{WaapiClient, DEFAULT_WAAPI_URL};
pub use mock::MockProject;
pub use objects::{AssignmentEntry, ObjectId, ObjectKind, ProjectInfo, WwiseObject};

/// Errors that can occur during WAAPI calls
#[derive(Debug, Clone, PartialEq)]
pub enum WaapiError {
    /// Could not reach the WAAPI endpoint
    Connection(String),
    /// Request timed out
    Timeout,
    /// WAAPI returned an error response
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from WAAPI
        message: String,
    },
    /// Response could not be parsed
    InvalidResponse(String),
}

impl std::fmt::Display for WaapiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WaapiError::Connection(msg) => write!(f, "Connection error: {}", msg),
            WaapiError::Timeout => write!(f, "Request timed out"),
            WaapiError::Api { status, message } => {
                write!(f, "WAAPI error {}: {}", status, message)
            }
            WaapiError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for WaapiError {}

/// Operations the assignment pipeline needs from the authoring tool.
///
/// One implementation talks WAAPI over HTTP (`WaapiClient`); an in-memory
/// implementation backs the tests (`MockProject`). Every call is a blocking
/// round trip; none is retried.
pub trait SwitchContainerOps {
    /// The switch group (or state group) the container routes on, if set.
    fn resolve_switch_group(&mut self, container: &WwiseObject) -> Option<WwiseObject>;

    /// The container's children, in authoring order.
    fn list_children(&mut self, container: &WwiseObject) -> Vec<WwiseObject>;

    /// The switches of a switch group, in authoring order.
    fn list_switches(&mut self, switch_group: &WwiseObject) -> Vec<WwiseObject>;

    /// Assignments already recorded on the container.
    fn existing_assignments(&mut self, container: &WwiseObject) -> Vec<AssignmentEntry>;

    /// Record an assignment; `true` on success.
    fn write_assignment(&mut self, child: &ObjectId, switch: &ObjectId) -> bool;

    /// Remove an assignment; `true` on success.
    fn delete_assignment(&mut self, child: &ObjectId, switch: &ObjectId) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = WaapiError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(e.to_string(), "WAAPI error 500: boom");
        assert_eq!(
            WaapiError::Connection("refused".to_string()).to_string(),
            "Connection error: refused"
        );
        assert_eq!(WaapiError::Timeout.to_string(), "Request timed out");
    }

    #[test]
    fn test_trait_is_object_safe() {
        fn _takes_dyn(_ops: &mut dyn SwitchContainerOps) {}
    }
}
