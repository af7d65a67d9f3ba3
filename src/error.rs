//! Error taxonomy for registration and dispatch.
//!
//! Registration errors are fatal at startup and never reachable once the
//! server is taking requests. Dispatch errors are recovered at the dispatch
//! boundary and turned into one structured wire response per call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Startup-time failures while building the component registry.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("duplicate component path: {0}")]
    DuplicatePath(String),

    #[error("invalid descriptor for {path}: {reason}")]
    InvalidDescriptor { path: String, reason: String },
}

/// What went wrong with a single input parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaultKind {
    Missing,
    Cardinality,
    TypeMismatch,
}

/// One entry of an aggregate validation report. Every offending parameter of
/// a request gets its own fault so clients can fix them in one round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamFault {
    pub param: String,
    pub fault: FaultKind,
    pub message: String,
}

impl ParamFault {
    pub fn missing(param: &str) -> ParamFault {
        ParamFault {
            param: param.to_string(),
            fault: FaultKind::Missing,
            message: format!("required parameter '{}' is missing", param),
        }
    }

    pub fn cardinality(param: &str, got: usize) -> ParamFault {
        ParamFault {
            param: param.to_string(),
            fault: FaultKind::Cardinality,
            message: format!("expected exactly one value, got {}", got),
        }
    }

    pub fn type_mismatch(param: &str, message: String) -> ParamFault {
        ParamFault {
            param: param.to_string(),
            fault: FaultKind::TypeMismatch,
            message,
        }
    }
}

/// Per-call failures, recovered at the dispatch boundary.
///
/// The `Display` strings are client-facing; server-side detail (the handler
/// fault source in particular) is logged where the error is raised and never
/// serialized to the wire.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unknown component path: {0}")]
    NotFound(String),

    #[error("input validation failed for {} parameter(s)", .0.len())]
    Validation(Vec<ParamFault>),

    #[error("component computation failed")]
    Computation {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("output slot '{slot}' could not be encoded: {reason}")]
    Encoding { slot: String, reason: String },

    #[error("handler produced {got} result(s), descriptor declares {expected}")]
    ArityMismatch { expected: usize, got: usize },
}

impl DispatchError {
    /// Stable error kind reported in the wire response.
    pub fn wire_kind(&self) -> &'static str {
        match self {
            DispatchError::NotFound(_) => "NotFoundError",
            DispatchError::Validation(_) => "ValidationError",
            DispatchError::Computation { .. } => "InternalComputationError",
            DispatchError::Encoding { .. } => "EncodingError",
            DispatchError::ArityMismatch { .. } => "ArityMismatchError",
        }
    }

    /// Client errors are addressable by fixing the request; everything else
    /// indicates a registration or handler bug on the server side.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DispatchError::NotFound(_) | DispatchError::Validation(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_kinds_are_stable() {
        assert_eq!(
            DispatchError::NotFound("/x".to_string()).wire_kind(),
            "NotFoundError"
        );
        assert_eq!(
            DispatchError::Validation(vec![]).wire_kind(),
            "ValidationError"
        );
        assert_eq!(
            DispatchError::ArityMismatch {
                expected: 2,
                got: 1
            }
            .wire_kind(),
            "ArityMismatchError"
        );
    }

    #[test]
    fn computation_error_display_is_redacted() {
        let err = DispatchError::Computation {
            path: "/pointat".to_string(),
            source: anyhow::anyhow!("index 7 out of bounds in segment table"),
        };
        assert_eq!(err.to_string(), "component computation failed");
    }

    #[test]
    fn client_server_error_split() {
        assert!(DispatchError::NotFound("/x".to_string()).is_client_error());
        assert!(DispatchError::Validation(vec![]).is_client_error());
        assert!(!DispatchError::Encoding {
            slot: "P".to_string(),
            reason: "unset".to_string()
        }
        .is_client_error());
    }
}
