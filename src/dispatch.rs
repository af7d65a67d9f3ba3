//! Per-call dispatch pipeline.
//!
//! Each call moves through lookup, input validation, invocation, and output
//! encoding; any failure short-circuits into exactly one structured error.
//! Calls share nothing but the read-only registry, so concurrent dispatches
//! cannot observe each other.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};
use tracing::{debug, error};

use crate::error::{DispatchError, ParamFault};
use crate::marshal;
use crate::registry::Registry;
use crate::schema::WireSlot;

/// Wire request: a component path plus named input slots.
#[derive(Debug, Clone, Deserialize)]
pub struct SolveRequest {
    pub path: String,
    #[serde(default)]
    pub inputs: HashMap<String, WireSlot>,
}

/// Wire success response. Every output slot encodes as an array of values.
#[derive(Debug, Clone, Serialize)]
pub struct SolveResponse {
    pub outputs: JsonMap<String, JsonValue>,
}

/// Wire failure response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireError {
    pub error: WireErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireErrorDetail {
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ParamFault>>,
}

impl From<&DispatchError> for WireError {
    fn from(err: &DispatchError) -> WireError {
        let details = match err {
            DispatchError::Validation(faults) => Some(faults.clone()),
            _ => None,
        };
        WireError {
            error: WireErrorDetail {
                kind: err.wire_kind().to_string(),
                message: err.to_string(),
                details,
            },
        }
    }
}

/// Runs one invocation against the registry.
///
/// Handler faults and encoding failures are logged here with full context;
/// the returned error carries only what is safe to put on the wire.
pub fn dispatch(registry: &Registry, request: &SolveRequest) -> Result<SolveResponse, DispatchError> {
    let descriptor = registry.lookup(&request.path)?;

    let args = marshal::decode_inputs(descriptor, &request.inputs)?;
    debug!("solving {} with {} input slot(s)", descriptor.path, args.len());

    let results = (descriptor.handler)(&args).map_err(|source| {
        error!("handler fault in {}: {:#}", descriptor.path, source);
        DispatchError::Computation {
            path: descriptor.path.clone(),
            source,
        }
    })?;

    let outputs = marshal::encode_outputs(descriptor, &results).inspect_err(|err| {
        error!("encoding failure in {}: {}", descriptor.path, err);
    })?;

    Ok(SolveResponse { outputs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentBuilder;
    use crate::error::FaultKind;
    use crate::schema::{ParamKind, Schema};
    use crate::value::{SlotValue, Value};
    use serde_json::json;

    fn test_registry() -> Registry {
        let mut registry = Registry::new();
        registry
            .register(
                ComponentBuilder::new("/echo")
                    .name("Echo")
                    .input(Schema::item(ParamKind::Number, "In", "I", "Input"))
                    .output(Schema::item(ParamKind::Number, "Out", "O", "Output"))
                    .build(|args| Ok(vec![args[0].clone()]))
                    .unwrap(),
            )
            .unwrap();
        registry
            .register(
                ComponentBuilder::new("/alwaysfails")
                    .name("AlwaysFails")
                    .input(Schema::item(ParamKind::Number, "In", "I", "Input"))
                    .output(Schema::item(ParamKind::Number, "Out", "O", "Output"))
                    .build(|_| anyhow::bail!("secret internal detail"))
                    .unwrap(),
            )
            .unwrap();
        registry
            .register(
                ComponentBuilder::new("/unlucky")
                    .name("Unlucky")
                    .input(Schema::item(ParamKind::Number, "In", "I", "Input"))
                    .leading_success_flag()
                    .output(Schema::item(ParamKind::Boolean, "Success", "S", "Success"))
                    .output(Schema::item(ParamKind::Point, "Point", "P", "Point"))
                    .build(|_| {
                        Ok(vec![
                            SlotValue::Item(Value::Boolean(false)),
                            SlotValue::Item(Value::Unset),
                        ])
                    })
                    .unwrap(),
            )
            .unwrap();
        registry
    }

    fn request(body: JsonValue) -> SolveRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn full_pipeline_success() {
        let registry = test_registry();
        let response = dispatch(
            &registry,
            &request(json!({"path": "/echo", "inputs": {"In": [4.5]}})),
        )
        .unwrap();
        assert_eq!(JsonValue::Object(response.outputs), json!({"Out": [4.5]}));
    }

    #[test]
    fn unknown_path_fails_before_validation() {
        let registry = test_registry();
        let err = dispatch(&registry, &request(json!({"path": "/doesNotExist"}))).unwrap_err();
        assert!(matches!(err, DispatchError::NotFound(path) if path == "/doesNotExist"));
    }

    #[test]
    fn handler_fault_is_redacted_on_the_wire() {
        let registry = test_registry();
        let err = dispatch(
            &registry,
            &request(json!({"path": "/alwaysfails", "inputs": {"In": 1.0}})),
        )
        .unwrap_err();

        let wire = WireError::from(&err);
        assert_eq!(wire.error.kind, "InternalComputationError");
        assert!(!wire.error.message.contains("secret"));
    }

    #[test]
    fn unset_payload_suppressed_by_success_flag() {
        let registry = test_registry();
        let response = dispatch(
            &registry,
            &request(json!({"path": "/unlucky", "inputs": {"In": 1.0}})),
        )
        .unwrap();
        assert_eq!(
            JsonValue::Object(response.outputs),
            json!({"Success": [false], "Point": [null]})
        );
    }

    #[test]
    fn failing_call_does_not_poison_the_registry() {
        let registry = test_registry();
        dispatch(
            &registry,
            &request(json!({"path": "/alwaysfails", "inputs": {"In": 1.0}})),
        )
        .unwrap_err();

        // the same registry keeps serving
        let response = dispatch(
            &registry,
            &request(json!({"path": "/echo", "inputs": {"In": 1.0}})),
        )
        .unwrap();
        assert_eq!(JsonValue::Object(response.outputs), json!({"Out": [1.0]}));
    }

    #[test]
    fn validation_error_carries_wire_details() {
        let registry = test_registry();
        let err = dispatch(&registry, &request(json!({"path": "/echo"}))).unwrap_err();

        let wire = WireError::from(&err);
        assert_eq!(wire.error.kind, "ValidationError");
        let details = wire.error.details.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].param, "In");
        assert_eq!(details[0].fault, FaultKind::Missing);
    }

    #[test]
    fn request_inputs_default_to_empty() {
        let parsed = request(json!({"path": "/echo"}));
        assert!(parsed.inputs.is_empty());
    }
}
