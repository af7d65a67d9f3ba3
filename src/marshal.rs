//! Wire-to-native marshalling.
//!
//! Decoding locates each declared input by name and reports every failing
//! parameter in one aggregate error. Encoding walks the declared outputs in
//! order and applies the success-suppression rule before touching any
//! payload value.

use std::collections::HashMap;

use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::component::ComponentDescriptor;
use crate::error::{DispatchError, ParamFault};
use crate::schema::{ParamAccess, Schema, WireSlot};
use crate::value::{SlotValue, Value};

/// Decodes the raw request inputs into positional native arguments, one slot
/// value per declared input schema.
pub fn decode_inputs(
    descriptor: &ComponentDescriptor,
    raw_inputs: &HashMap<String, WireSlot>,
) -> Result<Vec<SlotValue>, DispatchError> {
    let mut args = Vec::with_capacity(descriptor.inputs.len());
    let mut faults: Vec<ParamFault> = Vec::new();

    for schema in &descriptor.inputs {
        match raw_inputs.get(&schema.name) {
            None => faults.push(ParamFault::missing(&schema.name)),
            Some(slot) => match schema.validate(slot) {
                Ok(value) => args.push(value),
                Err(mut slot_faults) => faults.append(&mut slot_faults),
            },
        }
    }

    if faults.is_empty() {
        Ok(args)
    } else {
        Err(DispatchError::Validation(faults))
    }
}

/// Encodes positional native results into the wire output map. Every slot
/// encodes to an array of wire values; a suppressed or deliberately absent
/// Item slot encodes as `[null]`.
pub fn encode_outputs(
    descriptor: &ComponentDescriptor,
    results: &[SlotValue],
) -> Result<JsonMap<String, JsonValue>, DispatchError> {
    if results.len() != descriptor.outputs.len() {
        return Err(DispatchError::ArityMismatch {
            expected: descriptor.outputs.len(),
            got: results.len(),
        });
    }

    let suppressed = descriptor.leading_success_flag
        && matches!(results.first(), Some(SlotValue::Item(Value::Boolean(false))));

    let mut outputs = JsonMap::new();
    for (index, (schema, result)) in descriptor.outputs.iter().zip(results).enumerate() {
        let encoded = if suppressed && index > 0 {
            no_value_marker(schema)
        } else {
            encode_slot(schema, result)?
        };
        outputs.insert(schema.name.clone(), encoded);
    }
    Ok(outputs)
}

/// Explicit "no value" wire marker for a suppressed slot.
fn no_value_marker(schema: &Schema) -> JsonValue {
    match schema.access {
        ParamAccess::Item => JsonValue::Array(vec![JsonValue::Null]),
        ParamAccess::List => JsonValue::Array(vec![]),
    }
}

fn encode_slot(schema: &Schema, result: &SlotValue) -> Result<JsonValue, DispatchError> {
    let encoding_error = |reason: String| DispatchError::Encoding {
        slot: schema.name.clone(),
        reason,
    };

    match (schema.access, result) {
        (ParamAccess::Item, SlotValue::Item(value)) => {
            if value.is_unset() {
                return Err(encoding_error("unset".to_string()));
            }
            let encoded = schema.kind.encode(value).map_err(encoding_error)?;
            Ok(JsonValue::Array(vec![encoded]))
        }
        (ParamAccess::List, SlotValue::List(values)) => {
            let mut encoded = Vec::with_capacity(values.len());
            for (index, value) in values.iter().enumerate() {
                if value.is_unset() {
                    return Err(encoding_error(format!("unset at [{}]", index)));
                }
                encoded.push(
                    schema
                        .kind
                        .encode(value)
                        .map_err(|reason| encoding_error(format!("[{}]: {}", index, reason)))?,
                );
            }
            Ok(JsonValue::Array(encoded))
        }
        (ParamAccess::Item, SlotValue::List(_)) => {
            Err(encoding_error("expected a single value, handler produced a list".to_string()))
        }
        (ParamAccess::List, SlotValue::Item(_)) => {
            Err(encoding_error("expected a list, handler produced a single value".to_string()))
        }
    }
}
