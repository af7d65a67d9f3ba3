//! Parameter and result slot schemas.
//!
//! A `Schema` pins down the wire and native representation of one slot
//! through its kind and access, plus presentation metadata that never affects
//! marshalling. Schemas are immutable value objects; clients may cache the
//! discovery manifest built from them for the lifetime of the process.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::ParamFault;
use crate::geometry::{Brep, Curve, Line, Point3d, Surface, Vector3d};
use crate::value::{SlotValue, Value};

/// Primitive kind of a slot. Adding a kind means adding its decode/encode
/// arms here; registry and dispatch stay untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKind {
    Number,
    Integer,
    Boolean,
    String,
    Point,
    Vector,
    Line,
    Curve,
    Surface,
    Brep,
}

impl ParamKind {
    /// Decodes one wire value into a native value.
    pub fn decode(&self, wire: &JsonValue) -> Result<Value, String> {
        match self {
            ParamKind::Number => wire
                .as_f64()
                .filter(|n| n.is_finite())
                .map(Value::Number)
                .ok_or_else(|| mismatch("Number", wire)),
            ParamKind::Integer => wire
                .as_i64()
                .map(Value::Integer)
                .ok_or_else(|| mismatch("Integer", wire)),
            ParamKind::Boolean => wire
                .as_bool()
                .map(Value::Boolean)
                .ok_or_else(|| mismatch("Boolean", wire)),
            ParamKind::String => wire
                .as_str()
                .map(|s| Value::Text(s.to_string()))
                .ok_or_else(|| mismatch("String", wire)),
            ParamKind::Point => decode_exchange::<Point3d>("Point", wire).map(Value::Point),
            ParamKind::Vector => decode_exchange::<Vector3d>("Vector", wire).map(Value::Vector),
            ParamKind::Line => decode_exchange::<Line>("Line", wire).map(Value::Line),
            // Opaque exchange formats: deserialization is delegated to the
            // geometry library, the schema layer never inspects the payload.
            ParamKind::Curve => decode_exchange::<Curve>("Curve", wire).map(Value::Curve),
            ParamKind::Surface => decode_exchange::<Surface>("Surface", wire).map(Value::Surface),
            ParamKind::Brep => decode_exchange::<Brep>("Brep", wire).map(Value::Brep),
        }
    }

    /// Encodes one native value back to the wire. Fails when the value does
    /// not satisfy this kind, which indicates a handler/descriptor mismatch.
    pub fn encode(&self, value: &Value) -> Result<JsonValue, String> {
        match (self, value) {
            (ParamKind::Number, Value::Number(n)) => serde_json::Number::from_f64(*n)
                .map(JsonValue::Number)
                .ok_or_else(|| "non-finite number".to_string()),
            (ParamKind::Integer, Value::Integer(i)) => Ok(JsonValue::from(*i)),
            (ParamKind::Boolean, Value::Boolean(b)) => Ok(JsonValue::from(*b)),
            (ParamKind::String, Value::Text(s)) => Ok(JsonValue::from(s.clone())),
            (ParamKind::Point, Value::Point(p)) => encode_exchange(p),
            (ParamKind::Vector, Value::Vector(v)) => encode_exchange(v),
            (ParamKind::Line, Value::Line(l)) => encode_exchange(l),
            (ParamKind::Curve, Value::Curve(c)) => encode_exchange(c),
            (ParamKind::Surface, Value::Surface(s)) => encode_exchange(s),
            (ParamKind::Brep, Value::Brep(b)) => encode_exchange(b),
            (kind, value) => Err(format!(
                "native value {} does not satisfy declared kind {:?}",
                value
                    .kind()
                    .map(|k| format!("{:?}", k))
                    .unwrap_or_else(|| "Unset".to_string()),
                kind
            )),
        }
    }
}

fn mismatch(expected: &str, got: &JsonValue) -> String {
    format!("expected {}, got {}", expected, json_type_name(got))
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

fn decode_exchange<T: serde::de::DeserializeOwned>(
    kind: &str,
    wire: &JsonValue,
) -> Result<T, String> {
    serde_json::from_value(wire.clone())
        .map_err(|err| format!("malformed {} exchange value: {}", kind, err))
}

fn encode_exchange<T: Serialize>(value: &T) -> Result<JsonValue, String> {
    serde_json::to_value(value).map_err(|err| err.to_string())
}

/// Whether a slot holds exactly one value or an ordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamAccess {
    Item,
    List,
}

/// One wire-format slot as received in a request: a bare value or an array
/// of values. Both spell the same thing for List access; Item access
/// requires the normalized form to hold exactly one value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireSlot {
    Many(Vec<JsonValue>),
    One(JsonValue),
}

impl WireSlot {
    pub fn values(&self) -> &[JsonValue] {
        match self {
            WireSlot::Many(values) => values,
            WireSlot::One(value) => std::slice::from_ref(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub kind: ParamKind,
    pub access: ParamAccess,
    pub name: String,
    pub nickname: String,
    pub description: String,
}

impl Schema {
    pub fn item(kind: ParamKind, name: &str, nickname: &str, description: &str) -> Schema {
        Schema {
            kind,
            access: ParamAccess::Item,
            name: name.to_string(),
            nickname: nickname.to_string(),
            description: description.to_string(),
        }
    }

    pub fn list(kind: ParamKind, name: &str, nickname: &str, description: &str) -> Schema {
        Schema {
            kind,
            access: ParamAccess::List,
            name: name.to_string(),
            nickname: nickname.to_string(),
            description: description.to_string(),
        }
    }

    /// Validates and decodes one wire slot into a native slot value.
    ///
    /// Item access requires exactly one wire value. List access accepts zero
    /// or more, preserves order, and reports every failing element with its
    /// index.
    pub fn validate(&self, slot: &WireSlot) -> Result<SlotValue, Vec<ParamFault>> {
        let values = slot.values();
        match self.access {
            ParamAccess::Item => {
                if values.len() != 1 {
                    return Err(vec![ParamFault::cardinality(&self.name, values.len())]);
                }
                self.kind
                    .decode(&values[0])
                    .map(SlotValue::Item)
                    .map_err(|reason| vec![ParamFault::type_mismatch(&self.name, reason)])
            }
            ParamAccess::List => {
                let mut decoded = Vec::with_capacity(values.len());
                let mut faults = Vec::new();
                for (index, value) in values.iter().enumerate() {
                    match self.kind.decode(value) {
                        Ok(native) => decoded.push(native),
                        Err(reason) => faults.push(ParamFault::type_mismatch(
                            &self.name,
                            format!("[{}]: {}", index, reason),
                        )),
                    }
                }
                if faults.is_empty() {
                    Ok(SlotValue::List(decoded))
                } else {
                    Err(faults)
                }
            }
        }
    }
}
