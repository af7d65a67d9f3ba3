//! Native values as seen by component handlers.

use crate::geometry::{Brep, Curve, Line, Point3d, Surface, Vector3d};
use crate::schema::ParamKind;

/// One native value. `Unset` models a computation that could not produce a
/// result (the None side of the success-flag idiom); it has no wire encoding
/// of its own.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Integer(i64),
    Boolean(bool),
    Text(String),
    Point(Point3d),
    Vector(Vector3d),
    Line(Line),
    Curve(Curve),
    Surface(Surface),
    Brep(Brep),
    Unset,
}

impl Value {
    /// The schema kind this value satisfies, None for `Unset`.
    pub fn kind(&self) -> Option<ParamKind> {
        match self {
            Value::Number(_) => Some(ParamKind::Number),
            Value::Integer(_) => Some(ParamKind::Integer),
            Value::Boolean(_) => Some(ParamKind::Boolean),
            Value::Text(_) => Some(ParamKind::String),
            Value::Point(_) => Some(ParamKind::Point),
            Value::Vector(_) => Some(ParamKind::Vector),
            Value::Line(_) => Some(ParamKind::Line),
            Value::Curve(_) => Some(ParamKind::Curve),
            Value::Surface(_) => Some(ParamKind::Surface),
            Value::Brep(_) => Some(ParamKind::Brep),
            Value::Unset => None,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Value::Unset)
    }
}

/// A decoded parameter or result slot: one value for Item access, an ordered
/// list for List access.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotValue {
    Item(Value),
    List(Vec<Value>),
}
