//! Built-in geometry components.
//!
//! Every component here is a declaration plus a thin forwarding handler; the
//! actual computation lives in the geometry module. New components register
//! themselves in one of the submodules and nothing else changes.

mod curves;
mod points;
mod surfaces;

use anyhow::{bail, Result};
use tracing::info;

use crate::error::RegistrationError;
use crate::geometry::{Curve, Point3d, Surface};
use crate::registry::Registry;
use crate::value::{SlotValue, Value};

/// Builds the registry served by the process, with every built-in component
/// registered.
pub fn default_registry() -> Result<Registry, RegistrationError> {
    let mut registry = Registry::new();
    points::register_components(&mut registry)?;
    curves::register_components(&mut registry)?;
    surfaces::register_components(&mut registry)?;
    info!(
        "component registry initialized with {} components",
        registry.len()
    );
    Ok(registry)
}

// Positional argument accessors for handlers. The marshaller has already
// validated kinds and cardinality against the descriptor, so a miss here is
// a registration bug and reported as a handler fault.

pub(crate) fn number_arg(args: &[SlotValue], index: usize) -> Result<f64> {
    match args.get(index) {
        Some(SlotValue::Item(Value::Number(n))) => Ok(*n),
        other => bail!("argument {} is not a Number item: {:?}", index, other),
    }
}

pub(crate) fn integer_arg(args: &[SlotValue], index: usize) -> Result<i64> {
    match args.get(index) {
        Some(SlotValue::Item(Value::Integer(i))) => Ok(*i),
        other => bail!("argument {} is not an Integer item: {:?}", index, other),
    }
}

pub(crate) fn point_arg(args: &[SlotValue], index: usize) -> Result<Point3d> {
    match args.get(index) {
        Some(SlotValue::Item(Value::Point(p))) => Ok(*p),
        other => bail!("argument {} is not a Point item: {:?}", index, other),
    }
}

pub(crate) fn curve_arg(args: &[SlotValue], index: usize) -> Result<Curve> {
    match args.get(index) {
        Some(SlotValue::Item(Value::Curve(c))) => Ok(c.clone()),
        other => bail!("argument {} is not a Curve item: {:?}", index, other),
    }
}

pub(crate) fn surface_arg(args: &[SlotValue], index: usize) -> Result<Surface> {
    match args.get(index) {
        Some(SlotValue::Item(Value::Surface(s))) => Ok(s.clone()),
        other => bail!("argument {} is not a Surface item: {:?}", index, other),
    }
}

pub(crate) fn point_list_arg(args: &[SlotValue], index: usize) -> Result<Vec<Point3d>> {
    let values = match args.get(index) {
        Some(SlotValue::List(values)) => values,
        other => bail!("argument {} is not a list: {:?}", index, other),
    };
    values
        .iter()
        .map(|value| match value {
            Value::Point(p) => Ok(*p),
            other => bail!("list element is not a Point: {:?}", other),
        })
        .collect()
}
