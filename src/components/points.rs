//! Point, vector, and line construction components.

use crate::component::{ComponentBuilder, ComponentDescriptor};
use crate::error::RegistrationError;
use crate::geometry::{Line, Point3d, Vector3d};
use crate::registry::Registry;
use crate::schema::{ParamKind, Schema};
use crate::value::{SlotValue, Value};

use super::{number_arg, point_arg};

pub fn register_components(registry: &mut Registry) -> Result<(), RegistrationError> {
    registry.register(createpoint_component()?)?;
    registry.register(createvector_component()?)?;
    registry.register(createline_component()?)?;
    Ok(())
}

fn createpoint_component() -> Result<ComponentDescriptor, RegistrationError> {
    ComponentBuilder::new("/createpoint")
        .name("CreatePoint")
        .nickname("CrPt")
        .description("Create a point from x, y, and z coordinates")
        .input(Schema::item(ParamKind::Number, "X", "X", "X coordinate"))
        .input(Schema::item(ParamKind::Number, "Y", "Y", "Y coordinate"))
        .input(Schema::item(ParamKind::Number, "Z", "Z", "Z coordinate"))
        .output(Schema::item(ParamKind::Point, "Point", "P", "Resulting point"))
        .build(|args| {
            let x = number_arg(args, 0)?;
            let y = number_arg(args, 1)?;
            let z = number_arg(args, 2)?;
            Ok(vec![SlotValue::Item(Value::Point(Point3d::new(x, y, z)))])
        })
}

fn createvector_component() -> Result<ComponentDescriptor, RegistrationError> {
    ComponentBuilder::new("/createvector")
        .name("CreateVector")
        .nickname("CrVec")
        .description("Create a vector from x, y, and z components")
        .input(Schema::item(ParamKind::Number, "X", "X", "X component"))
        .input(Schema::item(ParamKind::Number, "Y", "Y", "Y component"))
        .input(Schema::item(ParamKind::Number, "Z", "Z", "Z component"))
        .output(Schema::item(ParamKind::Vector, "Vector", "V", "Resulting vector"))
        .build(|args| {
            let x = number_arg(args, 0)?;
            let y = number_arg(args, 1)?;
            let z = number_arg(args, 2)?;
            Ok(vec![SlotValue::Item(Value::Vector(Vector3d::new(x, y, z)))])
        })
}

fn createline_component() -> Result<ComponentDescriptor, RegistrationError> {
    ComponentBuilder::new("/createline")
        .name("CreateLine")
        .nickname("CrLn")
        .description("Create a line between two points")
        .input(Schema::item(ParamKind::Point, "Start", "S", "Start point"))
        .input(Schema::item(ParamKind::Point, "End", "E", "End point"))
        .output(Schema::item(ParamKind::Line, "Line", "L", "Resulting line"))
        .build(|args| {
            let start = point_arg(args, 0)?;
            let end = point_arg(args, 1)?;
            Ok(vec![SlotValue::Item(Value::Line(Line::new(start, end)))])
        })
}
