//! Surface and brep components.

use crate::component::{ComponentBuilder, ComponentDescriptor};
use crate::error::RegistrationError;
use crate::geometry::{Brep, Surface};
use crate::registry::Registry;
use crate::schema::{ParamKind, Schema};
use crate::value::{SlotValue, Value};

use super::{number_arg, point_arg, surface_arg};

pub fn register_components(registry: &mut Registry) -> Result<(), RegistrationError> {
    registry.register(srf4pt_component()?)?;
    registry.register(srfpointat_component()?)?;
    registry.register(srfnormalat_component()?)?;
    registry.register(createbrep_component()?)?;
    Ok(())
}

fn srf4pt_component() -> Result<ComponentDescriptor, RegistrationError> {
    ComponentBuilder::new("/srf4pt")
        .name("4Point Surface")
        .nickname("Srf4Pt")
        .description("Create a surface from four corner points")
        .input(Schema::item(ParamKind::Point, "Corner A", "A", "First corner"))
        .input(Schema::item(ParamKind::Point, "Corner B", "B", "Second corner"))
        .input(Schema::item(ParamKind::Point, "Corner C", "C", "Third corner"))
        .input(Schema::item(ParamKind::Point, "Corner D", "D", "Fourth corner"))
        .output(Schema::item(ParamKind::Surface, "Surface", "S", "Resulting surface"))
        .build(|args| {
            let a = point_arg(args, 0)?;
            let b = point_arg(args, 1)?;
            let c = point_arg(args, 2)?;
            let d = point_arg(args, 3)?;
            Ok(vec![SlotValue::Item(Value::Surface(Surface::from_corners(
                a, b, c, d,
            )))])
        })
}

fn srfpointat_component() -> Result<ComponentDescriptor, RegistrationError> {
    ComponentBuilder::new("/srfpointat")
        .name("SurfacePointAt")
        .nickname("SrfPtAt")
        .description("Surface point at normalized u, v parameters")
        .input(Schema::item(ParamKind::Surface, "Surface", "S", "Surface to evaluate"))
        .input(Schema::item(ParamKind::Number, "U", "U", "U parameter"))
        .input(Schema::item(ParamKind::Number, "V", "V", "V parameter"))
        .output(Schema::item(ParamKind::Point, "Point", "P", "Point on surface"))
        .build(|args| {
            let surface = surface_arg(args, 0)?;
            let u = number_arg(args, 1)?;
            let v = number_arg(args, 2)?;
            Ok(vec![SlotValue::Item(Value::Point(surface.point_at(u, v)))])
        })
}

fn srfnormalat_component() -> Result<ComponentDescriptor, RegistrationError> {
    ComponentBuilder::new("/srfnormalat")
        .name("SurfaceNormalAt")
        .nickname("SrfNrmAt")
        .description("Surface normal at normalized u, v parameters")
        .input(Schema::item(ParamKind::Surface, "Surface", "S", "Surface to evaluate"))
        .input(Schema::item(ParamKind::Number, "U", "U", "U parameter"))
        .input(Schema::item(ParamKind::Number, "V", "V", "V parameter"))
        .leading_success_flag()
        .output(Schema::item(ParamKind::Boolean, "Success", "S", "Success"))
        .output(Schema::item(ParamKind::Vector, "Normal", "N", "Unit normal"))
        .build(|args| {
            let surface = surface_arg(args, 0)?;
            let u = number_arg(args, 1)?;
            let v = number_arg(args, 2)?;
            let (success, normal) = match surface.normal_at(u, v) {
                Some(normal) => (true, Value::Vector(normal)),
                None => (false, Value::Unset),
            };
            Ok(vec![
                SlotValue::Item(Value::Boolean(success)),
                SlotValue::Item(normal),
            ])
        })
}

fn createbrep_component() -> Result<ComponentDescriptor, RegistrationError> {
    ComponentBuilder::new("/createbrep")
        .name("CreateBrep")
        .nickname("CrBrep")
        .description("Create a boundary representation from a surface")
        .input(Schema::item(ParamKind::Surface, "Surface", "S", "Base surface"))
        .output(Schema::item(ParamKind::Brep, "Brep", "B", "Resulting brep"))
        .build(|args| {
            let surface = surface_arg(args, 0)?;
            Ok(vec![SlotValue::Item(Value::Brep(Brep::from_surface(
                surface,
            )))])
        })
}
