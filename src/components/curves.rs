//! Curve construction and evaluation components.

use crate::component::{ComponentBuilder, ComponentDescriptor};
use crate::error::RegistrationError;
use crate::geometry::Curve;
use crate::registry::Registry;
use crate::schema::{ParamKind, Schema};
use crate::value::{SlotValue, Value};

use super::{curve_arg, integer_arg, number_arg, point_arg, point_list_arg};

pub fn register_components(registry: &mut Registry) -> Result<(), RegistrationError> {
    registry.register(createcurve_component()?)?;
    registry.register(controlpoints_component()?)?;
    registry.register(domain_component()?)?;
    registry.register(pointat_component()?)?;
    registry.register(crvpointat_component()?)?;
    registry.register(tangentat_component()?)?;
    registry.register(frameat_component()?)?;
    registry.register(isclosed_component()?)?;
    registry.register(reverse_component()?)?;
    registry.register(divide_component()?)?;
    registry.register(orientation_component()?)?;
    Ok(())
}

fn createcurve_component() -> Result<ComponentDescriptor, RegistrationError> {
    ComponentBuilder::new("/createcurve")
        .name("CreateCurve")
        .nickname("CrCrv")
        .description("Create a curve between two points")
        .input(Schema::item(ParamKind::Point, "Start", "S", "Start point"))
        .input(Schema::item(ParamKind::Point, "End", "E", "End point"))
        .output(Schema::item(ParamKind::Curve, "Curve", "C", "Resulting curve"))
        .build(|args| {
            let start = point_arg(args, 0)?;
            let end = point_arg(args, 1)?;
            Ok(vec![SlotValue::Item(Value::Curve(Curve::line(start, end)))])
        })
}

fn controlpoints_component() -> Result<ComponentDescriptor, RegistrationError> {
    ComponentBuilder::new("/crvcontrolpoints")
        .name("CurveFromControlPoints")
        .nickname("CrvCP")
        .description("Create an interpolated curve through control points")
        .input(Schema::list(ParamKind::Point, "Points", "P", "Control points, in order"))
        .input(Schema::item(ParamKind::Integer, "Degree", "D", "Curve degree"))
        .leading_success_flag()
        .output(Schema::item(ParamKind::Boolean, "Success", "S", "Success"))
        .output(Schema::item(ParamKind::Curve, "Curve", "C", "Resulting curve"))
        .build(|args| {
            let points = point_list_arg(args, 0)?;
            let degree = integer_arg(args, 1)?;
            let (success, curve) = match Curve::from_control_points(points, degree) {
                Some(curve) => (true, Value::Curve(curve)),
                None => (false, Value::Unset),
            };
            Ok(vec![
                SlotValue::Item(Value::Boolean(success)),
                SlotValue::Item(curve),
            ])
        })
}

fn domain_component() -> Result<ComponentDescriptor, RegistrationError> {
    ComponentBuilder::new("/crvdomain")
        .name("Domain")
        .nickname("CrvDom")
        .description("Curve parameter domain")
        .input(Schema::item(ParamKind::Curve, "Curve", "C", "Curve to evaluate"))
        .output(Schema::item(ParamKind::Number, "Min", "T0", "Domain start"))
        .output(Schema::item(ParamKind::Number, "Max", "T1", "Domain end"))
        .build(|args| {
            let domain = curve_arg(args, 0)?.domain();
            Ok(vec![
                SlotValue::Item(Value::Number(domain.t0)),
                SlotValue::Item(Value::Number(domain.t1)),
            ])
        })
}

fn pointat_component() -> Result<ComponentDescriptor, RegistrationError> {
    ComponentBuilder::new("/pointat")
        .name("PointAt")
        .nickname("PtAt")
        .description("Get point along curve, clamped to the domain")
        .input(Schema::item(ParamKind::Curve, "Curve", "C", "Curve to evaluate"))
        .input(Schema::item(ParamKind::Number, "t", "t", "Parameter on Curve to evaluate"))
        .output(Schema::item(ParamKind::Point, "P", "P", "Point on curve at t"))
        .build(|args| {
            let curve = curve_arg(args, 0)?;
            let t = number_arg(args, 1)?;
            Ok(vec![SlotValue::Item(Value::Point(curve.point_at(t)))])
        })
}

fn crvpointat_component() -> Result<ComponentDescriptor, RegistrationError> {
    ComponentBuilder::new("/crvpointat")
        .name("CurvePointAt")
        .nickname("CrvPtAt")
        .description("Curve point at parameter, failing out of domain")
        .input(Schema::item(ParamKind::Curve, "Curve", "C", "Curve to evaluate"))
        .input(Schema::item(ParamKind::Number, "Parameter", "T", "Parameter to evaluate"))
        .leading_success_flag()
        .output(Schema::item(ParamKind::Boolean, "Success", "S", "Success"))
        .output(Schema::item(ParamKind::Point, "Point", "P", "Point on curve"))
        .build(|args| {
            let curve = curve_arg(args, 0)?;
            let t = number_arg(args, 1)?;
            let (success, point) = match curve.try_point_at(t) {
                Some(point) => (true, Value::Point(point)),
                None => (false, Value::Unset),
            };
            Ok(vec![
                SlotValue::Item(Value::Boolean(success)),
                SlotValue::Item(point),
            ])
        })
}

fn tangentat_component() -> Result<ComponentDescriptor, RegistrationError> {
    ComponentBuilder::new("/crvtangentat")
        .name("TangentAt")
        .nickname("CrvTanAt")
        .description("Curve tangent at parameter")
        .input(Schema::item(ParamKind::Curve, "Curve", "C", "Curve to evaluate"))
        .input(Schema::item(ParamKind::Number, "Parameter", "T", "Parameter to evaluate"))
        .leading_success_flag()
        .output(Schema::item(ParamKind::Boolean, "Success", "S", "Success"))
        .output(Schema::item(ParamKind::Vector, "Tangent", "T", "Tangent vector"))
        .build(|args| {
            let curve = curve_arg(args, 0)?;
            let t = number_arg(args, 1)?;
            let (success, tangent) = match curve.tangent_at(t) {
                Some(tangent) => (true, Value::Vector(tangent)),
                None => (false, Value::Unset),
            };
            Ok(vec![
                SlotValue::Item(Value::Boolean(success)),
                SlotValue::Item(tangent),
            ])
        })
}

fn frameat_component() -> Result<ComponentDescriptor, RegistrationError> {
    // a plane comes back decomposed so clients can rebuild it from
    // an origin point and three axis vectors
    ComponentBuilder::new("/crvframeat")
        .name("FrameAt")
        .nickname("CrvFrameAt")
        .description("Curve frame at parameter")
        .input(Schema::item(ParamKind::Curve, "Curve", "C", "Curve to evaluate"))
        .input(Schema::item(ParamKind::Number, "Parameter", "T", "Parameter to evaluate"))
        .leading_success_flag()
        .output(Schema::item(ParamKind::Boolean, "Success", "Success", "Success"))
        .output(Schema::item(ParamKind::Point, "Origin", "O", "Origin"))
        .output(Schema::item(ParamKind::Vector, "X", "X", "X axis"))
        .output(Schema::item(ParamKind::Vector, "Y", "Y", "Y axis"))
        .output(Schema::item(ParamKind::Vector, "Z", "Z", "Z axis"))
        .build(|args| {
            let curve = curve_arg(args, 0)?;
            let t = number_arg(args, 1)?;
            Ok(match curve.frame_at(t) {
                Some(frame) => vec![
                    SlotValue::Item(Value::Boolean(true)),
                    SlotValue::Item(Value::Point(frame.origin)),
                    SlotValue::Item(Value::Vector(frame.x_axis)),
                    SlotValue::Item(Value::Vector(frame.y_axis)),
                    SlotValue::Item(Value::Vector(frame.z_axis)),
                ],
                None => vec![
                    SlotValue::Item(Value::Boolean(false)),
                    SlotValue::Item(Value::Unset),
                    SlotValue::Item(Value::Unset),
                    SlotValue::Item(Value::Unset),
                    SlotValue::Item(Value::Unset),
                ],
            })
        })
}

fn isclosed_component() -> Result<ComponentDescriptor, RegistrationError> {
    ComponentBuilder::new("/crvisclosed")
        .name("IsClosed")
        .nickname("CrvIsClosed")
        .description("Whether the curve is closed")
        .input(Schema::item(ParamKind::Curve, "Curve", "C", "Curve to evaluate"))
        .output(Schema::item(ParamKind::Boolean, "Closed", "Cl", "True when closed"))
        .build(|args| {
            let curve = curve_arg(args, 0)?;
            Ok(vec![SlotValue::Item(Value::Boolean(curve.is_closed()))])
        })
}

fn reverse_component() -> Result<ComponentDescriptor, RegistrationError> {
    ComponentBuilder::new("/crvreverse")
        .name("Reverse")
        .nickname("CrvRev")
        .description("Reverse the direction of a curve")
        .input(Schema::item(ParamKind::Curve, "Curve", "C", "Curve to reverse"))
        .output(Schema::item(ParamKind::Curve, "Reversed", "R", "Reversed curve"))
        .build(|args| {
            let curve = curve_arg(args, 0)?;
            Ok(vec![SlotValue::Item(Value::Curve(curve.reverse()))])
        })
}

// Upper bound on client-requested division spans; the result allocation is
// proportional to the count.
const MAX_DIVISION_SPANS: i64 = 100_000;

fn divide_component() -> Result<ComponentDescriptor, RegistrationError> {
    ComponentBuilder::new("/crvdivide")
        .name("Divide")
        .nickname("CrvDiv")
        .description("Divide a curve into equal parameter spans")
        .input(Schema::item(ParamKind::Curve, "Curve", "C", "Curve to divide"))
        .input(Schema::item(ParamKind::Integer, "Count", "N", "Number of spans"))
        .leading_success_flag()
        .output(Schema::item(ParamKind::Boolean, "Success", "S", "Success"))
        .output(Schema::list(ParamKind::Point, "Points", "P", "Division points, in curve order"))
        .build(|args| {
            let curve = curve_arg(args, 0)?;
            let count = integer_arg(args, 1)?;
            if !(1..=MAX_DIVISION_SPANS).contains(&count) {
                return Ok(vec![
                    SlotValue::Item(Value::Boolean(false)),
                    SlotValue::List(Vec::new()),
                ]);
            }
            let points = curve.divide(count).into_iter().map(Value::Point).collect();
            Ok(vec![
                SlotValue::Item(Value::Boolean(true)),
                SlotValue::List(points),
            ])
        })
}

fn orientation_component() -> Result<ComponentDescriptor, RegistrationError> {
    // orientation is an enumerated result upstream; transported as a plain
    // integer (1 counterclockwise, -1 clockwise, 0 undefined)
    ComponentBuilder::new("/crvclosedorientation")
        .name("ClosedCurveOrientation")
        .nickname("CrvOrient")
        .description("Orientation of a closed curve in the world XY plane")
        .input(Schema::item(ParamKind::Curve, "Curve", "C", "Curve to evaluate"))
        .output(Schema::item(ParamKind::Integer, "Orientation", "O", "Orientation as integer"))
        .build(|args| {
            let curve = curve_arg(args, 0)?;
            Ok(vec![SlotValue::Item(Value::Integer(
                curve.closed_orientation(),
            ))])
        })
}
