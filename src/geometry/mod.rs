//! Native geometry types consumed by component handlers.
//!
//! This is the computation side of the server. The marshalling layer never
//! looks inside `Curve`/`Surface`/`Brep`, it only moves their serde exchange
//! form across the wire.

mod curve;
mod surface;

pub use curve::Curve;
pub use surface::{Brep, Surface};

use serde::{Deserialize, Serialize};

pub const GEOMETRY_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3d {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance_to(&self, other: &Point3d) -> f64 {
        (*other - *self).length()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3d {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn dot(&self, other: &Vector3d) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Vector3d) -> Vector3d {
        Vector3d::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Returns the unit vector with the same direction, or None for a
    /// degenerate (near zero length) vector.
    pub fn unitized(&self) -> Option<Vector3d> {
        let length = self.length();
        if length < GEOMETRY_TOLERANCE {
            return None;
        }
        Some(Vector3d::new(self.x / length, self.y / length, self.z / length))
    }
}

impl std::ops::Add<Vector3d> for Point3d {
    type Output = Point3d;

    fn add(self, rhs: Vector3d) -> Point3d {
        Point3d::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub<Point3d> for Point3d {
    type Output = Vector3d;

    fn sub(self, rhs: Point3d) -> Vector3d {
        Vector3d::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Add<Vector3d> for Vector3d {
    type Output = Vector3d;

    fn add(self, rhs: Vector3d) -> Vector3d {
        Vector3d::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Mul<f64> for Vector3d {
    type Output = Vector3d;

    fn mul(self, rhs: f64) -> Vector3d {
        Vector3d::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub from: Point3d,
    pub to: Point3d,
}

impl Line {
    pub fn new(from: Point3d, to: Point3d) -> Self {
        Self { from, to }
    }
}

/// Closed parameter interval, `t0 <= t1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub t0: f64,
    pub t1: f64,
}

impl Interval {
    pub fn new(t0: f64, t1: f64) -> Self {
        Self { t0, t1 }
    }

    pub fn length(&self) -> f64 {
        self.t1 - self.t0
    }

    pub fn contains(&self, t: f64) -> bool {
        t >= self.t0 && t <= self.t1
    }

    /// Maps a parameter inside the interval to [0, 1].
    pub fn normalized_parameter(&self, t: f64) -> f64 {
        if self.length() < GEOMETRY_TOLERANCE {
            return 0.0;
        }
        (t - self.t0) / self.length()
    }
}

/// Orthonormal frame with origin on a curve or surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub origin: Point3d,
    pub x_axis: Vector3d,
    pub y_axis: Vector3d,
    pub z_axis: Vector3d,
}

impl Plane {
    /// Builds a frame from an origin and the x axis direction. The remaining
    /// axes are chosen with the arbitrary-axis convention: the world z axis
    /// seeds the perpendicular unless x is nearly vertical.
    pub fn from_origin_and_x(origin: Point3d, x_direction: Vector3d) -> Option<Plane> {
        let x_axis = x_direction.unitized()?;
        let seed = if x_axis.z.abs() < 0.9 {
            Vector3d::new(0.0, 0.0, 1.0)
        } else {
            Vector3d::new(1.0, 0.0, 0.0)
        };
        let y_axis = seed.cross(&x_axis).unitized()?;
        let z_axis = x_axis.cross(&y_axis);
        Some(Plane {
            origin,
            x_axis,
            y_axis,
            z_axis,
        })
    }
}
