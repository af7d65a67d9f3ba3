use serde::{Deserialize, Serialize};

use super::{Interval, Plane, Point3d, Vector3d, GEOMETRY_TOLERANCE};

/// Interpolated polyline curve with an explicit parameter domain.
///
/// The serde form of this type is the exchange format that travels over the
/// wire for `Curve` parameters. Deserialization enforces the structural
/// invariants (at least two points, non-inverted domain) so every `Curve`
/// handed to a handler is evaluable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CurveExchange")]
pub struct Curve {
    points: Vec<Point3d>,
    domain: Interval,
}

#[derive(Deserialize)]
struct CurveExchange {
    points: Vec<Point3d>,
    domain: Interval,
}

impl TryFrom<CurveExchange> for Curve {
    type Error = String;

    fn try_from(raw: CurveExchange) -> Result<Curve, String> {
        if raw.points.len() < 2 {
            return Err(format!(
                "curve requires at least two points, got {}",
                raw.points.len()
            ));
        }
        if !(raw.domain.t0 <= raw.domain.t1) {
            return Err(format!(
                "curve domain is inverted or non-finite: [{}, {}]",
                raw.domain.t0, raw.domain.t1
            ));
        }
        Ok(Curve {
            points: raw.points,
            domain: raw.domain,
        })
    }
}

impl Curve {
    /// Straight segment between two points, parameterized over [0, 1].
    pub fn line(start: Point3d, end: Point3d) -> Curve {
        Curve {
            points: vec![start, end],
            domain: Interval::new(0.0, 1.0),
        }
    }

    /// Interpolated curve through the given control points. Degrees above one
    /// apply rounds of corner cutting, keeping the end points fixed.
    pub fn from_control_points(points: Vec<Point3d>, degree: i64) -> Option<Curve> {
        if points.len() < 2 {
            return None;
        }
        let mut smoothed = points;
        for _ in 1..degree.clamp(1, 3) {
            smoothed = cut_corners(&smoothed);
        }
        Some(Curve {
            points: smoothed,
            domain: Interval::new(0.0, 1.0),
        })
    }

    pub fn domain(&self) -> Interval {
        self.domain
    }

    pub fn is_closed(&self) -> bool {
        let first = self.points.first();
        let last = self.points.last();
        match (first, last) {
            (Some(first), Some(last)) => {
                self.points.len() > 2 && first.distance_to(last) < GEOMETRY_TOLERANCE
            }
            _ => false,
        }
    }

    /// Point at a parameter inside the domain, None when out of domain.
    pub fn try_point_at(&self, t: f64) -> Option<Point3d> {
        if !self.domain.contains(t) {
            return None;
        }
        Some(self.interpolate(self.domain.normalized_parameter(t)))
    }

    /// Point at a parameter, clamped to the domain.
    pub fn point_at(&self, t: f64) -> Point3d {
        let clamped = t.clamp(self.domain.t0, self.domain.t1);
        self.interpolate(self.domain.normalized_parameter(clamped))
    }

    pub fn point_at_start(&self) -> Point3d {
        self.point_at(self.domain.t0)
    }

    pub fn point_at_end(&self) -> Point3d {
        self.point_at(self.domain.t1)
    }

    /// Unit tangent at a parameter, None when out of domain or degenerate.
    pub fn tangent_at(&self, t: f64) -> Option<Vector3d> {
        if !self.domain.contains(t) {
            return None;
        }
        let (index, _) = self.locate(self.domain.normalized_parameter(t));
        let segment = self.points[index + 1] - self.points[index];
        segment.unitized()
    }

    /// Orthonormal frame at a parameter, x axis along the tangent.
    pub fn frame_at(&self, t: f64) -> Option<Plane> {
        let origin = self.try_point_at(t)?;
        let tangent = self.tangent_at(t)?;
        Plane::from_origin_and_x(origin, tangent)
    }

    pub fn reverse(&self) -> Curve {
        let mut points = self.points.clone();
        points.reverse();
        Curve {
            points,
            domain: self.domain,
        }
    }

    /// Divides the curve into `count` spans of equal parameter length and
    /// returns the `count + 1` division points in curve order.
    pub fn divide(&self, count: i64) -> Vec<Point3d> {
        if count < 1 {
            return Vec::new();
        }
        let step = self.domain.length() / count as f64;
        (0..=count)
            .map(|i| self.point_at(self.domain.t0 + step * i as f64))
            .collect()
    }

    /// Orientation of a closed curve projected to the world XY plane:
    /// 1 counterclockwise, -1 clockwise, 0 for open or degenerate curves.
    ///
    /// Transported as a plain integer, matching how unmapped enumerated
    /// results are passed through elsewhere in the protocol.
    pub fn closed_orientation(&self) -> i64 {
        if !self.is_closed() {
            return 0;
        }
        let mut doubled_area = 0.0;
        for pair in self.points.windows(2) {
            doubled_area += (pair[1].x - pair[0].x) * (pair[1].y + pair[0].y);
        }
        if doubled_area < -GEOMETRY_TOLERANCE {
            1
        } else if doubled_area > GEOMETRY_TOLERANCE {
            -1
        } else {
            0
        }
    }

    /// Maps a normalized parameter in [0, 1] to a segment index and the
    /// fraction along that segment.
    fn locate(&self, s: f64) -> (usize, f64) {
        let segments = self.points.len() - 1;
        let scaled = s.clamp(0.0, 1.0) * segments as f64;
        let index = (scaled.floor() as usize).min(segments - 1);
        (index, scaled - index as f64)
    }

    fn interpolate(&self, s: f64) -> Point3d {
        let (index, fraction) = self.locate(s);
        let from = self.points[index];
        from + (self.points[index + 1] - from) * fraction
    }
}

/// One round of Chaikin corner cutting with pinned end points.
fn cut_corners(points: &[Point3d]) -> Vec<Point3d> {
    let mut out = Vec::with_capacity(points.len() * 2);
    out.push(points[0]);
    for pair in points.windows(2) {
        let direction = pair[1] - pair[0];
        out.push(pair[0] + direction * 0.25);
        out.push(pair[0] + direction * 0.75);
    }
    out.push(points[points.len() - 1]);
    out
}
