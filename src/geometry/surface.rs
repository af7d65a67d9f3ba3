use serde::{Deserialize, Serialize};

use super::{Point3d, Vector3d};

/// Bilinear four-corner patch, parameterized over [0, 1] x [0, 1].
///
/// Corners are stored in the order A, B, C, D where A-B and D-C are the two
/// rails swept along v.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    corners: [Point3d; 4],
}

impl Surface {
    pub fn from_corners(a: Point3d, b: Point3d, c: Point3d, d: Point3d) -> Surface {
        Surface {
            corners: [a, b, c, d],
        }
    }

    pub fn point_at(&self, u: f64, v: f64) -> Point3d {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);
        let [a, b, c, d] = self.corners;
        let bottom = a + (b - a) * u;
        let top = d + (c - d) * u;
        bottom + (top - bottom) * v
    }

    /// Unit surface normal, None where the patch is degenerate.
    pub fn normal_at(&self, u: f64, v: f64) -> Option<Vector3d> {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);
        let [a, b, c, d] = self.corners;
        // partial derivatives of the bilinear map
        let du = (b - a) * (1.0 - v) + (c - d) * v;
        let dv = (d - a) * (1.0 - u) + (c - b) * u;
        du.cross(&dv).unitized()
    }
}

/// Boundary representation: a list of faces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brep {
    faces: Vec<Surface>,
}

impl Brep {
    pub fn from_surface(surface: Surface) -> Brep {
        Brep {
            faces: vec![surface],
        }
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_patch() -> Surface {
        Surface::from_corners(
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 0.0, 0.0),
            Point3d::new(1.0, 1.0, 0.0),
            Point3d::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn corner_and_center_evaluation() {
        let surface = unit_patch();
        assert_eq!(surface.point_at(0.0, 0.0), Point3d::new(0.0, 0.0, 0.0));
        assert_eq!(surface.point_at(1.0, 1.0), Point3d::new(1.0, 1.0, 0.0));
        assert_eq!(surface.point_at(0.5, 0.5), Point3d::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn planar_patch_normal() {
        let normal = unit_patch().normal_at(0.5, 0.5).unwrap();
        assert_eq!(normal, Vector3d::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn degenerate_patch_has_no_normal() {
        let p = Point3d::new(1.0, 1.0, 1.0);
        let surface = Surface::from_corners(p, p, p, p);
        assert!(surface.normal_at(0.5, 0.5).is_none());
    }

    #[test]
    fn brep_from_surface() {
        let brep = Brep::from_surface(unit_patch());
        assert_eq!(brep.face_count(), 1);
    }
}
