use super::{Point3, Rotation, Transform, Vector3};

/// A box with arbitrary orientation, used as the transformed extent of a
/// placed solid.
#[derive(Debug, Clone, Copy)]
pub struct OrientedBox {
    /// Center of the box.
    pub center: Point3,
    /// Orientation of the box axes.
    pub rotation: Rotation,
    /// Half-lengths along the box's local X, Y and Z axes.
    pub half_extents: Vector3,
}

impl OrientedBox {
    /// Creates a new oriented box.
    #[must_use]
    pub fn new(center: Point3, rotation: Rotation, half_extents: Vector3) -> Self {
        Self {
            center,
            rotation,
            half_extents,
        }
    }

    /// Moves a box given in local coordinates into the frame described by
    /// `transform`.
    #[must_use]
    pub fn from_local(transform: &Transform, local_center: &Point3, half_extents: Vector3) -> Self {
        Self {
            center: transform * local_center,
            rotation: transform.rotation,
            half_extents,
        }
    }

    /// Returns the box's unit axes in the enclosing frame.
    #[must_use]
    pub fn axes(&self) -> [Vector3; 3] {
        [
            self.rotation * Vector3::x(),
            self.rotation * Vector3::y(),
            self.rotation * Vector3::z(),
        ]
    }

    /// Returns the eight corner points.
    #[must_use]
    pub fn corners(&self) -> [Point3; 8] {
        let [ax, ay, az] = self.axes();
        let h = self.half_extents;
        let mut corners = [self.center; 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            let sx = if i & 1 == 0 { -1.0 } else { 1.0 };
            let sy = if i & 2 == 0 { -1.0 } else { 1.0 };
            let sz = if i & 4 == 0 { -1.0 } else { 1.0 };
            *corner += ax * (sx * h.x) + ay * (sy * h.y) + az * (sz * h.z);
        }
        corners
    }

    /// Half-width of the box's projection onto a unit `axis`.
    fn projected_radius(&self, axis: &Vector3) -> f64 {
        let [ax, ay, az] = self.axes();
        ax.dot(axis).abs() * self.half_extents.x
            + ay.dot(axis).abs() * self.half_extents.y
            + az.dot(axis).abs() * self.half_extents.z
    }

    /// Separating-axis test between two oriented boxes.
    ///
    /// Returns the smallest penetration depth over the 15 candidate axes, or
    /// `None` when some axis separates the boxes by more than `-tolerance`.
    /// Boxes that merely touch are not considered overlapping.
    #[must_use]
    pub fn penetration(&self, other: &Self, tolerance: f64) -> Option<f64> {
        let a = self.axes();
        let b = other.axes();
        let offset = other.center - self.center;

        let mut candidates: Vec<Vector3> = Vec::with_capacity(15);
        candidates.extend_from_slice(&a);
        candidates.extend_from_slice(&b);
        for ai in &a {
            for bj in &b {
                candidates.push(ai.cross(bj));
            }
        }

        let mut depth = f64::INFINITY;
        for axis in candidates {
            let len = axis.norm();
            // Cross products of parallel axes carry no information.
            if len < 1e-12 {
                continue;
            }
            let axis = axis / len;
            let overlap = self.projected_radius(&axis) + other.projected_radius(&axis)
                - offset.dot(&axis).abs();
            if overlap <= tolerance {
                return None;
            }
            depth = depth.min(overlap);
        }
        Some(depth)
    }

    /// Returns `true` if the two boxes penetrate each other.
    #[must_use]
    pub fn intersects(&self, other: &Self, tolerance: f64) -> bool {
        self.penetration(other, tolerance).is_some()
    }

    /// Axis-aligned bounds `(min, max)` of the box in the enclosing frame.
    #[must_use]
    pub fn aabb(&self) -> (Point3, Point3) {
        let corners = self.corners();
        let mut min = corners[0];
        let mut max = corners[0];
        for c in &corners[1..] {
            min = min.inf(c);
            max = max.sup(c);
        }
        (min, max)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_4;

    use super::*;
    use approx::assert_relative_eq;

    fn unit_box(center: Point3, angle_z: f64) -> OrientedBox {
        OrientedBox::new(
            center,
            Rotation::from_axis_angle(&Vector3::z_axis(), angle_z),
            Vector3::new(1.0, 1.0, 1.0),
        )
    }

    #[test]
    fn aligned_boxes_overlap_depth() {
        let a = unit_box(Point3::origin(), 0.0);
        let b = unit_box(Point3::new(1.5, 0.0, 0.0), 0.0);
        let depth = a.penetration(&b, 1e-9).unwrap();
        assert_relative_eq!(depth, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn touching_boxes_do_not_overlap() {
        let a = unit_box(Point3::origin(), 0.0);
        let b = unit_box(Point3::new(2.0, 0.0, 0.0), 0.0);
        assert!(!a.intersects(&b, 1e-9));
    }

    #[test]
    fn rotated_boxes_separated_although_aabbs_overlap() {
        let a = unit_box(Point3::origin(), FRAC_PI_4);
        let b = unit_box(Point3::new(1.5, 1.5, 0.0), FRAC_PI_4);

        let (a_min, a_max) = a.aabb();
        let (b_min, b_max) = b.aabb();
        assert!(a_max.x > b_min.x && b_max.x > a_min.x);
        assert!(a_max.y > b_min.y && b_max.y > a_min.y);

        assert!(!a.intersects(&b, 1e-9));
    }

    #[test]
    fn rotated_corner_reaches_neighbour() {
        let a = unit_box(Point3::origin(), 0.0);
        let b = unit_box(Point3::new(2.3, 0.0, 0.0), FRAC_PI_4);
        assert!(a.intersects(&b, 1e-9));

        let c = unit_box(Point3::new(2.5, 0.0, 0.0), FRAC_PI_4);
        assert!(!a.intersects(&c, 1e-9));
    }

    #[test]
    fn corners_follow_transform() {
        let transform = Transform::new(Vector3::new(10.0, 0.0, 0.0), Vector3::zeros());
        let obb = OrientedBox::from_local(&transform, &Point3::origin(), Vector3::new(1.0, 2.0, 3.0));
        let (min, max) = obb.aabb();
        assert_relative_eq!(min, Point3::new(9.0, -2.0, -3.0), epsilon = 1e-12);
        assert_relative_eq!(max, Point3::new(11.0, 2.0, 3.0), epsilon = 1e-12);
    }
}
