use crate::vector::Vector2;

/// Viewer state: where it stands, where it looks, and how wide it sees.
///
/// `plane` stays perpendicular to `direction`; both are only ever changed
/// together by [`Orientation::rotate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub position: Vector2,  // (x, y) in grid space
    pub direction: Vector2, // facing, unit length at construction
    pub plane: Vector2,     // camera plane, |plane| / |direction| = tan(fov / 2)
}

impl Orientation {
    /// Builds an orientation from a heading and a camera plane length.
    ///
    /// The heading is normalized. The plane points to the right of the
    /// heading in screen terms: with heading (-1, 0) the plane is (0, len).
    pub fn new(position: Vector2, heading: Vector2, plane_length: f64) -> Self {
        let len = heading.length();
        let direction = if len > 0.0 { heading * (1.0 / len) } else { heading };
        let plane = Vector2::new(direction.y, -direction.x) * plane_length;
        Self {
            position,
            direction,
            plane,
        }
    }

    /// Rotates direction and plane by the same matrix. A positive angle
    /// turns the view left.
    pub fn rotate(&mut self, angle: f64) {
        let (s, c) = angle.sin_cos();
        self.direction = self.direction.rotated(c, s);
        self.plane = self.plane.rotated(c, s);
    }

    /// Ray direction for a camera-space x in [-1, 1).
    #[inline]
    pub fn ray_direction(&self, camera_x: f64) -> Vector2 {
        self.direction + self.plane * camera_x
    }

    pub fn fov_degrees(&self) -> f64 {
        2.0 * (self.plane.length() / self.direction.length()).atan().to_degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn classic() -> Orientation {
        Orientation {
            position: Vector2::new(22.0, 12.0),
            direction: Vector2::new(-1.0, 0.0),
            plane: Vector2::new(0.0, 0.66),
        }
    }

    #[test]
    fn new_derives_plane_to_the_right_of_heading() {
        let o = Orientation::new(Vector2::new(22.0, 12.0), Vector2::new(-2.0, 0.0), 0.66);
        assert_eq!(o, classic());
    }

    #[test]
    fn positive_angle_turns_toward_left_edge_of_view() {
        // Column 0 samples direction - plane; turning left must move the
        // centre ray toward where that column was looking.
        let mut o = classic();
        let left_ray = o.ray_direction(-1.0);
        let before = o.direction.dot(left_ray);
        o.rotate(0.1);
        assert!(o.direction.dot(left_ray) > before);
    }

    #[test]
    fn opposite_rotations_cancel() {
        let mut o = classic();
        o.rotate(0.7);
        o.rotate(-0.7);
        assert!((o.direction - classic().direction).length() < 1e-12);
        assert!((o.plane - classic().plane).length() < 1e-12);
    }

    #[test]
    fn classic_plane_is_about_66_degrees() {
        let fov = classic().fov_degrees();
        assert!((fov - 66.84).abs() < 0.01, "fov {fov}");
    }

    proptest! {
        #[test]
        fn rotation_keeps_plane_perpendicular(angles in prop::collection::vec(-10.0f64..10.0, 1..200)) {
            let mut o = classic();
            let dot0 = o.direction.dot(o.plane);
            for a in angles {
                o.rotate(a);
            }
            prop_assert!((o.direction.dot(o.plane) - dot0).abs() < 1e-9);
            prop_assert!((o.direction.length() - 1.0).abs() < 1e-9);
            prop_assert!((o.plane.length() - 0.66).abs() < 1e-9);
        }
    }
}
