//! Owner transform of a sampled mesh.

use glam::{Mat4, Quat, Vec3};

/// A transformation represented as separate components.
///
/// The components are what the renderer receives alongside the attribute
/// maps, so the particles can be placed where the mesh lives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation component.
    pub translation: Vec3,
    /// Rotation component as a quaternion.
    pub rotation: Quat,
    /// Scale component.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Creates a new identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Creates a transform from a translation.
    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Converts this transform to a local-to-world matrix.
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Maps a mesh-local point into world space.
    #[must_use]
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.to_matrix().transform_point3(local)
    }

    /// Returns the rotation as Euler angles (in degrees).
    #[must_use]
    pub fn euler_angles_degrees(&self) -> Vec3 {
        let (x, y, z) = self.rotation.to_euler(glam::EulerRot::XYZ);
        Vec3::new(x, y, z) * (180.0 / std::f32::consts::PI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_point_scales_then_rotates_then_translates() {
        let t = Transform {
            translation: Vec3::new(0.5, -1.0, 2.0),
            rotation: Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
            scale: Vec3::new(1.0, 2.0, 3.0),
        };
        // Scaled to (1, 2, 3), rotated to (-2, 1, 3), then translated.
        let p = t.transform_point(Vec3::ONE);
        assert!((p - Vec3::new(-1.5, 0.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn test_identity_keeps_points() {
        let p = Vec3::new(3.0, -2.0, 1.0);
        assert_eq!(Transform::identity().to_matrix(), Mat4::IDENTITY);
        assert!((Transform::identity().transform_point(p) - p).length() < 1e-6);
    }

    #[test]
    fn test_euler_angles_degrees() {
        let t = Transform {
            rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            ..Default::default()
        };
        assert!((t.euler_angles_degrees().y - 90.0).abs() < 0.1);
    }
}
