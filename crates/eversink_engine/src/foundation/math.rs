//! Math utilities and types
//!
//! Thin aliases over `nalgebra` plus the handful of OpenGL-convention helpers the
//! camera and the cube draw contract need.

pub use nalgebra::{Matrix4, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Linear RGB triple as stored in const material and light presets
pub type Rgb = [f32; 3];

/// Math utility functions
pub mod utils {
    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees.to_radians()
    }

    /// Unit vector from yaw/pitch in degrees.
    ///
    /// Yaw rotates around world Y starting from +X, pitch lifts towards +Y:
    /// `(cos yaw · cos pitch, sin pitch, sin yaw · cos pitch)`.
    pub fn direction_from_euler(yaw_degrees: f32, pitch_degrees: f32) -> super::Vec3 {
        let (yaw, pitch) = (yaw_degrees.to_radians(), pitch_degrees.to_radians());
        super::Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize()
    }
}

/// Extension trait for Mat4 with OpenGL-convention constructors
pub trait Mat4Ext {
    /// Right-handed perspective projection mapping depth to [-1, 1]
    fn perspective_gl(fov_y_radians: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Right-handed view matrix looking from `eye` towards `target`
    fn look_at_gl(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;

    /// Pure translation
    fn from_translation(offset: Vec3) -> Mat4;

    /// Column-major float array as expected by `glUniformMatrix4fv(transpose = false)`
    fn to_column_array(&self) -> [f32; 16];
}

impl Mat4Ext for Mat4 {
    fn perspective_gl(fov_y_radians: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_perspective(aspect, fov_y_radians, near, far)
    }

    fn look_at_gl(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up)
    }

    fn from_translation(offset: Vec3) -> Mat4 {
        Mat4::new_translation(&offset)
    }

    fn to_column_array(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        out.copy_from_slice(self.as_slice());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_direction_from_euler_default_yaw_looks_down_negative_z() {
        let front = utils::direction_from_euler(-90.0, 0.0);
        assert_relative_eq!(front, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_column_array_keeps_translation_in_last_column() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let cols = m.to_column_array();
        assert_eq!(&cols[12..15], &[1.0, 2.0, 3.0]);
        assert_eq!(cols[15], 1.0);
    }

    #[test]
    fn test_look_at_maps_eye_to_origin() {
        let eye = Vec3::new(0.0, 0.0, 3.0);
        let view = Mat4::look_at_gl(eye, Vec3::zeros(), Vec3::y());
        let p = view.transform_point(&Point3::from(eye));
        assert_relative_eq!(p.coords, Vec3::zeros(), epsilon = 1e-6);
    }
}
