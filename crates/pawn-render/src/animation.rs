//! Time-driven model sway and camera wiggle of the viewer.

use pawn_math::{dvec3, DMat3, DMat4};
use serde::{Deserialize, Serialize};

use crate::camera::Camera;

/// Model transform at one instant: translate along X, then rotate about X, Y
/// and Z in that order. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPose {
    pub translation_x: f64,
    pub angle_x: f64,
    pub angle_y: f64,
    pub angle_z: f64,
}

impl ModelPose {
    /// Swaying pose at `t` seconds.
    pub fn at_time(t: f64) -> Self {
        Self {
            translation_x: 1.3 * (0.25 * t).sin(),
            angle_x: 180.0 + 50.0 * (0.3 * t).sin(),
            angle_y: 60.0 + 60.0 * (0.5 * t).sin(),
            angle_z: 90.0 + 90.0 * (0.25 * t).cos(),
        }
    }

    pub fn identity() -> Self {
        Self {
            translation_x: 0.0,
            angle_x: 0.0,
            angle_y: 0.0,
            angle_z: 0.0,
        }
    }

    pub fn model_matrix(&self) -> DMat4 {
        DMat4::from_translation(dvec3(self.translation_x, 0.0, 0.0))
            * DMat4::from_rotation_x(self.angle_x.to_radians())
            * DMat4::from_rotation_y(self.angle_y.to_radians())
            * DMat4::from_rotation_z(self.angle_z.to_radians())
    }

    /// Inverse transpose of the model's linear part, for transforming normals.
    pub fn normal_matrix(&self) -> DMat3 {
        DMat3::from_mat4(self.model_matrix()).inverse().transpose()
    }
}

impl Default for ModelPose {
    fn default() -> Self {
        Self::identity()
    }
}

/// Eye height of the camera at `t` seconds, a 7 second vertical bob.
pub fn camera_wiggle(t: f64) -> f64 {
    Camera::REST_HEIGHT + 0.25 * (std::f64::consts::TAU / 7.0 * t).sin()
}

impl Camera {
    /// Default camera raised to the wiggle height at `t` seconds.
    pub fn at_time(t: f64) -> Self {
        Camera::at_height(camera_wiggle(t))
    }
}
