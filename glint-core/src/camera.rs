//! A camera orbiting around a target point.

use glam::{Mat4, Vec3};

const MIN_DISTANCE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    /// Rotation around the y axis in degrees, 0 looks down the negative z axis.
    pub yaw: f32,
    /// Elevation in degrees, kept within (-90, 90).
    pub pitch: f32,
    pub distance: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 30.0,
            pitch: 20.0,
            distance: 3.0,
            fov: 60.0,
        }
    }
}

impl OrbitCamera {
    /// Unit direction from the target towards the camera.
    pub fn view_dir(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(pitch.cos() * yaw.sin(), pitch.sin(), pitch.cos() * yaw.cos())
    }

    pub fn eye(&self) -> Vec3 {
        self.target + self.view_dir() * self.distance
    }

    /// Rotates the camera around the target by the given angles in degrees.
    pub fn orbit(&mut self, yaw: f32, pitch: f32) {
        self.yaw = (self.yaw + yaw).rem_euclid(360.0);
        self.pitch = (self.pitch + pitch).clamp(-89.0, 89.0);
    }

    /// Moves the camera towards (negative) or away from (positive) the target.
    pub fn zoom(&mut self, amount: f32) {
        self.distance = (self.distance + amount).max(MIN_DISTANCE);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), aspect_ratio, 0.1, 100.0)
    }
}
