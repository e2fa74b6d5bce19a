//! Model transformation matrix.

use glam::{Mat4, Vec3};

/// A model matrix that is built up by successive transformations.
///
/// Every operation post-multiplies the stored matrix, so transformations apply in the local
/// space of the previous ones, like the classic fixed-function matrix stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: Mat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            matrix: Mat4::IDENTITY,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates by `offset` from the current position.
    pub fn translate(&mut self, offset: Vec3) {
        self.matrix *= Mat4::from_translation(offset);
    }

    /// Rotates by `degrees` around `axis`.
    pub fn rotate(&mut self, degrees: f32, axis: Vec3) {
        self.matrix *= Mat4::from_axis_angle(axis.normalize(), degrees.to_radians());
    }

    /// Scales by `factors` along each axis.
    pub fn scale(&mut self, factors: Vec3) {
        self.matrix *= Mat4::from_scale(factors);
    }

    /// Resets back to the identity matrix.
    pub fn reset(&mut self) {
        self.matrix = Mat4::IDENTITY;
    }

    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }
}

impl From<Mat4> for Transform {
    fn from(matrix: Mat4) -> Self {
        Self { matrix }
    }
}
