//! Lights and the flat float layout they are uploaded with.
//!
//! Every light flattens into a sequence of `vec4`s, see [`LightSource::raw`]. The base [`Light`]
//! contributes only its ambient color; a [`DirectionalLight`] appends its color, its direction
//! and the Blinn-Phong half-vector, so a shader can declare it as `uniform vec4 u_light[4]`.

use glam::{Vec3, Vec4};

/// Number of `vec4`s a [`DirectionalLight`] occupies when uploaded.
pub const LIGHT_UNIFORM_VEC4S: usize = 4;

/// Anything that can be pushed to a shader as a light.
pub trait LightSource {
    /// The ambient color of the light.
    fn ambient(&self) -> Vec4;

    /// The light flattened into floats, four per component, in upload order.
    fn raw(&self) -> Vec<f32>;
}

/// A light that only contributes ambient color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub ambient: Vec4,
}

impl Light {
    /// Creates a new ambient-only light.
    pub fn new(ambient: Vec4) -> Self {
        Self { ambient }
    }
}

impl LightSource for Light {
    fn ambient(&self) -> Vec4 {
        self.ambient
    }

    fn raw(&self) -> Vec<f32> {
        self.ambient.to_array().to_vec()
    }
}

/// A light infinitely far away, shining along a single direction.
///
/// The stored direction points *towards* the light (the negated input) and is always unit
/// length. The half-vector is recomputed whenever the view direction changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    base: Light,
    color: Vec4,
    light_dir: Vec4,
    view_dir: Vec4,
    half_vector: Vec4,
}

impl DirectionalLight {
    /// Creates a directional light with an explicit ambient color.
    pub fn new(color: Vec4, ambient: Vec4, light_dir: Vec3, view_dir: Vec3) -> Self {
        let mut light = Self {
            base: Light::new(ambient),
            color,
            light_dir: (-light_dir).normalize().extend(0.0),
            view_dir: Vec4::ZERO,
            half_vector: Vec4::ZERO,
        };
        light.update_view_dir(view_dir);
        light
    }

    /// Creates a directional light whose ambient color is `ambient_scale * color`.
    pub fn with_ambient_scale(color: Vec4, ambient_scale: f32, light_dir: Vec3, view_dir: Vec3) -> Self {
        Self::new(color, ambient_scale * color, light_dir, view_dir)
    }

    /// Updates the view direction and recomputes the half-vector.
    ///
    /// A view direction exactly opposite to the light direction has no half-vector; the result
    /// is NaN in that case.
    pub fn update_view_dir(&mut self, view_dir: Vec3) {
        self.view_dir = view_dir.normalize().extend(0.0);
        let sum = self.light_dir + self.view_dir;
        self.half_vector = sum / sum.length();
    }

    /// Points the light along a new direction, keeping the current view direction.
    pub fn set_light_dir(&mut self, light_dir: Vec3) {
        self.light_dir = (-light_dir).normalize().extend(0.0);
        let sum = self.light_dir + self.view_dir;
        self.half_vector = sum / sum.length();
    }

    pub fn color(&self) -> Vec4 {
        self.color
    }

    /// The unit direction towards the light.
    pub fn light_dir(&self) -> Vec4 {
        self.light_dir
    }

    pub fn half_vector(&self) -> Vec4 {
        self.half_vector
    }
}

impl LightSource for DirectionalLight {
    fn ambient(&self) -> Vec4 {
        self.base.ambient
    }

    fn raw(&self) -> Vec<f32> {
        let mut vals = self.base.raw();
        vals.extend_from_slice(&self.color.to_array());
        vals.extend_from_slice(&self.light_dir.to_array());
        vals.extend_from_slice(&self.half_vector.to_array());
        vals
    }
}
