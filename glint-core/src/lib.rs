//! The GPU-independent half of glint. This crate holds everything a
//! renderer needs that can be computed without a window or a GL context:
//! lighting math, material bookkeeping, model transforms, model-file
//! parsing, texture pixel preprocessing, input state and configuration.

pub mod camera;
pub mod config;
pub mod image_data;
pub mod input;
pub mod light;
pub mod material;
pub mod obj;
pub mod transform;

pub use light::{DirectionalLight, Light, LightSource};
pub use material::{Material, MaterialSet, TextureId};
pub use transform::Transform;
