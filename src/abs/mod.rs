//! Thin owning wrappers over the OpenGL and SDL2 objects the renderer uses:
//! the application window, buffers, meshes, shader programs and textures.

pub mod app;
pub mod buffer;
pub mod mesh;
pub mod shader;
pub mod texture;

pub use app::*;
pub use buffer::*;
pub use mesh::*;
pub use shader::*;
pub use texture::*;
