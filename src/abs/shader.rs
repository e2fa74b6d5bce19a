//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing OpenGL shaders,
//! and the [`Uniform`] trait for setting uniform variables in shader programs.

use std::sync::Arc;

use glam::{Mat4, Vec4};
use glow::HasContext;

/// Represents an individual, compiled OpenGL shader stage.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
}

impl Shader {
    /// Compiles a new shader from the given source code.
    ///
    /// On failure the error holds the driver's info log.
    pub fn new(gl: &Arc<glow::Context>, shader_type: u32, source: &str) -> Result<Self, String> {
        unsafe {
            let shader = gl.create_shader(shader_type)?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(log);
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
            })
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// A value that can be written to a uniform variable.
pub trait Uniform {
    /// Writes the value to `location` of the currently bound program.
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation);
}

macro_rules! uniform {
    ($ty:ty, |$v:ident, $gl:ident, $loc:ident| $body:expr) => {
        impl Uniform for $ty {
            fn set_uniform(&self, $gl: &glow::Context, $loc: &glow::UniformLocation) {
                let $v = self;
                unsafe { $body }
            }
        }
    };
}

uniform!(bool, |v, gl, loc| gl.uniform_1_i32(Some(loc), *v as i32));
uniform!(i32, |v, gl, loc| gl.uniform_1_i32(Some(loc), *v));
uniform!(f32, |v, gl, loc| gl.uniform_1_f32(Some(loc), *v));
uniform!(Vec4, |v, gl, loc| gl.uniform_4_f32(Some(loc), v.x, v.y, v.z, v.w));
uniform!(Mat4, |v, gl, loc| gl.uniform_matrix_4_f32_slice(Some(loc), false, &v.to_cols_array()));

/// Represents an OpenGL shader program composed of multiple shaders.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    id: glow::Program,
}

impl ShaderProgram {
    /// Links a new shader program from the given shaders.
    pub fn new(gl: &Arc<glow::Context>, shaders: &[&Shader]) -> Result<Self, String> {
        unsafe {
            let program = gl.create_program()?;

            for shader in shaders {
                gl.attach_shader(program, shader.id);
            }

            gl.link_program(program);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(log);
            }

            for shader in shaders {
                gl.detach_shader(program, shader.id);
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: program,
            })
        }
    }

    /// Compiles a vertex and a fragment shader and links them into a program.
    pub fn from_sources(gl: &Arc<glow::Context>, vertex: &str, fragment: &str) -> Result<Self, String> {
        let vert = Shader::new(gl, glow::VERTEX_SHADER, vertex)
            .map_err(|e| format!("vertex shader: {}", e))?;
        let frag = Shader::new(gl, glow::FRAGMENT_SHADER, fragment)
            .map_err(|e| format!("fragment shader: {}", e))?;
        Self::new(gl, &[&vert, &frag])
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }
    }

    /// Sets a uniform variable of the program, which must be bound. Names the program does not
    /// use are ignored.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        if let Some(location) = self.location(name) {
            value.set_uniform(&self.gl, &location);
        }
    }

    /// Sets a `vec4` array uniform from a flat float slice, such as a light's raw data.
    pub fn set_uniform_vec4_slice(&self, name: &str, data: &[f32]) {
        debug_assert!(data.len() % 4 == 0, "vec4 array data must come in groups of 4");
        if let Some(location) = self.location(name) {
            unsafe {
                self.gl.uniform_4_f32_slice(Some(&location), data);
            }
        }
    }

    fn location(&self, name: &str) -> Option<glow::UniformLocation> {
        unsafe { self.gl.get_uniform_location(self.id, name) }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.id);
        }
    }
}
