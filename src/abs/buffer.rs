//! Owning wrappers around OpenGL buffer and vertex array objects.
//!
//! Each wrapper owns exactly one GL object and deletes it when dropped. None of them implement
//! `Clone`; moving a wrapper moves ownership of the GL object.

use std::sync::Arc;

use glow::HasContext;

/// Reinterprets a slice of plain vertex or index data as bytes for upload.
fn as_bytes<T: Copy>(data: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(data.as_ptr() as *const u8, std::mem::size_of_val(data)) }
}

/// A GL buffer object bound to one fixed target.
struct RawBuffer {
    gl: Arc<glow::Context>,
    id: glow::Buffer,
    target: u32,
}

impl RawBuffer {
    fn new(gl: &Arc<glow::Context>, target: u32) -> Result<Self, String> {
        let id = unsafe { gl.create_buffer()? };
        Ok(Self {
            gl: Arc::clone(gl),
            id,
            target,
        })
    }

    fn upload<T: Copy>(&self, data: &[T], usage: u32) {
        unsafe {
            self.gl.bind_buffer(self.target, Some(self.id));
            self.gl.buffer_data_u8_slice(self.target, as_bytes(data), usage);
        }
    }
}

impl Drop for RawBuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.id);
        }
    }
}

/// A buffer of interleaved vertex data (`GL_ARRAY_BUFFER`).
pub struct VertexBuffer(RawBuffer);

impl VertexBuffer {
    pub fn new(gl: &Arc<glow::Context>) -> Result<Self, String> {
        RawBuffer::new(gl, glow::ARRAY_BUFFER).map(Self)
    }

    /// Replaces the contents of the buffer. Leaves the buffer bound.
    pub fn upload<V: Copy>(&self, vertices: &[V], usage: u32) {
        self.0.upload(vertices, usage);
    }
}

/// A buffer of `u32` element indices (`GL_ELEMENT_ARRAY_BUFFER`).
pub struct IndexBuffer(RawBuffer);

impl IndexBuffer {
    pub fn new(gl: &Arc<glow::Context>) -> Result<Self, String> {
        RawBuffer::new(gl, glow::ELEMENT_ARRAY_BUFFER).map(Self)
    }

    /// Replaces the contents of the buffer. Leaves the buffer bound, which also attaches it to
    /// the currently bound vertex array.
    pub fn upload(&self, indices: &[u32], usage: u32) {
        self.0.upload(indices, usage);
    }
}

/// A vertex array object describing how vertex buffers are read.
pub struct VertexArray {
    gl: Arc<glow::Context>,
    id: glow::VertexArray,
}

impl VertexArray {
    pub fn new(gl: &Arc<glow::Context>) -> Result<Self, String> {
        let id = unsafe { gl.create_vertex_array()? };
        Ok(Self {
            gl: Arc::clone(gl),
            id,
        })
    }

    pub fn bind(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.id));
        }
    }

    pub fn unbind(&self) {
        unsafe {
            self.gl.bind_vertex_array(None);
        }
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_vertex_array(self.id);
        }
    }
}
