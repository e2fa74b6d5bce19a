//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for managing indexed geometry on the GPU side.
//! Vertices should implement the [`Vertex`] trait.

use std::{marker::PhantomData, sync::Arc};

use glint_core::obj::ModelVertex;
use glow::HasContext;

use super::{IndexBuffer, VertexArray, VertexBuffer};

/// Trait that defines the necessary methods for a vertex.
pub trait Vertex: Copy {
    /// Sets up the vertex attribute pointers for the vertex.
    fn vertex_attribs(gl: &glow::Context);
}

impl Vertex for ModelVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            let stride = std::mem::size_of::<ModelVertex>() as i32;
            let vec3 = std::mem::size_of::<glam::Vec3>() as i32;
            // Position attribute
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
            // Normal attribute
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, stride, vec3);
            // Texture coordinate attribute
            gl.enable_vertex_attrib_array(2);
            gl.vertex_attrib_pointer_f32(2, 3, glow::FLOAT, false, stride, 2 * vec3);
        }
    }
}

/// Represents a mesh stored on the GPU side.
pub struct Mesh<V: Vertex> {
    gl: Arc<glow::Context>,
    draw_mode: u32,
    vao: VertexArray,
    // the buffers only need to live as long as the vertex array referencing them
    _vbo: VertexBuffer,
    _ebo: IndexBuffer,
    index_count: usize,
    _vertex: PhantomData<V>,
}

impl<V: Vertex> Mesh<V> {
    /// Creates a new mesh from the given vertex and index data.
    pub fn new(
        gl: &Arc<glow::Context>,
        vertices: &[V],
        indices: &[u32],
        draw_mode: u32,
    ) -> Result<Self, String> {
        let vao = VertexArray::new(gl)?;
        let vbo = VertexBuffer::new(gl)?;
        let ebo = IndexBuffer::new(gl)?;

        vao.bind();
        vbo.upload(vertices, glow::STATIC_DRAW);
        ebo.upload(indices, glow::STATIC_DRAW);
        V::vertex_attribs(gl);
        vao.unbind();

        unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);
        }

        Ok(Self {
            gl: Arc::clone(gl),
            draw_mode,
            vao,
            _vbo: vbo,
            _ebo: ebo,
            index_count: indices.len(),
            _vertex: PhantomData,
        })
    }

    /// Draws the mesh.
    pub fn draw(&self) {
        self.vao.bind();
        unsafe {
            self.gl
                .draw_elements(self.draw_mode, self.index_count as i32, glow::UNSIGNED_INT, 0);
        }
        self.vao.unbind();
    }

    // Returns the amount of of indices used in the mesh
    pub fn index_count(&self) -> usize {
        self.index_count
    }
}
