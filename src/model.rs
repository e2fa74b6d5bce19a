//! A drawable model: geometry, named materials and a model matrix.

use std::{path::Path, rc::Rc, sync::Arc};

use glam::Vec3;
use glint_core::{
    Material, MaterialSet, Transform,
    material::{AMBIENT_UNIT, DIFFUSE_UNIT, MaterialError, SPECULAR_UNIT},
    obj::{self, MeshData, ModelVertex},
};

use crate::abs::{Mesh, ShaderProgram, bind_texture_id};

/// Uniform names the model writes its active material to.
pub mod uniforms {
    pub const MODEL: &str = "u_model";
    pub const AMBIENT: &str = "u_material.ambient";
    pub const DIFFUSE: &str = "u_material.diffuse";
    pub const SPECULAR: &str = "u_material.specular";
    pub const SHININESS: &str = "u_material.shininess";
    pub const HAS_AMBIENT_TEX: &str = "u_material.has_ambient_tex";
    pub const HAS_DIFFUSE_TEX: &str = "u_material.has_diffuse_tex";
    pub const HAS_SPECULAR_TEX: &str = "u_material.has_specular_tex";
}

/// A basic model that can be drawn.
///
/// The shader program is shared and only stored so the model can push its own uniforms;
/// [`Model::draw`] never binds it, the caller is expected to do that first.
pub struct Model {
    mesh: Mesh<ModelVertex>,
    transform: Transform,
    materials: MaterialSet,
    program: Option<Rc<ShaderProgram>>,
    gl: Arc<glow::Context>,
}

impl Model {
    /// Loads a model from a model file.
    pub fn load(gl: &Arc<glow::Context>, path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let data = obj::load_obj(path).map_err(|e| format!("{}: {}", path.display(), e))?;
        Self::from_mesh_data(gl, &data)
    }

    /// Uploads already parsed geometry as a new model.
    pub fn from_mesh_data(gl: &Arc<glow::Context>, data: &MeshData) -> Result<Self, String> {
        let mesh = Mesh::new(gl, &data.vertices, &data.indices, glow::TRIANGLES)?;
        Ok(Self {
            mesh,
            transform: Transform::new(),
            materials: MaterialSet::new(),
            program: None,
            gl: Arc::clone(gl),
        })
    }

    /// Adds or replaces a material. Replacing the active material keeps it active.
    pub fn add_material(&mut self, name: impl Into<String>, material: Material) {
        self.materials.add(name, material);
    }

    /// Selects the material to draw with.
    pub fn use_material(&mut self, name: &str) -> Result<(), MaterialError> {
        self.materials.use_material(name)
    }

    /// Sets the program the model writes its uniforms through.
    pub fn use_program(&mut self, program: Rc<ShaderProgram>) {
        self.program = Some(program);
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.transform.translate(offset);
    }

    /// Rotates by `degrees` around `axis`.
    pub fn rotate(&mut self, degrees: f32, axis: Vec3) {
        self.transform.rotate(degrees, axis);
    }

    pub fn scale(&mut self, factors: Vec3) {
        self.transform.scale(factors);
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn materials(&self) -> &MaterialSet {
        &self.materials
    }

    pub fn index_count(&self) -> usize {
        self.mesh.index_count()
    }

    /// Draws the model with the active material, binding its textures if `textured` is set.
    pub fn draw(&self, textured: bool) {
        self.update_uniforms(textured);
        if textured && let Some(material) = self.materials.active() {
            for (unit, texture) in material.textures() {
                bind_texture_id(&self.gl, texture, unit);
            }
        }
        self.mesh.draw();
    }

    fn update_uniforms(&self, textured: bool) {
        let Some(program) = &self.program else {
            return;
        };
        program.set_uniform(uniforms::MODEL, self.transform.matrix());
        let material = self.materials.active().copied().unwrap_or_default();
        program.set_uniform(uniforms::AMBIENT, material.ambient);
        program.set_uniform(uniforms::DIFFUSE, material.diffuse);
        program.set_uniform(uniforms::SPECULAR, material.specular);
        program.set_uniform(uniforms::SHININESS, material.shininess);
        // slots without a texture keep their plain color, whatever is bound to the unit
        for (name, unit) in [
            (uniforms::HAS_AMBIENT_TEX, AMBIENT_UNIT),
            (uniforms::HAS_DIFFUSE_TEX, DIFFUSE_UNIT),
            (uniforms::HAS_SPECULAR_TEX, SPECULAR_UNIT),
        ] {
            program.set_uniform(name, textured && material.texture(unit).is_some());
        }
    }
}
