//! Surface materials and the per-model set of named materials.

use std::num::NonZero;

use glam::Vec4;
use indexmap::IndexMap;

/// A non-owning reference to a GPU texture.
///
/// The owning texture lives on the GPU side of the crate; materials only carry its id so they can
/// be cloned freely.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub NonZero<u32>);

/// Texture unit the ambient texture is bound to.
pub const AMBIENT_UNIT: u32 = 0;
/// Texture unit the diffuse texture is bound to.
pub const DIFFUSE_UNIT: u32 = 1;
/// Texture unit the specular texture is bound to.
pub const SPECULAR_UNIT: u32 = 2;

/// Ambient, diffuse and specular colors and/or textures used by a shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub shininess: f32,
    pub ambient_texture: Option<TextureId>,
    pub diffuse_texture: Option<TextureId>,
    pub specular_texture: Option<TextureId>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vec4::new(0.2, 0.2, 0.2, 1.0),
            diffuse: Vec4::new(0.5, 0.5, 0.5, 1.0),
            specular: Vec4::new(0.0, 0.0, 0.0, 1.0),
            shininess: 1.0,
            ambient_texture: None,
            diffuse_texture: None,
            specular_texture: None,
        }
    }
}

impl Material {
    /// Creates a material from plain colors.
    pub fn new(ambient: Vec4, diffuse: Vec4, specular: Vec4, shininess: f32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
            ..Default::default()
        }
    }

    pub fn with_ambient_texture(mut self, texture: TextureId) -> Self {
        self.ambient_texture = Some(texture);
        self
    }

    pub fn with_diffuse_texture(mut self, texture: TextureId) -> Self {
        self.diffuse_texture = Some(texture);
        self
    }

    pub fn with_specular_texture(mut self, texture: TextureId) -> Self {
        self.specular_texture = Some(texture);
        self
    }

    /// Returns the texture that belongs on `unit`, if the material has one.
    pub fn texture(&self, unit: u32) -> Option<TextureId> {
        match unit {
            AMBIENT_UNIT => self.ambient_texture,
            DIFFUSE_UNIT => self.diffuse_texture,
            SPECULAR_UNIT => self.specular_texture,
            _ => None,
        }
    }

    /// Returns every texture of the material paired with the unit it should be bound to.
    pub fn textures(&self) -> impl Iterator<Item = (u32, TextureId)> {
        [
            (AMBIENT_UNIT, self.ambient_texture),
            (DIFFUSE_UNIT, self.diffuse_texture),
            (SPECULAR_UNIT, self.specular_texture),
        ]
        .into_iter()
        .filter_map(|(unit, tex)| tex.map(|t| (unit, t)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MaterialError {
    #[error("no material named '{0}'")]
    Unknown(String),
}

/// A set of uniquely named materials with at most one of them active.
///
/// The active material is tracked by name and looked up on every access, so replacing or removing
/// entries can never leave it pointing at stale data.
#[derive(Debug, Clone, Default)]
pub struct MaterialSet {
    materials: IndexMap<String, Material>,
    active: Option<String>,
}

impl MaterialSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a material, replacing any material already registered under `name`.
    ///
    /// If the replaced material was active, the new one becomes the active material.
    pub fn add(&mut self, name: impl Into<String>, material: Material) {
        let name = name.into();
        if self.materials.insert(name.clone(), material).is_some() {
            log::debug!("Replaced material '{}'", name);
        }
    }

    /// Makes the material called `name` the active one.
    ///
    /// Unknown names are rejected and the active material stays as it was.
    pub fn use_material(&mut self, name: &str) -> Result<(), MaterialError> {
        if !self.materials.contains_key(name) {
            return Err(MaterialError::Unknown(name.to_string()));
        }
        self.active = Some(name.to_string());
        Ok(())
    }

    /// Removes a material, deactivating it if it was active.
    pub fn remove(&mut self, name: &str) -> Option<Material> {
        let removed = self.materials.shift_remove(name);
        if removed.is_some() && self.active.as_deref() == Some(name) {
            self.active = None;
        }
        removed
    }

    /// Returns the active material.
    pub fn active(&self) -> Option<&Material> {
        self.active.as_deref().and_then(|name| self.materials.get(name))
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Iterates over the materials in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Material)> {
        self.materials.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Material {
        Material::new(
            Vec4::new(0.1, 0.0, 0.0, 1.0),
            Vec4::new(0.8, 0.1, 0.1, 1.0),
            Vec4::ONE,
            32.0,
        )
    }

    fn tex(id: u32) -> TextureId {
        TextureId(NonZero::new(id).unwrap())
    }

    #[test]
    fn test_add_then_use_activates_material() {
        let mut set = MaterialSet::new();
        assert!(set.active().is_none());
        set.add("red", red());
        set.use_material("red").unwrap();
        assert_eq!(set.active(), Some(&red()));
        assert_eq!(set.active_name(), Some("red"));
    }

    #[test]
    fn test_overwriting_active_material_refreshes_it() {
        let mut set = MaterialSet::new();
        set.add("shiny", red());
        set.use_material("shiny").unwrap();

        let blue = Material {
            diffuse: Vec4::new(0.0, 0.0, 1.0, 1.0),
            ..red()
        };
        set.add("shiny", blue);
        assert_eq!(set.len(), 1);
        assert_eq!(set.active(), Some(&blue));
    }

    #[test]
    fn test_unknown_material_keeps_previous_active() {
        let mut set = MaterialSet::new();
        set.add("red", red());
        set.use_material("red").unwrap();
        assert_eq!(
            set.use_material("missing"),
            Err(MaterialError::Unknown("missing".to_string()))
        );
        assert_eq!(set.active_name(), Some("red"));
    }

    #[test]
    fn test_removing_active_material_clears_it() {
        let mut set = MaterialSet::new();
        set.add("red", red());
        set.add("gray", Material::default());
        set.use_material("red").unwrap();
        assert_eq!(set.remove("gray"), Some(Material::default()));
        assert_eq!(set.active_name(), Some("red"));
        assert_eq!(set.remove("red"), Some(red()));
        assert!(set.active().is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn test_iteration_keeps_insertion_order() {
        let mut set = MaterialSet::new();
        set.add("b", red());
        set.add("a", Material::default());
        set.add("c", red());
        let names: Vec<_> = set.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn test_textures_are_paired_with_units() {
        let mat = red().with_diffuse_texture(tex(7)).with_specular_texture(tex(9));
        let bound: Vec<_> = mat.textures().collect();
        assert_eq!(bound, vec![(DIFFUSE_UNIT, tex(7)), (SPECULAR_UNIT, tex(9))]);
        assert_eq!(Material::default().textures().count(), 0);
    }

    #[test]
    fn test_texture_lookup_by_unit() {
        let mat = red().with_ambient_texture(tex(3)).with_diffuse_texture(tex(3));
        assert_eq!(mat.texture(AMBIENT_UNIT), Some(tex(3)));
        assert_eq!(mat.texture(DIFFUSE_UNIT), Some(tex(3)));
        assert_eq!(mat.texture(SPECULAR_UNIT), None);
        assert_eq!(mat.texture(7), None);
    }
}
