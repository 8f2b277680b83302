use crate::{BasicMaterial, Geometry, Light};
use glam::Vec3;
use scenegen_common::{EntityId, Transform};
use std::collections::BTreeMap;

/// A renderable: geometry drawn with a material at a transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub geometry: Geometry,
    pub material: BasicMaterial,
    pub transform: Transform,
}

impl Mesh {
    pub fn new(geometry: Geometry, material: BasicMaterial) -> Self {
        Self {
            geometry,
            material,
            transform: Transform::default(),
        }
    }
}

/// Container of every light and renderable drawn in a frame.
///
/// Objects live for the process lifetime; there is no removal.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    lights: BTreeMap<EntityId, Light>,
    meshes: BTreeMap<EntityId, Mesh>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// World-space origin of the scene; the default camera target.
    pub fn position(&self) -> Vec3 {
        Vec3::ZERO
    }

    pub fn add_light(&mut self, light: Light) -> EntityId {
        let id = EntityId::new();
        self.lights.insert(id, light);
        tracing::debug!(id = %id.short(), "light added");
        id
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> EntityId {
        let id = EntityId::new();
        tracing::debug!(
            id = %id.short(),
            vertices = mesh.geometry.vertex_count(),
            wireframe = mesh.material.wireframe,
            "mesh added"
        );
        self.meshes.insert(id, mesh);
        id
    }

    pub fn lights(&self) -> &BTreeMap<EntityId, Light> {
        &self.lights
    }

    pub fn meshes(&self) -> &BTreeMap<EntityId, Mesh> {
        &self.meshes
    }

    pub fn mesh(&self, id: EntityId) -> Option<&Mesh> {
        self.meshes.get(&id)
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty() && self.meshes.is_empty()
    }
}
