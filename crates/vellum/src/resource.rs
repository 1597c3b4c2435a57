//! # Resource Retrieval
//!
//! The composer never loads textures or compiles shaders. It asks a
//! [`ResourceRetriever`] to resolve names into opaque handles plus the
//! scaling metadata needed to size images:
//!
//! ```text
//! dimension = region_pixels * resolution.multiplier(original) / pixel_to_world
//! ```
//!
//! [`ResourceCache`] is an in-memory retriever for hosts that have already
//! loaded their atlas, and for tests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ResourceKind, Result};

/// One region of a texture atlas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AtlasRegion {
    /// Index of the region in the host's atlas.
    pub index: u32,
    pub width: u32,
    pub height: u32,
}

/// What an image draws: a region alone or a region plus its normal map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionHandle {
    Single(AtlasRegion),
    WithNormal {
        diffuse: AtlasRegion,
        normal: AtlasRegion,
    },
}

impl RegionHandle {
    pub fn diffuse(&self) -> AtlasRegion {
        match *self {
            Self::Single(region) => region,
            Self::WithNormal { diffuse, .. } => diffuse,
        }
    }

    pub fn normal(&self) -> Option<AtlasRegion> {
        match *self {
            Self::Single(_) => None,
            Self::WithNormal { normal, .. } => Some(normal),
        }
    }
}

/// Opaque reference to a compiled shader program owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// A target resolution the project's art was exported for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// `0` scales by width, anything else by height.
    #[serde(default)]
    pub base: u32,
}

impl Resolution {
    pub fn new(name: impl Into<String>, width: u32, height: u32, base: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            base,
        }
    }

    /// Factor from this resolution's pixels back to `original`'s pixels.
    pub fn multiplier(&self, original: &Resolution) -> f32 {
        if self.base == 0 {
            original.width as f32 / self.width as f32
        } else {
            original.height as f32 / self.height as f32
        }
    }
}

/// Project-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Pixels per world unit at the original resolution.
    pub pixel_to_world: f32,
    pub original_resolution: Resolution,
    #[serde(default)]
    pub resolutions: Vec<Resolution>,
}

impl ProjectInfo {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn resolution(&self, name: &str) -> Option<&Resolution> {
        if self.original_resolution.name == name {
            return Some(&self.original_resolution);
        }
        self.resolutions.iter().find(|r| r.name == name)
    }
}

impl Default for ProjectInfo {
    fn default() -> Self {
        Self {
            pixel_to_world: 1.0,
            original_resolution: Resolution::new("orig", 1920, 1080, 0),
            resolutions: Vec::new(),
        }
    }
}

/// Resolves resource names for the composer. Lookups are synchronous and
/// assumed cached.
pub trait ResourceRetriever {
    fn texture_region(&self, name: &str) -> Option<AtlasRegion>;

    fn has_texture_region(&self, name: &str) -> bool {
        self.texture_region(name).is_some()
    }

    fn shader_program(&self, name: &str) -> Option<ShaderHandle>;

    /// The resolution whose assets are currently loaded.
    fn loaded_resolution(&self) -> &Resolution;

    fn project_info(&self) -> &ProjectInfo;
}

/// [`ResourceRetriever::texture_region`] as a [`Result`].
pub(crate) fn require_region<R: ResourceRetriever + ?Sized>(
    resources: &R,
    name: &str,
) -> Result<AtlasRegion> {
    resources
        .texture_region(name)
        .ok_or_else(|| Error::lookup(ResourceKind::TextureRegion, name))
}

/// [`ResourceRetriever::shader_program`] as a [`Result`].
pub(crate) fn require_shader<R: ResourceRetriever + ?Sized>(
    resources: &R,
    name: &str,
) -> Result<ShaderHandle> {
    resources
        .shader_program(name)
        .ok_or_else(|| Error::lookup(ResourceKind::ShaderProgram, name))
}

/// In-memory name → handle tables.
#[derive(Debug, Clone, Default)]
pub struct ResourceCache {
    regions: HashMap<String, AtlasRegion>,
    shaders: HashMap<String, ShaderHandle>,
    project: ProjectInfo,
    loaded: Option<Resolution>,
}

impl ResourceCache {
    /// Assets loaded at the project's original resolution.
    pub fn new(project: ProjectInfo) -> Self {
        Self {
            project,
            ..Default::default()
        }
    }

    /// Load at a different resolution than the original.
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.loaded = Some(resolution);
        self
    }

    /// Register a region of the given pixel size. Returns its atlas region.
    ///
    /// Re-registering a name replaces its size but keeps its index.
    pub fn add_region(&mut self, name: impl Into<String>, width: u32, height: u32) -> AtlasRegion {
        let name = name.into();
        let index = match self.regions.get(&name) {
            Some(existing) => existing.index,
            None => self.regions.len() as u32,
        };
        let region = AtlasRegion {
            index,
            width,
            height,
        };
        self.regions.insert(name, region);
        region
    }

    /// Register a shader program. A name that is already known keeps its handle.
    pub fn add_shader(&mut self, name: impl Into<String>) -> ShaderHandle {
        let next = ShaderHandle(self.shaders.len() as u32);
        *self.shaders.entry(name.into()).or_insert(next)
    }
}

impl ResourceRetriever for ResourceCache {
    fn texture_region(&self, name: &str) -> Option<AtlasRegion> {
        self.regions.get(name).copied()
    }

    fn shader_program(&self, name: &str) -> Option<ShaderHandle> {
        self.shaders.get(name).copied()
    }

    fn loaded_resolution(&self) -> &Resolution {
        self.loaded
            .as_ref()
            .unwrap_or(&self.project.original_resolution)
    }

    fn project_info(&self) -> &ProjectInfo {
        &self.project
    }
}
