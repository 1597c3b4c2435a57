//! Components that point at render resources by handle.

use crate::resource::{RegionHandle, ShaderHandle};

/// A resolved shader program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shader {
    pub shader_name: String,
    pub program: ShaderHandle,
}

/// The atlas region an image draws.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureRegion {
    pub region_name: String,
    pub region: RegionHandle,
    /// Draw and hit-test with the custom outline instead of the full quad.
    pub is_polygon: bool,
}

/// Marker: the region has a `.normal` companion and the lit pipeline should
/// sample it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalMapRendering;
