use bytemuck::{Pod, Zeroable};

use crate::renderer::layer::RenderLayer;
use crate::renderer::vector::VectorState;

/// Per-instance draw data read by the host's 2D context.
/// 8 floats = 32 bytes stride.
///
/// Positions are screen-space sprite centers; the camera offset is
/// already applied.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// X of the sprite center in pixels.
    pub x: f32,
    /// Y of the sprite center in pixels.
    pub y: f32,
    /// Rotation in radians about the center.
    pub rotation: f32,
    pub width: f32,
    pub height: f32,
    /// Index of the image in the registry.
    pub image: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// Render layer, as its u8 discriminant.
    pub layer: f32,
}

impl SpriteInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Everything one render frame hands to the host.
///
/// Sprite instances are stored back-to-front in layer order; `layer_ranges`
/// records where each layer's instances start and end. The Effects layer
/// holds no sprites: its range indexes `trail` vertices, which are drawn
/// after all sprites.
pub struct FrameBuffer {
    pub instances: Vec<SpriteInstance>,
    layer_ranges: [(u32, u32); RenderLayer::COUNT],
    /// Effects-layer triangles (x, y, r, g, b, a per vertex).
    pub trail: VectorState,
    /// Set when images are still loading and the host should show a
    /// placeholder instead of sprites.
    pub loading: bool,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            layer_ranges: [(0, 0); RenderLayer::COUNT],
            trail: VectorState::new(),
            loading: false,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.layer_ranges = [(0, 0); RenderLayer::COUNT];
        self.trail.clear();
        self.loading = false;
    }

    /// Append an instance. Callers push layers in ascending order.
    pub fn push(&mut self, layer: RenderLayer, mut instance: SpriteInstance) {
        debug_assert!(layer != RenderLayer::Effects, "effects are trail vertices");
        debug_assert!(
            self.instances
                .last()
                .map_or(true, |last| last.layer <= layer.as_u8() as f32),
            "instances must be pushed back-to-front"
        );
        instance.layer = layer.as_u8() as f32;
        let index = self.instances.len() as u32;
        let range = &mut self.layer_ranges[layer as usize];
        if range.0 == range.1 {
            *range = (index, index + 1);
        } else {
            range.1 = index + 1;
        }
        self.instances.push(instance);
    }

    /// Index range `[start, end)` for one layer. Instance indices for the
    /// sprite layers, trail vertex indices for Effects.
    pub fn layer_range(&self, layer: RenderLayer) -> (u32, u32) {
        match layer {
            RenderLayer::Effects => (0, self.trail.vertex_count() as u32),
            _ => self.layer_ranges[layer as usize],
        }
    }

    pub fn layer_instances(&self, layer: RenderLayer) -> &[SpriteInstance] {
        if layer == RenderLayer::Effects {
            return &[];
        }
        let (start, end) = self.layer_range(layer);
        &self.instances[start as usize..end as usize]
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for host reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    /// Flat float view of all instances.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
