//! Lyon-based polygon tessellation for vector effects.
//!
//! Produces a flat triangle-list buffer (x, y, r, g, b, a per vertex) that
//! the host draws after the sprite layers.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    VertexBuffers,
};

/// Per-vertex data for vector rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// RGBA color (0.0 - 1.0 per channel).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorColor {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from a 0xRRGGBB literal.
    pub fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as f32 / 255.0,
            g: ((rgb >> 8) & 0xff) as f32 / 255.0,
            b: (rgb & 0xff) as f32 / 255.0,
            a: 1.0,
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

/// Linear gradient along an axis, sampled per vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    /// Where t = 0.
    pub start: Vec2,
    /// Where t = 1.
    pub end: Vec2,
    /// (offset, color) pairs with ascending offsets in [0, 1].
    pub stops: Vec<(f32, VectorColor)>,
}

impl LinearGradient {
    /// Color at a point, projected onto the gradient axis.
    pub fn color_at(&self, p: Vec2) -> VectorColor {
        let axis = self.end - self.start;
        let len_sq = axis.length_squared();
        let t = if len_sq > 0.0 {
            ((p - self.start).dot(axis) / len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.sample(t)
    }

    pub fn sample(&self, t: f32) -> VectorColor {
        let Some(&(first_at, first)) = self.stops.first() else {
            return VectorColor::new(0.0, 0.0, 0.0, 0.0);
        };
        if t <= first_at {
            return first;
        }
        for pair in self.stops.windows(2) {
            let (a_at, a) = pair[0];
            let (b_at, b) = pair[1];
            if t <= b_at {
                let span = b_at - a_at;
                let local = if span > 0.0 { (t - a_at) / span } else { 1.0 };
                return a.lerp(b, local);
            }
        }
        self.stops[self.stops.len() - 1].1
    }
}

/// Vertex constructor that colors each vertex from a gradient.
struct GradientVertexCtor<'a> {
    gradient: &'a LinearGradient,
}

impl FillVertexConstructor<VectorVertex> for GradientVertexCtor<'_> {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        let p = vertex.position();
        let c = self.gradient.color_at(Vec2::new(p.x, p.y));
        VectorVertex {
            x: p.x,
            y: p.y,
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Tessellator plus output buffer for vector effects.
/// Cleared each frame and refilled by drawing commands.
pub struct VectorState {
    fill_tess: FillTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
}

impl VectorState {
    pub fn new() -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(64 * VectorVertex::FLOATS),
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    pub fn vertices(&self) -> &[f32] {
        &self.buffer
    }

    /// Raw pointer to the flat float buffer for host reads.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    /// Flush indexed geometry to the flat buffer as a triangle list.
    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    /// Tessellate and fill a closed polygon shaded by `gradient`.
    pub fn fill_polygon_gradient(&mut self, points: &[Vec2], gradient: &LinearGradient) {
        if points.len() < 3 {
            return;
        }

        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.close();
        let path = builder.build();

        let result = self.fill_tess.tessellate_path(
            &path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, GradientVertexCtor { gradient }),
        );

        match result {
            Ok(()) => self.flush_geometry(),
            Err(err) => {
                log::warn!("vector fill failed: {:?}", err);
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new()
    }
}
