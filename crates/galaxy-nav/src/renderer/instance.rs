use bytemuck::{Pod, Zeroable};

/// Per-planet render data written to the shared buffer for the TypeScript renderer.
/// Must match the TypeScript protocol: 16 floats = 64 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PlanetInstance {
    /// Live world position.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Rendered sphere radius, emphasis scale included.
    pub radius: f32,
    /// Self-rotation phase in radians, [0, 2π).
    pub spin: f32,
    /// Hover/select emphasis, [0, 1]. Drives glow.
    pub emphasis: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub ring_r: f32,
    pub ring_g: f32,
    pub ring_b: f32,
    /// Ring inner/outer radius. Both 0 when the planet has no ring.
    pub ring_inner: f32,
    pub ring_outer: f32,
    /// 1.0 when selected.
    pub selected: f32,
    /// 1.0 when hovered.
    pub hovered: f32,
}

impl PlanetInstance {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// One orbit line-strip vertex.
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct OrbitVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Line opacity.
    pub a: f32,
    /// Registry index of the owning planet. Strips break where it changes.
    pub path: f32,
}

impl OrbitVertex {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Planet instances for the current frame, in registry order.
pub struct PlanetBuffer {
    pub instances: Vec<PlanetInstance>,
}

impl PlanetBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(16),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: PlanetInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for shared-buffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for PlanetBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Visible orbit vertices for the current frame.
pub struct OrbitBuffer {
    pub vertices: Vec<OrbitVertex>,
}

impl OrbitBuffer {
    pub fn new() -> Self {
        Self {
            vertices: Vec::with_capacity(1024),
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn push(&mut self, vertex: OrbitVertex) {
        self.vertices.push(vertex);
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn vertices_ptr(&self) -> *const f32 {
        self.vertices.as_ptr() as *const f32
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }
}

impl Default for OrbitBuffer {
    fn default() -> Self {
        Self::new()
    }
}
