//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position (screen pixels) and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Buffer layout for the host pipeline uploading [`MeshSurface`] batches
    ///
    /// [`MeshSurface`]: super::MeshSurface
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Convert a 0xRRGGBB hex color to linear-ish floats with the given alpha
pub const fn rgb(hex: u32, alpha: f32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Colors for scene elements
pub mod colors {
    use super::rgb;

    pub const SKY_TOP: [f32; 4] = rgb(0x0b1026, 1.0); // Deep midnight
    pub const SKY_BOTTOM: [f32; 4] = rgb(0x2b32b2, 1.0); // Twilight blue
    pub const GROUND: [f32; 4] = rgb(0x050510, 1.0);
    pub const STAR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const SNOW: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    pub const LAMP_IRON: [f32; 4] = rgb(0x1a1a2e, 1.0);
    pub const LAMP_CAP: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const LAMP_GLASS_DARK: [f32; 4] = [200.0 / 255.0, 200.0 / 255.0, 1.0, 0.1];
    pub const LAMP_GLASS_LIT: [f32; 3] = [1.0, 220.0 / 255.0, 100.0 / 255.0];
    pub const LAMP_GLOW_INNER: [f32; 3] = [1.0, 200.0 / 255.0, 50.0 / 255.0];
    pub const LAMP_GLOW_OUTER: [f32; 3] = [1.0, 100.0 / 255.0, 0.0];

    pub const SILHOUETTE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    pub const WIRE: [f32; 4] = rgb(0x999999, 1.0);
    pub const WIRE_SHADE: [f32; 4] = rgb(0x555555, 1.0);
    pub const FUEL: [f32; 4] = rgb(0x444444, 1.0);
    pub const FUEL_SHADE: [f32; 4] = rgb(0x222222, 1.0);
    pub const TIP_CORE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const TIP_GLOW: [f32; 4] = [1.0, 200.0 / 255.0, 0.0, 0.8];
    pub const TIP_HALO: [f32; 4] = [1.0, 0.4, 0.0, 0.25];

    pub const PROMPT: [f32; 4] = [1.0, 1.0, 1.0, 0.8];
}
