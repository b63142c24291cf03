//! Rendering handoff
//!
//! The simulation is drawn through the [`RenderSurface`] trait. The bundled
//! [`MeshSurface`] tessellates everything into wgpu-ready vertex batches;
//! uploading and presenting them belongs to the platform backend.

pub mod draw;
pub mod shapes;
pub mod surface;
pub mod vertex;

pub use draw::{draw_fps, draw_scene, heat_color};
pub use surface::{
    Batch, CompositeMode, Layer, MeshSurface, RenderSurface, Sprite, SpriteDraw, TextDraw,
};
pub use vertex::Vertex;
