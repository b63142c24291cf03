//! Render surface contract and a mesh-building implementation
//!
//! Drawing code talks to [`RenderSurface`]; [`MeshSurface`] turns the calls
//! into per-layer vertex batches a GPU backend can upload as-is.

use glam::Vec2;

use super::shapes;
use super::vertex::Vertex;

/// How a draw combines with what is already on its layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeMode {
    /// Regular alpha blending
    #[default]
    SourceOver,
    /// Additive ("lighter"), used for sparks and glows
    Lighter,
    /// Erases destination alpha; used for the trail fade
    DestinationOut,
}

impl CompositeMode {
    /// Pipeline blend state for this mode (one render pipeline per mode)
    pub fn blend_state(&self) -> wgpu::BlendState {
        match self {
            CompositeMode::SourceOver => wgpu::BlendState::ALPHA_BLENDING,
            CompositeMode::Lighter => {
                let additive = wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::SrcAlpha,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                };
                wgpu::BlendState {
                    color: additive,
                    alpha: additive,
                }
            }
            CompositeMode::DestinationOut => {
                let erase = wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::Zero,
                    dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                    operation: wgpu::BlendOperation::Add,
                };
                wgpu::BlendState {
                    color: erase,
                    alpha: erase,
                }
            }
        }
    }
}

/// Stacked render targets, back to front
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Layer {
    /// Sky, street, lamps and lamplighter; redrawn every frame
    #[default]
    Backdrop,
    /// Sparks and the sparkler; faded instead of cleared for light trails
    Trails,
    /// Prompts and HUD text
    Overlay,
}

/// Externally loaded images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Hand,
}

/// A textured quad request, resolved by the backend that owns the images
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub layer: Layer,
    pub sprite: Sprite,
    pub center: Vec2,
    pub angle: f32,
    pub scale: f32,
    pub alpha: f32,
}

/// A text request; glyph rasterisation is up to the backend
#[derive(Debug, Clone, PartialEq)]
pub struct TextDraw {
    pub layer: Layer,
    pub text: String,
    pub center: Vec2,
    pub size: f32,
    pub color: [f32; 4],
}

/// Draw primitives the scene needs from a backend
pub trait RenderSurface {
    fn size(&self) -> Vec2;
    fn set_layer(&mut self, layer: Layer);
    fn set_composite(&mut self, mode: CompositeMode);
    /// Drop everything on `layer`
    fn clear_layer(&mut self, layer: Layer);
    /// Reduce the alpha of everything already on `layer` by `amount`
    fn fade_layer(&mut self, layer: Layer, amount: f32);

    fn fill_rect_gradient(&mut self, min: Vec2, size: Vec2, top: [f32; 4], bottom: [f32; 4]);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]);
    fn fill_glow(&mut self, center: Vec2, radius: f32, inner: [f32; 4], outer: [f32; 4]);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: [f32; 4]);
    fn fill_polygon(&mut self, points: &[Vec2], color: [f32; 4]);
    fn draw_sprite(&mut self, sprite: Sprite, center: Vec2, angle: f32, scale: f32, alpha: f32);
    /// Centered single-line text, `size` in pixels
    fn draw_text(&mut self, text: &str, center: Vec2, size: f32, color: [f32; 4]);

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: [f32; 4]) {
        self.fill_rect_gradient(min, size, color, color);
    }

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: [f32; 4]) {
        for pair in points.windows(2) {
            self.stroke_line(pair[0], pair[1], width, color);
        }
    }
}

/// One run of vertices sharing a layer and composite mode
#[derive(Debug, Clone)]
pub struct Batch {
    pub layer: Layer,
    pub mode: CompositeMode,
    pub vertices: Vec<Vertex>,
}

impl Batch {
    /// Blend state the host pipeline binds before drawing this batch
    pub fn blend_state(&self) -> wgpu::BlendState {
        self.mode.blend_state()
    }
}

/// Records draws as vertex batches. Storage is reused across frames.
#[derive(Debug, Clone)]
pub struct MeshSurface {
    size: Vec2,
    layer: Layer,
    mode: CompositeMode,
    batches: Vec<Batch>,
    /// Number of batches in use this frame
    used: usize,
    sprites: Vec<SpriteDraw>,
    texts: Vec<TextDraw>,
}

impl MeshSurface {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            layer: Layer::default(),
            mode: CompositeMode::default(),
            batches: Vec::new(),
            used: 0,
            sprites: Vec::new(),
            texts: Vec::new(),
        }
    }

    pub fn resize(&mut self, size: Vec2) {
        self.size = size;
    }

    /// Start a new frame, keeping allocations
    pub fn begin_frame(&mut self) {
        for batch in &mut self.batches[..self.used] {
            batch.vertices.clear();
        }
        self.used = 0;
        self.sprites.clear();
        self.texts.clear();
        self.layer = Layer::default();
        self.mode = CompositeMode::default();
    }

    /// Batches recorded this frame, in draw order
    pub fn batches(&self) -> &[Batch] {
        &self.batches[..self.used]
    }

    pub fn sprites(&self) -> &[SpriteDraw] {
        &self.sprites
    }

    pub fn texts(&self) -> &[TextDraw] {
        &self.texts
    }

    pub fn vertex_count(&self) -> usize {
        self.batches().iter().map(|b| b.vertices.len()).sum()
    }

    /// Raw vertex bytes for one batch, ready for a vertex buffer
    pub fn batch_bytes(&self, index: usize) -> &[u8] {
        bytemuck::cast_slice(&self.batches()[index].vertices)
    }

    /// Vertex buffer for the current layer/mode, opening a batch if needed
    fn current(&mut self) -> &mut Vec<Vertex> {
        let reuse = self
            .used
            .checked_sub(1)
            .is_some_and(|i| self.batches[i].layer == self.layer && self.batches[i].mode == self.mode);
        if !reuse {
            if self.used == self.batches.len() {
                self.batches.push(Batch {
                    layer: self.layer,
                    mode: self.mode,
                    vertices: Vec::new(),
                });
            } else {
                let batch = &mut self.batches[self.used];
                batch.layer = self.layer;
                batch.mode = self.mode;
                batch.vertices.clear();
            }
            self.used += 1;
        }
        &mut self.batches[self.used - 1].vertices
    }
}

impl RenderSurface for MeshSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn set_layer(&mut self, layer: Layer) {
        self.layer = layer;
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.mode = mode;
    }

    fn clear_layer(&mut self, layer: Layer) {
        // Batches recorded earlier this frame on that layer are discarded
        for batch in &mut self.batches[..self.used] {
            if batch.layer == layer {
                batch.vertices.clear();
            }
        }
        self.sprites.retain(|s| s.layer != layer);
        self.texts.retain(|t| t.layer != layer);
    }

    fn fade_layer(&mut self, layer: Layer, amount: f32) {
        let (prev_layer, prev_mode) = (self.layer, self.mode);
        self.layer = layer;
        self.mode = CompositeMode::DestinationOut;
        let size = self.size;
        let color = [0.0, 0.0, 0.0, amount.clamp(0.0, 1.0)];
        shapes::rect_gradient(self.current(), Vec2::ZERO, size, color, color);
        self.layer = prev_layer;
        self.mode = prev_mode;
    }

    fn fill_rect_gradient(&mut self, min: Vec2, size: Vec2, top: [f32; 4], bottom: [f32; 4]) {
        shapes::rect_gradient(self.current(), min, size, top, bottom);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        let segments = shapes::circle_segments(radius);
        shapes::circle(self.current(), center, radius, color, segments);
    }

    fn fill_glow(&mut self, center: Vec2, radius: f32, inner: [f32; 4], outer: [f32; 4]) {
        let segments = shapes::circle_segments(radius);
        shapes::radial_glow(self.current(), center, radius, inner, outer, segments);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: [f32; 4]) {
        shapes::segment(self.current(), from, to, width, color);
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: [f32; 4]) {
        shapes::polygon(self.current(), points, color);
    }

    fn draw_sprite(&mut self, sprite: Sprite, center: Vec2, angle: f32, scale: f32, alpha: f32) {
        self.sprites.push(SpriteDraw {
            layer: self.layer,
            sprite,
            center,
            angle,
            scale,
            alpha,
        });
    }

    fn draw_text(&mut self, text: &str, center: Vec2, size: f32, color: [f32; 4]) {
        self.texts.push(TextDraw {
            layer: self.layer,
            text: text.to_string(),
            center,
            size,
            color,
        });
    }
}
