//! Clear and draw commands.
//!
//! A [`Renderer`] is a tiny bundle of render settings (clear color, whether the depth buffer gets
//! cleared, primitive mode) able to clear the framebuffer and draw an indexed mesh:
//!
//! ```ignore
//! let renderer = Renderer::new().set_clear_color([0.2, 0.3, 0.3, 1.0]);
//!
//! loop {
//!   renderer.clear(&mut ctx);
//!   renderer.draw(&mut ctx, &va, &ib, &shader);
//!   // swap buffers, poll events…
//! }
//! ```
//!
//! [`Renderer::draw`] binds everything it needs on every call, without trying to skip bindings
//! that are already in place.

use crate::backend::renderer::Renderer as RendererBackend;
use crate::buffer::IndexBuffer;
use crate::context::GraphicsContext;
use crate::shader::Shader;
use crate::vertex_array::VertexArray;

/// How vertices are connected into primitives.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PrimitiveMode {
  /// A single point per vertex.
  Point,
  /// A line for every pair of vertices.
  Line,
  /// A line between every consecutive vertices.
  LineStrip,
  /// A triangle for every three vertices.
  Triangle,
  /// A triangle for every consecutive three vertices.
  TriangleStrip,
  /// A triangle for every vertex, sharing the first one.
  TriangleFan,
}

/// How polygons are rasterized.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PolygonMode {
  /// Only the vertices are drawn.
  Point,
  /// Only the edges are drawn (wireframe).
  Line,
  /// Polygons are filled.
  Fill,
}

/// Clear and draw commands, along with their settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Renderer {
  clear_color: [f32; 4],
  clear_depth: bool,
  mode: PrimitiveMode,
}

impl Default for Renderer {
  /// Defaults:
  ///
  /// - `clear_color` set to opaque black.
  /// - `clear_depth` set to `false`.
  /// - `mode` set to [`PrimitiveMode::Triangle`].
  fn default() -> Self {
    Renderer {
      clear_color: [0., 0., 0., 1.],
      clear_depth: false,
      mode: PrimitiveMode::Triangle,
    }
  }
}

impl Renderer {
  /// Create a renderer with default settings.
  pub fn new() -> Self {
    Self::default()
  }

  /// Color the color buffer is cleared with.
  pub fn set_clear_color(self, clear_color: [f32; 4]) -> Self {
    Renderer {
      clear_color,
      ..self
    }
  }

  /// Get the clear color.
  pub fn clear_color(&self) -> [f32; 4] {
    self.clear_color
  }

  /// Clear the depth buffer along with the color buffer. Enable it if depth testing is enabled.
  pub fn set_clear_depth(self, clear_depth: bool) -> Self {
    Renderer {
      clear_depth,
      ..self
    }
  }

  /// Whether the depth buffer is cleared.
  pub fn clear_depth(&self) -> bool {
    self.clear_depth
  }

  /// Primitive mode used by [`Renderer::draw`].
  pub fn set_primitive_mode(self, mode: PrimitiveMode) -> Self {
    Renderer { mode, ..self }
  }

  /// Get the primitive mode.
  pub fn primitive_mode(&self) -> PrimitiveMode {
    self.mode
  }

  /// Clear the framebuffer.
  pub fn clear<C, B>(&self, ctx: &mut C)
  where
    C: GraphicsContext<Backend = B>,
    B: ?Sized + RendererBackend,
  {
    unsafe { ctx.backend().clear(self.clear_color, self.clear_depth) }
  }

  /// Draw the whole index buffer `ib`, reading vertices through `va`, with `shader`.
  ///
  /// The shader, the vertex array and the index buffer are bound, in that order, and left bound.
  pub fn draw<C, B>(
    &self,
    ctx: &mut C,
    va: &VertexArray<B>,
    ib: &IndexBuffer<B>,
    shader: &Shader<B>,
  ) where
    C: GraphicsContext<Backend = B>,
    B: ?Sized + RendererBackend,
  {
    shader.bind();
    va.bind();
    ib.bind();

    unsafe {
      ctx
        .backend()
        .draw_indexed(self.mode, ib.count(), ib.index_type())
    }
  }

  /// Set the viewport, typically after the framebuffer got resized.
  pub fn set_viewport<C, B>(&self, ctx: &mut C, x: i32, y: i32, width: u32, height: u32)
  where
    C: GraphicsContext<Backend = B>,
    B: ?Sized + RendererBackend,
  {
    let width = i32::try_from(width).unwrap_or(i32::MAX);
    let height = i32::try_from(height).unwrap_or(i32::MAX);

    unsafe { ctx.backend().set_viewport([x, y, width, height]) }
  }

  /// Set how polygons are rasterized; [`PolygonMode::Line`] draws wireframes.
  pub fn set_polygon_mode<C, B>(&self, ctx: &mut C, mode: PolygonMode)
  where
    C: GraphicsContext<Backend = B>,
    B: ?Sized + RendererBackend,
  {
    unsafe { ctx.backend().set_polygon_mode(mode) }
  }
}
