//! Renderer backend interface.
//!
//! Clear and draw commands. Drawing always acts on whatever program, vertex array and index buffer
//! are currently bound.

use crate::backend::shader::Shader;
use crate::backend::vertex_array::VertexArray;
use crate::buffer::IndexType;
use crate::renderer::{PolygonMode, PrimitiveMode};

/// Renderer backend.
pub unsafe trait Renderer: Shader + VertexArray {
  /// Clear the color buffer with `color`, and the depth buffer as well if `depth` is `true`.
  unsafe fn clear(&mut self, color: [f32; 4], depth: bool);

  /// Issue an indexed draw of `count` indices of type `index_type`, starting at the beginning of
  /// the bound index buffer.
  unsafe fn draw_indexed(&mut self, mode: PrimitiveMode, count: usize, index_type: IndexType);

  /// Set the viewport rectangle, as `[x, y, width, height]`.
  unsafe fn set_viewport(&mut self, viewport: [i32; 4]);

  /// Set how polygons get rasterized.
  unsafe fn set_polygon_mode(&mut self, mode: PolygonMode);
}
