//! Vertex array backend interface.

use crate::backend::buffer::Buffer;
use crate::layout::AttribDesc;
use crate::vertex_array::VertexArrayError;

/// Vertex array backend.
///
/// # Safety
///
/// [`VertexArray::destroy_vertex_array`] must be idempotent.
pub unsafe trait VertexArray: Buffer {
  /// Backend representation of a vertex array.
  type VertexArrayRepr;

  /// Create a new, empty vertex array.
  unsafe fn new_vertex_array(&mut self) -> Result<Self::VertexArrayRepr, VertexArrayError>;

  /// Release a vertex array.
  unsafe fn destroy_vertex_array(vertex_array: &mut Self::VertexArrayRepr);

  /// Maximum number of vertex attribute slots the device supports.
  unsafe fn max_vertex_attribs(&mut self) -> usize;

  /// Bind a vertex array as the current one.
  unsafe fn bind_vertex_array(vertex_array: &Self::VertexArrayRepr);

  /// Clear the current vertex array binding.
  unsafe fn unbind_vertex_array(vertex_array: &Self::VertexArrayRepr);

  /// Enable the attribute slot `slot` and make it read `attrib` from the currently bound vertex
  /// buffer, at `offset` bytes with a `stride` bytes step.
  ///
  /// The vertex array and the source vertex buffer are bound when this function is called.
  unsafe fn enable_attrib(
    vertex_array: &mut Self::VertexArrayRepr,
    slot: u32,
    attrib: &AttribDesc,
    stride: usize,
    offset: usize,
  );
}
