//! Buffer backend interface.
//!
//! This interface defines the low-level API vertex and index buffers must implement to be usable.

use crate::buffer::BufferError;

/// Buffer backend.
///
/// Buffers are created with an immutable payload; there is no way to update their content once
/// created.
///
/// # Safety
///
/// [`Buffer::destroy_buffer`] must be idempotent.
pub unsafe trait Buffer {
  /// The inner representation of the buffer for this backend.
  type BufferRepr;

  /// Create a new vertex buffer and upload `bytes` into it.
  unsafe fn new_vertex_buffer(&mut self, bytes: &[u8]) -> Result<Self::BufferRepr, BufferError>;

  /// Create a new index buffer and upload `bytes` into it.
  unsafe fn new_index_buffer(&mut self, bytes: &[u8]) -> Result<Self::BufferRepr, BufferError>;

  /// Release a buffer, whatever its kind.
  unsafe fn destroy_buffer(buffer: &mut Self::BufferRepr);

  /// Bind a buffer as the current vertex buffer.
  unsafe fn bind_vertex_buffer(buffer: &Self::BufferRepr);

  /// Clear the current vertex buffer binding.
  unsafe fn unbind_vertex_buffer(buffer: &Self::BufferRepr);

  /// Bind a buffer as the current index buffer.
  unsafe fn bind_index_buffer(buffer: &Self::BufferRepr);

  /// Clear the current index buffer binding.
  unsafe fn unbind_index_buffer(buffer: &Self::BufferRepr);
}
