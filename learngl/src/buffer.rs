//! Vertex and index buffers.
//!
//! Both kinds of buffers are created with an immutable payload uploaded once to the device, and
//! release their device handle when dropped.

use std::error;
use std::fmt;
use std::mem;

use bytemuck::Pod;

use crate::backend::buffer::Buffer as BufferBackend;
use crate::context::GraphicsContext;

/// Buffer errors.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BufferError {
  /// The backend could not allocate a new buffer.
  CreationFailed,
}

impl fmt::Display for BufferError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      BufferError::CreationFailed => f.write_str("cannot create buffer"),
    }
  }
}

impl error::Error for BufferError {}

/// Type of the indices stored in an [`IndexBuffer`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum IndexType {
  /// 8-bit unsigned indices.
  UnsignedByte,
  /// 16-bit unsigned indices.
  UnsignedShort,
  /// 32-bit unsigned indices.
  UnsignedInt,
}

impl IndexType {
  /// Size in bytes of a single index.
  pub fn size(self) -> usize {
    match self {
      IndexType::UnsignedByte => mem::size_of::<u8>(),
      IndexType::UnsignedShort => mem::size_of::<u16>(),
      IndexType::UnsignedInt => mem::size_of::<u32>(),
    }
  }
}

/// Rust types that can be used as indices.
pub trait Index: Pod {
  /// Index type associated with this Rust type.
  const INDEX_TYPE: IndexType;
}

impl Index for u8 {
  const INDEX_TYPE: IndexType = IndexType::UnsignedByte;
}

impl Index for u16 {
  const INDEX_TYPE: IndexType = IndexType::UnsignedShort;
}

impl Index for u32 {
  const INDEX_TYPE: IndexType = IndexType::UnsignedInt;
}

/// Device-resident vertex data.
pub struct VertexBuffer<B>
where
  B: ?Sized + BufferBackend,
{
  repr: B::BufferRepr,
  size: usize,
}

impl<B> VertexBuffer<B>
where
  B: ?Sized + BufferBackend,
{
  /// Create a vertex buffer and upload `data` into it.
  ///
  /// `T` can be anything plain (floats, arrays of floats, `#[repr(C)]` records…); only its bytes
  /// matter. How they get split into attributes is described by a
  /// [`BufferLayout`](crate::layout::BufferLayout).
  pub fn new<C, T>(ctx: &mut C, data: &[T]) -> Result<Self, BufferError>
  where
    C: GraphicsContext<Backend = B>,
    T: Pod,
  {
    let bytes: &[u8] = bytemuck::cast_slice(data);
    let repr = unsafe { ctx.backend().new_vertex_buffer(bytes)? };

    Ok(VertexBuffer {
      repr,
      size: bytes.len(),
    })
  }

  /// Make this buffer the current vertex buffer.
  pub fn bind(&self) {
    unsafe { B::bind_vertex_buffer(&self.repr) }
  }

  /// Clear the current vertex buffer.
  pub fn unbind(&self) {
    unsafe { B::unbind_vertex_buffer(&self.repr) }
  }

  /// Size in bytes of the payload.
  pub fn size(&self) -> usize {
    self.size
  }
}

impl<B> Drop for VertexBuffer<B>
where
  B: ?Sized + BufferBackend,
{
  fn drop(&mut self) {
    unsafe { B::destroy_buffer(&mut self.repr) }
  }
}

/// Device-resident index data.
pub struct IndexBuffer<B>
where
  B: ?Sized + BufferBackend,
{
  repr: B::BufferRepr,
  count: usize,
  index_type: IndexType,
}

impl<B> IndexBuffer<B>
where
  B: ?Sized + BufferBackend,
{
  /// Create an index buffer and upload `indices` into it.
  pub fn new<C, I>(ctx: &mut C, indices: &[I]) -> Result<Self, BufferError>
  where
    C: GraphicsContext<Backend = B>,
    I: Index,
  {
    let repr = unsafe { ctx.backend().new_index_buffer(bytemuck::cast_slice(indices))? };

    Ok(IndexBuffer {
      repr,
      count: indices.len(),
      index_type: I::INDEX_TYPE,
    })
  }

  /// Make this buffer the current index buffer.
  pub fn bind(&self) {
    unsafe { B::bind_index_buffer(&self.repr) }
  }

  /// Clear the current index buffer.
  pub fn unbind(&self) {
    unsafe { B::unbind_index_buffer(&self.repr) }
  }

  /// Number of indices.
  pub fn count(&self) -> usize {
    self.count
  }

  /// Type of the indices.
  pub fn index_type(&self) -> IndexType {
    self.index_type
  }
}

impl<B> Drop for IndexBuffer<B>
where
  B: ?Sized + BufferBackend,
{
  fn drop(&mut self) {
    unsafe { B::destroy_buffer(&mut self.repr) }
  }
}
