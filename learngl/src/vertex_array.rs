//! Vertex arrays.
//!
//! A [`VertexArray`] records which vertex buffers feed which attribute slots, and how. Attach
//! buffers with [`VertexArray::add_buffer`]; each attribute of the layout gets the next free slot,
//! so slot numbering continues across several calls:
//!
//! ```ignore
//! let mut va = VertexArray::new(&mut ctx)?;
//!
//! let mut positions = BufferLayout::new();
//! positions.push::<f32>(3);
//! va.add_buffer(&position_buffer, &positions)?; // slot 0
//!
//! let mut colors = BufferLayout::new();
//! colors.push_normalized::<u8>(4);
//! va.add_buffer(&color_buffer, &colors)?; // slot 1
//! ```
//!
//! A vertex array doesn’t own the buffers it reads from: they must outlive it.

use std::error;
use std::fmt;

use crate::backend::vertex_array::VertexArray as VertexArrayBackend;
use crate::buffer::VertexBuffer;
use crate::context::GraphicsContext;
use crate::layout::BufferLayout;

/// Vertex array errors.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VertexArrayError {
  /// The backend could not allocate a new vertex array.
  CreationFailed,
  /// An attribute has a component count outside of 1–4.
  InvalidComponentCount {
    /// Slot the attribute would have been attached to.
    slot: u32,
    /// Faulty component count.
    count: usize,
  },
  /// Attaching the layout would use more attribute slots than the device supports.
  TooManyAttributes {
    /// Total number of slots that would be needed.
    requested: usize,
    /// Maximum number of slots.
    max: usize,
  },
}

impl fmt::Display for VertexArrayError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      VertexArrayError::CreationFailed => f.write_str("cannot create vertex array"),

      VertexArrayError::InvalidComponentCount { slot, count } => write!(
        f,
        "invalid component count for attribute {}: {} (expected 1–4)",
        slot, count
      ),

      VertexArrayError::TooManyAttributes { requested, max } => write!(
        f,
        "too many vertex attributes: {} requested, {} supported",
        requested, max
      ),
    }
  }
}

impl error::Error for VertexArrayError {}

/// Device-resident association between vertex buffers and attribute slots.
pub struct VertexArray<B>
where
  B: ?Sized + VertexArrayBackend,
{
  repr: B::VertexArrayRepr,
  next_slot: u32,
  max_attribs: usize,
}

impl<B> VertexArray<B>
where
  B: ?Sized + VertexArrayBackend,
{
  /// Create a new vertex array with no attached buffer.
  pub fn new<C>(ctx: &mut C) -> Result<Self, VertexArrayError>
  where
    C: GraphicsContext<Backend = B>,
  {
    let backend = ctx.backend();
    let repr = unsafe { backend.new_vertex_array()? };
    let max_attribs = unsafe { backend.max_vertex_attribs() };

    Ok(VertexArray {
      repr,
      next_slot: 0,
      max_attribs,
    })
  }

  /// Attach `buffer` with `layout`.
  ///
  /// The layout is validated as a whole before anything gets sent to the device: on error, the
  /// vertex array is left untouched. On success, the vertex array and `buffer` are left bound.
  pub fn add_buffer(
    &mut self,
    buffer: &VertexBuffer<B>,
    layout: &BufferLayout,
  ) -> Result<(), VertexArrayError> {
    let requested = self.next_slot as usize + layout.len();
    if requested > self.max_attribs {
      return Err(VertexArrayError::TooManyAttributes {
        requested,
        max: self.max_attribs,
      });
    }

    for (slot, desc) in (self.next_slot..).zip(layout.attribs()) {
      if !(1..=4).contains(&desc.count) {
        return Err(VertexArrayError::InvalidComponentCount {
          slot,
          count: desc.count,
        });
      }
    }

    self.bind();
    buffer.bind();

    let stride = layout.stride();
    for (desc, offset) in layout.iter() {
      unsafe { B::enable_attrib(&mut self.repr, self.next_slot, desc, stride, offset) };
      self.next_slot += 1;
    }

    log::trace!(
      "attached {} attribute(s) to vertex array ({} total)",
      layout.len(),
      self.next_slot
    );

    Ok(())
  }

  /// Make this vertex array the current one.
  pub fn bind(&self) {
    unsafe { B::bind_vertex_array(&self.repr) }
  }

  /// Clear the current vertex array.
  pub fn unbind(&self) {
    unsafe { B::unbind_vertex_array(&self.repr) }
  }

  /// Number of attribute slots in use.
  pub fn attrib_count(&self) -> usize {
    self.next_slot as usize
  }
}

impl<B> Drop for VertexArray<B>
where
  B: ?Sized + VertexArrayBackend,
{
  fn drop(&mut self) {
    unsafe { B::destroy_vertex_array(&mut self.repr) }
  }
}
