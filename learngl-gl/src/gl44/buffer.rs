//! OpenGL buffer implementation.

use crate::gl44::state::GLState;
use crate::gl44::GL44;
use gl::types::*;
use learngl::backend::buffer::Buffer as BufferBackend;
use learngl::buffer::BufferError;
use std::cell::RefCell;
use std::rc::Rc;

/// OpenGL buffer.
///
/// Vertex and index buffers share this representation; only the binding target differs.
#[derive(Debug)]
pub struct Buffer {
  handle: GLuint,
  len: usize,
  state: Rc<RefCell<GLState>>,
}

impl Buffer {
  unsafe fn from_bytes(gl44: &mut GL44, bytes: &[u8]) -> Result<Self, BufferError> {
    let mut handle: GLuint = 0;

    gl_call!(gl::GenBuffers(1, &mut handle));

    if handle == 0 {
      return Err(BufferError::CreationFailed);
    }

    // uploading through the array buffer target doesn’t disturb the current vertex array, even
    // for index data
    gl44.state.borrow_mut().bind_array_buffer(handle);

    gl_call!(gl::BufferData(
      gl::ARRAY_BUFFER,
      bytes.len() as GLsizeiptr,
      bytes.as_ptr() as _,
      gl::STATIC_DRAW,
    ));

    log::trace!("created buffer {} ({} bytes)", handle, bytes.len());

    Ok(Buffer {
      handle,
      len: bytes.len(),
      state: gl44.state.clone(),
    })
  }

  unsafe fn delete(&mut self) {
    if self.handle != 0 {
      self.state.borrow_mut().forget_buffer(self.handle);
      gl_call!(gl::DeleteBuffers(1, &self.handle));
      log::trace!("deleted buffer {} ({} bytes)", self.handle, self.len);
      self.handle = 0;
    }
  }
}

impl Drop for Buffer {
  fn drop(&mut self) {
    unsafe { self.delete() }
  }
}

unsafe impl BufferBackend for GL44 {
  type BufferRepr = Buffer;

  unsafe fn new_vertex_buffer(&mut self, bytes: &[u8]) -> Result<Self::BufferRepr, BufferError> {
    Buffer::from_bytes(self, bytes)
  }

  unsafe fn new_index_buffer(&mut self, bytes: &[u8]) -> Result<Self::BufferRepr, BufferError> {
    Buffer::from_bytes(self, bytes)
  }

  unsafe fn destroy_buffer(buffer: &mut Self::BufferRepr) {
    buffer.delete();
  }

  unsafe fn bind_vertex_buffer(buffer: &Self::BufferRepr) {
    buffer.state.borrow_mut().bind_array_buffer(buffer.handle);
  }

  unsafe fn unbind_vertex_buffer(buffer: &Self::BufferRepr) {
    buffer.state.borrow_mut().bind_array_buffer(0);
  }

  unsafe fn bind_index_buffer(buffer: &Self::BufferRepr) {
    buffer
      .state
      .borrow_mut()
      .bind_element_array_buffer(buffer.handle);
  }

  unsafe fn unbind_index_buffer(buffer: &Self::BufferRepr) {
    buffer.state.borrow_mut().bind_element_array_buffer(0);
  }
}
