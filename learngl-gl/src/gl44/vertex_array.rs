//! OpenGL vertex array implementation.

use crate::gl44::state::GLState;
use crate::gl44::GL44;
use gl::types::*;
use learngl::backend::vertex_array::VertexArray as VertexArrayBackend;
use learngl::layout::{AttribDesc, AttribType};
use learngl::vertex_array::VertexArrayError;
use std::cell::RefCell;
use std::os::raw::c_void;
use std::ptr;
use std::rc::Rc;

#[derive(Debug)]
pub struct VertexArray {
  handle: GLuint,
  state: Rc<RefCell<GLState>>,
}

impl VertexArray {
  unsafe fn delete(&mut self) {
    if self.handle != 0 {
      self.state.borrow_mut().forget_vertex_array(self.handle);
      gl_call!(gl::DeleteVertexArrays(1, &self.handle));
      log::trace!("deleted vertex array {}", self.handle);
      self.handle = 0;
    }
  }
}

impl Drop for VertexArray {
  fn drop(&mut self) {
    unsafe { self.delete() }
  }
}

unsafe impl VertexArrayBackend for GL44 {
  type VertexArrayRepr = VertexArray;

  unsafe fn new_vertex_array(&mut self) -> Result<Self::VertexArrayRepr, VertexArrayError> {
    let mut handle: GLuint = 0;

    gl_call!(gl::GenVertexArrays(1, &mut handle));

    if handle == 0 {
      return Err(VertexArrayError::CreationFailed);
    }

    log::trace!("created vertex array {}", handle);

    Ok(VertexArray {
      handle,
      state: self.state.clone(),
    })
  }

  unsafe fn destroy_vertex_array(vertex_array: &mut Self::VertexArrayRepr) {
    vertex_array.delete();
  }

  unsafe fn max_vertex_attribs(&mut self) -> usize {
    self.state.borrow().max_vertex_attribs()
  }

  unsafe fn bind_vertex_array(vertex_array: &Self::VertexArrayRepr) {
    vertex_array
      .state
      .borrow_mut()
      .bind_vertex_array(vertex_array.handle);
  }

  unsafe fn unbind_vertex_array(vertex_array: &Self::VertexArrayRepr) {
    vertex_array.state.borrow_mut().bind_vertex_array(0);
  }

  unsafe fn enable_attrib(
    _: &mut Self::VertexArrayRepr,
    slot: u32,
    attrib: &AttribDesc,
    stride: usize,
    offset: usize,
  ) {
    let normalized = if attrib.normalized {
      gl::TRUE
    } else {
      gl::FALSE
    };

    gl_call!(gl::EnableVertexAttribArray(slot));
    gl_call!(gl::VertexAttribPointer(
      slot,
      attrib.count as GLint,
      opengl_attrib_type(attrib.ty),
      normalized,
      stride as GLsizei,
      ptr::null::<c_void>().add(offset),
    ));
  }
}

fn opengl_attrib_type(ty: AttribType) -> GLenum {
  match ty {
    AttribType::Float => gl::FLOAT,
    AttribType::Int => gl::INT,
    AttribType::UnsignedInt => gl::UNSIGNED_INT,
    AttribType::Short => gl::SHORT,
    AttribType::UnsignedShort => gl::UNSIGNED_SHORT,
    AttribType::Byte => gl::BYTE,
    AttribType::UnsignedByte => gl::UNSIGNED_BYTE,
  }
}
