//! OpenGL 4.4 backend.
//!
//! This module implements an OpenGL 4.4 core-profile backend for learngl. The backend type is
//! [`GL44`].

#[macro_use]
mod debug;

mod buffer;
mod renderer;
mod shader;
mod state;
mod vertex_array;

pub use self::state::StateQueryError;

use self::state::GLState;
use std::cell::RefCell;
use std::rc::Rc;

/// An OpenGL 4.4 backend.
///
/// Only one backend can be created per thread, and it must be created after an OpenGL 4.4 (or
/// newer) context has been made current and its symbols loaded.
#[derive(Debug)]
pub struct GL44 {
  pub(crate) state: Rc<RefCell<GLState>>,
}

impl GL44 {
  /// Create a new OpenGL 4.4 backend.
  pub fn new() -> Result<Self, StateQueryError> {
    GLState::new().map(|state| GL44 {
      state: Rc::new(RefCell::new(state)),
    })
  }
}
