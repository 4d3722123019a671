//! Graphics state.

use gl::types::*;
use std::cell::RefCell;
use std::error;
use std::fmt;
use std::marker::PhantomData;

// TLS synchronization barrier for `GLState`.
thread_local!(static TLS_ACQUIRE_GFX_STATE: RefCell<Option<()>> = RefCell::new(Some(())));

/// Minimal supported OpenGL version.
const MIN_VERSION: (GLint, GLint) = (4, 4);

/// The graphics state.
///
/// This type represents the current state of a given graphics context. Every binding goes
/// through it and is always forwarded to OpenGL; the tracked values are used to release objects
/// that are still bound when they get deleted.
#[derive(Debug)]
pub struct GLState {
  _a: PhantomData<*const ()>, // !Send and !Sync

  // number of vertex attribute slots
  max_vertex_attribs: usize,

  // array buffer
  bound_array_buffer: GLuint,

  // element buffer
  bound_element_array_buffer: GLuint,

  // vertex array
  bound_vertex_array: GLuint,

  // shader program
  current_program: GLuint,
}

impl GLState {
  /// Create a new `GLState`.
  ///
  /// > Note: keep in mind you can create only one per thread.
  pub(crate) fn new() -> Result<Self, StateQueryError> {
    TLS_ACQUIRE_GFX_STATE.with(|rc| {
      let mut inner = rc.borrow_mut();

      match *inner {
        Some(_) => {
          inner.take();
          Self::get_from_context()
        }

        None => Err(StateQueryError::UnavailableGLState),
      }
    })
  }

  /// Get a `GLState` from the current OpenGL context.
  fn get_from_context() -> Result<Self, StateQueryError> {
    unsafe {
      let version = get_ctx_version();

      if version < MIN_VERSION {
        return Err(StateQueryError::UnsupportedVersion {
          major: version.0,
          minor: version.1,
        });
      }

      let max_vertex_attribs = get_ctx_max_vertex_attribs();
      let bound_vertex_array = get_ctx_bound_vertex_array();
      let current_program = get_ctx_current_program();

      log::info!(
        "OpenGL {}.{} state acquired ({} vertex attributes)",
        version.0,
        version.1,
        max_vertex_attribs
      );

      Ok(GLState {
        _a: PhantomData,
        max_vertex_attribs,
        bound_array_buffer: 0,
        bound_element_array_buffer: 0,
        bound_vertex_array,
        current_program,
      })
    }
  }

  /// Number of vertex attribute slots supported by the context.
  pub fn max_vertex_attribs(&self) -> usize {
    self.max_vertex_attribs
  }

  /// Currently used shader program (`0` if none).
  pub fn current_program(&self) -> u32 {
    self.current_program
  }

  pub(crate) unsafe fn bind_array_buffer(&mut self, handle: GLuint) {
    gl_call!(gl::BindBuffer(gl::ARRAY_BUFFER, handle));
    self.bound_array_buffer = handle;
  }

  pub(crate) unsafe fn bind_element_array_buffer(&mut self, handle: GLuint) {
    gl_call!(gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, handle));
    self.bound_element_array_buffer = handle;
  }

  // OpenGL unbinds deleted buffers by itself; only forget about them
  pub(crate) fn forget_buffer(&mut self, handle: GLuint) {
    if self.bound_array_buffer == handle {
      self.bound_array_buffer = 0;
    }

    if self.bound_element_array_buffer == handle {
      self.bound_element_array_buffer = 0;
    }
  }

  pub(crate) unsafe fn bind_vertex_array(&mut self, handle: GLuint) {
    gl_call!(gl::BindVertexArray(handle));
    self.bound_vertex_array = handle;

    // the element buffer binding is part of the vertex array state
    self.bound_element_array_buffer = 0;
  }

  pub(crate) fn forget_vertex_array(&mut self, handle: GLuint) {
    if self.bound_vertex_array == handle {
      self.bound_vertex_array = 0;
      self.bound_element_array_buffer = 0;
    }
  }

  pub(crate) unsafe fn use_program(&mut self, handle: GLuint) {
    gl_call!(gl::UseProgram(handle));
    self.current_program = handle;
  }
}

/// An error that might happen when the context is queried.
#[non_exhaustive]
#[derive(Debug)]
pub enum StateQueryError {
  /// The [`GLState`] object is unavailable.
  ///
  /// That might occur if the current thread doesn’t support allocating a new graphics state. It
  /// might happen if you try to have more than one state on the same thread, for instance.
  UnavailableGLState,
  /// The current context is older than OpenGL 4.4.
  UnsupportedVersion {
    /// Major version of the context.
    major: i32,
    /// Minor version of the context.
    minor: i32,
  },
}

impl fmt::Display for StateQueryError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StateQueryError::UnavailableGLState => write!(f, "unavailable graphics state"),
      StateQueryError::UnsupportedVersion { major, minor } => write!(
        f,
        "unsupported OpenGL version: {}.{} (at least {}.{} required)",
        major, minor, MIN_VERSION.0, MIN_VERSION.1
      ),
    }
  }
}

impl error::Error for StateQueryError {}

unsafe fn get_ctx_version() -> (GLint, GLint) {
  let mut major = 0;
  let mut minor = 0;
  gl::GetIntegerv(gl::MAJOR_VERSION, &mut major);
  gl::GetIntegerv(gl::MINOR_VERSION, &mut minor);
  (major, minor)
}

unsafe fn get_ctx_max_vertex_attribs() -> usize {
  let mut max = 0 as GLint;
  gl::GetIntegerv(gl::MAX_VERTEX_ATTRIBS, &mut max);
  max.max(0) as usize
}

unsafe fn get_ctx_bound_vertex_array() -> GLuint {
  let mut bound = 0 as GLint;
  gl::GetIntegerv(gl::VERTEX_ARRAY_BINDING, &mut bound);
  bound as GLuint
}

unsafe fn get_ctx_current_program() -> GLuint {
  let mut used = 0 as GLint;
  gl::GetIntegerv(gl::CURRENT_PROGRAM, &mut used);
  used as GLuint
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn version_error_display() {
    let e = StateQueryError::UnsupportedVersion { major: 3, minor: 3 };
    assert_eq!(
      e.to_string(),
      "unsupported OpenGL version: 3.3 (at least 4.4 required)"
    );
  }

  #[test]
  fn min_version_ordering() {
    assert!((3, 3) < MIN_VERSION);
    assert!((4, 3) < MIN_VERSION);
    assert!((4, 6) >= MIN_VERSION);
  }
}
