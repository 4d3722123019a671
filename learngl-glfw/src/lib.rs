//! [GLFW](https://crates.io/crates/glfw) backend for [learngl](https://crates.io/crates/learngl).

#![deny(missing_docs)]

use glfw::{self, Context as _, Glfw, InitError, Window, WindowEvent};
use learngl::context::GraphicsContext;
pub use learngl_gl::gl44::StateQueryError;
use learngl_gl::GL44;
use learngl_windowing::{WindowDim, WindowOpt};
use std::{convert::Infallible, error, fmt, os::raw::c_void, sync::mpsc::Receiver};

/// Error that can be risen while creating a surface.
#[non_exhaustive]
#[derive(Debug)]
pub enum GlfwSurfaceError<E> {
  /// Initialization of the surface went wrong.
  ///
  /// This variant exposes a **glfw** error for further information about what went wrong.
  InitError(InitError),

  /// The window (or its OpenGL context) could not be created.
  WindowCreationFailed,

  /// User error.
  UserError(E),

  /// The graphics state is not available.
  ///
  /// This error is generated when the initialization code is called on a thread on which the
  /// graphics state has already been acquired, or when the context is too old.
  GraphicsStateError(StateQueryError),
}

impl<E> fmt::Display for GlfwSurfaceError<E>
where
  E: fmt::Display,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      GlfwSurfaceError::InitError(ref e) => write!(f, "initialization error: {}", e),
      GlfwSurfaceError::WindowCreationFailed => f.write_str("failed to create window"),
      GlfwSurfaceError::UserError(ref e) => write!(f, "user error: {}", e),
      GlfwSurfaceError::GraphicsStateError(ref e) => {
        write!(f, "failed to get graphics state: {}", e)
      }
    }
  }
}

impl<E> From<InitError> for GlfwSurfaceError<E> {
  fn from(e: InitError) -> Self {
    GlfwSurfaceError::InitError(e)
  }
}

impl<E> error::Error for GlfwSurfaceError<E>
where
  E: 'static + error::Error,
{
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      GlfwSurfaceError::InitError(e) => Some(e),
      GlfwSurfaceError::WindowCreationFailed => None,
      GlfwSurfaceError::UserError(e) => Some(e),
      GlfwSurfaceError::GraphicsStateError(e) => Some(e),
    }
  }
}

/// GLFW surface.
///
/// This type is a helper that exposes two important concepts: the GLFW event receiver that you
/// can use to poll events and the [`GL44Context`], which allows you to perform the rendering part.
#[derive(Debug)]
pub struct GlfwSurface {
  /// Wrapped GLFW events queue.
  pub events_rx: Receiver<(f64, WindowEvent)>,

  /// Wrapped learngl context.
  pub context: GL44Context,
}

impl GlfwSurface {
  /// Initialize GLFW to provide a learngl environment.
  ///
  /// `create_window` is given the GLFW handle, once the OpenGL 4.4 core-profile hints are set. It
  /// must create the window and make its context current.
  pub fn new<E>(
    create_window: impl FnOnce(
      &mut Glfw,
    )
      -> Result<(Window, Receiver<(f64, WindowEvent)>), GlfwSurfaceError<E>>,
  ) -> Result<Self, GlfwSurfaceError<E>> {
    #[cfg(feature = "log-errors")]
    let error_cbk = glfw::LOG_ERRORS;
    #[cfg(not(feature = "log-errors"))]
    let error_cbk = glfw::FAIL_ON_ERRORS;

    let mut glfw = glfw::init(error_cbk)?;

    // OpenGL hints
    glfw.window_hint(glfw::WindowHint::OpenGlProfile(
      glfw::OpenGlProfileHint::Core,
    ));
    glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
    glfw.window_hint(glfw::WindowHint::ContextVersionMajor(4));
    glfw.window_hint(glfw::WindowHint::ContextVersionMinor(4));

    let (mut window, events_rx) = create_window(&mut glfw)?;

    // init OpenGL
    gl::load_with(|s| window.get_proc_address(s) as *const c_void);

    let gl = GL44::new().map_err(GlfwSurfaceError::GraphicsStateError)?;
    let context = GL44Context { window, gl };
    let surface = GlfwSurface { events_rx, context };

    Ok(surface)
  }

  /// Initialize GLFW and create a window titled `title`, configured with `win_opt`.
  ///
  /// Framebuffer-size, key and close events are polled.
  pub fn new_gl44(
    title: &str,
    win_opt: WindowOpt,
  ) -> Result<Self, GlfwSurfaceError<Infallible>> {
    GlfwSurface::new(|glfw| {
      glfw.window_hint(glfw::WindowHint::Samples(win_opt.num_samples()));

      let (mut window, events_rx) = match *win_opt.dim() {
        WindowDim::Windowed { width, height } => glfw
          .create_window(width, height, title, glfw::WindowMode::Windowed)
          .ok_or(GlfwSurfaceError::WindowCreationFailed)?,
      };

      window.make_current();

      if win_opt.vsync() {
        glfw.set_swap_interval(glfw::SwapInterval::Sync(1));
      } else {
        glfw.set_swap_interval(glfw::SwapInterval::None);
      }

      window.set_framebuffer_size_polling(true);
      window.set_key_polling(true);
      window.set_close_polling(true);

      log::debug!("created window “{}” ({:?})", title, win_opt);

      Ok((window, events_rx))
    })
  }
}

/// learngl OpenGL 4.4 context.
///
/// This type also re-exports the GLFW window, if you need access to it.
#[derive(Debug)]
pub struct GL44Context {
  /// Wrapped GLFW window.
  pub window: Window,

  /// OpenGL 4.4 state.
  gl: GL44,
}

impl GL44Context {
  /// Size of the framebuffer, as `[width, height]`.
  pub fn framebuffer_size(&self) -> [u32; 2] {
    let (w, h) = self.window.get_framebuffer_size();
    [w as u32, h as u32]
  }

  /// Present the rendered frame.
  pub fn swap_buffers(&mut self) {
    self.window.swap_buffers();
  }
}

unsafe impl GraphicsContext for GL44Context {
  type Backend = GL44;

  fn backend(&mut self) -> &mut Self::Backend {
    &mut self.gl
  }
}
