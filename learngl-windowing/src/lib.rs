//! # learngl windowing
//!
//! This is the base, abstract crate for windowing common types in learngl. The `learngl` crate
//! wraps OpenGL objects, but it doesn’t give you a way to create an OpenGL context: that is left
//! to platform crates such as `learngl-glfw`. This crate holds the types they all agree on:
//!
//! - [`WindowDim`]: dimension of a window and its mode.
//! - [`WindowOpt`]: hints to customize the window and its context, such as vertical
//!   synchronization or multisampling.

#![deny(missing_docs)]

/// Dimension metrics.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WindowDim {
  /// Windowed mode.
  Windowed {
    /// Width of the window.
    width: u32,
    /// Height of the window.
    height: u32,
  },
}

impl WindowDim {
  /// Requested size, as `[width, height]`.
  pub fn size(&self) -> [u32; 2] {
    match *self {
      WindowDim::Windowed { width, height } => [width, height],
    }
  }
}

/// Different window options.
///
/// Feel free to look at the different methods available to tweak the options. You may want to
/// start with `default()` though.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WindowOpt {
  dim: WindowDim,
  vsync: bool,
  num_samples: Option<u32>,
}

impl Default for WindowOpt {
  /// Defaults:
  ///
  /// - `dim` set to `WindowDim::Windowed { width: 960, height: 540 }`.
  /// - `vsync` set to `true`.
  /// - `num_samples` set to `None`.
  fn default() -> Self {
    WindowOpt {
      dim: WindowDim::Windowed {
        width: 960,
        height: 540,
      },
      vsync: true,
      num_samples: None,
    }
  }
}

impl WindowOpt {
  /// Set the dimension of the window.
  #[inline]
  pub fn set_dim(self, dim: WindowDim) -> Self {
    WindowOpt { dim, ..self }
  }

  /// Get the dimension of the window.
  #[inline]
  pub fn dim(&self) -> &WindowDim {
    &self.dim
  }

  /// Synchronize buffer swaps with the display refresh rate. Default to `true`.
  #[inline]
  pub fn set_vsync(self, vsync: bool) -> Self {
    WindowOpt { vsync, ..self }
  }

  /// Whether buffer swaps are synchronized with the display.
  #[inline]
  pub fn vsync(&self) -> bool {
    self.vsync
  }

  /// Set the number of samples to use for multisampling.
  ///
  /// Pass `None` to disable multisampling.
  #[inline]
  pub fn set_num_samples<S>(self, samples: S) -> Self
  where
    S: Into<Option<u32>>,
  {
    WindowOpt {
      num_samples: samples.into(),
      ..self
    }
  }

  /// Get the number of samples to use in multisampling, if any.
  #[inline]
  pub fn num_samples(&self) -> Option<u32> {
    self.num_samples
  }
}
