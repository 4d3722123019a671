//! Call-site attribution for backend error checks.
//!
//! Backends that can only report errors after the fact (OpenGL’s `glGetError`, for instance) check
//! for pending errors right after each call and blame the call that raised them. A [`CallSite`]
//! carries what is needed to do so: the text of the call and where it was issued.
//!
//! Use [`call_site!`](crate::call_site) to build one at the current location.

use std::fmt;

/// A backend call and its source location.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CallSite {
  /// Symbolic name (typically the stringified call).
  pub function: &'static str,
  /// Source file.
  pub file: &'static str,
  /// Source line.
  pub line: u32,
}

impl CallSite {
  /// Create a new call site.
  pub const fn new(function: &'static str, file: &'static str, line: u32) -> Self {
    CallSite {
      function,
      file,
      line,
    }
  }
}

impl fmt::Display for CallSite {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    write!(f, "{} ({}:{})", self.function, self.file, self.line)
  }
}

/// Build a [`CallSite`] for `function` at the current source location.
#[macro_export]
macro_rules! call_site {
  ($function:expr) => {
    $crate::debug::CallSite::new($function, file!(), line!())
  };
}
