//! OpenGL error checking.
//!
//! [`gl_call!`] wraps a single OpenGL call. With the `call-checks` feature, pending errors are
//! cleared before the call and drained right after it; each drained error is logged along with
//! the call’s text and location. Without the feature, the macro expands to the bare call.

use gl::types::*;
use learngl::debug::CallSite;

// Some drivers keep reporting the same error forever when no context is current.
const MAX_DRAINED_ERRORS: usize = 32;

#[cfg(feature = "call-checks")]
macro_rules! gl_call {
  ($call:expr) => {{
    $crate::gl44::debug::clear_errors();
    let r = $call;
    $crate::gl44::debug::check_errors(&::learngl::call_site!(stringify!($call)));
    r
  }};
}

#[cfg(not(feature = "call-checks"))]
macro_rules! gl_call {
  ($call:expr) => {
    $call
  };
}

/// Discard every pending error.
#[cfg_attr(not(feature = "call-checks"), allow(dead_code))]
pub(crate) unsafe fn clear_errors() {
  for _ in 0..MAX_DRAINED_ERRORS {
    if gl::GetError() == gl::NO_ERROR {
      break;
    }
  }
}

/// Drain pending errors and blame them on `site`.
///
/// Returns `true` if no error was pending.
#[cfg_attr(not(feature = "call-checks"), allow(dead_code))]
pub(crate) unsafe fn check_errors(site: &CallSite) -> bool {
  let mut errors = Vec::new();

  while errors.len() < MAX_DRAINED_ERRORS {
    match gl::GetError() {
      gl::NO_ERROR => break,
      e => errors.push(e),
    }
  }

  report(site, &errors)
}

#[cfg_attr(not(feature = "call-checks"), allow(dead_code))]
fn report(site: &CallSite, errors: &[GLenum]) -> bool {
  for &e in errors {
    log::error!("[OpenGL error] {} (0x{:04x}) in {}", error_name(e), e, site);
  }

  errors.is_empty()
}

#[cfg_attr(not(feature = "call-checks"), allow(dead_code))]
fn error_name(e: GLenum) -> &'static str {
  match e {
    gl::INVALID_ENUM => "GL_INVALID_ENUM",
    gl::INVALID_VALUE => "GL_INVALID_VALUE",
    gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
    gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
    gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
    gl::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
    gl::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
    _ => "unknown error",
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn report_without_errors() {
    let site = CallSite::new("gl::Clear(gl::COLOR_BUFFER_BIT)", "renderer.rs", 12);
    assert!(report(&site, &[]));
  }

  #[test]
  fn report_with_errors() {
    let site = CallSite::new("gl::DrawElements(..)", "renderer.rs", 30);
    assert!(!report(&site, &[gl::INVALID_OPERATION]));
    assert!(!report(&site, &[gl::INVALID_ENUM, gl::INVALID_VALUE]));
  }

  #[test]
  fn error_names() {
    assert_eq!(error_name(gl::INVALID_ENUM), "GL_INVALID_ENUM");
    assert_eq!(error_name(gl::INVALID_OPERATION), "GL_INVALID_OPERATION");
    assert_eq!(error_name(gl::OUT_OF_MEMORY), "GL_OUT_OF_MEMORY");
    assert_eq!(error_name(0xdead), "unknown error");
  }
}
