//! Graphics context.
//!
//! A graphics context is an object that gives access to the backend of the currently active
//! device context. This crate doesn’t create such contexts: windowing crates (e.g.
//! `learngl-glfw`) do it for you.
//!
//! # On context and threads
//!
//!   - An object which type implements [`GraphicsContext`] must be `!Send` and `!Sync`. Backend
//!     states are expected to be `!Send` and `!Sync`, so this is very likely to be automatic.
//!   - You can only create a single context per thread.

/// Class of graphics context.
///
/// # Safety
///
/// Implementors must ensure the backend they hand out is bound to the graphics context current on
/// the calling thread.
pub unsafe trait GraphicsContext {
  /// Backend type.
  type Backend: ?Sized;

  /// Access the underlying backend.
  fn backend(&mut self) -> &mut Self::Backend;
}
