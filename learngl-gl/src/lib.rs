//! OpenGL backends.
//!
//! This crate exports [OpenGL](https://www.khronos.org/opengl/) backends for
//! [learngl](https://crates.io/crates/learngl). Pick a backend type and use it as the `Backend`
//! of your graphics context.
//!
//! Every OpenGL call issued by a backend is checked for errors when the `call-checks` feature is
//! enabled (the default). Errors are logged with the faulty call and its location.

pub mod gl44;

pub use gl44::GL44;
